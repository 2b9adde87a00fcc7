//! Row animation kinds for expand/collapse batch updates.
//!
//! The widget never animates anything itself; it names the animation the
//! host view system should apply to inserted or deleted body rows.

/// Animation applied by the host view system to a row insert/delete batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowAnimation {
    /// No animation, rows appear or vanish instantly.
    None,
    /// Fade rows in or out using opacity.
    #[default]
    Fade,
    /// Slide rows in from (or out toward) the header.
    SlideVertical,
}

impl RowAnimation {
    /// Returns `true` if this kind performs no visual animation.
    #[inline]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
