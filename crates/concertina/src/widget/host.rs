//! Contract between the widget and the host view system.
//!
//! The host view system owns rendering, layout, and animation primitives.
//! The widget drives it through [`SectionViewHost`]: one atomic
//! [`RowBatch`] per transition, acknowledged through a [`BatchCompletion`]
//! token once the animation has finished.

use std::ops::Range;
use std::sync::Arc;

use crate::model::SectionCell;

use super::animation::RowAnimation;

/// The kind of row mutation in a batch update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEdit {
    /// Insert the rows into the section.
    Insert,
    /// Delete the rows from the section.
    Delete,
}

/// One atomic batched visual update applied by the host view system.
///
/// All rows are inserted or deleted together, with the named animation, and
/// the completion token is finished once the animation ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowBatch {
    /// The section being mutated.
    pub section: usize,
    /// Whether rows are inserted or deleted.
    pub edit: RowEdit,
    /// The row indices being inserted or deleted, within the section.
    pub rows: Range<usize>,
    /// The animation the host should apply.
    pub animation: RowAnimation,
}

impl RowBatch {
    /// The number of rows in this batch.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the batch mutates no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One-shot token the host view system finishes when an animated batch ends.
///
/// The widget's continuation (delivering `Did*` notifications and re-enabling
/// the header) runs inside [`finish`](Self::finish). Dropping the token
/// without finishing it runs the continuation anyway; a started transition
/// always completes, even against a host that forgets the callback.
pub struct BatchCompletion {
    continuation: Option<Box<dyn FnOnce() + Send>>,
}

impl BatchCompletion {
    /// Wraps the widget's continuation for one batch update.
    pub(crate) fn new<F>(continuation: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            continuation: Some(Box::new(continuation)),
        }
    }

    /// Signals that the batch's animation has finished.
    pub fn finish(mut self) {
        if let Some(continuation) = self.continuation.take() {
            continuation();
        }
    }
}

impl Drop for BatchCompletion {
    fn drop(&mut self) {
        if let Some(continuation) = self.continuation.take() {
            tracing::warn!(
                target: "concertina::widget::host",
                "batch completion dropped without finish; completing transition anyway"
            );
            continuation();
        }
    }
}

impl std::fmt::Debug for BatchCompletion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchCompletion")
            .field("finished", &self.continuation.is_none())
            .finish()
    }
}

/// The capability set the host view system offers to the widget.
///
/// Implemented by the scrollable list view (or a thin adapter over it) the
/// widget is installed into.
pub trait SectionViewHost: Send + Sync {
    /// The currently visible header cell of a section, if it is on screen.
    ///
    /// The widget never retains the returned cell beyond the current call
    /// chain; the visual element's lifetime stays with the view.
    fn visible_header(&self, section: usize) -> Option<Arc<dyn SectionCell>>;

    /// Enables or disables user interaction on a section's header element.
    ///
    /// Disabled while a transition's animation runs, so rapid repeated taps
    /// cannot start overlapping transitions on the same section.
    fn set_header_interactive(&self, section: usize, interactive: bool);

    /// Applies one atomic batched row update with animation.
    ///
    /// The host must call `completion.finish()` when the animation ends.
    fn apply_row_batch(&self, batch: RowBatch, completion: BatchCompletion);
}
