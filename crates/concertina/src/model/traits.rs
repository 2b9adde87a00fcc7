//! Capability traits for the host-facing data-binding contract.
//!
//! This module defines the capability sets a host application implements to
//! drive a sectioned list: a data provider for row counts and cells, an
//! interaction observer for taps and expand lifecycle events, and optional
//! per-cell capabilities. Every optional member has a default implementation,
//! so a host implements exactly the surface it cares about.

use std::sync::Arc;

use super::index::RowIndex;

/// A requested expand/collapse transition direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpandTransition {
    /// Show the section's body rows.
    Expand,
    /// Hide the section's body rows.
    Collapse,
}

impl ExpandTransition {
    /// Returns `true` for the expanding direction.
    #[inline]
    pub const fn is_expand(&self) -> bool {
        matches!(self, Self::Expand)
    }

    /// The phase delivered before this transition mutates the view.
    pub const fn will_phase(&self) -> ExpandPhase {
        match self {
            Self::Expand => ExpandPhase::WillExpand,
            Self::Collapse => ExpandPhase::WillCollapse,
        }
    }

    /// The phase delivered once this transition's batch update completes.
    pub const fn did_phase(&self) -> ExpandPhase {
        match self {
            Self::Expand => ExpandPhase::DidExpand,
            Self::Collapse => ExpandPhase::DidCollapse,
        }
    }
}

/// The phase of an expand/collapse transition, delivered to observers.
///
/// `Will*` phases fire before the animated row mutation begins; `Did*`
/// phases fire once the batched update has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpandPhase {
    /// The section is about to expand.
    WillExpand,
    /// The section finished expanding.
    DidExpand,
    /// The section is about to collapse.
    WillCollapse,
    /// The section finished collapsing.
    DidCollapse,
}

impl ExpandPhase {
    /// Returns `true` for the `Will*` phases.
    #[inline]
    pub const fn is_will(&self) -> bool {
        matches!(self, Self::WillExpand | Self::WillCollapse)
    }

    /// Returns `true` for the `Did*` phases.
    #[inline]
    pub const fn is_did(&self) -> bool {
        !self.is_will()
    }

    /// The transition direction this phase belongs to.
    pub const fn transition(&self) -> ExpandTransition {
        match self {
            Self::WillExpand | Self::DidExpand => ExpandTransition::Expand,
            Self::WillCollapse | Self::DidCollapse => ExpandTransition::Collapse,
        }
    }

    /// The will/did phase pair describing a steady state.
    ///
    /// A header element freshly bound to a section that is not transitioning
    /// is walked through this pair so its presentation matches the section's
    /// current state.
    pub const fn steady_pair(expanded: bool) -> (Self, Self) {
        if expanded {
            (Self::WillExpand, Self::DidExpand)
        } else {
            (Self::WillCollapse, Self::DidCollapse)
        }
    }
}

/// Per-header-cell lifecycle notification capability.
///
/// A header cell exposing this capability is notified of every transition
/// phase affecting its section, letting it update its expand affordance
/// (rotate a chevron, swap an icon) in step with the animation.
pub trait ExpandLifecycle: Send + Sync {
    /// Called for each transition phase of the cell's section.
    ///
    /// `reuse` is `true` when the phases are replayed to synchronize a
    /// recycled cell with the section's current state, rather than during a
    /// real transition.
    fn on_expand_phase(&self, phase: ExpandPhase, reuse: bool);
}

/// A visual element bound to one row, produced by the host provider.
///
/// The trait deliberately says nothing about rendering; the host view system
/// owns layout and painting. The widget only probes the optional capabilities
/// below.
pub trait SectionCell: Send + Sync {
    /// The expand lifecycle capability of this cell, if it has one.
    fn expand_lifecycle(&self) -> Option<&dyn ExpandLifecycle> {
        None
    }

    /// Returns `true` while this cell is freshly dequeued from a reuse pool
    /// and may still carry presentation state from a previous binding.
    fn is_recycled(&self) -> bool {
        false
    }
}

/// The data-provider capability set for a sectioned list.
///
/// Row and section data are fully owned by the implementing host; the widget
/// only consults this contract. At minimum, implement
/// [`row_count`](Self::row_count) and [`cell_for`](Self::cell_for).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use concertina::model::{RowIndex, SectionCell, SectionDataProvider};
///
/// struct Label(&'static str);
/// impl SectionCell for Label {}
///
/// struct Contacts {
///     groups: Vec<Vec<&'static str>>,
/// }
///
/// impl SectionDataProvider for Contacts {
///     fn section_count(&self) -> usize {
///         self.groups.len()
///     }
///
///     fn row_count(&self, section: usize) -> usize {
///         self.groups.get(section).map_or(0, Vec::len)
///     }
///
///     fn cell_for(&self, index: RowIndex) -> Option<Arc<dyn SectionCell>> {
///         let name = *self.groups.get(index.section())?.get(index.row())?;
///         Some(Arc::new(Label(name)))
///     }
/// }
/// ```
pub trait SectionDataProvider: Send + Sync {
    /// Returns the number of sections in the list.
    ///
    /// The default is a single section.
    fn section_count(&self) -> usize {
        1
    }

    /// Returns the full number of rows in the given section, header included.
    fn row_count(&self, section: usize) -> usize;

    /// Constructs (or dequeues and binds) the cell for the given row.
    ///
    /// Return `None` for an out-of-bounds index.
    fn cell_for(&self, index: RowIndex) -> Option<Arc<dyn SectionCell>>;

    // -------------------------------------------------------------------------
    // Optional members with default implementations
    // -------------------------------------------------------------------------

    /// Per-section expand capability.
    ///
    /// Return `Some(true)`/`Some(false)` to decide per section, or `None`
    /// (the default) to leave the decision to the widget's global default.
    fn can_expand_section(&self, _section: usize) -> Option<bool> {
        None
    }

    /// Constructs the header cell for an expandable section.
    ///
    /// The default delegates to [`cell_for`](Self::cell_for) with the
    /// section's header index. Override to give expandable headers a
    /// distinct cell kind.
    fn expandable_header_cell(&self, section: usize) -> Option<Arc<dyn SectionCell>> {
        self.cell_for(RowIndex::header(section))
    }
}

/// The interaction-observer capability set for a sectioned list.
///
/// All members are optional; the defaults do nothing.
pub trait SectionInteractionObserver: Send + Sync {
    /// Called when a row is tapped.
    fn on_row_selected(&self, _index: RowIndex) {}

    /// Called for each phase of a section's expand/collapse transition.
    fn on_expand_state_changed(&self, _section: usize, _phase: ExpandPhase) {}
}
