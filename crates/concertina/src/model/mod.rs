//! Host-facing data-binding contract for sectioned lists.
//!
//! This module defines the types a host application uses to feed a sectioned
//! list view, and the capability sets the expandable-sections widget wraps:
//!
//! - `RowIndex`: identifies a row's position as `(section, row)`
//! - `SectionDataProvider`: row counts and cell construction
//! - `SectionInteractionObserver`: taps and expand lifecycle notifications
//! - `SectionCell` / `ExpandLifecycle`: per-cell optional capabilities
//! - `ExpandTransition` / `ExpandPhase`: transition direction and phase tags
//!
//! The widget substitutes itself as the effective provider/observer seen by
//! the underlying list view, intercepting only the members that depend on
//! expand state and forwarding everything else to the host implementation
//! (see [`crate::widget::ExpandableList`]).

mod index;
mod traits;

pub use index::RowIndex;
pub use traits::{
    ExpandLifecycle, ExpandPhase, ExpandTransition, SectionCell, SectionDataProvider,
    SectionInteractionObserver,
};
