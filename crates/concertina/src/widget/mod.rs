//! Expandable-sections widget layer.
//!
//! This module provides the controller that adds expand/collapse behavior to
//! a sectioned list view, and the contract it drives the host view system
//! through:
//!
//! - `ExpandableList`: the controller; installs itself as the view's
//!   effective data provider and interaction observer
//! - `ExpandStateStore` / `CapabilityGate`: per-section expand flags and the
//!   expandability decision
//! - `SectionViewHost`: the capability set the host view system implements
//!   (visible headers, interaction guard, animated row batches)
//! - `RowBatch` / `RowEdit` / `BatchCompletion`: one atomic animated update
//!   and its completion token
//! - `RowAnimation`: the animation kinds a batch can request
//!
//! # Data Flow
//!
//! ```text
//! ┌──────────────┐  queries   ┌────────────────┐  fallback  ┌──────────────┐
//! │  List View   │───────────>│ ExpandableList │───────────>│ Host Provider│
//! │ (host view   │    taps    │  state + gate  │  forward   │ Host Observer│
//! │   system)    │───────────>│  interceptors  │───────────>│   (weak)     │
//! └──────────────┘            └────────────────┘            └──────────────┘
//!        ^                            │
//!        └────────────────────────────┘
//!          animated row batches + lifecycle phases
//! ```

mod animation;
mod expand_state;
mod expandable_list;
mod host;

pub use animation::RowAnimation;
pub use expand_state::{CapabilityGate, ExpandStateStore};
pub use expandable_list::{ExpandableList, ExpansionSignals};
pub use host::{BatchCompletion, RowBatch, RowEdit, SectionViewHost};
