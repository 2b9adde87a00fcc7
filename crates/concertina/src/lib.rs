//! Concertina - expand/collapse sections for list views.
//!
//! Concertina wraps a pre-existing list-view data-binding contract and turns
//! any section's first row into a header that toggles the visibility of the
//! remaining rows, with caller-supplied animations and lifecycle
//! notifications. The host keeps its data provider exactly as it is; the
//! widget intercepts only the queries that depend on expand state and
//! forwards everything else untouched.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use concertina::UiTaskQueue;
//! use concertina::widget::ExpandableList;
//!
//! let tasks = Arc::new(UiTaskQueue::new());
//! let widget = ExpandableList::new(tasks.clone());
//! widget.set_data_provider(Some(&provider));
//! widget.set_view_host(Some(&view));
//!
//! // The view now talks to the widget instead of the provider.
//! let effective = Arc::new(widget);
//! view.set_data_provider(effective.clone());
//! effective.expand(0);
//! ```

pub use concertina_core::*;

pub mod model;
pub mod widget;
