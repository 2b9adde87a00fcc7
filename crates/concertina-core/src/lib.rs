//! Core systems for Concertina.
//!
//! This crate provides the foundational components of the Concertina widget
//! extension:
//!
//! - **Signal/Slot System**: Type-safe inter-object communication
//! - **UI Task Queue**: Deferred next-tick task processing for the host's
//!   UI event loop
//! - **Error Types**: Shared error enums and `Result` alias
//! - **Logging**: `tracing` target constants for per-subsystem filtering
//!
//! # Signal/Slot Example
//!
//! ```
//! use concertina_core::Signal;
//!
//! // Create a signal that notifies when a section changes
//! let section_changed = Signal::<usize>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = section_changed.connect(|section| {
//!     println!("Section changed: {}", section);
//! });
//!
//! // Emit the signal
//! section_changed.emit(2);
//!
//! // Disconnect when done
//! section_changed.disconnect(conn_id).unwrap();
//! ```
//!
//! # Task Queue Example
//!
//! ```
//! use concertina_core::UiTaskQueue;
//! use std::sync::Arc;
//!
//! let queue = Arc::new(UiTaskQueue::new());
//!
//! // Defer work to the next loop iteration
//! queue.post(|| {
//!     println!("Deferred task executed!");
//! });
//!
//! // The host's event loop drains once per iteration
//! queue.drain();
//! ```

mod error;
pub mod logging;
pub mod signal;
mod task_queue;

pub use error::{CoreError, Result, SignalError};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use task_queue::UiTaskQueue;
