//! Logging facilities for Concertina.
//!
//! Concertina uses the `tracing` crate for instrumentation. The library
//! installs no subscriber of its own; to see logs, install one in your
//! application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Log output can be narrowed to individual subsystems with the target
//! constants in [`targets`], e.g. `RUST_LOG=concertina_core::signal=trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "concertina_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "concertina_core::signal";
    /// Deferred UI task queue target.
    pub const TASK_QUEUE: &str = "concertina_core::task_queue";
}
