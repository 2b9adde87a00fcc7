//! Deferred task queue for next-tick execution on the UI loop.
//!
//! The queue collects closures posted during one iteration of the host's UI
//! event/render loop and runs them at the start of the next iteration, after
//! the current bind/layout pass has completed and before further user input
//! is processed.
//!
//! # How It Works
//!
//! 1. Code running inside the current loop iteration calls
//!    [`UiTaskQueue::post`] with a closure.
//!
//! 2. The host loop calls [`UiTaskQueue::drain`] exactly once per iteration.
//!
//! 3. `drain` runs every task posted before it began, in posting order.
//!    Tasks posted by a running task land in the following drain, never the
//!    current one.
//!
//! # Example
//!
//! ```
//! use concertina_core::UiTaskQueue;
//!
//! let queue = UiTaskQueue::new();
//! queue.post(|| println!("runs on the next tick"));
//! assert_eq!(queue.pending_count(), 1);
//!
//! // ... at the top of the next loop iteration:
//! let executed = queue.drain();
//! assert_eq!(executed, 1);
//! ```

use std::collections::VecDeque;

use parking_lot::Mutex;

/// A boxed task closure.
type BoxedUiTask = Box<dyn FnOnce() + Send + 'static>;

/// A FIFO queue of closures deferred to the next UI loop iteration.
///
/// The queue is typically shared (`Arc<UiTaskQueue>`) between the host's
/// event loop, which drains it, and widgets, which post to it.
pub struct UiTaskQueue {
    /// Pending tasks in posting order.
    tasks: Mutex<VecDeque<BoxedUiTask>>,
}

impl Default for UiTaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl UiTaskQueue {
    /// Create a new, empty task queue.
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(VecDeque::new()),
        }
    }

    /// Post a task to run on the next drain.
    pub fn post<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.tasks.lock().push_back(Box::new(task));
    }

    /// Run every task posted before this call, in posting order.
    ///
    /// Tasks posted while the drain is running are kept for the next drain.
    /// Returns the number of tasks that were executed.
    #[tracing::instrument(
        skip(self),
        target = "concertina_core::task_queue",
        level = "trace"
    )]
    pub fn drain(&self) -> usize {
        // Swap the whole batch out so tasks posted mid-drain queue up fresh.
        let batch = std::mem::take(&mut *self.tasks.lock());
        let executed = batch.len();

        for task in batch {
            tracing::trace!(target: "concertina_core::task_queue", "executing deferred task");
            task();
        }

        executed
    }

    /// Get the number of tasks currently waiting.
    pub fn pending_count(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Check whether the queue has no pending tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }

    /// Discard all pending tasks without running them.
    ///
    /// This is primarily for testing or teardown purposes.
    pub fn clear(&self) {
        self.tasks.lock().clear();
    }
}

static_assertions::assert_impl_all!(UiTaskQueue: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_post_and_drain_in_order() {
        let queue = UiTaskQueue::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for n in 0..3 {
            let order = order.clone();
            queue.post(move || order.lock().push(n));
        }

        assert_eq!(queue.pending_count(), 3);
        assert_eq!(queue.drain(), 3);
        assert_eq!(*order.lock(), vec![0, 1, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_task_posted_during_drain_waits_for_next_drain() {
        let queue = Arc::new(UiTaskQueue::new());
        let order = Arc::new(Mutex::new(Vec::new()));

        let q = queue.clone();
        let o = order.clone();
        queue.post(move || {
            o.lock().push("outer");
            let o2 = o.clone();
            q.post(move || o2.lock().push("inner"));
        });

        assert_eq!(queue.drain(), 1);
        assert_eq!(*order.lock(), vec!["outer"]);
        assert_eq!(queue.pending_count(), 1);

        assert_eq!(queue.drain(), 1);
        assert_eq!(*order.lock(), vec!["outer", "inner"]);
    }

    #[test]
    fn test_drain_empty_queue() {
        let queue = UiTaskQueue::new();
        assert_eq!(queue.drain(), 0);
    }

    #[test]
    fn test_clear_discards_tasks() {
        let queue = UiTaskQueue::new();
        let ran = Arc::new(Mutex::new(false));

        let r = ran.clone();
        queue.post(move || *r.lock() = true);
        queue.clear();

        assert_eq!(queue.drain(), 0);
        assert!(!*ran.lock());
    }
}
