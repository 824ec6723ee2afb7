use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancellation handle for a scheduled task.
///
/// Dropping the handle cancels the task.
#[derive(Debug)]
pub struct TaskHandle {
    cancelled: Arc<AtomicBool>,
}

impl TaskHandle {
    /// New handle plus the flag the scheduler polls.
    #[must_use]
    pub fn new() -> (Self, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Self {
                cancelled: Arc::clone(&flag),
            },
            flag,
        )
    }

    /// Stop the task. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_sets_flag() {
        let (handle, flag) = TaskHandle::new();
        assert!(!handle.is_cancelled());
        handle.cancel();
        handle.cancel();
        assert!(handle.is_cancelled());
        assert!(flag.load(Ordering::Acquire));
    }

    #[test]
    fn test_drop_cancels() {
        let (handle, flag) = TaskHandle::new();
        drop(handle);
        assert!(flag.load(Ordering::Acquire));
    }
}
