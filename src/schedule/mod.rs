//! Periodic callbacks driving ticks and timers.
//!
//! Simulators that need time (Snake's autoplay, Sudoku's clock) receive an
//! `Arc<dyn Scheduler>` and arm one task per round. Pausing cancels the task,
//! resuming arms a new one.
//!
//! - `ManualScheduler`: virtual clock advanced by the caller (tests, replays)
//! - `TokioScheduler`: `tokio::time::interval` per task (feature `tokio`)

mod handle;
mod manual;
#[cfg(feature = "tokio")]
mod timer;

use std::time::Duration;

pub use handle::TaskHandle;
pub use manual::ManualScheduler;
#[cfg(feature = "tokio")]
pub use timer::TokioScheduler;

/// Callback invoked once per period.
pub type Task = Box<dyn FnMut() + Send + 'static>;

/// Source of periodic callbacks.
///
/// `schedule` must not invoke the task synchronously; the first call happens
/// one `period` after arming. The task keeps firing until its handle is
/// cancelled or dropped.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, period: Duration, task: Task) -> TaskHandle;
}
