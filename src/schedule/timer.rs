use std::sync::atomic::Ordering;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::{Scheduler, Task, TaskHandle};

/// Scheduler backed by tokio timers.
///
/// Each task runs in its own spawned loop on the given runtime. Missed
/// ticks are delayed rather than bursted.
#[derive(Clone, Debug)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    #[must_use]
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Use the runtime the caller is running on.
    ///
    /// Panics outside a tokio runtime.
    #[must_use]
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, period: Duration, mut task: Task) -> TaskHandle {
        let period = period.max(Duration::from_millis(1));
        let (handle, cancelled) = TaskHandle::new();

        self.runtime.spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if cancelled.load(Ordering::Acquire) {
                    break;
                }
                task();
            }
        });

        handle
    }
}
