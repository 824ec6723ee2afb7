use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::{Scheduler, Task, TaskHandle};

/// Scheduler driven by a virtual clock.
///
/// Nothing fires until `advance` is called; due tasks then run on the
/// calling thread in deadline order (ties broken by arming order). Clones
/// share the same clock.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Arc<Mutex<Clock>>,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry>,
}

struct Entry {
    id: u64,
    period: Duration,
    due: Duration,
    cancelled: Arc<AtomicBool>,
    // Taken out while the task runs so the clock is not locked during the call.
    task: Option<Task>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.lock().now
    }

    /// Tasks that are armed and not cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.clock
            .lock()
            .entries
            .iter()
            .filter(|e| !e.cancelled.load(Ordering::Acquire))
            .count()
    }

    /// Move the clock forward by `by`, firing every task that falls due.
    ///
    /// Returns the number of callbacks invoked.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.clock.lock().now + by;
        let mut fired = 0;

        loop {
            let (id, mut task) = {
                let mut clock = self.clock.lock();
                clock.entries.retain(|e| !e.cancelled.load(Ordering::Acquire));

                let next = clock
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.task.is_some() && e.due <= target)
                    .min_by_key(|(_, e)| (e.due, e.id))
                    .map(|(i, _)| i);

                let Some(index) = next else {
                    clock.now = target;
                    break;
                };

                let due = clock.entries[index].due;
                clock.now = due;
                let entry = &mut clock.entries[index];
                entry.due += entry.period;
                match entry.task.take() {
                    Some(task) => (entry.id, task),
                    None => continue,
                }
            };

            task();
            fired += 1;

            let mut clock = self.clock.lock();
            if let Some(entry) = clock.entries.iter_mut().find(|e| e.id == id) {
                entry.task = Some(task);
            }
        }

        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, period: Duration, task: Task) -> TaskHandle {
        let period = period.max(Duration::from_millis(1));
        let (handle, cancelled) = TaskHandle::new();

        let mut clock = self.clock.lock();
        let id = clock.next_id;
        clock.next_id += 1;
        let due = clock.now + period;
        clock.entries.push(Entry {
            id,
            period,
            due,
            cancelled,
            task: Some(task),
        });

        handle
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("now", &self.now())
            .field("pending", &self.pending())
            .finish()
    }
}
