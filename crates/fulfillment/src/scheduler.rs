//! Deferred execution of delivery transitions.
//!
//! The service never sleeps on the caller's thread: each transition is handed
//! to a [`DeliveryScheduler`] as a one-shot task with a delay.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;

use crate::error::{FulfillmentError, Result};

/// A one-shot callback run when its delay elapses.
pub type ScheduledTask = Box<dyn FnOnce() + Send + 'static>;

/// Runs tasks after a delay.
pub trait DeliveryScheduler: Send + Sync + 'static {
    /// Queues `task` to run once `delay` has elapsed.
    fn schedule_after(&self, delay: Duration, task: ScheduledTask);
}

/// Scheduler backed by tokio timers.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Uses the runtime the caller is running on.
    pub fn current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|err| FulfillmentError::SchedulerUnavailable(err.to_string()))
    }
}

impl DeliveryScheduler for TokioScheduler {
    fn schedule_after(&self, delay: Duration, task: ScheduledTask) {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}

struct Pending {
    due: Duration,
    seq: u64,
    task: ScheduledTask,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    seq: u64,
    pending: Vec<Pending>,
}

/// Scheduler driven by hand, for tests and benchmarks.
///
/// Time only moves when [`advance`](Self::advance) is called. Tasks due at the
/// same instant run in the order they were scheduled.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Arc<Mutex<ManualClock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.clock.lock().now
    }

    /// Number of tasks still waiting.
    pub fn pending(&self) -> usize {
        self.clock.lock().pending.len()
    }

    /// Moves the clock forward and runs every task that became due.
    ///
    /// Tasks run without the clock lock held, so they may schedule further
    /// work; anything they schedule that falls inside the window also runs.
    /// Returns the number of tasks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.clock.lock().now.saturating_add(by);
        let mut ran = 0;
        loop {
            let next = {
                let mut clock = self.clock.lock();
                let due = clock
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, pending)| pending.due <= target)
                    .min_by_key(|(_, pending)| (pending.due, pending.seq))
                    .map(|(index, _)| index);
                match due {
                    Some(index) => {
                        let pending = clock.pending.swap_remove(index);
                        clock.now = clock.now.max(pending.due);
                        Some(pending.task)
                    }
                    None => {
                        clock.now = target;
                        None
                    }
                }
            };
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    /// Runs every pending task, including ones scheduled while running.
    pub fn run_all(&self) -> usize {
        let mut ran = 0;
        loop {
            let latest = self.clock.lock().pending.iter().map(|p| p.due).max();
            let Some(latest) = latest else {
                return ran;
            };
            let now = self.now();
            ran += self.advance(latest.saturating_sub(now));
        }
    }
}

impl DeliveryScheduler for ManualScheduler {
    fn schedule_after(&self, delay: Duration, task: ScheduledTask) {
        let mut clock = self.clock.lock();
        let due = clock.now.saturating_add(delay);
        let seq = clock.seq;
        clock.seq += 1;
        clock.pending.push(Pending { due, seq, task });
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clock = self.clock.lock();
        f.debug_struct("ManualScheduler")
            .field("now", &clock.now)
            .field("pending", &clock.pending.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) -> ScheduledTask) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let make = move |label: &'static str| -> ScheduledTask {
            let sink = Arc::clone(&sink);
            Box::new(move || sink.lock().push(label))
        };
        (log, make)
    }

    #[test]
    fn test_manual_runs_only_due_tasks() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        scheduler.schedule_after(Duration::from_secs(10), task("transit"));
        scheduler.schedule_after(Duration::from_secs(20), task("delivered"));

        assert_eq!(scheduler.advance(Duration::from_secs(9)), 0);
        assert_eq!(scheduler.advance(Duration::from_secs(1)), 1);
        assert_eq!(*log.lock(), vec!["transit"]);
        assert_eq!(scheduler.pending(), 1);

        assert_eq!(scheduler.advance(Duration::from_secs(10)), 1);
        assert_eq!(*log.lock(), vec!["transit", "delivered"]);
        assert_eq!(scheduler.now(), Duration::from_secs(20));
    }

    #[test]
    fn test_manual_orders_by_due_then_schedule_order() {
        let scheduler = ManualScheduler::new();
        let (log, task) = recorder();
        scheduler.schedule_after(Duration::from_secs(5), task("b"));
        scheduler.schedule_after(Duration::from_secs(1), task("a"));
        scheduler.schedule_after(Duration::from_secs(5), task("c"));

        assert_eq!(scheduler.advance(Duration::from_secs(5)), 3);
        assert_eq!(*log.lock(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_manual_tasks_can_schedule_more() {
        let scheduler = ManualScheduler::new();
        let count = Arc::new(AtomicUsize::new(0));

        let inner = scheduler.clone();
        let counter = Arc::clone(&count);
        scheduler.schedule_after(
            Duration::from_secs(10),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                let counter = Arc::clone(&counter);
                inner.schedule_after(
                    Duration::from_secs(10),
                    Box::new(move || {
                        counter.fetch_add(1, Ordering::SeqCst);
                    }),
                );
            }),
        );

        assert_eq!(scheduler.run_all(), 2);
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(scheduler.now(), Duration::from_secs(20));
    }

    #[test]
    fn test_tokio_current_requires_runtime() {
        assert!(matches!(
            TokioScheduler::current(),
            Err(FulfillmentError::SchedulerUnavailable(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_runs_after_delay() {
        let scheduler = TokioScheduler::current().unwrap();
        let (log, task) = recorder();
        scheduler.schedule_after(Duration::from_secs(10), task("fired"));

        tokio::time::sleep(Duration::from_secs(9)).await;
        assert!(log.lock().is_empty());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(*log.lock(), vec!["fired"]);
    }
}
