//! Deferred lifecycle completions
//!
//! The window manager never waits. Opening and closing schedule a named
//! [`ScheduledTask`] with a [`Scheduler`]; when the task comes due the host
//! hands it back through `WindowManager::complete`, which checks the task
//! against the panel's current state before applying anything.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use shared_types::LifecycleState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Clear the opening animation flag (`Opening -> Stable`)
    FinishOpening,
    /// Drop the panel once the closing animation ends (`Closing -> removed`)
    FinishClosing,
}

/// A pending completion, keyed by panel and the source state it expects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduledTask {
    pub panel_id: String,
    pub kind: TaskKind,
    pub expect: LifecycleState,
    /// Panel transition counter when the task was scheduled
    pub epoch: u64,
}

impl ScheduledTask {
    pub fn finish_opening(panel_id: impl Into<String>, epoch: u64) -> Self {
        Self {
            panel_id: panel_id.into(),
            kind: TaskKind::FinishOpening,
            expect: LifecycleState::Opening,
            epoch,
        }
    }

    pub fn finish_closing(panel_id: impl Into<String>, epoch: u64) -> Self {
        Self {
            panel_id: panel_id.into(),
            kind: TaskKind::FinishClosing,
            expect: LifecycleState::Closing,
            epoch,
        }
    }
}

/// "Invoke this after duration D" service consumed by the lifecycle
/// controller.
pub trait Scheduler: Send {
    fn schedule(&self, after: Duration, task: ScheduledTask);
}

#[derive(Debug, Default)]
struct ManualState {
    now: Duration,
    next_seq: u64,
    queue: Vec<(Duration, u64, ScheduledTask)>,
}

/// Virtual clock for hosts that drive time themselves (frame loops, tests).
///
/// Clones share one queue, so the host keeps a handle while the manager
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward and return every task that came due, earliest
    /// first. Tasks due at the same instant keep their scheduling order.
    pub fn advance(&self, by: Duration) -> Vec<ScheduledTask> {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        state.now += by;
        let now = state.now;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            state.queue.drain(..).partition(|(at, _, _)| *at <= now);
        state.queue = pending;

        due.sort_by_key(|(at, seq, _)| (*at, *seq));
        due.into_iter().map(|(_, _, task)| task).collect()
    }

    pub fn pending(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .queue
            .len()
    }

    pub fn now(&self) -> Duration {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).now
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, after: Duration, task: ScheduledTask) {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let at = state.now + after;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.queue.push((at, seq, task));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_due_before_deadline() {
        let timers = ManualScheduler::new();
        timers.schedule(Duration::from_millis(300), ScheduledTask::finish_opening("a", 1));

        assert!(timers.advance(Duration::from_millis(299)).is_empty());
        assert_eq!(timers.pending(), 1);

        let due = timers.advance(Duration::from_millis(1));
        assert_eq!(due, vec![ScheduledTask::finish_opening("a", 1)]);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_due_tasks_come_out_in_deadline_order() {
        let timers = ManualScheduler::new();
        timers.schedule(Duration::from_millis(300), ScheduledTask::finish_closing("late", 2));
        timers.schedule(Duration::from_millis(100), ScheduledTask::finish_opening("early", 1));
        timers.schedule(Duration::from_millis(300), ScheduledTask::finish_opening("tie", 1));

        let due = timers.advance(Duration::from_secs(1));
        let ids: Vec<_> = due.iter().map(|t| t.panel_id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late", "tie"]);
    }

    #[test]
    fn test_clones_share_queue() {
        let host = ManualScheduler::new();
        let owned = host.clone();
        owned.schedule(Duration::from_millis(10), ScheduledTask::finish_opening("a", 1));

        assert_eq!(host.pending(), 1);
        assert_eq!(host.advance(Duration::from_millis(10)).len(), 1);
        assert_eq!(owned.now(), Duration::from_millis(10));
    }
}
