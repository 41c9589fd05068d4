use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Handle to a scheduled task, used to cancel it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(u64);

impl TaskId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Everything a timer can deliver back to a [`Session`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TimerEvent {
    ClockTick,
    SpawnTick,
    AutoHide(PendingReveal),
}

/// Deferred and repeating delivery of [`TimerEvent`]s.
///
/// Implementations must guarantee that a cancelled task never delivers its event afterwards.
pub trait Scheduler {
    /// Delivers `event` once after `delay`.
    fn after(&mut self, delay: Millis, event: TimerEvent) -> TaskId;

    /// Delivers `event` every `period` until cancelled.
    fn every(&mut self, period: Millis, event: TimerEvent) -> TaskId;

    /// Cancelling an unknown or already fired one-shot task is a no-op.
    fn cancel(&mut self, task: TaskId);
}

#[derive(Clone, Debug, PartialEq)]
struct ManualTask {
    id: TaskId,
    due: u64,
    period: Option<Millis>,
    event: TimerEvent,
}

/// Virtual-time scheduler, time only moves when the owner asks for due events.
///
/// Events due at the same instant come out in the order they were scheduled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ManualScheduler {
    now: u64,
    next_id: u64,
    tasks: Vec<ManualTask>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Number of tasks that may still fire.
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_scheduled(&self, task: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == task)
    }

    /// Time of the next due event, if any.
    pub fn next_due(&self) -> Option<u64> {
        self.tasks.iter().map(|t| t.due).min()
    }

    /// Pops the earliest event due no later than `deadline`, moving the clock to its due time.
    pub fn pop_due(&mut self, deadline: u64) -> Option<TimerEvent> {
        let (pos, _) = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due <= deadline)
            .min_by_key(|(_, task)| (task.due, task.id))?;

        let ManualTask {
            due, period, event, ..
        } = self.tasks[pos];
        self.now = self.now.max(due);
        match period {
            Some(period) => self.tasks[pos].due = due + u64::from(period.max(1)),
            None => {
                self.tasks.swap_remove(pos);
            }
        }
        Some(event)
    }

    /// Moves the clock forward to `time` without delivering anything.
    pub fn set_now(&mut self, time: u64) {
        self.now = self.now.max(time);
    }

    fn push(&mut self, delay: Millis, period: Option<Millis>, event: TimerEvent) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ManualTask {
            id,
            due: self.now + u64::from(delay),
            period,
            event,
        });
        id
    }
}

impl Scheduler for ManualScheduler {
    fn after(&mut self, delay: Millis, event: TimerEvent) -> TaskId {
        self.push(delay, None, event)
    }

    fn every(&mut self, period: Millis, event: TimerEvent) -> TaskId {
        self.push(period, Some(period), event)
    }

    fn cancel(&mut self, task: TaskId) {
        self.tasks.retain(|t| t.id != task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TimerEvent::*;

    #[test]
    fn events_come_out_in_due_then_schedule_order() {
        let mut scheduler = ManualScheduler::new();
        scheduler.every(1000, ClockTick);
        scheduler.every(1000, SpawnTick);
        scheduler.after(500, ClockTick);

        assert_eq!(scheduler.pop_due(2000), Some(ClockTick));
        assert_eq!(scheduler.now(), 500);
        assert_eq!(scheduler.pop_due(2000), Some(ClockTick));
        assert_eq!(scheduler.pop_due(2000), Some(SpawnTick));
        assert_eq!(scheduler.now(), 1000);
        assert_eq!(scheduler.pop_due(2000), Some(ClockTick));
        assert_eq!(scheduler.pop_due(2000), Some(SpawnTick));
        assert_eq!(scheduler.pop_due(2000), None);
        assert_eq!(scheduler.next_due(), Some(3000));
    }

    #[test]
    fn one_shot_fires_once() {
        let mut scheduler = ManualScheduler::new();
        let task = scheduler.after(800, SpawnTick);

        assert_eq!(scheduler.pop_due(799), None);
        assert!(scheduler.is_scheduled(task));
        assert_eq!(scheduler.pop_due(800), Some(SpawnTick));
        assert!(!scheduler.is_scheduled(task));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let mut scheduler = ManualScheduler::new();
        let tick = scheduler.every(1000, ClockTick);
        let once = scheduler.after(10, SpawnTick);

        scheduler.cancel(tick);
        scheduler.cancel(once);
        scheduler.cancel(once);

        assert_eq!(scheduler.pop_due(u64::MAX), None);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn delays_are_relative_to_current_time() {
        let mut scheduler = ManualScheduler::new();
        scheduler.set_now(1500);
        scheduler.after(800, SpawnTick);

        assert_eq!(scheduler.next_due(), Some(2300));
    }
}
