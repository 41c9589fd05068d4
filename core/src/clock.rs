use serde::{Deserialize, Serialize};

use crate::*;

/// Period of the countdown.
pub const CLOCK_PERIOD: Millis = 1000;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockSignal {
    /// The tick did not belong to a running countdown.
    Idle,
    Ticked(Seconds),
    /// Reached zero on this tick, reported once per countdown.
    Expired,
}

/// One-second countdown for a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Clock {
    duration: Seconds,
    remaining: Seconds,
    task: Option<TaskId>,
}

impl Clock {
    pub fn new(duration: Seconds) -> Self {
        Self {
            duration,
            remaining: duration,
            task: None,
        }
    }

    pub fn remaining(&self) -> Seconds {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Starts a fresh countdown, replacing any previous one.
    pub fn start(&mut self, scheduler: &mut impl Scheduler) {
        self.stop(scheduler);
        self.remaining = self.duration;
        self.task = Some(scheduler.every(CLOCK_PERIOD, TimerEvent::ClockTick));
    }

    pub fn tick(&mut self) -> ClockSignal {
        if self.task.is_none() || self.remaining == 0 {
            return ClockSignal::Idle;
        }

        self.remaining -= 1;
        log::trace!("clock: {}s left", self.remaining);
        if self.remaining == 0 {
            ClockSignal::Expired
        } else {
            ClockSignal::Ticked(self.remaining)
        }
    }

    pub fn stop(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(task) = self.task.take() {
            scheduler.cancel(task);
        }
    }
}
