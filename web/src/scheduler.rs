use gloo::timers::callback::{Interval, Timeout};
use std::collections::HashMap;
use whackamole_core::{Millis, Scheduler, TaskId, TimerEvent};
use yew::Callback;

/// Browser timers feeding [`TimerEvent`]s back into the component.
///
/// Dropping a gloo handle clears the underlying JS timer, so cancelling is just forgetting the handle.
#[derive(Debug)]
pub(crate) struct GlooScheduler {
    callback: Callback<TimerEvent>,
    next_id: u64,
    timeouts: HashMap<TaskId, Timeout>,
    intervals: HashMap<TaskId, Interval>,
}

impl GlooScheduler {
    pub(crate) fn new(callback: Callback<TimerEvent>) -> Self {
        Self {
            callback,
            next_id: 0,
            timeouts: HashMap::new(),
            intervals: HashMap::new(),
        }
    }

    pub(crate) fn pending(&self) -> usize {
        self.timeouts.len() + self.intervals.len()
    }

    fn next_task(&mut self) -> TaskId {
        let task = TaskId::from_raw(self.next_id);
        self.next_id += 1;
        task
    }
}

impl Scheduler for GlooScheduler {
    fn after(&mut self, delay: Millis, event: TimerEvent) -> TaskId {
        let task = self.next_task();
        let callback = self.callback.clone();
        let timeout = Timeout::new(delay, move || callback.emit(event));
        self.timeouts.insert(task, timeout);
        task
    }

    fn every(&mut self, period: Millis, event: TimerEvent) -> TaskId {
        let task = self.next_task();
        let callback = self.callback.clone();
        let interval = Interval::new(period, move || callback.emit(event));
        self.intervals.insert(task, interval);
        task
    }

    fn cancel(&mut self, task: TaskId) {
        self.timeouts.remove(&task);
        self.intervals.remove(&task);
    }
}
