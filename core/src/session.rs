use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    TimeExpired,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Running,
    Ended(EndCause),
}

impl SessionState {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn end_cause(self) -> Option<EndCause> {
        match self {
            Self::Ended(cause) => Some(cause),
            Self::Idle | Self::Running => None,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Everything the render surface needs after a state change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: Score,
    pub time_remaining: Seconds,
    pub size: Coord2,
    pub cells: Vec<CellContent>,
    pub state: SessionState,
}

impl Snapshot {
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn end_cause(&self) -> Option<EndCause> {
        self.state.end_cause()
    }
}

/// One play-through and the timers driving it.
///
/// All mutation happens in [`Session::start`], [`Session::handle`] and [`Session::whack`], each of which runs to
/// completion before the next event is looked at.
#[derive(Debug)]
pub struct Session<S, R, A> {
    config: GameConfig,
    state: SessionState,
    score: Score,
    grid: Grid,
    clock: Clock,
    spawner: Spawner,
    scheduler: S,
    roll: R,
    audio: A,
}

impl<S: Scheduler, R: SpawnRoll, A: AudioSink> Session<S, R, A> {
    pub fn new(config: GameConfig, scheduler: S, roll: R, audio: A) -> Self {
        let config = config.sanitized();
        Self {
            config,
            state: SessionState::Idle,
            score: 0,
            grid: Grid::new(config.size),
            clock: Clock::new(config.duration),
            spawner: Spawner::new(&config),
            scheduler,
            roll,
            audio,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn end_cause(&self) -> Option<EndCause> {
        self.state.end_cause()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn time_remaining(&self) -> Seconds {
        self.clock.remaining()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell_at(&self, index: CellIndex) -> Option<CellContent> {
        self.grid.get(index)
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score,
            time_remaining: self.time_remaining(),
            size: self.grid.size(),
            cells: self.grid.cells().collect(),
            state: self.state,
        }
    }

    /// Starts a new play-through from any state, throwing away whatever was running.
    pub fn start(&mut self) {
        if self.state.is_running() {
            log::info!("restarting session with score {}", self.score);
            self.stop_components();
        }

        self.score = 0;
        self.grid.reset_all();
        self.clock.start(&mut self.scheduler);
        self.spawner.start(&mut self.scheduler);
        self.state = SessionState::Running;
        self.audio.set_music(true);
        log::info!("session started, {}s on the clock", self.clock.remaining());
    }

    /// Applies a timer event. Events that no longer apply are ignored.
    pub fn handle(&mut self, event: TimerEvent) -> TickOutcome {
        if !self.state.is_running() {
            log::trace!("dropping {:?} outside of a running session", event);
            return TickOutcome::NoChange;
        }

        match event {
            TimerEvent::ClockTick => match self.clock.tick() {
                ClockSignal::Idle => TickOutcome::NoChange,
                ClockSignal::Ticked(remaining) => TickOutcome::Ticked(remaining),
                ClockSignal::Expired => {
                    self.finish(EndCause::TimeExpired);
                    TickOutcome::Expired
                }
            },
            TimerEvent::SpawnTick => self
                .spawner
                .spawn(&mut self.grid, &mut self.roll, &mut self.scheduler)
                .map_or(TickOutcome::NoChange, TickOutcome::Spawned),
            TimerEvent::AutoHide(reveal) => {
                if self
                    .spawner
                    .auto_hide(&mut self.grid, &mut self.scheduler, reveal)
                {
                    TickOutcome::Hidden(reveal.cell)
                } else {
                    TickOutcome::NoChange
                }
            }
        }
    }

    /// Player click on a hole.
    ///
    /// Out-of-range indices are an error, everything else that cannot score is [`WhackOutcome::NoChange`].
    pub fn whack(&mut self, index: usize) -> Result<WhackOutcome> {
        let index = self.grid.validate_index(index)?;

        if !self.state.is_running() {
            return Ok(WhackOutcome::NoChange);
        }

        let content = self.grid.get(index).unwrap_or_default();
        if content.is_empty() {
            return Ok(WhackOutcome::NoChange);
        }

        self.spawner.settle(index, &mut self.scheduler);
        if !self
            .grid
            .compare_and_set(index, content, CellContent::Empty)
        {
            return Ok(WhackOutcome::NoChange);
        }

        let outcome = match content {
            CellContent::Mole => {
                self.score = self.score.saturating_add(self.config.mole_points);
                self.audio.play_whack();
                WhackOutcome::HitMole
            }
            CellContent::Bomb => {
                self.score = self.score.saturating_sub(self.config.bomb_penalty);
                self.audio.play_bomb();
                WhackOutcome::HitBomb
            }
            CellContent::Empty => WhackOutcome::NoChange,
        };
        log::debug!("whacked cell {}: {:?}, score {}", index, outcome, self.score);
        Ok(outcome)
    }

    fn finish(&mut self, cause: EndCause) {
        if !self.state.is_running() {
            return;
        }

        self.stop_components();
        self.state = SessionState::Ended(cause);
        log::info!("session ended ({:?}) with score {}", cause, self.score);
    }

    fn stop_components(&mut self) {
        self.clock.stop(&mut self.scheduler);
        self.spawner.stop(&mut self.grid, &mut self.scheduler);
        self.audio.set_music(false);
    }
}

impl<R: SpawnRoll, A: AudioSink> Session<ManualScheduler, R, A> {
    /// Delivers the next event due no later than `deadline`.
    pub fn step(&mut self, deadline: u64) -> Option<(TimerEvent, TickOutcome)> {
        let event = self.scheduler.pop_due(deadline)?;
        Some((event, self.handle(event)))
    }

    /// Runs the session forward by `millis` of virtual time, returns the number of events delivered.
    pub fn advance(&mut self, millis: u64) -> usize {
        let deadline = self.scheduler.now() + millis;
        let mut delivered = 0;
        while self.step(deadline).is_some() {
            delivered += 1;
        }
        self.scheduler.set_now(deadline);
        delivered
    }
}
