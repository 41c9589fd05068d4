use hashbrown::HashMap;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Source of randomness for spawns.
pub trait SpawnRoll {
    /// Picks one of `empty`, which is never empty itself.
    fn pick_cell(&mut self, empty: &[CellIndex]) -> CellIndex;

    /// Whether the next spawn is a bomb, true with `probability`.
    fn roll_bomb(&mut self, probability: f64) -> bool;
}

/// Uniform spawn roll over a seeded small RNG.
#[derive(Clone, Debug)]
pub struct RandomRoll {
    rng: SmallRng,
}

impl RandomRoll {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl SpawnRoll for RandomRoll {
    fn pick_cell(&mut self, empty: &[CellIndex]) -> CellIndex {
        empty[self.rng.random_range(0..empty.len())]
    }

    fn roll_bomb(&mut self, probability: f64) -> bool {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self.rng.random_bool(probability)
    }
}

/// Serial of a single spawn, tells a stale auto-hide apart from the current one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevealId(u32);

/// A hole that is currently up and waiting for its auto-hide.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReveal {
    pub cell: CellIndex,
    pub content: CellContent,
    pub reveal: RevealId,
    /// How long after the spawn the auto-hide fires.
    pub visible_for: Millis,
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Pending {
    reveal: PendingReveal,
    task: TaskId,
}

/// Puts moles and bombs into empty holes on a fixed interval and takes them back down.
#[derive(Clone, Debug, PartialEq)]
pub struct Spawner {
    spawn_interval: Millis,
    visible_for: Millis,
    bomb_probability: f64,
    interval: Option<TaskId>,
    pending: HashMap<CellIndex, Pending>,
    next_reveal: u32,
}

impl Spawner {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            spawn_interval: config.spawn_interval,
            visible_for: config.visible_for,
            bomb_probability: config.bomb_probability,
            interval: None,
            pending: HashMap::new(),
            next_reveal: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Number of holes up with an auto-hide still scheduled.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn pending_at(&self, cell: CellIndex) -> Option<PendingReveal> {
        self.pending.get(&cell).map(|pending| pending.reveal)
    }

    pub fn start(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(task) = self.interval.take() {
            scheduler.cancel(task);
        }
        self.interval = Some(scheduler.every(self.spawn_interval, TimerEvent::SpawnTick));
    }

    /// One spawn attempt. A full grid or a stopped spawner is a silent no-op.
    pub fn spawn(
        &mut self,
        grid: &mut Grid,
        roll: &mut impl SpawnRoll,
        scheduler: &mut impl Scheduler,
    ) -> Option<PendingReveal> {
        if !self.is_running() {
            return None;
        }

        let empty = grid.empty_cells();
        if empty.is_empty() {
            log::trace!("grid full, skipping spawn");
            return None;
        }

        let cell = roll.pick_cell(&empty);
        if !empty.contains(&cell) {
            log::warn!("spawn roll picked non-empty cell {}", cell);
            return None;
        }

        let content = if roll.roll_bomb(self.bomb_probability) {
            CellContent::Bomb
        } else {
            CellContent::Mole
        };
        if !grid.compare_and_set(cell, CellContent::Empty, content) {
            return None;
        }

        let reveal = PendingReveal {
            cell,
            content,
            reveal: RevealId(self.next_reveal),
            visible_for: self.visible_for,
        };
        self.next_reveal = self.next_reveal.wrapping_add(1);

        let task = scheduler.after(self.visible_for, TimerEvent::AutoHide(reveal));
        if let Some(stale) = self.pending.insert(cell, Pending { reveal, task }) {
            log::warn!("cell {} still had a pending auto-hide", cell);
            scheduler.cancel(stale.task);
        }

        log::debug!("spawned {:?} at cell {}", content, cell);
        Some(reveal)
    }

    /// Takes the hole down if `reveal` is still the one showing there.
    pub fn auto_hide(
        &mut self,
        grid: &mut Grid,
        scheduler: &mut impl Scheduler,
        reveal: PendingReveal,
    ) -> bool {
        match self.pending.get(&reveal.cell) {
            Some(pending) if pending.reveal == reveal => {}
            _ => {
                log::debug!("ignoring stale auto-hide for cell {}", reveal.cell);
                return false;
            }
        }

        if let Some(pending) = self.pending.remove(&reveal.cell) {
            scheduler.cancel(pending.task);
        }

        let hidden = grid.compare_and_set(reveal.cell, reveal.content, CellContent::Empty);
        if hidden {
            log::debug!("auto-hid {:?} at cell {}", reveal.content, reveal.cell);
        }
        hidden
    }

    /// Forgets the pending auto-hide of a hole the player just cleared.
    pub fn settle(&mut self, cell: CellIndex, scheduler: &mut impl Scheduler) {
        if let Some(pending) = self.pending.remove(&cell) {
            scheduler.cancel(pending.task);
        }
    }

    /// Cancels the interval and every pending auto-hide, then empties the grid.
    pub fn stop(&mut self, grid: &mut Grid, scheduler: &mut impl Scheduler) {
        if let Some(task) = self.interval.take() {
            scheduler.cancel(task);
        }
        for (_, pending) in self.pending.drain() {
            scheduler.cancel(pending.task);
        }
        grid.reset_all();
    }
}
