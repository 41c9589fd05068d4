#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use audio::*;
pub use cell::*;
pub use clock::*;
pub use error::*;
pub use grid::*;
pub use schedule::*;
pub use session::*;
pub use spawner::*;
pub use types::*;

mod audio;
mod cell;
mod clock;
mod error;
mod grid;
mod schedule;
mod session;
mod spawner;
#[cfg(test)]
mod testing;
mod types;

/// Largest grid side, keeps every index inside a [`CellIndex`].
pub const MAX_SIDE: Coord = 15;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub duration: Seconds,
    pub spawn_interval: Millis,
    pub visible_for: Millis,
    pub bomb_probability: f64,
    pub mole_points: Score,
    pub bomb_penalty: Score,
}

impl GameConfig {
    pub const STANDARD: Self = Self {
        size: (3, 3),
        duration: 60,
        spawn_interval: 1000,
        visible_for: 800,
        bomb_probability: 0.2,
        mole_points: 10,
        bomb_penalty: 10,
    };

    /// Clamps every field into a playable range.
    pub fn sanitized(self) -> Self {
        let (rows, cols) = self.size;
        let bomb_probability = if self.bomb_probability.is_nan() {
            Self::STANDARD.bomb_probability
        } else {
            self.bomb_probability.clamp(0.0, 1.0)
        };
        Self {
            size: (rows.clamp(1, MAX_SIDE), cols.clamp(1, MAX_SIDE)),
            duration: self.duration.max(1),
            spawn_interval: self.spawn_interval.max(1),
            visible_for: self.visible_for.max(1),
            bomb_probability,
            mole_points: self.mole_points,
            bomb_penalty: self.bomb_penalty,
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum WhackOutcome {
    NoChange,
    HitMole,
    HitBomb,
}

impl WhackOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TickOutcome {
    NoChange,
    Ticked(Seconds),
    Spawned(PendingReveal),
    Hidden(CellIndex),
    Expired,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
