use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::*;

/// Spawn roll that plays back a fixed list of `(cell, content)` picks.
///
/// Every bomb probability it is asked about ends up in `probabilities`.
#[derive(Clone, Debug, Default)]
pub(crate) struct ScriptedRoll {
    script: VecDeque<(CellIndex, CellContent)>,
    next_content: CellContent,
    pub(crate) probabilities: Vec<f64>,
}

impl ScriptedRoll {
    pub(crate) fn new(script: impl IntoIterator<Item = (CellIndex, CellContent)>) -> Self {
        Self {
            script: script.into_iter().collect(),
            next_content: CellContent::Mole,
            probabilities: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, cell: CellIndex, content: CellContent) {
        self.script.push_back((cell, content));
    }
}

impl SpawnRoll for ScriptedRoll {
    fn pick_cell(&mut self, empty: &[CellIndex]) -> CellIndex {
        match self.script.pop_front() {
            Some((cell, content)) => {
                self.next_content = content;
                cell
            }
            None => {
                self.next_content = CellContent::Mole;
                empty[0]
            }
        }
    }

    fn roll_bomb(&mut self, probability: f64) -> bool {
        self.probabilities.push(probability);
        self.next_content == CellContent::Bomb
    }
}

/// Audio sink that remembers every cue it got.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct RecordingAudio {
    pub(crate) whacks: usize,
    pub(crate) bombs: usize,
    pub(crate) music: Vec<bool>,
}

impl AudioSink for RecordingAudio {
    fn play_whack(&mut self) {
        self.whacks += 1;
    }

    fn play_bomb(&mut self) {
        self.bombs += 1;
    }

    fn set_music(&mut self, playing: bool) {
        self.music.push(playing);
    }
}
