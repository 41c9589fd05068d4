use serde::{Deserialize, Serialize};

/// What a single hole is currently showing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellContent {
    Empty,
    Mole,
    Bomb,
}

impl CellContent {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_showing(self) -> bool {
        !self.is_empty()
    }

    /// Short text used as the cell's accessible label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Empty => "empty hole",
            Self::Mole => "mole",
            Self::Bomb => "bomb",
        }
    }

    /// Whether a cell may go from `self` to `next` in one step.
    ///
    /// Every change passes through `Empty`, so a mole never turns straight into a bomb.
    pub const fn can_become(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Empty, Self::Mole | Self::Bomb) | (Self::Mole | Self::Bomb, Self::Empty)
        )
    }
}

impl Default for CellContent {
    fn default() -> Self {
        Self::Empty
    }
}
