use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Indices of the empty holes, inline for any grid up to 4x4.
pub type EmptyCells = SmallVec<[CellIndex; 16]>;

/// The holes of the board.
///
/// Contents can only be changed through [`Grid::compare_and_set`] and [`Grid::reset_all`], so every write is checked
/// against the latest content and against the `Empty -> Mole/Bomb -> Empty` cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<CellContent>,
}

impl Grid {
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn validate_index(&self, index: usize) -> Result<CellIndex> {
        if index < usize::from(self.total_cells()) {
            Ok(index as CellIndex)
        } else {
            Err(GameError::InvalidCell(index))
        }
    }

    pub fn get(&self, index: CellIndex) -> Option<CellContent> {
        self.nd_index(index).map(|pos| self.cells[pos])
    }

    /// Contents of every hole in index order.
    pub fn cells(&self) -> impl Iterator<Item = CellContent> + '_ {
        self.cells.iter().copied()
    }

    pub fn empty_cells(&self) -> EmptyCells {
        self.cells()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index as CellIndex)
            .collect()
    }

    pub fn showing_count(&self) -> CellCount {
        self.cells().filter(|cell| cell.is_showing()).count() as CellCount
    }

    /// Replaces the content at `index` with `new` only when it currently holds `expected`.
    ///
    /// Returns whether the write happened. Writes that would skip the empty state are refused.
    pub fn compare_and_set(
        &mut self,
        index: CellIndex,
        expected: CellContent,
        new: CellContent,
    ) -> bool {
        let Some(pos) = self.nd_index(index) else {
            return false;
        };

        let current = self.cells[pos];
        if current != expected {
            return false;
        }

        if !current.can_become(new) {
            log::warn!("refused cell {} transition {:?} -> {:?}", index, current, new);
            return false;
        }

        self.cells[pos] = new;
        true
    }

    pub fn reset_all(&mut self) {
        self.cells.fill(CellContent::Empty);
    }

    fn nd_index(&self, index: CellIndex) -> Option<[usize; 2]> {
        let (rows, cols) = self.cells.dim();
        let index = usize::from(index);
        if cols == 0 || index >= rows * cols {
            None
        } else {
            Some([index / cols, index % cols])
        }
    }
}
