/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u8;

/// Two-dimensional grid size `(rows, cols)`.
pub type Coord2 = (Coord, Coord);

/// Position of a hole in row-major order, `0..total_cells`.
pub type CellIndex = u8;

/// Count type used for total-cell counts.
pub type CellCount = u16;

/// Points, may go negative.
pub type Score = i32;

/// Whole seconds on the game clock.
pub type Seconds = u16;

/// Timer delays and periods.
pub type Millis = u32;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}
