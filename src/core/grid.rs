//! Square grid geometry: cells, adjacency, neighbors.
//!
//! Cells are numbered row-major from 0 to `size² - 1`. Two cells are
//! adjacent when they are one step apart horizontally within the same row,
//! or one full row apart vertically. Rows never wrap: on a 10-wide grid,
//! cells 9 and 10 are not neighbors.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A cell index on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell(pub u16);

impl Cell {
    /// Create a new cell.
    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Get the raw cell index.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({})", self.0)
    }
}

/// Orthogonal neighbors of a cell. Never more than four.
pub type Neighbors = SmallVec<[Cell; 4]>;

/// A square grid of side `size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: u16,
}

impl Grid {
    /// Create a grid with the given side length.
    ///
    /// A zero size has no cells, and sizes above 256 have indices that do not
    /// fit a `Cell`. `GameConfig::validate` rejects both before an engine
    /// builds its grid.
    #[must_use]
    pub const fn new(size: u16) -> Self {
        Self { size }
    }

    /// Side length.
    #[must_use]
    pub const fn size(self) -> u16 {
        self.size
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(self) -> u32 {
        self.size as u32 * self.size as u32
    }

    /// Highest valid cell index (`size² - 1`).
    ///
    /// An empty grid reports `Cell(0)`, which it does not contain.
    #[must_use]
    pub const fn max_cell(self) -> Cell {
        match self.cell_count() {
            0 => Cell(0),
            count => Cell((count - 1) as u16),
        }
    }

    /// Check whether a cell lies on the grid.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        u32::from(cell.0) < self.cell_count()
    }

    /// Row of a cell.
    #[must_use]
    pub const fn row(self, cell: Cell) -> u16 {
        cell.0 / self.size
    }

    /// Column of a cell.
    #[must_use]
    pub const fn column(self, cell: Cell) -> u16 {
        cell.0 % self.size
    }

    /// Cell at the given row and column, if on the grid.
    #[must_use]
    pub fn cell_at(self, row: u16, column: u16) -> Option<Cell> {
        if row < self.size && column < self.size {
            Some(Cell(row * self.size + column))
        } else {
            None
        }
    }

    /// Check whether two cells are orthogonal neighbors.
    ///
    /// ```
    /// use treasure_hunt::core::{Cell, Grid};
    ///
    /// let grid = Grid::new(10);
    /// assert!(grid.is_adjacent(Cell::new(23), Cell::new(24)));
    /// assert!(grid.is_adjacent(Cell::new(23), Cell::new(33)));
    /// assert!(!grid.is_adjacent(Cell::new(9), Cell::new(10)));
    /// ```
    #[must_use]
    pub fn is_adjacent(self, a: Cell, b: Cell) -> bool {
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        let same_row = self.row(a) == self.row(b);
        let same_column = self.column(a) == self.column(b);
        let diff = a.0.abs_diff(b.0);

        (same_row && diff == 1) || (same_column && diff == self.size)
    }

    /// Orthogonal neighbors of a cell, in up/down/left/right order.
    ///
    /// Corner cells have two neighbors, edge cells three, interior cells four.
    #[must_use]
    pub fn neighbors(self, cell: Cell) -> Neighbors {
        let mut out = Neighbors::new();
        if !self.contains(cell) {
            return out;
        }
        let row = self.row(cell);
        let column = self.column(cell);

        if row > 0 {
            out.push(Cell(cell.0 - self.size));
        }
        if row + 1 < self.size {
            out.push(Cell(cell.0 + self.size));
        }
        if column > 0 {
            out.push(Cell(cell.0 - 1));
        }
        if column + 1 < self.size {
            out.push(Cell(cell.0 + 1));
        }
        out
    }

    /// Iterate over every cell on the grid.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.cell_count()).map(|i| Cell(i as u16))
    }
}

/// Trial-division primality over small grid indices. 0 and 1 are not prime.
#[must_use]
pub fn is_prime(n: u16) -> bool {
    if n < 2 {
        return false;
    }
    let n = u32::from(n);
    let mut d = 2u32;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}
