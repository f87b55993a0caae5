use std::fmt;

/// A 1-based grid position
///
/// Path cells use `row == 1` and carry their index in `col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The `index`-th vertex of a path
    pub fn on_path(index: usize) -> Self {
        Self { row: 1, col: index }
    }

    pub fn transposed(self) -> Self {
        Self {
            row: self.col,
            col: self.row,
        }
    }

    /// Taxicab (L1) distance
    pub fn distance(self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    pub fn in_square(self, n: usize) -> bool {
        (1..=n).contains(&self.row) && (1..=n).contains(&self.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
