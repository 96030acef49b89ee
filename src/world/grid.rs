use std::ops::Range;

/// A square board of `width × width` cells, indexed in row-major order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    width: usize,
    cells: usize,
}

impl Grid {
    /// Create a grid of side `width`.  Returns `None` if `width²` does not
    /// fit in a `usize`.
    pub(crate) fn new(width: usize) -> Option<Grid> {
        let cells = width.checked_mul(width)?;
        Some(Grid { width, cells })
    }

    pub(crate) fn width(self) -> usize {
        self.width
    }

    /// Total number of cells on the board
    pub(crate) fn cells(self) -> usize {
        self.cells
    }

    /// Iterate over every cell index on the board
    pub(crate) fn positions(self) -> Range<usize> {
        0..self.cells
    }

    pub(crate) fn contains(self, cell: usize) -> bool {
        cell < self.cells
    }

    /// Split a cell index into `(row, col)`
    pub(crate) fn row_col(self, cell: usize) -> (usize, usize) {
        (cell / self.width, cell % self.width)
    }

    /// Join `(row, col)` back into a cell index
    pub(crate) fn index(self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Bring an arbitrary index onto the board by reducing it modulo the
    /// number of cells.
    pub(crate) fn wrap(self, cell: usize) -> usize {
        cell % self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn overflowing_width() {
        assert_eq!(Grid::new(usize::MAX), None);
    }

    #[rstest]
    #[case(0, (0, 0))]
    #[case(4, (1, 0))]
    #[case(5, (1, 1))]
    #[case(7, (1, 3))]
    #[case(15, (3, 3))]
    fn test_row_col(#[case] cell: usize, #[case] rc: (usize, usize)) {
        let grid = Grid::new(4).expect("4x4 grid should fit");
        assert_eq!(grid.row_col(cell), rc);
        assert_eq!(grid.index(rc.0, rc.1), cell);
    }

    #[test]
    fn wrap_start_index() {
        let grid = Grid::new(3).expect("3x3 grid should fit");
        assert_eq!(grid.cells(), 9);
        assert_eq!(grid.wrap(4), 4);
        assert_eq!(grid.wrap(9), 0);
        assert_eq!(grid.wrap(22), 4);
        assert!(grid.contains(8));
        assert!(!grid.contains(9));
    }
}
