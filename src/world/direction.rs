use super::grid::Grid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The direction in which the snake is moving
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the direction pointing the opposite way
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Return the cell one step away from `cell` in this direction.  Leaving
    /// the board on one edge re-enters it on the opposite edge of the same
    /// row or column.
    pub(crate) fn advance(self, cell: usize, grid: Grid) -> usize {
        debug_assert!(grid.contains(cell), "cell {cell} is off the board");
        let (mut row, mut col) = grid.row_col(cell);
        match self {
            Direction::Up => row = decrement_wrapping(row, grid.width()),
            Direction::Down => row = increment_wrapping(row, grid.width()),
            Direction::Left => col = decrement_wrapping(col, grid.width()),
            Direction::Right => col = increment_wrapping(col, grid.width()),
        }
        grid.index(row, col)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.pad(name)
    }
}

fn decrement_wrapping(x: usize, max: usize) -> usize {
    x.checked_sub(1).unwrap_or(max - 1)
}

fn increment_wrapping(x: usize, max: usize) -> usize {
    x.checked_add(1).filter(|&xx| xx < max).unwrap_or(0)
}
