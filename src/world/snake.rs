use super::direction::Direction;
use super::grid::Grid;
use std::collections::VecDeque;

/// Snake state.
///
/// All positions are cell indices on the board the snake lives on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The cells covered by the snake, head first and tail last
    pub(super) body: VecDeque<usize>,

    /// The direction in which the snake moved on its last step
    pub(super) direction: Direction,

    /// The direction the snake will take on its next step, if the player has
    /// asked for a turn since the last step
    pub(super) pending: Option<Direction>,
}

impl Snake {
    /// Create a one-cell snake at `head` facing in `direction`
    pub(super) fn new(head: usize, direction: Direction) -> Snake {
        Snake {
            body: VecDeque::from([head]),
            direction,
            pending: None,
        }
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> usize {
        self.body
            .front()
            .copied()
            .expect("snake body should never be empty")
    }

    /// Return the positions of the cells in the snake's body, head first
    pub(super) fn body(&self) -> &VecDeque<usize> {
        &self.body
    }

    pub(super) fn len(&self) -> usize {
        self.body.len()
    }

    /// Ask the snake to turn to `direction` on its next step.  Returns `false`
    /// (and leaves any earlier request in place) if `direction` would reverse
    /// the snake onto itself.
    pub(super) fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            false
        } else {
            self.pending = Some(direction);
            true
        }
    }

    /// Commit any pending turn and return the cell the head will move into
    pub(super) fn steer(&mut self, grid: Grid) -> usize {
        if let Some(d) = self.pending.take() {
            self.direction = d;
        }
        self.direction.advance(self.head(), grid)
    }

    /// Return `true` if moving the head into `cell` would run the snake into
    /// itself.  Unless the snake is growing on this step, its tail moves out
    /// of the way and does not count.
    pub(super) fn blocks(&self, cell: usize, growing: bool) -> bool {
        let solid = if growing {
            self.body.len()
        } else {
            self.body.len().saturating_sub(1)
        };
        self.body.iter().take(solid).any(|&c| c == cell)
    }

    /// Move the head into `cell`, dropping the tail unless `grow` is set
    pub(super) fn advance(&mut self, cell: usize, grow: bool) {
        self.body.push_front(cell);
        if !grow {
            let _ = self.body.pop_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(4).expect("4x4 grid should fit")
    }

    #[test]
    fn reverse_turn_is_ignored() {
        let mut snake = Snake::new(5, Direction::Right);
        assert!(snake.turn(Direction::Down));
        assert!(!snake.turn(Direction::Left));
        assert_eq!(snake.pending, Some(Direction::Down));
        assert_eq!(snake.steer(grid()), 9);
        assert_eq!(snake.direction, Direction::Down);
        assert_eq!(snake.pending, None);
    }

    #[test]
    fn last_valid_turn_wins() {
        let mut snake = Snake::new(5, Direction::Right);
        assert!(snake.turn(Direction::Up));
        assert!(snake.turn(Direction::Down));
        assert_eq!(snake.steer(grid()), 9);
    }

    #[test]
    fn tail_is_free_unless_growing() {
        let snake = Snake {
            body: VecDeque::from([5, 6, 10, 9]),
            direction: Direction::Left,
            pending: None,
        };
        assert!(!snake.blocks(9, false));
        assert!(snake.blocks(9, true));
        assert!(snake.blocks(10, false));
        assert!(!snake.blocks(4, false));
    }

    #[test]
    fn advance_keeps_tail_when_growing() {
        let mut snake = Snake::new(5, Direction::Right);
        snake.advance(6, true);
        assert_eq!(snake.body(), &VecDeque::from([6, 5]));
        snake.advance(7, false);
        assert_eq!(snake.body(), &VecDeque::from([7, 6]));
        assert_eq!(snake.head(), 7);
        assert_eq!(snake.len(), 2);
    }
}
