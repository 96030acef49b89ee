mod direction;
mod grid;
mod snake;
pub use self::direction::Direction;
use self::grid::Grid;
use self::snake::Snake;
use crate::consts;
use rand::{rngs::ThreadRng, seq::IteratorRandom, Rng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

/// The snake simulation: a square board, the snake on it, the reward the
/// snake is chasing, and the state of the game.
///
/// A `World` does nothing on its own.  Whatever drives it calls
/// [`start_game()`][World::start_game] once, then
/// [`update()`][World::update] once per tick, and forwards player input with
/// [`change_direction()`][World::change_direction] in between.  Once the game
/// has been won or lost the `World` is finished; build a new one to play
/// again.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct World<R = ThreadRng> {
    rng: R,
    grid: Grid,
    snake: Snake,
    reward: usize,
    status: GameStatus,
}

impl World<ThreadRng> {
    /// Create a world with a `width × width` board and a one-cell snake at
    /// `start_index`, using the thread-local random number generator for
    /// reward placement.
    ///
    /// # Errors
    ///
    /// See [`World::new_with_rng()`].
    pub fn new(width: usize, start_index: usize) -> Result<Self, WorldError> {
        World::new_with_rng(width, start_index, rand::rng())
    }
}

impl<R: Rng> World<R> {
    /// Create a world with a `width × width` board, drawing reward positions
    /// from `rng`.
    ///
    /// The snake starts as a single cell at `start_index` (reduced modulo the
    /// number of cells), facing right, and the game starts out
    /// [`Idle`][GameStatus::Idle].
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidConfiguration`] if `width` is less than
    /// [`MIN_WIDTH`][consts::MIN_WIDTH] or the board would have more cells
    /// than fit in a `usize`.
    pub fn new_with_rng(width: usize, start_index: usize, mut rng: R) -> Result<Self, WorldError> {
        if width < consts::MIN_WIDTH {
            return Err(WorldError::InvalidConfiguration { width });
        }
        let grid = Grid::new(width).ok_or(WorldError::InvalidConfiguration { width })?;
        let snake = Snake::new(grid.wrap(start_index), consts::INITIAL_DIRECTION);
        let reward = place_reward(grid, &snake, &mut rng)
            .ok_or(WorldError::InvalidConfiguration { width })?;
        debug!(width, head = snake.head(), reward, "created world");
        Ok(World {
            rng,
            grid,
            snake,
            reward,
            status: GameStatus::Idle,
        })
    }

    /// Advance the simulation by one step.
    ///
    /// Does nothing unless the game is [`Playing`][GameStatus::Playing].
    /// Otherwise, any pending turn is applied and the snake moves one cell,
    /// wrapping around the edges of the board.  Moving into its own body
    /// loses the game; moving onto the reward grows the snake by one cell and
    /// places a new reward, or wins the game if the snake now covers the
    /// whole board.
    pub fn update(&mut self) {
        if self.status != GameStatus::Playing {
            return;
        }
        let head = self.snake.steer(self.grid);
        let growing = head == self.reward;
        if self.snake.blocks(head, growing) {
            info!(cell = head, len = self.snake.len(), "snake ran into itself");
            self.status = GameStatus::Lost;
            return;
        }
        self.snake.advance(head, growing);
        if growing {
            if let Some(cell) = place_reward(self.grid, &self.snake, &mut self.rng) {
                debug!(len = self.snake.len(), reward = cell, "snake ate the reward");
                self.reward = cell;
            } else {
                info!(len = self.snake.len(), "snake filled the board");
                self.status = GameStatus::Won;
            }
        }
    }
}

impl<R> World<R> {
    /// Leave the [`Idle`][GameStatus::Idle] state and start playing.  Has no
    /// effect once the game has started.
    pub fn start_game(&mut self) {
        if self.status == GameStatus::Idle {
            debug!("game started");
            self.status = GameStatus::Playing;
        }
    }

    /// Ask the snake to turn to `direction` on the next
    /// [`update()`][World::update].
    ///
    /// Only the latest accepted request before a step counts.  A request to
    /// reverse onto the snake's current direction is ignored, as is any
    /// request after the game has ended.  Requests made before the game starts
    /// are kept until the first step.
    pub fn change_direction(&mut self, direction: Direction) {
        if self.status.is_over() {
            return;
        }
        if self.snake.turn(direction) {
            debug!(%direction, "turn requested");
        } else {
            debug!(%direction, current = %self.snake.direction, "reverse turn ignored");
        }
    }

    /// Return the side length of the board
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Return the number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.grid.cells()
    }

    /// Return the number of cells the snake covers
    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    /// Return the cell index of the snake's head
    pub fn snake_head(&self) -> usize {
        self.snake.head()
    }

    /// Return the cell covered by part `body_index` of the snake, where 0 is
    /// the head and `snake_len() - 1` is the tail.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::IndexOutOfBounds`] if `body_index` is not less
    /// than [`snake_len()`][World::snake_len].
    pub fn snake_body_position(&self, body_index: usize) -> Result<usize, WorldError> {
        self.snake
            .body()
            .get(body_index)
            .copied()
            .ok_or(WorldError::IndexOutOfBounds {
                index: body_index,
                len: self.snake.len(),
            })
    }

    /// Iterate over the cells covered by the snake, head to tail
    pub fn snake_body(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.snake.body().iter().copied()
    }

    /// Return the direction the snake moved in on its last step
    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    /// Return the cell holding the reward.
    ///
    /// Once the game is [`Won`][GameStatus::Won], this is the last reward
    /// eaten, which is where the snake's head is.
    pub fn get_reward_cell(&self) -> usize {
        self.reward
    }

    pub fn get_game_status(&self) -> GameStatus {
        self.status
    }

    /// Return a copy of everything a renderer can observe about the world
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width(),
            status: self.status,
            direction: self.snake.direction,
            body: self.snake_body().collect(),
            reward: self.reward,
        }
    }
}

#[cfg(test)]
impl<R: Rng> World<R> {
    /// Build a world with the snake laid out exactly as given
    pub(crate) fn with_layout(
        width: usize,
        body: &[usize],
        direction: Direction,
        reward: usize,
        status: GameStatus,
        rng: R,
    ) -> World<R> {
        let mut world =
            World::new_with_rng(width, body[0], rng).expect("test world should be valid");
        world.snake = Snake {
            body: body.iter().copied().collect(),
            direction,
            pending: None,
        };
        world.reward = reward;
        world.status = status;
        world
    }
}

/// Choose a cell not covered by the snake, uniformly at random.  Returns
/// `None` if the snake covers the whole board.
fn place_reward<R: Rng + ?Sized>(grid: Grid, snake: &Snake, rng: &mut R) -> Option<usize> {
    let occupied = snake.body().iter().copied().collect::<HashSet<_>>();
    grid.positions()
        .filter(move |c| !occupied.contains(c))
        .choose(rng)
}

/// The state of play
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// The world has been built but the game has not started
    Idle,
    Playing,
    /// The snake covers every cell of the board
    Won,
    /// The snake ran into itself
    Lost,
}

impl GameStatus {
    /// Return `true` if the game has been won or lost
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameStatus::Idle => "idle",
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        };
        f.pad(name)
    }
}

/// A point-in-time copy of a [`World`]'s observable state
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Snapshot {
    pub width: usize,
    pub status: GameStatus,
    pub direction: Direction,
    /// Cells covered by the snake, head first
    pub body: Vec<usize>,
    pub reward: usize,
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum WorldError {
    #[error("invalid board width {width}; must be at least {min}", min = consts::MIN_WIDTH)]
    InvalidConfiguration { width: usize },
    #[error("snake body index {index} out of range for snake of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}
