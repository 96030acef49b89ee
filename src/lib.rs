//! A deterministic grid-based snake simulation.
//!
//! [`World`] owns a square board, the snake on it and the reward it is
//! chasing.  A front end draws the board from the world's queries, forwards
//! the player's turns with [`World::change_direction()`], and calls
//! [`World::update()`] once per tick; the world decides when the snake grows,
//! when it runs into itself, and when it has filled the board.
//!
//! The [`replay`] module contains a headless driver that plays a scripted
//! game, as used by the `snake-world` binary.
pub mod command;
pub mod config;
pub mod consts;
pub mod replay;
pub mod world;
pub use crate::world::{Direction, GameStatus, Snapshot, World, WorldError};
