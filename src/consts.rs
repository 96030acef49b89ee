//! Assorted constants & hard-coded configuration
use crate::world::Direction;
use std::time::Duration;

/// Smallest board side length accepted by [`World::new()`][crate::World::new]
pub const MIN_WIDTH: usize = 3;

/// Board side length used when neither the configuration file nor the
/// command line gives one
pub const DEFAULT_WIDTH: usize = 8;

/// Direction a freshly-built snake faces
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Time between ticks at speed 1.  The driver divides this by its speed
/// multiplier.
pub const BASE_TICK_PERIOD: Duration = Duration::from_millis(500);

/// Speed multiplier used when none is configured
pub const DEFAULT_SPEED: u32 = 2;
