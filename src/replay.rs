use crate::command::{Command, Script};
use crate::world::{Snapshot, World};
use rand::Rng;
use serde::Serialize;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Drives a [`World`] through a scripted game the way an interactive front
/// end would: start it, then once per tick forward that tick's input and step
/// the simulation, stopping as soon as the game is over.
#[derive(Clone, Debug)]
pub struct Replay<R> {
    world: World<R>,
    pace: Option<Duration>,
}

impl<R: Rng> Replay<R> {
    pub fn new(world: World<R>) -> Replay<R> {
        Replay { world, pace: None }
    }

    /// Wait `period` before each tick instead of running flat out
    pub fn paced(mut self, period: Duration) -> Replay<R> {
        self.pace = Some(period);
        self
    }

    /// Play `script` to the end or until the game is won or lost, whichever
    /// comes first
    pub fn run(mut self, script: &Script) -> ReplayReport {
        self.world.start_game();
        let mut ticks = 0;
        for &cmd in script {
            if self.world.get_game_status().is_over() {
                break;
            }
            if let Some(period) = self.pace {
                thread::sleep(period);
            }
            if let Command::Turn(direction) = cmd {
                self.world.change_direction(direction);
            }
            self.world.update();
            ticks += 1;
            debug!(
                tick = ticks,
                head = self.world.snake_head(),
                len = self.world.snake_len(),
                "tick"
            );
        }
        let snapshot = self.world.snapshot();
        info!(
            ticks,
            status = %snapshot.status,
            len = snapshot.body.len(),
            "replay finished"
        );
        ReplayReport { ticks, snapshot }
    }
}

/// The outcome of a [`Replay`]
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ReplayReport {
    /// Number of ticks actually played
    pub ticks: usize,
    /// State of the world after the last tick
    pub snapshot: Snapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Direction, GameStatus};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn world(width: usize, start: usize) -> World<ChaCha12Rng> {
        World::new_with_rng(width, start, ChaCha12Rng::seed_from_u64(0x5EED))
            .expect("test world should be valid")
    }

    #[test]
    fn empty_script_only_starts() {
        let report = Replay::new(world(5, 12)).run(&Script::default());
        assert_eq!(report.ticks, 0);
        assert_eq!(report.snapshot.status, GameStatus::Playing);
        assert_eq!(report.snapshot.body, [12]);
    }

    #[test]
    fn every_command_is_one_tick() {
        let script = "....".parse::<Script>().expect("script should parse");
        let report = Replay::new(world(7, 0)).run(&script);
        assert_eq!(report.ticks, 4);
        assert_eq!(report.snapshot.status, GameStatus::Playing);
        assert_eq!(report.snapshot.body.first().copied(), Some(4));
    }

    #[test]
    fn stops_when_game_over() {
        let world = World::with_layout(
            5,
            &[12, 13, 18, 17, 16],
            Direction::Left,
            0,
            GameStatus::Playing,
            ChaCha12Rng::seed_from_u64(0x5EED),
        );
        let script = "s...".parse::<Script>().expect("script should parse");
        let report = Replay::new(world).run(&script);
        assert_eq!(report.ticks, 1);
        assert_eq!(report.snapshot.status, GameStatus::Lost);
        assert_eq!(report.snapshot.body, [12, 13, 18, 17, 16]);
    }

    #[test]
    fn paced_replay_still_plays() {
        let script = "..".parse::<Script>().expect("script should parse");
        let report = Replay::new(world(5, 12))
            .paced(Duration::from_millis(1))
            .run(&script);
        assert_eq!(report.ticks, 2);
    }

    #[test]
    fn report_serialization() {
        let report = Replay::new(world(5, 12)).run(&Script::default());
        let value = serde_json::to_value(&report).expect("serialization should succeed");
        assert_eq!(value["ticks"], 0);
        assert_eq!(value["snapshot"]["status"], "playing");
        assert_eq!(value["snapshot"]["body"], serde_json::json!([12]));
    }
}
