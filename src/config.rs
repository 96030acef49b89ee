use crate::consts;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
pub struct Config {
    /// How to build the world
    #[serde(default)]
    pub world: WorldConfig,

    /// How fast to drive it
    #[serde(default)]
    pub pace: PaceConfig,
}

impl Config {
    /// Return the default configuration file path
    ///
    /// # Errors
    ///
    /// Returns `Err` if the local configuration directory cannot be
    /// determined.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("snake-world").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        content.parse()
    }

    /// Time between ticks at the configured speed
    pub fn tick_period(&self) -> Duration {
        self.pace.tick_period()
    }
}

impl std::str::FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Config, ConfigError> {
        toml::from_str(s).map_err(Into::into)
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct WorldConfig {
    /// Side length of the board
    pub width: usize,

    /// Cell the snake starts on.  `None` means the centre of the board.
    pub start_index: Option<usize>,

    /// Seed for reward placement.  `None` means a fresh random game each run.
    pub seed: Option<u64>,
}

impl WorldConfig {
    /// Return the configured start cell, or the centre cell of the board if
    /// none is configured.  A board too large to index falls back to cell 0;
    /// the width itself is rejected when the world is built.
    pub fn start_index(&self) -> usize {
        self.start_index.unwrap_or_else(|| {
            let half = self.width / 2;
            half.checked_mul(self.width)
                .and_then(|c| c.checked_add(half))
                .unwrap_or(0)
        })
    }
}

impl Default for WorldConfig {
    fn default() -> WorldConfig {
        WorldConfig {
            width: consts::DEFAULT_WIDTH,
            start_index: None,
            seed: None,
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawPaceConfig")]
pub struct PaceConfig {
    speed: NonZeroU32,
}

impl PaceConfig {
    /// Build a pace setting from a speed multiplier.  Returns `None` if
    /// `speed` is zero.
    pub fn new(speed: u32) -> Option<PaceConfig> {
        NonZeroU32::new(speed).map(|speed| PaceConfig { speed })
    }

    pub fn speed(&self) -> u32 {
        self.speed.get()
    }

    /// Time between ticks: the base period divided by the speed multiplier
    pub fn tick_period(&self) -> Duration {
        consts::BASE_TICK_PERIOD / self.speed.get()
    }
}

impl Default for PaceConfig {
    fn default() -> PaceConfig {
        PaceConfig::new(consts::DEFAULT_SPEED).expect("DEFAULT_SPEED should be nonzero")
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawPaceConfig {
    speed: u32,
}

impl Default for RawPaceConfig {
    fn default() -> RawPaceConfig {
        RawPaceConfig {
            speed: consts::DEFAULT_SPEED,
        }
    }
}

impl TryFrom<RawPaceConfig> for PaceConfig {
    type Error = ConfigError;

    fn try_from(value: RawPaceConfig) -> Result<PaceConfig, ConfigError> {
        PaceConfig::new(value.speed).ok_or(ConfigError::InvalidSpeed)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("speed must be at least 1")]
    InvalidSpeed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn empty_config() {
        let config = "".parse::<Config>().expect("empty config should parse");
        assert_eq!(config, Config::default());
        assert_eq!(config.world.width, 8);
        assert_eq!(config.world.start_index(), 36);
        assert_eq!(config.pace.speed(), 2);
        assert_eq!(config.tick_period(), Duration::from_millis(250));
    }

    #[test]
    fn full_config() {
        let config = concat!(
            "[world]\n",
            "width = 12\n",
            "start-index = 5\n",
            "seed = 42\n",
            "\n",
            "[pace]\n",
            "speed = 4\n",
        )
        .parse::<Config>()
        .expect("config should parse");
        assert_eq!(
            config,
            Config {
                world: WorldConfig {
                    width: 12,
                    start_index: Some(5),
                    seed: Some(42),
                },
                pace: PaceConfig::new(4).expect("4 is a valid speed"),
            }
        );
        assert_eq!(config.world.start_index(), 5);
        assert_eq!(config.tick_period(), Duration::from_millis(125));
    }

    #[test]
    fn partial_world_config() {
        let config = "[world]\nwidth = 5\n"
            .parse::<Config>()
            .expect("config should parse");
        assert_eq!(config.world.width, 5);
        assert_eq!(config.world.start_index(), 12);
        assert_eq!(config.world.seed, None);
        assert_eq!(config.pace, PaceConfig::default());
    }

    #[test]
    fn start_index_of_huge_board() {
        let config = "[world]\nwidth = 8589934592\n"
            .parse::<Config>()
            .expect("config should parse");
        assert_eq!(config.world.start_index(), 0);
        let world = WorldConfig {
            width: usize::MAX,
            ..WorldConfig::default()
        };
        assert_eq!(world.start_index(), 0);
    }

    #[test]
    fn zero_speed() {
        let r = "[pace]\nspeed = 0\n".parse::<Config>();
        assert!(matches!(r, Err(ConfigError::Parse(_))), "{r:?}");
    }

    #[test]
    fn unknown_type() {
        let r = "[world]\nwidth = \"wide\"\n".parse::<Config>();
        assert!(matches!(r, Err(ConfigError::Parse(_))), "{r:?}");
    }

    #[test]
    fn load_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file should be creatable");
        writeln!(file, "[world]\nwidth = 3\nseed = 7").expect("temp file should be writable");
        let config = Config::load(file.path(), false).expect("config should load");
        assert_eq!(config.world.width, 3);
        assert_eq!(config.world.seed, Some(7));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let path = dir.path().join("config.toml");
        assert_eq!(
            Config::load(&path, true).expect("missing file should be allowed"),
            Config::default()
        );
        let r = Config::load(&path, false);
        assert!(matches!(r, Err(ConfigError::Read(_))), "{r:?}");
    }
}
