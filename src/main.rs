use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use rand::{rngs::StdRng, Rng, SeedableRng};
use snake_world::command::Script;
use snake_world::config::{Config, ConfigError, PaceConfig};
use snake_world::replay::{Replay, ReplayReport};
use snake_world::World;
use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: snake-world [OPTIONS] [MOVES]

Play a scripted game of snake and print the final state as JSON.

MOVES is a string with one character per tick: w/k = up, s/j = down,
a/h = left, d/l = right, . = no input.  Whitespace is ignored.  Pass `-` to
read the moves from standard input.

Options:
  -c, --config <FILE>   Read configuration from FILE
  -w, --width <N>       Side length of the board
      --start <INDEX>   Cell the snake starts on (default: centre)
      --seed <N>        Seed for reward placement
      --speed <N>       Speed multiplier for --realtime
      --realtime        Wait between ticks as an interactive game would
  -h, --help            Display this help message and exit
  -V, --version         Show the program version and exit
";

fn main() -> ExitCode {
    init_tracing();
    let r = Command::from_parser(Parser::from_env())
        .map_err(anyhow::Error::from)
        .and_then(Command::run);
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<io::Error>() {
            Some(ioe) if ioe.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
            _ => {
                eprintln!("snake-world: {e:?}");
                ExitCode::from(2)
            }
        },
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Arguments),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('w') | Arg::Long("width") => {
                    args.width = Some(parser.value()?.parse()?);
                }
                Arg::Long("start") => args.start = Some(parser.value()?.parse()?),
                Arg::Long("seed") => args.seed = Some(parser.value()?.parse()?),
                Arg::Long("speed") => args.speed = Some(parser.value()?.parse()?),
                Arg::Long("realtime") => args.realtime = true,
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Value(val) if args.moves.is_none() => args.moves = Some(val.string()?),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(args))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(args) => {
                let report = args.play()?;
                let mut out = io::stdout().lock();
                serde_json::to_writer_pretty(&mut out, &report)?;
                writeln!(out)?;
                out.flush()?;
            }
            Command::Help => print!("{USAGE}"),
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    width: Option<usize>,
    start: Option<usize>,
    seed: Option<u64>,
    speed: Option<u32>,
    realtime: bool,
    moves: Option<String>,
}

impl Arguments {
    /// Load the configuration file (if any) and apply the command-line
    /// overrides on top of it
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = if let Some(path) = self.config.as_deref() {
            Config::load(path, false)
                .with_context(|| format!("failed to load {}", path.display()))?
        } else {
            match Config::default_path() {
                Ok(path) => Config::load(&path, true)
                    .with_context(|| format!("failed to load {}", path.display()))?,
                Err(e) => {
                    warn!("{e}; using default configuration");
                    Config::default()
                }
            }
        };
        if let Some(width) = self.width {
            config.world.width = width;
        }
        if let Some(start) = self.start {
            config.world.start_index = Some(start);
        }
        if let Some(seed) = self.seed {
            config.world.seed = Some(seed);
        }
        if let Some(speed) = self.speed {
            config.pace = PaceConfig::new(speed).ok_or(ConfigError::InvalidSpeed)?;
        }
        Ok(config)
    }

    fn script(&self) -> anyhow::Result<Script> {
        let src = match self.moves.as_deref() {
            Some("-") => io::read_to_string(io::stdin().lock())
                .context("failed to read moves from standard input")?,
            Some(moves) => moves.to_owned(),
            None => String::new(),
        };
        src.parse::<Script>().context("failed to parse moves")
    }

    fn play(&self) -> anyhow::Result<ReplayReport> {
        let config = self.config()?;
        let script = self.script()?;
        let period = self.realtime.then(|| config.tick_period());
        let width = config.world.width;
        let start = config.world.start_index();
        let report = if let Some(seed) = config.world.seed {
            let world = World::new_with_rng(width, start, StdRng::seed_from_u64(seed))?;
            replay(world, period, &script)
        } else {
            replay(World::new(width, start)?, period, &script)
        };
        Ok(report)
    }
}

fn replay<R: Rng>(
    world: World<R>,
    period: Option<Duration>,
    script: &Script,
) -> ReplayReport {
    let mut replay = Replay::new(world);
    if let Some(period) = period {
        replay = replay.paced(period);
    }
    replay.run(script)
}
