use anyhow::{anyhow, Context};
use config::{Config, File};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::{
    path::{Path, PathBuf},
    process,
    str::FromStr,
};
use structopt::StructOpt;
use strum::{Display, EnumString};
use triplanetary::{timed, Command, GameConfig, Hex, Point, World};

/// CLI for playing out a game of Triplanetary, one turn at a time.
#[derive(Debug, StructOpt)]
#[structopt(name = "triplanetary")]
struct Opt {
    /// Path to a config file that defines the board and starting state.
    /// Supported formats: JSON, TOML. If omitted, the default config is used
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Print the full config (after defaults are filled in) as TOML
    #[structopt(long)]
    print_config: bool,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,

    /// Commands to run, one per turn. Supported commands:
    ///
    /// coast - Keep the current course
    ///
    /// thrust:q,r - Burn towards the tile (q, r)
    ///
    /// torpedo:q,r - Fire a torpedo towards the tile (q, r)
    ///
    /// click:x,y - Burn towards whichever tile contains the pixel (x, y)
    commands: Vec<TurnCommand>,
}

/// The keyword at the start of a turn command
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum CommandKind {
    // If you change this, make sure to update the help text for `commands`!
    Coast,
    Thrust,
    Torpedo,
    Click,
}

/// A [Command] parsed from the command line
#[derive(Copy, Clone, Debug, PartialEq)]
struct TurnCommand(Command);

impl FromStr for TurnCommand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, arg) = match s.split_once(':') {
            Some((kind, arg)) => (kind, Some(arg)),
            None => (s, None),
        };
        let kind: CommandKind = kind
            .trim()
            .parse()
            .map_err(|_| anyhow!("unknown command {:?}", kind))?;
        let required_arg = || {
            arg.ok_or_else(|| anyhow!("command {} requires an argument", kind))
        };

        let command = match kind {
            CommandKind::Coast => {
                if arg.is_some() {
                    return Err(anyhow!("coast doesn't take an argument"));
                }
                Command::Coast
            }
            CommandKind::Thrust => {
                Command::Thrust(parse_hex(required_arg()?)?)
            }
            CommandKind::Torpedo => {
                Command::FireTorpedo(parse_hex(required_arg()?)?)
            }
            CommandKind::Click => {
                Command::Click(parse_point(required_arg()?)?)
            }
        };
        Ok(Self(command))
    }
}

fn parse_hex(s: &str) -> anyhow::Result<Hex> {
    s.parse().with_context(|| format!("invalid tile {:?}", s))
}

fn parse_point(s: &str) -> anyhow::Result<Point> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| anyhow!("invalid pixel {:?}, expected x,y", s))?;
    let parse = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .with_context(|| format!("invalid pixel {:?}", s))
    };
    Ok(Point::new(parse(x)?, parse(y)?))
}

fn load_config(config_path: &Path) -> anyhow::Result<GameConfig> {
    // Load config
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Log where everything is after a turn
fn log_turn(world: &World, turn: usize) {
    let player = world.player();
    info!(
        "Turn {}: ship at {} with velocity {}{}",
        turn,
        player.position(),
        player.velocity(),
        if player.is_derelict() { " (derelict)" } else { "" }
    );
    for &id in world.torpedoes() {
        if let Some(torpedo) = world.mob(id) {
            info!(
                "Turn {}: torpedo {} at {} with velocity {}",
                turn,
                id,
                torpedo.position(),
                torpedo.velocity()
            );
        }
    }
}

/// Print a table of every mob's final state
fn print_summary(world: &World) {
    println!(
        "{:>4}  {:<8}  {:<14}  {:<14}  {}",
        "id", "kind", "position", "velocity", "status"
    );
    for (&id, mob) in &world.snapshot().mobs {
        let kind = if id == world.player_id() {
            "ship"
        } else {
            "torpedo"
        };
        let status = if mob.is_derelict() {
            "derelict"
        } else {
            "active"
        };
        println!(
            "{:>4}  {:<8}  {:<14}  {:<14}  {}",
            id,
            kind,
            mob.position().to_string(),
            mob.velocity().to_string(),
            status
        );
    }
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let config = match &opt.config {
        Some(config_path) => load_config(config_path)?,
        None => GameConfig::default(),
    };
    if opt.print_config {
        let toml = toml::to_string_pretty(&config)
            .context("error serializing config")?;
        println!("{}", toml);
    }

    let mut world = World::new(config)?;
    timed!("Playing all turns", log::Level::Info, {
        for (i, TurnCommand(command)) in opt.commands.into_iter().enumerate() {
            let turn = i + 1;
            world.apply(command).with_context(|| {
                format!("turn {} ({}) is illegal", turn, command)
            })?;
            log_turn(&world, turn);
        }
    });

    print_summary(&world);
    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
