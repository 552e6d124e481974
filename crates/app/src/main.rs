use std::fmt;
use std::time::Duration;

use services::{AppServices, Clock, PartyPoller};
use storage::Storage;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wordplay_core::model::{PartyId, PlayerId};

mod config;
mod lobby;
mod play;

use config::AppConfig;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidNumber { flag: &'static str, raw: String },
    MissingId { command: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::MissingId { command } => write!(f, "{command} requires an id"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_number<T: std::str::FromStr>(flag: &'static str, raw: String) -> Result<T, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  wordplay [play]                  timed sentence game (default)");
    eprintln!("  wordplay home                    lobby headline numbers");
    eprintln!("  wordplay players [--search <s>]  browse players");
    eprintln!("  wordplay challenge <player-id>   challenge a player, then play");
    eprintln!("  wordplay parties [--watch]       list parties, optionally polling");
    eprintln!("  wordplay join <party-id>         join a party, then play");
    eprintln!("  wordplay solo                    open a solo party, then play");
    eprintln!("  wordplay leaderboard             top players");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --seed <n>  --round-secs <n>  --latency-ms <n>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  WORDPLAY_ROUND_SECS, WORDPLAY_LATENCY_MS, WORDPLAY_SEED, WORDPLAY_POLL_SECS, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Play,
    Home,
    Players { search: Option<String> },
    Challenge(PlayerId),
    Parties { watch: bool },
    Join(PartyId),
    Solo,
    Leaderboard,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Overrides {
    seed: Option<u64>,
    round_secs: Option<u32>,
    latency_ms: Option<u64>,
}

impl Overrides {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(secs) = self.round_secs {
            config.round_secs = secs;
        }
        if let Some(ms) = self.latency_ms {
            config.latency = Some(Duration::from_millis(ms));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    command: Command,
    overrides: Overrides,
}

/// Returns `Ok(None)` when help was requested.
fn parse_args(argv: impl IntoIterator<Item = String>) -> Result<Option<Args>, ArgsError> {
    let mut args = argv.into_iter();
    let mut command: Option<Command> = None;
    let mut overrides = Overrides::default();
    let mut search = None;
    let mut watch = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(None),
            "--seed" => {
                let raw = require_value(&mut args, "--seed")?;
                overrides.seed = Some(parse_number("--seed", raw)?);
            }
            "--round-secs" => {
                let raw = require_value(&mut args, "--round-secs")?;
                overrides.round_secs = Some(parse_number("--round-secs", raw)?);
            }
            "--latency-ms" => {
                let raw = require_value(&mut args, "--latency-ms")?;
                overrides.latency_ms = Some(parse_number("--latency-ms", raw)?);
            }
            "--search" => search = Some(require_value(&mut args, "--search")?),
            "--watch" => watch = true,
            flag if flag.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
            word if command.is_none() => {
                command = Some(match word {
                    "play" => Command::Play,
                    "home" => Command::Home,
                    "players" => Command::Players { search: None },
                    "challenge" => {
                        let raw = args.next().ok_or(ArgsError::MissingId {
                            command: "challenge",
                        })?;
                        Command::Challenge(parse_number("player id", raw)?)
                    }
                    "parties" => Command::Parties { watch: false },
                    "join" => {
                        let raw = args
                            .next()
                            .ok_or(ArgsError::MissingId { command: "join" })?;
                        Command::Join(parse_number("party id", raw)?)
                    }
                    "solo" => Command::Solo,
                    "leaderboard" => Command::Leaderboard,
                    _ => return Err(ArgsError::UnknownCommand(arg)),
                });
            }
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    let command = match command.unwrap_or(Command::Play) {
        Command::Players { .. } => Command::Players { search },
        Command::Parties { .. } => Command::Parties { watch },
        other => {
            if search.is_some() {
                return Err(ArgsError::UnknownArg("--search".into()));
            }
            if watch {
                return Err(ArgsError::UnknownArg("--watch".into()));
            }
            other
        }
    };

    Ok(Some(Args { command, overrides }))
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = match parse_args(std::env::args().skip(1)) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            return Err(err.into());
        }
    };

    let mut config = AppConfig::from_env()?;
    parsed.overrides.apply(&mut config);
    let rules = config.rules()?;

    let clock = Clock::system();
    let storage = Storage::mock(clock.now(), config.latency());
    let app = AppServices::new(storage, clock)
        .with_rules(rules)
        .with_seed(config.seed);
    info!(command = ?parsed.command, round_secs = rules.round_seconds(), "starting");

    let tick = Duration::from_secs(1);
    match parsed.command {
        Command::Play => play::run(app.game(), tick).await?,
        Command::Home => lobby::print_home(app.home_stats().await?),
        Command::Players { search } => {
            let mut directory = app.player_directory();
            directory.fetch().await?;
            lobby::print_players(&directory, search.as_deref());
        }
        Command::Challenge(player_id) => {
            let mut directory = app.player_directory();
            let mut board = app.party_board();
            directory.fetch().await?;
            board.fetch().await?;
            let party = board.challenge(&mut directory, player_id).await?;
            if let Some(opponent) = party.players.get(1) {
                println!("Challenge sent to {opponent}!");
            }
            play::run(app.game(), tick).await?;
        }
        Command::Parties { watch } => {
            let mut board = app.party_board();
            board.fetch().await?;
            if watch {
                lobby::watch_parties(&mut board, PartyPoller::new(config.poll_period)).await;
            } else {
                lobby::print_parties(&board);
            }
        }
        Command::Join(party_id) => {
            let mut board = app.party_board();
            board.fetch().await?;
            let party = board.join(party_id)?;
            println!("Joined {}", party.name);
            play::run(app.game(), tick).await?;
        }
        Command::Solo => {
            let mut board = app.party_board();
            board.start_solo().await?;
            println!("Solo party created!");
            play::run(app.game(), tick).await?;
        }
        Command::Leaderboard => {
            let mut view = app.leaderboard();
            view.fetch().await?;
            lobby::print_leaderboard(&view);
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // Binary glue: report once and exit.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Option<Args>, ArgsError> {
        parse_args(line.split_whitespace().map(str::to_string))
    }

    #[test]
    fn no_arguments_means_play() {
        let args = parse("").unwrap().unwrap();
        assert_eq!(args.command, Command::Play);
        assert_eq!(args.overrides, Overrides::default());
    }

    #[test]
    fn flags_may_precede_the_command() {
        let args = parse("--seed 7 challenge 3 --round-secs 30").unwrap().unwrap();
        assert_eq!(args.command, Command::Challenge(PlayerId::new(3)));
        assert_eq!(args.overrides.seed, Some(7));
        assert_eq!(args.overrides.round_secs, Some(30));
    }

    #[test]
    fn subcommand_flags_attach_to_their_command() {
        let args = parse("players --search storm").unwrap().unwrap();
        assert_eq!(
            args.command,
            Command::Players {
                search: Some("storm".into())
            }
        );
        let args = parse("parties --watch").unwrap().unwrap();
        assert_eq!(args.command, Command::Parties { watch: true });
        assert!(matches!(parse("solo --watch"), Err(ArgsError::UnknownArg(_))));
    }

    #[test]
    fn help_short_circuits() {
        assert!(parse("join 2 --help").unwrap().is_none());
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(matches!(
            parse("join"),
            Err(ArgsError::MissingId { command: "join" })
        ));
        assert!(matches!(
            parse("join two"),
            Err(ArgsError::InvalidNumber { .. })
        ));
        assert!(matches!(parse("dance"), Err(ArgsError::UnknownCommand(_))));
        assert!(matches!(
            parse("--seed"),
            Err(ArgsError::MissingValue { flag: "--seed" })
        ));
        assert!(matches!(parse("play extra"), Err(ArgsError::UnknownArg(_))));
    }

    #[test]
    fn overrides_win_over_config() {
        let mut config = AppConfig::default();
        Overrides {
            seed: Some(1),
            round_secs: Some(10),
            latency_ms: Some(0),
        }
        .apply(&mut config);
        assert_eq!(config.seed, Some(1));
        assert_eq!(config.round_secs, 10);
        assert_eq!(config.latency, Some(Duration::ZERO));
    }
}
