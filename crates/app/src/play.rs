use std::fmt;
use std::time::Duration;

use services::{GameService, GameSnapshot, RoundTimer, answer_message};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use wordplay_core::model::TickOutcome;

/// One line typed at the game prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    /// Drag the word at one position to another.
    Move { from: usize, to: usize },
    /// Replace the whole arrangement with word indices as listed by `words`.
    Order(Vec<usize>),
    Check,
    Show,
    Again,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    BadNumber(String),
    MissingArgs(&'static str),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "type a command, or `help`"),
            CommandError::Unknown(cmd) => write!(f, "unknown command: {cmd}"),
            CommandError::BadNumber(raw) => write!(f, "not a position: {raw}"),
            CommandError::MissingArgs(usage) => write!(f, "usage: {usage}"),
        }
    }
}

fn parse_positions<'a>(
    parts: impl Iterator<Item = &'a str>,
) -> Result<Vec<usize>, CommandError> {
    parts
        .map(|raw| {
            raw.parse::<usize>()
                .map_err(|_| CommandError::BadNumber(raw.to_string()))
        })
        .collect()
}

impl PlayCommand {
    /// Positions are 1-based at the prompt and 0-based once parsed.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` for blank, unknown or malformed input.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err(CommandError::Empty);
        };
        match head.to_ascii_lowercase().as_str() {
            "move" | "m" => {
                let positions = parse_positions(parts)?;
                let [from, to] = positions[..] else {
                    return Err(CommandError::MissingArgs("move <from> <to>"));
                };
                Ok(Self::Move {
                    from: one_based(from)?,
                    to: one_based(to)?,
                })
            }
            "order" | "o" => {
                let positions = parse_positions(parts)?;
                if positions.is_empty() {
                    return Err(CommandError::MissingArgs("order <word#> <word#> ..."));
                }
                let order = positions
                    .into_iter()
                    .map(one_based)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Order(order))
            }
            "check" | "c" => Ok(Self::Check),
            "show" | "s" => Ok(Self::Show),
            "again" | "restart" => Ok(Self::Again),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn one_based(position: usize) -> Result<usize, CommandError> {
    position
        .checked_sub(1)
        .ok_or_else(|| CommandError::BadNumber(position.to_string()))
}

fn print_help() {
    println!("Commands:");
    println!("  move <from> <to>   drag a word from one slot to another (1-based)");
    println!("  order <n> <n> ...  place words by their number in `show`");
    println!("  check              submit the current arrangement");
    println!("  show               print the board");
    println!("  again              start a new game after time runs out");
    println!("  quit               leave");
}

fn render(snapshot: &GameSnapshot) {
    if let Some(summary) = snapshot.game_over {
        println!("{}", summary.message());
        println!("Sentences Completed: {}", summary.completed);
        println!("Type `again` to play again or `quit` to leave.");
        return;
    }
    println!(
        "[{}s] score {}  |  Arrange the words in the correct order",
        snapshot.remaining_secs, snapshot.score
    );
    let slots: Vec<String> = snapshot
        .words
        .iter()
        .enumerate()
        .map(|(slot, word)| format!("{}:{word}", slot + 1))
        .collect();
    println!("  {}", slots.join("  "));
}

fn announce_tick(outcome: TickOutcome, snapshot: &GameSnapshot) {
    match outcome {
        TickOutcome::Running { remaining } if remaining % 15 == 0 || remaining <= 5 => {
            println!("{remaining}s left");
        }
        TickOutcome::Running { remaining } => debug!(remaining, "tick"),
        TickOutcome::GameOver { .. } => render(snapshot),
        TickOutcome::Idle => {}
    }
}

/// Apply one parsed command. Returns `false` when the player wants to leave.
fn apply(game: &mut GameService, timer: &mut RoundTimer, command: PlayCommand) -> bool {
    match command {
        PlayCommand::Move { from, to } => match game.move_word(from, to) {
            Ok(()) => render(&game.snapshot()),
            Err(err) => println!("{err}"),
        },
        PlayCommand::Order(order) => {
            // `show` numbers words by board slot; map slots back to word indices.
            let Some(round) = game.session().round() else {
                println!("no round in progress");
                return true;
            };
            let current = round.current_order().to_vec();
            let mapped: Option<Vec<usize>> =
                order.iter().map(|slot| current.get(*slot).copied()).collect();
            let Some(mapped) = mapped else {
                println!("positions must be between 1 and {}", current.len());
                return true;
            };
            match game.submit_order(mapped) {
                Ok(()) => render(&game.snapshot()),
                Err(err) => println!("{err}"),
            }
        }
        PlayCommand::Check => {
            let outcome = game.check_answer();
            if let Some(message) = answer_message(outcome) {
                println!("{message}");
            }
            render(&game.snapshot());
        }
        PlayCommand::Show => render(&game.snapshot()),
        PlayCommand::Again => {
            if game.session().is_playing() {
                println!("a game is already running");
            } else {
                render(&game.start());
                timer.reset();
            }
        }
        PlayCommand::Help => print_help(),
        PlayCommand::Quit => {
            game.end();
            return false;
        }
    }
    true
}

/// Run an interactive game on stdin/stdout.
///
/// Timer ticks and typed commands are handled on this one task, so they
/// never interleave inside a single state transition.
///
/// # Errors
///
/// Returns an I/O error if stdin cannot be read.
pub async fn run(mut game: GameService, tick_period: Duration) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut timer = RoundTimer::new(tick_period);

    print_help();
    render(&game.start());

    loop {
        tokio::select! {
            () = timer.next(), if game.session().is_playing() => {
                let outcome = game.tick();
                announce_tick(outcome, &game.snapshot());
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    game.end();
                    break;
                };
                match PlayCommand::parse(&line) {
                    Ok(command) => {
                        if !apply(&mut game, &mut timer, command) {
                            break;
                        }
                    }
                    Err(CommandError::Empty) => {}
                    Err(err) => println!("{err}"),
                }
            }
        }
    }

    let snapshot = game.snapshot();
    println!(
        "Final score {} with {} sentences completed.",
        snapshot.score, snapshot.completed
    );
    Ok(())
}
