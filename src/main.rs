//! Terminal host for the shell game.
//!
//! Drives a [`GameSession`] in real time: sleeps until each continuation
//! is due, prints events as text, and reads picks from stdin.
//!
//! ```text
//! cup-shuffle [--config game.json] [--seed N] [--winners winners.json]
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cup_shuffle::{
    Cue, EventSink, GameConfig, GameEvent, GameSession, JsonFileWinnerStore, SessionStatus, SlotId,
    WinnerStore,
};

#[derive(Parser)]
#[command(name = "cup-shuffle")]
#[command(about = "Find the ball under the cup")]
struct Args {
    /// JSON game configuration (levels, pacing, seed)
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed, overriding the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Winner list file
    #[arg(long, default_value = "winners.json")]
    winners: PathBuf,
}

/// Prints events as one line each.
struct TextSink;

impl EventSink for TextSink {
    fn emit(&mut self, event: GameEvent) {
        let line = match event {
            GameEvent::RoundStarted { stage, stage_count, cup_count } => {
                format!("\n=== Round {stage}/{stage_count}: {cup_count} cups ===")
            }
            GameEvent::BallShown { slot } => format!("The ball is under cup {}.", slot.index() + 1),
            GameEvent::BallHidden => "The ball is hidden.".to_string(),
            GameEvent::Swapped { a, b, .. } if a == b => return,
            GameEvent::Swapped { a, b, .. } => format!("  swap {} <-> {}", a.index() + 1, b.index() + 1),
            GameEvent::SelectionUnlocked => "Pick a cup.".to_string(),
            GameEvent::Cue(Cue::Success) => "Correct!".to_string(),
            GameEvent::Cue(Cue::Fail) => "Wrong cup.".to_string(),
            GameEvent::Won { player } => format!("\nJackpot! {player} cleared every round."),
            GameEvent::Lost => "\nBetter luck next time.".to_string(),
            GameEvent::MenuShown => "Back at the menu.".to_string(),
            GameEvent::CupsLifted { .. }
            | GameEvent::SelectionLocked
            | GameEvent::Cue(Cue::ShuffleStep)
            | GameEvent::HudHidden => return,
        };
        println!("{line}");
    }
}

fn prompt(stdin: &mut impl BufRead, text: &str) -> io::Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    if stdin.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn load_config(args: &Args) -> Result<GameConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let store = JsonFileWinnerStore::new(&args.winners);

    let board = store.load();
    if board.is_empty() {
        println!("No winners yet.");
    } else {
        println!("Recent winners:");
        for record in board.records() {
            match record.formatted_time() {
                Some(at) => println!("  {at}  {}", record.name),
                None => println!("  {}", record.name),
            }
        }
    }

    let mut stdin = io::stdin().lock();
    let Some(name) = prompt(&mut stdin, "Your name: ")? else {
        return Ok(());
    };

    let mut session = GameSession::new(config, TextSink, store);
    session.start(&name);

    while session.status() == SessionStatus::Playing {
        if session.accepts_choice() {
            let cups = session.round().map_or(0, |r| r.level().cup_count);
            let Some(input) = prompt(&mut stdin, &format!("Cup (1-{cups}, q to quit): "))? else {
                break;
            };
            let input = input.trim();
            if input.eq_ignore_ascii_case("q") {
                session.reset_to_menu();
                continue;
            }
            match input.parse::<u8>() {
                Ok(n) if (1..=cups).contains(&n) => {
                    session.choose(SlotId::new(n - 1));
                }
                _ => println!("Enter a number from 1 to {cups}."),
            }
            continue;
        }

        let Some(due) = session.next_due() else {
            break;
        };
        let wait = due.saturating_sub(session.now_ms());
        thread::sleep(Duration::from_millis(wait));
        session.advance();
    }

    // Let a pending menu return play out.
    while let Some(due) = session.next_due() {
        thread::sleep(Duration::from_millis(due.saturating_sub(session.now_ms())));
        session.advance();
    }

    Ok(())
}
