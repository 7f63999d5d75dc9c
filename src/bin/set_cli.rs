//! Terminal host for the Set engine.
//!
//! Reads one intent per line from stdin (`deal`, `select 17`, `hint`,
//! `shuffle`, `new`) and prints the table after each one. `show` reprints
//! the table and `quit` exits.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use set_engine::{
    CardStatus, Intent, IntentOutcome, SelectOutcome, SetConfig, SetGame, ShuffleOutcome,
};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "set-cli")]
#[command(about = "Play solitaire Set in the terminal")]
struct Cli {
    /// Seed for shuffling (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with a game configuration
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Reads `RUST_LOG`, defaulting to `warn`. Logs go to stderr so they never
/// mix with the table.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).compact())
        .init();
}

fn load_config(cli: &Cli) -> Result<SetConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            toml::from_str::<SetConfig>(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => SetConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn marker(status: CardStatus) -> &'static str {
    match status {
        CardStatus::Selected => "*",
        CardStatus::Matched => "+",
        CardStatus::Mismatched => "x",
        _ => " ",
    }
}

fn print_table(game: &SetGame, out: &mut impl Write) -> io::Result<()> {
    for (i, card) in game.visible_cards().iter().enumerate() {
        write!(
            out,
            "{}{:>4} {}  ",
            marker(card.status()),
            card.id().raw(),
            card.features()
        )?;
        if i % 3 == 2 {
            writeln!(out)?;
        }
    }
    if game.dealt_count() % 3 != 0 {
        writeln!(out)?;
    }
    writeln!(
        out,
        "score {}  deck {}  removed {}{}",
        game.score(),
        game.deck_count(),
        game.removed_count(),
        if game.is_finished() { "  (finished)" } else { "" }
    )
}

fn describe(outcome: IntentOutcome) -> String {
    match outcome {
        IntentOutcome::NewGame => "new game".to_string(),
        IntentOutcome::Dealt(0) => "the deck is empty".to_string(),
        IntentOutcome::Dealt(n) => format!("dealt {n}"),
        IntentOutcome::Selected(SelectOutcome::Ignored) => {
            "that card is not on the table".to_string()
        }
        IntentOutcome::Selected(SelectOutcome::Matched(_)) => "Set!".to_string(),
        IntentOutcome::Selected(SelectOutcome::Mismatched(_)) => "not a Set".to_string(),
        IntentOutcome::Selected(other) => format!("{other:?}").to_lowercase(),
        IntentOutcome::Shuffled(ShuffleOutcome { dealt, penalized }) => {
            if penalized {
                format!("shuffled and dealt {dealt} (your selection could have made a Set)")
            } else {
                format!("shuffled and dealt {dealt}")
            }
        }
        IntentOutcome::Hinted(Some(id)) => format!("hint: {id}"),
        IntentOutcome::Hinted(None) => "no Set to complete".to_string(),
    }
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let mut game = SetGame::new(config).context("invalid configuration")?;
    info!(seed = game.config().seed, "starting game");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    game.deal();
    print_table(&game, &mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        match line.trim() {
            "" => continue,
            "quit" | "q" | "exit" => break,
            "show" => {}
            command => match command.parse::<Intent>() {
                Ok(intent) => {
                    let outcome = game.apply(intent);
                    writeln!(out, "{}", describe(outcome))?;
                    if intent == Intent::NewGame {
                        game.deal();
                    }
                }
                Err(err) => {
                    writeln!(out, "{err}")?;
                    continue;
                }
            },
        }
        print_table(&game, &mut out)?;
        out.flush()?;
    }

    info!(score = game.score(), intents = game.history().len(), "game over");
    Ok(())
}
