//! Eido-Replay: step through a recorded game of Go.
//!
//! ## Usage
//!
//! - `eido-replay replay game.json` - Replay the main line of a record
//! - `eido-replay replay game.json --path 1,0,4` - Show one node of a variation
//! - `eido-replay demo` - Replay a random record
//!
//! Set `RUST_LOG=debug` to log captures and navigation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use eido_replay::board::Color;
use eido_replay::constants::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use eido_replay::cursor::NodePath;
use eido_replay::gametree::GameRecord;
use eido_replay::playout::random_record;
use eido_replay::replay::Replay;

/// Eido-Replay: a replay engine for recorded games of Go
#[derive(Parser)]
#[command(name = "eido-replay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a game record stored as JSON
    Replay {
        /// Path to the record
        file: PathBuf,
        /// Board size, overriding the record's SZ property
        #[arg(long)]
        size: Option<usize>,
        /// Node to show, as comma separated indices (e.g. 1,0,4)
        #[arg(long)]
        path: Option<NodePath>,
    },
    /// Generate a random record and replay it
    Demo {
        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
        /// Moves along each line
        #[arg(long, default_value_t = 40)]
        moves: usize,
        /// Board size
        #[arg(long, default_value_t = 9)]
        size: usize,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Replay { file, size, path }) => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let record = GameRecord::from_json(&json)
                .with_context(|| format!("failed to load {}", file.display()))?;
            let mut replay = match size {
                Some(size) => Replay::with_size(record, size)?,
                None => Replay::new(record)?,
            };
            match path {
                Some(path) => replay.go_to(&path)?,
                None => while replay.forward(None)? {},
            }
            show(&replay);
        }
        Some(Commands::Demo { seed, moves, size }) => run_demo(seed, moves, size)?,
        None => run_demo(None, 40, 9)?,
    }
    Ok(())
}

fn run_demo(seed: Option<u64>, moves: usize, size: usize) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    anyhow::ensure!(
        (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size),
        "unsupported board size {size}"
    );
    println!("Eido-Replay: random game on {size}x{size}\n");

    let data = random_record(&mut rng, size, moves, 2);
    let mut replay = Replay::new(GameRecord::load(&data))?;

    println!("=== Main line ===");
    while replay.forward(None)? {}
    show(&replay);
    let end = replay.path();

    // the first fork hangs off the last node of the root trunk
    let fork = replay.record().tree(replay.record().root()).nodes().len() - 1;
    println!("=== Back to the first fork ===");
    while replay.depth() > fork && replay.back() {}
    show(&replay);

    println!("=== Second variation ===");
    replay.forward(Some(1))?;
    while replay.forward(None)? {}
    show(&replay);

    println!("=== Jump to {end} ===");
    replay.go_to(&end)?;
    show(&replay);
    Ok(())
}

fn show(replay: &Replay) {
    let captures = replay.board().captures();
    println!("{}", replay.board());
    println!(
        "path {}  depth {}  captures B:{} W:{}",
        replay.path(),
        replay.depth(),
        captures.get(Color::Black),
        captures.get(Color::White)
    );
    if let Some((color, coord)) = replay.node().and_then(|n| n.get_move()) {
        let coord = if coord.is_empty() { "pass" } else { coord };
        println!("last move: {color:?} {coord}");
    }
    if let Some(comment) = replay.node().and_then(|n| n.comment()) {
        println!("comment: {comment}");
    }
    println!();
}
