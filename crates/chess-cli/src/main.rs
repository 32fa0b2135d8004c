//! `chess` - drive the rules engine from the command line.
//!
//! Replays UCI moves, lists legal moves, prints game status and the JSON
//! state, and runs perft.

mod config;

use std::path::PathBuf;

use anyhow::Context;
use chess_core::Square;
use chess_engine::movegen::perft::{perft, perft_divide};
use chess_engine::{Game, GameEvent};
use clap::{Args, Parser, Subcommand};
use config::CliConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Chess rules engine driver")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value_os_t = CliConfig::default_path())]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Where the game starts.
#[derive(Args)]
struct Start {
    /// Start from a FEN position
    #[arg(long, conflicts_with = "state")]
    fen: Option<String>,

    /// Start from a JSON state file
    #[arg(long)]
    state: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play UCI moves and print the resulting position
    Play {
        #[command(flatten)]
        start: Start,
        /// Moves in UCI notation (e2e4, e7e8q)
        moves: Vec<String>,
        /// Print the JSON state instead of the board
        #[arg(long)]
        json: bool,
        /// Print JSON on a single line
        #[arg(long, requires = "json")]
        compact: bool,
    },
    /// List legal moves, for one square or the whole side to move
    Moves {
        #[command(flatten)]
        start: Start,
        /// Square to list moves for (e.g. e2)
        square: Option<String>,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        #[command(flatten)]
        start: Start,
        /// Search depth (overrides the config file)
        #[arg(short, long)]
        depth: Option<u32>,
        /// Show the count below each root move
        #[arg(long)]
        divide: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    init_tracing(&config.log_filter);

    match cli.command {
        Commands::Play {
            start,
            moves,
            json,
            compact,
        } => {
            let mut game = start.load()?;
            game.subscribe(|event| {
                if let GameEvent::GameOver { status } = event {
                    println!("Game over: {status}");
                }
            });
            for m in &moves {
                let played = game.make_move_uci(m).map(|_| ());
                played.with_context(|| format!("move {m} in {}", game.fen()))?;
            }

            if json {
                if config.pretty_json && !compact {
                    println!("{}", game.to_json_pretty());
                } else {
                    println!("{}", game.to_json());
                }
            } else {
                println!("{}", game.position().board);
                println!();
                println!("FEN:    {}", game.fen());
                println!("Status: {}", game.game_status());
            }
        }
        Commands::Moves { start, square } => {
            let game = start.load()?;
            let moves = match square {
                Some(s) => {
                    let sq = Square::from_algebraic(&s)
                        .with_context(|| format!("invalid square: {s}"))?;
                    game.legal_moves_from(sq)
                }
                None => game.legal_moves(),
            };
            let listed: Vec<String> = moves.iter().map(|m| m.to_uci()).collect();
            println!("{} moves: {}", listed.len(), listed.join(" "));
        }
        Commands::Perft {
            start,
            depth,
            divide,
        } => {
            let game = start.load()?;
            let depth = depth.unwrap_or(config.perft_depth);
            tracing::info!(depth, fen = %game.fen(), "running perft");
            if divide {
                let results = perft_divide(game.position(), depth);
                for (mv, nodes) in &results {
                    println!("{mv}: {nodes}");
                }
                let total: u64 = results.iter().map(|(_, n)| n).sum();
                println!();
                println!("Total: {total}");
            } else {
                println!("perft({depth}) = {}", perft(game.position(), depth));
            }
        }
    }

    Ok(())
}

impl Start {
    fn load(&self) -> anyhow::Result<Game> {
        if let Some(path) = &self.state {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let mut game = Game::new();
            game.from_json(&json)
                .with_context(|| format!("loading {}", path.display()))?;
            return Ok(game);
        }
        match &self.fen {
            Some(fen) => Game::from_fen(fen).with_context(|| format!("invalid FEN: {fen}")),
            None => Ok(Game::new()),
        }
    }
}

/// Logs go to stderr. `RUST_LOG` wins over the configured filter.
fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
