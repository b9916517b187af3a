//! Perft driver: count leaf nodes of the legal move tree, or run the
//! reference suite and report speed.

mod suite;

use anyhow::{bail, Context};
use board88_engine::{perft, perft_divide, Board};
use clap::{Parser, Subcommand};
use std::time::Instant;
use suite::SUITE;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "perft")]
#[command(about = "Move generator validation and benchmark")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count leaf nodes from one position
    Run {
        /// Position to search
        #[arg(long, default_value = board88_engine::FenRecord::STARTPOS)]
        fen: String,
        /// Depth in plies
        #[arg(short, long)]
        depth: u32,
        /// Print the count below each root move
        #[arg(long)]
        divide: bool,
    },
    /// Run the reference suite, checking every count
    Bench {
        /// Cap the depth of every suite position
        #[arg(long)]
        max_depth: Option<u32>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { fen, depth, divide } => run(&fen, depth, divide),
        Commands::Bench { max_depth } => bench(max_depth),
    }
}

fn run(fen: &str, depth: u32, divide: bool) -> anyhow::Result<()> {
    let board = Board::from_fen(fen).with_context(|| format!("bad FEN: {}", fen))?;
    tracing::debug!(%fen, depth, "perft");

    let start = Instant::now();
    let nodes = if divide {
        let split = perft_divide(&board, depth);
        for (mv, count) in &split {
            println!("{}: {}", mv, count);
        }
        println!();
        split.iter().map(|(_, count)| count).sum()
    } else {
        perft(&board, depth)
    };
    let seconds = start.elapsed().as_secs_f64();

    println!("Nodes: {}", nodes);
    println!("Time: {:.3}s ({:.0} nps)", seconds, nodes as f64 / seconds.max(1e-9));
    Ok(())
}

fn bench(max_depth: Option<u32>) -> anyhow::Result<()> {
    let mut rates = Vec::with_capacity(SUITE.len());

    println!(
        "{:<12} {:>5} {:>12} {:>9} {:>12}",
        "position", "depth", "nodes", "seconds", "nps"
    );
    for case in &SUITE {
        let depth = max_depth.map_or(case.max_depth(), |d| d.min(case.max_depth()));
        let Some(expected) = case.expected(depth) else {
            bail!("{}: no reference count at depth {}", case.name, depth);
        };
        let board = Board::from_fen(case.fen)
            .with_context(|| format!("{}: bad FEN", case.name))?;

        let start = Instant::now();
        let nodes = perft(&board, depth);
        let seconds = start.elapsed().as_secs_f64();
        let nps = nodes as f64 / seconds.max(1e-9);

        println!(
            "{:<12} {:>5} {:>12} {:>9.3} {:>12.0}",
            case.name, depth, nodes, seconds, nps
        );
        if nodes != expected {
            bail!(
                "{} depth {}: expected {} nodes, got {}",
                case.name,
                depth,
                expected,
                nodes
            );
        }
        rates.push(nps);
    }

    let average = rates.iter().sum::<f64>() / rates.len() as f64;
    println!("average nps: {:.0}", average);
    Ok(())
}
