use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tile_search::{solve_puzzle, solve_with_config, Board, Heuristic, SearchConfig};

#[derive(Parser)]
#[command(name = "tile-search")]
#[command(version)]
#[command(about = "Best-first solver for N×N sliding-tile puzzles")]
struct Cli {
    /// Enable debug logging and print the solution path
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a board given as rows separated by ';' and cells by ','
    Solve {
        /// e.g. "1,0,2;3,4,5;6,7,8"
        #[arg(long)]
        board: String,

        /// misplaced or manhattan
        #[arg(long, default_value = "manhattan")]
        heuristic: Heuristic,

        /// Stop after this many expansions
        #[arg(long)]
        max_expansions: Option<u64>,
    },
    /// Print a solvable board reached by random slides from the goal
    Scramble {
        #[arg(long, default_value = "3")]
        size: usize,

        #[arg(long, default_value = "20")]
        moves: usize,

        /// Seed for a reproducible scramble
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn parse_board(text: &str) -> Result<Vec<Vec<u32>>> {
    text.split(';')
        .enumerate()
        .map(|(row, cells)| {
            cells
                .split(',')
                .map(|cell| {
                    cell.trim()
                        .parse::<u32>()
                        .with_context(|| format!("row {row}: '{}' is not a tile number", cell.trim()))
                })
                .collect()
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Solve {
            board,
            heuristic,
            max_expansions,
        } => {
            let rows = parse_board(&board).context("could not parse --board")?;
            let size = rows.len();

            let report = match max_expansions {
                None => solve_puzzle(size, &rows, heuristic, cli.verbose),
                Some(limit) => {
                    let start = Board::from_rows(size, &rows).context("invalid start board")?;
                    let config = SearchConfig::new(heuristic)
                        .with_verbose(cli.verbose)
                        .with_max_expansions(limit);
                    solve_with_config(start, &config)
                }
            };

            let (steps, max_frontier, code) = report.as_tuple();
            println!("steps: {steps}, max frontier: {max_frontier}, status: {code}");
            if code != 0 {
                bail!("search ended with {:?}", report.status);
            }
        }

        Commands::Scramble { size, moves, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let board = Board::scramble(size, moves, &mut rng)?;
            info!(size, moves, "scrambled board");
            print!("{board}");
            let rows: Vec<String> = board
                .rows()
                .map(|row| row.iter().map(u32::to_string).collect::<Vec<_>>().join(","))
                .collect();
            println!("--board \"{}\"", rows.join(";"));
        }
    }

    Ok(())
}
