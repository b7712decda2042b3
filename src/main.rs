use std::{
    collections::BTreeMap,
    io::{self, Write},
    mem,
    path::PathBuf,
    ptr,
    sync::atomic::{AtomicBool, Ordering},
};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use lib_2048::{
    ai::{expectimax::ExpectimaxAi, greedy::GreedyAi},
    config::{SearchConfig, Weights},
    game::{self, GameSummary},
};
use log::{info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

mod render;

static INTERRUPT_RECIEVED: AtomicBool = AtomicBool::new(false);

fn set_interrupt_handler() -> io::Result<()> {
    extern "C" fn handle_interrupt(_: libc::c_int) {
        INTERRUPT_RECIEVED.store(true, Ordering::Relaxed);
    }

    let handler: extern "C" fn(libc::c_int) = handle_interrupt;

    let result = unsafe {
        let mut action: libc::sigaction = mem::zeroed();

        action.sa_sigaction = handler as libc::sighandler_t;
        action.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&mut action.sa_mask);

        libc::sigaction(libc::SIGINT, &action, ptr::null_mut())
    };

    if result == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum AiKind {
    Expectimax,
    Greedy,
}

/// Plays games of 2048 headlessly and reports the results.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(long, value_enum, default_value_t = AiKind::Expectimax)]
    ai: AiKind,

    /// Search depth of the expectimax AI.
    #[arg(short, long, default_value_t = SearchConfig::default().depth)]
    depth: u32,

    /// Most empty cells expanded at a chance node.
    #[arg(long, default_value_t = SearchConfig::default().sample_cap)]
    sample_cap: usize,

    #[arg(short, long, default_value_t = 1)]
    games: u32,

    /// Seed for game `i` is `seed + i`. Seeds from entropy when absent.
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file with heuristic weights.
    #[arg(short, long)]
    weights: Option<PathBuf>,

    #[arg(long)]
    max_moves: Option<u32>,
}

fn new_rng(seed: Option<u64>, game_index: u32) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(u64::from(game_index))),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn play(args: &Args, config: SearchConfig, game_index: u32) -> GameSummary {
    let mut rng = new_rng(args.seed, game_index);
    let should_stop = || INTERRUPT_RECIEVED.load(Ordering::Relaxed);

    match args.ai {
        AiKind::Expectimax => {
            // Separate stream so that search sampling doesn't shift tile spawns.
            let search_rng = new_rng(args.seed.map(|seed| !seed), game_index);
            let mut ai = ExpectimaxAi::new(config, search_rng);

            game::play_game(&mut ai, &mut rng, args.max_moves, should_stop)
        }
        AiKind::Greedy => {
            let mut ai = GreedyAi::new(config.weights);

            game::play_game(&mut ai, &mut rng, args.max_moves, should_stop)
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let weights = match &args.weights {
        Some(path) => Weights::load(path)
            .with_context(|| format!("Failed to load weights from {}", path.display()))?,
        None => Weights::default(),
    };

    let config = SearchConfig {
        depth: args.depth,
        sample_cap: args.sample_cap,
        weights,
    };

    set_interrupt_handler().context("Failed to install SIGINT handler")?;

    info!("playing {} game(s) with {:?} AI, {config:?}", args.games, args.ai);

    let mut summaries = Vec::new();

    for game_index in 0..args.games {
        if INTERRUPT_RECIEVED.load(Ordering::Relaxed) {
            break;
        }

        let summary = play(&args, config, game_index);

        info!(
            "game {}: score {}, max tile {}, {} moves",
            game_index + 1,
            summary.score,
            summary.max_tile,
            summary.moves
        );

        summaries.push(summary);
    }

    if INTERRUPT_RECIEVED.load(Ordering::Relaxed) {
        warn!("interrupted after {} game(s)", summaries.len());
    }

    let mut stdout = io::stdout().lock();

    let Some(best) = summaries.iter().max_by_key(|summary| summary.score) else {
        writeln!(stdout, "No games played")?;
        return Ok(());
    };

    render::draw_board(&mut stdout, best.board, best.score)?;

    let total_score: u64 = summaries.iter().map(|summary| summary.score).sum();
    let mut max_tiles = BTreeMap::new();

    for summary in &summaries {
        *max_tiles.entry(summary.max_tile).or_insert(0u32) += 1;
    }

    writeln!(stdout, "Games: {}", summaries.len())?;
    writeln!(
        stdout,
        "Average score: {:.1}",
        total_score as f64 / summaries.len() as f64
    )?;
    writeln!(stdout, "Best score: {}", best.score)?;

    for (max_tile, count) in max_tiles.iter().rev() {
        writeln!(stdout, "Max tile {max_tile}: {count}")?;
    }

    Ok(())
}
