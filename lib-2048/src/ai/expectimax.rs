use log::debug;
use rand::{seq::SliceRandom, Rng};
use rustc_hash::FxHashMap;

use crate::{
    config::{SearchConfig, Weights},
    direction::Direction,
    heuristic, logic,
};

use super::Ai;

/// Cached node values keyed by board only. A value stored by a shallow search is reused by a
/// deeper one, and player and chance nodes share entries.
pub type TranspositionTable = FxHashMap<u64, f64>;

/// Exponent of the spawned tile and its probability.
const SPAWN_OUTCOMES: [(u64, f64); 2] = [(1, 0.9), (2, 0.1)];
/// Weight of the points gained by a move, added on top of the value of the resulting position.
const MERGE_BONUS: f64 = 0.1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cache_hits: u64,
}

/// One expectimax search over a caller-owned transposition table and random source.
pub struct Searcher<'a, R> {
    config: &'a SearchConfig,
    transposition_table: &'a mut TranspositionTable,
    rng: &'a mut R,
    stats: SearchStats,
}

impl<'a, R: Rng> Searcher<'a, R> {
    pub fn new(
        config: &'a SearchConfig,
        transposition_table: &'a mut TranspositionTable,
        rng: &'a mut R,
    ) -> Self {
        Self {
            config,
            transposition_table,
            rng,
            stats: SearchStats::default(),
        }
    }

    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Best move from `board`, or `None` if no move changes the board.
    pub fn choose_move(&mut self, board: u64, depth: u32) -> Option<Direction> {
        let scored_moves = super::get_all_moves(board).map(|(direction, new_board, gained)| {
            let score = self.chance_node(new_board, depth) + MERGE_BONUS * f64::from(gained);

            (score, direction)
        });

        super::max_by_score(scored_moves).map(|(_, direction)| direction)
    }

    fn static_value(&self, board: u64) -> f64 {
        heuristic::evaluate_board(board, &self.config.weights)
    }

    fn cached(&mut self, board: u64) -> Option<f64> {
        self.stats.nodes += 1;

        let score = self.transposition_table.get(&board).copied();

        if score.is_some() {
            self.stats.cache_hits += 1;
        }

        score
    }

    /// Value of `board` with the player to move.
    pub fn max_node(&mut self, board: u64, depth: u32) -> f64 {
        if let Some(score) = self.cached(board) {
            return score;
        }

        let score = if depth == 0 || logic::is_terminal(board) {
            self.static_value(board)
        } else {
            let best = super::get_all_moves(board)
                .map(|(_, new_board, gained)| {
                    self.chance_node(new_board, depth) + MERGE_BONUS * f64::from(gained)
                })
                .reduce(f64::max);

            match best {
                Some(score) => score,
                None => self.static_value(board),
            }
        };

        self.transposition_table.insert(board, score);

        score
    }

    /// Expected value of `board` over the tile the game spawns next.
    ///
    /// When more than `sample_cap` cells are empty, that many are drawn uniformly without
    /// replacement and averaged with equal weight.
    pub fn chance_node(&mut self, board: u64, depth: u32) -> f64 {
        if let Some(score) = self.cached(board) {
            return score;
        }

        let empty_count = logic::empty_count(board) as usize;

        let score = if empty_count == 0 {
            self.static_value(board)
        } else {
            let mut positions = [0; 16];

            for (slot, position) in positions.iter_mut().zip(logic::empty_positions(board)) {
                *slot = position;
            }

            let positions = &mut positions[..empty_count];
            let sample_cap = self.config.sample_cap.max(1);

            let sampled: &[usize] = if empty_count > sample_cap {
                positions.partial_shuffle(&mut *self.rng, sample_cap).0
            } else {
                positions
            };

            let total = sampled.iter().fold(0.0, |total, &position| {
                SPAWN_OUTCOMES
                    .iter()
                    .fold(total, |total, &(exponent, probability)| {
                        let new_board = logic::add_tile(board, position, exponent);

                        self.max_node(new_board, depth.saturating_sub(1))
                            .mul_add(probability, total)
                    })
            });

            total / sampled.len() as f64
        };

        self.transposition_table.insert(board, score);

        score
    }
}

/// Runs a search on a fresh transposition table.
pub fn choose_move(
    board: u64,
    depth: u32,
    weights: &Weights,
    rng: &mut impl Rng,
) -> Option<Direction> {
    let config = SearchConfig {
        depth,
        weights: *weights,
        ..SearchConfig::default()
    };
    let mut transposition_table = TranspositionTable::default();

    Searcher::new(&config, &mut transposition_table, rng).choose_move(board, depth)
}

pub struct ExpectimaxAi<R> {
    config: SearchConfig,
    transposition_table: TranspositionTable,
    rng: R,
}

impl<R: Rng> Ai for ExpectimaxAi<R> {
    fn get_next_move(&mut self, board: u64) -> Option<Direction> {
        self.transposition_table.clear();

        let mut searcher = Searcher::new(&self.config, &mut self.transposition_table, &mut self.rng);
        let direction = searcher.choose_move(board, self.config.depth);
        let SearchStats { nodes, cache_hits } = searcher.stats();

        debug!(
            "searched {nodes} nodes ({cache_hits} cache hits) at depth {}, chose {direction:?}",
            self.config.depth
        );

        direction
    }
}

impl<R: Rng> ExpectimaxAi<R> {
    pub fn new(config: SearchConfig, rng: R) -> Self {
        Self {
            config,
            transposition_table: TranspositionTable::default(),
            rng,
        }
    }

    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }
}
