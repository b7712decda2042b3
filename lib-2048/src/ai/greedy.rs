use crate::{config::Weights, direction::Direction, heuristic};

use super::Ai;

/// Plays the move whose resulting board evaluates best, looking no further ahead.
pub struct GreedyAi {
    weights: Weights,
}

impl Ai for GreedyAi {
    fn get_next_move(&mut self, board: u64) -> Option<Direction> {
        let scored_moves = super::get_all_moves(board).map(|(direction, new_board, _)| {
            (heuristic::evaluate_board(new_board, &self.weights), direction)
        });

        super::max_by_score(scored_moves).map(|(_, direction)| direction)
    }
}

impl GreedyAi {
    pub const fn new(weights: Weights) -> Self {
        Self { weights }
    }
}
