use log::{trace, warn};
use rand::Rng;

use crate::{ai::Ai, logic};

/// Spawns a 2 (probability 0.9) or a 4 (probability 0.1) on a random empty cell. A full board
/// is returned unchanged.
pub fn spawn_square(rng: &mut impl Rng, board: u64) -> u64 {
    let slot_count = logic::empty_count(board);

    if slot_count > 0 {
        let rand = rng.gen_range(0..(slot_count * 10));

        let slot_idx = (rand / 10) as usize;
        let cell = if rand % 10 == 0 { 2 } else { 1 };

        match logic::empty_positions(board).nth(slot_idx) {
            Some(position) => logic::add_tile(board, position, cell),
            None => board,
        }
    } else {
        board
    }
}

pub fn new_game(rng: &mut impl Rng) -> u64 {
    let board = spawn_square(rng, 0);

    spawn_square(rng, board)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub board: u64,
    pub score: u64,
    pub moves: u32,
    pub max_tile: u32,
}

/// Plays one game from a fresh board until the AI has no move, `max_moves` is reached or
/// `should_stop` returns true.
pub fn play_game(
    ai: &mut impl Ai,
    rng: &mut impl Rng,
    max_moves: Option<u32>,
    mut should_stop: impl FnMut() -> bool,
) -> GameSummary {
    let mut board = new_game(rng);
    let mut score = 0;
    let mut moves = 0;

    while max_moves.map_or(true, |max_moves| moves < max_moves) && !should_stop() {
        let Some(direction) = ai.get_next_move(board) else {
            break;
        };

        let Some((new_board, gained)) = logic::try_move(board, direction) else {
            warn!("AI chose {direction}, which doesn't change board {board:#018x}");
            break;
        };

        board = spawn_square(rng, new_board);
        score += u64::from(gained);
        moves += 1;

        trace!("move {moves}: {direction}, score {score}");
    }

    GameSummary {
        board,
        score,
        moves,
        max_tile: logic::max_tile(board),
    }
}
