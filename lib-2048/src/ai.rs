use crate::{direction::Direction, logic};

pub mod expectimax;
pub mod greedy;

pub trait Ai {
    fn get_next_move(&mut self, board: u64) -> Option<Direction>;
}

/// Legal moves as `(direction, new_board, gained)`, in `Direction::ALL` order.
fn get_all_moves(board: u64) -> impl Iterator<Item = (Direction, u64, u32)> {
    Direction::iter().filter_map(move |direction| {
        logic::try_move(board, direction).map(|(new_board, gained)| (direction, new_board, gained))
    })
}

/// Highest scoring item. The earliest item wins a tie.
fn max_by_score<T>(items: impl Iterator<Item = (f64, T)>) -> Option<(f64, T)> {
    items.fold(None, |best, (score, item)| match best {
        Some((best_score, _)) if best_score >= score => best,
        _ => Some((score, item)),
    })
}
