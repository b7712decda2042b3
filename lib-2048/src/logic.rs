use crate::{direction::Direction, reverse_row, transpose_board};

static ROW_LEFT_TABLE: [u16; 1 << 16] = include!(concat!(env!("OUT_DIR"), "/row_left_table.rs"));
static ROW_RIGHT_TABLE: [u16; 1 << 16] = include!(concat!(env!("OUT_DIR"), "/row_right_table.rs"));
static SCORE_TABLE: [u32; 1 << 16] = include!(concat!(env!("OUT_DIR"), "/score_table.rs"));

const MOVE_FUNCTIONS: [fn(u64) -> (u64, u32); 4] = [move_up, move_down, move_left, move_right];

/// Sets the lowest bit of every empty cell's nibble.
const fn mark_empty_cells(board: u64) -> u64 {
    let table = board | (board >> 1);
    let table = table | (table >> 2);

    !table & 0x1111_1111_1111_1111
}

pub const fn empty_count(board: u64) -> u32 {
    mark_empty_cells(board).count_ones()
}

/// Positions (`row * 4 + col`) of the empty cells of a board, in ascending order.
#[derive(Clone, Copy, Debug)]
pub struct EmptyPositions {
    empty_cells: u64,
}

impl Iterator for EmptyPositions {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.empty_cells == 0 {
            return None;
        }

        let position = self.empty_cells.trailing_zeros() as usize / 4;
        self.empty_cells &= self.empty_cells - 1;

        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.empty_cells.count_ones() as usize;

        (count, Some(count))
    }
}

impl ExactSizeIterator for EmptyPositions {}

pub const fn empty_positions(board: u64) -> EmptyPositions {
    EmptyPositions {
        empty_cells: mark_empty_cells(board),
    }
}

/// Places a tile with the given exponent. The cell at `position` must be empty.
pub fn add_tile(board: u64, position: usize, exponent: u64) -> u64 {
    debug_assert!((board >> (position * 4)) & 0xf == 0, "cell {position} is occupied");

    board | (exponent << (position * 4))
}

pub fn max_tile(board: u64) -> u32 {
    let max_exponent = (0..16).map(|i| (board >> (i * 4)) & 0xf).max().unwrap_or(0);

    if max_exponent == 0 {
        0
    } else {
        1 << max_exponent
    }
}

fn move_rows(board: u64, table: &[u16; 1 << 16], row_score: impl Fn(u16) -> u32) -> (u64, u32) {
    (0..4).fold((0, 0), |(new_board, gained), i| {
        let row = (board >> (i * 16)) as u16;

        (
            new_board | (u64::from(table[usize::from(row)]) << (i * 16)),
            gained + row_score(row),
        )
    })
}

fn move_left(board: u64) -> (u64, u32) {
    move_rows(board, &ROW_LEFT_TABLE, |row| SCORE_TABLE[usize::from(row)])
}

fn move_right(board: u64) -> (u64, u32) {
    move_rows(board, &ROW_RIGHT_TABLE, |row| {
        SCORE_TABLE[usize::from(reverse_row(row))]
    })
}

fn move_up(board: u64) -> (u64, u32) {
    let (new_board, gained) = move_left(transpose_board(board));

    (transpose_board(new_board), gained)
}

fn move_down(board: u64) -> (u64, u32) {
    let (new_board, gained) = move_right(transpose_board(board));

    (transpose_board(new_board), gained)
}

/// Slides the board in `direction`, returning the new board and the points gained by merges.
///
/// The returned board equals the input exactly when the move changes nothing.
pub fn apply(board: u64, direction: Direction) -> (u64, u32) {
    MOVE_FUNCTIONS[direction as usize](board)
}

pub fn try_move(board: u64, direction: Direction) -> Option<(u64, u32)> {
    let (new_board, gained) = apply(board, direction);

    (new_board != board).then_some((new_board, gained))
}

/// Results of [`try_move`] for every direction, indexed by `Direction as usize`.
pub fn try_all_moves(board: u64) -> [Option<(u64, u32)>; 4] {
    MOVE_FUNCTIONS.map(|move_fn| {
        let (new_board, gained) = move_fn(board);

        (new_board != board).then_some((new_board, gained))
    })
}

pub fn is_move_valid(board: u64, direction: Direction) -> bool {
    try_move(board, direction).is_some()
}

pub fn is_terminal(board: u64) -> bool {
    empty_count(board) == 0 && Direction::iter().all(|direction| !is_move_valid(board, direction))
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::{
        codec::{decode, encode, Grid},
        game, tables,
    };

    const CHECKERBOARD: Grid = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];

    fn random_boards(seed: u64, count: usize) -> Vec<u64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        (0..count)
            .map(|_| {
                // Exponents up to 11 keep boards in the range reached in play.
                (0..16).fold(0, |board, i| {
                    board | (rng.gen_range(0..12u64) << (i * 4))
                })
            })
            .collect()
    }

    #[test]
    fn embedded_tables_match_generator() {
        let generated = tables::build_tables();

        assert_eq!(&ROW_LEFT_TABLE[..], &generated.row_left[..]);
        assert_eq!(&ROW_RIGHT_TABLE[..], &generated.row_right[..]);
        assert_eq!(&SCORE_TABLE[..], &generated.score[..]);
    }

    #[test]
    fn simple_merge_left() {
        let board = encode(&[[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);

        let (new_board, gained) = apply(board, Direction::Left);

        assert_eq!(decode(new_board), [[4, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(gained, 4);
    }

    #[test]
    fn double_merge_right() {
        let board = encode(&[[2, 2, 2, 2], [0; 4], [0; 4], [0; 4]]);

        let (new_board, gained) = apply(board, Direction::Right);

        assert_eq!(decode(new_board), [[0, 0, 4, 4], [0; 4], [0; 4], [0; 4]]);
        assert_eq!(gained, 8);
    }

    #[test]
    fn vertical_moves() {
        let board = encode(&[[2, 0, 0, 8], [2, 0, 0, 0], [4, 0, 0, 8], [0, 0, 0, 0]]);

        let (up, up_gained) = apply(board, Direction::Up);
        assert_eq!(
            decode(up),
            [[4, 0, 0, 16], [4, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]
        );
        assert_eq!(up_gained, 20);

        let (down, down_gained) = apply(board, Direction::Down);
        assert_eq!(
            decode(down),
            [[0, 0, 0, 0], [0, 0, 0, 0], [4, 0, 0, 0], [4, 0, 0, 16]]
        );
        assert_eq!(down_gained, 20);
    }

    #[test]
    fn right_score_matches_mirrored_left_score() {
        let board = encode(&[[0, 4, 4, 2], [8, 8, 8, 0], [2, 0, 0, 2], [0; 4]]);

        let (new_board, gained) = apply(board, Direction::Right);

        assert_eq!(
            decode(new_board),
            [[0, 0, 8, 2], [0, 0, 8, 16], [0, 0, 0, 4], [0; 4]]
        );
        assert_eq!(gained, 8 + 16 + 4);
    }

    #[test]
    fn checkerboard_is_terminal() {
        let board = encode(&CHECKERBOARD);

        assert!(is_terminal(board));

        for direction in Direction::iter() {
            assert!(!is_move_valid(board, direction), "{direction} moved");
            assert_eq!(apply(board, direction), (board, 0));
        }

        assert_eq!(try_all_moves(board), [None; 4]);
    }

    #[test]
    fn full_board_with_merge_is_not_terminal() {
        let mut grid = CHECKERBOARD;
        grid[0][1] = 2;

        let board = encode(&grid);

        assert_eq!(empty_count(board), 0);
        assert!(!is_terminal(board));
        assert!(is_move_valid(board, Direction::Left));
    }

    #[test]
    fn no_op_law() {
        for board in random_boards(1, 2000) {
            for direction in Direction::iter() {
                let (new_board, _) = apply(board, direction);

                assert_eq!(new_board == board, !is_move_valid(board, direction));
                assert_eq!(
                    try_all_moves(board)[direction as usize].is_some(),
                    is_move_valid(board, direction)
                );
            }
        }
    }

    #[test]
    fn moves_without_merges_are_idempotent() {
        for board in random_boards(2, 2000) {
            for direction in Direction::iter() {
                let (once, gained) = apply(board, direction);
                let (twice, _) = apply(once, direction);

                if gained == 0 {
                    assert_eq!(twice, once);
                }
            }
        }
    }

    #[test]
    fn merges_can_cascade_on_a_second_move() {
        let board = encode(&[[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]]);

        let (once, _) = apply(board, Direction::Left);
        let (twice, gained) = apply(once, Direction::Left);

        assert_eq!(decode(once)[0], [4, 4, 0, 0]);
        assert_eq!(decode(twice)[0], [8, 0, 0, 0]);
        assert_eq!(gained, 8);
    }

    #[test]
    fn slides_conserve_tile_sum() {
        for board in random_boards(3, 500) {
            for direction in Direction::iter() {
                let (new_board, gained) = apply(board, direction);
                let before: u64 = decode(board).iter().flatten().map(|&v| u64::from(v)).sum();
                let after: u64 = decode(new_board).iter().flatten().map(|&v| u64::from(v)).sum();

                assert_eq!(before, after);
                assert_eq!(u64::from(gained) % 4, 0);
            }
        }
    }

    #[test]
    fn empty_positions_ascending() {
        let board = encode(&[[2, 0, 0, 0], [0, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 8]]);

        let positions: Vec<_> = empty_positions(board).collect();

        assert_eq!(positions, [1, 2, 3, 4, 6, 7, 8, 9, 10, 11, 12, 13, 14]);
        assert_eq!(empty_count(board), 13);
        assert_eq!(empty_positions(board).len(), 13);
        assert_eq!(empty_positions(0).count(), 16);
        assert_eq!(empty_positions(encode(&CHECKERBOARD)).next(), None);
    }

    #[test]
    fn add_tile_places_exponent() {
        let board = add_tile(add_tile(0, 0, 1), 15, 2);
        let grid = decode(board);

        assert_eq!(grid[0][0], 2);
        assert_eq!(grid[3][3], 4);
        assert_eq!(empty_count(board), 14);
    }

    #[test]
    fn max_tile_of_boards() {
        assert_eq!(max_tile(0), 0);
        assert_eq!(max_tile(encode(&CHECKERBOARD)), 4);
        assert_eq!(
            max_tile(encode(&[[0, 0, 0, 0], [0, 2048, 0, 0], [0, 0, 16, 0], [0; 4]])),
            2048
        );
    }

    #[test]
    fn fresh_game_has_two_tiles() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let board = game::new_game(&mut rng);

        assert_eq!(empty_count(board), 14);
        assert!(!is_terminal(board));
    }
}
