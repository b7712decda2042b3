//! Row transform tables.
//!
//! Every row of a board is a 16 bit value, so the result of sliding a row can be precomputed
//! for all 65536 rows. Only the left slide is computed directly; sliding right is sliding left
//! on the mirrored row.

use crate::{reverse_row, row_cells, row_from_cells, MAX_EXPONENT};

pub const TABLE_SIZE: usize = 1 << 16;

pub struct RowTables {
    /// Row after sliding left.
    pub row_left: Box<[u16]>,
    /// Row after sliding right.
    pub row_right: Box<[u16]>,
    /// Points gained by sliding the row left.
    pub score: Box<[u32]>,
}

/// Slides and merges a row towards the low nibble, returning the new row and the sum of the
/// values of the merged tiles.
///
/// A tile produced by a merge can't merge again in the same slide. Merging two 32768 tiles
/// leaves a 32768 in place since the exponent can't grow past a nibble.
pub fn collapse_row_left(row: u16) -> (u16, u32) {
    let mut cells = [0u8; 4];
    let mut len = 0;
    let mut gained = 0;
    let mut can_merge = false;

    for cell in row_cells(row).into_iter().filter(|&cell| cell != 0) {
        if can_merge && cells[len - 1] == cell {
            cells[len - 1] = (cell + 1).min(MAX_EXPONENT);
            gained += 1 << (cell + 1);
            can_merge = false;
        } else {
            cells[len] = cell;
            len += 1;
            can_merge = true;
        }
    }

    (row_from_cells(cells), gained)
}

pub fn build_tables() -> RowTables {
    let (row_left, score): (Vec<u16>, Vec<u32>) = (0..=u16::MAX).map(collapse_row_left).unzip();

    let row_right: Vec<u16> = (0..=u16::MAX)
        .map(|row| reverse_row(row_left[usize::from(reverse_row(row))]))
        .collect();

    RowTables {
        row_left: row_left.into_boxed_slice(),
        row_right: row_right.into_boxed_slice(),
        score: score.into_boxed_slice(),
    }
}
