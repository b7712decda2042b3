pub mod tables;

/// Largest exponent a single nibble can hold (tile value 32768).
pub const MAX_EXPONENT: u8 = 0xf;

/// Swaps rows and columns of a board.
///
/// The first stage swaps single nibbles across the diagonal of every 2x2 block of cells (nibble
/// blocks at diagonal offset 3 cells, a 12 bit shift). The second stage swaps the two
/// off-diagonal 2x2 blocks (diagonal offset 6 cells, a 24 bit shift). The operation is its own
/// inverse.
pub const fn transpose_board(board: u64) -> u64 {
    let keep = board & 0xf0f0_0f0f_f0f0_0f0f;
    let left = board & 0x0000_f0f0_0000_f0f0;
    let right = board & 0x0f0f_0000_0f0f_0000;
    let board = keep | (left << 12) | (right >> 12);

    let keep = board & 0xff00_ff00_00ff_00ff;
    let left = board & 0x0000_0000_ff00_ff00;
    let right = board & 0x00ff_00ff_0000_0000;

    keep | (left << 24) | (right >> 24)
}

/// Reverses the order of the four cells in a row.
pub const fn reverse_row(row: u16) -> u16 {
    (row >> 12) | ((row >> 4) & 0x00f0) | ((row << 4) & 0x0f00) | (row << 12)
}

pub const fn row_cells(row: u16) -> [u8; 4] {
    [
        (row & 0xf) as u8,
        ((row >> 4) & 0xf) as u8,
        ((row >> 8) & 0xf) as u8,
        (row >> 12) as u8,
    ]
}

pub const fn row_from_cells(cells: [u8; 4]) -> u16 {
    (cells[0] as u16 & 0xf)
        | ((cells[1] as u16 & 0xf) << 4)
        | ((cells[2] as u16 & 0xf) << 8)
        | ((cells[3] as u16 & 0xf) << 12)
}
