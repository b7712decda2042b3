//! Conversion between a grid of tile values and a packed board.

/// Tile values indexed by `[row][col]`. Each cell is 0 or a power of two.
pub type Grid = [[u32; 4]; 4];

pub fn encode(grid: &Grid) -> u64 {
    grid.iter()
        .flatten()
        .enumerate()
        .filter(|&(_, &value)| value != 0)
        .fold(0, |board, (i, &value)| {
            board | (u64::from(value.trailing_zeros()) << (i * 4))
        })
}

pub fn decode(board: u64) -> Grid {
    let mut grid = [[0; 4]; 4];

    for (i, cell) in grid.iter_mut().flatten().enumerate() {
        let exponent = (board >> (i * 4)) & 0xf;

        if exponent != 0 {
            *cell = 1 << exponent;
        }
    }

    grid
}
