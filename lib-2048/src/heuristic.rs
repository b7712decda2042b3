//! Static board evaluation.
//!
//! All metrics work on tile magnitudes (`log2` of the value, 0 for an empty cell) so that a
//! 1024 next to a 2048 counts the same as a 2 next to a 4.

use crate::{
    codec::{self, Grid},
    config::Weights,
};

fn magnitude(value: u32) -> f64 {
    if value == 0 {
        0.0
    } else {
        f64::from(value).log2()
    }
}

fn line_monotonicity(line: [f64; 4]) -> f64 {
    let (increasing, decreasing) = line.windows(2).fold((0.0, 0.0), |(increasing, decreasing), pair| {
        let diff = pair[0] - pair[1];

        if diff > 0.0 {
            (increasing + diff, decreasing)
        } else {
            (increasing, decreasing - diff)
        }
    });

    f64::max(increasing, decreasing)
}

/// Sum over all rows and columns of the larger of the line's total rise and total fall.
pub fn monotonicity(grid: &Grid) -> f64 {
    let rows: f64 = grid
        .iter()
        .map(|row| line_monotonicity(row.map(magnitude)))
        .sum();

    let columns: f64 = (0..4)
        .map(|col| line_monotonicity([0, 1, 2, 3].map(|row| magnitude(grid[row][col]))))
        .sum();

    rows + columns
}

/// Minus the magnitude differences between each tile and its right and bottom neighbours.
/// Empty cells are skipped, so a board with no differing neighbours scores 0.
pub fn smoothness(grid: &Grid) -> f64 {
    let mut score = 0.0;

    for row in 0..4 {
        for col in 0..4 {
            let value = grid[row][col];

            if value == 0 {
                continue;
            }

            let neighbours = [
                (col < 3).then(|| grid[row][col + 1]),
                (row < 3).then(|| grid[row + 1][col]),
            ];

            for neighbour in neighbours.into_iter().flatten().filter(|&n| n != 0) {
                score -= (magnitude(value) - magnitude(neighbour)).abs();
            }
        }
    }

    score
}

/// 1 if the largest tile value appears in any corner.
pub fn corner_occupancy(grid: &Grid) -> u32 {
    let max_value = grid.iter().flatten().copied().max().unwrap_or(0);
    let corners = [grid[0][0], grid[0][3], grid[3][0], grid[3][3]];

    corners.contains(&max_value).into()
}

pub fn empty_cells(grid: &Grid) -> u32 {
    grid.iter().flatten().filter(|&&value| value == 0).count() as u32
}

pub fn evaluate(grid: &Grid, weights: &Weights) -> f64 {
    weights.mono * monotonicity(grid)
        + weights.smooth * smoothness(grid)
        + weights.corner * f64::from(corner_occupancy(grid))
        + weights.empty * f64::from(empty_cells(grid))
}

pub fn evaluate_board(board: u64, weights: &Weights) -> f64 {
    evaluate(&codec::decode(board), weights)
}
