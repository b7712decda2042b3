use std::io::{self, Write};

use lib_2048::codec;

const TOP_ROW: &str = "┏━━━━━━━┳━━━━━━━┳━━━━━━━┳━━━━━━━┓\n";
const SEPERATOR_ROW: &str = "┣━━━━━━━╋━━━━━━━╋━━━━━━━╋━━━━━━━┫\n";
const BOTTOM_ROW: &str = "┗━━━━━━━┻━━━━━━━┻━━━━━━━┻━━━━━━━┛\n";
const EMPTY_CELL: &str = "┃       ";

fn draw_board_row(out: &mut impl Write, row: &[u32; 4]) -> io::Result<()> {
    for &value in row {
        if value == 0 {
            out.write_all(EMPTY_CELL.as_bytes())?;
        } else {
            write!(out, "┃{value:^7}")?;
        }
    }

    out.write_all("┃\n".as_bytes())
}

/// Writes the board as a boxed grid, with the score above it.
pub fn draw_board(out: &mut impl Write, board: u64, score: u64) -> io::Result<()> {
    writeln!(out, "Score: {score}")?;
    out.write_all(TOP_ROW.as_bytes())?;

    for (i, row) in codec::decode(board).iter().enumerate() {
        if i != 0 {
            out.write_all(SEPERATOR_ROW.as_bytes())?;
        }

        draw_board_row(out, row)?;
    }

    out.write_all(BOTTOM_ROW.as_bytes())
}
