use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{write_grid, Board};
use crate::types::{Piece, Square};

/// Read-only copy of the board for rendering. Row 0 is White's back rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    cells: [[Option<Piece>; 8]; 8],
}

impl BoardSnapshot {
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.row() as usize][square.col() as usize]
    }

    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.cells
    }
}

impl From<&Board> for BoardSnapshot {
    fn from(board: &Board) -> Self {
        Self { cells: board.grid() }
    }
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, &self.cells)
    }
}
