use std::fmt;

use crate::error::{EngineError, Result};
use crate::types::*;

// Declare submodules
pub mod moves;
pub mod state;
pub mod validation;

pub use state::MoveOutcome;

const BACK_RANK: [Kind; 8] = [
    Kind::Rook,
    Kind::Knight,
    Kind::Bishop,
    Kind::Queen,
    Kind::King,
    Kind::Bishop,
    Kind::Knight,
    Kind::Rook,
];

/// The 8x8 grid plus the per-ply bookkeeping needed to generate moves
/// (castling rights and the en passant target).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    castling_rights: CastlingRights,
    en_passant: Option<EnPassant>,
}

impl Board {
    /// Standard starting position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_starting_position();
        board
    }

    /// An empty grid with no castling rights.
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
            castling_rights: CastlingRights::NONE,
            en_passant: None,
        }
    }

    fn setup_starting_position(&mut self) {
        for colour in Colour::ALL {
            for (col, &kind) in BACK_RANK.iter().enumerate() {
                self.place(Square::at(colour.home_row(), col as u8), Some(Piece::new(kind, colour)));
            }
            for col in 0..8 {
                self.place(Square::at(colour.pawn_row(), col), Some(Piece::new(Kind::Pawn, colour)));
            }
        }
        self.castling_rights = CastlingRights::ALL;
        self.en_passant = None;
    }

    // Basic board operations
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row() as usize][square.col() as usize]
    }

    /// Unconditional overwrite. Legality is the caller's business.
    pub fn place(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row() as usize][square.col() as usize] = piece;
    }

    pub fn find_king(&self, colour: Colour) -> Result<Square> {
        self.pieces(colour)
            .find(|(_, piece)| piece.kind == Kind::King)
            .map(|(square, _)| square)
            .ok_or_else(|| EngineError::InvariantViolation(format!("no {} king on the board", colour)))
    }

    /// Every square holding a piece of `colour`, with that piece.
    pub fn pieces(&self, colour: Colour) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| {
            self.piece_at(square)
                .filter(|piece| piece.colour == colour)
                .map(|piece| (square, piece))
        })
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn en_passant(&self) -> Option<EnPassant> {
        self.en_passant
    }

    /// Raw cell contents, row 0 first.
    pub fn grid(&self) -> [[Option<Piece>; 8]; 8] {
        self.squares
    }

    // FEN parsing functionality
    /// Parse a FEN record into a board and the side to move.
    ///
    /// The half-move clock and full-move number are accepted but not tracked.
    pub fn from_fen(fen: &str) -> Result<(Self, Colour)> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 || parts.len() > 6 {
            return Err(EngineError::InvalidFen(format!(
                "expected 4 to 6 fields, found {}",
                parts.len()
            )));
        }

        let mut board = Self::empty();
        board.parse_piece_placement(parts[0])?;

        let turn = match parts[1] {
            "w" => Colour::White,
            "b" => Colour::Black,
            other => return Err(EngineError::InvalidFen(format!("invalid active colour `{}`", other))),
        };

        board.parse_castling_rights(parts[2])?;
        board.parse_en_passant(parts[3], turn)?;

        for colour in Colour::ALL {
            let kings = board.pieces(colour).filter(|(_, p)| p.kind == Kind::King).count();
            if kings != 1 {
                return Err(EngineError::InvalidFen(format!(
                    "expected one {} king, found {}",
                    colour, kings
                )));
            }
        }

        Ok((board, turn))
    }

    fn parse_piece_placement(&mut self, placement: &str) -> Result<()> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(EngineError::InvalidFen("piece placement must have 8 ranks".to_string()));
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let row = 7 - rank_idx as u8; // FEN starts from rank 8
            let mut col = 0u8;

            for ch in rank_str.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    if skip == 0 || u32::from(col) + skip > 8 {
                        return Err(EngineError::InvalidFen(format!("bad empty-square count in `{}`", rank_str)));
                    }
                    col += skip as u8;
                } else {
                    if col >= 8 {
                        return Err(EngineError::InvalidFen(format!("too many pieces in `{}`", rank_str)));
                    }
                    let piece = Piece::from_symbol(ch)
                        .ok_or_else(|| EngineError::InvalidFen(format!("unknown piece `{}`", ch)))?;
                    self.place(Square::at(row, col), Some(piece));
                    col += 1;
                }
            }

            if col != 8 {
                return Err(EngineError::InvalidFen(format!("rank `{}` does not cover 8 files", rank_str)));
            }
        }

        Ok(())
    }

    fn parse_castling_rights(&mut self, castling: &str) -> Result<()> {
        self.castling_rights = CastlingRights::NONE;
        if castling == "-" {
            return Ok(());
        }

        for ch in castling.chars() {
            let (colour, side) = match ch {
                'K' => (Colour::White, CastleSide::King),
                'Q' => (Colour::White, CastleSide::Queen),
                'k' => (Colour::Black, CastleSide::King),
                'q' => (Colour::Black, CastleSide::Queen),
                _ => return Err(EngineError::InvalidFen(format!("invalid castling right `{}`", ch))),
            };
            self.castling_rights.grant(colour, side);
        }

        Ok(())
    }

    fn parse_en_passant(&mut self, field: &str, turn: Colour) -> Result<()> {
        if field == "-" {
            self.en_passant = None;
            return Ok(());
        }

        let target = Square::parse(field)
            .ok_or_else(|| EngineError::InvalidFen(format!("invalid en passant square `{}`", field)))?;

        // The pawn that skipped `target` belongs to the side that just moved.
        let pusher = turn.opposite();
        if target.row() as i8 != pusher.pawn_row() as i8 + pusher.forward() {
            return Err(EngineError::InvalidFen(format!("en passant square `{}` is on the wrong rank", field)));
        }
        let pawn = target
            .offset(pusher.forward(), 0)
            .ok_or_else(|| EngineError::InvalidFen(format!("invalid en passant square `{}`", field)))?;

        self.en_passant = Some(EnPassant { target, pawn });
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Text diagram, Black's back rank on top.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, &self.squares)
    }
}

pub(crate) fn write_grid(f: &mut fmt::Formatter<'_>, grid: &[[Option<Piece>; 8]; 8]) -> fmt::Result {
    for row in grid.iter().rev() {
        let line: Vec<String> = row
            .iter()
            .map(|cell| cell.map_or('.', Piece::symbol).to_string())
            .collect();
        writeln!(f, "{}", line.join(" "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::parse(name).unwrap()
    }

    #[test]
    fn starting_position_layout() {
        let board = Board::new();
        assert_eq!(board.piece_at(sq("e1")), Some(Piece::new(Kind::King, Colour::White)));
        assert_eq!(board.piece_at(sq("d8")), Some(Piece::new(Kind::Queen, Colour::Black)));
        assert_eq!(board.piece_at(sq("c2")), Some(Piece::new(Kind::Pawn, Colour::White)));
        assert_eq!(board.piece_at(sq("e4")), None);
        assert_eq!(board.pieces(Colour::White).count(), 16);
        assert_eq!(board.pieces(Colour::Black).count(), 16);
        assert_eq!(board.castling_rights(), CastlingRights::ALL);
    }

    #[test]
    fn find_king_reports_missing_king() {
        let mut board = Board::new();
        assert_eq!(board.find_king(Colour::Black).unwrap(), sq("e8"));

        board.place(sq("e8"), None);
        assert!(matches!(
            board.find_king(Colour::Black),
            Err(EngineError::InvariantViolation(_))
        ));
    }

    #[test]
    fn fen_round_trips_start_position() {
        let (board, turn) = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert_eq!(board, Board::new());
        assert_eq!(turn, Colour::White);
    }

    #[test]
    fn fen_en_passant_records_the_pawn() {
        let (board, turn) =
            Board::from_fen("rnbqkbnr/pppp1ppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 3").unwrap();
        assert_eq!(turn, Colour::Black);
        assert_eq!(
            board.en_passant(),
            Some(EnPassant {
                target: sq("e3"),
                pawn: sq("e4"),
            })
        );
    }

    #[test]
    fn fen_rejects_bad_input() {
        assert!(Board::from_fen("8/8/8/8/8/8/8/8 w - -").is_err());
        assert!(Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq -").is_err());
        assert!(Board::from_fen("4k3/8/8/8/8/8/8/4K3 x - -").is_err());
        assert!(Board::from_fen("4k3/8/8/8/8/8/8/4K3 w X -").is_err());
        assert!(Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - e5").is_err());
        assert!(Board::from_fen("4k3/8/8/8/8/8/8/4K03 w - -").is_err());
        assert!(matches!(
            Board::from_fen(&format!("k7/8/8/8/8/8/8/{} w - -", "9".repeat(30))),
            Err(EngineError::InvalidFen(_))
        ));
        assert!(Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - -").is_ok());
    }

    #[test]
    fn display_draws_black_on_top() {
        let text = Board::new().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "r n b q k b n r");
        assert_eq!(lines[4], ". . . . . . . .");
        assert_eq!(lines[7], "R N B Q K B N R");
    }
}
