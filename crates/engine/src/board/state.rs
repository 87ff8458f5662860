use super::Board;
use crate::error::{EngineError, Result};
use crate::types::*;

/// What applying a move did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub castled: Option<CastleSide>,
    pub en_passant: bool,
    /// The moved pawn reached its last row and still needs a kind.
    pub promotion_pending: bool,
}

impl Board {
    /// Move whatever stands on `from` to `to`, with every side effect the move
    /// implies: capture, en passant removal, the castling rook, castling-right
    /// bookkeeping and the new en passant target.
    ///
    /// A pawn reaching its last row is left as a pawn; call [`Board::promote`]
    /// to finish the move. No legality check happens here.
    pub fn relocate(&mut self, from: Square, to: Square) -> Result<MoveOutcome> {
        let piece = self
            .piece_at(from)
            .ok_or_else(|| EngineError::InvariantViolation(format!("no piece on {} to move", from)))?;

        // Check for special moves first (before clearing en passant)
        let castled = self.castling_side(from, to);
        let en_passant_victim = if piece.kind == Kind::Pawn && from.col() != to.col() && self.piece_at(to).is_none() {
            self.en_passant_victim(to, piece.colour)
        } else {
            None
        };

        // The previous target only lives for one ply
        self.en_passant = None;

        let captured = match en_passant_victim {
            Some(victim) => self.piece_at(victim),
            None => self.piece_at(to),
        };

        self.update_castling_rights(from, to, piece, captured);

        if let Some(victim) = en_passant_victim {
            self.place(victim, None);
        }
        self.place(to, Some(piece));
        self.place(from, None);

        if let Some(side) = castled {
            self.execute_castling_rook(piece.colour, side);
        }

        self.setup_en_passant(from, to, piece);

        Ok(MoveOutcome {
            piece,
            captured,
            castled,
            en_passant: en_passant_victim.is_some(),
            promotion_pending: piece.kind == Kind::Pawn && to.row() == piece.colour.promotion_row(),
        })
    }

    /// Replace the pawn on `square` with `kind`.
    pub fn promote(&mut self, square: Square, kind: Kind) -> Result<Piece> {
        if !kind.is_promotion_choice() {
            return Err(EngineError::InvalidPromotion(kind));
        }
        match self.piece_at(square) {
            Some(pawn) if pawn.kind == Kind::Pawn && square.row() == pawn.colour.promotion_row() => {
                let promoted = Piece::new(kind, pawn.colour);
                self.place(square, Some(promoted));
                Ok(promoted)
            }
            other => Err(EngineError::InvariantViolation(format!(
                "expected a pawn on its last row at {}, found {:?}",
                square, other
            ))),
        }
    }

    /// Apply a complete move, promotion included.
    pub fn make_move(&mut self, mv: Move) -> Result<MoveOutcome> {
        let mut outcome = self.relocate(mv.from, mv.to)?;
        if outcome.promotion_pending {
            if let Some(kind) = mv.promotion {
                outcome.piece = self.promote(mv.to, kind)?;
                outcome.promotion_pending = false;
            }
        }
        Ok(outcome)
    }

    fn update_castling_rights(&mut self, from: Square, to: Square, piece: Piece, captured: Option<Piece>) {
        match piece.kind {
            Kind::King => self.castling_rights.revoke_all(piece.colour),
            Kind::Rook if from.row() == piece.colour.home_row() => {
                if let Some(side) = CastleSide::from_rook_col(from.col()) {
                    self.castling_rights.revoke(piece.colour, side);
                }
            }
            _ => {}
        }

        // A rook captured on its home square takes its right with it
        if let Some(victim) = captured {
            if victim.kind == Kind::Rook {
                self.castling_rights.revoke_rook_square(to);
            }
        }
    }

    fn execute_castling_rook(&mut self, colour: Colour, side: CastleSide) {
        let home = colour.home_row();
        let rook_from = Square::at(home, side.rook_col());
        let rook_to = Square::at(home, side.rook_target_col());
        let rook = self.piece_at(rook_from);
        self.place(rook_to, rook);
        self.place(rook_from, None);
    }

    /// Set up en passant target after a double pawn push
    fn setup_en_passant(&mut self, from: Square, to: Square, piece: Piece) {
        if piece.kind != Kind::Pawn || from.row() != piece.colour.pawn_row() {
            return;
        }
        let forward = piece.colour.forward();
        if to.col() == from.col() && to.row() as i8 == from.row() as i8 + 2 * forward {
            if let Some(target) = from.offset(forward, 0) {
                self.en_passant = Some(EnPassant { target, pawn: to });
            }
        }
    }
}
