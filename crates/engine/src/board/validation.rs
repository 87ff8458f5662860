use std::collections::HashSet;

use super::Board;
use crate::error::Result;
use crate::types::*;

impl Board {
    /// Check if a square is attacked by any piece of `by_colour`
    pub fn is_under_threat(&self, square: Square, by_colour: Colour) -> bool {
        self.pieces(by_colour)
            .any(|(from, piece)| self.attacked_squares(from, piece).contains(&square))
    }

    pub fn is_in_check(&self, colour: Colour) -> Result<bool> {
        let king = self.find_king(colour)?;
        Ok(self.is_under_threat(king, colour.opposite()))
    }

    /// Legal destinations for the piece on `from`: its pseudo-legal moves
    /// minus those that leave its own king attacked.
    pub fn legal_destinations(&self, from: Square) -> HashSet<Square> {
        match self.piece_at(from) {
            Some(piece) => self.filter_legal(from, piece.colour, self.pseudo_legal_destinations(from)),
            None => HashSet::new(),
        }
    }

    /// Keep the candidates after which `colour`'s king is not attacked.
    /// Each candidate is tried on its own scratch copy of the board.
    pub fn filter_legal(
        &self,
        from: Square,
        colour: Colour,
        candidates: impl IntoIterator<Item = Square>,
    ) -> HashSet<Square> {
        candidates
            .into_iter()
            .filter(|&to| self.leaves_king_safe(from, to, colour))
            .collect()
    }

    fn leaves_king_safe(&self, from: Square, to: Square, colour: Colour) -> bool {
        let opponent = colour.opposite();

        // Castling may not start from, pass through or land on an attacked square
        if let Some(side) = self.castling_side(from, to) {
            let crossed = Square::at(from.row(), side.rook_target_col());
            if self.is_under_threat(from, opponent) || self.is_under_threat(crossed, opponent) {
                return false;
            }
        }

        let mut scratch = self.clone();
        if scratch.relocate(from, to).is_err() {
            return false;
        }
        match scratch.is_in_check(colour) {
            Ok(in_check) => !in_check,
            Err(_) => false,
        }
    }

    /// Generate all legal moves for `colour`, one per promotion choice
    pub fn all_legal_moves(&self, colour: Colour) -> Vec<Move> {
        let mut all_moves = Vec::new();

        for (square, piece) in self.pieces(colour) {
            for target in self.legal_destinations(square) {
                if piece.kind == Kind::Pawn && target.row() == colour.promotion_row() {
                    for kind in Kind::PROMOTIONS {
                        all_moves.push(Move::new_promotion(square, target, kind));
                    }
                } else {
                    all_moves.push(Move::new(square, target));
                }
            }
        }

        all_moves
    }

    pub fn has_legal_move(&self, colour: Colour) -> bool {
        self.pieces(colour)
            .any(|(square, _)| !self.legal_destinations(square).is_empty())
    }

    /// Status of the game from the point of view of `to_move`.
    pub fn status_for(&self, to_move: Colour) -> Result<GameStatus> {
        let in_check = self.is_in_check(to_move)?;
        let can_move = self.has_legal_move(to_move);
        Ok(match (in_check, can_move) {
            (true, false) => GameStatus::Checkmate(to_move),
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check(to_move),
            (false, true) => GameStatus::InProgress,
        })
    }
}
