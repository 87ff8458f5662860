use super::Board;
use crate::types::*;

const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];
const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1), (0, 1),
    (1, -1), (1, 0), (1, 1),
];

impl Board {
    /// Destinations allowed by piece geometry and occupancy, ignoring
    /// whether the mover's own king ends up attacked. Order is unspecified.
    pub fn pseudo_legal_destinations(&self, from: Square) -> Vec<Square> {
        let mut moves = Vec::new();
        let Some(piece) = self.piece_at(from) else {
            return moves;
        };

        match piece.kind {
            Kind::Pawn => self.pawn_moves(from, piece.colour, &mut moves),
            Kind::King => {
                self.step_moves(from, piece.colour, &KING_OFFSETS, &mut moves);
                self.castling_candidates(from, piece.colour, &mut moves);
            }
            _ => self.attack_moves(from, piece, &mut moves),
        }
        moves
    }

    /// Squares `piece` on `from` attacks. Pawns attack both forward diagonals
    /// whatever stands there; kings never attack through castling.
    pub fn attacked_squares(&self, from: Square, piece: Piece) -> Vec<Square> {
        let mut squares = Vec::new();
        self.attack_moves(from, piece, &mut squares);
        squares
    }

    fn attack_moves(&self, from: Square, piece: Piece, moves: &mut Vec<Square>) {
        match piece.kind {
            Kind::Knight => self.step_moves(from, piece.colour, &KNIGHT_OFFSETS, moves),
            Kind::Bishop => self.slide_moves(from, piece.colour, &DIAGONALS, moves),
            Kind::Rook => self.slide_moves(from, piece.colour, &ORTHOGONALS, moves),
            Kind::Queen => {
                self.slide_moves(from, piece.colour, &ORTHOGONALS, moves);
                self.slide_moves(from, piece.colour, &DIAGONALS, moves);
            }
            Kind::King => self.step_moves(from, piece.colour, &KING_OFFSETS, moves),
            Kind::Pawn => {
                for dc in [-1, 1] {
                    moves.extend(from.offset(piece.colour.forward(), dc));
                }
            }
        }
    }

    /// Walk each ray until the edge or the first occupied square, which is
    /// included only if it holds an enemy.
    fn slide_moves(&self, from: Square, colour: Colour, directions: &[(i8, i8)], moves: &mut Vec<Square>) {
        for &(dr, dc) in directions {
            let mut current = from;
            while let Some(next) = current.offset(dr, dc) {
                match self.piece_at(next) {
                    None => moves.push(next),
                    Some(other) => {
                        if other.colour != colour {
                            moves.push(next);
                        }
                        break;
                    }
                }
                current = next;
            }
        }
    }

    fn step_moves(&self, from: Square, colour: Colour, offsets: &[(i8, i8)], moves: &mut Vec<Square>) {
        for &(dr, dc) in offsets {
            if let Some(target) = from.offset(dr, dc) {
                if self.piece_at(target).map_or(true, |other| other.colour != colour) {
                    moves.push(target);
                }
            }
        }
    }

    /// Generate pawn moves
    fn pawn_moves(&self, from: Square, colour: Colour, moves: &mut Vec<Square>) {
        let forward = colour.forward();

        // Single forward move (only if square is empty)
        if let Some(one) = from.offset(forward, 0) {
            if self.piece_at(one).is_none() {
                moves.push(one);

                // Double forward move from the starting row (both squares empty)
                if from.row() == colour.pawn_row() {
                    if let Some(two) = one.offset(forward, 0) {
                        if self.piece_at(two).is_none() {
                            moves.push(two);
                        }
                    }
                }
            }
        }

        // Diagonal captures, including en passant
        for dc in [-1, 1] {
            let Some(target) = from.offset(forward, dc) else {
                continue;
            };
            match self.piece_at(target) {
                Some(other) if other.colour != colour => moves.push(target),
                Some(_) => {}
                None => {
                    if self.en_passant_victim(target, colour).is_some() {
                        moves.push(target);
                    }
                }
            }
        }
    }

    /// The pawn a `colour` pawn would remove by moving onto `target`, if
    /// `target` is the live en passant square for that colour.
    pub(crate) fn en_passant_victim(&self, target: Square, colour: Colour) -> Option<Square> {
        let ep = self.en_passant?;
        if ep.target != target {
            return None;
        }
        match self.piece_at(ep.pawn) {
            Some(pawn) if pawn.is(Kind::Pawn, colour.opposite()) => Some(ep.pawn),
            _ => None,
        }
    }

    /// King destinations for castling whose rights, pieces and empty path
    /// check out. Attack checks are the legality filter's job.
    fn castling_candidates(&self, from: Square, colour: Colour, moves: &mut Vec<Square>) {
        let home = colour.home_row();
        if from != Square::at(home, CastleSide::KING_COL) {
            return;
        }

        for side in [CastleSide::King, CastleSide::Queen] {
            if !self.castling_rights.has(colour, side) {
                continue;
            }

            let rook_square = Square::at(home, side.rook_col());
            if self.piece_at(rook_square) != Some(Piece::new(Kind::Rook, colour)) {
                continue;
            }

            let path_clear = side
                .between_cols()
                .iter()
                .all(|&col| self.piece_at(Square::at(home, col)).is_none());

            if path_clear {
                moves.push(Square::at(home, side.king_target_col()));
            }
        }
    }

    /// Which side, if any, a king move from `from` to `to` castles toward.
    pub fn castling_side(&self, from: Square, to: Square) -> Option<CastleSide> {
        let king = self.piece_at(from)?;
        if king.kind != Kind::King
            || from != Square::at(king.colour.home_row(), CastleSide::KING_COL)
            || to.row() != from.row()
        {
            return None;
        }
        [CastleSide::King, CastleSide::Queen]
            .into_iter()
            .find(|side| side.king_target_col() == to.col())
    }
}
