use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Colour {
    White,
    Black,
}

impl Colour {
    pub const ALL: [Colour; 2] = [Colour::White, Colour::Black];

    pub fn opposite(self) -> Self {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }

    /// Index for per-colour arrays: White=0, Black=1.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Row holding this colour's king and rooks at the start of a game.
    pub fn home_row(self) -> u8 {
        match self {
            Colour::White => 0,
            Colour::Black => 7,
        }
    }

    pub fn pawn_row(self) -> u8 {
        match self {
            Colour::White => 1,
            Colour::Black => 6,
        }
    }

    /// Row a pawn of this colour promotes on.
    pub fn promotion_row(self) -> u8 {
        self.opposite().home_row()
    }

    /// Row delta of a pawn advance.
    pub fn forward(self) -> i8 {
        match self {
            Colour::White => 1,
            Colour::Black => -1,
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colour::White => write!(f, "White"),
            Colour::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Kind {
    /// Kinds a pawn may become.
    pub const PROMOTIONS: [Kind; 4] = [Kind::Queen, Kind::Rook, Kind::Bishop, Kind::Knight];

    pub fn is_promotion_choice(self) -> bool {
        Self::PROMOTIONS.contains(&self)
    }

    pub fn letter(self) -> char {
        match self {
            Kind::Pawn => 'p',
            Kind::Knight => 'n',
            Kind::Bishop => 'b',
            Kind::Rook => 'r',
            Kind::Queen => 'q',
            Kind::King => 'k',
        }
    }

    pub fn from_letter(letter: char) -> Option<Kind> {
        match letter.to_ascii_lowercase() {
            'p' => Some(Kind::Pawn),
            'n' => Some(Kind::Knight),
            'b' => Some(Kind::Bishop),
            'r' => Some(Kind::Rook),
            'q' => Some(Kind::Queen),
            'k' => Some(Kind::King),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: Kind,
    pub colour: Colour,
}

impl Piece {
    pub const fn new(kind: Kind, colour: Colour) -> Self {
        Self { kind, colour }
    }

    pub fn is(self, kind: Kind, colour: Colour) -> bool {
        self.kind == kind && self.colour == colour
    }

    /// Upper-case for White, lower-case for Black.
    pub fn symbol(self) -> char {
        match self.colour {
            Colour::White => self.kind.letter().to_ascii_uppercase(),
            Colour::Black => self.kind.letter(),
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Piece> {
        let kind = Kind::from_letter(symbol)?;
        let colour = if symbol.is_ascii_uppercase() {
            Colour::White
        } else {
            Colour::Black
        };
        Some(Piece::new(kind, colour))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A board coordinate. Row 0 is White's back rank, column 0 the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub fn new(row: usize, col: usize) -> Result<Self> {
        if row < 8 && col < 8 {
            Ok(Self::at(row as u8, col as u8))
        } else {
            Err(EngineError::OutOfBounds { row, col })
        }
    }

    /// Caller guarantees `row < 8 && col < 8`.
    pub(crate) const fn at(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// The square `(dr, dc)` away, or `None` past the edge.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::at(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Parse a coordinate name such as `e4`.
    pub fn parse(name: &str) -> Option<Square> {
        let mut chars = name.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Some(Square::at(rank as u8 - b'1', file as u8 - b'a'))
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square::at(row, col)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Kind>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn new_promotion(from: Square, to: Square, kind: Kind) -> Self {
        Self {
            from,
            to,
            promotion: Some(kind),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Check(Colour),     // Which colour is in check
    Checkmate(Colour), // Which colour is checkmated (other colour wins)
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate(_) | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Check(colour) => write!(f, "{} is in check", colour),
            GameStatus::Checkmate(colour) => write!(f, "{} is checkmated", colour),
            GameStatus::Stalemate => write!(f, "stalemate"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    /// Column the king starts on.
    pub const KING_COL: u8 = 4;

    pub fn rook_col(self) -> u8 {
        match self {
            CastleSide::King => 7,
            CastleSide::Queen => 0,
        }
    }

    pub fn king_target_col(self) -> u8 {
        match self {
            CastleSide::King => 6,
            CastleSide::Queen => 2,
        }
    }

    /// The rook lands on the square the king crosses.
    pub fn rook_target_col(self) -> u8 {
        match self {
            CastleSide::King => 5,
            CastleSide::Queen => 3,
        }
    }

    /// Columns strictly between king and rook, which must be empty.
    pub fn between_cols(self) -> &'static [u8] {
        match self {
            CastleSide::King => &[5, 6],
            CastleSide::Queen => &[1, 2, 3],
        }
    }

    pub fn from_rook_col(col: u8) -> Option<CastleSide> {
        match col {
            7 => Some(CastleSide::King),
            0 => Some(CastleSide::Queen),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SideRights {
    king_side: bool,
    queen_side: bool,
}

/// Castling availability per colour. Rights only ever go from `true` to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingRights {
    sides: [SideRights; 2],
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        sides: [SideRights {
            king_side: true,
            queen_side: true,
        }; 2],
    };

    pub const NONE: CastlingRights = CastlingRights {
        sides: [SideRights {
            king_side: false,
            queen_side: false,
        }; 2],
    };

    pub fn has(&self, colour: Colour, side: CastleSide) -> bool {
        let rights = self.sides[colour.index()];
        match side {
            CastleSide::King => rights.king_side,
            CastleSide::Queen => rights.queen_side,
        }
    }

    pub fn revoke(&mut self, colour: Colour, side: CastleSide) {
        let rights = &mut self.sides[colour.index()];
        match side {
            CastleSide::King => rights.king_side = false,
            CastleSide::Queen => rights.queen_side = false,
        }
    }

    pub fn revoke_all(&mut self, colour: Colour) {
        self.revoke(colour, CastleSide::King);
        self.revoke(colour, CastleSide::Queen);
    }

    /// Revoke whichever right depends on a rook standing on `square`.
    pub fn revoke_rook_square(&mut self, square: Square) {
        for colour in Colour::ALL {
            if square.row() != colour.home_row() {
                continue;
            }
            if let Some(side) = CastleSide::from_rook_col(square.col()) {
                self.revoke(colour, side);
            }
        }
    }

    pub(crate) fn grant(&mut self, colour: Colour, side: CastleSide) {
        let rights = &mut self.sides[colour.index()];
        match side {
            CastleSide::King => rights.king_side = true,
            CastleSide::Queen => rights.queen_side = true,
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::ALL
    }
}

/// En passant state; lives for exactly one ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnPassant {
    /// Square the pawn skipped over.
    pub target: Square,
    /// Square the capturable pawn stands on.
    pub pawn: Square,
}
