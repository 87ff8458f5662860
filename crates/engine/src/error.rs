use crate::types::{GameStatus, Kind, Square};

/// Every way a request to the engine can be rejected.
///
/// A rejected request never leaves a partial mutation behind.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("square ({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("no legal move from {from} to {to}")]
    InvalidSelection { from: Square, to: Square },

    #[error("no promotion is pending")]
    NoPendingPromotion,

    #[error("pawn on {0} is waiting for a promotion choice")]
    PromotionPending(Square),

    #[error("a pawn cannot promote to {0:?}")]
    InvalidPromotion(Kind),

    #[error("game is over: {0}")]
    GameOver(GameStatus),

    #[error("board invariant violated: {0}")]
    InvariantViolation(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("failed to write game log: {0}")]
    LogWrite(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
