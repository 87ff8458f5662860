pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod logger;
pub mod perft;
pub mod snapshot;
pub mod types;

pub use board::{Board, MoveOutcome};
pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use game::{Game, GameState};
pub use logger::GameLogger;
pub use snapshot::BoardSnapshot;
pub use types::*;
