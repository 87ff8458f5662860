use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::board::MoveOutcome;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::types::{CastleSide, Colour, GameStatus, Kind, Piece, Square};

/// Buffered, human-readable record of one game.
#[derive(Debug, Clone)]
pub struct GameLogger {
    pub log_buffer: String,
    pub enabled: bool,
    pub advanced_logging: bool,
    ply_count: u32,
}

impl GameLogger {
    pub fn new(config: &EngineConfig) -> Self {
        let mut logger = Self {
            log_buffer: String::with_capacity(16 * 1024),
            enabled: config.logging,
            advanced_logging: config.advanced_logging,
            ply_count: 0,
        };

        logger.log("=== Chess Game Log Started ===");
        logger.log(&format!("Date: {}", chrono::Local::now().format("%m/%d/%Y %H:%M:%S")));
        logger
    }

    pub fn should_log_advanced(&self) -> bool {
        self.enabled && self.advanced_logging
    }

    pub fn log(&mut self, message: &str) {
        if self.enabled {
            self.log_buffer.push_str(message);
            self.log_buffer.push('\n');
        }
    }

    pub fn ply_count(&self) -> u32 {
        self.ply_count
    }

    pub fn log_selection(&mut self, square: Square, piece: Piece, destinations: usize) {
        if self.should_log_advanced() {
            self.log(&format!("  selected {} on {} ({} legal destinations)", piece, square, destinations));
        }
    }

    pub fn log_rejected(&mut self, reason: &str) {
        if self.should_log_advanced() {
            self.log(&format!("  rejected: {}", reason));
        }
    }

    pub fn log_move(&mut self, from: Square, to: Square, outcome: &MoveOutcome) {
        self.ply_count += 1;
        let mut line = format!("{}. {} {} {}-{}", self.ply_count, outcome.piece.colour, outcome.piece, from, to);
        if let Some(captured) = outcome.captured {
            line.push_str(&format!(" takes {}", captured));
        }
        if outcome.en_passant {
            line.push_str(" (en passant)");
        }
        match outcome.castled {
            Some(CastleSide::King) => line.push_str(" (castles king side)"),
            Some(CastleSide::Queen) => line.push_str(" (castles queen side)"),
            None => {}
        }
        if outcome.promotion_pending {
            line.push_str(" (awaiting promotion)");
        }
        self.log(&line);
    }

    pub fn log_promotion(&mut self, square: Square, colour: Colour, kind: Kind) {
        self.log(&format!("   {} pawn on {} promotes to {:?}", colour, square, kind));
    }

    pub fn log_status(&mut self, status: GameStatus) {
        match status {
            GameStatus::InProgress => {}
            GameStatus::Check(_) => self.log(&format!("   {}", status)),
            GameStatus::Checkmate(loser) => {
                self.log(&format!("   Checkmate! {} wins", loser.opposite()));
            }
            GameStatus::Stalemate => self.log("   Stalemate"),
        }
    }

    /// Write the buffer to `<dir>/<timestamp>.txt` and return the path.
    pub fn save_to_file(&mut self, dir: &Path, reason: &str) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;

        let now = chrono::Local::now();
        let path = dir.join(format!("{}.txt", now.format("%m_%d_%Y_%H_%M_%S")));

        self.log(&format!("Game ended: {} - saving log", reason));

        let mut file = File::create(&path)?;
        file.write_all(self.log_buffer.as_bytes())?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(piece: Piece) -> MoveOutcome {
        MoveOutcome {
            piece,
            captured: None,
            castled: None,
            en_passant: false,
            promotion_pending: false,
        }
    }

    #[test]
    fn disabled_logger_stays_empty() {
        let logger = GameLogger::new(&EngineConfig::quiet());
        assert!(logger.log_buffer.is_empty());
    }

    #[test]
    fn moves_are_numbered() {
        let mut logger = GameLogger::new(&EngineConfig::default());
        let e2 = Square::parse("e2").unwrap();
        let e4 = Square::parse("e4").unwrap();
        logger.log_move(e2, e4, &outcome(Piece::new(Kind::Pawn, Colour::White)));
        assert_eq!(logger.ply_count(), 1);
        assert!(logger.log_buffer.contains("1. White P e2-e4"));
    }

    #[test]
    fn selections_need_advanced_mode() {
        let square = Square::parse("g1").unwrap();
        let knight = Piece::new(Kind::Knight, Colour::White);

        let mut basic = GameLogger::new(&EngineConfig::default());
        basic.log_selection(square, knight, 2);
        assert!(!basic.log_buffer.contains("selected"));

        let mut advanced = GameLogger::new(&EngineConfig::default().with_advanced_logging(true));
        advanced.log_selection(square, knight, 2);
        assert!(advanced.log_buffer.contains("selected N on g1"));
    }

    #[test]
    fn save_writes_the_buffer() {
        let dir = std::env::temp_dir().join(format!("chess_rules_log_{}", std::process::id()));
        let mut logger = GameLogger::new(&EngineConfig::default());
        logger.log_status(GameStatus::Stalemate);

        let path = logger.save_to_file(&dir, "test").unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Stalemate"));
        assert!(written.contains("Game ended: test"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
