use std::collections::HashSet;
use std::path::PathBuf;

use crate::board::Board;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::logger::GameLogger;
use crate::snapshot::BoardSnapshot;
use crate::types::*;

/// Everything about a game that is not piece placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub turn: Colour,
    pub selected: Option<Square>,
    /// Pieces White has captured.
    pub captured_white: Vec<Piece>,
    /// Pieces Black has captured.
    pub captured_black: Vec<Piece>,
    pub status: GameStatus,
}

impl GameState {
    fn new(turn: Colour, status: GameStatus) -> Self {
        Self {
            turn,
            selected: None,
            captured_white: Vec::new(),
            captured_black: Vec::new(),
            status,
        }
    }

    pub fn captured_by(&self, colour: Colour) -> &[Piece] {
        match colour {
            Colour::White => &self.captured_white,
            Colour::Black => &self.captured_black,
        }
    }

    fn captures_mut(&mut self, colour: Colour) -> &mut Vec<Piece> {
        match colour {
            Colour::White => &mut self.captured_white,
            Colour::Black => &mut self.captured_black,
        }
    }
}

/// One game: the board, the turn/selection state machine and its log.
///
/// Every request either completes or returns an error with the game left
/// exactly as it was.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    state: GameState,
    highlighted: HashSet<Square>,
    pending_promotion: Option<Square>,
    config: EngineConfig,
    logger: GameLogger,
}

impl Game {
    pub fn new(config: EngineConfig) -> Self {
        let logger = GameLogger::new(&config);
        Self {
            board: Board::new(),
            state: GameState::new(Colour::White, GameStatus::InProgress),
            highlighted: HashSet::new(),
            pending_promotion: None,
            config,
            logger,
        }
    }

    /// Start from an arbitrary position; the status is computed for the
    /// side to move.
    pub fn from_fen(config: EngineConfig, fen: &str) -> Result<Self> {
        let (board, turn) = Board::from_fen(fen)?;
        let status = board.status_for(turn)?;

        let mut logger = GameLogger::new(&config);
        logger.log(&format!("Position: {}", fen));
        logger.log_status(status);

        Ok(Self {
            board,
            state: GameState::new(turn, status),
            highlighted: HashSet::new(),
            pending_promotion: None,
            config,
            logger,
        })
    }

    /// Discard the current game and set up the starting position.
    pub fn start(&mut self) -> BoardSnapshot {
        *self = Self::new(self.config.clone());
        self.snapshot()
    }

    /// Advance the selection state machine by one click.
    ///
    /// Returns the board and the squares to highlight, which are empty
    /// unless a piece is selected.
    pub fn handle_click(&mut self, (row, col): (usize, usize)) -> Result<(BoardSnapshot, HashSet<Square>)> {
        let square = Square::new(row, col)?;
        self.ensure_accepting_moves()?;

        match self.state.selected {
            Some(from) if self.highlighted.contains(&square) => self.commit_move(from, square)?,
            _ => match self.board.piece_at(square) {
                Some(piece) if piece.colour == self.state.turn => {
                    let destinations = self.board.legal_destinations(square);
                    self.logger.log_selection(square, piece, destinations.len());
                    self.state.selected = Some(square);
                    self.highlighted = destinations;
                }
                _ => self.clear_selection(),
            },
        }

        Ok((self.snapshot(), self.highlighted.clone()))
    }

    /// Apply `from -> to` directly, without going through a selection.
    pub fn request_move(&mut self, from: Square, to: Square) -> Result<BoardSnapshot> {
        self.ensure_accepting_moves()?;

        if !self.legal_destinations(from).contains(&to) {
            self.logger.log_rejected(&format!("illegal move {}-{}", from, to));
            return Err(EngineError::InvalidSelection { from, to });
        }

        self.commit_move(from, to)?;
        Ok(self.snapshot())
    }

    /// Supply the piece kind for the pawn waiting on its last row.
    pub fn promote(&mut self, kind: Kind) -> Result<BoardSnapshot> {
        let square = self.pending_promotion.ok_or(EngineError::NoPendingPromotion)?;

        let mut board = self.board.clone();
        let promoted = board.promote(square, kind)?;
        let status = board.status_for(self.state.turn.opposite())?;

        self.board = board;
        self.pending_promotion = None;
        self.logger.log_promotion(square, promoted.colour, kind);
        self.advance_turn(status);
        Ok(self.snapshot())
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from(&self.board)
    }

    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    pub fn logger(&self) -> &GameLogger {
        &self.logger
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Legal destinations for the piece on `square`. Empty for the side not
    /// to move and while a promotion is pending.
    pub fn legal_destinations(&self, square: Square) -> HashSet<Square> {
        if self.pending_promotion.is_some() {
            return HashSet::new();
        }
        match self.board.piece_at(square) {
            Some(piece) if piece.colour == self.state.turn => self.board.legal_destinations(square),
            _ => HashSet::new(),
        }
    }

    /// Write the game log into the configured directory.
    pub fn save_log(&mut self, reason: &str) -> Result<PathBuf> {
        let dir = self.config.log_dir.clone();
        self.logger.save_to_file(&dir, reason)
    }

    fn ensure_accepting_moves(&mut self) -> Result<()> {
        if self.state.status.is_over() {
            self.logger.log_rejected("game is over");
            return Err(EngineError::GameOver(self.state.status));
        }
        if let Some(square) = self.pending_promotion {
            self.logger.log_rejected("promotion pending");
            return Err(EngineError::PromotionPending(square));
        }
        Ok(())
    }

    /// Apply a move already known to be legal. Everything is computed on a
    /// copy first so a failure leaves the game untouched.
    fn commit_move(&mut self, from: Square, to: Square) -> Result<()> {
        let mover = self.state.turn;

        let mut board = self.board.clone();
        let outcome = board.relocate(from, to)?;
        let status = if outcome.promotion_pending {
            None
        } else {
            Some(board.status_for(mover.opposite())?)
        };

        self.board = board;
        if let Some(captured) = outcome.captured {
            self.state.captures_mut(mover).push(captured);
        }
        self.clear_selection();
        self.logger.log_move(from, to, &outcome);

        match status {
            Some(status) => self.advance_turn(status),
            None => self.pending_promotion = Some(to),
        }
        Ok(())
    }

    fn advance_turn(&mut self, status: GameStatus) {
        self.state.turn = self.state.turn.opposite();
        self.state.status = status;
        self.logger.log_status(status);
    }

    fn clear_selection(&mut self) {
        self.state.selected = None;
        self.highlighted.clear();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::parse(name).unwrap()
    }

    fn click(game: &mut Game, name: &str) -> HashSet<Square> {
        let square = sq(name);
        let (_, highlighted) = game
            .handle_click((square.row() as usize, square.col() as usize))
            .unwrap();
        highlighted
    }

    #[test]
    fn selecting_own_piece_highlights_its_moves() {
        let mut game = Game::new(EngineConfig::quiet());
        let highlighted = click(&mut game, "g1");
        assert_eq!(highlighted, [sq("f3"), sq("h3")].into_iter().collect::<HashSet<_>>());
        assert_eq!(game.state().selected, Some(sq("g1")));
    }

    #[test]
    fn clicking_opponent_piece_while_idle_does_nothing() {
        let mut game = Game::new(EngineConfig::quiet());
        assert!(click(&mut game, "e7").is_empty());
        assert_eq!(game.state().selected, None);
        assert_eq!(game.board(), &Board::new());
    }

    #[test]
    fn clicking_elsewhere_deselects_without_moving() {
        let mut game = Game::new(EngineConfig::quiet());
        click(&mut game, "e2");
        assert!(click(&mut game, "e5").is_empty());
        assert_eq!(game.state().selected, None);
        assert_eq!(game.state().turn, Colour::White);
        assert_eq!(game.board(), &Board::new());
    }

    #[test]
    fn reselecting_switches_the_highlight() {
        let mut game = Game::new(EngineConfig::quiet());
        click(&mut game, "e2");
        let highlighted = click(&mut game, "b1");
        assert_eq!(highlighted, [sq("a3"), sq("c3")].into_iter().collect::<HashSet<_>>());
        assert_eq!(game.state().selected, Some(sq("b1")));
    }

    #[test]
    fn completing_a_move_flips_the_turn() {
        let mut game = Game::new(EngineConfig::quiet());
        click(&mut game, "e2");
        let highlighted = click(&mut game, "e4");
        assert!(highlighted.is_empty());
        assert_eq!(game.state().turn, Colour::Black);
        assert_eq!(game.state().selected, None);
        assert_eq!(game.board().piece_at(sq("e4")), Some(Piece::new(Kind::Pawn, Colour::White)));
    }

    #[test]
    fn out_of_bounds_click_is_rejected() {
        let mut game = Game::new(EngineConfig::quiet());
        click(&mut game, "e2");
        assert!(matches!(
            game.handle_click((8, 3)),
            Err(EngineError::OutOfBounds { row: 8, col: 3 })
        ));
        assert_eq!(game.state().selected, Some(sq("e2")));
    }

    #[test]
    fn capture_goes_to_the_movers_list() {
        let mut game = Game::new(EngineConfig::quiet());
        game.request_move(sq("e2"), sq("e4")).unwrap();
        game.request_move(sq("d7"), sq("d5")).unwrap();
        game.request_move(sq("e4"), sq("d5")).unwrap();
        assert_eq!(game.state().captured_white, vec![Piece::new(Kind::Pawn, Colour::Black)]);
        assert!(game.state().captured_black.is_empty());
    }

    #[test]
    fn illegal_request_leaves_state_unchanged() {
        let mut game = Game::new(EngineConfig::quiet());
        let before = game.state().clone();
        assert!(matches!(
            game.request_move(sq("e2"), sq("e5")),
            Err(EngineError::InvalidSelection { .. })
        ));
        assert!(game.request_move(sq("e7"), sq("e5")).is_err());
        assert_eq!(game.state(), &before);
        assert_eq!(game.board(), &Board::new());
    }

    #[test]
    fn start_discards_the_previous_game() {
        let mut game = Game::new(EngineConfig::quiet());
        game.request_move(sq("e2"), sq("e4")).unwrap();
        let snapshot = game.start();
        assert_eq!(snapshot, BoardSnapshot::from(&Board::new()));
        assert_eq!(game.state().turn, Colour::White);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn moves_are_logged() {
        let mut game = Game::new(EngineConfig::default());
        game.request_move(sq("g1"), sq("f3")).unwrap();
        assert!(game.logger().log_buffer.contains("1. White N g1-f3"));
    }
}
