use std::time::Instant;

use crate::board::Board;
use crate::error::Result;
use crate::types::{Colour, GameStatus, Move};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerftResult {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
    pub time_ms: u128,
}

impl PerftResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes_per_second(&self) -> u64 {
        if self.time_ms == 0 {
            return 0;
        }
        (self.nodes * 1000) / (self.time_ms as u64)
    }

    fn accumulate(&mut self, other: &PerftResult) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.en_passant += other.en_passant;
        self.castles += other.castles;
        self.promotions += other.promotions;
        self.checks += other.checks;
        self.checkmates += other.checkmates;
    }
}

#[derive(Debug)]
pub struct PerftTestCase {
    pub name: &'static str,
    pub fen: &'static str,
    pub expected_results: &'static [(u32, u64)], // (depth, expected_nodes)
}

// Standard perft test positions
pub const PERFT_POSITIONS: &[PerftTestCase] = &[
    PerftTestCase {
        name: "Starting Position",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        expected_results: &[(1, 20), (2, 400), (3, 8_902), (4, 197_281), (5, 4_865_609)],
    },
    PerftTestCase {
        name: "Kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_results: &[(1, 48), (2, 2_039), (3, 97_862), (4, 4_085_603)],
    },
    PerftTestCase {
        name: "Position 3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_results: &[(1, 14), (2, 191), (3, 2_812), (4, 43_238), (5, 674_624)],
    },
    PerftTestCase {
        name: "Position 4",
        fen: "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        expected_results: &[(1, 6), (2, 264), (3, 9_467), (4, 422_333)],
    },
    PerftTestCase {
        name: "Position 5",
        fen: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        expected_results: &[(1, 44), (2, 1_486), (3, 62_379), (4, 2_103_487)],
    },
    PerftTestCase {
        name: "Position 6",
        fen: "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        expected_results: &[(1, 46), (2, 2_079), (3, 89_890)],
    },
];

/// Main perft function - counts all legal move paths to a given depth
pub fn perft(board: &Board, turn: Colour, depth: u32) -> Result<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = board.all_legal_moves(turn);
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0;
    for mv in moves {
        let mut child = board.clone();
        child.make_move(mv)?;
        nodes += perft(&child, turn.opposite(), depth - 1)?;
    }

    Ok(nodes)
}

/// Detailed perft that tracks the kinds of move made on the last ply
pub fn perft_detailed(board: &Board, turn: Colour, depth: u32) -> Result<PerftResult> {
    let start_time = Instant::now();
    let mut result = perft_detailed_inner(board, turn, depth)?;
    result.time_ms = start_time.elapsed().as_millis();
    Ok(result)
}

fn perft_detailed_inner(board: &Board, turn: Colour, depth: u32) -> Result<PerftResult> {
    let mut result = PerftResult::new();

    if depth == 0 {
        result.nodes = 1;
        return Ok(result);
    }

    for mv in board.all_legal_moves(turn) {
        let mut child = board.clone();
        let outcome = child.make_move(mv)?;

        if depth == 1 {
            result.nodes += 1;
            if outcome.captured.is_some() {
                result.captures += 1;
            }
            if outcome.en_passant {
                result.en_passant += 1;
            }
            if outcome.castled.is_some() {
                result.castles += 1;
            }
            if mv.promotion.is_some() {
                result.promotions += 1;
            }
            match child.status_for(turn.opposite())? {
                GameStatus::Check(_) => result.checks += 1,
                GameStatus::Checkmate(_) => {
                    result.checks += 1;
                    result.checkmates += 1;
                }
                _ => {}
            }
        } else {
            let sub_result = perft_detailed_inner(&child, turn.opposite(), depth - 1)?;
            result.accumulate(&sub_result);
        }
    }

    Ok(result)
}

/// Divide perft - shows per-move breakdown for debugging
pub fn perft_divide(board: &Board, turn: Colour, depth: u32) -> Result<Vec<(Move, u64)>> {
    let mut results = Vec::new();

    for mv in board.all_legal_moves(turn) {
        let mut child = board.clone();
        child.make_move(mv)?;
        let nodes = if depth > 1 {
            perft(&child, turn.opposite(), depth - 1)?
        } else {
            1
        };
        results.push((mv, nodes));
    }

    results.sort_by_key(|(mv, _)| mv.to_string());
    Ok(results)
}
