use chess_rules::perft::{perft, perft_detailed, PERFT_POSITIONS};
use chess_rules::{Board, Colour};

/// Depth limit per position that keeps an unoptimised test build quick.
const MAX_TEST_DEPTH: [u32; 6] = [3, 2, 3, 2, 2, 2];

#[test]
fn standard_positions_match_known_node_counts() {
    for (case, &max_depth) in PERFT_POSITIONS.iter().zip(MAX_TEST_DEPTH.iter()) {
        let (board, turn) = Board::from_fen(case.fen).unwrap();
        for &(depth, expected) in case.expected_results.iter().filter(|(d, _)| *d <= max_depth) {
            let nodes = perft(&board, turn, depth).unwrap();
            assert_eq!(nodes, expected, "{} at depth {}", case.name, depth);
        }
    }
}

#[test]
fn start_position_depth_three_breakdown() {
    let result = perft_detailed(&Board::new(), Colour::White, 3).unwrap();
    assert_eq!(result.nodes, 8_902);
    assert_eq!(result.captures, 34);
    assert_eq!(result.en_passant, 0);
    assert_eq!(result.castles, 0);
    assert_eq!(result.promotions, 0);
    assert_eq!(result.checks, 12);
    assert_eq!(result.checkmates, 0);
}

#[test]
fn kiwipete_depth_two_breakdown() {
    let (board, turn) = Board::from_fen(PERFT_POSITIONS[1].fen).unwrap();
    let result = perft_detailed(&board, turn, 2).unwrap();
    assert_eq!(result.nodes, 2_039);
    assert_eq!(result.captures, 351);
    assert_eq!(result.en_passant, 1);
    assert_eq!(result.castles, 91);
    assert_eq!(result.checks, 3);
}

#[test]
fn position_four_promotions() {
    // Depth 2 from position 4: 264 nodes, 48 of them promotions.
    let (board, turn) = Board::from_fen(PERFT_POSITIONS[3].fen).unwrap();
    let result = perft_detailed(&board, turn, 2).unwrap();
    assert_eq!(result.nodes, 264);
    assert_eq!(result.promotions, 48);
    assert_eq!(result.castles, 6);
    assert_eq!(result.checks, 10);
}
