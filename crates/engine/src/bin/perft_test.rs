use chess_rules::perft::{perft_detailed, PERFT_POSITIONS};
use chess_rules::Board;

// Usage: perft_test [max_depth]
fn main() {
    let max_depth: u32 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(3);

    let mut failures = 0;

    for case in PERFT_POSITIONS {
        println!("\n{}", case.name);
        println!("{}", "=".repeat(60));

        let (board, turn) = match Board::from_fen(case.fen) {
            Ok(position) => position,
            Err(e) => {
                println!("could not load position: {}", e);
                failures += 1;
                continue;
            }
        };

        for &(depth, expected) in case.expected_results.iter().filter(|(d, _)| *d <= max_depth) {
            let result = match perft_detailed(&board, turn, depth) {
                Ok(result) => result,
                Err(e) => {
                    println!("depth {}: engine error: {}", depth, e);
                    failures += 1;
                    continue;
                }
            };

            let verdict = if result.nodes == expected { "ok" } else { "MISMATCH" };
            if result.nodes != expected {
                failures += 1;
            }
            println!(
                "depth {}: {} nodes (expected {}) {} | captures {} ep {} castles {} promotions {} checks {} mates {} | {} ms, {} nps",
                depth,
                result.nodes,
                expected,
                verdict,
                result.captures,
                result.en_passant,
                result.castles,
                result.promotions,
                result.checks,
                result.checkmates,
                result.time_ms,
                result.nodes_per_second(),
            );
        }
    }

    if failures > 0 {
        println!("\n{} perft check(s) failed", failures);
        std::process::exit(1);
    }
    println!("\nall perft checks passed");
}
