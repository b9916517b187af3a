//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use super::generate_moves;
use crate::Board;

/// Counts the number of leaf nodes at the given depth.
///
/// This is the standard perft function used to validate move generators.
pub fn perft(board: &Board, depth: u32) -> u64 {
    let mut board = *board;
    count(&mut board, depth)
}

/// Node count below `board`; every move is taken back by restoring a copy.
fn count(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_moves(board);

    if depth == 1 {
        return moves.len() as u64;
    }

    let saved = *board;
    let mut nodes = 0u64;
    for &m in &moves {
        board.make_move(m);
        nodes += count(board, depth - 1);
        *board = saved;
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(board: &Board, depth: u32) -> Vec<(String, u64)> {
    let mut board = *board;
    let moves = generate_moves(&mut board);
    let mut results = Vec::with_capacity(moves.len());

    let saved = board;
    for &m in &moves {
        board.make_move(m);
        let nodes = if depth > 1 {
            count(&mut board, depth - 1)
        } else {
            1
        };
        board = saved;
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 0 1";
    const PROMOTIONS: &str = "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1";

    fn perft_fen(fen: &str, depth: u32) -> u64 {
        perft(&Board::from_fen(fen).unwrap(), depth)
    }

    // Starting position perft values (well-known and verified)
    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&Board::startpos(), 1), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&Board::startpos(), 2), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        assert_eq!(perft(&Board::startpos(), 3), 8902);
    }

    #[test]
    fn perft_startpos_depth_4() {
        assert_eq!(perft(&Board::startpos(), 4), 197281);
    }

    // Depth 5 and up are slow in debug builds
    #[test]
    #[ignore]
    fn perft_startpos_depth_5() {
        assert_eq!(perft(&Board::startpos(), 5), 4865609);
    }

    #[test]
    #[ignore]
    fn perft_startpos_depth_6() {
        assert_eq!(perft(&Board::startpos(), 6), 119060324);
    }

    // Kiwipete - a position with lots of special moves
    #[test]
    fn perft_kiwipete_depth_1() {
        assert_eq!(perft_fen(KIWIPETE, 1), 48);
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        assert_eq!(perft_fen(KIWIPETE, 2), 2039);
    }

    #[test]
    fn perft_kiwipete_depth_3() {
        assert_eq!(perft_fen(KIWIPETE, 3), 97862);
    }

    #[test]
    #[ignore]
    fn perft_kiwipete_depth_4() {
        assert_eq!(perft_fen(KIWIPETE, 4), 4085603);
    }

    // Position 3: Check evasion, en passant, promotion
    #[test]
    fn perft_position3() {
        assert_eq!(perft_fen(POSITION_3, 1), 14);
        assert_eq!(perft_fen(POSITION_3, 2), 191);
        assert_eq!(perft_fen(POSITION_3, 3), 2812);
        assert_eq!(perft_fen(POSITION_3, 4), 43238);
    }

    #[test]
    fn perft_position3_depth_5() {
        assert_eq!(perft_fen(POSITION_3, 5), 674624);
    }

    // Position 4: Lots of promotions and captures
    #[test]
    fn perft_position4() {
        assert_eq!(perft_fen(POSITION_4, 1), 6);
        assert_eq!(perft_fen(POSITION_4, 2), 264);
        assert_eq!(perft_fen(POSITION_4, 3), 9467);
    }

    #[test]
    fn perft_position5() {
        assert_eq!(perft_fen(POSITION_5, 1), 44);
        assert_eq!(perft_fen(POSITION_5, 2), 1486);
        assert_eq!(perft_fen(POSITION_5, 3), 62379);
    }

    #[test]
    fn perft_promotions() {
        assert_eq!(perft_fen(PROMOTIONS, 1), 24);
        assert_eq!(perft_fen(PROMOTIONS, 2), 496);
        assert_eq!(perft_fen(PROMOTIONS, 3), 9483);
    }

    #[test]
    fn perft_divide_works() {
        let results = perft_divide(&Board::startpos(), 1);
        assert_eq!(results.len(), 20);
        // Total should equal perft(1)
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn perft_divide_sums_to_perft() {
        let board = Board::from_fen(KIWIPETE).unwrap();
        let results = perft_divide(&board, 2);
        assert_eq!(results.len(), 48);
        assert!(results.windows(2).all(|w| w[0].0 <= w[1].0));
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 2039);
    }

    #[test]
    fn perft_leaves_board_untouched() {
        let board = Board::from_fen(KIWIPETE).unwrap();
        let before = board.to_fen();
        perft(&board, 2);
        assert_eq!(board.to_fen(), before);
    }
}
