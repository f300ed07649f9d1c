//! Perft node counting over make/revert.

use crate::chess_errors::ChessResult;
use crate::game_state::{chess_types::Move, game_state::GameState};
use crate::move_generation::legal_move_apply::{make_move, revert_move};
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::move_descriptions::{move_kind, move_to, MoveKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub double_checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.double_checks += rhs.double_checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Leaf count only; the fast path used by tests and the benchmark.
pub fn perft(game_state: &mut GameState, depth: u8) -> ChessResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = generate_legal_moves(game_state);
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0;
    for mv in moves {
        make_move(game_state, mv);
        nodes += perft(game_state, depth - 1)?;
        revert_move(game_state)?;
    }
    Ok(nodes)
}

/// Leaf counts per root move, in generation order.
pub fn perft_divide(game_state: &mut GameState, depth: u8) -> ChessResult<Vec<(Move, u64)>> {
    let mut out = Vec::new();
    if depth == 0 {
        return Ok(out);
    }

    for mv in generate_legal_moves(game_state) {
        make_move(game_state, mv);
        let nodes = perft(game_state, depth - 1)?;
        revert_move(game_state)?;
        out.push((mv, nodes));
    }
    Ok(out)
}

/// Leaf count plus per-leaf move statistics.
pub fn perft_detailed(game_state: &mut GameState, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in generate_legal_moves(game_state) {
        let is_capture = game_state.piece_on(move_to(mv)).is_some();
        make_move(game_state, mv);

        if depth == 1 {
            let kind = move_kind(mv);
            total.nodes += 1;
            total.captures += u64::from(is_capture || kind == MoveKind::EnPassant);
            total.en_passant += u64::from(kind == MoveKind::EnPassant);
            total.castles += u64::from(kind == MoveKind::Castle);
            total.promotions += u64::from(kind == MoveKind::Promotion);
            total.checks += u64::from(game_state.in_check);
            total.double_checks += u64::from(game_state.in_double_check);
            total.checkmates +=
                u64::from(game_state.in_check && generate_legal_moves(game_state).is_empty());
        } else {
            total.merge(perft_detailed(game_state, depth - 1)?);
        }

        revert_move(game_state)?;
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -";
    const ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -";
    const PROMOTIONS: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const TALKCHESS: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn count(fen: &str, depth: u8) -> u64 {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let before = game.clone();
        let nodes = perft(&mut game, depth).expect("perft should run");
        assert_eq!(game, before);
        nodes
    }

    #[test]
    fn startpos_shallow() {
        assert_eq!(count(STARTING_POSITION_FEN, 1), 20);
        assert_eq!(count(STARTING_POSITION_FEN, 2), 400);
        assert_eq!(count(STARTING_POSITION_FEN, 3), 8_902);
    }

    #[test]
    fn startpos_depth_four() {
        assert_eq!(count(STARTING_POSITION_FEN, 4), 197_281);
    }

    #[test]
    #[ignore = "slow in unoptimised builds; asserted by benches/perft_criterion.rs"]
    fn startpos_depth_five() {
        assert_eq!(count(STARTING_POSITION_FEN, 5), 4_865_609);
    }

    #[test]
    fn kiwipete_shallow() {
        assert_eq!(count(KIWIPETE, 1), 48);
        assert_eq!(count(KIWIPETE, 2), 2_039);
        assert_eq!(count(KIWIPETE, 3), 97_862);
    }

    #[test]
    #[ignore = "slow in unoptimised builds; asserted by benches/perft_criterion.rs"]
    fn kiwipete_depth_four() {
        assert_eq!(count(KIWIPETE, 4), 4_085_603);
    }

    #[test]
    fn other_reference_positions() {
        assert_eq!(count(ENDGAME, 1), 14);
        assert_eq!(count(ENDGAME, 2), 191);
        assert_eq!(count(ENDGAME, 3), 2_812);
        assert_eq!(count(ENDGAME, 4), 43_238);
        assert_eq!(count(PROMOTIONS, 1), 6);
        assert_eq!(count(PROMOTIONS, 2), 264);
        assert_eq!(count(PROMOTIONS, 3), 9_467);
        assert_eq!(count(TALKCHESS, 1), 44);
        assert_eq!(count(TALKCHESS, 2), 1_486);
        assert_eq!(count(TALKCHESS, 3), 62_379);
    }

    #[test]
    fn kiwipete_leaf_statistics() {
        let mut game = GameState::from_fen(KIWIPETE).expect("FEN should parse");
        let counts = perft_detailed(&mut game, 2).expect("perft should run");
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 2_039,
                captures: 351,
                en_passant: 1,
                castles: 91,
                promotions: 0,
                checks: 3,
                double_checks: 0,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut game = GameState::from_fen(KIWIPETE).expect("FEN should parse");
        let divide = perft_divide(&mut game, 2).expect("divide should run");
        assert_eq!(divide.len(), 48);
        assert_eq!(divide.iter().map(|(_, nodes)| nodes).sum::<u64>(), 2_039);
    }
}
