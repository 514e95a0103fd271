use super::*;
use mcts::{EvalResult, Evaluator, RulesEngine, RulesError, TerminalStatus};
use move_codec::{decode, encode, Color, Move, Promotion, Square, POLICY_SIZE};

const PROMOTIONS_WHITE: &str = "4k3/1P6/8/8/8/8/6p1/4K3 w - - 0 1";
const PROMOTIONS_BLACK: &str = "4k3/1P6/8/8/8/8/6p1/4K3 b - - 0 1";
const CASTLING: &str = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
const EN_PASSANT: &str = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1";
const FOOLS_MATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
const STALEMATE: &str = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1";
const BARE_KINGS: &str = "8/8/4k3/8/8/4K3/8/8 w - - 0 1";

fn pos(fen: &str) -> ChessPosition {
    fen.parse().unwrap()
}

fn mv(uci: &str) -> Move {
    uci.parse().unwrap()
}

fn prior_of(result: &EvalResult, uci: &str) -> f32 {
    result.policy[encode(&mv(uci)).unwrap() as usize]
}

#[test]
fn test_starting_position() {
    let start = ChessPosition::starting();
    assert_eq!(ChessRules.legal_moves(&start).len(), 20);
    assert_eq!(ChessRules.terminal_status(&start), TerminalStatus::Ongoing);
    assert_eq!(start.side_to_move(), Color::White);
}

#[test]
fn test_fen_round_trip() {
    let start = ChessPosition::starting();
    let reparsed: ChessPosition = start.to_string().parse().unwrap();
    assert_eq!(start, reparsed);
}

#[test]
fn test_invalid_fen() {
    let err = "not a fen".parse::<ChessPosition>().unwrap_err();
    assert!(matches!(err, PositionError::InvalidFen { .. }));
}

#[test]
fn test_pawn_lookup() {
    use move_codec::BoardView;

    let start = ChessPosition::starting();
    let e2: Square = "e2".parse().unwrap();
    let e7: Square = "e7".parse().unwrap();
    let e1: Square = "e1".parse().unwrap();
    let e4: Square = "e4".parse().unwrap();

    assert_eq!(start.pawn_on(e2), Some(Color::White));
    assert_eq!(start.pawn_on(e7), Some(Color::Black));
    assert_eq!(start.pawn_on(e1), None);
    assert_eq!(start.pawn_on(e4), None);
}

#[test]
fn test_every_legal_move_survives_codec() {
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        PROMOTIONS_WHITE,
        PROMOTIONS_BLACK,
        CASTLING,
        EN_PASSANT,
    ] {
        let position = pos(fen);
        for legal in ChessRules.legal_moves(&position) {
            let index = encode(&legal).unwrap();
            assert!((index as usize) < POLICY_SIZE);
            let decoded = decode(index, &position).unwrap();
            assert_eq!(decoded, legal, "{} in {}", legal, fen);
        }
    }
}

#[test]
fn test_promotion_moves() {
    let white = ChessRules.legal_moves(&pos(PROMOTIONS_WHITE));
    assert!(white.contains(&mv("b7b8q")));
    assert!(white.contains(&mv("b7b8n")));
    assert!(!white.contains(&mv("b7b8")));

    let black = ChessRules.legal_moves(&pos(PROMOTIONS_BLACK));
    assert!(black.contains(&mv("g2g1r")));
    assert_eq!(mv("g2g1r").promotion, Some(Promotion::Rook));
}

#[test]
fn test_castling_and_en_passant_are_legal() {
    let castling = pos(CASTLING);
    assert!(ChessRules.is_legal(&castling, &mv("e1g1")));
    assert!(ChessRules.is_legal(&castling, &mv("e1c1")));

    let ep = pos(EN_PASSANT);
    assert!(ChessRules.is_legal(&ep, &mv("e5d6")));
    let after = ChessRules.apply(&ep, &mv("e5d6")).unwrap();
    assert_eq!(after.board().combined().popcnt(), 3);
}

#[test]
fn test_apply_does_not_mutate() {
    let start = ChessPosition::starting();
    let after = ChessRules.apply(&start, &mv("e2e4")).unwrap();
    assert_ne!(start, after);
    assert_eq!(start, ChessPosition::starting());
    assert_eq!(after.side_to_move(), Color::Black);
}

#[test]
fn test_apply_illegal_move() {
    let err = ChessRules
        .apply(&ChessPosition::starting(), &mv("e2e5"))
        .unwrap_err();
    assert!(matches!(err, RulesError::IllegalMove { .. }));
    assert!(!ChessRules.is_legal(&ChessPosition::starting(), &mv("e2e5")));
}

#[test]
fn test_terminal_statuses() {
    assert_eq!(
        ChessRules.terminal_status(&pos(FOOLS_MATE)),
        TerminalStatus::Checkmate
    );
    assert_eq!(
        ChessRules.terminal_status(&pos(STALEMATE)),
        TerminalStatus::Stalemate
    );
    assert_eq!(
        ChessRules.terminal_status(&pos(BARE_KINGS)),
        TerminalStatus::Draw
    );
    assert!(ChessRules.legal_moves(&pos(FOOLS_MATE)).is_empty());
}

#[test]
fn test_uniform_evaluator() {
    let result = UniformEvaluator::new()
        .evaluate(&ChessPosition::starting())
        .unwrap();
    assert!(result.validate().is_ok());
    assert_eq!(result.value, 0.0);

    let nonzero = result.policy.iter().filter(|&&p| p > 0.0).count();
    assert_eq!(nonzero, 20);
    assert!((prior_of(&result, "g1f3") - 0.05).abs() < 1e-6);
    let total: f32 = result.policy.iter().sum();
    assert!((total - 1.0).abs() < 1e-5);
}

#[test]
fn test_material_evaluator_value_follows_side_to_move() {
    let white_to_move = "4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1";
    let black_to_move = "4k3/8/8/3q4/4P3/8/8/4K3 b - - 0 1";
    let evaluator = MaterialEvaluator::default();

    let white = evaluator.evaluate(&pos(white_to_move)).unwrap();
    let black = evaluator.evaluate(&pos(black_to_move)).unwrap();
    assert!(white.validate().is_ok());
    assert!(white.value < 0.0);
    assert!(black.value > 0.0);
    assert!((white.value + black.value).abs() < 1e-6);
    assert!(
        (material_balance(pos(white_to_move).board(), chess::Color::White) + 8.0).abs() < 1e-6
    );
}

#[test]
fn test_material_evaluator_prefers_captures() {
    let result = MaterialEvaluator::default()
        .evaluate(&pos("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1"))
        .unwrap();
    let capture = prior_of(&result, "e4d5");
    let push = prior_of(&result, "e4e5");
    assert!(capture > push);
    assert!(push > 0.0);
    let total: f32 = result.policy.iter().sum();
    assert!((total - 1.0).abs() < 1e-5);
}

#[test]
fn test_material_evaluator_rejects_bad_scale() {
    let err = MaterialEvaluator::new(0.0)
        .evaluate(&ChessPosition::starting())
        .unwrap_err();
    assert!(matches!(err, mcts::EvaluatorError::ModelError(_)));
}
