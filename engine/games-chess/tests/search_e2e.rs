//! End-to-end search scenarios on real chess positions.

use games_chess::{ChessPosition, ChessRules, MaterialEvaluator, UniformEvaluator};
use mcts::{
    choose_move, policy_move, run_mcts, DecisionSource, MctsConfig, MctsSearch, RulesEngine,
    SearchError, TerminalStatus,
};
use move_codec::{decode, Move};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

const BACK_RANK_MATE: &str = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";
const ONE_REPLY: &str = "R6k/8/5K2/8/8/8/8/8 b - - 0 1";
const CHECKMATED: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
const STALEMATED: &str = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1";
const FORCED_BARE_KINGS: &str = "8/8/8/8/8/8/1R6/k5K1 b - - 0 1";

fn pos(fen: &str) -> ChessPosition {
    fen.parse().unwrap()
}

fn mv(uci: &str) -> Move {
    uci.parse().unwrap()
}

#[test]
fn test_start_position_search() {
    let start = ChessPosition::starting();
    let config = MctsConfig::for_testing();

    let mut search = MctsSearch::new(&ChessRules, &UniformEvaluator, config, start).unwrap();
    let result = search.run().unwrap();

    assert_eq!(result.simulations, 50);
    assert!(!result.distribution.is_empty());
    assert!(result.distribution.len() <= 10);
    assert!((result.distribution.total() - 1.0).abs() < 1e-5);

    for entry in result.distribution.iter() {
        assert!(ChessRules.is_legal(&start, &entry.mv));
        assert_eq!(decode(entry.move_index, &start).unwrap(), entry.mv);
    }

    // Every child of every expanded node is a legal move from its parent
    let tree = search.tree();
    for node in tree.arena() {
        for &(_, child_id) in &node.children {
            let child = tree.get(child_id);
            assert!(ChessRules.is_legal(&node.position, &child.mv.unwrap()));
        }
    }
}

#[test]
fn test_search_is_reproducible() {
    let config = MctsConfig::for_testing().with_simulations(80);
    let a = run_mcts(
        &ChessRules,
        &MaterialEvaluator::default(),
        config.clone(),
        ChessPosition::starting(),
    )
    .unwrap();
    let b = run_mcts(
        &ChessRules,
        &MaterialEvaluator::default(),
        config,
        ChessPosition::starting(),
    )
    .unwrap();

    assert_eq!(a.distribution, b.distribution);
    assert_eq!(a.value, b.value);
}

#[test]
fn test_single_legal_move_gets_all_visits() {
    let position = pos(ONE_REPLY);
    assert_eq!(ChessRules.legal_moves(&position), vec![mv("h8h7")]);

    let result = run_mcts(
        &ChessRules,
        &UniformEvaluator,
        MctsConfig::for_testing().with_simulations(30),
        position,
    )
    .unwrap();

    assert_eq!(result.distribution.len(), 1);
    let only = result.distribution.best().unwrap();
    assert_eq!(only.mv, mv("h8h7"));
    assert!((only.weight - 1.0).abs() < 1e-6);
}

#[test]
fn test_finished_games_are_rejected() {
    for fen in [CHECKMATED, STALEMATED] {
        let err = run_mcts(
            &ChessRules,
            &UniformEvaluator,
            MctsConfig::for_testing(),
            pos(fen),
        )
        .unwrap_err();
        assert!(matches!(err, SearchError::InvalidRootPosition(_)), "{}", fen);

        let err = policy_move(&ChessRules, &UniformEvaluator, &pos(fen), 10).unwrap_err();
        assert!(matches!(err, SearchError::InvalidRootPosition(_)));
    }
}

#[test]
fn test_capture_into_bare_kings_is_a_draw_leaf() {
    let position = pos(FORCED_BARE_KINGS);
    assert_eq!(ChessRules.legal_moves(&position), vec![mv("a1b2")]);

    let config = MctsConfig::for_testing().with_simulations(12);
    let evaluator = MaterialEvaluator::default();
    let mut search = MctsSearch::new(&ChessRules, &evaluator, config, position).unwrap();
    let result = search.run().unwrap();

    let tree = search.tree();
    let draws: Vec<_> = tree
        .arena()
        .iter()
        .filter(|node| node.terminal_status() == Some(TerminalStatus::Draw))
        .collect();
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].evaluation, Some(0.0));
    assert!(draws[0].children.is_empty());
    assert_eq!(draws[0].visit_count, 11);
    assert_eq!(draws[0].value_sum, 0.0);

    assert_eq!(result.distribution.len(), 1);
    assert_eq!(result.distribution.best().unwrap().mv, mv("a1b2"));
}

#[test]
fn test_finds_back_rank_mate() {
    let result = run_mcts(
        &ChessRules,
        &UniformEvaluator,
        MctsConfig::for_testing().with_simulations(200),
        pos(BACK_RANK_MATE),
    )
    .unwrap();

    let best = result.distribution.best().unwrap();
    assert_eq!(best.mv, mv("a1a8"));
    assert!(result.value > 0.0);
}

#[test]
fn test_confident_single_reply_skips_search() {
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    let decision = choose_move(
        &ChessRules,
        &UniformEvaluator,
        &MctsConfig::for_testing(),
        &pos(ONE_REPLY),
        &mut rng,
    )
    .unwrap();

    assert_eq!(decision.source, DecisionSource::Prior);
    assert_eq!(decision.mv, mv("h8h7"));
    assert_eq!(decision.simulations, 0);
}

#[test]
fn test_choose_move_from_start_is_legal() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let config = MctsConfig::for_testing().with_temperature(1.0);
    let start = ChessPosition::starting();

    let decision = choose_move(&ChessRules, &MaterialEvaluator::default(), &config, &start, &mut rng)
        .unwrap();

    assert_eq!(decision.source, DecisionSource::Search);
    assert!(ChessRules.is_legal(&start, &decision.mv));
}

#[test]
fn test_policy_move_takes_the_free_queen() {
    let position = pos("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
    let decision = policy_move(&ChessRules, &MaterialEvaluator::default(), &position, 5).unwrap();
    assert_eq!(decision.mv, mv("e4d5"));
    assert_eq!(decision.source, DecisionSource::Prior);
}
