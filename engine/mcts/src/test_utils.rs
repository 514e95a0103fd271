//! Scripted game used by the engine's unit tests.
//!
//! Positions are numbered nodes of an implicit tree: child `k` of position
//! `id` is `id * MAX_BRANCHING + k + 1`. Every position has
//! `default_branching` legal moves unless overridden, moves are `a1a2`,
//! `a1a3`, ... in child order, and there are no pawns.

use std::cell::RefCell;
use std::collections::HashMap;

use move_codec::{encode, BoardView, Color, Move, MoveIndex, Square, POLICY_SIZE};

use crate::evaluator::{EvalResult, Evaluator, EvaluatorError};
use crate::rules::{RulesEngine, RulesError, TerminalStatus};

pub(crate) const MAX_BRANCHING: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ToyPosition(pub u64);

impl ToyPosition {
    pub fn child(self, k: u64) -> ToyPosition {
        ToyPosition(self.0.wrapping_mul(MAX_BRANCHING).wrapping_add(k + 1))
    }
}

impl BoardView for ToyPosition {
    fn pawn_on(&self, _square: Square) -> Option<Color> {
        None
    }
}

/// The `k`-th move of any position.
pub(crate) fn toy_move(k: u64) -> Move {
    let a1 = Square::new(0, 0).unwrap();
    let to = Square::new(0, k as u8 + 1).unwrap();
    Move::new(a1, to)
}

pub(crate) fn toy_index(k: u64) -> MoveIndex {
    encode(&toy_move(k)).unwrap()
}

#[derive(Debug, Default)]
pub(crate) struct ScriptedGame {
    pub default_branching: u64,
    pub branching: HashMap<u64, u64>,
    pub terminal: HashMap<u64, TerminalStatus>,
    pub values: HashMap<u64, f32>,
    /// Raw `(index, probability)` policy overrides per position.
    pub policies: HashMap<u64, Vec<(MoveIndex, f32)>>,
    pub fail_on: Option<u64>,
    pub calls: RefCell<HashMap<u64, u32>>,
}

impl ScriptedGame {
    pub fn new(default_branching: u64) -> Self {
        Self {
            default_branching,
            ..Self::default()
        }
    }

    pub fn with_branching(mut self, id: u64, n: u64) -> Self {
        self.branching.insert(id, n);
        self
    }

    pub fn with_terminal(mut self, id: u64, status: TerminalStatus) -> Self {
        self.terminal.insert(id, status);
        self
    }

    pub fn with_value(mut self, id: u64, value: f32) -> Self {
        self.values.insert(id, value);
        self
    }

    pub fn with_policy(mut self, id: u64, entries: Vec<(MoveIndex, f32)>) -> Self {
        self.policies.insert(id, entries);
        self
    }

    pub fn failing_on(mut self, id: u64) -> Self {
        self.fail_on = Some(id);
        self
    }

    pub fn branching_of(&self, id: u64) -> u64 {
        if self.terminal.contains_key(&id) {
            return 0;
        }
        *self.branching.get(&id).unwrap_or(&self.default_branching)
    }

    pub fn calls_for(&self, id: u64) -> u32 {
        *self.calls.borrow().get(&id).unwrap_or(&0)
    }

    pub fn total_calls(&self) -> u32 {
        self.calls.borrow().values().sum()
    }
}

impl RulesEngine for ScriptedGame {
    type Position = ToyPosition;

    fn legal_moves(&self, position: &ToyPosition) -> Vec<Move> {
        (0..self.branching_of(position.0)).map(toy_move).collect()
    }

    fn apply(&self, position: &ToyPosition, mv: &Move) -> Result<ToyPosition, RulesError> {
        (0..self.branching_of(position.0))
            .find(|&k| toy_move(k) == *mv)
            .map(|k| position.child(k))
            .ok_or_else(|| RulesError::IllegalMove {
                mv: *mv,
                position: position.0.to_string(),
            })
    }

    fn terminal_status(&self, position: &ToyPosition) -> TerminalStatus {
        self.terminal
            .get(&position.0)
            .copied()
            .unwrap_or(TerminalStatus::Ongoing)
    }
}

impl Evaluator<ToyPosition> for ScriptedGame {
    fn evaluate(&self, position: &ToyPosition) -> Result<EvalResult, EvaluatorError> {
        *self.calls.borrow_mut().entry(position.0).or_insert(0) += 1;

        if self.fail_on == Some(position.0) {
            return Err(EvaluatorError::EvaluationFailed(format!(
                "scripted failure at {}",
                position.0
            )));
        }

        let mut policy = vec![0.0; POLICY_SIZE];
        match self.policies.get(&position.0) {
            Some(entries) => {
                for &(index, p) in entries {
                    policy[index as usize] = p;
                }
            }
            None => {
                let n = self.branching_of(position.0);
                for k in 0..n {
                    policy[toy_index(k) as usize] = 1.0 / n as f32;
                }
            }
        }

        Ok(EvalResult {
            policy,
            value: *self.values.get(&position.0).unwrap_or(&0.0),
        })
    }
}
