//! MCTS search implementation.
//!
//! Each simulation walks from the root with PUCT selection and stops at the
//! first node that needs work:
//! 1. Unvisited: evaluate it (one evaluator call) and backpropagate its value
//! 2. Evaluated but childless: expand it, then descend into its best child
//!    and evaluate that
//! 3. Terminal: count the visit and backpropagate the fixed game result
//!
//! Visit counts are bumped on the way down; backpropagation only adds values.

use move_codec::{decode, Move, MoveIndex};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::config::MctsConfig;
use crate::distribution::{MoveDistribution, MoveWeight};
use crate::evaluator::{rank_policy, Evaluator, EvaluatorError};
use crate::node::{NodeId, NodeState};
use crate::rules::{RulesEngine, RulesError};
use crate::tree::{MctsTree, TreeStats};

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Evaluator failure: {0}")]
    EvaluatorFailure(#[from] EvaluatorError),

    #[error("Invalid root position: {0}")]
    InvalidRootPosition(String),

    #[error("Engine invariant violated: {0}")]
    EngineInvariantViolation(String),

    #[error("Rules engine error: {0}")]
    Rules(#[from] RulesError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Visit frequency of each root child, in child creation order.
    pub distribution: MoveDistribution,

    /// Mean value at the root, for the side to move
    pub value: f32,

    /// Number of simulations performed
    pub simulations: u32,

    /// Tree shape at the end of the search
    pub stats: TreeStats,
}

/// A candidate child: policy index, decoded move, resulting position.
type Candidate<P> = (MoveIndex, Move, P);

/// Reject roots the search cannot start from.
pub(crate) fn validate_root<R: RulesEngine>(
    rules: &R,
    position: &R::Position,
) -> Result<(), SearchError> {
    let status = rules.terminal_status(position);
    if status.is_terminal() {
        return Err(SearchError::InvalidRootPosition(format!(
            "game is already over ({:?})",
            status
        )));
    }
    if rules.legal_moves(position).is_empty() {
        return Err(SearchError::InvalidRootPosition(
            "ongoing position has no legal moves".into(),
        ));
    }
    Ok(())
}

/// MCTS search state.
pub struct MctsSearch<'a, R: RulesEngine, E: Evaluator<R::Position>> {
    tree: MctsTree<R::Position>,
    rules: &'a R,
    evaluator: &'a E,
    config: MctsConfig,
}

impl<'a, R: RulesEngine, E: Evaluator<R::Position>> MctsSearch<'a, R, E> {
    /// Create a new MCTS search from the given root position.
    pub fn new(
        rules: &'a R,
        evaluator: &'a E,
        config: MctsConfig,
        root_position: R::Position,
    ) -> Result<Self, SearchError> {
        config.validate()?;
        validate_root(rules, &root_position)?;

        let tree = MctsTree::new(root_position, config.unseen_prior);

        Ok(Self {
            tree,
            rules,
            evaluator,
            config,
        })
    }

    /// Run the MCTS search for the configured number of simulations.
    pub fn run(&mut self) -> Result<SearchResult, SearchError> {
        for _ in 0..self.config.num_simulations {
            self.simulate()?;
        }

        let distribution = self.distribution();
        let stats = self.tree.stats();
        let root = self.tree.get(self.tree.root());

        debug!(
            simulations = root.visit_count,
            nodes = stats.total_nodes,
            max_depth = stats.max_depth,
            root_value = root.mean_value(),
            children = root.children.len(),
            "MCTS search complete"
        );

        Ok(SearchResult {
            distribution,
            value: root.mean_value(),
            simulations: root.visit_count,
            stats,
        })
    }

    /// Root visit frequencies with their decoded moves.
    pub fn distribution(&self) -> MoveDistribution {
        let root = self.tree.get(self.tree.root());
        let entries = root
            .children
            .iter()
            .zip(self.tree.root_frequencies())
            .filter_map(|(&(_, child_id), (move_index, weight))| {
                self.tree.get(child_id).mv.map(|mv| MoveWeight {
                    move_index,
                    mv,
                    weight,
                })
            })
            .collect();
        MoveDistribution::new(entries)
    }

    /// Run a single simulation (select -> evaluate or expand -> backpropagate).
    fn simulate(&mut self) -> Result<(), SearchError> {
        let mut leaf_id = self.select(self.tree.root());

        if matches!(self.tree.get(leaf_id).state, NodeState::Evaluated { .. }) {
            self.expand_node(leaf_id)?;
            leaf_id = self.select(leaf_id);
        }

        let leaf = self.tree.get(leaf_id);
        let value = if leaf.is_terminal() {
            let stored = leaf.evaluation.ok_or_else(|| {
                SearchError::EngineInvariantViolation(format!(
                    "terminal node {} has no stored value",
                    leaf_id.0
                ))
            })?;
            self.tree.get_mut(leaf_id).visit_count += 1;
            stored
        } else if leaf.is_evaluated() {
            return Err(SearchError::EngineInvariantViolation(format!(
                "selection stopped at node {} which needs no work",
                leaf_id.0
            )));
        } else {
            self.evaluate_node(leaf_id)?
        };

        // Backpropagation
        self.tree.backpropagate(leaf_id, value);

        trace!(leaf = leaf_id.0, value = value, "MCTS simulation complete");

        Ok(())
    }

    /// Descend from `start` by PUCT until reaching a node that is not
    /// expanded. Every expanded node passed through gains one visit.
    fn select(&mut self, start: NodeId) -> NodeId {
        let mut current = start;

        loop {
            if !self.tree.get(current).is_expanded() {
                return current;
            }

            self.tree.get_mut(current).visit_count += 1;

            match self.tree.select_child(current, self.config.c_puct) {
                Some(child_id) => current = child_id,
                None => return current, // No children (caught by the caller)
            }
        }
    }

    /// Evaluate an unvisited node: classify it, cache its top-k priors and
    /// full policy, and return the value to backpropagate.
    fn evaluate_node(&mut self, node_id: NodeId) -> Result<f32, SearchError> {
        let status = self.rules.terminal_status(&self.tree.get(node_id).position);

        if let Some(value) = status.terminal_value() {
            let node = self.tree.get_mut(node_id);
            node.state = NodeState::Terminal(status);
            node.evaluation = Some(value);
            node.visit_count = 1;
            debug!(node = node_id.0, ?status, value, "Terminal position reached");
            return Ok(value);
        }

        let eval = self.evaluator.evaluate(&self.tree.get(node_id).position)?;
        eval.validate()?;
        let priors = eval.top_k(self.config.top_k);

        let node = self.tree.get_mut(node_id);
        node.priors = Some(priors);
        node.evaluation = Some(eval.value);
        node.state = NodeState::Evaluated {
            policy: eval.policy,
        };
        node.visit_count = 1;

        Ok(eval.value)
    }

    /// Build the children of an evaluated node from its cached top-k
    /// priors, falling back to the first legal move of the full policy.
    fn expand_node(&mut self, node_id: NodeId) -> Result<(), SearchError> {
        let node = self.tree.get_mut(node_id);
        let policy = match &mut node.state {
            NodeState::Evaluated { policy } => std::mem::take(policy),
            other => {
                return Err(SearchError::EngineInvariantViolation(format!(
                    "cannot expand node {} in state {:?}",
                    node_id.0, other
                )));
            }
        };

        let node = self.tree.get(node_id);
        let position = node.position.clone();
        let top_k: Vec<MoveIndex> = node
            .priors
            .iter()
            .flatten()
            .map(|&(index, _)| index)
            .collect();

        let mut children = Vec::with_capacity(top_k.len());
        for &index in &top_k {
            if let Some(candidate) = self.materialize(&position, index)? {
                children.push(candidate);
            }
        }

        if children.is_empty() {
            warn!(
                node = node_id.0,
                candidates = top_k.len(),
                "No legal move among top-k priors, scanning full policy"
            );
            for (index, _) in rank_policy(&policy) {
                if top_k.contains(&index) {
                    continue;
                }
                if let Some(candidate) = self.materialize(&position, index)? {
                    children.push(candidate);
                    break;
                }
            }
        }

        if children.is_empty() {
            return Err(SearchError::EngineInvariantViolation(format!(
                "no policy index decodes to a legal move at ongoing node {}",
                node_id.0
            )));
        }

        let num_children = children.len();
        for (index, mv, child_position) in children {
            self.tree.add_child(node_id, index, mv, child_position);
        }
        self.tree.get_mut(node_id).state = NodeState::Expanded;

        debug!(node = node_id.0, children = num_children, "Expanded node");

        Ok(())
    }

    /// Decode `index` against `position` and apply it if legal.
    /// Undecodable or illegal indices are skipped.
    fn materialize(
        &self,
        position: &R::Position,
        index: MoveIndex,
    ) -> Result<Option<Candidate<R::Position>>, SearchError> {
        let mv = match decode(index, position) {
            Ok(mv) => mv,
            Err(e) => {
                trace!(index, error = %e, "Skipping undecodable policy index");
                return Ok(None);
            }
        };

        if !self.rules.is_legal(position, &mv) {
            return Ok(None);
        }

        let child = self.rules.apply(position, &mv)?;
        Ok(Some((index, mv, child)))
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<R::Position> {
        &self.tree
    }
}

/// Convenience function to run a single MCTS search.
pub fn run_mcts<R, E>(
    rules: &R,
    evaluator: &E,
    config: MctsConfig,
    root_position: R::Position,
) -> Result<SearchResult, SearchError>
where
    R: RulesEngine,
    E: Evaluator<R::Position>,
{
    let mut search = MctsSearch::new(rules, evaluator, config, root_position)?;
    search.run()
}
