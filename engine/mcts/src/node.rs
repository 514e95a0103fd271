//! MCTS tree node representation.
//!
//! Each node represents a position reached from the root by a specific path
//! of moves. Nodes move through a one-way lifecycle:
//!
//! ```text
//! Unvisited --evaluate--> Evaluated --expand--> Expanded
//!     \
//!      `--terminal check--> Terminal
//! ```

use move_codec::{Move, MoveIndex};

use crate::rules::TerminalStatus;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// Lifecycle phase of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeState {
    /// Never evaluated.
    Unvisited,

    /// Evaluated, children not built yet. Holds the full policy vector so
    /// expansion can fall back to it without a second evaluator call.
    Evaluated { policy: Vec<f32> },

    /// Children built. Final for non-terminal nodes.
    Expanded,

    /// Game over at this node; it never gets children.
    Terminal(TerminalStatus),
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<P> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Policy index of the move that led here (None for root)
    pub move_index: Option<MoveIndex>,

    /// Decoded move that led here (None for root)
    pub mv: Option<Move>,

    /// Position at this node
    pub position: P,

    /// Lifecycle phase
    pub state: NodeState,

    /// Number of times this node has been visited
    pub visit_count: u32,

    /// Sum of values backpropagated through this node, from the perspective
    /// of the side to move here. Q = value_sum / visit_count
    pub value_sum: f32,

    /// Fixed value assigned on evaluation (evaluator output or terminal value)
    pub evaluation: Option<f32>,

    /// Highest-prior `(move_index, prior)` pairs, cached on evaluation
    pub priors: Option<Vec<(MoveIndex, f32)>>,

    /// True at even depths (the root's side to move), alternating per ply
    pub perspective: bool,

    /// Children: Vec of (move_index, NodeId) pairs in creation order.
    pub children: Vec<(MoveIndex, NodeId)>,
}

impl<P> MctsNode<P> {
    /// Create a new root node.
    pub fn new_root(position: P) -> Self {
        Self {
            parent: NodeId::NONE,
            move_index: None,
            mv: None,
            position,
            state: NodeState::Unvisited,
            visit_count: 0,
            value_sum: 0.0,
            evaluation: None,
            priors: None,
            perspective: true,
            children: Vec::new(),
        }
    }

    /// Create a new child node.
    pub fn new_child(
        parent: NodeId,
        parent_perspective: bool,
        move_index: MoveIndex,
        mv: Move,
        position: P,
    ) -> Self {
        Self {
            parent,
            move_index: Some(move_index),
            mv: Some(mv),
            position,
            state: NodeState::Unvisited,
            visit_count: 0,
            value_sum: 0.0,
            evaluation: None,
            priors: None,
            perspective: !parent_perspective,
            children: Vec::new(),
        }
    }

    /// Calculate mean value Q = value_sum / visit_count.
    /// Returns 0.0 if never visited.
    #[inline]
    pub fn mean_value(&self) -> f32 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.value_sum / self.visit_count as f32
        }
    }

    /// Prior recorded in this node's cached policy for `move_index`.
    pub fn prior_for(&self, move_index: MoveIndex) -> Option<f32> {
        self.priors
            .as_ref()?
            .iter()
            .find(|(index, _)| *index == move_index)
            .map(|(_, prior)| *prior)
    }

    /// PUCT score for selecting this node from its parent.
    /// PUCT = -Q + c_puct * P * sqrt(N_parent) / (1 + N)
    ///
    /// Q is stored from this node's side to move, which is the parent's
    /// opponent, so it is negated. Unvisited nodes score +inf so every child
    /// is tried once before any is revisited.
    #[inline]
    pub fn puct_score(&self, prior: f32, parent_visits_sqrt: f32, c_puct: f32) -> f32 {
        if self.visit_count == 0 {
            return f32::INFINITY;
        }
        let q = -self.mean_value();
        let u = c_puct * prior * parent_visits_sqrt / (1.0 + self.visit_count as f32);
        q + u
    }

    #[inline]
    pub fn is_evaluated(&self) -> bool {
        !matches!(self.state, NodeState::Unvisited)
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        matches!(self.state, NodeState::Expanded)
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self.state, NodeState::Terminal(_))
    }

    /// Terminal classification, if the game is over here.
    pub fn terminal_status(&self) -> Option<TerminalStatus> {
        match self.state {
            NodeState::Terminal(status) => Some(status),
            _ => None,
        }
    }
}
