//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices; parent links are plain indices, so
//! backpropagation walks upward without shared mutable references.

use move_codec::{Move, MoveIndex};

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<P> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<P>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,

    /// Prior for children missing from their parent's cached policy
    unseen_prior: f32,
}

impl<P> MctsTree<P> {
    /// Create a new tree rooted at the given position.
    pub fn new(root_position: P, unseen_prior: f32) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(root_position)],
            root: NodeId(0),
            unseen_prior,
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<P> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<P> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: MctsNode<P>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode<P>] {
        &self.nodes
    }

    /// Add a child to a parent node.
    /// Returns the new child's NodeId.
    pub fn add_child(
        &mut self,
        parent_id: NodeId,
        move_index: MoveIndex,
        mv: Move,
        position: P,
    ) -> NodeId {
        let parent_perspective = self.get(parent_id).perspective;
        let child = MctsNode::new_child(parent_id, parent_perspective, move_index, mv, position);
        let child_id = self.allocate(child);

        // Add to parent's children
        self.get_mut(parent_id).children.push((move_index, child_id));

        child_id
    }

    /// Prior probability of the move leading to `child_id`, looked up in the
    /// parent's cached policy.
    pub fn prior(&self, child_id: NodeId) -> f32 {
        let child = self.get(child_id);
        if child.parent.is_none() {
            return 1.0;
        }
        child
            .move_index
            .and_then(|index| self.get(child.parent).prior_for(index))
            .unwrap_or(self.unseen_prior)
    }

    /// Select the best child of a node using PUCT.
    /// Ties go to the earliest child.
    pub fn select_child(&self, node_id: NodeId, c_puct: f32) -> Option<NodeId> {
        let node = self.get(node_id);
        // Pre-compute sqrt once instead of per-child comparison
        let parent_visits_sqrt = (node.visit_count as f32).sqrt();

        let mut best: Option<(NodeId, f32)> = None;
        for &(_, child_id) in &node.children {
            let score =
                self.get(child_id)
                    .puct_score(self.prior(child_id), parent_visits_sqrt, c_puct);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child_id, score)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Backpropagate a value from a node to the root.
    /// Value is negated at each level (opponent's perspective).
    /// Visit counts are maintained by selection, not here.
    pub fn backpropagate(&mut self, leaf_id: NodeId, value: f32) {
        let mut current_id = leaf_id;
        let mut current_value = value;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.value_sum += current_value;

            // Negate for opponent's perspective
            current_value = -current_value;

            current_id = node.parent;
        }
    }

    /// Visit frequencies of the root's children as (move_index, frequency).
    ///
    /// The denominator is `root.visit_count - 1`: the first simulation only
    /// evaluates the root, every later one passes through exactly one child.
    /// Empty until at least one child has been visited.
    pub fn root_frequencies(&self) -> Vec<(MoveIndex, f32)> {
        let root = self.get(self.root);
        if root.visit_count <= 1 {
            return Vec::new();
        }
        let denominator = (root.visit_count - 1) as f32;

        root.children
            .iter()
            .map(|&(move_index, id)| (move_index, self.get(id).visit_count as f32 / denominator))
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_value: root.mean_value(),
            max_depth: self.compute_max_depth(),
        }
    }

    fn compute_max_depth(&self) -> u32 {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0u32)];
        while let Some((node_id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for &(_, child_id) in &self.get(node_id).children {
                stack.push((child_id, depth + 1));
            }
        }
        max_depth
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f32,
    pub max_depth: u32,
}
