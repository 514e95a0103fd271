//! MCTS configuration parameters.

use crate::search::SearchError;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of simulations to run per search.
    /// The first simulation only evaluates the root.
    pub num_simulations: u32,

    /// Number of highest-prior policy entries cached per node and
    /// considered when the node is expanded.
    pub top_k: usize,

    /// Exploration constant for the PUCT formula.
    pub c_puct: f32,

    /// Prior used for a child whose move is missing from the parent's
    /// cached top-k policy.
    pub unseen_prior: f32,

    /// Prior probability at or above which the calling layer plays the
    /// evaluator's top move without searching. Values above 1.0 disable
    /// the shortcut.
    pub confidence_threshold: f32,

    /// Temperature for move selection after search.
    /// 0.0 = always pick the most visited move
    /// 1.0 = sample proportional to visit counts
    pub temperature: f32,

    /// Seed for temperature sampling.
    pub seed: u64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 800,
            top_k: 10,
            c_puct: 2.5,
            unseen_prior: 0.1,
            confidence_threshold: 0.95,
            temperature: 0.0,
            seed: 0,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            num_simulations: 50,
            top_k: 10,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Builder pattern: set the per-node candidate count.
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }

    /// Builder pattern: set c_puct exploration constant.
    pub fn with_c_puct(mut self, c: f32) -> Self {
        self.c_puct = c;
        self
    }

    /// Builder pattern: set the prior for children outside the cached top-k.
    pub fn with_unseen_prior(mut self, prior: f32) -> Self {
        self.unseen_prior = prior;
        self
    }

    /// Builder pattern: set the no-search confidence threshold.
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Builder pattern: set temperature.
    pub fn with_temperature(mut self, t: f32) -> Self {
        self.temperature = t;
        self
    }

    /// Builder pattern: set the sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject configurations the search cannot run with.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.num_simulations == 0 {
            return Err(SearchError::InvalidConfig(
                "num_simulations must be at least 1".into(),
            ));
        }
        if self.top_k == 0 {
            return Err(SearchError::InvalidConfig("top_k must be at least 1".into()));
        }
        if !(self.c_puct.is_finite() && self.c_puct > 0.0) {
            return Err(SearchError::InvalidConfig(format!(
                "c_puct must be positive, got {}",
                self.c_puct
            )));
        }
        if !(0.0..=1.0).contains(&self.unseen_prior) {
            return Err(SearchError::InvalidConfig(format!(
                "unseen_prior must be in [0, 1], got {}",
                self.unseen_prior
            )));
        }
        if self.confidence_threshold.is_nan() || self.confidence_threshold < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "confidence_threshold must be non-negative, got {}",
                self.confidence_threshold
            )));
        }
        if !(self.temperature.is_finite() && self.temperature >= 0.0) {
            return Err(SearchError::InvalidConfig(format!(
                "temperature must be non-negative, got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}
