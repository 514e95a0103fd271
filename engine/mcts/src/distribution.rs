//! Move distributions returned to callers.
//!
//! A [`MoveDistribution`] is either the root visit frequencies of a search or
//! the evaluator's priors over legal moves. Both have the same shape, so the
//! caller reduces them the same way.

use move_codec::{Move, MoveIndex};
use rand::Rng;

/// One entry of a distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveWeight {
    pub move_index: MoveIndex,
    pub mv: Move,
    pub weight: f32,
}

/// Sparse distribution over move indices, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveDistribution {
    entries: Vec<MoveWeight>,
}

impl MoveDistribution {
    pub fn new(entries: Vec<MoveWeight>) -> Self {
        Self { entries }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[MoveWeight] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveWeight> {
        self.entries.iter()
    }

    /// Weight recorded for `move_index`, if present.
    pub fn get(&self, move_index: MoveIndex) -> Option<f32> {
        self.entries
            .iter()
            .find(|e| e.move_index == move_index)
            .map(|e| e.weight)
    }

    /// Sum of all weights.
    pub fn total(&self) -> f32 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Highest-weight entry. Ties go to the earliest entry.
    pub fn best(&self) -> Option<&MoveWeight> {
        let mut best: Option<&MoveWeight> = None;
        for entry in &self.entries {
            match best {
                Some(b) if entry.weight <= b.weight => {}
                _ => best = Some(entry),
            }
        }
        best
    }

    /// Sample an entry with probability proportional to `weight^(1/temperature)`.
    /// A temperature of zero is greedy and returns [`MoveDistribution::best`].
    pub fn sample<R: Rng>(&self, temperature: f32, rng: &mut R) -> Option<&MoveWeight> {
        if temperature < 1e-6 {
            return self.best();
        }

        let scaled: Vec<f32> = self
            .entries
            .iter()
            .map(|e| {
                if temperature == 1.0 {
                    e.weight
                } else {
                    e.weight.powf(1.0 / temperature)
                }
            })
            .collect();

        let total: f32 = scaled.iter().sum();
        if total.is_nan() || total <= 0.0 {
            return self.best();
        }

        let r: f32 = rng.gen::<f32>() * total;
        let mut cumsum = 0.0;
        for (entry, &w) in self.entries.iter().zip(scaled.iter()) {
            cumsum += w;
            if r < cumsum {
                return Some(entry);
            }
        }

        // Fallback to last non-zero entry (handles floating point issues)
        self.entries
            .iter()
            .zip(scaled.iter())
            .rev()
            .find(|(_, w)| **w > 0.0)
            .map(|(e, _)| e)
    }
}
