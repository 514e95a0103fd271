//! Move decision on top of the search.
//!
//! When the evaluator is already confident about one move the search is
//! skipped entirely; otherwise the root visit distribution is reduced to a
//! single move, greedily or by temperature sampling.

use move_codec::{decode, Move, MoveIndex};
use rand::Rng;
use tracing::debug;

use crate::config::MctsConfig;
use crate::distribution::{MoveDistribution, MoveWeight};
use crate::evaluator::{EvalResult, Evaluator};
use crate::rules::RulesEngine;
use crate::search::{run_mcts, validate_root, SearchError};

/// Where a decision came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionSource {
    /// Evaluator priors alone, no tree search.
    Prior,
    /// Root visit frequencies of a search.
    Search,
}

/// A chosen move together with the distribution it was drawn from.
#[derive(Debug, Clone)]
pub struct Decision {
    pub mv: Move,
    pub move_index: MoveIndex,
    pub source: DecisionSource,
    /// Legal top-k priors for [`DecisionSource::Prior`], visit frequencies
    /// for [`DecisionSource::Search`].
    pub distribution: MoveDistribution,
    /// Value estimate for the side to move.
    pub value: f32,
    /// Simulations performed (zero when the search was skipped).
    pub simulations: u32,
}

/// Legal moves among the `k` highest priors, best first.
fn legal_priors<R: RulesEngine>(
    rules: &R,
    position: &R::Position,
    eval: &EvalResult,
    k: usize,
) -> MoveDistribution {
    let entries = eval
        .top_k(k)
        .into_iter()
        .filter_map(|(move_index, prior)| {
            let mv = decode(move_index, position).ok()?;
            rules.is_legal(position, &mv).then_some(MoveWeight {
                move_index,
                mv,
                weight: prior,
            })
        })
        .collect();
    MoveDistribution::new(entries)
}

/// Pick a move for `position`.
///
/// The root is evaluated once up front. If the single highest prior is a
/// legal move at or above `config.confidence_threshold` it is returned
/// without searching. Otherwise a full search runs and the move is taken
/// from the visit distribution, greedily at temperature zero or sampled
/// with `rng` above it.
pub fn choose_move<R, E, G>(
    rules: &R,
    evaluator: &E,
    config: &MctsConfig,
    position: &R::Position,
    rng: &mut G,
) -> Result<Decision, SearchError>
where
    R: RulesEngine,
    E: Evaluator<R::Position>,
    G: Rng,
{
    config.validate()?;
    validate_root(rules, position)?;

    let eval = evaluator.evaluate(position)?;
    eval.validate()?;

    if let Some(&(move_index, prior)) = eval.top_k(1).first() {
        if prior >= config.confidence_threshold {
            if let Ok(mv) = decode(move_index, position) {
                if rules.is_legal(position, &mv) {
                    debug!(%mv, prior, "Playing confident prior move without search");
                    return Ok(Decision {
                        mv,
                        move_index,
                        source: DecisionSource::Prior,
                        distribution: legal_priors(rules, position, &eval, config.top_k),
                        value: eval.value,
                        simulations: 0,
                    });
                }
            }
        }
    }

    let result = run_mcts(rules, evaluator, config.clone(), position.clone())?;

    let picked = result
        .distribution
        .sample(config.temperature, rng)
        .copied();
    let chosen = match picked {
        Some(entry) => entry,
        // Budget too small to visit any child: fall back to the priors.
        None => first_legal(rules, position, &eval, config.top_k)?,
    };

    debug!(
        mv = %chosen.mv,
        weight = chosen.weight,
        simulations = result.simulations,
        value = result.value,
        "Chose move from search"
    );

    Ok(Decision {
        mv: chosen.mv,
        move_index: chosen.move_index,
        source: DecisionSource::Search,
        distribution: result.distribution,
        value: result.value,
        simulations: result.simulations,
    })
}

/// Greedy move from the evaluator alone: the first legal move among the top
/// `k` priors, then among the full ranking.
pub fn policy_move<R, E>(
    rules: &R,
    evaluator: &E,
    position: &R::Position,
    k: usize,
) -> Result<Decision, SearchError>
where
    R: RulesEngine,
    E: Evaluator<R::Position>,
{
    validate_root(rules, position)?;

    let eval = evaluator.evaluate(position)?;
    eval.validate()?;

    let chosen = first_legal(rules, position, &eval, k)?;
    Ok(Decision {
        mv: chosen.mv,
        move_index: chosen.move_index,
        source: DecisionSource::Prior,
        distribution: legal_priors(rules, position, &eval, k),
        value: eval.value,
        simulations: 0,
    })
}

fn first_legal<R: RulesEngine>(
    rules: &R,
    position: &R::Position,
    eval: &EvalResult,
    k: usize,
) -> Result<MoveWeight, SearchError> {
    if let Some(entry) = legal_priors(rules, position, eval, k).entries().first() {
        return Ok(*entry);
    }

    eval.ranked()
        .into_iter()
        .skip(k)
        .find_map(|(move_index, prior)| {
            let mv = decode(move_index, position).ok()?;
            rules.is_legal(position, &mv).then_some(MoveWeight {
                move_index,
                mv,
                weight: prior,
            })
        })
        .ok_or_else(|| {
            SearchError::EngineInvariantViolation(
                "no policy index decodes to a legal move at the root".into(),
            )
        })
}
