/// Adaptive pair selection.
///
/// A pair is either fully random (exploration) or built in two steps: an
/// anchor drawn from the head of one of four rankings, then an opponent drawn
/// from the items closest to (or, occasionally, farthest from) the anchor's
/// rating. Pools are bounded by `ceil(N * top_fraction)`, so selection stays
/// O(N log N) regardless of the catalog size.
use std::cmp::Reverse;

use rand::seq::{index, IndexedRandom};
use rand::Rng;
use tracing::debug;

use crate::config::EloConfig;
use crate::constants::POOL_SIZE_EPSILON;
use crate::error::{EloError, Result};
use crate::types::RatingTable;

/// Ranking used to build the anchor pool. Each is picked with probability 1/4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorCriterion {
    /// Under-sampled items first.
    FewestRounds,
    /// Weakest items first.
    LowestRating,
    /// Heavily sampled items first.
    MostRounds,
    /// Strongest items first.
    HighestRating,
}

impl AnchorCriterion {
    pub const ALL: [AnchorCriterion; 4] = [
        AnchorCriterion::FewestRounds,
        AnchorCriterion::LowestRating,
        AnchorCriterion::MostRounds,
        AnchorCriterion::HighestRating,
    ];

    /// Map a uniform draw in `[0, 1)` onto one of the four criteria.
    pub fn from_draw(draw: f64) -> Self {
        let slot = (draw * Self::ALL.len() as f64) as usize;
        Self::ALL[slot.min(Self::ALL.len() - 1)]
    }
}

/// Which end of the rating-distance ordering the opponent comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentReach {
    /// Evenly matched: most informative outcome.
    Closest,
    /// Mismatched: calibrates extremes and links separate rating clusters.
    Farthest,
}

/// Number of candidates to keep out of `count` for a pool `fraction`.
///
/// Rounds up, never below 1 for a non-empty set, never above `count`.
pub fn pool_size(count: usize, fraction: f64) -> usize {
    if count == 0 {
        return 0;
    }
    let size = (count as f64 * fraction - POOL_SIZE_EPSILON).ceil();
    if !size.is_finite() || size < 1.0 {
        1
    } else {
        (size as usize).min(count)
    }
}

/// Pick the next two items to compare.
///
/// With `anchor` given, the result always starts with it. The table is not
/// modified. An out-of-range `config` is rejected before anything is drawn.
pub fn select_pair(
    table: &RatingTable,
    anchor: Option<&str>,
    config: &EloConfig,
    rng: &mut impl Rng,
) -> Result<(String, String)> {
    config.validate()?;
    if table.len() < 2 {
        return Err(EloError::InsufficientItems(table.len()));
    }
    if let Some(anchor) = anchor {
        table.item(anchor)?;
    }

    if rng.random::<f64>() < config.exploration_rate {
        let pair = exploratory_pair(table, anchor, rng)?;
        debug!(first = %pair.0, second = %pair.1, "selected exploratory pair");
        return Ok(pair);
    }

    let anchor = match anchor {
        Some(anchor) => anchor.to_string(),
        None => {
            let criterion = AnchorCriterion::from_draw(rng.random::<f64>());
            let pool = anchor_pool(table, criterion, config.top_fraction);
            debug!(?criterion, pool_size = pool.len(), "drew anchor criterion");
            choose_name(&pool, rng, table.len())?
        }
    };

    let reach = if rng.random::<f64>() < config.top_fraction {
        OpponentReach::Farthest
    } else {
        OpponentReach::Closest
    };
    let pool = opponent_pool(table, &anchor, reach, config.top_fraction)?;
    let opponent = choose_name(&pool, rng, table.len())?;

    debug!(anchor = %anchor, opponent = %opponent, ?reach, "selected pair");
    Ok((anchor, opponent))
}

/// Uniformly random pair, or the anchor plus a uniformly random other item.
fn exploratory_pair(
    table: &RatingTable,
    anchor: Option<&str>,
    rng: &mut impl Rng,
) -> Result<(String, String)> {
    match anchor {
        Some(anchor) => {
            let others: Vec<&str> = table.names().filter(|&name| name != anchor).collect();
            let opponent = choose_name(&others, rng, table.len())?;
            Ok((anchor.to_string(), opponent))
        }
        None => {
            let names: Vec<&str> = table.names().collect();
            let picked = index::sample(rng, names.len(), 2);
            Ok((names[picked.index(0)].to_string(), names[picked.index(1)].to_string()))
        }
    }
}

/// Head of the table ranked by `criterion`, `ceil(N * fraction)` names long.
///
/// Ties keep name order.
pub fn anchor_pool(table: &RatingTable, criterion: AnchorCriterion, fraction: f64) -> Vec<&str> {
    let mut ranked: Vec<_> = table.iter().collect();
    match criterion {
        AnchorCriterion::FewestRounds => ranked.sort_by_key(|(_, item)| item.rounds),
        AnchorCriterion::MostRounds => ranked.sort_by_key(|(_, item)| Reverse(item.rounds)),
        AnchorCriterion::LowestRating => {
            ranked.sort_by(|(_, x), (_, y)| x.rating.total_cmp(&y.rating))
        }
        AnchorCriterion::HighestRating => {
            ranked.sort_by(|(_, x), (_, y)| y.rating.total_cmp(&x.rating))
        }
    }
    let size = pool_size(ranked.len(), fraction);
    ranked.into_iter().take(size).map(|(name, _)| name).collect()
}

/// Items other than `anchor` nearest to (or farthest from) its rating,
/// `ceil(M * fraction)` names long where M is the number of other items.
pub fn opponent_pool<'a>(
    table: &'a RatingTable,
    anchor: &str,
    reach: OpponentReach,
    fraction: f64,
) -> Result<Vec<&'a str>> {
    let anchor_rating = table.item(anchor)?.rating;
    let mut others: Vec<(&str, f64)> = table
        .iter()
        .filter(|&(name, _)| name != anchor)
        .map(|(name, item)| (name, (item.rating - anchor_rating).abs()))
        .collect();

    match reach {
        OpponentReach::Closest => others.sort_by(|x, y| x.1.total_cmp(&y.1)),
        OpponentReach::Farthest => others.sort_by(|x, y| y.1.total_cmp(&x.1)),
    }
    let size = pool_size(others.len(), fraction);
    Ok(others.into_iter().take(size).map(|(name, _)| name).collect())
}

fn choose_name(pool: &[&str], rng: &mut impl Rng, table_len: usize) -> Result<String> {
    pool.choose(rng)
        .map(|name| name.to_string())
        .ok_or(EloError::InsufficientItems(table_len))
}
