/// Rating assigned to every item when a fresh table is created.
pub const DEFAULT_RATING: f64 = 1000.0;

/// Comparison count for a fresh item.
pub const DEFAULT_ROUNDS: u32 = 0;

/// Probability of ignoring every heuristic and presenting a uniformly random pair.
///
/// Keeps items that the ranking-based pools never reach (mid-table, average
/// rounds) appearing from time to time.
pub const EXPLORATION_RATE: f64 = 0.2;

/// Fraction of the catalog used as a candidate pool, for both the anchor pool
/// and the opponent pool. Also the probability of drawing the opponent from the
/// most distant ratings instead of the closest ones.
pub const TOP_FRACTION: f64 = 0.1;

/// Logistic scale of the Elo expectation: a 400 point gap means 10:1 odds.
pub const ELO_SCALE: f64 = 400.0;

/// K-factor tiers as `(rounds upper bound, k)`. An item uses the first tier
/// whose bound is strictly greater than its round count.
///
/// Fresh items move fast; the step shrinks as the rating settles.
pub const K_FACTOR_TIERS: [(u32, f64); 3] = [(5, 100.0), (20, 50.0), (50, 30.0)];

/// K-factor once an item is past every tier.
pub const K_FACTOR_SETTLED: f64 = 10.0;

/// Slack used when turning a pool fraction into a pool size, so that
/// `30 * 0.1` rounds up to 3 and not 4.
pub const POOL_SIZE_EPSILON: f64 = 1e-9;
