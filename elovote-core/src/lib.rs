/// elovote-core: Elo rating engine and adaptive pair selection.
///
/// A human compares two items at a time; each outcome nudges both items'
/// ratings, and the selector keeps proposing pairs that are close in strength
/// while still visiting under-sampled and extreme items.
///
/// Items are identified by normalized (trimmed, lowercase) names. The rating
/// table is an explicit value owned by the caller; selection borrows it,
/// updates mutate it in place, and `RatingStore` persists it as JSON.
///
/// # Quick start
///
/// ```rust
/// use elovote_core::{EloConfig, RatingTable, VotingEngine};
///
/// let config = EloConfig::default();
/// let table = RatingTable::from_names(["bulbasaur", "charmander", "squirtle"], config.default_item());
///
/// let mut engine = VotingEngine::seeded(table, config, 7).unwrap();
/// let matchup = engine.next_matchup(None).unwrap();
///
/// // Pretend the human picked the first option.
/// let winner = matchup.first.clone();
/// let outcome = engine.record(&matchup, &winner).unwrap();
/// assert_eq!(outcome.winner.delta(), 50.0);
///
/// for r in engine.ranking() {
///     println!("{}. {} {:.1}", r.rank, r.name, r.rating);
/// }
/// ```

pub mod config;
pub mod constants;
pub mod elo;
pub mod engine;
pub mod error;
pub mod pairing;
pub mod ranking;
pub mod store;
pub mod types;

// Re-export primary public API at crate root.
pub use config::EloConfig;
pub use elo::{expected_score, k_factor, update, Outcome, RatingChange};
pub use engine::{Matchup, VotingEngine};
pub use error::{EloError, Result};
pub use pairing::{anchor_pool, opponent_pool, pool_size, select_pair, AnchorCriterion, OpponentReach};
pub use ranking::{rank, RankedItem, RankingWindow};
pub use store::{reconcile, RatingStore, ReconcilePolicy, ReconcileReport};
pub use types::{normalize_name, Item, RatingTable};
