/// Voting session orchestrator.
///
/// Owns the rating table, the configuration and the random source for the
/// duration of a session. The driver asks for a matchup, presents it, and
/// feeds the winner back; persistence stays with the driver so that it can
/// save after every recorded vote.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::EloConfig;
use crate::elo::{self, Outcome};
use crate::error::{EloError, Result};
use crate::pairing::select_pair;
use crate::ranking::{self, RankedItem};
use crate::types::RatingTable;

/// A selected pair, ordered for presentation: higher rating first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchup {
    pub first: String,
    pub second: String,
}

impl Matchup {
    /// Order `a` and `b` by current rating. Equal ratings keep the given order.
    pub fn new(table: &RatingTable, a: String, b: String) -> Result<Self> {
        let rating_a = table.item(&a)?.rating;
        let rating_b = table.item(&b)?.rating;
        if rating_b > rating_a {
            Ok(Matchup { first: b, second: a })
        } else {
            Ok(Matchup { first: a, second: b })
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.first == name || self.second == name
    }
}

pub struct VotingEngine<R = StdRng> {
    table: RatingTable,
    config: EloConfig,
    rng: R,
    /// Comparisons recorded by this engine (not the table's lifetime total).
    recorded: usize,
}

impl VotingEngine<StdRng> {
    /// Engine seeded from the operating system.
    pub fn new(table: RatingTable, config: EloConfig) -> Result<Self> {
        Self::with_rng(table, config, StdRng::from_os_rng())
    }

    /// Engine with a fixed seed, for reproducible sessions.
    pub fn seeded(table: RatingTable, config: EloConfig, seed: u64) -> Result<Self> {
        Self::with_rng(table, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> VotingEngine<R> {
    pub fn with_rng(table: RatingTable, config: EloConfig, rng: R) -> Result<Self> {
        config.validate()?;
        if table.len() < 2 {
            return Err(EloError::InsufficientItems(table.len()));
        }
        Ok(VotingEngine { table, config, rng, recorded: 0 })
    }

    /// Select the next pair to show, optionally forced to include `anchor`.
    pub fn next_matchup(&mut self, anchor: Option<&str>) -> Result<Matchup> {
        let (a, b) = select_pair(&self.table, anchor, &self.config, &mut self.rng)?;
        Matchup::new(&self.table, a, b)
    }

    /// Record `winner` for `matchup`.
    pub fn record(&mut self, matchup: &Matchup, winner: &str) -> Result<Outcome> {
        let outcome = elo::update(&mut self.table, &matchup.first, &matchup.second, winner)?;
        self.recorded += 1;
        Ok(outcome)
    }

    /// Anchor for the matchup that follows a vote on `matchup`: the first
    /// item, the second item, or the less-sampled of the two, each with
    /// probability 1/3. Equal round counts go to the second item.
    pub fn follow_up_anchor(&mut self, matchup: &Matchup) -> Result<String> {
        let draw = self.rng.random::<f64>();
        let anchor = if draw < 1.0 / 3.0 {
            &matchup.first
        } else if draw < 2.0 / 3.0 {
            &matchup.second
        } else {
            let first_rounds = self.table.item(&matchup.first)?.rounds;
            let second_rounds = self.table.item(&matchup.second)?.rounds;
            if first_rounds < second_rounds {
                &matchup.first
            } else {
                &matchup.second
            }
        };
        Ok(anchor.clone())
    }

    pub fn table(&self) -> &RatingTable {
        &self.table
    }

    pub fn config(&self) -> &EloConfig {
        &self.config
    }

    pub fn ranking(&self) -> Vec<RankedItem> {
        ranking::rank(&self.table)
    }

    pub fn recorded(&self) -> usize {
        self.recorded
    }

    pub fn into_table(self) -> RatingTable {
        self.table
    }
}
