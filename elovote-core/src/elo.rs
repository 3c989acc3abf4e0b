/// Elo update rule: logistic expectation plus a per-item shrinking k-factor.
///
/// Each side of a comparison moves by its own k (from its own round count)
/// times the gap between the actual and the expected score. Because the two
/// k-factors can differ, the update is not zero-sum.
use tracing::debug;

use crate::constants::{ELO_SCALE, K_FACTOR_SETTLED, K_FACTOR_TIERS};
use crate::error::{EloError, Result};
use crate::types::{Item, RatingTable};

/// Probability that an item rated `rating_a` beats one rated `rating_b`.
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / ELO_SCALE))
}

/// Step size for an item that has already played `rounds` comparisons.
pub fn k_factor(rounds: u32) -> f64 {
    K_FACTOR_TIERS
        .iter()
        .find(|&&(bound, _)| rounds < bound)
        .map_or(K_FACTOR_SETTLED, |&(_, k)| k)
}

/// Before/after state of one participant.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingChange {
    pub name: String,
    pub before: Item,
    pub after: Item,
}

impl RatingChange {
    pub fn delta(&self) -> f64 {
        self.after.rating - self.before.rating
    }
}

/// Result of a committed comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub winner: RatingChange,
    pub loser: RatingChange,
}

/// Apply one comparison between `a` and `b` to the table.
///
/// Everything is validated before the table is touched; on error the table is
/// unchanged. On success both ratings and both round counts are written together.
pub fn update(table: &mut RatingTable, a: &str, b: &str, winner: &str) -> Result<Outcome> {
    if a == b {
        return Err(EloError::InvalidComparison(a.to_string()));
    }
    let before_a = *table.item(a)?;
    let before_b = *table.item(b)?;

    let (score_a, score_b) = if winner == a {
        (1.0, 0.0)
    } else if winner == b {
        (0.0, 1.0)
    } else {
        return Err(EloError::InvalidWinner {
            a: a.to_string(),
            b: b.to_string(),
            winner: winner.to_string(),
        });
    };

    let expected_a = expected_score(before_a.rating, before_b.rating);
    let expected_b = expected_score(before_b.rating, before_a.rating);
    let k_a = k_factor(before_a.rounds);
    let k_b = k_factor(before_b.rounds);

    let after_a = Item {
        rating: before_a.rating + k_a * (score_a - expected_a),
        rounds: before_a.rounds.saturating_add(1),
    };
    let after_b = Item {
        rating: before_b.rating + k_b * (score_b - expected_b),
        rounds: before_b.rounds.saturating_add(1),
    };

    table.commit_pair((a, after_a), (b, after_b));

    debug!(
        a,
        b,
        winner,
        rating_a = after_a.rating,
        rating_b = after_b.rating,
        "recorded comparison"
    );

    let change_a = RatingChange { name: a.to_string(), before: before_a, after: after_a };
    let change_b = RatingChange { name: b.to_string(), before: before_b, after: after_b };
    Ok(if winner == a {
        Outcome { winner: change_a, loser: change_b }
    } else {
        Outcome { winner: change_b, loser: change_a }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_table(names: &[&str]) -> RatingTable {
        RatingTable::from_names(names.iter().copied(), Item::default())
    }

    #[test]
    fn test_expected_score_equal_ratings() {
        for r in [0.0, 1000.0, 1734.5, -250.0] {
            assert_eq!(expected_score(r, r), 0.5);
        }
    }

    #[test]
    fn test_expected_score_symmetry() {
        let ratings = [800.0, 950.5, 1000.0, 1200.0, 1623.25, 2400.0];
        for &a in &ratings {
            for &b in &ratings {
                let sum = expected_score(a, b) + expected_score(b, a);
                assert!((sum - 1.0).abs() < 1e-12, "a={a} b={b} sum={sum}");
            }
        }
    }

    #[test]
    fn test_expected_score_400_gap_is_ten_to_one() {
        let p = expected_score(1400.0, 1000.0);
        assert!((p - 10.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_k_factor_boundaries() {
        for rounds in 0..5 {
            assert_eq!(k_factor(rounds), 100.0);
        }
        for rounds in 5..20 {
            assert_eq!(k_factor(rounds), 50.0);
        }
        for rounds in 20..50 {
            assert_eq!(k_factor(rounds), 30.0);
        }
        for rounds in [50, 51, 500, u32::MAX] {
            assert_eq!(k_factor(rounds), 10.0);
        }
    }

    #[test]
    fn test_first_comparison_moves_fifty_points() {
        let mut table = fresh_table(&["a", "b"]);
        let outcome = update(&mut table, "a", "b", "a").unwrap();

        assert_eq!(table.get("a"), Some(&Item { rating: 1050.0, rounds: 1 }));
        assert_eq!(table.get("b"), Some(&Item { rating: 950.0, rounds: 1 }));
        assert_eq!(outcome.winner.name, "a");
        assert_eq!(outcome.winner.delta(), 50.0);
        assert_eq!(outcome.loser.delta(), -50.0);
    }

    #[test]
    fn test_second_side_can_win() {
        let mut table = fresh_table(&["a", "b"]);
        let outcome = update(&mut table, "a", "b", "b").unwrap();
        assert_eq!(table.get("b").unwrap().rating, 1050.0);
        assert_eq!(table.get("a").unwrap().rating, 950.0);
        assert_eq!(outcome.winner.name, "b");
        assert_eq!(outcome.loser.name, "a");
    }

    #[test]
    fn test_each_side_uses_its_own_k() {
        let mut table = RatingTable::new();
        table.insert_if_absent("veteran", Item { rating: 1000.0, rounds: 60 });
        table.insert_if_absent("rookie", Item { rating: 1000.0, rounds: 0 });

        update(&mut table, "veteran", "rookie", "rookie").unwrap();
        assert_eq!(table.get("veteran").unwrap().rating, 995.0);
        assert_eq!(table.get("rookie").unwrap().rating, 1050.0);
    }

    #[test]
    fn test_rounds_increase_by_one_regardless_of_winner() {
        let mut table = fresh_table(&["a", "b", "c"]);
        let results = [("a", "b", "a"), ("b", "c", "c"), ("a", "c", "c"), ("b", "a", "b")];
        for (a, b, winner) in results {
            let before_a = table.get(a).unwrap().rounds;
            let before_b = table.get(b).unwrap().rounds;
            let before_winner = table.get(winner).unwrap().rating;
            let loser = if winner == a { b } else { a };
            let before_loser = table.get(loser).unwrap().rating;

            update(&mut table, a, b, winner).unwrap();

            assert_eq!(table.get(a).unwrap().rounds, before_a + 1);
            assert_eq!(table.get(b).unwrap().rounds, before_b + 1);
            assert!(table.get(winner).unwrap().rating > before_winner);
            assert!(table.get(loser).unwrap().rating < before_loser);
        }
        assert_eq!(table.total_rounds(), 8);
    }

    #[test]
    fn test_rejects_self_comparison() {
        let mut table = fresh_table(&["a", "b"]);
        let before = table.clone();
        let err = update(&mut table, "a", "a", "a").unwrap_err();
        assert!(matches!(err, EloError::InvalidComparison(ref name) if name == "a"));
        assert_eq!(table, before);
    }

    #[test]
    fn test_rejects_winner_outside_pair() {
        let mut table = fresh_table(&["a", "b", "c"]);
        let before = table.clone();
        let err = update(&mut table, "a", "b", "c").unwrap_err();
        assert!(matches!(err, EloError::InvalidWinner { .. }));
        assert_eq!(table, before);
    }

    #[test]
    fn test_rejects_unknown_item_without_mutation() {
        let mut table = fresh_table(&["a", "b"]);
        let before = table.clone();
        let err = update(&mut table, "a", "ghost", "a").unwrap_err();
        assert!(matches!(err, EloError::UnknownItem(ref name) if name == "ghost"));
        assert_eq!(table, before);
    }

    #[test]
    fn test_repeated_wins_converge() {
        let mut table = fresh_table(&["a", "b"]);
        let mut previous_rating = table.get("a").unwrap().rating;
        let mut previous_delta: Option<f64> = None;

        for _ in 0..200 {
            let rounds_before = table.get("a").unwrap().rounds;
            update(&mut table, "a", "b", "a").unwrap();
            let rating = table.get("a").unwrap().rating;
            let delta = rating - previous_rating;
            assert!(delta > 0.0, "rating must keep rising, got delta {delta}");

            if rounds_before >= 50 {
                if let Some(prev) = previous_delta {
                    assert!(delta <= prev, "delta grew from {prev} to {delta}");
                }
                previous_delta = Some(delta);
            }
            previous_rating = rating;
        }

        assert_eq!(table.get("a").unwrap().rounds, 200);
        assert_eq!(table.get("b").unwrap().rounds, 200);
    }
}
