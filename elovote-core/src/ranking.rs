/// Read-only ranking view over a rating table.
use serde::Serialize;

use crate::types::RatingTable;

/// One row of the ranking, 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedItem {
    pub rank: usize,
    pub name: String,
    pub rating: f64,
    pub rounds: u32,
}

/// All items, strongest first. Equal ratings are ordered by name.
pub fn rank(table: &RatingTable) -> Vec<RankedItem> {
    let mut entries: Vec<_> = table.iter().collect();
    entries.sort_by(|(_, x), (_, y)| y.rating.total_cmp(&x.rating));
    entries
        .into_iter()
        .enumerate()
        .map(|(i, (name, item))| RankedItem {
            rank: i + 1,
            name: name.to_string(),
            rating: item.rating,
            rounds: item.rounds,
        })
        .collect()
}

/// Head and tail of a ranking, for compact display.
///
/// When the two slices would overlap, the whole ranking is in `top` and
/// `bottom` is empty.
#[derive(Debug)]
pub struct RankingWindow<'a> {
    pub top: &'a [RankedItem],
    pub bottom: &'a [RankedItem],
    /// Rows left out between `top` and `bottom`.
    pub omitted: usize,
}

impl<'a> RankingWindow<'a> {
    pub fn new(ranked: &'a [RankedItem], top: usize, bottom: usize) -> Self {
        if top.saturating_add(bottom) >= ranked.len() {
            return RankingWindow { top: ranked, bottom: &[], omitted: 0 };
        }
        RankingWindow {
            top: &ranked[..top],
            bottom: &ranked[ranked.len() - bottom..],
            omitted: ranked.len() - top - bottom,
        }
    }

    pub fn has_gap(&self) -> bool {
        self.omitted > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Item;

    fn table(ratings: &[(&str, f64)]) -> RatingTable {
        let mut table = RatingTable::new();
        for &(name, rating) in ratings {
            table.insert_if_absent(name, Item { rating, rounds: 1 });
        }
        table
    }

    #[test]
    fn test_rank_orders_by_rating_descending() {
        let ranked = rank(&table(&[("low", 900.0), ("high", 1100.0), ("mid", 1000.0)]));
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[2].rank, 3);
    }

    #[test]
    fn test_rank_ties_by_name() {
        let ranked = rank(&table(&[("b", 1000.0), ("a", 1000.0)]));
        assert_eq!(ranked[0].name, "a");
        assert_eq!(ranked[1].name, "b");
    }

    #[test]
    fn test_window_splits_long_ranking() {
        let ratings: Vec<(String, f64)> =
            (0..30).map(|i| (format!("item{i:02}"), 1000.0 + i as f64)).collect();
        let refs: Vec<(&str, f64)> = ratings.iter().map(|(n, r)| (n.as_str(), *r)).collect();
        let ranked = rank(&table(&refs));

        let window = RankingWindow::new(&ranked, 10, 10);
        assert_eq!(window.top.len(), 10);
        assert_eq!(window.bottom.len(), 10);
        assert_eq!(window.top[0].name, "item29");
        assert_eq!(window.bottom[0].rank, 21);
        assert_eq!(window.bottom[9].name, "item00");
        assert_eq!(window.omitted, 10);
        assert!(window.has_gap());
    }

    #[test]
    fn test_window_short_ranking_shows_everything() {
        let ranked = rank(&table(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]));
        let window = RankingWindow::new(&ranked, 10, 10);
        assert_eq!(window.top.len(), 3);
        assert!(window.bottom.is_empty());
        assert!(!window.has_gap());
    }
}
