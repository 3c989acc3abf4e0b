/// Output formatting: terminal table and JSON.
use elovote_core::{RankedItem, RankingWindow};
use serde::Serialize;

#[derive(Serialize)]
struct JsonOutput<'a> {
    items: &'a [RankedItem],
    total_comparisons: u64,
}

/// Capitalize the first letter of every space- or hyphen-separated word.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c == ' ' || c == '-';
    }
    out
}

/// Render the ranking as a terminal table, with a `...` row where the
/// middle of the ranking was left out.
pub fn render_table(window: &RankingWindow, total_comparisons: u64) -> String {
    let rows = || window.top.iter().chain(window.bottom.iter());

    let name_width = rows().map(|r| title_case(&r.name).chars().count()).max().unwrap_or(4).max(4);
    let rank_width = rows().map(|r| r.rank.to_string().len()).max().unwrap_or(1).max(1);

    let mut out = String::new();
    out.push_str(&format!(
        "{:>rank_width$} | {:<name_width$} |   Rating | Rounds\n",
        "#", "Item"
    ));
    out.push_str(&format!(
        "{}-|-{}-|----------|-------\n",
        "-".repeat(rank_width),
        "-".repeat(name_width)
    ));

    for r in window.top {
        push_row(&mut out, r, rank_width, name_width);
    }
    if window.has_gap() {
        out.push_str(&format!("... ({} more)\n", window.omitted));
    }
    for r in window.bottom {
        push_row(&mut out, r, rank_width, name_width);
    }

    out.push_str(&format!(
        "\n{} items shown, {} comparisons recorded\n",
        window.top.len() + window.bottom.len(),
        total_comparisons,
    ));
    out
}

fn push_row(out: &mut String, r: &RankedItem, rank_width: usize, name_width: usize) {
    out.push_str(&format!(
        "{:>rank_width$} | {:<name_width$} | {:>8.2} | {:>6}\n",
        r.rank,
        title_case(&r.name),
        r.rating,
        r.rounds,
    ));
}

/// Print results as a formatted terminal table.
pub fn print_table(window: &RankingWindow, total_comparisons: u64) {
    print!("{}", render_table(window, total_comparisons));
}

/// Print results as JSON.
pub fn print_json(ranked: &[RankedItem], total_comparisons: u64) {
    let output = JsonOutput { items: ranked, total_comparisons };
    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{json}"),
        Err(e) => crate::bail(format!("Failed to serialize ranking: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elovote_core::{rank, Item, RatingTable};

    fn ranked(n: usize) -> Vec<RankedItem> {
        let mut table = RatingTable::new();
        for i in 0..n {
            table.insert_if_absent(&format!("item {i}"), Item { rating: 1000.0 + i as f64, rounds: 2 });
        }
        rank(&table)
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("mr. mime"), "Mr. Mime");
        assert_eq!(title_case("ho-oh"), "Ho-Oh");
        assert_eq!(title_case("pikachu"), "Pikachu");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_render_table_short() {
        let ranked = ranked(3);
        let table = render_table(&RankingWindow::new(&ranked, 10, 10), 3);
        assert!(table.contains("Item 2"));
        assert!(table.contains("1002.00"));
        assert!(!table.contains("..."));
        assert!(table.contains("3 items shown, 3 comparisons recorded"));
    }

    #[test]
    fn test_render_table_with_gap() {
        let ranked = ranked(25);
        let table = render_table(&RankingWindow::new(&ranked, 3, 2), 40);
        assert!(table.contains("... (20 more)"));
        assert!(table.contains("Item 24"));
        assert!(table.contains("Item 0"));
        assert!(!table.contains("Item 12 "));
        assert!(table.contains("5 items shown"));
    }

    #[test]
    fn test_json_output_shape() {
        let ranked = ranked(2);
        let json = serde_json::to_value(JsonOutput { items: &ranked, total_comparisons: 1 }).unwrap();
        assert_eq!(json["items"][0]["rank"], 1);
        assert_eq!(json["items"][0]["name"], "item 1");
        assert_eq!(json["items"][1]["rating"], 1000.0);
        assert_eq!(json["total_comparisons"], 1);
    }
}
