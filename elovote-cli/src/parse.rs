/// Candidate list and vote input parsing.
use elovote_core::normalize_name;
use std::collections::HashSet;

/// One answer at the vote prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    First,
    Second,
    Skip,
    Quit,
}

/// Anything unrecognized counts as a skip, so a stray keypress never records a vote.
pub fn parse_vote(input: &str) -> Vote {
    match input.trim().to_lowercase().as_str() {
        "1" => Vote::First,
        "2" => Vote::Second,
        "q" | "quit" => Vote::Quit,
        _ => Vote::Skip,
    }
}

/// Parse a candidate list: either a JSON array of strings or plain text,
/// one name per line.
///
/// Names are trimmed and lowercased; blanks and repeats are dropped, keeping
/// the first occurrence's position.
pub fn parse_names(content: &str) -> Result<Vec<String>, serde_json::Error> {
    let trimmed = content.trim();
    let raw: Vec<String> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed)?
    } else {
        trimmed.lines().map(str::to_string).collect()
    };

    let mut seen = HashSet::new();
    Ok(raw
        .iter()
        .map(|name| normalize_name(name))
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.clone()))
        .collect())
}
