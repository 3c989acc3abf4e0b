/// Console vote screen.
use elovote_core::{Matchup, Outcome, RatingTable};

use crate::output::title_case;

/// Build the vote prompt for a matchup, stronger item as option 1.
pub fn build_vote_prompt(matchup: &Matchup, table: &RatingTable) -> String {
    let rating = |name: &str| table.get(name).map_or(f64::NAN, |item| item.rating);
    format!(
        " - Vote - \n\n\
         1) {} ({:.1})\n\
         2) {} ({:.1})\n\
         s) skip\n\
         q) quit\n\n> ",
        title_case(&matchup.first),
        rating(&matchup.first),
        title_case(&matchup.second),
        rating(&matchup.second),
    )
}

/// One-line summary of a recorded vote.
pub fn describe_outcome(outcome: &Outcome) -> String {
    format!(
        "{} {:+.1} ({:.1}) / {} {:+.1} ({:.1})",
        title_case(&outcome.winner.name),
        outcome.winner.delta(),
        outcome.winner.after.rating,
        title_case(&outcome.loser.name),
        outcome.loser.delta(),
        outcome.loser.after.rating,
    )
}
