use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use super::score::{club_goals_lenient, UNPLAYED_RESULT};
use super::Venue;
use crate::matches::models::{MatchModel, MatchType};

/// How many past matches feed the expected-goals average
pub const RECENT_FORM_WINDOW: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextMatchForecast {
    pub match_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub home_team: String,
    pub away_team: String,
    pub opponent: String,
    pub venue: Venue,
    pub match_type: Option<MatchType>,
    pub expected_goals: u32,
    pub recent_matches_considered: usize,
}

/// Earliest fixture on or after `today`, with the club's average goals over
/// its last few results as the expectation.
pub fn forecast_next_match(
    matches: &[MatchModel],
    club: &str,
    today: NaiveDate,
) -> Option<NextMatchForecast> {
    let next = matches
        .iter()
        .filter(|model| model.date >= today)
        .min_by_key(|model| model.kickoff())?;

    let venue = Venue::for_club(next, club);
    let (expected, considered) = expected_goals(matches, club, today);

    Some(NextMatchForecast {
        match_id: next.id.clone(),
        date: next.date,
        time: next.time,
        home_team: next.home_team.clone(),
        away_team: next.away_team.clone(),
        opponent: venue.opponent(next).to_string(),
        venue,
        match_type: next.match_type,
        expected_goals: expected,
        recent_matches_considered: considered,
    })
}

/// Rounded mean of the club's goals over the most recent past results.
/// Returns the expectation and the number of matches it was based on.
pub fn expected_goals(matches: &[MatchModel], club: &str, today: NaiveDate) -> (u32, usize) {
    let mut past: Vec<&MatchModel> = matches
        .iter()
        .filter(|model| model.date < today)
        .filter(|model| has_result(model))
        .collect();

    past.sort_by_key(|model| Reverse(model.kickoff()));
    past.truncate(RECENT_FORM_WINDOW);

    if past.is_empty() {
        return (0, 0);
    }

    let total: u32 = past
        .iter()
        .map(|model| {
            let result = model.result.as_deref().unwrap_or_default();
            club_goals_lenient(result, Venue::for_club(model, club))
        })
        .sum();

    let mean = total as f64 / past.len() as f64;
    (mean.round() as u32, past.len())
}

fn has_result(model: &MatchModel) -> bool {
    model.result.as_deref().map(str::trim).is_some_and(|result| {
        !result.is_empty() && result != UNPLAYED_RESULT
    })
}
