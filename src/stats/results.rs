use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::aggregate::dedup_matches;
use super::score::{ClubScore, Outcome, Scoreline, Venue};
use super::StatsError;
use crate::matches::models::{MatchModel, MatchType};

/// Which fixtures a results or leaderboard query looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTypeFilter {
    #[default]
    All,
    Only(MatchType),
}

impl MatchTypeFilter {
    /// Parses a query value; missing or "all" means no filtering
    pub fn parse(raw: Option<&str>) -> Result<Self, StatsError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::All),
            Some(value) if value.eq_ignore_ascii_case("all") => Ok(Self::All),
            Some(value) => MatchType::from_str(value)
                .map(Self::Only)
                .map_err(|_| StatsError::Validation(format!("Unknown match type: {value}"))),
        }
    }

    /// Untyped fixtures only pass the `All` filter
    pub fn accepts(&self, match_type: Option<MatchType>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => match_type == Some(*wanted),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub match_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub opponent: String,
    pub venue: Venue,
    pub match_type: Option<MatchType>,
    pub score: ClubScore,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsRecord {
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
}

impl ResultsRecord {
    fn add(&mut self, score: ClubScore) {
        let outcome = score.outcome();
        match outcome {
            Outcome::Win => self.won += 1,
            Outcome::Draw => self.drawn += 1,
            Outcome::Loss => self.lost += 1,
        }
        self.played += 1;
        self.points += outcome.points();
        self.goals_for = self.goals_for.saturating_add(score.goals_for);
        self.goals_against = self.goals_against.saturating_add(score.goals_against);
        self.goal_difference = self.goals_for as i64 - self.goals_against as i64;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsReport {
    pub filter: MatchTypeFilter,
    pub record: ResultsRecord,
    pub matches: Vec<ResultEntry>,
}

/// Played, de-duplicated fixtures in kick-off order plus the club's record.
/// Stored results that don't parse are left out.
pub fn results_report(
    matches: &[MatchModel],
    club: &str,
    filter: MatchTypeFilter,
) -> ResultsReport {
    let mut played: Vec<(&MatchModel, Scoreline)> = dedup_matches(matches)
        .into_iter()
        .filter(|model| filter.accepts(model.match_type))
        .filter_map(|model| {
            Scoreline::from_result(model.result.as_deref())
                .ok()
                .flatten()
                .map(|score| (model, score))
        })
        .collect();

    played.sort_by_key(|(model, _)| model.kickoff());

    let mut record = ResultsRecord::default();
    let entries: Vec<ResultEntry> = played
        .into_iter()
        .map(|(model, scoreline)| {
            let venue = Venue::for_club(model, club);
            let score = scoreline.for_venue(venue);
            record.add(score);

            ResultEntry {
                match_id: model.id.clone(),
                date: model.date,
                time: model.time,
                opponent: venue.opponent(model).to_string(),
                venue,
                match_type: model.match_type,
                score,
                outcome: score.outcome(),
            }
        })
        .collect();

    ResultsReport {
        filter,
        record,
        matches: entries,
    }
}
