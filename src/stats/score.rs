use serde::{Deserialize, Serialize};
use std::fmt;

use super::StatsError;
use crate::matches::models::MatchModel;

/// Placeholder stored for fixtures that have not been played yet
pub const UNPLAYED_RESULT: &str = "-";

/// Largest score, goal or set-piece count accepted for a single match
pub const MAX_GOALS_PER_MATCH: u32 = 99;

/// Parsed "home-away" result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreline {
    pub home: u32,
    pub away: u32,
}

impl Scoreline {
    /// Parses a stored result. Empty input and "-" mean not played.
    pub fn parse(raw: &str) -> Result<Option<Self>, StatsError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == UNPLAYED_RESULT {
            return Ok(None);
        }

        let (home, away) = trimmed
            .split_once('-')
            .ok_or_else(|| StatsError::InvalidScore(raw.to_string()))?;

        let side = |value: &str| {
            value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|goals| *goals <= MAX_GOALS_PER_MATCH)
                .ok_or_else(|| StatsError::InvalidScore(raw.to_string()))
        };

        Ok(Some(Self {
            home: side(home)?,
            away: side(away)?,
        }))
    }

    pub fn from_result(result: Option<&str>) -> Result<Option<Self>, StatsError> {
        match result {
            Some(raw) => Self::parse(raw),
            None => Ok(None),
        }
    }

    pub fn for_venue(&self, venue: Venue) -> ClubScore {
        match venue {
            Venue::Home => ClubScore {
                goals_for: self.home,
                goals_against: self.away,
            },
            Venue::Away => ClubScore {
                goals_for: self.away,
                goals_against: self.home,
            },
        }
    }
}

impl fmt::Display for Scoreline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    /// The club plays at home only when listed as home team; anything else
    /// counts as an away game.
    pub fn for_club(model: &MatchModel, club: &str) -> Self {
        if model.home_team == club {
            Venue::Home
        } else {
            Venue::Away
        }
    }

    pub fn opponent<'a>(&self, model: &'a MatchModel) -> &'a str {
        match self {
            Venue::Home => &model.away_team,
            Venue::Away => &model.home_team,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
}

impl Outcome {
    pub fn points(&self) -> u32 {
        match self {
            Outcome::Win => 3,
            Outcome::Draw => 1,
            Outcome::Loss => 0,
        }
    }
}

/// A result seen from the club's side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubScore {
    pub goals_for: u32,
    pub goals_against: u32,
}

impl ClubScore {
    pub fn outcome(&self) -> Outcome {
        match self.goals_for.cmp(&self.goals_against) {
            std::cmp::Ordering::Greater => Outcome::Win,
            std::cmp::Ordering::Equal => Outcome::Draw,
            std::cmp::Ordering::Less => Outcome::Loss,
        }
    }
}

/// Club score of a played match, `None` when unplayed or unparseable
pub fn club_score(model: &MatchModel, club: &str) -> Option<ClubScore> {
    Scoreline::from_result(model.result.as_deref())
        .ok()
        .flatten()
        .map(|score| score.for_venue(Venue::for_club(model, club)))
}

/// Goals the club scored, reading only the leading digits of its side.
/// Results without a separator or with an out-of-range side count as zero.
pub(crate) fn club_goals_lenient(result: &str, venue: Venue) -> u32 {
    let mut sides = result.split('-');
    let (Some(home), Some(away)) = (sides.next(), sides.next()) else {
        return 0;
    };

    let side = match venue {
        Venue::Home => home,
        Venue::Away => away,
    };

    let digits: String = side
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits
        .parse::<u32>()
        .ok()
        .filter(|goals| *goals <= MAX_GOALS_PER_MATCH)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("3-2", 3, 2)]
    #[case(" 10 - 0 ", 10, 0)]
    #[case("0-0", 0, 0)]
    fn test_parse_valid_scores(#[case] raw: &str, #[case] home: u32, #[case] away: u32) {
        assert_eq!(Scoreline::parse(raw), Ok(Some(Scoreline { home, away })));
    }

    #[rstest]
    #[case("")]
    #[case("-")]
    #[case("  -  ")]
    fn test_parse_unplayed(#[case] raw: &str) {
        assert_eq!(Scoreline::parse(raw), Ok(None));
    }

    #[rstest]
    #[case("3")]
    #[case("a-b")]
    #[case("3-")]
    #[case("3-2-1")]
    #[case("-2-1")]
    #[case("100-0")]
    #[case("4000000000-0")]
    #[case("1-99999999999")]
    fn test_parse_invalid(#[case] raw: &str) {
        assert!(matches!(
            Scoreline::parse(raw),
            Err(StatsError::InvalidScore(_))
        ));
    }

    #[test]
    fn test_display_is_canonical() {
        let score = Scoreline::parse(" 4 -1").unwrap().unwrap();
        assert_eq!(score.to_string(), "4-1");
    }

    #[test]
    fn test_for_venue_flips_away_scores() {
        let score = Scoreline { home: 1, away: 5 };

        let away = score.for_venue(Venue::Away);
        assert_eq!(away.goals_for, 5);
        assert_eq!(away.goals_against, 1);
        assert_eq!(away.outcome(), Outcome::Win);

        let home = score.for_venue(Venue::Home);
        assert_eq!(home.outcome(), Outcome::Loss);
    }

    #[test]
    fn test_outcome_points() {
        assert_eq!(Outcome::Win.points(), 3);
        assert_eq!(Outcome::Draw.points(), 1);
        assert_eq!(Outcome::Loss.points(), 0);
        assert_eq!(serde_json::to_string(&Outcome::Draw).unwrap(), "\"D\"");
    }

    #[rstest]
    #[case("4-2", Venue::Home, 4)]
    #[case("4-2", Venue::Away, 2)]
    #[case("7", Venue::Home, 0)]
    #[case("x-3", Venue::Home, 0)]
    #[case("5abc-1", Venue::Home, 5)]
    #[case("2- 6", Venue::Away, 6)]
    #[case("4000000000-1", Venue::Home, 0)]
    fn test_club_goals_lenient(#[case] raw: &str, #[case] venue: Venue, #[case] expected: u32) {
        assert_eq!(club_goals_lenient(raw, venue), expected);
    }
}
