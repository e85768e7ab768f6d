use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// Competition a fixture belongs to
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MatchType {
    League,
    Cup,
    Friendly,
}

/// Editable fields of a fixture, shared by create and update
#[derive(Debug, Clone, PartialEq)]
pub struct MatchFields {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub home_team: String,
    pub away_team: String,
    pub result: Option<String>,
    pub match_type: Option<MatchType>,
    pub notes: Option<String>,
}

/// Database model for the matches table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchModel {
    pub id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub home_team: String,
    pub away_team: String,
    pub result: Option<String>, // "H-A", "-" while unplayed
    pub match_type: Option<MatchType>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

impl MatchModel {
    pub fn new(fields: MatchFields, created_by: Option<String>) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            date: fields.date,
            time: fields.time,
            home_team: fields.home_team,
            away_team: fields.away_team,
            result: fields.result,
            match_type: fields.match_type,
            notes: fields.notes,
            created_at: now,
            updated_at: now,
            created_by,
        }
    }

    /// Overwrites the editable fields and bumps `updated_at`
    pub fn apply(&mut self, fields: MatchFields) {
        self.date = fields.date;
        self.time = fields.time;
        self.home_team = fields.home_team;
        self.away_team = fields.away_team;
        self.result = fields.result;
        self.match_type = fields.match_type;
        self.notes = fields.notes;
        self.updated_at = Utc::now();
    }

    pub fn kickoff(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Two rows with the same key describe the same fixture
    pub fn composite_key(&self) -> (NaiveDate, NaiveTime, &str, &str) {
        (self.date, self.time, &self.home_team, &self.away_team)
    }
}
