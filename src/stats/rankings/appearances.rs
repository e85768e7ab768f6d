use super::super::{PlayerTotals, RankingCategory, StatValue};
use super::Ranking;

/// Attendance table
pub struct AppearancesRanking;

impl Default for AppearancesRanking {
    fn default() -> Self {
        Self::new()
    }
}

impl AppearancesRanking {
    pub fn new() -> Self {
        Self
    }
}

impl Ranking for AppearancesRanking {
    fn category(&self) -> RankingCategory {
        RankingCategory::Appearances
    }

    fn value(&self, totals: &PlayerTotals) -> StatValue {
        StatValue::Count(totals.appearances)
    }
}
