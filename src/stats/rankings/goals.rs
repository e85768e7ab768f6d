use super::super::{PlayerTotals, RankingCategory, StatValue};
use super::Ranking;

pub struct GoalsRanking;

impl Default for GoalsRanking {
    fn default() -> Self {
        Self::new()
    }
}

impl GoalsRanking {
    pub fn new() -> Self {
        Self
    }
}

impl Ranking for GoalsRanking {
    fn category(&self) -> RankingCategory {
        RankingCategory::Goals
    }

    fn value(&self, totals: &PlayerTotals) -> StatValue {
        StatValue::Count(totals.goals)
    }
}
