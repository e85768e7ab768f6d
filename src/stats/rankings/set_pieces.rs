use super::super::{PlayerTotals, RankingCategory, StatValue};
use super::Ranking;

/// Goals scored straight from corners
pub struct CornersRanking;

impl Default for CornersRanking {
    fn default() -> Self {
        Self::new()
    }
}

impl CornersRanking {
    pub fn new() -> Self {
        Self
    }
}

impl Ranking for CornersRanking {
    fn category(&self) -> RankingCategory {
        RankingCategory::Corners
    }

    fn value(&self, totals: &PlayerTotals) -> StatValue {
        StatValue::Count(totals.corners)
    }
}

/// Goals scored from the spot
pub struct PenaltiesRanking;

impl Default for PenaltiesRanking {
    fn default() -> Self {
        Self::new()
    }
}

impl PenaltiesRanking {
    pub fn new() -> Self {
        Self
    }
}

impl Ranking for PenaltiesRanking {
    fn category(&self) -> RankingCategory {
        RankingCategory::Penalties
    }

    fn value(&self, totals: &PlayerTotals) -> StatValue {
        StatValue::Count(totals.penalties)
    }
}
