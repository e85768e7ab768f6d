use super::super::{round_to, PlayerTotals, RankingCategory, StatValue};
use super::Ranking;

/// Players need this many appearances before their ratio is ranked
pub const MIN_APPEARANCES_FOR_RATIO: u32 = 3;

pub struct GoalsPerGameRanking {
    min_appearances: u32,
}

impl Default for GoalsPerGameRanking {
    fn default() -> Self {
        Self::new()
    }
}

impl GoalsPerGameRanking {
    pub fn new() -> Self {
        Self {
            min_appearances: MIN_APPEARANCES_FOR_RATIO,
        }
    }

    pub fn with_min_appearances(min_appearances: u32) -> Self {
        Self { min_appearances }
    }
}

impl Ranking for GoalsPerGameRanking {
    fn category(&self) -> RankingCategory {
        RankingCategory::GoalsPerGame
    }

    // Ordering uses the exact ratio; only the reported value is rounded.
    fn value(&self, totals: &PlayerTotals) -> StatValue {
        StatValue::Ratio(totals.goals_per_game().unwrap_or_default())
    }

    fn is_eligible(&self, totals: &PlayerTotals) -> bool {
        totals.appearances >= self.min_appearances.max(1)
    }
}

/// Rounds ratio entries to two decimals after ranking
pub(crate) fn round_ratio(value: StatValue) -> StatValue {
    match value {
        StatValue::Ratio(ratio) => StatValue::Ratio(round_to(ratio, 2)),
        count => count,
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::totals;
    use super::super::{rank, DEFAULT_LEADERBOARD_LIMIT};
    use super::*;

    #[test]
    fn requires_minimum_appearances() {
        let players = vec![
            totals("Elias", 2, 8, 0, 0),
            totals("Stan", 3, 3, 0, 0),
        ];

        let entries = rank(&GoalsPerGameRanking::new(), &players, DEFAULT_LEADERBOARD_LIMIT);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].player_name, "Stan");
        assert_eq!(entries[0].value, StatValue::Ratio(1.0));
    }

    #[test]
    fn orders_by_exact_ratio() {
        // 2/3 = 0.667 and 4/6 = 0.667 once rounded, 5/7 = 0.714
        let players = vec![
            totals("Arne", 3, 2, 0, 0),
            totals("Brian", 7, 5, 0, 0),
            totals("Toby", 6, 4, 0, 0),
        ];

        let entries = rank(&GoalsPerGameRanking::new(), &players, DEFAULT_LEADERBOARD_LIMIT);
        let names: Vec<_> = entries.iter().map(|e| e.player_name.as_str()).collect();

        assert_eq!(names, vec!["Brian", "Arne", "Toby"]);
        assert_eq!(round_ratio(entries[0].value), StatValue::Ratio(0.71));
    }

    #[test]
    fn custom_minimum() {
        let players = vec![totals("Vik", 1, 2, 0, 0)];
        let ranking = GoalsPerGameRanking::with_min_appearances(1);

        let entries = rank(&ranking, &players, DEFAULT_LEADERBOARD_LIMIT);
        assert_eq!(entries[0].value, StatValue::Ratio(2.0));
    }

    #[test]
    fn round_ratio_leaves_counts() {
        assert_eq!(round_ratio(StatValue::Count(3)), StatValue::Count(3));
    }
}
