mod appearances;
mod goals;
mod goals_per_game;
mod set_pieces;

pub use appearances::AppearancesRanking;
pub use goals::GoalsRanking;
pub use goals_per_game::{GoalsPerGameRanking, MIN_APPEARANCES_FOR_RATIO};
pub use set_pieces::{CornersRanking, PenaltiesRanking};

use std::sync::Arc;

use goals_per_game::round_ratio;
use super::{Leaderboard, PlayerTotals, RankingCategory, RankingEntry, StatValue};

/// Entries shown per leaderboard unless the caller asks otherwise
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// A single leaderboard column: which players qualify and what they're
/// ranked on.
pub trait Ranking: Send + Sync {
    fn category(&self) -> RankingCategory;

    fn value(&self, totals: &PlayerTotals) -> StatValue;

    fn is_eligible(&self, _totals: &PlayerTotals) -> bool {
        true
    }
}

/// The leaderboards in display order
pub fn default_rankings() -> Vec<Arc<dyn Ranking>> {
    vec![
        Arc::new(GoalsRanking::new()),
        Arc::new(GoalsPerGameRanking::new()),
        Arc::new(CornersRanking::new()),
        Arc::new(PenaltiesRanking::new()),
        Arc::new(AppearancesRanking::new()),
    ]
}

/// Ranks eligible players by value, highest first, skipping zero values.
/// The sort is stable, so equal values keep their input order. Ratios are
/// reported rounded to two decimals.
pub fn rank(ranking: &dyn Ranking, totals: &[PlayerTotals], limit: usize) -> Vec<RankingEntry> {
    let mut scored: Vec<(&PlayerTotals, StatValue)> = totals
        .iter()
        .filter(|player| ranking.is_eligible(player))
        .map(|player| (player, ranking.value(player)))
        .filter(|(_, value)| !value.is_zero())
        .collect();

    scored.sort_by(|(_, a), (_, b)| b.as_f64().total_cmp(&a.as_f64()));

    scored
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, (player, value))| RankingEntry {
            rank: index + 1,
            player_name: player.player_name.clone(),
            value: round_ratio(value),
            appearances: player.appearances,
        })
        .collect()
}

pub fn leaderboard(ranking: &dyn Ranking, totals: &[PlayerTotals], limit: usize) -> Leaderboard {
    Leaderboard {
        category: ranking.category(),
        entries: rank(ranking, totals, limit),
    }
}
