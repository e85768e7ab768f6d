use std::collections::{BTreeMap, HashSet};

use super::PlayerTotals;
use crate::matches::models::MatchModel;
use crate::performance::models::PerformanceModel;

/// Groups performance rows by player and sums the attended matches.
///
/// Every player with at least one row is listed, even when never present.
/// Output is ordered by name so later rankings break ties alphabetically.
pub fn aggregate_player_totals<'a, I>(rows: I) -> Vec<PlayerTotals>
where
    I: IntoIterator<Item = &'a PerformanceModel>,
{
    let mut by_player: BTreeMap<&str, PlayerTotals> = BTreeMap::new();

    for row in rows {
        let totals = by_player
            .entry(row.player_name.as_str())
            .or_insert_with(|| PlayerTotals::new(row.player_name.as_str()));

        if row.present {
            totals.appearances = totals.appearances.saturating_add(1);
            totals.goals = totals.goals.saturating_add(row.goals);
            totals.penalties = totals.penalties.saturating_add(row.penalties);
            totals.corners = totals.corners.saturating_add(row.corners);
        }
    }

    by_player.into_values().collect()
}

/// Drops repeated fixtures, keeping the first row for each
/// (date, time, home, away) key in input order.
pub fn dedup_matches(matches: &[MatchModel]) -> Vec<&MatchModel> {
    let mut seen = HashSet::new();
    matches
        .iter()
        .filter(|model| seen.insert(model.composite_key()))
        .collect()
}
