use serde::{Deserialize, Serialize};

use super::rankings::{rank, GoalsPerGameRanking, GoalsRanking, Ranking};
use super::{round_to, PlayerTotals, RankingEntry};

/// Size of the top scorers table on the home page
pub const TOP_SCORERS_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    /// Appearances of the most-present player, which stands in for the
    /// number of matches the squad has played.
    pub total_matches: u32,
    pub total_goals: u32,
    pub total_corners: u32,
    pub total_penalties: u32,
    pub total_appearances: u32,
    pub goals_per_match: f64,
    pub goals_per_appearance: f64,
    pub active_players: usize,
    pub total_players: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioLeader {
    pub player_name: String,
    pub ratio: f64,
    pub goals: u32,
    pub appearances: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MostAppearances {
    pub appearances: u32,
    pub players: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonHighlights {
    pub top_scorer: Option<PlayerTotals>,
    pub goals_per_game_leader: Option<RatioLeader>,
    pub most_appearances: MostAppearances,
    pub top_scorers: Vec<RankingEntry>,
}

pub fn season_summary(totals: &[PlayerTotals]) -> SeasonSummary {
    let total_matches = max_appearances(totals);
    let total_goals = sum_of(totals, |t| t.goals);
    let total_appearances = sum_of(totals, |t| t.appearances);

    SeasonSummary {
        total_matches,
        total_goals,
        total_corners: sum_of(totals, |t| t.corners),
        total_penalties: sum_of(totals, |t| t.penalties),
        total_appearances,
        goals_per_match: average(total_goals, total_matches),
        goals_per_appearance: average(total_goals, total_appearances),
        active_players: totals.iter().filter(|t| t.appearances > 0).count(),
        total_players: totals.len(),
    }
}

pub fn season_highlights(totals: &[PlayerTotals]) -> SeasonHighlights {
    let most = max_appearances(totals);
    let most_appearances = MostAppearances {
        appearances: most,
        players: totals
            .iter()
            .filter(|t| t.appearances == most)
            .map(|t| t.player_name.clone())
            .collect(),
    };

    SeasonHighlights {
        top_scorer: top_scorer(totals).cloned(),
        goals_per_game_leader: goals_per_game_leader(totals),
        most_appearances,
        top_scorers: rank(&GoalsRanking::new(), totals, TOP_SCORERS_LIMIT),
    }
}

/// First player holding the highest goal count, even if that count is zero
pub fn top_scorer(totals: &[PlayerTotals]) -> Option<&PlayerTotals> {
    totals.iter().fold(None, |best, current| match best {
        Some(prev) if current.goals <= prev.goals => Some(prev),
        _ => Some(current),
    })
}

pub fn goals_per_game_leader(totals: &[PlayerTotals]) -> Option<RatioLeader> {
    let ranking = GoalsPerGameRanking::new();

    let mut eligible: Vec<&PlayerTotals> = totals
        .iter()
        .filter(|t| ranking.is_eligible(t))
        .collect();
    eligible.sort_by(|a, b| {
        let a = a.goals_per_game().unwrap_or_default();
        let b = b.goals_per_game().unwrap_or_default();
        b.total_cmp(&a)
    });

    eligible.first().map(|leader| RatioLeader {
        player_name: leader.player_name.clone(),
        ratio: round_to(leader.goals_per_game().unwrap_or_default(), 2),
        goals: leader.goals,
        appearances: leader.appearances,
    })
}

fn sum_of(totals: &[PlayerTotals], field: impl Fn(&PlayerTotals) -> u32) -> u32 {
    totals
        .iter()
        .fold(0u32, |acc, t| acc.saturating_add(field(t)))
}

fn max_appearances(totals: &[PlayerTotals]) -> u32 {
    totals.iter().map(|t| t.appearances).max().unwrap_or(0)
}

fn average(total: u32, count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    round_to(total as f64 / count as f64, 1)
}
