// Team totals and league ranking.

use std::cmp::Ordering;

use crate::model::{round2, PlayerScore, ScoreError, TeamResult};

/// Sum a selected lineup into a team result.
///
/// The lineup points are already rounded to 2 decimals at construction, so
/// the rounded sum here agrees with the constructor's invariant check.
pub fn aggregate_team(
    fantasy_team: &str,
    week: u8,
    season: u16,
    lineup: Vec<PlayerScore>,
) -> Result<TeamResult, ScoreError> {
    let total = round2(lineup.iter().map(|p| p.points).sum());
    TeamResult::new(fantasy_team, week, season, total, lineup)
}

/// Order team results by total points descending.
///
/// The sort is stable: teams with equal totals keep their existing order,
/// which is the order their fantasy team was first encountered in the roster.
pub fn rank_teams(mut results: Vec<TeamResult>) -> Vec<TeamResult> {
    results.sort_by(|a, b| {
        b.total_points
            .partial_cmp(&a.total_points)
            .unwrap_or(Ordering::Equal)
    });
    results
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
