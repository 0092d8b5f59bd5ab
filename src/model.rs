// Core data model for weekly fantasy scoring.
//
// The scoring pipeline consumes RosterEntry and StatLine values owned by the
// ingestion layer and produces PlayerScore and TeamResult values. The derived
// types enforce their invariants at construction time: a PlayerScore can
// never hold negative points, and a TeamResult's declared total must match
// the sum of its lineup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by the scoring pipeline.
///
/// `PlayerNotFound` is an external-data condition surfaced when a roster
/// entry cannot be resolved against the week's stat pool. `InvalidScore` and
/// `InconsistentTotal` indicate programming defects and are never recovered
/// from; they exist to catch formula or aggregation bugs at the boundary
/// where the bad value would otherwise escape.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error(
        "no stat line found for {player} ({position}, {team}) on {fantasy_team} \
         for {season} week {week}"
    )]
    PlayerNotFound {
        player: String,
        position: String,
        team: String,
        fantasy_team: String,
        season: u16,
        week: u8,
    },

    #[error("fantasy points for {player} are negative: {points}")]
    InvalidScore { player: String, points: f64 },

    #[error(
        "declared total {declared} for {fantasy_team} does not match \
         summed lineup points {computed}"
    )]
    InconsistentTotal {
        fantasy_team: String,
        declared: f64,
        computed: f64,
    },
}

// ---------------------------------------------------------------------------
// Input types (owned by the ingestion layer)
// ---------------------------------------------------------------------------

/// One player assignment to one fantasy team, as declared in the roster CSV.
///
/// Position and team code are trimmed and upper-cased at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RosterEntry {
    pub player_name: String,
    pub position: String,
    pub team_code: String,
    pub fantasy_team: String,
}

/// One externally sourced stat line for a real player in a single week.
///
/// Stat fields that are absent in the source data decode as zero; a missing
/// stat is never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub player_name: String,
    #[serde(default)]
    pub team_code: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub passing_yards: f64,
    #[serde(default)]
    pub passing_tds: f64,
    #[serde(default)]
    pub interceptions: f64,
    #[serde(default)]
    pub rushing_yards: f64,
    #[serde(default)]
    pub rushing_tds: f64,
    #[serde(default)]
    pub receiving_yards: f64,
    #[serde(default)]
    pub receiving_tds: f64,
    #[serde(default)]
    pub receptions: f64,
}

// ---------------------------------------------------------------------------
// Derived types (owned by the pipeline)
// ---------------------------------------------------------------------------

/// A resolved player's fantasy points for a specific week.
///
/// Construct through [`PlayerScore::new`], which rounds to 2 decimals and
/// rejects negative totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerScore {
    pub player_name: String,
    pub team_code: String,
    pub position: String,
    pub week: u8,
    pub season: u16,
    pub points: f64,
}

impl PlayerScore {
    /// Build a player score, rounding `points` to 2 decimals.
    ///
    /// Rounding happens here, before any aggregation, so that team totals
    /// are sums of already-rounded values.
    pub fn new(
        player_name: impl Into<String>,
        team_code: &str,
        position: &str,
        week: u8,
        season: u16,
        points: f64,
    ) -> Result<Self, ScoreError> {
        let player_name = player_name.into();
        let points = round2(points);
        if points < 0.0 {
            return Err(ScoreError::InvalidScore {
                player: player_name,
                points,
            });
        }
        Ok(PlayerScore {
            player_name,
            team_code: team_code.trim().to_uppercase(),
            position: position.trim().to_uppercase(),
            week,
            season,
            points,
        })
    }
}

/// A fantasy team's selected lineup and total for a week.
///
/// Construct through [`TeamResult::new`]; the declared total must agree with
/// the summed lineup points within 0.01.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamResult {
    pub fantasy_team: String,
    pub week: u8,
    pub season: u16,
    pub total_points: f64,
    pub lineup: Vec<PlayerScore>,
}

impl TeamResult {
    /// Build a team result, verifying the declared total against the lineup.
    ///
    /// The 0.01 tolerance absorbs floating rounding in the sum; anything
    /// beyond it is an aggregation bug and fails construction.
    pub fn new(
        fantasy_team: impl Into<String>,
        week: u8,
        season: u16,
        total_points: f64,
        lineup: Vec<PlayerScore>,
    ) -> Result<Self, ScoreError> {
        let fantasy_team = fantasy_team.into();
        let computed: f64 = lineup.iter().map(|p| p.points).sum();
        if (total_points - computed).abs() > 0.01 {
            return Err(ScoreError::InconsistentTotal {
                fantasy_team,
                declared: total_points,
                computed,
            });
        }
        Ok(TeamResult {
            fantasy_team,
            week,
            season,
            total_points,
            lineup,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn sample_score(name: &str, points: f64) -> PlayerScore {
        PlayerScore::new(name, "KC", "QB", 3, 2024, points).expect("valid score")
    }

    #[test]
    fn player_score_rounds_to_two_decimals() {
        let score = sample_score("Patrick Mahomes", 22.456);
        assert!(approx_eq(score.points, 22.46, 1e-9));
    }

    #[test]
    fn player_score_normalizes_team_and_position() {
        let score = PlayerScore::new("Jordan Love", " gb ", " qb ", 1, 2024, 18.0).unwrap();
        assert_eq!(score.team_code, "GB");
        assert_eq!(score.position, "QB");
    }

    #[test]
    fn player_score_rejects_negative_points() {
        let err = PlayerScore::new("Bad Data", "KC", "QB", 1, 2024, -1.5).unwrap_err();
        assert!(matches!(err, ScoreError::InvalidScore { .. }));
    }

    #[test]
    fn player_score_allows_zero() {
        let score = sample_score("Bench Warmer", 0.0);
        assert!(approx_eq(score.points, 0.0, 1e-9));
    }

    #[test]
    fn team_result_accepts_matching_total() {
        let lineup = vec![sample_score("A", 10.5), sample_score("B", 7.25)];
        let result = TeamResult::new("Team One", 3, 2024, 17.75, lineup).unwrap();
        assert!(approx_eq(result.total_points, 17.75, 1e-9));
        assert_eq!(result.lineup.len(), 2);
    }

    #[test]
    fn team_result_tolerates_tiny_rounding_drift() {
        let lineup = vec![sample_score("A", 10.5), sample_score("B", 7.25)];
        assert!(TeamResult::new("Team One", 3, 2024, 17.7542, lineup).is_ok());
    }

    #[test]
    fn team_result_rejects_inconsistent_total() {
        let lineup = vec![sample_score("A", 10.5), sample_score("B", 7.25)];
        let err = TeamResult::new("Team One", 3, 2024, 20.0, lineup).unwrap_err();
        assert!(matches!(err, ScoreError::InconsistentTotal { .. }));
    }

    #[test]
    fn team_result_empty_lineup_sums_to_zero() {
        let result = TeamResult::new("Empty", 1, 2024, 0.0, Vec::new()).unwrap();
        assert!(approx_eq(result.total_points, 0.0, 1e-9));
    }

    #[test]
    fn stat_line_defaults_missing_fields_to_zero() {
        let line: StatLine = serde_json::from_str(
            r#"{"player_name": "Jordan Love", "team_code": "GB", "position": "QB",
                "passing_yards": 250.0}"#,
        )
        .unwrap();
        assert!(approx_eq(line.passing_yards, 250.0, 1e-9));
        assert!(approx_eq(line.receptions, 0.0, 1e-9));
        assert!(approx_eq(line.interceptions, 0.0, 1e-9));
    }

    #[test]
    fn round2_behavior() {
        assert!(approx_eq(round2(3.14159), 3.14, 1e-9));
        assert!(approx_eq(round2(0.125), 0.13, 1e-9));
        assert!(approx_eq(round2(22.0), 22.0, 1e-9));
        assert!(approx_eq(round2(-0.004), 0.0, 1e-9));
    }
}
