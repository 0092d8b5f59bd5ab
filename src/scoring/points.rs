// Half-PPR point formulas.
//
// QBs score on passing plus rushing; every other position scores on rushing
// plus receiving with half a point per reception. Stat fields default to
// zero upstream, so a missing stat never fails here.

use crate::model::StatLine;

/// Compute raw fantasy points for a stat line at the given position.
///
/// - QB: passing yards / 25, 4 per passing TD, -2 per interception,
///   rushing yards / 10, 6 per rushing TD.
/// - Everyone else (RB, WR, TE, ...): rushing yards / 10, 6 per rushing TD,
///   receiving yards / 10, 6 per receiving TD, 0.5 per reception.
///
/// Returns the unrounded total; rounding to 2 decimals happens when the
/// [`crate::model::PlayerScore`] is constructed.
pub fn compute_points(line: &StatLine, position: &str) -> f64 {
    match position.trim().to_uppercase().as_str() {
        "QB" => {
            line.passing_yards / 25.0 + line.passing_tds * 4.0 - line.interceptions * 2.0
                + line.rushing_yards / 10.0
                + line.rushing_tds * 6.0
        }
        _ => {
            line.rushing_yards / 10.0
                + line.rushing_tds * 6.0
                + line.receiving_yards / 10.0
                + line.receiving_tds * 6.0
                + line.receptions * 0.5
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
