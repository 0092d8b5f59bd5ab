// Result presentation: plain-text standings and CSV export.

use std::fmt::Write as _;
use std::io;

use crate::model::TeamResult;

/// Render ranked team results as a human-readable standings report.
pub fn format_team_results(results: &[TeamResult]) -> String {
    let mut out = String::new();
    for (rank, team) in results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} - {} Week {}",
            rank + 1,
            team.fantasy_team,
            team.season,
            team.week
        );
        let _ = writeln!(out, "   Total Points: {}", team.total_points);
        let _ = writeln!(out, "   Lineup:");
        for score in &team.lineup {
            let _ = writeln!(
                out,
                "     {} ({}, {}): {}",
                score.player_name, score.position, score.team_code, score.points
            );
        }
    }
    out
}

/// Flatten team results to CSV, one row per lineup player.
pub fn write_csv<W: io::Write>(results: &[TeamResult], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "fantasy_team",
        "week",
        "season",
        "player_name",
        "position",
        "team",
        "points",
        "team_total",
    ])?;

    for team in results {
        for score in &team.lineup {
            csv_writer.write_record([
                team.fantasy_team.clone(),
                team.week.to_string(),
                team.season.to_string(),
                score.player_name.clone(),
                score.position.clone(),
                score.team_code.clone(),
                score.points.to_string(),
                team.total_points.to_string(),
            ])?;
        }
    }

    csv_writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
