// Scoring pipeline: point formulas, lineup selection, team aggregation.
//
// `score_week` is the synchronous core. It takes the ingested roster and the
// week's stat pool as immutable snapshots and produces ranked team results;
// given identical input ordering the output is byte-for-byte deterministic,
// because every tie-break (resolver first-match, lineup stable sort, ranking
// stable sort) is defined in terms of input order.

pub mod aggregate;
pub mod lineup;
pub mod points;

pub use aggregate::{aggregate_team, rank_teams};
pub use lineup::{select_lineup, LineupSlots};
pub use points::compute_points;

use tracing::info;

use crate::matching::resolve;
use crate::model::{PlayerScore, RosterEntry, ScoreError, StatLine, TeamResult};

/// Score every fantasy team for one week.
///
/// Roster entries are grouped by fantasy team in first-encounter order. Each
/// entry is resolved against `stats`, scored, and the per-team lineup is
/// selected under `slots`; results come back ranked by total descending.
///
/// A roster entry that resolves to no stat line fails the whole run with
/// [`ScoreError::PlayerNotFound`] carrying the player's full context. There
/// is no partial result for a team with an unresolved player.
pub fn score_week(
    roster: &[RosterEntry],
    stats: &[StatLine],
    week: u8,
    season: u16,
    slots: &LineupSlots,
    strict_team: bool,
) -> Result<Vec<TeamResult>, ScoreError> {
    // Group by fantasy team, preserving the order teams first appear in the
    // roster. This ordering is what breaks ranking ties later.
    let mut teams: Vec<(&str, Vec<&RosterEntry>)> = Vec::new();
    for entry in roster {
        match teams
            .iter_mut()
            .find(|(name, _)| *name == entry.fantasy_team)
        {
            Some((_, members)) => members.push(entry),
            None => teams.push((entry.fantasy_team.as_str(), vec![entry])),
        }
    }

    let mut results = Vec::with_capacity(teams.len());
    for (fantasy_team, members) in teams {
        let mut scored = Vec::with_capacity(members.len());
        for entry in members {
            let line =
                resolve(entry, stats, strict_team).ok_or_else(|| ScoreError::PlayerNotFound {
                    player: entry.player_name.clone(),
                    position: entry.position.clone(),
                    team: entry.team_code.clone(),
                    fantasy_team: fantasy_team.to_string(),
                    season,
                    week,
                })?;
            let points = compute_points(line, &entry.position);
            scored.push(PlayerScore::new(
                line.player_name.clone(),
                &line.team_code,
                &entry.position,
                week,
                season,
                points,
            )?);
        }

        let selected = select_lineup(&scored, slots);
        info!(
            fantasy_team,
            rostered = scored.len(),
            starting = selected.len(),
            "lineup selected"
        );
        results.push(aggregate_team(fantasy_team, week, season, selected)?);
    }

    Ok(rank_teams(results))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
