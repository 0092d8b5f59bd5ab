// Tiered candidate lookup.
//
// Resolves a roster entry against the week's stat pool. Position is a hard
// filter; team agreement is preferred but optional; name agreement comes from
// the fuzzy matcher. Within each tier the scan runs in the candidates'
// supplied order and the first fuzzy match wins, so resolution is a pure
// function of input ordering and results stay reproducible.

use tracing::debug;

use crate::matching::fuzzy::names_match;
use crate::model::{RosterEntry, StatLine};

/// Find the stat line for a roster entry, or `None` if no candidate passes.
///
/// Tiers, in order:
/// 1. Filter candidates to the entry's position (upper-cased, trimmed).
///    An empty result is an immediate miss; position never relaxes.
/// 2. Scan position matches with the same team code, in supplied order,
///    returning the first fuzzy name match.
/// 3. Unless `strict_team`, rescan all position matches ignoring team.
pub fn resolve<'a>(
    entry: &RosterEntry,
    candidates: &'a [StatLine],
    strict_team: bool,
) -> Option<&'a StatLine> {
    let want_position = entry.position.trim().to_uppercase();
    let want_team = entry.team_code.trim().to_uppercase();

    let position_matches: Vec<&StatLine> = candidates
        .iter()
        .filter(|c| c.position.trim().to_uppercase() == want_position)
        .collect();

    if position_matches.is_empty() {
        debug!(
            player = %entry.player_name,
            position = %want_position,
            "no candidates at position"
        );
        return None;
    }

    // Tier 2: exact team, first fuzzy match wins.
    for candidate in position_matches
        .iter()
        .filter(|c| c.team_code.trim().to_uppercase() == want_team)
    {
        if names_match(&entry.player_name, &candidate.player_name) {
            return Some(*candidate);
        }
    }

    // Tier 3: the roster's team code may be stale or abbreviated differently.
    if !strict_team {
        for candidate in &position_matches {
            if names_match(&entry.player_name, &candidate.player_name) {
                debug!(
                    player = %entry.player_name,
                    roster_team = %want_team,
                    matched_team = %candidate.team_code,
                    "matched ignoring team code"
                );
                return Some(*candidate);
            }
        }
    }

    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
