// Roster CSV ingestion.
//
// Reads the league roster file: one row per player assignment with the
// fantasy team, player name, position, and NFL team. Header spellings vary
// between exports ("player name", "player_name", plain "name"), so headers
// are normalized and matched against a small alias table. Rows with missing
// required values are skipped with a warning rather than failing the load.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::model::RosterEntry;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("roster file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read roster file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error in roster file: {source}")]
    Csv { source: csv::Error },

    #[error("missing required columns {missing:?}; found columns {found:?}")]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Header matching
// ---------------------------------------------------------------------------

/// Accepted header spellings per logical column, after normalization.
/// Covers the underscore, concatenated, and bare variants seen in exports.
const FANTASY_TEAM_ALIASES: &[&str] = &["fantasy_team", "fantasyteam"];
const PLAYER_NAME_ALIASES: &[&str] = &["player_name", "playername", "name"];
const PLAYER_POSITION_ALIASES: &[&str] = &["player_position", "playerposition", "position"];
const PLAYER_TEAM_ALIASES: &[&str] = &["player_team", "playerteam", "team"];

/// Normalize a header cell: trim, lowercase, spaces to underscores.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

fn find_column(normalized: &[String], aliases: &[&str]) -> Option<usize> {
    normalized
        .iter()
        .position(|h| aliases.contains(&h.as_str()))
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load roster entries from a CSV file.
pub fn load_roster(path: &Path) -> Result<Vec<RosterEntry>, RosterError> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            RosterError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RosterError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    load_roster_from_reader(file)
}

/// Load roster entries from any reader (enables testing without temp files).
pub fn load_roster_from_reader<R: Read>(reader: R) -> Result<Vec<RosterEntry>, RosterError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|source| RosterError::Csv { source })?
        .clone();
    let normalized: Vec<String> = headers.iter().map(normalize_header).collect();

    let columns = [
        ("fantasy_team", find_column(&normalized, FANTASY_TEAM_ALIASES)),
        ("player_name", find_column(&normalized, PLAYER_NAME_ALIASES)),
        (
            "player_position",
            find_column(&normalized, PLAYER_POSITION_ALIASES),
        ),
        ("player_team", find_column(&normalized, PLAYER_TEAM_ALIASES)),
    ];

    let missing: Vec<String> = columns
        .iter()
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(RosterError::MissingColumns {
            missing,
            found: normalized,
        });
    }

    // Unwraps are safe: the missing-column check above already ran.
    let fantasy_team_idx = columns[0].1.expect("checked above");
    let player_name_idx = columns[1].1.expect("checked above");
    let position_idx = columns[2].1.expect("checked above");
    let team_idx = columns[3].1.expect("checked above");

    let mut entries = Vec::new();
    for (row_number, result) in csv_reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping malformed roster row {}: {}", row_number + 2, e);
                continue;
            }
        };

        let field = |idx: usize| record.get(idx).unwrap_or("").trim();
        let fantasy_team = field(fantasy_team_idx);
        let player_name = field(player_name_idx);
        let position = field(position_idx);
        let team = field(team_idx);

        if fantasy_team.is_empty() || player_name.is_empty() || position.is_empty() || team.is_empty()
        {
            warn!(
                "skipping roster row {} with missing values",
                row_number + 2
            );
            continue;
        }

        entries.push(RosterEntry {
            player_name: player_name.to_string(),
            position: position.to_uppercase(),
            team_code: team.to_uppercase(),
            fantasy_team: fantasy_team.to_string(),
        });
    }

    Ok(entries)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
