// Configuration loading and parsing (scorer.toml).
//
// Everything has a built-in default; a config file is only needed to change
// the lineup slot quotas or make team matching strict. Example:
//
//   [matching]
//   strict_team = true
//
//   [lineup]
//   slot_order = ["QB", "RB", "WR", "TE"]
//
//   [lineup.slots]
//   QB = 1
//   RB = 1
//   WR = 2
//   TE = 1

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::scoring::LineupSlots;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file: {source}")]
    ParseError { source: toml::de::Error },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Assembled config
// ---------------------------------------------------------------------------

/// Validated application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub lineup: LineupSlots,
    pub strict_team: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            lineup: LineupSlots::default(),
            strict_team: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Raw file structs
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    lineup: Option<LineupSection>,
    #[serde(default)]
    matching: Option<MatchingSection>,
}

/// Slot counts live in a table, but iteration order comes from the explicit
/// `slot_order` array; TOML tables carry no usable ordering.
#[derive(Debug, Deserialize)]
struct LineupSection {
    slot_order: Vec<String>,
    slots: HashMap<String, usize>,
}

#[derive(Debug, Default, Deserialize)]
struct MatchingSection {
    #[serde(default)]
    strict_team: bool,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load configuration from an optional TOML file. `None` yields the default
/// configuration (standard lineup, loose team matching).
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match path {
        Some(path) => path,
        None => return Ok(Config::default()),
    };

    let text = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_config(&text)
}

/// Parse and validate config text (enables testing without temp files).
pub(crate) fn parse_config(text: &str) -> Result<Config, ConfigError> {
    let file: ConfigFile =
        toml::from_str(text).map_err(|source| ConfigError::ParseError { source })?;

    let lineup = match file.lineup {
        Some(section) => build_lineup(section)?,
        None => LineupSlots::default(),
    };
    let strict_team = file.matching.unwrap_or_default().strict_team;

    Ok(Config {
        lineup,
        strict_team,
    })
}

fn build_lineup(section: LineupSection) -> Result<LineupSlots, ConfigError> {
    if section.slot_order.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "lineup.slot_order".into(),
            message: "must list at least one position".into(),
        });
    }

    let counts: HashMap<String, usize> = section
        .slots
        .iter()
        .map(|(pos, &count)| (pos.trim().to_uppercase(), count))
        .collect();

    let mut ordered = Vec::with_capacity(section.slot_order.len());
    for raw_pos in &section.slot_order {
        let pos = raw_pos.trim().to_uppercase();
        if ordered.iter().any(|(p, _): &(String, usize)| *p == pos) {
            return Err(ConfigError::ValidationError {
                field: "lineup.slot_order".into(),
                message: format!("position `{pos}` listed more than once"),
            });
        }
        let count = counts.get(&pos).copied().ok_or_else(|| {
            ConfigError::ValidationError {
                field: "lineup.slots".into(),
                message: format!("no slot count for position `{pos}`"),
            }
        })?;
        if count == 0 {
            return Err(ConfigError::ValidationError {
                field: "lineup.slots".into(),
                message: format!("slot count for `{pos}` must be at least 1"),
            });
        }
        ordered.push((pos, count));
    }

    // Counts for positions never listed in slot_order would silently do
    // nothing; reject them instead.
    for pos in counts.keys() {
        if !ordered.iter().any(|(p, _)| p == pos) {
            return Err(ConfigError::ValidationError {
                field: "lineup.slot_order".into(),
                message: format!("position `{pos}` has a slot count but no order entry"),
            });
        }
    }

    Ok(LineupSlots::new(ordered))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config.lineup, LineupSlots::default());
        assert!(!config.strict_team);
    }

    #[test]
    fn defaults_from_empty_text() {
        let config = parse_config("").unwrap();
        assert_eq!(config.lineup, LineupSlots::default());
        assert!(!config.strict_team);
    }

    #[test]
    fn parses_full_config() {
        let config = parse_config(
            r#"
            [matching]
            strict_team = true

            [lineup]
            slot_order = ["QB", "RB", "WR", "TE"]

            [lineup.slots]
            QB = 1
            RB = 2
            WR = 3
            TE = 1
            "#,
        )
        .unwrap();

        assert!(config.strict_team);
        assert_eq!(config.lineup.count_for("RB"), Some(2));
        assert_eq!(config.lineup.count_for("WR"), Some(3));
        let order: Vec<&str> = config.lineup.iter().map(|(p, _)| p).collect();
        assert_eq!(order, vec!["QB", "RB", "WR", "TE"]);
    }

    #[test]
    fn lineup_positions_are_case_folded() {
        let config = parse_config(
            r#"
            [lineup]
            slot_order = ["qb"]
            [lineup.slots]
            qb = 1
            "#,
        )
        .unwrap();
        assert_eq!(config.lineup.count_for("QB"), Some(1));
    }

    #[test]
    fn rejects_order_entry_without_count() {
        let err = parse_config(
            r#"
            [lineup]
            slot_order = ["QB", "RB"]
            [lineup.slots]
            QB = 1
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn rejects_count_without_order_entry() {
        let err = parse_config(
            r#"
            [lineup]
            slot_order = ["QB"]
            [lineup.slots]
            QB = 1
            RB = 1
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn rejects_zero_count() {
        let err = parse_config(
            r#"
            [lineup]
            slot_order = ["QB"]
            [lineup.slots]
            QB = 0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn rejects_duplicate_order_entry() {
        let err = parse_config(
            r#"
            [lineup]
            slot_order = ["QB", "qb"]
            [lineup.slots]
            QB = 1
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn rejects_empty_slot_order() {
        let err = parse_config(
            r#"
            [lineup]
            slot_order = []
            [lineup.slots]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = parse_config("[[lineup").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn missing_file_error() {
        let err = load_config(Some(Path::new("/nonexistent/scorer.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }
}
