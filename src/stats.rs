// Weekly stat acquisition.
//
// The Fantasy Football Data Pros API serves one JSON array per (season,
// week), with per-player stats nested in passing/rushing/receiving groups.
// Both the HTTP client and the local snapshot reader decode that shape into
// flat `StatLine`s; absent groups or fields decode as zero. Fetched weeks
// are cached in-process so repeated lookups hit the network once.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::info;

use crate::model::StatLine;

/// Default FFDP endpoint; the week URL is `{base}/{season}/{week}`.
pub const FFDP_BASE_URL: &str = "https://www.fantasyfootballdatapros.com/api/players";

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("failed to build HTTP client: {source}")]
    Client { source: reqwest::Error },

    #[error("request for {season} week {week} failed: {source}")]
    Request {
        season: u16,
        week: u8,
        source: reqwest::Error,
    },

    #[error("failed to decode stats for {season} week {week}: {source}")]
    Decode {
        season: u16,
        week: u8,
        source: reqwest::Error,
    },

    #[error("failed to read snapshot {path}: {source}")]
    SnapshotIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse snapshot {path}: {source}")]
    SnapshotJson {
        path: PathBuf,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Source trait
// ---------------------------------------------------------------------------

/// Supplier of one week's stat lines.
#[async_trait]
pub trait StatSource {
    async fn fetch_week(&self, season: u16, week: u8) -> Result<Vec<StatLine>, StatsError>;
}

// ---------------------------------------------------------------------------
// Raw wire structs (private) — FFDP format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawPlayerWeek {
    player_name: String,
    #[serde(default, alias = "recent_team")]
    team: String,
    #[serde(default)]
    position: String,
    #[serde(default)]
    stats: RawStatGroups,
}

#[derive(Debug, Default, Deserialize)]
struct RawStatGroups {
    #[serde(default)]
    passing: RawPassing,
    #[serde(default)]
    rushing: RawRushing,
    #[serde(default)]
    receiving: RawReceiving,
}

#[derive(Debug, Default, Deserialize)]
struct RawPassing {
    #[serde(default, alias = "passing_yards")]
    passing_yds: f64,
    #[serde(default, alias = "passing_tds")]
    passing_td: f64,
    #[serde(default, alias = "interceptions")]
    int: f64,
}

#[derive(Debug, Default, Deserialize)]
struct RawRushing {
    #[serde(default, alias = "rushing_yards")]
    rushing_yds: f64,
    #[serde(default, alias = "rushing_tds")]
    rushing_td: f64,
}

#[derive(Debug, Default, Deserialize)]
struct RawReceiving {
    #[serde(default, alias = "receiving_yards")]
    receiving_yds: f64,
    #[serde(default, alias = "receiving_tds")]
    receiving_td: f64,
    #[serde(default)]
    receptions: f64,
}

impl From<RawPlayerWeek> for StatLine {
    fn from(raw: RawPlayerWeek) -> Self {
        StatLine {
            player_name: raw.player_name.trim().to_string(),
            team_code: raw.team.trim().to_uppercase(),
            position: raw.position.trim().to_uppercase(),
            passing_yards: raw.stats.passing.passing_yds,
            passing_tds: raw.stats.passing.passing_td,
            interceptions: raw.stats.passing.int,
            rushing_yards: raw.stats.rushing.rushing_yds,
            rushing_tds: raw.stats.rushing.rushing_td,
            receiving_yards: raw.stats.receiving.receiving_yds,
            receiving_tds: raw.stats.receiving.receiving_td,
            receptions: raw.stats.receiving.receptions,
        }
    }
}

fn decode_week(raw: Vec<RawPlayerWeek>) -> Vec<StatLine> {
    raw.into_iter().map(StatLine::from).collect()
}

// ---------------------------------------------------------------------------
// FFDP HTTP client
// ---------------------------------------------------------------------------

/// HTTP stat source backed by the FFDP API, with a per-week cache.
pub struct FfdpClient {
    http: reqwest::Client,
    base_url: String,
    cache: Mutex<HashMap<(u16, u8), Vec<StatLine>>>,
}

impl FfdpClient {
    pub fn new() -> Result<Self, StatsError> {
        Self::with_base_url(FFDP_BASE_URL)
    }

    /// Build a client against a non-default base URL (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, StatsError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| StatsError::Client { source })?;
        Ok(FfdpClient {
            http,
            base_url: base_url.into(),
            cache: Mutex::new(HashMap::new()),
        })
    }
}

#[async_trait]
impl StatSource for FfdpClient {
    async fn fetch_week(&self, season: u16, week: u8) -> Result<Vec<StatLine>, StatsError> {
        let key = (season, week);
        {
            let cache = self.cache.lock().await;
            if let Some(lines) = cache.get(&key) {
                return Ok(lines.clone());
            }
        }

        let url = format!("{}/{}/{}", self.base_url, season, week);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| StatsError::Request {
                season,
                week,
                source,
            })?;

        let raw: Vec<RawPlayerWeek> = response
            .json()
            .await
            .map_err(|source| StatsError::Decode {
                season,
                week,
                source,
            })?;

        let lines = decode_week(raw);
        info!(season, week, count = lines.len(), "fetched weekly stats");

        self.cache.lock().await.insert(key, lines.clone());
        Ok(lines)
    }
}

// ---------------------------------------------------------------------------
// Local snapshot source
// ---------------------------------------------------------------------------

/// Stat source reading the same JSON shape from a local file. Used for
/// offline runs and tests; the (season, week) arguments only label errors.
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotSource { path: path.into() }
    }
}

#[async_trait]
impl StatSource for SnapshotSource {
    async fn fetch_week(&self, _season: u16, _week: u8) -> Result<Vec<StatLine>, StatsError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| StatsError::SnapshotIo {
                path: self.path.clone(),
                source,
            })?;
        let raw: Vec<RawPlayerWeek> =
            serde_json::from_str(&text).map_err(|source| StatsError::SnapshotJson {
                path: self.path.clone(),
                source,
            })?;
        let lines = decode_week(raw);
        info!(
            path = %self.path.display(),
            count = lines.len(),
            "loaded stats snapshot"
        );
        Ok(lines)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
