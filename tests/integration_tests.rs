// Integration tests for the weekly scorer.
//
// These tests exercise the full system end-to-end using the library crate's
// public API: roster CSV ingestion, snapshot stat decoding, the resolution
// and scoring pipeline, lineup selection, ranking, and result export.

use std::io::Cursor;
use std::io::Write;

use gridiron_scorer::config;
use gridiron_scorer::model::{RosterEntry, ScoreError, StatLine};
use gridiron_scorer::report;
use gridiron_scorer::roster::load_roster_from_reader;
use gridiron_scorer::scoring::{score_week, LineupSlots};
use gridiron_scorer::stats::{SnapshotSource, StatSource};

// ===========================================================================
// Test helpers
// ===========================================================================

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Roster CSV covering two fantasy teams -- single source of truth for the
/// end-to-end fixtures.
const ROSTER_CSV: &str = "\
fantasy_team,player name,player position,player team
Alpha Squad,P. Mahomes,QB,KC
Alpha Squad,Saquon Barkley,RB,PHI
Alpha Squad,Justin Jefferson,WR,MIN
Alpha Squad,A.J. Brown,WR,PHI
Alpha Squad,Travis Kelce,TE,KC
Beta Brigade,Jordan Love,QB,GB
Beta Brigade,Bijan Robinson,RB,ATL
Beta Brigade,CeeDee Lamb,WR,DAL
Beta Brigade,Puka Nacua,WR,LAR
Beta Brigade,Sam LaPorta,TE,DET
";

/// Week snapshot in the FFDP wire shape, matching `ROSTER_CSV`.
const WEEK_JSON: &str = r#"[
    {"player_name": "Patrick Mahomes", "team": "KC", "position": "QB",
     "stats": {"passing": {"passing_yds": 300.0, "passing_td": 3.0, "int": 1.0}}},
    {"player_name": "Jordan Love", "team": "GB", "position": "QB",
     "stats": {"passing": {"passing_yds": 250.0, "passing_td": 2.0}}},
    {"player_name": "Saquon Barkley", "team": "PHI", "position": "RB",
     "stats": {"rushing": {"rushing_yds": 100.0, "rushing_td": 1.0},
               "receiving": {"receiving_yds": 50.0, "receptions": 5.0}}},
    {"player_name": "Bijan Robinson", "team": "ATL", "position": "RB",
     "stats": {"rushing": {"rushing_yds": 80.0},
               "receiving": {"receiving_yds": 20.0, "receptions": 2.0}}},
    {"player_name": "Justin Jefferson", "team": "MIN", "position": "WR",
     "stats": {"receiving": {"receiving_yds": 130.0, "receiving_td": 1.0, "receptions": 9.0}}},
    {"player_name": "AJ Brown", "team": "PHI", "position": "WR",
     "stats": {"receiving": {"receiving_yds": 75.0, "receptions": 6.0}}},
    {"player_name": "CeeDee Lamb", "team": "DAL", "position": "WR",
     "stats": {"receiving": {"receiving_yds": 95.0, "receiving_td": 1.0, "receptions": 7.0}}},
    {"player_name": "Puka Nacua", "team": "LAR", "position": "WR",
     "stats": {"receiving": {"receiving_yds": 60.0, "receptions": 4.0}}},
    {"player_name": "Travis Kelce", "team": "KC", "position": "TE",
     "stats": {"receiving": {"receiving_yds": 70.0, "receiving_td": 1.0, "receptions": 6.0}}},
    {"player_name": "Sam LaPorta", "team": "DET", "position": "TE",
     "stats": {"receiving": {"receiving_yds": 40.0, "receptions": 3.0}}}
]"#;

fn load_fixture_roster() -> Vec<RosterEntry> {
    load_roster_from_reader(Cursor::new(ROSTER_CSV)).expect("fixture roster parses")
}

async fn load_fixture_stats() -> Vec<StatLine> {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("week.json");
    let mut file = std::fs::File::create(&path).expect("create snapshot");
    file.write_all(WEEK_JSON.as_bytes()).expect("write snapshot");

    SnapshotSource::new(&path)
        .fetch_week(2024, 3)
        .await
        .expect("fixture snapshot decodes")
}

// ===========================================================================
// End-to-end pipeline
// ===========================================================================

#[tokio::test]
async fn full_week_from_csv_and_snapshot() {
    let roster = load_fixture_roster();
    let stats = load_fixture_stats().await;

    let results =
        score_week(&roster, &stats, 3, 2024, &LineupSlots::default(), false).unwrap();

    assert_eq!(results.len(), 2);

    // Alpha: Mahomes 22.0 (abbreviated roster name resolves), Barkley 23.5,
    // Jefferson 23.5, Brown 10.5, Kelce 16.0. Lineup takes QB, RB, top-2 WR,
    // TE: 22 + 23.5 + 23.5 + 10.5 + 16 = 95.5.
    let alpha = &results[0];
    assert_eq!(alpha.fantasy_team, "Alpha Squad");
    assert!(approx_eq(alpha.total_points, 95.5, 1e-9));
    assert_eq!(alpha.lineup.len(), 5);

    // Beta: Love 18.0, Robinson 11.0, Lamb 19.0, Nacua 8.0, LaPorta 5.5
    // -> 61.5.
    let beta = &results[1];
    assert_eq!(beta.fantasy_team, "Beta Brigade");
    assert!(approx_eq(beta.total_points, 61.5, 1e-9));

    // Lineup rows follow slot order: QB, RB, WR, WR, TE.
    let positions: Vec<&str> = alpha.lineup.iter().map(|p| p.position.as_str()).collect();
    assert_eq!(positions, vec!["QB", "RB", "WR", "WR", "TE"]);

    // The WR pair is ordered by points descending.
    assert!(alpha.lineup[2].points >= alpha.lineup[3].points);
}

#[tokio::test]
async fn fuzzy_resolution_bridges_csv_and_feed_spellings() {
    let roster = load_fixture_roster();
    let stats = load_fixture_stats().await;

    let results =
        score_week(&roster, &stats, 3, 2024, &LineupSlots::default(), false).unwrap();

    // "P. Mahomes" resolved to the feed's "Patrick Mahomes"; "A.J. Brown"
    // resolved to "AJ Brown". Scores carry the feed spelling.
    let alpha_names: Vec<&str> = results[0]
        .lineup
        .iter()
        .map(|p| p.player_name.as_str())
        .collect();
    assert!(alpha_names.contains(&"Patrick Mahomes"));
    assert!(alpha_names.contains(&"AJ Brown"));
}

#[tokio::test]
async fn missing_player_fails_with_full_context() {
    let mut roster = load_fixture_roster();
    roster.push(RosterEntry {
        player_name: "Caleb Williams".into(),
        position: "QB".into(),
        team_code: "CHI".into(),
        fantasy_team: "Beta Brigade".into(),
    });
    let stats = load_fixture_stats().await;

    let err = score_week(&roster, &stats, 3, 2024, &LineupSlots::default(), false)
        .unwrap_err();
    match err {
        ScoreError::PlayerNotFound {
            player,
            fantasy_team,
            week,
            season,
            ..
        } => {
            assert_eq!(player, "Caleb Williams");
            assert_eq!(fantasy_team, "Beta Brigade");
            assert_eq!(week, 3);
            assert_eq!(season, 2024);
        }
        other => panic!("expected PlayerNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn determinism_across_identical_runs() {
    let roster = load_fixture_roster();
    let stats = load_fixture_stats().await;

    let first =
        score_week(&roster, &stats, 3, 2024, &LineupSlots::default(), false).unwrap();
    let second =
        score_week(&roster, &stats, 3, 2024, &LineupSlots::default(), false).unwrap();

    assert_eq!(format!("{first:?}"), format!("{second:?}"));
    assert_eq!(
        report::format_team_results(&first),
        report::format_team_results(&second)
    );
}

#[tokio::test]
async fn custom_lineup_config_flows_through() {
    let roster = load_fixture_roster();
    let stats = load_fixture_stats().await;

    // Single-slot lineup: only the QB counts.
    let config = config::load_config(None).unwrap();
    assert_eq!(config.lineup, LineupSlots::default());

    let qb_only = LineupSlots::new(vec![("QB".into(), 1)]);
    let results = score_week(&roster, &stats, 3, 2024, &qb_only, false).unwrap();

    assert!(approx_eq(results[0].total_points, 22.0, 1e-9)); // Mahomes
    assert!(approx_eq(results[1].total_points, 18.0, 1e-9)); // Love
    assert_eq!(results[0].lineup.len(), 1);
}

#[tokio::test]
async fn strict_team_mode_rejects_stale_team_codes() {
    let mut roster = load_fixture_roster();
    // Roster claims Mahomes plays for the Jets.
    roster[0].team_code = "NYJ".into();
    let stats = load_fixture_stats().await;

    // Loose mode still resolves him by name and position.
    assert!(score_week(&roster, &stats, 3, 2024, &LineupSlots::default(), false).is_ok());

    // Strict mode fails the run.
    let err = score_week(&roster, &stats, 3, 2024, &LineupSlots::default(), true)
        .unwrap_err();
    assert!(matches!(err, ScoreError::PlayerNotFound { .. }));
}

// ===========================================================================
// Export
// ===========================================================================

#[tokio::test]
async fn csv_export_round_trip() {
    let roster = load_fixture_roster();
    let stats = load_fixture_stats().await;
    let results =
        score_week(&roster, &stats, 3, 2024, &LineupSlots::default(), false).unwrap();

    let mut buffer = Vec::new();
    report::write_csv(&results, &mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    // Header + 5 lineup players per team.
    assert_eq!(lines.len(), 1 + 10);
    assert!(lines[1].starts_with("Alpha Squad,3,2024,"));
    assert!(lines[6].starts_with("Beta Brigade,3,2024,"));
    assert!(lines[1].ends_with(",95.5"));
}

#[tokio::test]
async fn text_report_ranks_teams() {
    let roster = load_fixture_roster();
    let stats = load_fixture_stats().await;
    let results =
        score_week(&roster, &stats, 3, 2024, &LineupSlots::default(), false).unwrap();

    let text = report::format_team_results(&results);
    assert!(text.contains("1. Alpha Squad - 2024 Week 3"));
    assert!(text.contains("2. Beta Brigade - 2024 Week 3"));
    let alpha_pos = text.find("Alpha Squad").unwrap();
    let beta_pos = text.find("Beta Brigade").unwrap();
    assert!(alpha_pos < beta_pos);
}
