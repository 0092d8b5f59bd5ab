// Weekly scorer entry point.
//
// Run sequence:
// 1. Initialize tracing (stderr, so stdout stays clean for the report)
// 2. Parse CLI arguments, load optional config
// 3. Load the roster CSV
// 4. Fetch the week's stat lines (FFDP API or local snapshot)
// 5. Run the scoring pipeline
// 6. Print the standings; optionally export CSV

use std::path::PathBuf;

use anyhow::Context;
use chrono::Datelike;
use clap::{Parser, ValueEnum};
use tracing::info;

use gridiron_scorer::config;
use gridiron_scorer::report;
use gridiron_scorer::roster;
use gridiron_scorer::scoring;
use gridiron_scorer::stats::{FfdpClient, SnapshotSource, StatSource};

/// Score a fantasy league's week from a roster CSV.
#[derive(Debug, Parser)]
#[command(name = "gridiron", version, about)]
struct Cli {
    /// Roster CSV (columns: fantasy_team, player name, position, team).
    roster: PathBuf,

    /// Week number to score.
    #[arg(short, long)]
    week: u8,

    /// Season year (defaults to the current year).
    #[arg(short = 'y', long)]
    season: Option<u16>,

    /// Where to get weekly stats from.
    #[arg(long, value_enum, default_value_t = SourceKind::Ffdp)]
    source: SourceKind,

    /// Path to a stats snapshot JSON file (required with --source snapshot).
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Require the roster's team code to match the stat feed exactly.
    #[arg(long)]
    strict_team: bool,

    /// Write the results to a CSV file as well as printing them.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Optional TOML config overriding lineup slots.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    /// Fantasy Football Data Pros API.
    Ffdp,
    /// Local JSON snapshot in the FFDP shape.
    Snapshot,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let season = cli
        .season
        .unwrap_or_else(|| chrono::Utc::now().year() as u16);

    let config = config::load_config(cli.config.as_deref())
        .context("failed to load configuration")?;

    let entries = roster::load_roster(&cli.roster).context("failed to load roster")?;
    let team_count = {
        let mut names: Vec<&str> = entries.iter().map(|e| e.fantasy_team.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    };
    info!(
        players = entries.len(),
        teams = team_count,
        "roster loaded from {}",
        cli.roster.display()
    );

    let source: Box<dyn StatSource> = match cli.source {
        SourceKind::Ffdp => Box::new(FfdpClient::new().context("failed to build FFDP client")?),
        SourceKind::Snapshot => {
            let path = cli
                .snapshot
                .context("--snapshot PATH is required with --source snapshot")?;
            Box::new(SnapshotSource::new(path))
        }
    };

    let stats = source
        .fetch_week(season, cli.week)
        .await
        .context("failed to fetch weekly stats")?;

    let strict_team = cli.strict_team || config.strict_team;
    let results = scoring::score_week(
        &entries,
        &stats,
        cli.week,
        season,
        &config.lineup,
        strict_team,
    )
    .context("failed to score the week")?;

    print!("{}", report::format_team_results(&results));

    if let Some(output) = cli.output {
        let file = std::fs::File::create(&output)
            .with_context(|| format!("failed to create output file {}", output.display()))?;
        report::write_csv(&results, file).context("failed to write results CSV")?;
        info!("results written to {}", output.display());
    }

    Ok(())
}

/// Initialize tracing to stderr; stdout is reserved for the report.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gridiron_scorer=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
