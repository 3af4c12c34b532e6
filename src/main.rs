// Session Layout
// Command line entry point: lays out a weekly schedule payload as JSON

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;

use session_layout::models::layout::WeekLayout;
use session_layout::services::layout::LayoutEngine;
use session_layout::services::payload::SchedulePayload;
use session_layout::services::settings::SettingsService;
use session_layout::LayoutSettings;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Schedule payload JSON file, or `-` for stdin
    #[clap(value_parser)]
    payload: PathBuf,

    /// Layout settings TOML file (defaults to the per-user config file)
    #[clap(long)]
    config: Option<PathBuf>,

    /// Pretty-print the output
    #[clap(long, action)]
    pretty: bool,

    /// Only output the layout of this date (YYYY-MM-DD)
    #[clap(long)]
    day: Option<NaiveDate>,
}

fn load_settings(config: Option<PathBuf>) -> Result<LayoutSettings> {
    let service = match config {
        Some(path) => SettingsService::new(path),
        None => match SettingsService::from_default_location() {
            Some(service) => service,
            None => {
                log::warn!("No config directory on this platform, using default settings");
                return Ok(LayoutSettings::default());
            }
        },
    };
    service.load()
}

fn read_payload(path: &Path) -> Result<SchedulePayload> {
    if path.as_os_str() == "-" {
        return SchedulePayload::from_reader(io::stdin().lock())
            .context("Failed to parse schedule from stdin");
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open schedule {}", path.display()))?;
    SchedulePayload::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse schedule {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    log::info!("Laying out schedule {}", args.payload.display());

    let settings = load_settings(args.config)?;
    let schedule = read_payload(&args.payload)?.into_schedule();
    log::info!(
        "Read {} day(s) with {} session(s)",
        schedule.days.len(),
        schedule.session_count()
    );
    let engine = LayoutEngine::new(&settings);
    let mut week = engine.layout_schedule(&schedule);

    // Filter after layout so the day keeps the week's shared row grid
    if let Some(date) = args.day {
        let Some(layout) = week.remove(&date) else {
            bail!("No layout for {} in this schedule", date);
        };
        week = WeekLayout::from([(date, layout)]);
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&week)
    } else {
        serde_json::to_string(&week)
    }
    .context("Failed to serialize layout")?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json).context("Failed to write layout")?;

    log::info!(
        "Laid out {} day(s), {} session(s), {} dropped",
        week.len(),
        week.values().map(|layout| layout.session_count()).sum::<usize>(),
        week.values().map(|layout| layout.dropped.total()).sum::<usize>()
    );
    Ok(())
}
