//! Check a mission file for conflicts between the primary vehicle and the
//! rest of the fleet.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use deconflict_cli::{format_report, load_mission, load_rules, Config};
use deconflict_core::{ConflictDetector, DeconflictionRules, Mission, MissionStatus};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Strategic deconfliction check for a mission file
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Mission JSON file; the first vehicle is the primary
    mission: PathBuf,

    /// JSON file with safety rules (safe_distance, time_threshold, time_step)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Minimum separation in meters
    #[arg(long)]
    safe_distance: Option<f64>,

    /// Co-presence window in seconds
    #[arg(long)]
    time_threshold: Option<f64>,

    /// Trajectory sampling step in seconds
    #[arg(long)]
    time_step: Option<f64>,

    /// Scan on all cores
    #[arg(long)]
    parallel: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Exit with status 2 when a conflict is found
    #[arg(long)]
    fail_on_conflict: bool,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("deconflict_core=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let base = match &args.rules {
        Some(path) => load_rules(path)?,
        None => DeconflictionRules::default(),
    };
    let config = Config::from_env_with_base(base).with_overrides(
        args.safe_distance,
        args.time_threshold,
        args.time_step,
    );
    config.rules.validate()?;
    tracing::debug!(rules = ?config.rules, "resolved rules");

    let plan = load_mission(&args.mission)?;
    let mission = Mission::from_plan(&plan, config.rules.time_step)?;
    let detector = ConflictDetector::from(&config.rules);
    let result = if args.parallel {
        mission.evaluate_parallel(&detector)
    } else {
        mission.evaluate(&detector)
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", format_report(&result));
    }

    if args.fail_on_conflict && result.status == MissionStatus::Conflict {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}
