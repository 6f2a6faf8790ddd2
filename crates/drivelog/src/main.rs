use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use drivelog_core::ingestion::{ingest_files, FileInput};
use drivelog_core::pipelines::{all_pipeline_descriptors, find_pipeline};
use drivelog_core::{activity, outputs, validation};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod report;

use config::{Overrides, RunConfig};

const PIPELINE_CODE: &str = "possession_event_log_v1";
const TOP_ACTIVITIES: usize = 10;

#[derive(Parser, Debug)]
#[command(author, version, about = "Builds process-mining event logs from NFL play-by-play data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Turn play-by-play CSV files into a possession event log
    Transform(TransformArgs),
    /// List the fixed activity labels
    Activities,
    /// List the registered pipelines
    Pipelines,
}

#[derive(Args, Debug)]
struct TransformArgs {
    /// Glob matching the play-by-play CSV files to load (e.g. "data/pbp_*.csv")
    #[arg(short, long)]
    input: String,
    /// Possession team code to scope the log to
    #[arg(long, env = "DRIVELOG_TEAM")]
    team: Option<String>,
    /// Where to write the event log CSV
    #[arg(short, long, env = "DRIVELOG_OUTPUT")]
    output: Option<PathBuf>,
    /// TOML file with run settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Offset each quarter so timestamps order a whole game
    #[arg(long, conflicts_with = "no_fold_periods")]
    fold_periods: bool,
    /// Keep per-quarter timestamps even if the config file enables folding
    #[arg(long)]
    no_fold_periods: bool,
    /// Also write a JSON summary of the run
    #[arg(long)]
    summary_json: Option<PathBuf>,
    /// Number of events to print after the run
    #[arg(long, default_value_t = 10)]
    sample_rows: usize,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Transform(args) => transform(args),
        Command::Activities => {
            println!("{}", report::activities_table(&activity::vocabulary()));
            println!("Unmatched plays are labelled with their raw play_type.");
            Ok(())
        }
        Command::Pipelines => {
            println!("{}", report::pipelines_table(all_pipeline_descriptors()));
            Ok(())
        }
    }
}

fn transform(args: TransformArgs) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    let run = config::resolve(
        file_config,
        Overrides {
            team: args.team,
            output: args.output,
            fold_periods: match (args.fold_periods, args.no_fold_periods) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
            summary_path: args.summary_json,
        },
    );

    let mut files: Vec<(String, Vec<u8>)> = Vec::new();
    let pattern =
        glob::glob(&args.input).with_context(|| format!("invalid glob '{}'", args.input))?;
    for entry in pattern {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                warn!(error = %err, "could not read path matched by glob");
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        let contents = std::fs::read(&path)
            .with_context(|| format!("failed to read '{}'", path.display()))?;
        files.push((path.display().to_string(), contents));
    }
    if files.is_empty() {
        bail!("no files matched '{}'", args.input);
    }

    let inputs: Vec<FileInput<'_>> = files
        .iter()
        .map(|(path, contents)| FileInput { path, contents })
        .collect();
    let batch = ingest_files(&inputs)?;
    info!(
        files = batch.parsed_files(),
        plays = batch.plays.height(),
        "loaded play-by-play data"
    );

    let pipeline = find_pipeline(PIPELINE_CODE)
        .ok_or_else(|| anyhow!("pipeline {PIPELINE_CODE} is not registered"))?;
    let output = pipeline.run_batch(&run.context, &batch.plays)?;
    let mut event_log = output.dataframe;

    let validation = validation::validate_event_log(&event_log, &run.context.team)
        .context("event log failed validation, nothing was written")?;

    let artifacts = outputs::write_event_log_csv(&mut event_log, &run.output)?;
    if let Some(summary_path) = &run.summary_path {
        outputs::write_run_summary(&output.summary, &validation, Some(&artifacts), summary_path)?;
    }

    println!("{}", report::files_table(&batch.reports));
    println!(
        "{} events across {} cases ({} activity types) for {}",
        validation.events, validation.cases, validation.activity_types, run.context.team
    );
    if output.summary.null_transformed_times > 0 {
        println!(
            "{} events have no transformed_time",
            output.summary.null_transformed_times
        );
    }
    println!("{}", report::sample_table(&event_log, args.sample_rows)?);
    println!("{}", report::distribution_table(&validation, TOP_ACTIVITIES));
    println!(
        "Wrote {} rows to {} (blake3 {})",
        artifacts.row_count,
        artifacts.path.display(),
        artifacts.content_hash
    );

    Ok(())
}
