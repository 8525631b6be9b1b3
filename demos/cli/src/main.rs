use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use mcu_core::EngineConfig;
use mcu_engine::dass::{self, DassAnswers};
use mcu_engine::fas::{self, FasAnswers};
use mcu_engine::{
    aggregate_cohort_str, calculate_dass_scores, calculate_fas_result, summarize_record_str,
};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "mcu-cli",
    about = "Derive MCU reports and dashboard statistics from JSON records."
)]
struct Args {
    /// JSON file with engine settings; missing keys keep their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Trailing days in the registration chart.
    #[arg(long, global = true)]
    window_days: Option<u32>,

    /// Clinic offset from UTC in minutes (420 = WIB).
    #[arg(long, global = true, allow_hyphen_values = true)]
    utc_offset_minutes: Option<i32>,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the report for one patient record.
    Report {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Aggregate dashboard statistics over an array of records.
    Cohort {
        #[arg(short, long)]
        input: PathBuf,
        /// Last day of the registration window (defaults to the clinic's current date).
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Score 21 comma-separated DASS answers (0-3).
    Dass {
        #[arg(long, value_delimiter = ',')]
        answers: Vec<u8>,
    },
    /// Score 10 comma-separated FAS answers (1-5).
    Fas {
        #[arg(long, value_delimiter = ',')]
        answers: Vec<u8>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("mcu=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    match &args.command {
        Command::Report { input } => {
            let data = read_input(input)?;
            let report = summarize_record_str(&data, Utc::now(), &config)?;
            tracing::info!(patient = %report.patient_id, "report generated");
            print_json(&report, args.pretty)
        }
        Command::Cohort { input, today } => {
            let data = read_input(input)?;
            let today = today.unwrap_or_else(|| config.local_date(Utc::now()));
            let stats = aggregate_cohort_str(&data, today, &config)?;
            tracing::info!(patients = stats.total_patients, %today, "cohort aggregated");
            print_json(&stats, args.pretty)
        }
        Command::Dass { answers } => {
            let answers: [u8; dass::ITEM_COUNT] =
                answers.as_slice().try_into().with_context(|| {
                    format!("expected {} DASS answers, got {}", dass::ITEM_COUNT, answers.len())
                })?;
            let Some(answers) = DassAnswers::new(answers) else {
                bail!("DASS answers must be between 0 and 3");
            };
            print_json(&calculate_dass_scores(&answers), args.pretty)
        }
        Command::Fas { answers } => {
            if answers.len() != fas::ITEM_COUNT {
                bail!("expected {} FAS answers, got {}", fas::ITEM_COUNT, answers.len());
            }
            let mut slots = [None; fas::ITEM_COUNT];
            for (slot, answer) in slots.iter_mut().zip(answers) {
                *slot = Some(*answer);
            }
            print_json(&calculate_fas_result(&FasAnswers::new(slots)), args.pretty)
        }
    }
}

fn load_config(args: &Args) -> anyhow::Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let data = read_input(path)?;
            serde_json::from_str(&data)
                .with_context(|| format!("cannot parse config file {path:?}"))?
        }
        None => EngineConfig::default(),
    };

    if let Some(days) = args.window_days {
        config.registration_window_days = days;
    }
    if let Some(minutes) = args.utc_offset_minutes {
        config.utc_offset_minutes = minutes;
    }

    config.validate()?;
    Ok(config)
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read file {path:?}"))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}
