//! MCU result aggregation and classification.
//!
//! Pure derivations over raw examination records: reference-range checks,
//! DASS-21 and FAS scoring, BMI and health-issue flags, per-category
//! summaries, checkpoint progress and cohort statistics. Nothing here performs
//! I/O or keeps state between calls.

pub mod checkpoint;
pub mod cohort;
pub mod dass;
pub mod fas;
pub mod flags;
pub mod packages;
pub mod reference;
pub mod report;
pub mod summary;
pub mod tables;

use chrono::{DateTime, NaiveDate, Utc};
use mcu_core::{CohortStats, EngineConfig, McuError, McuReport, PatientRecord};
use serde::Deserialize;
use serde_json::Value;

pub use checkpoint::checkpoint_progress;
pub use cohort::aggregate_cohort;
pub use dass::{calculate_dass_scores, DassAnswers};
pub use fas::{calculate_fas_result, FasAnswers};
pub use flags::{bmi_category, calculate_bmi, detect_health_issues};
pub use packages::PackageSelection;
pub use reference::is_abnormal;
pub use report::build_report;
pub use summary::summarize_results;

/// Build a patient report from a JSON string.
pub fn summarize_record_str(
    record_json: &str,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> Result<McuReport, McuError> {
    let value: Value =
        serde_json::from_str(record_json).map_err(|err| McuError::Parse(err.to_string()))?;
    summarize_record_value(&value, now, config)
}

/// Build a patient report from a `serde_json::Value`.
pub fn summarize_record_value(
    record: &Value,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> Result<McuReport, McuError> {
    config.validate()?;

    if !record.is_object() {
        return Err(McuError::MissingData);
    }

    let record =
        PatientRecord::deserialize(record).map_err(|err| McuError::Parse(err.to_string()))?;
    Ok(build_report(&record, now, config))
}

/// Aggregate cohort statistics from a JSON array string.
pub fn aggregate_cohort_str(
    records_json: &str,
    today: NaiveDate,
    config: &EngineConfig,
) -> Result<CohortStats, McuError> {
    let value: Value =
        serde_json::from_str(records_json).map_err(|err| McuError::Parse(err.to_string()))?;
    aggregate_cohort_value(&value, today, config)
}

/// Aggregate cohort statistics from a `serde_json::Value` array of records.
pub fn aggregate_cohort_value(
    records: &Value,
    today: NaiveDate,
    config: &EngineConfig,
) -> Result<CohortStats, McuError> {
    config.validate()?;

    let entries = records.as_array().ok_or(McuError::MissingData)?;
    let records = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            PatientRecord::deserialize(entry)
                .map_err(|err| McuError::Parse(format!("record {idx}: {err}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(aggregate_cohort(&records, today, config))
}
