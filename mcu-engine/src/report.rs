//! Assemble the per-patient report consumed by the PDF/Excel renderer.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use mcu_core::{EngineConfig, FasResult, McuReport, PatientRecord};

use crate::checkpoint::checkpoint_progress;
use crate::dass::{calculate_dass_scores, DassAnswers};
use crate::fas::{calculate_fas_result, FasAnswers};
use crate::flags::{bmi_category, detect_health_issues, record_bmi};
use crate::summary::summarize_results;

/// Derive everything shown on a patient's report. `now` stamps the report and
/// anchors the age calculation in the clinic's local date.
pub fn build_report(
    record: &PatientRecord,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> McuReport {
    let today = config.local_date(now);
    let bmi = record_bmi(record);

    let dass = record
        .dass
        .as_ref()
        .and_then(DassAnswers::from_raw)
        .map(|answers| calculate_dass_scores(&answers));

    let fas = record
        .fas
        .as_ref()
        .map(|raw| calculate_fas_result(&FasAnswers::from_raw(raw)))
        .unwrap_or_else(FasResult::not_available);

    McuReport {
        generated_at: now,
        patient_id: record.id.clone(),
        name: record.name.clone(),
        age: record
            .date_of_birth
            .and_then(|birth_date| age_on(birth_date, today)),
        bmi,
        bmi_category: bmi.map(bmi_category),
        dass,
        fas,
        summaries: summarize_results(record),
        health_issues: detect_health_issues(record),
        checkpoints: checkpoint_progress(record),
    }
}

/// Whole years between `birth_date` and `today`; `None` for a future birth date.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> Option<u32> {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}
