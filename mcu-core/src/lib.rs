//! Core types for MCU (medical check-up) result derivation.
//!
//! Everything here is plain data: patient records as handed over by the
//! persistence layer, static reference tables, and the derived result
//! shapes consumed by report rendering and dashboards.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tunables shared by the report and cohort derivations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of trailing calendar days shown in the daily registration chart.
    pub registration_window_days: u32,
    /// Offset (minutes) applied to UTC timestamps to obtain the clinic's local date.
    pub utc_offset_minutes: i32,
    /// Bucket label used when gender or location is empty.
    pub unknown_label: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            registration_window_days: 7,
            utc_offset_minutes: 7 * 60,
            unknown_label: "Lainnya".to_string(),
        }
    }
}

impl EngineConfig {
    /// Longest registration chart, in days.
    pub const MAX_REGISTRATION_WINDOW_DAYS: u32 = 366;
    /// Offsets must stay strictly inside one day.
    pub const MAX_UTC_OFFSET_MINUTES: i32 = 24 * 60 - 1;

    /// The clinic's fixed offset from UTC. Falls back to UTC when out of range.
    pub fn local_offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }

    /// Calendar date of `instant` in the clinic's local time.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.local_offset()).date_naive()
    }

    /// Check that every value is inside its domain.
    pub fn validate(&self) -> Result<(), McuError> {
        if !(1..=Self::MAX_REGISTRATION_WINDOW_DAYS).contains(&self.registration_window_days) {
            return Err(McuError::InvalidConfig(format!(
                "registration_window_days must be between 1 and {}, got {}",
                Self::MAX_REGISTRATION_WINDOW_DAYS,
                self.registration_window_days
            )));
        }
        let max_offset = Self::MAX_UTC_OFFSET_MINUTES;
        if !(-max_offset..=max_offset).contains(&self.utc_offset_minutes) {
            return Err(McuError::InvalidConfig(format!(
                "utc_offset_minutes out of range: {}",
                self.utc_offset_minutes
            )));
        }
        if self.unknown_label.trim().is_empty() {
            return Err(McuError::InvalidConfig(
                "unknown_label cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Gender as used for selecting reference ranges.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Parse the clinic's raw gender marker (`LAKI-LAKI` / `PEREMPUAN`), ignoring case.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("LAKI-LAKI") {
            Self::Male
        } else if trimmed.eq_ignore_ascii_case("PEREMPUAN") {
            Self::Female
        } else {
            Self::Other
        }
    }
}

/// Closed or half-open numeric interval. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Range {
    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub const fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub const fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// `true` when `value` falls outside the bounds that are present.
    pub fn excludes(&self, value: f64) -> bool {
        self.min.is_some_and(|min| value < min) || self.max.is_some_and(|max| value > max)
    }
}

/// Numeric reference: a global range with optional gender-specific overrides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRanges {
    pub all: Option<Range>,
    pub male: Option<Range>,
    pub female: Option<Range>,
}

impl NumericRanges {
    pub const fn all(range: Range) -> Self {
        Self {
            all: Some(range),
            male: None,
            female: None,
        }
    }

    pub const fn by_gender(male: Range, female: Range) -> Self {
        Self {
            all: None,
            male: Some(male),
            female: Some(female),
        }
    }
}

/// Qualitative reference: the values considered normal, compared case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualitativeSet {
    pub normal: &'static [&'static str],
}

impl QualitativeSet {
    pub fn contains(&self, value: &str) -> bool {
        let lowered = value.to_lowercase();
        self.normal
            .iter()
            .any(|candidate| candidate.to_lowercase() == lowered)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReferenceSpec {
    Numeric(NumericRanges),
    Qualitative(QualitativeSet),
}

/// A measurable quantity from one of the lab reference tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricItem {
    /// Label printed in summaries.
    pub label: &'static str,
    /// Key of the raw field inside `PatientRecord::examination`.
    pub key: &'static str,
    pub reference: ReferenceSpec,
    pub unit: &'static str,
}

/// Questionnaire answers keyed `q1`..`qN`, values are small integers
/// encoded either as JSON numbers or strings.
pub type RawAnswers = BTreeMap<String, Value>;

/// Progress marker for one examination station.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckpointEntry {
    pub name: String,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl CheckpointEntry {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// One patient and one examination episode, as loaded by the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PatientRecord {
    pub id: String,
    pub name: String,
    /// Raw gender marker, e.g. `LAKI-LAKI` or `PEREMPUAN`.
    pub gender: String,
    pub date_of_birth: Option<NaiveDate>,
    pub registered_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub company: Option<String>,
    /// Selected package and add-on identifiers.
    pub mcu_package: Vec<String>,
    pub checkpoints: Vec<CheckpointEntry>,
    pub dass: Option<RawAnswers>,
    pub fas: Option<RawAnswers>,
    /// Raw examination fields (lab values, physical exam, conclusions).
    pub examination: BTreeMap<String, Value>,
}

impl PatientRecord {
    pub fn gender(&self) -> Gender {
        Gender::from_raw(&self.gender)
    }

    /// Text of an examination field, `None` when absent or blank.
    pub fn field_text(&self, key: &str) -> Option<String> {
        self.examination.get(key).and_then(raw_text)
    }

    /// Numeric value of an examination field, `None` when absent or unparsable.
    pub fn field_number(&self, key: &str) -> Option<f64> {
        self.field_text(key)
            .and_then(|text| parse_number(&text))
    }
}

/// Render a raw JSON scalar as text. Blank strings and non-scalars count as absent.
pub fn raw_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Lenient float parsing.
///
/// Accepts a decimal comma and a trailing unit (`"150 mg/dL"` reads as 150).
/// NaN, infinities and text without a leading number yield `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(',', ".");
    if let Ok(value) = normalized.parse::<f64>() {
        return Some(value).filter(|value| value.is_finite());
    }

    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut end = 0;
    for (idx, ch) in normalized.char_indices() {
        match ch {
            '+' | '-' if idx == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = idx + ch.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    normalized[..end]
        .trim_end_matches('.')
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Questionnaire answer as a whole number within `min..=max`.
///
/// Accepts JSON numbers and numeric strings, including integral decimals such
/// as `2.0` or `"2,0"`.
pub fn integral_answer(value: &Value, min: u8, max: u8) -> Option<u8> {
    let number = raw_text(value).and_then(|text| parse_number(&text))?;
    if number.fract() != 0.0 || number < f64::from(min) || number > f64::from(max) {
        return None;
    }
    Some(number as u8)
}

/// DASS-21 severity level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum DassLevel {
    Normal,
    Ringan,
    Sedang,
    Parah,
    #[serde(rename = "Sangat Parah")]
    SangatParah,
}

impl DassLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Ringan => "Ringan",
            Self::Sedang => "Sedang",
            Self::Parah => "Parah",
            Self::SangatParah => "Sangat Parah",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DassResult {
    pub depression_score: u8,
    pub depression_level: DassLevel,
    pub anxiety_score: u8,
    pub anxiety_level: DassLevel,
    pub stress_score: u8,
    pub stress_level: DassLevel,
}

/// Fatigue Assessment Scale category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FasCategory {
    Fatigued,
    Tired,
    #[serde(rename = "Slightly Tired")]
    SlightlyTired,
    Fit,
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl FasCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fatigued => "Fatigued",
            Self::Tired => "Tired",
            Self::SlightlyTired => "Slightly Tired",
            Self::Fit => "Fit",
            Self::NotAvailable => "N/A",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FasResult {
    pub raw_total: Option<u32>,
    pub score_1_to_10: Option<u32>,
    pub category: FasCategory,
    pub explanation: Option<String>,
}

impl FasResult {
    pub fn not_available() -> Self {
        Self {
            raw_total: None,
            score_1_to_10: None,
            category: FasCategory::NotAvailable,
            explanation: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    #[serde(rename = "NORMAL (18.5 - 24.9)")]
    Normal,
    #[serde(rename = "Overweight (Pre-obese)")]
    Overweight,
    Obesity,
}

impl BmiCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "NORMAL (18.5 - 24.9)",
            Self::Overweight => "Overweight (Pre-obese)",
            Self::Obesity => "Obesity",
        }
    }
}

/// Health issues counted on the clinic dashboards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HealthIssue {
    Obesity,
    Hypertension,
    ColorBlindness,
    HighCholesterol,
    HighGlucose,
    HighUricAcid,
    Anemia,
}

impl HealthIssue {
    pub const ALL: [HealthIssue; 7] = [
        Self::Obesity,
        Self::Hypertension,
        Self::ColorBlindness,
        Self::HighCholesterol,
        Self::HighGlucose,
        Self::HighUricAcid,
        Self::Anemia,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Obesity => "Obesity",
            Self::Hypertension => "Hypertension",
            Self::ColorBlindness => "Color Blindness",
            Self::HighCholesterol => "High Cholesterol",
            Self::HighGlucose => "High Glucose",
            Self::HighUricAcid => "High Uric Acid",
            Self::Anemia => "Anemia",
        }
    }
}

/// Per-category result text. A `None` category is not covered by the
/// patient's package and is left out of the serialized form.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Summaries {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hematologi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kimia_darah: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urin_rutin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pemeriksaan_fisik: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rontgen_thorax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ekg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usg_mammae: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usg_abdomen: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audiometry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spirometry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treadmill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biomonitoring: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hepatitis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refraktometri: Option<String>,
}

impl Summaries {
    /// Applicable categories as `(json key, text)` pairs, in report order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("hematologi", &self.hematologi),
            ("kimiaDarah", &self.kimia_darah),
            ("urinRutin", &self.urin_rutin),
            ("pemeriksaanFisik", &self.pemeriksaan_fisik),
            ("rontgenThorax", &self.rontgen_thorax),
            ("ekg", &self.ekg),
            ("usgMammae", &self.usg_mammae),
            ("usgAbdomen", &self.usg_abdomen),
            ("audiometry", &self.audiometry),
            ("spirometry", &self.spirometry),
            ("treadmill", &self.treadmill),
            ("biomonitoring", &self.biomonitoring),
            ("hepatitis", &self.hepatitis),
            ("refraktometri", &self.refraktometri),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|text| (key, text)))
        .collect()
    }
}

/// Station completion state for one patient.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CheckpointProgress {
    pub required: Vec<String>,
    pub completed: Vec<String>,
    pub pending: Vec<String>,
    pub is_complete: bool,
}

/// Everything the report renderer needs for one patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct McuReport {
    pub generated_at: DateTime<Utc>,
    pub patient_id: String,
    pub name: String,
    pub age: Option<u32>,
    pub bmi: Option<f64>,
    pub bmi_category: Option<BmiCategory>,
    pub dass: Option<DassResult>,
    pub fas: FasResult,
    pub summaries: Summaries,
    pub health_issues: Vec<HealthIssue>,
    pub checkpoints: CheckpointProgress,
}

/// Pie-chart datum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PieSlice {
    pub name: String,
    pub value: u64,
}

/// Bar-chart datum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BarEntry {
    pub name: String,
    pub total: u64,
}

/// Dashboard statistics for a company or for the whole clinic.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CohortStats {
    pub total_patients: u64,
    pub gender_distribution: Vec<PieSlice>,
    pub package_distribution: Vec<PieSlice>,
    pub registration_by_date: Vec<BarEntry>,
    pub location_distribution: Vec<BarEntry>,
    pub health_issues: Vec<BarEntry>,
    pub checkpoint_completion: Vec<BarEntry>,
}

/// Errors raised at the JSON and configuration boundaries.
#[derive(Debug, thiserror::Error)]
pub enum McuError {
    #[error("input is missing the minimum required data")]
    MissingData,
    #[error("cannot read input: {0}")]
    Parse(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
