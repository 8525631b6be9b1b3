//! BMI classification and dashboard health-issue flags.

use mcu_core::{parse_number, BmiCategory, Gender, HealthIssue, PatientRecord};

use crate::tables::{KEY_CHOLESTEROL_TOTAL, KEY_GLUCOSE_FASTING, KEY_HEMOGLOBIN, KEY_URIC_ACID};

pub const KEY_WEIGHT: &str = "berat_badan";
pub const KEY_HEIGHT: &str = "tinggi_badan";
pub const KEY_BMI: &str = "bmi";
pub const KEY_BLOOD_PRESSURE: &str = "tekanan_darah";
pub const KEY_SYSTOLIC: &str = "tekanan_darah_sistolik";
pub const KEY_DIASTOLIC: &str = "tekanan_darah_diastolik";
pub const KEY_COLOR_BLINDNESS: &str = "buta_warna";

const OBESITY_BMI: f64 = 30.0;
const HYPERTENSION_SYSTOLIC: f64 = 140.0;
const HYPERTENSION_DIASTOLIC: f64 = 90.0;
const HIGH_CHOLESTEROL: f64 = 200.0;
const HIGH_GLUCOSE: f64 = 115.0;
const HIGH_URIC_ACID_MALE: f64 = 7.0;
const HIGH_URIC_ACID_FEMALE: f64 = 5.7;
const ANEMIA_HB_MALE: f64 = 14.0;
const ANEMIA_HB_FEMALE: f64 = 12.0;

/// BMI from weight (kg) and height (cm), rounded to one decimal.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if !(weight_kg.is_finite() && height_cm.is_finite()) || weight_kg <= 0.0 || height_cm <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    Some((bmi * 10.0).round() / 10.0)
}

/// The recorded BMI, or one computed from weight and height.
pub fn record_bmi(record: &PatientRecord) -> Option<f64> {
    record.field_number(KEY_BMI).or_else(|| {
        calculate_bmi(
            record.field_number(KEY_WEIGHT)?,
            record.field_number(KEY_HEIGHT)?,
        )
    })
}

/// Values between 24.9 and 25.0, and between 29.9 and 30.0, fall through to Normal.
pub fn bmi_category(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if (25.0..=29.9).contains(&bmi) {
        BmiCategory::Overweight
    } else if bmi >= 30.0 {
        BmiCategory::Obesity
    } else {
        BmiCategory::Normal
    }
}

/// Parse a `systolic/diastolic` reading such as `"120/80"` or `"130 / 85 mmHg"`.
pub fn parse_blood_pressure(text: &str) -> Option<(f64, f64)> {
    let (systolic, diastolic) = text.split_once('/')?;
    Some((parse_number(systolic)?, parse_number(diastolic)?))
}

/// Every dashboard health issue the record triggers, in declaration order.
pub fn detect_health_issues(record: &PatientRecord) -> Vec<HealthIssue> {
    let gender = record.gender();
    HealthIssue::ALL
        .into_iter()
        .filter(|issue| has_issue(record, gender, *issue))
        .collect()
}

fn has_issue(record: &PatientRecord, gender: Gender, issue: HealthIssue) -> bool {
    match issue {
        HealthIssue::Obesity => record_bmi(record).is_some_and(|bmi| bmi >= OBESITY_BMI),
        HealthIssue::Hypertension => {
            let (systolic, diastolic) = blood_pressure(record);
            systolic.is_some_and(|value| value >= HYPERTENSION_SYSTOLIC)
                || diastolic.is_some_and(|value| value >= HYPERTENSION_DIASTOLIC)
        }
        HealthIssue::ColorBlindness => record
            .field_text(KEY_COLOR_BLINDNESS)
            .is_some_and(|text| text.eq_ignore_ascii_case("ABNORMAL")),
        HealthIssue::HighCholesterol => record
            .field_number(KEY_CHOLESTEROL_TOTAL)
            .is_some_and(|value| value > HIGH_CHOLESTEROL),
        HealthIssue::HighGlucose => record
            .field_number(KEY_GLUCOSE_FASTING)
            .is_some_and(|value| value > HIGH_GLUCOSE),
        HealthIssue::HighUricAcid => {
            let limit = match gender {
                Gender::Male => HIGH_URIC_ACID_MALE,
                Gender::Female => HIGH_URIC_ACID_FEMALE,
                Gender::Other => return false,
            };
            record
                .field_number(KEY_URIC_ACID)
                .is_some_and(|value| value > limit)
        }
        HealthIssue::Anemia => {
            let limit = match gender {
                Gender::Male => ANEMIA_HB_MALE,
                Gender::Female => ANEMIA_HB_FEMALE,
                Gender::Other => return false,
            };
            record
                .field_number(KEY_HEMOGLOBIN)
                .is_some_and(|value| value < limit)
        }
    }
}

/// Systolic and diastolic pressure; separate fields take precedence over the combined one.
fn blood_pressure(record: &PatientRecord) -> (Option<f64>, Option<f64>) {
    let combined = record
        .field_text(KEY_BLOOD_PRESSURE)
        .and_then(|text| parse_blood_pressure(&text));

    let systolic = record
        .field_number(KEY_SYSTOLIC)
        .or(combined.map(|(systolic, _)| systolic));
    let diastolic = record
        .field_number(KEY_DIASTOLIC)
        .or(combined.map(|(_, diastolic)| diastolic));

    (systolic, diastolic)
}
