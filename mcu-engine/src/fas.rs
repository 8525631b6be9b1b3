//! Fatigue Assessment Scale scoring.

use mcu_core::{integral_answer, FasCategory, FasResult, RawAnswers};

pub const ITEM_COUNT: usize = 10;

/// 1-based item numbers scored as `6 - answer`.
pub const REVERSED_ITEMS: [usize; 2] = [4, 10];

const MIN_TOTAL: u32 = 10;
const MAX_TOTAL: u32 = 50;

/// FAS answers; `None` marks an item that was skipped or invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FasAnswers([Option<u8>; ITEM_COUNT]);

impl FasAnswers {
    pub fn new(answers: [Option<u8>; ITEM_COUNT]) -> Self {
        Self(answers)
    }

    /// Read answers keyed `q1`..`q10` (or bare `1`..`10`).
    ///
    /// Unlike DASS, partial sets are kept: scoring decides whether they are usable.
    pub fn from_raw(raw: &RawAnswers) -> Self {
        let mut answers = [None; ITEM_COUNT];
        for (idx, slot) in answers.iter_mut().enumerate() {
            let item = idx + 1;
            *slot = raw
                .get(&format!("q{item}"))
                .or_else(|| raw.get(&item.to_string()))
                .and_then(|value| integral_answer(value, 1, 5));
        }
        Self(answers)
    }

    pub fn answers(&self) -> &[Option<u8>; ITEM_COUNT] {
        &self.0
    }
}

pub fn calculate_fas_result(answers: &FasAnswers) -> FasResult {
    let valid: Option<Vec<u8>> = answers
        .0
        .iter()
        .map(|answer| answer.filter(|value| (1..=5).contains(value)))
        .collect();

    let Some(values) = valid else {
        return FasResult::not_available();
    };

    let raw_total: u32 = values
        .iter()
        .enumerate()
        .map(|(idx, &value)| {
            if REVERSED_ITEMS.contains(&(idx + 1)) {
                u32::from(6 - value)
            } else {
                u32::from(value)
            }
        })
        .sum();

    let score = scale_to_ten(raw_total);
    let category = fas_category(score);

    FasResult {
        raw_total: Some(raw_total),
        score_1_to_10: Some(score),
        category,
        explanation: fas_explanation(category).map(str::to_string),
    }
}

/// Rescale a raw total (10..=50) onto 1..=10, rounding half away from zero.
pub fn scale_to_ten(raw_total: u32) -> u32 {
    let clamped = raw_total.clamp(MIN_TOTAL, MAX_TOTAL);
    let scaled = (f64::from(clamped - MIN_TOTAL) / f64::from(MAX_TOTAL - MIN_TOTAL)) * 9.0 + 1.0;
    scaled.round() as u32
}

/// Tired starts at 6 so that a uniform "3" answer set (score 6) reads as Tired.
pub fn fas_category(score: u32) -> FasCategory {
    match score {
        s if s >= 10 => FasCategory::Fatigued,
        s if s >= 6 => FasCategory::Tired,
        s if s >= 4 => FasCategory::SlightlyTired,
        s if s >= 1 => FasCategory::Fit,
        _ => FasCategory::NotAvailable,
    }
}

pub fn fas_explanation(category: FasCategory) -> Option<&'static str> {
    match category {
        FasCategory::Fatigued => Some(
            "Severe fatigue that is likely to impair daily functioning; medical follow-up is advised.",
        ),
        FasCategory::Tired => Some(
            "Noticeable fatigue; review sleep, workload and recovery time.",
        ),
        FasCategory::SlightlyTired => Some(
            "Mild fatigue that does not yet interfere with daily activities.",
        ),
        FasCategory::Fit => Some("No meaningful fatigue; fit for regular activities."),
        FasCategory::NotAvailable => None,
    }
}
