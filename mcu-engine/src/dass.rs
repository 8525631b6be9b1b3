//! DASS-21 (Depression Anxiety Stress Scale) scoring.

use mcu_core::{integral_answer, DassLevel, DassResult, RawAnswers};

pub const ITEM_COUNT: usize = 21;

/// 1-based item numbers of each sub-scale.
pub const DEPRESSION_ITEMS: [usize; 7] = [3, 5, 10, 13, 16, 17, 21];
pub const ANXIETY_ITEMS: [usize; 7] = [2, 4, 7, 9, 15, 19, 20];
pub const STRESS_ITEMS: [usize; 7] = [1, 6, 8, 11, 12, 14, 18];

// Inclusive upper bounds for Normal, Ringan, Sedang, Parah.
const DEPRESSION_BOUNDS: [u8; 4] = [9, 13, 20, 27];
const ANXIETY_BOUNDS: [u8; 4] = [7, 9, 14, 19];
const STRESS_BOUNDS: [u8; 4] = [14, 18, 25, 33];

/// A complete DASS-21 answer set, each answer in 0..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DassAnswers([u8; ITEM_COUNT]);

impl DassAnswers {
    /// `None` when any answer is above 3.
    pub fn new(answers: [u8; ITEM_COUNT]) -> Option<Self> {
        answers
            .iter()
            .all(|answer| *answer <= 3)
            .then_some(Self(answers))
    }

    /// Read answers keyed `q1`..`q21` (or bare `1`..`21`).
    ///
    /// Returns `None` if any answer is missing, non-integral or out of range.
    pub fn from_raw(raw: &RawAnswers) -> Option<Self> {
        let mut answers = [0u8; ITEM_COUNT];
        for (idx, slot) in answers.iter_mut().enumerate() {
            let item = idx + 1;
            *slot = raw
                .get(&format!("q{item}"))
                .or_else(|| raw.get(&item.to_string()))
                .and_then(|value| integral_answer(value, 0, 3))?;
        }
        Some(Self(answers))
    }

    pub fn answers(&self) -> &[u8; ITEM_COUNT] {
        &self.0
    }

    fn subscale_score(&self, items: &[usize]) -> u8 {
        items.iter().map(|item| self.0[item - 1]).sum::<u8>() * 2
    }
}

pub fn calculate_dass_scores(answers: &DassAnswers) -> DassResult {
    let depression_score = answers.subscale_score(&DEPRESSION_ITEMS);
    let anxiety_score = answers.subscale_score(&ANXIETY_ITEMS);
    let stress_score = answers.subscale_score(&STRESS_ITEMS);

    DassResult {
        depression_score,
        depression_level: depression_level(depression_score),
        anxiety_score,
        anxiety_level: anxiety_level(anxiety_score),
        stress_score,
        stress_level: stress_level(stress_score),
    }
}

pub fn depression_level(score: u8) -> DassLevel {
    level_for(score, DEPRESSION_BOUNDS)
}

pub fn anxiety_level(score: u8) -> DassLevel {
    level_for(score, ANXIETY_BOUNDS)
}

pub fn stress_level(score: u8) -> DassLevel {
    level_for(score, STRESS_BOUNDS)
}

fn level_for(score: u8, bounds: [u8; 4]) -> DassLevel {
    match score {
        s if s <= bounds[0] => DassLevel::Normal,
        s if s <= bounds[1] => DassLevel::Ringan,
        s if s <= bounds[2] => DassLevel::Sedang,
        s if s <= bounds[3] => DassLevel::Parah,
        _ => DassLevel::SangatParah,
    }
}
