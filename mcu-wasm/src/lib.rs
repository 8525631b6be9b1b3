//! Framework-neutral WASM <-> JavaScript bridge for the MCU engine.

use chrono::{NaiveDate, Utc};
use mcu_core::{EngineConfig, McuError, RawAnswers};
use mcu_engine::{calculate_dass_scores, calculate_fas_result, DassAnswers, FasAnswers};
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct JsEngineConfig {
    #[serde(default)]
    registration_window_days: Option<u32>,
    #[serde(default)]
    utc_offset_minutes: Option<i32>,
    #[serde(default)]
    unknown_label: Option<String>,
}

impl From<JsEngineConfig> for EngineConfig {
    fn from(cfg: JsEngineConfig) -> Self {
        let mut base = EngineConfig::default();
        if let Some(days) = cfg.registration_window_days {
            base.registration_window_days = days;
        }
        if let Some(minutes) = cfg.utc_offset_minutes {
            base.utc_offset_minutes = minutes;
        }
        if let Some(label) = cfg.unknown_label {
            base.unknown_label = label;
        }
        base
    }
}

/// Build the report for one patient record, stamped with the current time.
#[wasm_bindgen]
pub fn summarize_record(record: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    install_panic_hook();

    let record_value = from_value::<serde_json::Value>(record)
        .map_err(|err| JsValue::from_str(&format!("cannot read record JSON: {err}")))?;
    let cfg = read_config(config)?;

    let report = mcu_engine::summarize_record_value(&record_value, Utc::now(), &cfg)
        .map_err(|err| JsValue::from_str(&format_mcu_error(err)))?;

    to_value(&report).map_err(|err| JsValue::from_str(&format!("cannot serialize report: {err}")))
}

/// Aggregate dashboard statistics. `today` is a `YYYY-MM-DD` local date.
#[wasm_bindgen]
pub fn aggregate_cohort(
    records: JsValue,
    today: String,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    install_panic_hook();

    let records_value = from_value::<serde_json::Value>(records)
        .map_err(|err| JsValue::from_str(&format!("cannot read records JSON: {err}")))?;
    let today = NaiveDate::parse_from_str(today.trim(), "%Y-%m-%d")
        .map_err(|err| JsValue::from_str(&format!("invalid date {today:?}: {err}")))?;
    let cfg = read_config(config)?;

    let stats = mcu_engine::aggregate_cohort_value(&records_value, today, &cfg)
        .map_err(|err| JsValue::from_str(&format_mcu_error(err)))?;

    to_value(&stats).map_err(|err| JsValue::from_str(&format!("cannot serialize stats: {err}")))
}

/// Score a DASS-21 answer map (`q1`..`q21`). Yields `undefined` for an incomplete set.
#[wasm_bindgen]
pub fn calculate_dass(answers: JsValue) -> Result<JsValue, JsValue> {
    install_panic_hook();

    let raw: RawAnswers = from_value(answers)
        .map_err(|err| JsValue::from_str(&format!("cannot read DASS answers: {err}")))?;
    let result = DassAnswers::from_raw(&raw).map(|answers| calculate_dass_scores(&answers));

    to_value(&result).map_err(|err| JsValue::from_str(&format!("cannot serialize DASS: {err}")))
}

/// Score an FAS answer map (`q1`..`q10`).
#[wasm_bindgen]
pub fn calculate_fas(answers: JsValue) -> Result<JsValue, JsValue> {
    install_panic_hook();

    let raw: RawAnswers = from_value(answers)
        .map_err(|err| JsValue::from_str(&format!("cannot read FAS answers: {err}")))?;
    let result = calculate_fas_result(&FasAnswers::from_raw(&raw));

    to_value(&result).map_err(|err| JsValue::from_str(&format!("cannot serialize FAS: {err}")))
}

fn install_panic_hook() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

fn read_config(config: Option<JsValue>) -> Result<EngineConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsEngineConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("cannot read config: {err}")))?;
            Ok(EngineConfig::from(cfg))
        }
        _ => Ok(EngineConfig::default()),
    }
}

fn format_mcu_error(err: McuError) -> String {
    format!("MCU error: {err}")
}
