use chrono::{Duration, NaiveDate, TimeZone, Utc};
use mcu_core::{
    DassLevel, EngineConfig, FasCategory, Gender, MetricItem, NumericRanges, PatientRecord, Range,
    ReferenceSpec,
};
use mcu_engine::dass::{calculate_dass_scores, DassAnswers, ITEM_COUNT as DASS_ITEMS};
use mcu_engine::fas::{calculate_fas_result, FasAnswers, ITEM_COUNT as FAS_ITEMS};
use mcu_engine::{aggregate_cohort, is_abnormal, summarize_results};
use proptest::prelude::*;

fn shared_metric(min: f64, max: f64) -> MetricItem {
    MetricItem {
        label: "Test",
        key: "test",
        reference: ReferenceSpec::Numeric(NumericRanges::all(Range::between(min, max))),
        unit: "u",
    }
}

proptest! {
    #[test]
    fn shared_range_flags_only_values_outside(
        min in -500.0f64..500.0,
        width in 0.0f64..500.0,
        value in -1_500.0f64..1_500.0
    ) {
        let max = min + width;
        let metric = shared_metric(min, max);
        let text = value.to_string();

        let abnormal = is_abnormal(&metric, Some(&text), Gender::Other);
        prop_assert_eq!(abnormal, value < min || value > max);
        prop_assert!(!is_abnormal(&metric, Some(&min.to_string()), Gender::Male));
        prop_assert!(!is_abnormal(&metric, Some(&max.to_string()), Gender::Female));
    }

    #[test]
    fn gender_range_overrides_shared_range(value in 0.0f64..30.0) {
        let metric = MetricItem {
            label: "Hemoglobin",
            key: "hemoglobin",
            reference: ReferenceSpec::Numeric(NumericRanges {
                all: Some(Range::between(10.0, 20.0)),
                male: Some(Range::between(14.0, 18.0)),
                female: None,
            }),
            unit: "g/dL",
        };
        let text = value.to_string();

        prop_assert_eq!(
            is_abnormal(&metric, Some(&text), Gender::from_raw("LAKI-LAKI")),
            !(14.0..=18.0).contains(&value)
        );
        prop_assert_eq!(
            is_abnormal(&metric, Some(&text), Gender::from_raw("PEREMPUAN")),
            !(10.0..=20.0).contains(&value)
        );
    }

    #[test]
    fn dass_scores_stay_in_range(answers in prop::array::uniform21(0u8..=3)) {
        let answers = DassAnswers::new(answers).expect("answers within 0..=3");
        let result = calculate_dass_scores(&answers);

        for score in [result.depression_score, result.anxiety_score, result.stress_score] {
            prop_assert!(score <= 42);
            prop_assert_eq!(score % 2, 0);
        }
        prop_assert_eq!(result, calculate_dass_scores(&answers));
    }

    #[test]
    fn fas_score_is_bounded(answers in prop::array::uniform10(1u8..=5)) {
        let answers = FasAnswers::new(answers.map(Some));
        let result = calculate_fas_result(&answers);

        let raw_total = result.raw_total.expect("complete answers have a total");
        prop_assert!((10..=50).contains(&raw_total));
        let score = result.score_1_to_10.expect("complete answers have a score");
        prop_assert!((1..=10).contains(&score));
        prop_assert_ne!(result.category, FasCategory::NotAvailable);
        prop_assert_eq!(result, calculate_fas_result(&answers));
    }

    #[test]
    fn fas_with_a_missing_item_is_not_available(
        answers in prop::array::uniform10(1u8..=5),
        missing in 0usize..FAS_ITEMS
    ) {
        let mut partial = answers.map(Some);
        partial[missing] = None;
        let result = calculate_fas_result(&FasAnswers::new(partial));

        prop_assert_eq!(result.raw_total, None);
        prop_assert_eq!(result.score_1_to_10, None);
        prop_assert_eq!(result.category, FasCategory::NotAvailable);
    }

    #[test]
    fn registrations_on_one_day_fill_one_bucket(
        patients in 1usize..20,
        days_back in 0i64..14,
        hour in 0u32..24
    ) {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let config = EngineConfig { utc_offset_minutes: 0, ..EngineConfig::default() };
        let day = today - Duration::days(days_back);
        let registered_at = Utc
            .with_ymd_and_hms(2026, 3, 10, hour, 0, 0)
            .unwrap()
            - Duration::days(days_back);

        let records: Vec<PatientRecord> = (0..patients)
            .map(|idx| PatientRecord {
                id: format!("P-{idx}"),
                registered_at: Some(registered_at),
                ..PatientRecord::default()
            })
            .collect();

        let stats = aggregate_cohort(&records, today, &config);
        prop_assert_eq!(stats.registration_by_date.len(), 7);

        let non_zero: Vec<_> = stats
            .registration_by_date
            .iter()
            .filter(|bar| bar.total > 0)
            .collect();
        if days_back < 7 {
            prop_assert_eq!(non_zero.len(), 1);
            prop_assert_eq!(non_zero[0].total, patients as u64);
            prop_assert_eq!(&non_zero[0].name, &day.format("%Y-%m-%d").to_string());
        } else {
            prop_assert!(non_zero.is_empty());
        }

        prop_assert_eq!(stats, aggregate_cohort(&records, today, &config));
    }

    #[test]
    fn summaries_only_cover_selected_packages(
        packages in prop::sample::subsequence(
            vec!["MCU Regular", "EKG", "Audiometry", "Treadmill", "Panel Hepatitis"],
            0..=5,
        )
    ) {
        let record = PatientRecord {
            mcu_package: packages.iter().map(|p| p.to_string()).collect(),
            ..PatientRecord::default()
        };
        let summaries = summarize_results(&record);

        prop_assert_eq!(summaries.hematologi.is_some(), packages.contains(&"MCU Regular"));
        prop_assert_eq!(summaries.ekg.is_some(), packages.contains(&"EKG"));
        prop_assert_eq!(summaries.audiometry.is_some(), packages.contains(&"Audiometry"));
        prop_assert_eq!(summaries.treadmill.is_some(), packages.contains(&"Treadmill"));
        prop_assert_eq!(summaries.hepatitis.is_some(), packages.contains(&"Panel Hepatitis"));
        prop_assert!(summaries.spirometry.is_none());
    }
}

#[test]
fn dass_extremes() {
    let zero = calculate_dass_scores(&DassAnswers::new([0; DASS_ITEMS]).unwrap());
    assert_eq!(
        (zero.depression_score, zero.anxiety_score, zero.stress_score),
        (0, 0, 0)
    );
    assert_eq!(zero.depression_level, DassLevel::Normal);

    let max = calculate_dass_scores(&DassAnswers::new([3; DASS_ITEMS]).unwrap());
    assert_eq!(
        (max.depression_score, max.anxiety_score, max.stress_score),
        (42, 42, 42)
    );
    assert_eq!(max.anxiety_level, DassLevel::SangatParah);
    assert_eq!(max.stress_level, DassLevel::SangatParah);
}

#[test]
fn fas_all_threes_is_tired() {
    let result = calculate_fas_result(&FasAnswers::new([Some(3); FAS_ITEMS]));
    assert_eq!(result.raw_total, Some(30));
    assert_eq!(result.score_1_to_10, Some(6));
    assert_eq!(result.category, FasCategory::Tired);
}
