//! Dashboard statistics over many patient records.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use mcu_core::{BarEntry, CohortStats, EngineConfig, HealthIssue, PatientRecord, PieSlice};

use crate::flags::detect_health_issues;
use crate::packages::{Package, PackageSelection};

/// Counts keyed by label, remembering first-seen order.
#[derive(Default)]
struct Tally {
    order: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn add(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&idx) => self.order[idx].1 += 1,
            None => {
                self.index.insert(label.to_string(), self.order.len());
                self.order.push((label.to_string(), 1));
            }
        }
    }

    fn into_pie(self) -> Vec<PieSlice> {
        self.order
            .into_iter()
            .map(|(name, value)| PieSlice { name, value })
            .collect()
    }

    /// Bars sorted by count descending, ties by name.
    fn into_sorted_bars(self) -> Vec<BarEntry> {
        let mut entries = self.order;
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
            .into_iter()
            .map(|(name, total)| BarEntry { name, total })
            .collect()
    }
}

fn label_or<'a>(raw: Option<&'a str>, fallback: &'a str) -> &'a str {
    match raw.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => fallback,
    }
}

/// Aggregate dashboard distributions in a single pass over `records`.
///
/// `today` closes the registration window; registrations are bucketed by the
/// clinic's local date.
pub fn aggregate_cohort(
    records: &[PatientRecord],
    today: NaiveDate,
    config: &EngineConfig,
) -> CohortStats {
    let mut genders = Tally::default();
    let mut locations = Tally::default();
    let mut checkpoints = Tally::default();
    let mut package_counts = [0u64; Package::HEADLINE.len()];
    let mut issue_counts = [0u64; HealthIssue::ALL.len()];
    let mut registrations: HashMap<NaiveDate, u64> = HashMap::new();

    for record in records {
        genders.add(label_or(Some(record.gender.as_str()), &config.unknown_label));
        locations.add(label_or(record.location.as_deref(), &config.unknown_label));

        let selection = PackageSelection::from_identifiers(record.mcu_package.as_slice());
        for (count, package) in package_counts.iter_mut().zip(Package::HEADLINE) {
            if selection.has_package(package) {
                *count += 1;
            }
        }

        if let Some(registered_at) = record.registered_at {
            *registrations
                .entry(config.local_date(registered_at))
                .or_insert(0) += 1;
        }

        for issue in detect_health_issues(record) {
            if let Some(idx) = HealthIssue::ALL.iter().position(|candidate| *candidate == issue) {
                issue_counts[idx] += 1;
            }
        }

        for entry in record.checkpoints.iter().filter(|entry| entry.is_completed()) {
            let name = entry.name.trim();
            if !name.is_empty() {
                checkpoints.add(name);
            }
        }
    }

    let package_distribution = Package::HEADLINE
        .into_iter()
        .zip(package_counts)
        .map(|(package, value)| PieSlice {
            name: package.chart_label().to_string(),
            value,
        })
        .collect();

    let mut health_issues: Vec<BarEntry> = HealthIssue::ALL
        .into_iter()
        .zip(issue_counts)
        .filter(|(_, total)| *total > 0)
        .map(|(issue, total)| BarEntry {
            name: issue.label().to_string(),
            total,
        })
        .collect();
    health_issues.sort_by(|a, b| b.total.cmp(&a.total));

    tracing::debug!(
        patients = records.len(),
        window_days = config.registration_window_days,
        "aggregated cohort statistics"
    );

    CohortStats {
        total_patients: records.len() as u64,
        gender_distribution: genders.into_pie(),
        package_distribution,
        registration_by_date: registration_window(&registrations, today, config),
        location_distribution: locations.into_sorted_bars(),
        health_issues,
        checkpoint_completion: checkpoints.into_sorted_bars(),
    }
}

/// One bar per day of the trailing window ending at `today`, oldest first.
fn registration_window(
    registrations: &HashMap<NaiveDate, u64>,
    today: NaiveDate,
    config: &EngineConfig,
) -> Vec<BarEntry> {
    (0..i64::from(config.registration_window_days))
        .rev()
        .filter_map(|days_back| today.checked_sub_signed(Duration::days(days_back)))
        .map(|day| BarEntry {
            name: day.format("%Y-%m-%d").to_string(),
            total: registrations.get(&day).copied().unwrap_or(0),
        })
        .collect()
}
