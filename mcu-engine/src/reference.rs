//! Reference-range evaluation for a single metric value.

use mcu_core::{parse_number, Gender, MetricItem, NumericRanges, Range, ReferenceSpec};

/// Decide whether `value` lies outside the metric's reference.
///
/// Missing or blank values are never abnormal. Numeric metrics fail open: a
/// value that does not parse as a number, or a gender without an applicable
/// range, is reported as normal.
pub fn is_abnormal(metric: &MetricItem, value: Option<&str>, gender: Gender) -> bool {
    let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        return false;
    };

    match &metric.reference {
        ReferenceSpec::Qualitative(set) => !set.contains(value),
        ReferenceSpec::Numeric(ranges) => {
            let Some(number) = parse_number(value) else {
                tracing::trace!(metric = metric.label, value, "non-numeric value treated as normal");
                return false;
            };
            applicable_range(ranges, gender).is_some_and(|range| range.excludes(number))
        }
    }
}

/// Gender-specific range when one exists for `gender`, otherwise the shared range.
pub fn applicable_range(ranges: &NumericRanges, gender: Gender) -> Option<&Range> {
    let specific = match gender {
        Gender::Male => ranges.male.as_ref(),
        Gender::Female => ranges.female.as_ref(),
        Gender::Other => None,
    };
    specific.or(ranges.all.as_ref())
}

/// Summary line for an abnormal finding: `- LABEL: value UNIT`.
pub fn format_finding(metric: &MetricItem, value: &str) -> String {
    format!("- {}: {} {}", metric.label, value, metric.unit)
        .trim_end()
        .to_string()
}
