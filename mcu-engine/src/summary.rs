//! Per-category result summaries for the patient report.

use mcu_core::{MetricItem, PatientRecord, Summaries};

use crate::packages::{AddOn, PackageSelection};
use crate::reference::{format_finding, is_abnormal};
use crate::tables::{BLOOD_CHEMISTRY, HEMATOLOGY, URINALYSIS};

pub const NORMAL: &str = "NORMAL";
pub const REFRAKTOMETRI_ATTACHMENT: &str = "Lihat lampiran hasil refraktometri.";

pub const KEY_RONTGEN_THORAX: &str = "rontgen_thorax_kesan";
pub const KEY_EKG: &str = "ekg_kesimpulan";
pub const KEY_USG_MAMMAE: &str = "usg_mammae_kesimpulan";
pub const KEY_USG_ABDOMEN: &str = "usg_abdomen_kesimpulan";
pub const KEY_AUDIOMETRY: &str = "audiometri_kesimpulan";
pub const KEY_SPIROMETRY: &str = "spirometri_kesimpulan";
pub const KEY_TREADMILL: &str = "treadmill_kesimpulan";
pub const KEY_LEAD_IN_BLOOD: &str = "timbal_darah";
pub const KEY_HBSAG: &str = "hbsag";
pub const REFRAKTOMETRI_SPHERE_KEYS: [&str; 2] = ["refraktometri_od_sph", "refraktometri_os_sph"];

/// Compose the summaries for every category covered by the patient's packages.
pub fn summarize_results(record: &PatientRecord) -> Summaries {
    let selection = PackageSelection::from_identifiers(record.mcu_package.as_slice());
    let mut summaries = Summaries::default();

    if selection.has_basic() {
        summaries.hematologi = Some(summarize_lab_table(&HEMATOLOGY, record));
        summaries.kimia_darah = Some(summarize_lab_table(&BLOOD_CHEMISTRY, record));
        summaries.urin_rutin = Some(summarize_lab_table(&URINALYSIS, record));
        // Physical findings only feed the dashboard flags for now.
        summaries.pemeriksaan_fisik = Some(NORMAL.to_string());
    }

    let descriptive = |add_on: AddOn, key: &str| {
        selection
            .has_add_on(add_on)
            .then(|| descriptive_summary(record.field_text(key)))
    };
    summaries.rontgen_thorax = descriptive(AddOn::RadiologiThoraks, KEY_RONTGEN_THORAX);
    summaries.ekg = descriptive(AddOn::Ekg, KEY_EKG);
    summaries.usg_mammae = descriptive(AddOn::UsgMammae, KEY_USG_MAMMAE);
    summaries.usg_abdomen = descriptive(AddOn::UsgWholeAbdomen, KEY_USG_ABDOMEN);
    summaries.audiometry = descriptive(AddOn::Audiometry, KEY_AUDIOMETRY);
    summaries.spirometry = descriptive(AddOn::Spirometry, KEY_SPIROMETRY);
    summaries.treadmill = descriptive(AddOn::Treadmill, KEY_TREADMILL);

    if selection.has_add_on(AddOn::Biomonitoring) {
        summaries.biomonitoring = Some(biomonitoring_summary(record));
    }
    if selection.has_add_on(AddOn::PanelHepatitis) {
        summaries.hepatitis = Some(hepatitis_summary(record));
    }
    if selection.has_add_on(AddOn::Refraktometri) {
        summaries.refraktometri = Some(refraktometri_summary(record));
    }

    tracing::debug!(
        patient = %record.id,
        categories = summaries.entries().len(),
        "composed result summaries"
    );

    summaries
}

/// `NORMAL`, or one `- LABEL: value UNIT` line per abnormal metric in table order.
pub fn summarize_lab_table(table: &[MetricItem], record: &PatientRecord) -> String {
    let gender = record.gender();
    let findings: Vec<String> = table
        .iter()
        .filter_map(|metric| {
            let value = record.field_text(metric.key)?;
            is_abnormal(metric, Some(&value), gender).then(|| format_finding(metric, &value))
        })
        .collect();

    if findings.is_empty() {
        NORMAL.to_string()
    } else {
        findings.join("\n")
    }
}

/// Conclusion text as written, unless it is empty or mentions "normal".
///
/// The substring check also matches "abnormal"; such conclusions read as NORMAL.
pub fn descriptive_summary(conclusion: Option<String>) -> String {
    match conclusion {
        Some(text) if !text.to_lowercase().contains("normal") => text,
        _ => NORMAL.to_string(),
    }
}

fn biomonitoring_summary(record: &PatientRecord) -> String {
    match record.field_text(KEY_LEAD_IN_BLOOD) {
        Some(value) if value != NORMAL => value,
        _ => NORMAL.to_string(),
    }
}

fn hepatitis_summary(record: &PatientRecord) -> String {
    match record.field_text(KEY_HBSAG) {
        Some(value) if !value.eq_ignore_ascii_case("negatif") => format!("HBsAg: {value}"),
        _ => NORMAL.to_string(),
    }
}

fn refraktometri_summary(record: &PatientRecord) -> String {
    let measured = REFRAKTOMETRI_SPHERE_KEYS
        .iter()
        .any(|key| record.field_text(key).is_some());
    if measured {
        REFRAKTOMETRI_ATTACHMENT.to_string()
    } else {
        NORMAL.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(packages: &[&str], gender: &str, fields: Value) -> PatientRecord {
        PatientRecord {
            id: "P-001".to_string(),
            gender: gender.to_string(),
            mcu_package: packages.iter().map(|p| p.to_string()).collect(),
            examination: serde_json::from_value(fields).expect("examination fields"),
            ..PatientRecord::default()
        }
    }

    #[test]
    fn regular_package_with_normal_labs() {
        let patient = record(
            &["MCU Regular"],
            "LAKI-LAKI",
            json!({
                "hemoglobin": "15.1",
                "leukosit": "7.2",
                "trombosit": 250,
                "gula_darah_puasa": "90",
                "kolesterol_total": "180",
                "urin_warna": "Kuning",
                "urin_protein": "Negatif",
                "urin_ph": "6.0"
            }),
        );

        let summaries = summarize_results(&patient);
        assert_eq!(summaries.hematologi.as_deref(), Some(NORMAL));
        assert_eq!(summaries.kimia_darah.as_deref(), Some(NORMAL));
        assert_eq!(summaries.urin_rutin.as_deref(), Some(NORMAL));
        assert_eq!(summaries.pemeriksaan_fisik.as_deref(), Some(NORMAL));
        assert_eq!(summaries.audiometry, None);

        let value = serde_json::to_value(&summaries).expect("serialize");
        assert!(value.get("audiometry").is_none());
        assert_eq!(value["kimiaDarah"], json!("NORMAL"));
    }

    #[test]
    fn abnormal_metrics_are_listed_in_table_order() {
        let patient = record(
            &["mcu eksekutif"],
            "PEREMPUAN",
            json!({
                "trigliserida": "210",
                "gula_darah_puasa": "130",
                "kolesterol_total": 245,
                "asam_urat": "6.1",
                "urin_protein": "Positif (+1)",
                "urin_ph": "asam"
            }),
        );

        let summaries = summarize_results(&patient);
        assert_eq!(
            summaries.kimia_darah.as_deref(),
            Some(
                "- Gula Darah Puasa: 130 mg/dL\n\
                 - Kolesterol Total: 245 mg/dL\n\
                 - Trigliserida: 210 mg/dL\n\
                 - Asam Urat: 6.1 mg/dL"
            )
        );
        assert_eq!(summaries.urin_rutin.as_deref(), Some("- Protein: Positif (+1)"));
        assert_eq!(summaries.hematologi.as_deref(), Some(NORMAL));
    }

    #[test]
    fn add_ons_without_basic_package_skip_lab_tables() {
        let patient = record(&["EKG"], "LAKI-LAKI", json!({"ekg_kesimpulan": "Sinus rhythm, normal"}));
        let summaries = summarize_results(&patient);
        assert_eq!(summaries.hematologi, None);
        assert_eq!(summaries.pemeriksaan_fisik, None);
        assert_eq!(summaries.ekg.as_deref(), Some(NORMAL));
        assert_eq!(summaries.entries(), vec![("ekg", NORMAL)]);
    }

    #[test]
    fn descriptive_conclusions() {
        assert_eq!(descriptive_summary(None), NORMAL);
        assert_eq!(descriptive_summary(Some("Dalam batas Normal".into())), NORMAL);
        assert_eq!(descriptive_summary(Some("ABNORMAL".into())), NORMAL);
        assert_eq!(
            descriptive_summary(Some("Kardiomegali ringan".into())),
            "Kardiomegali ringan"
        );
    }

    #[test]
    fn biomonitoring_hepatitis_and_refraktometri() {
        let packages = ["MCU DMC", "Biomonitoring", "Panel Hepatitis", "Refraktometri"];

        let clean = record(
            &packages,
            "LAKI-LAKI",
            json!({"timbal_darah": "NORMAL", "hbsag": "Negatif"}),
        );
        let summaries = summarize_results(&clean);
        assert_eq!(summaries.biomonitoring.as_deref(), Some(NORMAL));
        assert_eq!(summaries.hepatitis.as_deref(), Some(NORMAL));
        assert_eq!(summaries.refraktometri.as_deref(), Some(NORMAL));

        let findings = record(
            &packages,
            "LAKI-LAKI",
            json!({
                "timbal_darah": "32 µg/dL",
                "hbsag": "Reaktif",
                "refraktometri_os_sph": "-1.25"
            }),
        );
        let summaries = summarize_results(&findings);
        assert_eq!(summaries.biomonitoring.as_deref(), Some("32 µg/dL"));
        assert_eq!(summaries.hepatitis.as_deref(), Some("HBsAg: Reaktif"));
        assert_eq!(
            summaries.refraktometri.as_deref(),
            Some(REFRAKTOMETRI_ATTACHMENT)
        );
    }

    #[test]
    fn unknown_packages_produce_no_categories() {
        let patient = record(&["MCU Premium", "MRI"], "LAKI-LAKI", json!({"hemoglobin": "3"}));
        assert_eq!(summarize_results(&patient), Summaries::default());
    }

    #[test]
    fn summaries_are_stable_across_calls() {
        let patient = record(
            &["MCU Akhir", "Audiometry"],
            "PEREMPUAN",
            json!({"hemoglobin": "10.4", "audiometri_kesimpulan": "Tuli konduktif ringan AD"}),
        );
        let first = serde_json::to_string(&summarize_results(&patient)).expect("serialize");
        let second = serde_json::to_string(&summarize_results(&patient)).expect("serialize");
        assert_eq!(first, second);
    }
}
