//! Examination stations a patient must pass and how far they have come.

use mcu_core::{CheckpointProgress, PatientRecord};

use crate::packages::{AddOn, Package, PackageSelection};

pub const PENDAFTARAN: &str = "Pendaftaran";
pub const PEMERIKSAAN_FISIK: &str = "Pemeriksaan Fisik";
pub const LABORATORIUM: &str = "Laboratorium";
pub const PSIKOLOGI: &str = "Psikologi";
pub const RADIOLOGI: &str = "Radiologi";
pub const EKG: &str = "EKG";
pub const USG: &str = "USG";
pub const AUDIOMETRI: &str = "Audiometri";
pub const SPIROMETRI: &str = "Spirometri";
pub const TREADMILL: &str = "Treadmill";
pub const REFRAKTOMETRI: &str = "Refraktometri";

fn add_on_station(add_on: AddOn) -> &'static str {
    match add_on {
        AddOn::Biomonitoring | AddOn::PanelHepatitis => LABORATORIUM,
        AddOn::RadiologiThoraks => RADIOLOGI,
        AddOn::Ekg => EKG,
        AddOn::UsgMammae | AddOn::UsgWholeAbdomen => USG,
        AddOn::Audiometry => AUDIOMETRI,
        AddOn::Spirometry => SPIROMETRI,
        AddOn::Treadmill => TREADMILL,
        AddOn::Refraktometri => REFRAKTOMETRI,
    }
}

/// Stations required by a package selection, deduplicated, in visiting order.
pub fn required_checkpoints(selection: &PackageSelection) -> Vec<&'static str> {
    let mut stations: Vec<&'static str> = Vec::new();
    let mut push = |station: &'static str| {
        if !stations.contains(&station) {
            stations.push(station);
        }
    };

    if selection.has_basic() {
        push(PENDAFTARAN);
        push(PEMERIKSAAN_FISIK);
        push(LABORATORIUM);
    }
    if selection.has_package(Package::Dmc) {
        push(PSIKOLOGI);
    }
    for add_on in selection.add_ons() {
        push(add_on_station(*add_on));
    }

    stations
}

/// Compare required stations with the record's completed checkpoint entries.
///
/// Names match case-insensitively. A record with no required station is never complete.
pub fn checkpoint_progress(record: &PatientRecord) -> CheckpointProgress {
    let selection = PackageSelection::from_identifiers(record.mcu_package.as_slice());
    let required = required_checkpoints(&selection);

    let done = |station: &str| {
        record
            .checkpoints
            .iter()
            .any(|entry| entry.is_completed() && entry.name.trim().eq_ignore_ascii_case(station))
    };

    let (completed, pending): (Vec<&str>, Vec<&str>) =
        required.iter().copied().partition(|station| done(station));

    CheckpointProgress {
        is_complete: !required.is_empty() && pending.is_empty(),
        required: required.iter().map(|s| s.to_string()).collect(),
        completed: completed.into_iter().map(str::to_string).collect(),
        pending: pending.into_iter().map(str::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mcu_core::CheckpointEntry;

    fn entry(name: &str, completed: bool) -> CheckpointEntry {
        CheckpointEntry {
            name: name.to_string(),
            completed_at: completed.then(|| Utc.with_ymd_and_hms(2026, 3, 2, 8, 30, 0).unwrap()),
        }
    }

    #[test]
    fn stations_follow_packages_and_add_ons() {
        let selection = PackageSelection::from_identifiers(&[
            "MCU DMC",
            "usg mammae",
            "USG Whole Abdomen",
            "panel hepatitis",
            "EKG",
        ]);
        assert_eq!(
            required_checkpoints(&selection),
            vec![PENDAFTARAN, PEMERIKSAAN_FISIK, LABORATORIUM, PSIKOLOGI, USG, EKG]
        );
    }

    #[test]
    fn progress_tracks_completed_and_pending() {
        let record = PatientRecord {
            mcu_package: vec!["MCU Regular".to_string(), "Audiometry".to_string()],
            checkpoints: vec![
                entry("pendaftaran", true),
                entry("Pemeriksaan Fisik", true),
                entry("Laboratorium", false),
                entry("Gigi", true),
            ],
            ..PatientRecord::default()
        };

        let progress = checkpoint_progress(&record);
        assert_eq!(progress.completed, vec![PENDAFTARAN, PEMERIKSAAN_FISIK]);
        assert_eq!(progress.pending, vec![LABORATORIUM, AUDIOMETRI]);
        assert!(!progress.is_complete);
    }

    #[test]
    fn complete_when_every_station_is_done() {
        let record = PatientRecord {
            mcu_package: vec!["EKG".to_string()],
            checkpoints: vec![entry("EKG", true)],
            ..PatientRecord::default()
        };
        assert!(checkpoint_progress(&record).is_complete);
    }

    #[test]
    fn nothing_required_is_not_complete() {
        let progress = checkpoint_progress(&PatientRecord::default());
        assert!(progress.required.is_empty());
        assert!(!progress.is_complete);
    }
}
