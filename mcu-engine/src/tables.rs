//! Laboratory reference tables.
//!
//! Static lookup data. Declaration order is the order findings are listed in
//! the summaries.

use mcu_core::{MetricItem, NumericRanges, QualitativeSet, Range, ReferenceSpec};

pub const KEY_HEMOGLOBIN: &str = "hemoglobin";
pub const KEY_GLUCOSE_FASTING: &str = "gula_darah_puasa";
pub const KEY_CHOLESTEROL_TOTAL: &str = "kolesterol_total";
pub const KEY_URIC_ACID: &str = "asam_urat";

const NEGATIVE: QualitativeSet = QualitativeSet {
    normal: &["negatif"],
};

const fn numeric(
    label: &'static str,
    key: &'static str,
    ranges: NumericRanges,
    unit: &'static str,
) -> MetricItem {
    MetricItem {
        label,
        key,
        reference: ReferenceSpec::Numeric(ranges),
        unit,
    }
}

const fn qualitative(label: &'static str, key: &'static str, set: QualitativeSet) -> MetricItem {
    MetricItem {
        label,
        key,
        reference: ReferenceSpec::Qualitative(set),
        unit: "",
    }
}

pub static HEMATOLOGY: [MetricItem; 15] = [
    numeric(
        "Hemoglobin",
        KEY_HEMOGLOBIN,
        NumericRanges::by_gender(Range::between(14.0, 18.0), Range::between(12.0, 16.0)),
        "g/dL",
    ),
    numeric(
        "Leukosit",
        "leukosit",
        NumericRanges::all(Range::between(5.0, 10.0)),
        "10³/µL",
    ),
    numeric(
        "Eritrosit",
        "eritrosit",
        NumericRanges::by_gender(Range::between(4.5, 5.5), Range::between(4.0, 5.0)),
        "10⁶/µL",
    ),
    numeric(
        "Hematokrit",
        "hematokrit",
        NumericRanges::by_gender(Range::between(40.0, 48.0), Range::between(37.0, 43.0)),
        "%",
    ),
    numeric(
        "Trombosit",
        "trombosit",
        NumericRanges::all(Range::between(150.0, 400.0)),
        "10³/µL",
    ),
    numeric(
        "Laju Endap Darah",
        "led",
        NumericRanges::by_gender(Range::at_most(10.0), Range::at_most(15.0)),
        "mm/jam",
    ),
    numeric("MCV", "mcv", NumericRanges::all(Range::between(82.0, 92.0)), "fL"),
    numeric("MCH", "mch", NumericRanges::all(Range::between(27.0, 31.0)), "pg"),
    numeric("MCHC", "mchc", NumericRanges::all(Range::between(32.0, 36.0)), "g/dL"),
    numeric("Basofil", "basofil", NumericRanges::all(Range::between(0.0, 1.0)), "%"),
    numeric("Eosinofil", "eosinofil", NumericRanges::all(Range::between(1.0, 3.0)), "%"),
    numeric(
        "Neutrofil Batang",
        "neutrofil_batang",
        NumericRanges::all(Range::between(2.0, 6.0)),
        "%",
    ),
    numeric(
        "Neutrofil Segmen",
        "neutrofil_segmen",
        NumericRanges::all(Range::between(50.0, 70.0)),
        "%",
    ),
    numeric("Limfosit", "limfosit", NumericRanges::all(Range::between(20.0, 40.0)), "%"),
    numeric("Monosit", "monosit", NumericRanges::all(Range::between(2.0, 8.0)), "%"),
];

pub static BLOOD_CHEMISTRY: [MetricItem; 11] = [
    numeric(
        "Gula Darah Puasa",
        KEY_GLUCOSE_FASTING,
        NumericRanges::all(Range::between(70.0, 115.0)),
        "mg/dL",
    ),
    numeric(
        "Gula Darah 2 Jam PP",
        "gula_darah_2_jam_pp",
        NumericRanges::all(Range::at_most(140.0)),
        "mg/dL",
    ),
    numeric(
        "Kolesterol Total",
        KEY_CHOLESTEROL_TOTAL,
        NumericRanges::all(Range::at_most(200.0)),
        "mg/dL",
    ),
    // Female override only; male falls back to the shared bound.
    numeric(
        "Kolesterol HDL",
        "kolesterol_hdl",
        NumericRanges {
            all: Some(Range::at_least(40.0)),
            male: None,
            female: Some(Range::at_least(50.0)),
        },
        "mg/dL",
    ),
    numeric(
        "Kolesterol LDL",
        "kolesterol_ldl",
        NumericRanges::all(Range::at_most(130.0)),
        "mg/dL",
    ),
    numeric(
        "Trigliserida",
        "trigliserida",
        NumericRanges::all(Range::at_most(150.0)),
        "mg/dL",
    ),
    numeric(
        "Asam Urat",
        KEY_URIC_ACID,
        NumericRanges::by_gender(Range::between(3.4, 7.0), Range::between(2.4, 5.7)),
        "mg/dL",
    ),
    numeric("Ureum", "ureum", NumericRanges::all(Range::between(10.0, 50.0)), "mg/dL"),
    numeric(
        "Kreatinin",
        "kreatinin",
        NumericRanges::by_gender(Range::between(0.7, 1.3), Range::between(0.6, 1.1)),
        "mg/dL",
    ),
    numeric(
        "SGOT",
        "sgot",
        NumericRanges::by_gender(Range::at_most(37.0), Range::at_most(31.0)),
        "U/L",
    ),
    numeric(
        "SGPT",
        "sgpt",
        NumericRanges::by_gender(Range::at_most(42.0), Range::at_most(32.0)),
        "U/L",
    ),
];

pub static URINALYSIS: [MetricItem; 17] = [
    qualitative(
        "Warna",
        "urin_warna",
        QualitativeSet {
            normal: &["kuning", "kuning muda", "kuning tua", "kuning jernih"],
        },
    ),
    qualitative(
        "Kejernihan",
        "urin_kejernihan",
        QualitativeSet {
            normal: &["jernih"],
        },
    ),
    numeric("pH", "urin_ph", NumericRanges::all(Range::between(4.5, 8.0)), ""),
    numeric(
        "Berat Jenis",
        "urin_berat_jenis",
        NumericRanges::all(Range::between(1.005, 1.030)),
        "",
    ),
    qualitative("Protein", "urin_protein", NEGATIVE),
    qualitative("Glukosa", "urin_glukosa", NEGATIVE),
    qualitative("Keton", "urin_keton", NEGATIVE),
    qualitative("Bilirubin", "urin_bilirubin", NEGATIVE),
    qualitative(
        "Urobilinogen",
        "urin_urobilinogen",
        QualitativeSet {
            normal: &["normal", "negatif"],
        },
    ),
    qualitative("Nitrit", "urin_nitrit", NEGATIVE),
    qualitative("Darah", "urin_darah", NEGATIVE),
    qualitative("Leukosit Esterase", "urin_leukosit_esterase", NEGATIVE),
    numeric(
        "Sedimen Eritrosit",
        "urin_sedimen_eritrosit",
        NumericRanges::all(Range::between(0.0, 2.0)),
        "/LPB",
    ),
    numeric(
        "Sedimen Leukosit",
        "urin_sedimen_leukosit",
        NumericRanges::all(Range::between(0.0, 5.0)),
        "/LPB",
    ),
    qualitative("Silinder", "urin_silinder", NEGATIVE),
    qualitative("Kristal", "urin_kristal", NEGATIVE),
    qualitative("Bakteri", "urin_bakteri", NEGATIVE),
];
