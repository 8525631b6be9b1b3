//! Package and add-on identifiers and what a selection covers.

/// Core MCU packages. Each one includes the basic lab panel and physical exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Package {
    Regular,
    Eksekutif,
    Akhir,
    Dmc,
}

impl Package {
    pub const ALL: [Package; 4] = [Self::Regular, Self::Eksekutif, Self::Akhir, Self::Dmc];

    /// Packages shown on the dashboard package chart.
    pub const HEADLINE: [Package; 3] = [Self::Regular, Self::Eksekutif, Self::Akhir];

    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Regular => "mcu regular",
            Self::Eksekutif => "mcu eksekutif",
            Self::Akhir => "mcu akhir",
            Self::Dmc => "mcu dmc",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Regular => "MCU Regular",
            Self::Eksekutif => "MCU Eksekutif",
            Self::Akhir => "MCU Akhir",
            Self::Dmc => "MCU DMC",
        }
    }

    /// Chart label: the display name without its `MCU ` prefix.
    pub fn chart_label(self) -> &'static str {
        let name = self.display_name();
        name.strip_prefix("MCU ").unwrap_or(name)
    }
}

/// Optional examinations that can be added to any package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddOn {
    Biomonitoring,
    PanelHepatitis,
    RadiologiThoraks,
    Ekg,
    UsgMammae,
    UsgWholeAbdomen,
    Audiometry,
    Spirometry,
    Treadmill,
    Refraktometri,
}

impl AddOn {
    pub const ALL: [AddOn; 10] = [
        Self::Biomonitoring,
        Self::PanelHepatitis,
        Self::RadiologiThoraks,
        Self::Ekg,
        Self::UsgMammae,
        Self::UsgWholeAbdomen,
        Self::Audiometry,
        Self::Spirometry,
        Self::Treadmill,
        Self::Refraktometri,
    ];

    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Biomonitoring => "biomonitoring",
            Self::PanelHepatitis => "panel hepatitis",
            Self::RadiologiThoraks => "radiologi thoraks",
            Self::Ekg => "ekg",
            Self::UsgMammae => "usg mammae",
            Self::UsgWholeAbdomen => "usg whole abdomen",
            Self::Audiometry => "audiometry",
            Self::Spirometry => "spirometry",
            Self::Treadmill => "treadmill",
            Self::Refraktometri => "refraktometri",
        }
    }
}

/// Parsed view of a patient's `mcu_package` list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSelection {
    packages: Vec<Package>,
    add_ons: Vec<AddOn>,
}

impl PackageSelection {
    /// Match identifiers case-insensitively. Unknown identifiers are ignored.
    pub fn from_identifiers<S: AsRef<str>>(identifiers: &[S]) -> Self {
        let mut selection = Self::default();

        for raw in identifiers {
            let normalized = raw.as_ref().trim().to_lowercase();
            if normalized.is_empty() {
                continue;
            }

            if let Some(package) = Package::ALL
                .into_iter()
                .find(|package| package.identifier() == normalized)
            {
                if !selection.packages.contains(&package) {
                    selection.packages.push(package);
                }
            } else if let Some(add_on) = AddOn::ALL
                .into_iter()
                .find(|add_on| add_on.identifier() == normalized)
            {
                if !selection.add_ons.contains(&add_on) {
                    selection.add_ons.push(add_on);
                }
            } else {
                tracing::debug!(identifier = %raw.as_ref(), "ignoring unknown package identifier");
            }
        }

        selection
    }

    /// Any of the four core packages is selected.
    pub fn has_basic(&self) -> bool {
        !self.packages.is_empty()
    }

    pub fn has_package(&self, package: Package) -> bool {
        self.packages.contains(&package)
    }

    pub fn has_add_on(&self, add_on: AddOn) -> bool {
        self.add_ons.contains(&add_on)
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn add_ons(&self) -> &[AddOn] {
        &self.add_ons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_match_ignoring_case_and_padding() {
        let selection =
            PackageSelection::from_identifiers(&["MCU Regular", " EKG ", "Usg Whole Abdomen"]);

        assert!(selection.has_basic());
        assert!(selection.has_package(Package::Regular));
        assert!(!selection.has_package(Package::Eksekutif));
        assert!(selection.has_add_on(AddOn::Ekg));
        assert!(selection.has_add_on(AddOn::UsgWholeAbdomen));
        assert!(!selection.has_add_on(AddOn::UsgMammae));
    }

    #[test]
    fn unknown_and_blank_identifiers_are_ignored() {
        let selection = PackageSelection::from_identifiers(&["MCU Premium", "", "rontgen"]);
        assert_eq!(selection, PackageSelection::default());
        assert!(!selection.has_basic());
    }

    #[test]
    fn duplicates_collapse() {
        let selection = PackageSelection::from_identifiers(&["mcu akhir", "MCU AKHIR", "ekg", "Ekg"]);
        assert_eq!(selection.packages(), &[Package::Akhir]);
        assert_eq!(selection.add_ons(), &[AddOn::Ekg]);
    }

    #[test]
    fn chart_labels_drop_the_mcu_prefix() {
        let labels: Vec<&str> = Package::HEADLINE
            .into_iter()
            .map(Package::chart_label)
            .collect();
        assert_eq!(labels, vec!["Regular", "Eksekutif", "Akhir"]);
    }
}
