use std::fmt;

use itertools::Itertools;
use mapmark_providers::{Address, Coordinate};

use crate::config::LabelStyle;

/// A geocoder result as shown to the user: one-line label plus position.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub label: String,
    pub coordinate: Coordinate,
}

impl Candidate {
    pub fn new(label: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            label: label.into(),
            coordinate,
        }
    }

    pub fn from_address(address: &Address, style: LabelStyle) -> Self {
        Self {
            label: format_label(address, style),
            coordinate: address.coordinate(),
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label, self.coordinate)
    }
}

/// Comma-join the address components picked by `style`.
///
/// Missing and blank components are skipped, so there are never doubled or
/// dangling separators.
pub fn format_label(address: &Address, style: LabelStyle) -> String {
    let parts = match style {
        LabelStyle::LocalityRegionCountry => [
            address.locality(),
            address.admin_area(),
            address.country_name(),
        ],
        LabelStyle::FeatureLocalityCountry => [
            address.feature_name(),
            address.locality(),
            address.country_name(),
        ],
    };
    parts
        .into_iter()
        .flatten()
        .map(|part| part.trim_matches(|c: char| c == ',' || c.is_whitespace()))
        .filter(|part| !part.is_empty())
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> Address {
        Address::new(48.8566, 2.3522)
            .with_feature_name("Eiffel Tower")
            .with_locality("Paris")
            .with_admin_area("Île-de-France")
            .with_country_name("France")
    }

    #[test]
    fn test_locality_region_country() {
        assert_eq!(
            format_label(&paris(), LabelStyle::LocalityRegionCountry),
            "Paris, Île-de-France, France"
        );
    }

    #[test]
    fn test_feature_locality_country() {
        assert_eq!(
            format_label(&paris(), LabelStyle::FeatureLocalityCountry),
            "Eiffel Tower, Paris, France"
        );
    }

    #[test]
    fn test_missing_components_are_omitted() {
        let address = Address::new(0.0, 0.0).with_country_name("France");
        assert_eq!(
            format_label(&address, LabelStyle::LocalityRegionCountry),
            "France"
        );

        let address = Address::new(0.0, 0.0)
            .with_locality("Paris")
            .with_admin_area("  ")
            .with_country_name("France");
        assert_eq!(
            format_label(&address, LabelStyle::LocalityRegionCountry),
            "Paris, France"
        );
    }

    #[test]
    fn test_empty_address_has_empty_label() {
        let address = Address::new(1.0, 2.0);
        assert_eq!(format_label(&address, LabelStyle::LocalityRegionCountry), "");
    }

    #[test]
    fn test_stray_separators_trimmed() {
        let address = Address::new(0.0, 0.0)
            .with_locality(" Springfield, ")
            .with_country_name(",United States");
        assert_eq!(
            format_label(&address, LabelStyle::LocalityRegionCountry),
            "Springfield, United States"
        );
    }

    #[test]
    fn test_candidate_from_address() {
        let candidate = Candidate::from_address(&paris(), LabelStyle::LocalityRegionCountry);
        assert_eq!(candidate.coordinate, Coordinate::new(48.8566, 2.3522));
        assert_eq!(candidate.label, "Paris, Île-de-France, France");
    }
}
