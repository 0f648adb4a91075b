//! Offline geocoding against an in-memory list of addresses.
//!
//! The gazetteer ranks entries by how well every comma-separated term of the
//! query matches one of the entry's address components. Ties keep insertion
//! order, so datasets should list the more prominent of two same-named places
//! first.

use std::{fs::File, io::BufReader, path::Path};

use tracing::{debug, info, instrument};

use crate::{Address, GeocodingProvider, error::Result};

/// `(feature_name, locality, admin_area, country_name, latitude, longitude)`
type SampleRow = (
    Option<&'static str>,
    &'static str,
    &'static str,
    &'static str,
    f64,
    f64,
);

const SAMPLE_PLACES: &[SampleRow] = &[
    (None, "New York", "New York", "United States", 40.7128, -74.0060),
    (None, "Los Angeles", "California", "United States", 34.0522, -118.2437),
    (None, "San Francisco", "California", "United States", 37.7749, -122.4194),
    (None, "Chicago", "Illinois", "United States", 41.8781, -87.6298),
    (None, "Paris", "Île-de-France", "France", 48.8566, 2.3522),
    (None, "Paris", "Texas", "United States", 33.6609, -95.5555),
    (None, "London", "England", "United Kingdom", 51.5074, -0.1278),
    (None, "London", "Ontario", "Canada", 42.9849, -81.2453),
    (None, "Berlin", "Berlin", "Germany", 52.5200, 13.4050),
    (None, "Madrid", "Community of Madrid", "Spain", 40.4168, -3.7038),
    (None, "Rome", "Lazio", "Italy", 41.9028, 12.4964),
    (None, "Tokyo", "Tokyo", "Japan", 35.6762, 139.6503),
    (None, "Sydney", "New South Wales", "Australia", -33.8688, 151.2093),
    (None, "Toronto", "Ontario", "Canada", 43.6532, -79.3832),
    (None, "Mexico City", "Mexico City", "Mexico", 19.4326, -99.1332),
    (None, "Rio de Janeiro", "Rio de Janeiro", "Brazil", -22.9068, -43.1729),
    (None, "Cairo", "Cairo Governorate", "Egypt", 30.0444, 31.2357),
    (None, "Nairobi", "Nairobi County", "Kenya", -1.2921, 36.8219),
    (None, "Mumbai", "Maharashtra", "India", 19.0760, 72.8777),
    (None, "Reykjavík", "Capital Region", "Iceland", 64.1466, -21.9426),
    (None, "Springfield", "Illinois", "United States", 39.7817, -89.6501),
    (None, "Springfield", "Massachusetts", "United States", 42.1015, -72.5898),
    (None, "Portland", "Oregon", "United States", 45.5152, -122.6784),
    (None, "Portland", "Maine", "United States", 43.6591, -70.2568),
    (Some("Eiffel Tower"), "Paris", "Île-de-France", "France", 48.8584, 2.2945),
    (Some("Statue of Liberty"), "New York", "New York", "United States", 40.6892, -74.0445),
    (Some("Golden Gate Bridge"), "San Francisco", "California", "United States", 37.8199, -122.4783),
    (Some("Sydney Opera House"), "Sydney", "New South Wales", "Australia", -33.8568, 151.2153),
];

/// An in-memory [`GeocodingProvider`].
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    entries: Vec<Address>,
}

impl Gazetteer {
    pub const fn new(entries: Vec<Address>) -> Self {
        Self { entries }
    }

    /// A small built-in dataset of major cities and landmarks.
    pub fn embedded() -> Self {
        let entries = SAMPLE_PLACES
            .iter()
            .map(|&(feature, locality, admin_area, country, lat, lon)| {
                let address = Address::new(lat, lon)
                    .with_locality(locality)
                    .with_admin_area(admin_area)
                    .with_country_name(country);
                match feature {
                    Some(name) => address.with_feature_name(name),
                    None => address.with_feature_name(locality),
                }
            })
            .collect();
        Self { entries }
    }

    /// Load entries from a JSON array of [`Address`] records.
    #[instrument(name = "Load gazetteer", level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let entries: Vec<Address> = serde_json::from_reader(BufReader::new(file))?;
        info!(entries = entries.len(), "Loaded gazetteer");
        Ok(Self { entries })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self {
            entries: serde_json::from_str(json)?,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, address: Address) {
        self.entries.push(address);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum TermMatch {
    Contains = 1,
    Prefix = 2,
    Exact = 3,
}

fn match_term(term: &str, field: &str) -> Option<TermMatch> {
    let field = field.to_lowercase();
    if field == term {
        Some(TermMatch::Exact)
    } else if field.starts_with(term) {
        Some(TermMatch::Prefix)
    } else if field.contains(term) {
        Some(TermMatch::Contains)
    } else {
        None
    }
}

/// Every term has to hit some component; the score is the sum of the best hit
/// per term.
fn score(address: &Address, terms: &[String]) -> Option<u32> {
    let fields = [
        address.feature_name(),
        address.locality(),
        address.admin_area(),
        address.country_name(),
    ];
    terms.iter().try_fold(0u32, |acc, term| {
        let best = fields
            .iter()
            .flatten()
            .filter_map(|field| match_term(term, field))
            .max()?;
        Some(acc + best as u32)
    })
}

impl GeocodingProvider for Gazetteer {
    fn lookup(&self, text: &str, max_results: usize) -> Result<Vec<Address>> {
        let terms = text
            .split(',')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>();
        if terms.is_empty() || max_results == 0 {
            return Ok(Vec::new());
        }

        let mut scored = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(idx, address)| score(address, &terms).map(|s| (s, idx)))
            .collect::<Vec<_>>();
        // Highest score first, insertion order among equals.
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        let results = scored
            .into_iter()
            .take(max_results)
            .map(|(_, idx)| self.entries[idx].clone())
            .collect::<Vec<_>>();
        debug!(query = text, hits = results.len(), "Gazetteer lookup");
        Ok(results)
    }
}
