use serde::{Deserialize, Serialize};

use crate::Coordinate;

/// A geocoder hit: where it is plus whatever address components the
/// provider knew about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub latitude: f64,
    pub longitude: f64,
    /// Name of the feature itself (a landmark, a building, a city)
    #[serde(default)]
    pub feature_name: Option<String>,
    /// City, town or village
    #[serde(default)]
    pub locality: Option<String>,
    /// State, province or region
    #[serde(default)]
    pub admin_area: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
}

impl Address {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            feature_name: None,
            locality: None,
            admin_area: None,
            country_name: None,
        }
    }

    pub fn with_feature_name(mut self, name: impl Into<String>) -> Self {
        self.feature_name = Some(name.into());
        self
    }

    pub fn with_locality(mut self, locality: impl Into<String>) -> Self {
        self.locality = Some(locality.into());
        self
    }

    pub fn with_admin_area(mut self, admin_area: impl Into<String>) -> Self {
        self.admin_area = Some(admin_area.into());
        self
    }

    pub fn with_country_name(mut self, country: impl Into<String>) -> Self {
        self.country_name = Some(country.into());
        self
    }

    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    pub fn feature_name(&self) -> Option<&str> {
        self.feature_name.as_deref()
    }

    pub fn locality(&self) -> Option<&str> {
        self.locality.as_deref()
    }

    pub fn admin_area(&self) -> Option<&str> {
        self.admin_area.as_deref()
    }

    pub fn country_name(&self) -> Option<&str> {
        self.country_name.as_deref()
    }
}
