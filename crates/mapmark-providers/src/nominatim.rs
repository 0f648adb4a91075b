//! Forward geocoding against a Nominatim-compatible HTTP endpoint.

use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{Address, GeocodingProvider, ProviderError, error::Result};

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = concat!("mapmark/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: Option<HitAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct HitAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

/// Blocking client for the `/search` API.
///
/// The HTTP client is built on first lookup. Lookups run on a blocking
/// thread, and reqwest's blocking client cannot be created inside an async
/// runtime.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: OnceCell<reqwest::blocking::Client>,
    endpoint: String,
    timeout: Duration,
}

impl NominatimGeocoder {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, DEFAULT_TIMEOUT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: OnceCell::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_owned(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn client(&self) -> Result<&reqwest::blocking::Client> {
        let client = self.client.get_or_try_init(|| {
            debug!(timeout = ?self.timeout, "Building HTTP client");
            reqwest::blocking::Client::builder()
                .timeout(self.timeout)
                .user_agent(USER_AGENT)
                .build()
        })?;
        Ok(client)
    }
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodingProvider for NominatimGeocoder {
    #[instrument(name = "Nominatim search", level = "debug", skip(self))]
    fn lookup(&self, text: &str, max_results: usize) -> Result<Vec<Address>> {
        if max_results == 0 || text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let limit = max_results.to_string();
        let body = self
            .client()?
            .get(format!("{}/search", self.endpoint))
            .query(&[
                ("q", text),
                ("format", "jsonv2"),
                ("addressdetails", "1"),
                ("limit", limit.as_str()),
            ])
            .send()?
            .error_for_status()?
            .text()?;
        let mut results = parse_search_response(&body)?;
        results.truncate(max_results);
        debug!(hits = results.len(), "Nominatim responded");
        Ok(results)
    }
}

fn parse_degrees(raw: &str, axis: &str) -> Result<f64> {
    raw.parse::<f64>()
        .map_err(|e| ProviderError::MalformedResponse(format!("invalid {axis} {raw:?}: {e}")))
}

fn parse_search_response(body: &str) -> Result<Vec<Address>> {
    let hits: Vec<SearchHit> = serde_json::from_str(body)?;
    hits.into_iter()
        .map(|hit| {
            let address = hit.address.unwrap_or_default();
            Ok(Address {
                latitude: parse_degrees(&hit.lat, "latitude")?,
                longitude: parse_degrees(&hit.lon, "longitude")?,
                feature_name: hit.name.filter(|n| !n.is_empty()),
                locality: address.city.or(address.town).or(address.village),
                admin_area: address.state,
                country_name: address.country,
            })
        })
        .collect()
}
