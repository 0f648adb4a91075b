//! External providers consumed by the mapmark core.
//!
//! The core never talks to a platform directly. Geocoding, the device's last
//! known location and the location permission all come through the traits in
//! this crate, together with a few concrete implementations:
//!
//! - [`Gazetteer`]: offline geocoding over an in-memory address list, with a
//!   small embedded dataset and JSON loading
//! - [`NominatimGeocoder`] (feature `http`): blocking HTTP geocoding
//! - [`StaticLocation`] and [`StaticPermissions`]: fixed answers for headless
//!   hosts and tests
mod address;
mod coordinate;
mod error;
mod gazetteer;
mod geocoding;
mod location;
#[cfg(feature = "http")]
mod nominatim;
mod permission;

pub use address::Address;
pub use coordinate::Coordinate;
pub use error::{ProviderError, Result};
pub use gazetteer::Gazetteer;
pub use geocoding::GeocodingProvider;
pub use location::{LocationProvider, StaticLocation};
#[cfg(feature = "http")]
pub use nominatim::NominatimGeocoder;
pub use permission::{
    LOCATION_PERMISSION_REQUEST_CODE, PermissionProvider, PermissionResponse, StaticPermissions,
};
