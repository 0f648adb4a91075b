use std::sync::Arc;

use crate::{Address, error::Result};

/// A forward geocoder: free text in, ranked addresses out.
///
/// Calls are blocking. Callers that sit on an event loop are expected to move
/// them onto a blocking thread.
pub trait GeocodingProvider: Send + Sync {
    /// Look up at most `max_results` addresses for `text`, best match first.
    ///
    /// An empty vector means nothing matched; `Err` means the lookup itself
    /// failed.
    fn lookup(&self, text: &str, max_results: usize) -> Result<Vec<Address>>;
}

impl<G: GeocodingProvider + ?Sized> GeocodingProvider for Arc<G> {
    fn lookup(&self, text: &str, max_results: usize) -> Result<Vec<Address>> {
        (**self).lookup(text, max_results)
    }
}

impl<G: GeocodingProvider + ?Sized> GeocodingProvider for Box<G> {
    fn lookup(&self, text: &str, max_results: usize) -> Result<Vec<Address>> {
        (**self).lookup(text, max_results)
    }
}
