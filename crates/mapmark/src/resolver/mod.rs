//! Turning free-text place queries into candidates.
//!
//! The resolver has two modes. Suggestion mode runs on keystrokes and returns
//! up to a handful of candidates for a dropdown. Exact mode runs on submit and
//! returns only the best match. Neither mode surfaces provider failures: they
//! are logged and reported as "nothing found", and it is up to the caller to
//! leave its previous state alone.

mod candidate;

pub use candidate::{Candidate, format_label};
use itertools::Itertools;
use mapmark_providers::GeocodingProvider;
use tracing::{debug, instrument, warn};

use crate::config::LabelStyle;

/// Whether a query in progress is long enough to be worth a suggestion lookup.
pub fn should_suggest(query: &str, threshold: usize) -> bool {
    query.chars().count() > threshold
}

#[derive(Debug, Clone)]
pub struct Resolver<G> {
    provider: G,
    label_style: LabelStyle,
}

impl<G: GeocodingProvider> Resolver<G> {
    pub const fn new(provider: G, label_style: LabelStyle) -> Self {
        Self {
            provider,
            label_style,
        }
    }

    pub const fn label_style(&self) -> LabelStyle {
        self.label_style
    }

    /// Up to `limit` candidates for `query`, best first.
    ///
    /// Hits whose labels come out identical are collapsed to the best ranked
    /// one, since a dropdown cannot tell them apart. Empty when nothing matched
    /// or the provider failed.
    #[instrument(name = "Suggest", level = "debug", skip(self))]
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<Candidate> {
        if limit == 0 {
            return Vec::new();
        }
        match self.provider.lookup(query, limit) {
            Ok(addresses) => {
                let candidates = addresses
                    .iter()
                    .take(limit)
                    .map(|address| Candidate::from_address(address, self.label_style))
                    .unique_by(|candidate| candidate.label.clone())
                    .collect::<Vec<_>>();
                debug!(count = candidates.len(), "Suggestions fetched");
                candidates
            }
            Err(e) => {
                warn!(error = %e, "Failed to get suggestions");
                Vec::new()
            }
        }
    }

    /// The single best match for `query`, if any.
    #[instrument(name = "Resolve exact", level = "debug", skip(self))]
    pub fn resolve_exact(&self, query: &str) -> Option<Candidate> {
        match self.provider.lookup(query, 1) {
            Ok(addresses) => {
                let best = addresses
                    .first()
                    .map(|address| Candidate::from_address(address, self.label_style));
                if best.is_none() {
                    warn!("No location found for query");
                }
                best
            }
            Err(e) => {
                warn!(error = %e, "Geocoder failed");
                None
            }
        }
    }
}
