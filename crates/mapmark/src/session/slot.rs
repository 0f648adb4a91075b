use std::{fmt, mem};

use mapmark_providers::Coordinate;

use crate::resolver::Candidate;

/// A named resolution target on the screen.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotId {
    Single,
    From,
    To,
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::From => write!(f, "from"),
            Self::To => write!(f, "to"),
        }
    }
}

/// The coordinate currently bound to a slot, with the label it was chosen by.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub coordinate: Coordinate,
    pub label: String,
}

impl From<Candidate> for Resolved {
    fn from(candidate: Candidate) -> Self {
        Self {
            coordinate: candidate.coordinate,
            label: candidate.label,
        }
    }
}

/// Which kind of lookup a ticket was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Suggest,
    Resolve,
}

/// Stamp taken when a lookup starts; only the latest stamp per slot and kind
/// may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub slot: SlotId,
    pub kind: RequestKind,
    pub generation: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Slot {
    query: String,
    candidates: Vec<Candidate>,
    resolved: Option<Resolved>,
    suggest_generation: u64,
    resolve_generation: u64,
}

impl Slot {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub const fn resolved(&self) -> Option<&Resolved> {
        self.resolved.as_ref()
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        self.resolved.as_ref().map(|r| r.coordinate)
    }

    pub(super) fn set_query(&mut self, query: String) {
        self.query = query;
    }

    pub(super) fn set_candidates(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
    }

    pub(super) fn set_resolved(&mut self, resolved: Resolved) {
        self.resolved = Some(resolved);
    }

    pub(super) fn next_generation(&mut self, kind: RequestKind) -> u64 {
        let counter = match kind {
            RequestKind::Suggest => &mut self.suggest_generation,
            RequestKind::Resolve => &mut self.resolve_generation,
        };
        *counter += 1;
        *counter
    }

    pub(super) const fn is_current(&self, kind: RequestKind, generation: u64) -> bool {
        match kind {
            RequestKind::Suggest => self.suggest_generation == generation,
            RequestKind::Resolve => self.resolve_generation == generation,
        }
    }

    /// Invalidate every outstanding ticket for this slot.
    pub(super) fn supersede_all(&mut self) {
        self.suggest_generation += 1;
        self.resolve_generation += 1;
    }

    /// Exchange what the user sees (query, candidates, resolved point) but
    /// keep each slot's own generation counters.
    pub(super) fn swap_contents(&mut self, other: &mut Self) {
        mem::swap(&mut self.query, &mut other.query);
        mem::swap(&mut self.candidates, &mut other.candidates);
        mem::swap(&mut self.resolved, &mut other.resolved);
    }
}
