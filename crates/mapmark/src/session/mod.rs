//! Resolution slots and the device location: the state a redraw is derived from.
//!
//! A [`Session`] is mutated only through the operations below. Lookups that
//! run elsewhere take a [`RequestTicket`] first and hand it back with their
//! result; a result whose ticket has since been superseded is dropped, so a
//! slow response to an old keystroke can never replace a newer one.

pub use error::SessionError;
mod slot;

use error::Result;
use mapmark_providers::Coordinate;
pub use slot::{RequestKind, RequestTicket, Resolved, Slot, SlotId};
use tracing::{debug, instrument};

use crate::{config::SearchLayout, resolver::Candidate};

mod error {
    use thiserror::Error;

    use super::SlotId;
    use crate::config::SearchLayout;

    #[derive(Error, Debug)]
    pub enum SessionError {
        #[error("Slot '{slot}' is not part of the {layout:?} layout")]
        SlotUnavailable { slot: SlotId, layout: SearchLayout },
        #[error("Swapping needs the from/to layout, session uses {0:?}")]
        SwapUnsupported(SearchLayout),
    }
    pub type Result<T> = std::result::Result<T, SessionError>;
}

#[derive(Debug, Clone)]
pub struct Session {
    layout: SearchLayout,
    single: Slot,
    from: Slot,
    to: Slot,
    device_location: Option<Coordinate>,
    my_location_enabled: bool,
}

impl Session {
    pub fn new(layout: SearchLayout) -> Self {
        Self {
            layout,
            single: Slot::default(),
            from: Slot::default(),
            to: Slot::default(),
            device_location: None,
            my_location_enabled: false,
        }
    }

    pub const fn layout(&self) -> SearchLayout {
        self.layout
    }

    /// Slots shown by this session's layout, in drawing order.
    pub const fn slot_ids(&self) -> &'static [SlotId] {
        match self.layout {
            SearchLayout::Single => &[SlotId::Single],
            SearchLayout::FromTo => &[SlotId::From, SlotId::To],
        }
    }

    pub fn has_slot(&self, slot: SlotId) -> bool {
        self.slot_ids().contains(&slot)
    }

    pub fn slot(&self, slot: SlotId) -> Result<&Slot> {
        if !self.has_slot(slot) {
            return Err(SessionError::SlotUnavailable {
                slot,
                layout: self.layout,
            });
        }
        Ok(match slot {
            SlotId::Single => &self.single,
            SlotId::From => &self.from,
            SlotId::To => &self.to,
        })
    }

    fn slot_mut(&mut self, slot: SlotId) -> Result<&mut Slot> {
        if !self.has_slot(slot) {
            return Err(SessionError::SlotUnavailable {
                slot,
                layout: self.layout,
            });
        }
        Ok(match slot {
            SlotId::Single => &mut self.single,
            SlotId::From => &mut self.from,
            SlotId::To => &mut self.to,
        })
    }

    /// Resolved coordinate of `slot`, `None` if unresolved or not in the layout.
    pub fn coordinate(&self, slot: SlotId) -> Option<Coordinate> {
        self.slot(slot).ok().and_then(Slot::coordinate)
    }

    pub const fn device_location(&self) -> Option<Coordinate> {
        self.device_location
    }

    pub fn set_device_location(&mut self, location: Option<Coordinate>) {
        self.device_location = location;
    }

    pub const fn my_location_enabled(&self) -> bool {
        self.my_location_enabled
    }

    pub fn set_my_location_enabled(&mut self, enabled: bool) {
        self.my_location_enabled = enabled;
    }

    /// Record what the user has typed. Resolved state is left alone.
    pub fn set_query(&mut self, slot: SlotId, query: impl Into<String>) -> Result<()> {
        self.slot_mut(slot)?.set_query(query.into());
        Ok(())
    }

    /// Start a lookup for `slot`, superseding any earlier one of the same kind.
    pub fn begin_request(&mut self, slot: SlotId, kind: RequestKind) -> Result<RequestTicket> {
        let generation = self.slot_mut(slot)?.next_generation(kind);
        Ok(RequestTicket {
            slot,
            kind,
            generation,
        })
    }

    /// Whether `ticket` is still the latest of its kind for its slot.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.slot(ticket.slot)
            .is_ok_and(|s| s.is_current(ticket.kind, ticket.generation))
    }

    /// Replace the slot's candidate list with a suggestion result.
    ///
    /// Returns `false`, changing nothing, when the ticket is stale or the
    /// result is empty.
    #[instrument(level = "debug", skip(self, candidates), fields(count = candidates.len()))]
    pub fn apply_suggestions(
        &mut self,
        ticket: RequestTicket,
        candidates: Vec<Candidate>,
    ) -> Result<bool> {
        debug_assert_eq!(ticket.kind, RequestKind::Suggest);
        if !self.is_current(ticket) {
            debug!("Discarding superseded suggestions");
            return Ok(false);
        }
        if candidates.is_empty() {
            return Ok(false);
        }
        self.slot_mut(ticket.slot)?.set_candidates(candidates);
        Ok(true)
    }

    /// Bind the top hit of an exact search to the slot.
    ///
    /// Returns `false`, changing nothing, when the ticket is stale or there was
    /// no hit.
    #[instrument(level = "debug", skip(self, candidate))]
    pub fn apply_exact(&mut self, ticket: RequestTicket, candidate: Option<Candidate>) -> Result<bool> {
        debug_assert_eq!(ticket.kind, RequestKind::Resolve);
        if !self.is_current(ticket) {
            debug!("Discarding superseded exact result");
            return Ok(false);
        }
        let Some(candidate) = candidate else {
            return Ok(false);
        };
        self.slot_mut(ticket.slot)?.set_resolved(candidate.into());
        Ok(true)
    }

    /// Pick the `index`-th candidate of the slot's latest suggestion list.
    ///
    /// The slot's query becomes the candidate's label. An out-of-range index
    /// is a no-op and returns `None`.
    pub fn select_suggestion(&mut self, slot: SlotId, index: usize) -> Result<Option<Candidate>> {
        let target = self.slot_mut(slot)?;
        let Some(candidate) = target.candidates().get(index).cloned() else {
            debug!(%slot, index, "Suggestion index out of range");
            return Ok(None);
        };
        target.set_query(candidate.label.clone());
        target.set_resolved(candidate.clone().into());
        // A pending exact search must not overwrite an explicit pick.
        target.next_generation(RequestKind::Resolve);
        Ok(Some(candidate))
    }

    /// Bind a coordinate to `slot` directly.
    pub fn set_resolved(
        &mut self,
        slot: SlotId,
        coordinate: Coordinate,
        label: impl Into<String>,
    ) -> Result<()> {
        let target = self.slot_mut(slot)?;
        target.set_resolved(Resolved {
            coordinate,
            label: label.into(),
        });
        target.next_generation(RequestKind::Resolve);
        Ok(())
    }

    /// Exchange the from and to slots' query, candidates and resolved point.
    ///
    /// Every lookup still in flight for either slot is superseded, since it
    /// was issued for the text that has just moved to the other box.
    pub fn swap(&mut self) -> Result<()> {
        if self.layout != SearchLayout::FromTo {
            return Err(SessionError::SwapUnsupported(self.layout));
        }
        self.from.swap_contents(&mut self.to);
        self.from.supersede_all();
        self.to.supersede_all();
        Ok(())
    }

    /// The point the camera should center on after a redraw.
    pub fn camera_target(&self) -> Option<Coordinate> {
        self.coordinate(SlotId::From)
            .or_else(|| self.coordinate(SlotId::To))
            .or_else(|| self.coordinate(SlotId::Single))
            .or(self.device_location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(label: &str, lat: f64, lon: f64) -> Candidate {
        Candidate::new(label, Coordinate::new(lat, lon))
    }

    #[test]
    fn test_layout_slots() {
        let session = Session::new(SearchLayout::Single);
        assert!(session.slot(SlotId::Single).is_ok());
        assert!(matches!(
            session.slot(SlotId::From),
            Err(SessionError::SlotUnavailable { .. })
        ));

        let session = Session::new(SearchLayout::FromTo);
        assert!(session.slot(SlotId::From).is_ok());
        assert!(session.slot(SlotId::To).is_ok());
        assert!(session.slot(SlotId::Single).is_err());
    }

    #[test]
    fn test_stale_suggestions_discarded() {
        let mut session = Session::new(SearchLayout::FromTo);
        let first = session.begin_request(SlotId::From, RequestKind::Suggest).unwrap();
        let second = session.begin_request(SlotId::From, RequestKind::Suggest).unwrap();

        assert!(
            session
                .apply_suggestions(second, vec![candidate("London", 51.5, -0.1)])
                .unwrap()
        );
        assert!(
            !session
                .apply_suggestions(first, vec![candidate("Paris", 48.8, 2.3)])
                .unwrap()
        );
        let slot = session.slot(SlotId::From).unwrap();
        assert_eq!(slot.candidates().len(), 1);
        assert_eq!(slot.candidates()[0].label, "London");
    }

    #[test]
    fn test_tickets_are_per_slot() {
        let mut session = Session::new(SearchLayout::FromTo);
        let from = session.begin_request(SlotId::From, RequestKind::Suggest).unwrap();
        let _to = session.begin_request(SlotId::To, RequestKind::Suggest).unwrap();
        assert!(session.is_current(from));
    }

    #[test]
    fn test_empty_suggestions_keep_previous() {
        let mut session = Session::new(SearchLayout::Single);
        let ticket = session.begin_request(SlotId::Single, RequestKind::Suggest).unwrap();
        session
            .apply_suggestions(ticket, vec![candidate("Paris", 48.8, 2.3)])
            .unwrap();

        let ticket = session.begin_request(SlotId::Single, RequestKind::Suggest).unwrap();
        assert!(!session.apply_suggestions(ticket, Vec::new()).unwrap());
        assert_eq!(session.slot(SlotId::Single).unwrap().candidates().len(), 1);
    }

    #[test]
    fn test_exact_none_keeps_resolved() {
        let mut session = Session::new(SearchLayout::FromTo);
        session
            .set_resolved(SlotId::From, Coordinate::new(10.0, 20.0), "A")
            .unwrap();
        let ticket = session.begin_request(SlotId::From, RequestKind::Resolve).unwrap();
        assert!(!session.apply_exact(ticket, None).unwrap());
        assert_eq!(
            session.coordinate(SlotId::From),
            Some(Coordinate::new(10.0, 20.0))
        );
    }

    #[test]
    fn test_pick_beats_late_exact() {
        let mut session = Session::new(SearchLayout::FromTo);
        let exact = session.begin_request(SlotId::To, RequestKind::Resolve).unwrap();
        let suggest = session.begin_request(SlotId::To, RequestKind::Suggest).unwrap();
        session
            .apply_suggestions(suggest, vec![candidate("Tokyo", 35.6, 139.6)])
            .unwrap();
        session.select_suggestion(SlotId::To, 0).unwrap();

        assert!(
            !session
                .apply_exact(exact, Some(candidate("Osaka", 34.7, 135.5)))
                .unwrap()
        );
        assert_eq!(session.slot(SlotId::To).unwrap().resolved().unwrap().label, "Tokyo");
    }

    #[test]
    fn test_select_suggestion() {
        let mut session = Session::new(SearchLayout::FromTo);
        let ticket = session.begin_request(SlotId::From, RequestKind::Suggest).unwrap();
        session
            .apply_suggestions(
                ticket,
                vec![candidate("Paris, France", 48.8, 2.3), candidate("Paris, Texas", 33.6, -95.5)],
            )
            .unwrap();

        let picked = session.select_suggestion(SlotId::From, 1).unwrap().unwrap();
        assert_eq!(picked.label, "Paris, Texas");
        let slot = session.slot(SlotId::From).unwrap();
        assert_eq!(slot.query(), "Paris, Texas");
        assert_eq!(slot.coordinate(), Some(Coordinate::new(33.6, -95.5)));
    }

    #[test]
    fn test_select_out_of_range_is_noop() {
        let mut session = Session::new(SearchLayout::FromTo);
        session.set_query(SlotId::From, "Par").unwrap();
        let ticket = session.begin_request(SlotId::From, RequestKind::Suggest).unwrap();
        session
            .apply_suggestions(ticket, vec![candidate("Paris", 48.8, 2.3)])
            .unwrap();

        assert!(session.select_suggestion(SlotId::From, 1).unwrap().is_none());
        assert!(session.select_suggestion(SlotId::From, 99).unwrap().is_none());
        let slot = session.slot(SlotId::From).unwrap();
        assert_eq!(slot.query(), "Par");
        assert!(slot.resolved().is_none());
    }

    #[test]
    fn test_swap_exchanges_contents() {
        let mut session = Session::new(SearchLayout::FromTo);
        session.set_query(SlotId::From, "A").unwrap();
        session.set_query(SlotId::To, "B").unwrap();
        session
            .set_resolved(SlotId::From, Coordinate::new(10.0, 20.0), "A")
            .unwrap();
        session
            .set_resolved(SlotId::To, Coordinate::new(30.0, 40.0), "B")
            .unwrap();

        session.swap().unwrap();

        let from = session.slot(SlotId::From).unwrap();
        let to = session.slot(SlotId::To).unwrap();
        assert_eq!(from.query(), "B");
        assert_eq!(from.resolved().unwrap().label, "B");
        assert_eq!(from.coordinate(), Some(Coordinate::new(30.0, 40.0)));
        assert_eq!(to.query(), "A");
        assert_eq!(to.resolved().unwrap().label, "A");
        assert_eq!(to.coordinate(), Some(Coordinate::new(10.0, 20.0)));
    }

    #[test]
    fn test_swap_supersedes_in_flight() {
        let mut session = Session::new(SearchLayout::FromTo);
        let from_suggest = session.begin_request(SlotId::From, RequestKind::Suggest).unwrap();
        let to_exact = session.begin_request(SlotId::To, RequestKind::Resolve).unwrap();
        // Bring To's counter level with From's to catch counters travelling with the swap.
        let _ = session.begin_request(SlotId::To, RequestKind::Suggest).unwrap();

        session.swap().unwrap();

        assert!(!session.is_current(from_suggest));
        assert!(!session.is_current(to_exact));
    }

    #[test]
    fn test_swap_unsupported_in_single_layout() {
        let mut session = Session::new(SearchLayout::Single);
        assert!(matches!(
            session.swap(),
            Err(SessionError::SwapUnsupported(SearchLayout::Single))
        ));
    }

    #[test]
    fn test_camera_target_priority() {
        let mut session = Session::new(SearchLayout::FromTo);
        assert_eq!(session.camera_target(), None);

        let device = Coordinate::new(1.0, 1.0);
        session.set_device_location(Some(device));
        assert_eq!(session.camera_target(), Some(device));

        let to = Coordinate::new(48.8566, 2.3522);
        session.set_resolved(SlotId::To, to, "Paris").unwrap();
        assert_eq!(session.camera_target(), Some(to));

        let from = Coordinate::new(40.7128, -74.0060);
        session.set_resolved(SlotId::From, from, "New York").unwrap();
        assert_eq!(session.camera_target(), Some(from));
    }

    #[test]
    fn test_single_slot_camera_target() {
        let mut session = Session::new(SearchLayout::Single);
        session.set_device_location(Some(Coordinate::new(1.0, 1.0)));
        let tokyo = Coordinate::new(35.6762, 139.6503);
        session.set_resolved(SlotId::Single, tokyo, "Tokyo").unwrap();
        assert_eq!(session.camera_target(), Some(tokyo));
    }
}
