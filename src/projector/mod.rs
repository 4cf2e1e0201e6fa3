//! Keeps per-slot spot state in step with the reservation source and derives
//! the filtered list and map styling from it.

mod projector_error;

pub use projector_error::ReservationError;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::{
    apply_filter, NewReservation, Reservation, SlotLabel, SlotState, Spot, StateFilter, TypeFilter,
};
use crate::sources::{ReservationSource, ANONYMOUS_USER};

#[derive(Debug, Clone, PartialEq)]
pub struct CancelFailure {
    pub reservation: Reservation,
    pub reason: String,
}

/// Outcome of a clear-all. Not atomic: each reservation succeeds or fails on its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CancelAllReport {
    pub cancelled: Vec<Reservation>,
    pub failed: Vec<CancelFailure>,
}

impl CancelAllReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Source calls run without holding the spot lock; the lock only guards
/// reading or swapping the cached map. A slow source stalls the request
/// that called it and nothing else.
pub struct ReservationStateProjector {
    source: Box<dyn ReservationSource>,
    spots: Mutex<BTreeMap<String, Spot>>,
}

impl ReservationStateProjector {
    pub fn new(source: Box<dyn ReservationSource>) -> Self {
        Self {
            source,
            spots: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    pub fn allows_anonymous(&self) -> bool {
        self.source.allows_anonymous()
    }

    // Every write replaces a whole map or a single slot, so a poisoned
    // guard still holds a consistent map.
    fn state(&self) -> MutexGuard<'_, BTreeMap<String, Spot>> {
        self.spots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the spot set with a fresh load. On failure the current set is kept.
    pub fn load_spots(&self) -> Result<usize, ReservationError> {
        let loaded = self.source.load_spots().map_err(|e| {
            tracing::warn!(source = self.source.name(), error = %e, "loading spots failed");
            e
        })?;

        let mut spots = BTreeMap::new();
        for spot in loaded {
            let name = spot.name.clone();
            if spots.insert(name.clone(), spot).is_some() {
                return Err(ReservationError::Load(format!("duplicate spot in map data: {name}")));
            }
        }

        let count = spots.len();
        tracing::debug!(source = self.source.name(), count, "spots loaded");
        *self.state() = spots;
        Ok(count)
    }

    #[cfg(test)]
    pub fn spot(&self, name: &str) -> Option<Spot> {
        self.state().get(name).cloned()
    }

    /// Distinct spot types, for the type filter.
    pub fn kinds(&self) -> Vec<String> {
        self.state()
            .values()
            .map(|s| s.kind.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn filtered(&self, type_filter: &TypeFilter, state_filter: StateFilter) -> Vec<Spot> {
        apply_filter(self.state().values(), type_filter, state_filter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// The user a reservation is recorded under.
    pub fn resolve_user(&self, user: Option<&str>) -> Result<String, ReservationError> {
        match user.map(str::trim).filter(|u| !u.is_empty()) {
            Some(u) => Ok(u.to_string()),
            None if self.source.allows_anonymous() => Ok(ANONYMOUS_USER.to_string()),
            None => Err(ReservationError::AuthRequired),
        }
    }

    fn slot_state(&self, spot_name: &str, slot: SlotLabel) -> Result<SlotState, ReservationError> {
        let spots = self.state();
        let spot = spots
            .get(spot_name)
            .ok_or_else(|| ReservationError::NotFound(spot_name.to_string()))?;
        spot.occupancy
            .slot(slot)
            .ok_or_else(|| ReservationError::NotFound(format!("{spot_name} ({slot})")))
    }

    /// Overwrite a cached slot. Spots or slots missing from the cache are left alone.
    fn set_local(&self, spot_name: &str, slot: SlotLabel, from: SlotState, to: SlotState) {
        if let Some(spot) = self.state().get_mut(spot_name) {
            if spot.occupancy.slot(slot) == Some(from) {
                spot.occupancy.set_slot(slot, to);
            }
        }
    }

    /// Reserve one slot. Nothing reaches the source unless every check passes;
    /// the source still has the final word on conflicts.
    pub fn reserve(
        &self,
        spot_name: &str,
        slot: SlotLabel,
        user: Option<&str>,
    ) -> Result<Reservation, ReservationError> {
        let user = self.resolve_user(user)?;

        match self.slot_state(spot_name, slot)? {
            SlotState::Available => {}
            SlotState::Reserved => {
                return Err(ReservationError::AlreadyReserved {
                    spot: spot_name.to_string(),
                    slot,
                })
            }
            SlotState::Blocked => {
                return Err(ReservationError::Blocked {
                    spot: spot_name.to_string(),
                    slot,
                })
            }
        }

        let req = NewReservation {
            spot: spot_name,
            slot,
            user: &user,
        };
        let reservation = self.source.create_reservation(&req).map_err(|e| {
            tracing::warn!(spot = spot_name, %slot, error = %e, "reserve rejected");
            e
        })?;

        self.set_local(spot_name, slot, SlotState::Available, SlotState::Reserved);
        tracing::info!(spot = spot_name, %slot, user = %user, "reserved");
        Ok(reservation)
    }

    /// Cancel one slot's reservation. The source decides whether it exists;
    /// the cached slot goes back to available only after the source agrees.
    pub fn cancel(&self, spot_name: &str, slot: SlotLabel) -> Result<(), ReservationError> {
        self.source.delete_reservation(spot_name, slot).map_err(|e| {
            tracing::warn!(spot = spot_name, %slot, error = %e, "cancel failed");
            e
        })?;

        self.set_local(spot_name, slot, SlotState::Reserved, SlotState::Available);
        tracing::info!(spot = spot_name, %slot, "cancelled");
        Ok(())
    }

    /// Reservations held by the source.
    pub fn list_reservations(&self) -> Result<Vec<Reservation>, ReservationError> {
        self.source.list_reservations()
    }

    /// Cancel every reservation the source holds for `user`, one request each.
    pub fn cancel_all(&self, user: Option<&str>) -> Result<CancelAllReport, ReservationError> {
        let user = self.resolve_user(user)?;
        let mine: Vec<Reservation> = self
            .list_reservations()?
            .into_iter()
            .filter(|r| r.user == user)
            .collect();

        let mut report = CancelAllReport::default();
        for r in mine {
            match self.cancel(&r.spot, r.slot) {
                Ok(()) => report.cancelled.push(r),
                Err(e) => report.failed.push(CancelFailure {
                    reservation: r,
                    reason: e.to_string(),
                }),
            }
        }

        if !report.is_complete() {
            tracing::warn!(
                user = %user,
                cancelled = report.cancelled.len(),
                failed = report.failed.len(),
                "clear-all finished with failures"
            );
        }
        Ok(report)
    }
}
