// In-memory source for projector and router tests.
use chrono::Utc;
use std::sync::{Arc, Mutex};

use crate::domain::{NewReservation, Reservation, SlotLabel, Spot};
use crate::projector::ReservationError;
use crate::sources::ReservationSource;

#[derive(Debug, Default)]
pub struct MemoryState {
    pub spots: Vec<Spot>,
    pub reservations: Vec<Reservation>,
    /// Number of create/delete calls that reached the source.
    pub writes: usize,
    pub fail_load: bool,
    /// Deletes for these spots fail with a backend error.
    pub fail_delete_for: Vec<String>,
}

#[derive(Clone)]
pub struct MemorySource {
    pub state: Arc<Mutex<MemoryState>>,
    anonymous: bool,
}

impl MemorySource {
    pub fn new(spots: Vec<Spot>, anonymous: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                spots,
                ..MemoryState::default()
            })),
            anonymous,
        }
    }

    pub fn writes(&self) -> usize {
        self.state.lock().unwrap().writes
    }
}

impl ReservationSource for MemorySource {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn allows_anonymous(&self) -> bool {
        self.anonymous
    }

    fn load_spots(&self) -> Result<Vec<Spot>, ReservationError> {
        let state = self.state.lock().unwrap();
        if state.fail_load {
            return Err(ReservationError::Load("connection refused".into()));
        }
        let mut spots = state.spots.clone();
        for r in &state.reservations {
            if let Some(spot) = spots.iter_mut().find(|s| s.name == r.spot) {
                spot.occupancy.set_slot(r.slot, crate::domain::SlotState::Reserved);
            }
        }
        Ok(spots)
    }

    fn create_reservation(&self, req: &NewReservation<'_>) -> Result<Reservation, ReservationError> {
        let mut state = self.state.lock().unwrap();
        state.writes += 1;
        if state
            .reservations
            .iter()
            .any(|r| r.spot == req.spot && r.slot == req.slot)
        {
            return Err(ReservationError::AlreadyReserved {
                spot: req.spot.to_string(),
                slot: req.slot,
            });
        }
        let r = req.clone().into_reservation(Utc::now());
        state.reservations.push(r.clone());
        Ok(r)
    }

    fn list_reservations(&self) -> Result<Vec<Reservation>, ReservationError> {
        Ok(self.state.lock().unwrap().reservations.clone())
    }

    fn delete_reservation(&self, spot: &str, slot: SlotLabel) -> Result<(), ReservationError> {
        let mut state = self.state.lock().unwrap();
        state.writes += 1;
        if state.fail_delete_for.iter().any(|s| s == spot) {
            return Err(ReservationError::Backend("Error al cancelar reserva (500)".into()));
        }
        let before = state.reservations.len();
        state.reservations.retain(|r| !(r.spot == spot && r.slot == slot));
        if state.reservations.len() == before {
            return Err(ReservationError::NotFound(format!("{spot} ({slot})")));
        }
        Ok(())
    }
}
