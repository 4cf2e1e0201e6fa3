// src/sources/local.rs
use chrono::Utc;
use std::fs;
use std::path::PathBuf;

use crate::db::{reservations as db_res, Database};
use crate::domain::geojson::parse_spots;
use crate::domain::{NewReservation, Reservation, SlotLabel, SlotState, Spot};
use crate::projector::ReservationError;
use crate::sources::ReservationSource;

/// Static GeoJSON map file with reservations layered on from SQLite.
pub struct LocalSource {
    map_file: PathBuf,
    db: Database,
}

impl LocalSource {
    pub fn new(map_file: impl Into<PathBuf>, db: Database) -> Self {
        Self {
            map_file: map_file.into(),
            db,
        }
    }
}

impl ReservationSource for LocalSource {
    fn name(&self) -> &'static str {
        "local"
    }

    fn allows_anonymous(&self) -> bool {
        true
    }

    fn load_spots(&self) -> Result<Vec<Spot>, ReservationError> {
        let raw = fs::read_to_string(&self.map_file).map_err(|e| {
            ReservationError::Load(format!("{}: {e}", self.map_file.display()))
        })?;
        let mut spots = parse_spots(&raw)?;

        let overrides = self.db.with_conn(|conn| db_res::reserved_slots(conn))?;
        for spot in spots.iter_mut() {
            let Some(slots) = overrides.get(&spot.name) else {
                continue;
            };
            for (label, reserved) in slots {
                // Blocked comes from the map file and is never overridden.
                if *reserved && spot.occupancy.slot(*label) == Some(SlotState::Available) {
                    spot.occupancy.set_slot(*label, SlotState::Reserved);
                } else if spot.occupancy.slot(*label).is_none() {
                    tracing::debug!(spot = %spot.name, slot = %label, "stored slot not on map, ignored");
                }
            }
        }
        Ok(spots)
    }

    fn create_reservation(&self, req: &NewReservation<'_>) -> Result<Reservation, ReservationError> {
        let reservation = req.clone().into_reservation(Utc::now());
        let inserted = self
            .db
            .with_conn(|conn| db_res::insert_reservation(conn, &reservation))?;
        if !inserted {
            return Err(ReservationError::AlreadyReserved {
                spot: reservation.spot,
                slot: reservation.slot,
            });
        }
        Ok(reservation)
    }

    fn list_reservations(&self) -> Result<Vec<Reservation>, ReservationError> {
        self.db.with_conn(|conn| db_res::list_reservations(conn))
    }

    fn delete_reservation(&self, spot: &str, slot: SlotLabel) -> Result<(), ReservationError> {
        let deleted = self
            .db
            .with_conn(|conn| db_res::delete_reservation(conn, spot, slot))?;
        if deleted {
            Ok(())
        } else {
            Err(ReservationError::NotFound(format!("{spot} ({slot})")))
        }
    }
}
