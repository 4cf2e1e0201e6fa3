// src/domain/reservation.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::slot::SlotLabel;

/// A user's hold on one slot of a spot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(rename = "nombre")]
    pub spot: String,
    #[serde(rename = "horario")]
    pub slot: SlotLabel,
    #[serde(rename = "usuario")]
    pub user: String,
    #[serde(rename = "fecha", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Body of a reserve request.
#[derive(Debug, Clone, Serialize)]
pub struct NewReservation<'a> {
    #[serde(rename = "nombre")]
    pub spot: &'a str,
    #[serde(rename = "horario")]
    pub slot: SlotLabel,
    #[serde(rename = "usuario")]
    pub user: &'a str,
}

impl NewReservation<'_> {
    pub fn into_reservation(self, created_at: DateTime<Utc>) -> Reservation {
        Reservation {
            spot: self.spot.to_string(),
            slot: self.slot,
            user: self.user.to_string(),
            created_at,
        }
    }
}
