//! Authoritative reservation state: a remote backend or the local map file + store.

mod local;
#[cfg(test)]
pub mod memory;
mod remote;

pub use local::LocalSource;
pub use remote::{BackendClient, RemoteSource};

use crate::domain::{NewReservation, Reservation, SlotLabel, Spot};
use crate::projector::ReservationError;

/// User recorded on reservations made without a session, where allowed.
pub const ANONYMOUS_USER: &str = "anonimo";

pub trait ReservationSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Whether reservations may be made without an authenticated user.
    fn allows_anonymous(&self) -> bool;

    fn load_spots(&self) -> Result<Vec<Spot>, ReservationError>;

    fn create_reservation(&self, req: &NewReservation<'_>) -> Result<Reservation, ReservationError>;

    fn list_reservations(&self) -> Result<Vec<Reservation>, ReservationError>;

    /// Fails with `NotFound` when no such reservation exists.
    fn delete_reservation(&self, spot: &str, slot: SlotLabel) -> Result<(), ReservationError>;
}
