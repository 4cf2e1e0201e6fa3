pub mod filter;
pub mod geojson;
pub mod reservation;
pub mod slot;
pub mod spot;
pub mod style;

pub use filter::{apply_filter, StateFilter, TypeFilter};
pub use reservation::{NewReservation, Reservation};
pub use slot::{SlotLabel, SlotState};
pub use spot::{Occupancy, Spot};
pub use style::style_for;

/// Failures turning raw input (map data, form values) into domain values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown slot state: {0}")]
    UnknownState(String),
    #[error("unknown slot: {0}")]
    UnknownSlot(String),
    #[error("duplicate spot in map data: {0}")]
    DuplicateSpot(String),
    #[error("invalid map data: {0}")]
    Json(String),
}
