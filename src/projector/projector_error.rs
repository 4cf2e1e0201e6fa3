use crate::domain::{ParseError, SlotLabel};

/// Failures of the reservation operations. Messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReservationError {
    #[error("No se pudo cargar el mapa: {0}")]
    Load(String),

    #[error("Debes iniciar sesión para reservar.")]
    AuthRequired,

    #[error("{spot} ({slot}) ya está reservado.")]
    AlreadyReserved { spot: String, slot: SlotLabel },

    #[error("{spot} ({slot}) está bloqueado.")]
    Blocked { spot: String, slot: SlotLabel },

    #[error("{0}")]
    Backend(String),

    #[error("No existe: {0}")]
    NotFound(String),

    #[error("Error de almacenamiento: {0}")]
    Store(String),
}

impl From<ParseError> for ReservationError {
    fn from(e: ParseError) -> Self {
        ReservationError::Load(e.to_string())
    }
}

impl From<rusqlite::Error> for ReservationError {
    fn from(e: rusqlite::Error) -> Self {
        ReservationError::Store(e.to_string())
    }
}
