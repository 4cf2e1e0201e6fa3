// src/sources/remote.rs
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

use crate::domain::geojson::{spots_from_collection, FeatureCollection};
use crate::domain::{NewReservation, Reservation, SlotLabel, Spot};
use crate::projector::ReservationError;
use crate::sources::ReservationSource;

/// Error payload the backend attaches to failed requests.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginReply {
    token: Option<String>,
    error: Option<String>,
}

/// Thin JSON client for the club backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
}

impl BackendClient {
    /// `timeout` of `None` means requests never expire.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ReservationError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ReservationError::Backend(format!("URL del servidor inválida: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ReservationError::Backend(format!(
                "URL del servidor inválida: {base_url}"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReservationError::Backend(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended, each one percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn fetch_map(&self) -> Result<Vec<Spot>, ReservationError> {
        let url = self.endpoint(&["api", "mapa"]);
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| ReservationError::Load(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ReservationError::Load(format!("HTTP {}", resp.status())));
        }

        let collection: FeatureCollection = resp
            .json()
            .map_err(|e| ReservationError::Load(format!("invalid map data: {e}")))?;
        Ok(spots_from_collection(collection)?)
    }

    pub fn create_reservation(&self, req: &NewReservation<'_>) -> Result<Reservation, ReservationError> {
        let resp = self
            .client
            .post(self.endpoint(&["api", "reservas"]))
            .json(req)
            .send()
            .map_err(unreachable_backend)?;

        match resp.status() {
            s if s.is_success() => {
                let text = body_text(resp);
                // Older deployments answer with a bare acknowledgement.
                match serde_json::from_str(&text) {
                    Ok(reservation) => Ok(reservation),
                    Err(e) => {
                        tracing::debug!(
                            spot = req.spot,
                            slot = %req.slot,
                            error = %e,
                            "reservation acknowledged without a body, using the request"
                        );
                        Ok(req.clone().into_reservation(chrono::Utc::now()))
                    }
                }
            }
            StatusCode::CONFLICT => Err(ReservationError::AlreadyReserved {
                spot: req.spot.to_string(),
                slot: req.slot,
            }),
            _ => Err(failure(resp, "Error al reservar")),
        }
    }

    pub fn list_reservations(&self) -> Result<Vec<Reservation>, ReservationError> {
        let resp = self
            .client
            .get(self.endpoint(&["api", "reservas"]))
            .send()
            .map_err(unreachable_backend)?;

        if !resp.status().is_success() {
            return Err(failure(resp, "No se pudieron cargar las reservas"));
        }

        // The backend answers `null` when nothing is reserved.
        let list: Option<Vec<Reservation>> = resp
            .json()
            .map_err(|e| ReservationError::Backend(format!("respuesta inválida: {e}")))?;
        Ok(list.unwrap_or_default())
    }

    pub fn delete_reservation(&self, spot: &str, slot: SlotLabel) -> Result<(), ReservationError> {
        let resp = self
            .client
            .delete(self.endpoint(&["api", "reservas", spot, slot.as_str()]))
            .send()
            .map_err(unreachable_backend)?;

        match resp.status() {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(ReservationError::NotFound(format!("{spot} ({slot})"))),
            _ => Err(failure(resp, "Error al cancelar reserva")),
        }
    }

    pub fn register(&self, email: &str, password: &str) -> Result<(), ReservationError> {
        let resp = self
            .client
            .post(self.endpoint(&["api", "register"]))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .map_err(unreachable_backend)?;

        let status = resp.status();
        let text = body_text(resp);
        if let Some(msg) = error_field(&text) {
            return Err(ReservationError::Backend(msg));
        }
        if !status.is_success() {
            return Err(ReservationError::Backend(format!("Error al registrarse ({status})")));
        }
        Ok(())
    }

    /// Returns the bearer token issued by the backend.
    pub fn login(&self, email: &str, password: &str) -> Result<String, ReservationError> {
        let resp = self
            .client
            .post(self.endpoint(&["api", "login"]))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .map_err(unreachable_backend)?;

        let status = resp.status();
        let text = body_text(resp);
        let reply: LoginReply = serde_json::from_str(&text).map_err(|_| {
            ReservationError::Backend(format!("Error al iniciar sesión ({status})"))
        })?;

        match (reply.error, reply.token) {
            (Some(msg), _) if !msg.is_empty() => Err(ReservationError::Backend(msg)),
            (_, Some(token)) if status.is_success() && !token.is_empty() => Ok(token),
            _ => Err(ReservationError::Backend(format!(
                "Error al iniciar sesión ({status})"
            ))),
        }
    }
}

fn unreachable_backend(e: reqwest::Error) -> ReservationError {
    ReservationError::Backend(format!("No se pudo contactar al servidor: {e}"))
}

/// Response body as text. An unreadable body is logged and treated as empty,
/// so callers fall back to their status-based message.
fn body_text(resp: Response) -> String {
    let status = resp.status();
    resp.text().unwrap_or_else(|e| {
        tracing::debug!(%status, error = %e, "unreadable backend response body");
        String::new()
    })
}

fn error_field(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
}

/// Server-provided message when present, `generic` otherwise.
fn failure(resp: Response, generic: &str) -> ReservationError {
    let status = resp.status();
    let body = body_text(resp);
    match error_field(&body) {
        Some(msg) => ReservationError::Backend(msg),
        None => ReservationError::Backend(format!("{generic} ({status})")),
    }
}

/// Reservation state held by the remote backend. Requires a signed-in user.
pub struct RemoteSource {
    client: BackendClient,
}

impl RemoteSource {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

impl ReservationSource for RemoteSource {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn allows_anonymous(&self) -> bool {
        false
    }

    fn load_spots(&self) -> Result<Vec<Spot>, ReservationError> {
        self.client.fetch_map()
    }

    fn create_reservation(&self, req: &NewReservation<'_>) -> Result<Reservation, ReservationError> {
        self.client.create_reservation(req)
    }

    fn list_reservations(&self) -> Result<Vec<Reservation>, ReservationError> {
        self.client.list_reservations()
    }

    fn delete_reservation(&self, spot: &str, slot: SlotLabel) -> Result<(), ReservationError> {
        self.client.delete_reservation(spot, slot)
    }
}
