// src/app.rs
use crate::config::BackendConfig;
use crate::db::{init_db, Database};
use crate::projector::{ReservationError, ReservationStateProjector};
use crate::sources::{BackendClient, LocalSource, RemoteSource, ReservationSource};

/// The single controller behind every request. Shared across astra workers;
/// the projector locks its own spot cache only around reads and swaps.
pub struct App {
    projector: ReservationStateProjector,
    /// Present in remote mode, where login and registration go to the backend.
    auth: Option<BackendClient>,
    anonymous: bool,
}

impl App {
    pub fn new(source: Box<dyn ReservationSource>, auth: Option<BackendClient>) -> Self {
        let anonymous = source.allows_anonymous();
        Self {
            projector: ReservationStateProjector::new(source),
            auth,
            anonymous,
        }
    }

    /// Build the configured source and try a first load. A failed load is
    /// logged, not fatal: the page will report it and retry.
    pub fn from_config(backend: &BackendConfig) -> Result<Self, ReservationError> {
        let app = match backend {
            BackendConfig::Remote { base_url, timeout } => {
                let client = BackendClient::new(base_url, *timeout)?;
                tracing::info!(url = %client.base_url(), ?timeout, "using remote backend");
                App::new(Box::new(RemoteSource::new(client.clone())), Some(client))
            }
            BackendConfig::Local { map_file, db_path } => {
                let db = Database::new(db_path.clone());
                init_db(&db)?;
                tracing::info!(map = %map_file.display(), db = %db_path.display(), "using local store");
                App::new(Box::new(LocalSource::new(map_file.clone(), db)), None)
            }
        };

        let source = app.projector.source_name();
        match app.projector.load_spots() {
            Ok(count) => tracing::info!(source, count, "initial spot load"),
            Err(e) => tracing::warn!(source, error = %e, "initial spot load failed"),
        }
        Ok(app)
    }

    pub fn projector(&self) -> &ReservationStateProjector {
        &self.projector
    }

    pub fn auth(&self) -> Option<&BackendClient> {
        self.auth.as_ref()
    }

    /// Whether pages need a signed-in user.
    pub fn requires_login(&self) -> bool {
        !self.anonymous
    }
}
