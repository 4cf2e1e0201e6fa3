use crate::app::App;
use crate::config::Config;
use crate::router::handle;
use astra::Server;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod projector;
mod responses;
mod router;
mod sources;
mod templates;
mod view;

#[cfg(test)]
mod tests;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clubplaya=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() {
    init_tracing();

    // 1️⃣ Configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    let addr = match config.server.addr() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(error = %e, "invalid listen address");
            std::process::exit(1);
        }
    };

    // 2️⃣ Reservation source + controller
    let app = match App::from_config(&config.backend) {
        Ok(app) => Arc::new(app),
        Err(e) => {
            tracing::error!(error = %e, "backend initialization failed");
            std::process::exit(1);
        }
    };

    // 3️⃣ Serve
    tracing::info!("starting server at http://{addr}");
    let server = Server::bind(&addr).max_workers(config.server.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => responses::html_error_response(err),
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("server shut down");
}
