use crate::errors::ServerError;
use crate::templates::components::error_page;
use astra::{Body, Response, ResponseBuilder};

/// Convert a ServerError into an HTML error page.
pub fn html_error_response(err: ServerError) -> Response {
    let status = err.status();
    let message = match &err {
        ServerError::NotFound => "Página no encontrada".to_string(),
        ServerError::BadRequest(msg) => msg.clone(),
        ServerError::InternalError => "Error interno del servidor".to_string(),
    };
    if status >= 500 {
        tracing::error!(%err, "request failed");
    } else {
        tracing::debug!(%err, "request rejected");
    }

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(error_page(status, &message).into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
