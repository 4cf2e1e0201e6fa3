use std::time::Duration;

use astra::{Body, Request};

use crate::app::App;
use crate::domain::geojson::parse_spots;
use crate::router::handle;
use crate::sources::memory::MemorySource;
use crate::sources::BackendClient;
use crate::tests::mock_backend::MockBackend;
use crate::tests::utils::{body_string, form_body, local_app, redirect_target, token_for, SAMPLE_MAP};

fn remote_app(mock: &MockBackend) -> App {
    let client = BackendClient::new(&mock.url, Some(Duration::from_secs(5))).unwrap();
    let source = MemorySource::new(parse_spots(SAMPLE_MAP).unwrap(), false);
    App::new(Box::new(source), Some(client))
}

fn post(uri: &str, pairs: &[(&str, &str)]) -> Request {
    http::Request::builder()
        .method("POST")
        .uri(uri)
        .body(form_body(pairs))
        .unwrap()
}

fn set_cookie(resp: &astra::Response) -> String {
    resp.headers()
        .get("Set-Cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

#[test]
fn map_without_session_shows_login() {
    let mock = MockBackend::start(vec![]);
    let app = remote_app(&mock);
    let req = http::Request::builder().uri("/").body(Body::empty()).unwrap();

    let html = body_string(handle(req, &app).unwrap());
    assert!(html.contains(r#"action="/login""#));
    assert!(!html.contains("Espacios ("));
    mock.finish();
}

#[test]
fn reservations_without_session_redirect_to_login() {
    let mock = MockBackend::start(vec![]);
    let app = remote_app(&mock);
    let req = http::Request::builder().uri("/reservas").body(Body::empty()).unwrap();

    let resp = handle(req, &app).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(redirect_target(&resp).0, "/login");
    mock.finish();
}

#[test]
fn login_sets_token_cookie() {
    let token = token_for("ana@club.mx");
    let mock = MockBackend::start(vec![(200, format!(r#"{{"token":"{token}"}}"#))]);
    let app = remote_app(&mock);

    let resp = handle(post("/login", &[("email", "ana@club.mx"), ("password", "secreto")]), &app).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(redirect_target(&resp).0, "/");
    assert!(set_cookie(&resp).starts_with(&format!("token={token};")));

    let requests = mock.finish();
    assert!(requests[0].starts_with("POST /api/login "));
    assert!(requests[0].contains(r#""email":"ana@club.mx""#));
}

#[test]
fn login_failure_surfaces_backend_message() {
    let mock = MockBackend::start(vec![(401, r#"{"error":"Credenciales inválidas"}"#.into())]);
    let app = remote_app(&mock);

    let resp = handle(post("/login", &[("email", "ana@club.mx"), ("password", "mala")]), &app).unwrap();
    let (path, params) = redirect_target(&resp);
    assert_eq!(path, "/login");
    assert_eq!(params["error"], "Credenciales inválidas");
    assert!(set_cookie(&resp).is_empty());
    mock.finish();
}

#[test]
fn login_with_empty_fields_never_calls_backend() {
    let mock = MockBackend::start(vec![]);
    let app = remote_app(&mock);

    let resp = handle(post("/login", &[("email", "ana@club.mx"), ("password", "  ")]), &app).unwrap();
    let (_, params) = redirect_target(&resp);
    assert_eq!(params["error"], "Completa todos los campos");
    assert!(mock.finish().is_empty());
}

#[test]
fn register_success_returns_to_login() {
    let mock = MockBackend::start(vec![(201, r#"{"message":"ok"}"#.into())]);
    let app = remote_app(&mock);

    let resp = handle(post("/register", &[("email", "nuevo@club.mx"), ("password", "secreto")]), &app).unwrap();
    let (path, params) = redirect_target(&resp);
    assert_eq!(path, "/login");
    assert_eq!(params["ok"], "Registro exitoso. Ahora inicia sesión.");
    assert!(mock.finish()[0].starts_with("POST /api/register "));
}

#[test]
fn logout_clears_cookie() {
    let mock = MockBackend::start(vec![]);
    let app = remote_app(&mock);

    let resp = handle(post("/logout", &[]), &app).unwrap();
    let (path, params) = redirect_target(&resp);
    assert_eq!(path, "/login");
    assert_eq!(params["ok"], "Sesión cerrada");
    assert!(set_cookie(&resp).contains("Max-Age=0"));
    mock.finish();
}

#[test]
fn local_mode_has_no_login_flow() {
    let app = local_app("auth_local");
    let resp = handle(post("/login", &[("email", "ana@club.mx"), ("password", "x")]), &app).unwrap();
    assert_eq!(redirect_target(&resp).0, "/");

    let req = http::Request::builder().uri("/").body(Body::empty()).unwrap();
    let html = body_string(handle(req, &app).unwrap());
    assert!(html.contains("Espacios (3)"));
}
