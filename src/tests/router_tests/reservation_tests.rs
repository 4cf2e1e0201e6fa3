use astra::{Body, Request};

use crate::app::App;
use crate::domain::geojson::parse_spots;
use crate::router::handle;
use crate::sources::memory::MemorySource;
use crate::tests::utils::{body_string, form_body, local_app, redirect_target, token_for, SAMPLE_MAP};

fn member_app() -> (App, MemorySource) {
    let source = MemorySource::new(parse_spots(SAMPLE_MAP).unwrap(), false);
    let app = App::new(Box::new(source.clone()), None);
    app.projector().load_spots().unwrap();
    (app, source)
}

fn post(uri: &str, cookie: Option<&str>, pairs: &[(&str, &str)]) -> Request {
    let mut builder = http::Request::builder().method("POST").uri(uri);
    if let Some(token) = cookie {
        builder = builder.header("Cookie", format!("token={token}"));
    }
    builder.body(form_body(pairs)).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request {
    let mut builder = http::Request::builder().method("GET").uri(uri);
    if let Some(token) = cookie {
        builder = builder.header("Cookie", format!("token={token}"));
    }
    builder.body(Body::empty()).unwrap()
}

#[test]
fn reserve_without_session_is_refused_before_the_source() {
    let (app, source) = member_app();
    let resp = handle(post("/reservar", None, &[("nombre", "Silla-6"), ("horario", "Completo")]), &app).unwrap();

    assert_eq!(resp.status(), 303);
    let (_, params) = redirect_target(&resp);
    assert!(params["error"].contains("Debes iniciar sesión"));
    assert_eq!(source.writes(), 0);
}

#[test]
fn reserve_keeps_filters_in_redirect() {
    let (app, _) = member_app();
    let token = token_for("ana@club.mx");
    let resp = handle(
        post(
            "/reservar",
            Some(&token),
            &[("nombre", "Palapa-1"), ("horario", "PM"), ("tipo", "palapa"), ("estado", "todos")],
        ),
        &app,
    )
    .unwrap();

    let (path, params) = redirect_target(&resp);
    assert_eq!(path, "/");
    assert_eq!(params["tipo"], "palapa");
    assert_eq!(params["ok"], "Reserva exitosa: Palapa-1 - Horario PM");
}

#[test]
fn blocked_spot_reports_error_notice() {
    let app = local_app("reserve_blocked");
    let resp = handle(post("/reservar", None, &[("nombre", "Silla-5"), ("horario", "Completo")]), &app).unwrap();

    let (_, params) = redirect_target(&resp);
    assert_eq!(params["error"], "Error al reservar: Silla-5 (Completo) está bloqueado.");
}

#[test]
fn unknown_slot_label_reports_error_notice() {
    let app = local_app("reserve_bad_slot");
    let resp = handle(post("/reservar", None, &[("nombre", "Palapa-1"), ("horario", "Noche")]), &app).unwrap();

    let (_, params) = redirect_target(&resp);
    assert!(params["error"].starts_with("Error al reservar:"));
}

#[test]
fn reservations_page_lists_and_cancels() {
    let (app, source) = member_app();
    let token = token_for("ana@club.mx");
    handle(post("/reservar", Some(&token), &[("nombre", "Palapa-1"), ("horario", "AM")]), &app).unwrap();

    let html = body_string(handle(get("/reservas", Some(&token)), &app).unwrap());
    assert!(html.contains("Palapa-1 - Usuario: ana@club.mx - Horario: AM"));

    let resp = handle(
        post("/reservas/cancelar", Some(&token), &[("nombre", "Palapa-1"), ("horario", "AM")]),
        &app,
    )
    .unwrap();
    let (path, params) = redirect_target(&resp);
    assert_eq!(path, "/reservas");
    assert_eq!(params["ok"], "Reserva cancelada con éxito.");
    assert!(source.state.lock().unwrap().reservations.is_empty());

    let html = body_string(handle(get("/reservas", Some(&token)), &app).unwrap());
    assert!(html.contains("No tienes reservas aún."));
}

#[test]
fn cancel_of_unknown_reservation_reports_error() {
    let (app, _) = member_app();
    let token = token_for("ana@club.mx");
    let resp = handle(
        post("/reservas/cancelar", Some(&token), &[("nombre", "Silla-6"), ("horario", "Completo")]),
        &app,
    )
    .unwrap();

    let (_, params) = redirect_target(&resp);
    assert!(params["error"].starts_with("No se pudo cancelar la reserva."));
}

#[test]
fn clear_all_only_touches_own_reservations() {
    let (app, source) = member_app();
    let ana = token_for("ana@club.mx");
    let otro = token_for("otro@club.mx");
    handle(post("/reservar", Some(&ana), &[("nombre", "Palapa-1"), ("horario", "AM")]), &app).unwrap();
    handle(post("/reservar", Some(&otro), &[("nombre", "Palapa-1"), ("horario", "PM")]), &app).unwrap();

    let resp = handle(post("/reservas/limpiar", Some(&ana), &[("volver", "/reservas")]), &app).unwrap();
    let (path, params) = redirect_target(&resp);
    assert_eq!(path, "/reservas");
    assert_eq!(params["ok"], "Todas las reservas han sido canceladas (1).");

    let left = source.state.lock().unwrap().reservations.clone();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].user, "otro@club.mx");
}

#[test]
fn clear_all_partial_failure_is_reported() {
    let (app, source) = member_app();
    let ana = token_for("ana@club.mx");
    handle(post("/reservar", Some(&ana), &[("nombre", "Palapa-1"), ("horario", "AM")]), &app).unwrap();
    handle(post("/reservar", Some(&ana), &[("nombre", "Silla-6"), ("horario", "Completo")]), &app).unwrap();
    source.state.lock().unwrap().fail_delete_for = vec!["Silla-6".into()];

    let resp = handle(post("/reservas/limpiar", Some(&ana), &[]), &app).unwrap();
    let (path, params) = redirect_target(&resp);
    assert_eq!(path, "/");
    let msg = &params["error"];
    assert!(msg.starts_with("Se cancelaron 1 reservas; fallaron 1:"));
    assert!(msg.contains("Silla-6 (Completo)"));
}

#[test]
fn local_clear_all_cancels_anonymous_reservations() {
    let app = local_app("local_clear_all");
    handle(post("/reservar", None, &[("nombre", "Palapa-1"), ("horario", "AM")]), &app).unwrap();
    handle(post("/reservar", None, &[("nombre", "Silla-6"), ("horario", "Completo")]), &app).unwrap();

    let html = body_string(handle(get("/reservas", None), &app).unwrap());
    assert!(html.contains("Palapa-1 - Usuario: anonimo - Horario: AM"));
    assert!(html.contains("Silla-6 - Usuario: anonimo - Horario: Completo"));

    let resp = handle(post("/reservas/limpiar", None, &[("volver", "/reservas")]), &app).unwrap();
    let (path, params) = redirect_target(&resp);
    assert_eq!(path, "/reservas");
    assert_eq!(params["ok"], "Todas las reservas han sido canceladas (2).");

    let html = body_string(handle(get("/reservas", None), &app).unwrap());
    assert!(html.contains("No tienes reservas aún."));

    // the reloaded map shows both spots free again
    let html = body_string(handle(get("/", None), &app).unwrap());
    assert!(html.contains(r#"<option value="AM">AM (disponible)</option>"#));
    let json: serde_json::Value =
        serde_json::from_str(&body_string(handle(get("/api/features?estado=reservado", None), &app).unwrap()))
            .unwrap();
    assert!(json["features"].as_array().unwrap().is_empty());
}
