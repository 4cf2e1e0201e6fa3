use astra::{Body, Request};
use serde_json::Value;

use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, form_body, local_app, redirect_target};

fn get(uri: &str) -> Request {
    http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[test]
fn map_lists_every_spot_without_filters() {
    let app = local_app("map_all");
    let resp = handle(get("/"), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let html = body_string(resp);
    assert!(html.contains("Espacios (3)"));
    assert!(html.contains("Palapa-1"));
    assert!(html.contains("Silla-5"));
    assert!(html.contains("Silla-6"));
    assert!(html.contains(r#"data-features="/api/features?tipo=todos&amp;estado=todos""#));
}

#[test]
fn state_filter_narrows_the_list() {
    let app = local_app("map_blocked");
    let html = body_string(handle(get("/?estado=bloqueado"), &app).unwrap());

    assert!(html.contains("Espacios (1)"));
    assert!(html.contains("Silla-5"));
    assert!(!html.contains("<td>Palapa-1</td>"));
}

#[test]
fn features_carry_style_and_popup() {
    let app = local_app("features");
    let resp = handle(get("/api/features?estado=bloqueado"), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let json: Value = serde_json::from_str(&body_string(resp)).unwrap();
    assert_eq!(json["type"], "FeatureCollection");
    let features = json["features"].as_array().unwrap();
    assert_eq!(features.len(), 1);

    let props = &features[0]["properties"];
    assert_eq!(props["nombre"], "Silla-5");
    assert_eq!(props["aggregate"], "bloqueado");
    assert_eq!(props["style"]["color"], "red");
    assert_eq!(props["style"]["weight"], 2);
    assert!(props["popup"].as_str().unwrap().contains("Estado: bloqueado"));
}

#[test]
fn type_filter_applies_to_features() {
    let app = local_app("features_type");
    let resp = handle(get("/api/features?tipo=palapa"), &app).unwrap();
    let json: Value = serde_json::from_str(&body_string(resp)).unwrap();

    let names: Vec<&str> = json["features"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["properties"]["nombre"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Palapa-1"]);
}

#[test]
fn reserved_slot_shows_as_disabled_after_reload() {
    let app = local_app("map_reserved");
    let req = http::Request::builder()
        .method("POST")
        .uri("/reservar")
        .body(form_body(&[("nombre", "Palapa-1"), ("horario", "AM")]))
        .unwrap();
    let resp = handle(req, &app).unwrap();
    let (path, params) = redirect_target(&resp);
    assert_eq!(path, "/");
    assert!(params.contains_key("ok"));

    let html = body_string(handle(get("/"), &app).unwrap());
    assert!(html.contains(r#"<option value="AM" disabled>AM (reservado)</option>"#));
    assert!(html.contains(r#"<option value="PM">PM (disponible)</option>"#));
}

#[test]
fn notice_from_query_is_rendered() {
    let app = local_app("map_notice");
    let html = body_string(handle(get("/?ok=Reserva+exitosa"), &app).unwrap());
    assert!(html.contains("Reserva exitosa"));
    assert!(html.contains(r#"class="notice ok""#));
}

#[test]
fn unknown_route_is_not_found() {
    let app = local_app("map_404");
    let err = handle(get("/admin"), &app).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}
