use std::collections::HashMap;
use std::io::Read;

use astra::Request;

use crate::app::App;
use crate::auth::sessions::{clear_token_cookie, set_token_cookie};
use crate::auth::Session;
use crate::domain::geojson::{StyledCollection, StyledFeature};
use crate::domain::{style_for, SlotLabel};
use crate::errors::ServerError;
use crate::responses::{html_response, json_response, see_other, ResultResp};
use crate::templates::components::{spot_popup, PopupActions};
use crate::templates::pages::{login_page, map_page, reservations_page, MapVm, ReservationsVm};
use crate::view::{with_notice, Notice, ViewState};

const MAX_FORM_BYTES: u64 = 16 * 1024;

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    tracing::debug!(%method, %path, "request");

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => map(&req, app),
        ("GET", "/api/features") => features(&req, app),
        ("GET", "/login") => html_response(login_page(ViewState::from_params(&parse_query(&req)).notice.as_ref())),
        ("POST", "/login") => login(&mut req, app),
        ("POST", "/register") => register(&mut req, app),
        ("POST", "/logout") => logout(app),
        ("POST", "/reservar") => reserve(&mut req, app),
        ("GET", "/reservas") => reservations(&req, app),
        ("POST", "/reservas/cancelar") => cancel(&mut req, app),
        ("POST", "/reservas/limpiar") => clear_all(&mut req, app),
        _ => Err(ServerError::NotFound),
    }
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

fn parse_form(req: &mut Request) -> Result<HashMap<String, String>, ServerError> {
    let mut raw = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_FORM_BYTES)
        .read_to_end(&mut raw)
        .map_err(|e| ServerError::BadRequest(format!("unreadable form: {e}")))?;
    Ok(url::form_urlencoded::parse(&raw).into_owned().collect())
}

fn field<'a>(form: &'a HashMap<String, String>, name: &str) -> &'a str {
    form.get(name).map(|s| s.trim()).unwrap_or("")
}

/// In remote mode a page needs a user; `None` means "send them to login".
fn gate(session: &Session, app: &App) -> Option<Option<String>> {
    let user = session.user();
    if user.is_none() && app.requires_login() {
        return None;
    }
    Some(user)
}

fn map(req: &Request, app: &App) -> ResultResp {
    let session = Session::from_request(req);
    let Some(user) = gate(&session, app) else {
        return html_response(login_page(None));
    };
    let mut view = ViewState::from_params(&parse_query(req));

    let projector = app.projector();
    if let Err(e) = projector.load_spots() {
        // keep showing the last good state
        if view.notice.is_none() {
            view.notice = Some(Notice::error(e.to_string()));
        }
    }
    let kinds = projector.kinds();
    let spots = projector.filtered(&view.type_filter, view.state_filter);

    let vm = MapVm {
        user: user.as_deref(),
        can_logout: app.auth().is_some(),
        view: &view,
        kinds: kinds.iter().map(String::as_str).collect(),
        spots: spots.iter().collect(),
        features_url: ViewState {
            notice: None,
            ..view.clone()
        }
        .href("/api/features", None),
    };
    html_response(map_page(&vm))
}

fn features(req: &Request, app: &App) -> ResultResp {
    let view = ViewState::from_params(&parse_query(req));
    let spots = app.projector().filtered(&view.type_filter, view.state_filter);
    let actions = PopupActions {
        reserve_action: "/reservar",
        view: &view,
    };

    let features = spots
        .iter()
        .map(|spot| StyledFeature::new(spot, style_for(spot), spot_popup(spot, &actions).into_string()))
        .collect();
    json_response(&StyledCollection::new(features))
}

fn login(req: &mut Request, app: &App) -> ResultResp {
    let form = parse_form(req)?;
    let Some(client) = app.auth() else {
        return see_other("/", None);
    };
    let (email, password) = (field(&form, "email"), field(&form, "password"));
    if email.is_empty() || password.is_empty() {
        return see_other(&with_notice("/login", &Notice::error("Completa todos los campos")), None);
    }

    match client.login(email, password) {
        Ok(token) => {
            tracing::info!(email, "signed in");
            see_other("/", Some(set_token_cookie(&token)))
        }
        Err(e) => see_other(&with_notice("/login", &Notice::error(e.to_string())), None),
    }
}

fn register(req: &mut Request, app: &App) -> ResultResp {
    let form = parse_form(req)?;
    let Some(client) = app.auth() else {
        return see_other("/", None);
    };
    let (email, password) = (field(&form, "email"), field(&form, "password"));
    if email.is_empty() || password.is_empty() {
        return see_other(&with_notice("/login", &Notice::error("Completa todos los campos")), None);
    }

    let notice = match client.register(email, password) {
        Ok(()) => Notice::success("Registro exitoso. Ahora inicia sesión."),
        Err(e) => Notice::error(e.to_string()),
    };
    see_other(&with_notice("/login", &notice), None)
}

fn logout(app: &App) -> ResultResp {
    if app.auth().is_none() {
        return see_other("/", None);
    }
    see_other(
        &with_notice("/login", &Notice::success("Sesión cerrada")),
        Some(clear_token_cookie()),
    )
}

fn reserve(req: &mut Request, app: &App) -> ResultResp {
    let session = Session::from_request(req);
    let form = parse_form(req)?;
    let view = ViewState::from_params(&form);
    let spot = field(&form, "nombre");
    let slot_raw = field(&form, "horario");

    let outcome = slot_raw
        .parse::<SlotLabel>()
        .map_err(|e| e.to_string())
        .and_then(|slot| {
            app.projector()
                .reserve(spot, slot, session.user().as_deref())
                .map_err(|e| e.to_string())
        });

    let notice = match outcome {
        Ok(r) => Notice::success(format!("Reserva exitosa: {} - Horario {}", r.spot, r.slot)),
        Err(msg) => Notice::error(format!("Error al reservar: {msg}")),
    };
    see_other(&view.href("/", Some(&notice)), None)
}

fn reservations(req: &Request, app: &App) -> ResultResp {
    let session = Session::from_request(req);
    let Some(user) = gate(&session, app) else {
        return see_other("/login", None);
    };
    let mut notice = ViewState::from_params(&parse_query(req)).notice;

    let list = match app.projector().list_reservations() {
        Ok(list) => list,
        Err(e) => {
            notice = Some(Notice::error(format!("No se pudieron cargar las reservas. {e}")));
            Vec::new()
        }
    };

    html_response(reservations_page(&ReservationsVm {
        user: user.as_deref(),
        can_logout: app.auth().is_some(),
        notice: notice.as_ref(),
        reservations: &list,
    }))
}

fn cancel(req: &mut Request, app: &App) -> ResultResp {
    let form = parse_form(req)?;
    let spot = field(&form, "nombre");
    let slot: SlotLabel = field(&form, "horario").parse()?;

    let notice = match app.projector().cancel(spot, slot) {
        Ok(()) => Notice::success("Reserva cancelada con éxito."),
        Err(e) => Notice::error(format!("No se pudo cancelar la reserva. {e}")),
    };
    see_other(&with_notice("/reservas", &notice), None)
}

fn clear_all(req: &mut Request, app: &App) -> ResultResp {
    let session = Session::from_request(req);
    let form = parse_form(req)?;
    let view = ViewState::from_params(&form);
    let back_to_list = field(&form, "volver") == "/reservas";

    let result = app.projector().cancel_all(session.user().as_deref());
    let notice = match result {
        Ok(report) if report.is_complete() => Notice::success(format!(
            "Todas las reservas han sido canceladas ({}).",
            report.cancelled.len()
        )),
        Ok(report) => {
            let failed: Vec<String> = report
                .failed
                .iter()
                .map(|f| format!("{} ({}): {}", f.reservation.spot, f.reservation.slot, f.reason))
                .collect();
            Notice::error(format!(
                "Se cancelaron {} reservas; fallaron {}: {}",
                report.cancelled.len(),
                report.failed.len(),
                failed.join("; ")
            ))
        }
        Err(e) => Notice::error(format!("Ocurrió un error al cancelar las reservas. {e}")),
    };

    if back_to_list {
        see_other(&with_notice("/reservas", &notice), None)
    } else {
        see_other(&view.href("/", Some(&notice)), None)
    }
}
