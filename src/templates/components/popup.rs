use maud::{html, Markup};

use crate::domain::{Occupancy, SlotLabel, SlotState, Spot};
use crate::templates::components::hidden_fields;
use crate::view::ViewState;

/// Where popup actions post to. Supplied by whoever builds the features, so the
/// markup never references handlers of its own.
pub struct PopupActions<'a> {
    pub reserve_action: &'a str,
    pub view: &'a ViewState,
}

fn price(p: f64) -> String {
    if p.fract() == 0.0 {
        format!("${p:.0}")
    } else {
        format!("${p:.2}")
    }
}

pub fn spot_popup(spot: &Spot, actions: &PopupActions<'_>) -> Markup {
    html! {
        div class="popup" {
            strong { (spot.name) } br;
            "Tipo: " (spot.kind) br;
            @match &spot.occupancy {
                Occupancy::Simple(state) => {
                    "Estado: " (state.as_str()) br;
                    "Precio: " (price(spot.price))
                    @if *state == SlotState::Available {
                        (reserve_form(spot, actions, html! {
                            input type="hidden" name="horario" value=(SlotLabel::WHOLE_SPOT.as_str());
                        }))
                    }
                }
                Occupancy::Composite(slots) => {
                    "Precio: " (price(spot.price)) br;
                    (reserve_form(spot, actions, html! {
                        label { "Horario: "
                            select name="horario" {
                                @for (label, state) in slots {
                                    option value=(label.as_str()) disabled[*state != SlotState::Available] {
                                        (label.as_str()) " (" (state.as_str()) ")"
                                    }
                                }
                            }
                        }
                    }))
                }
            }
        }
    }
}

fn reserve_form(spot: &Spot, actions: &PopupActions<'_>, slot_input: Markup) -> Markup {
    html! {
        form method="post" action=(actions.reserve_action) {
            input type="hidden" name="nombre" value=(spot.name);
            (hidden_fields(&actions.view.filter_params()))
            (slot_input)
            " "
            button type="submit" { "Reservar" }
        }
    }
}
