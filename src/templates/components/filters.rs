use maud::{html, Markup};

use crate::domain::{SlotState, StateFilter, TypeFilter};
use crate::view::ViewState;

/// Type and state dropdowns. Submitting reloads the page with the new filters.
pub fn filter_form<'a>(kinds: impl IntoIterator<Item = &'a str>, view: &ViewState) -> Markup {
    html! {
        form method="get" action="/" class="filters" {
            label for="filtroTipo" { "Tipo " }
            select id="filtroTipo" name="tipo" {
                option value="todos" selected[view.type_filter == TypeFilter::All] { "Todos" }
                @for kind in kinds {
                    option value=(kind) selected[view.type_filter.as_param() == kind] { (kind) }
                }
            }
            " "
            label for="filtroEstado" { "Estado " }
            select id="filtroEstado" name="estado" {
                option value="todos" selected[view.state_filter == StateFilter::All] { "Todos" }
                @for state in SlotState::ALL {
                    option value=(state.as_str()) selected[view.state_filter == StateFilter::Only(state)] {
                        (state.as_str())
                    }
                }
            }
            " "
            button type="submit" { "Filtrar" }
        }
    }
}
