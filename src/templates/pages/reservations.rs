use maud::{html, Markup};

use crate::domain::Reservation;
use crate::templates::{desktop_layout, notice_banner};
use crate::view::Notice;

pub struct ReservationsVm<'a> {
    pub user: Option<&'a str>,
    pub can_logout: bool,
    pub notice: Option<&'a Notice>,
    pub reservations: &'a [Reservation],
}

pub fn reservations_page(vm: &ReservationsVm<'_>) -> Markup {
    desktop_layout(
        "Mis reservas",
        vm.user,
        vm.can_logout,
        html! {
            main class="container" id="modalReservas" {
                h1 { "Reservas" }
                (notice_banner(vm.notice))

                ul id="listaReservas" {
                    @if vm.reservations.is_empty() {
                        li { "No tienes reservas aún." }
                    }
                    @for r in vm.reservations {
                        li {
                            (r.spot) " - Usuario: " (r.user) " - Horario: " (r.slot.as_str())
                            " - Fecha: " (r.created_at.format("%Y-%m-%d %H:%M").to_string())
                            form method="post" action="/reservas/cancelar" style="display:inline; margin-left: 10px;" {
                                input type="hidden" name="nombre" value=(r.spot);
                                input type="hidden" name="horario" value=(r.slot.as_str());
                                button type="submit" { "Cancelar" }
                            }
                        }
                    }
                }

                @if !vm.reservations.is_empty() {
                    form method="post" action="/reservas/limpiar" {
                        input type="hidden" name="volver" value="/reservas";
                        button type="submit" id="btnLimpiarReservas" { "Cancelar todas mis reservas" }
                    }
                }
                p { a href="/" { "← Volver al mapa" } }
            }
        },
    )
}
