use maud::{html, Markup, PreEscaped};

use crate::domain::{style_for, Spot};
use crate::templates::components::{filter_form, hidden_fields, spot_popup, PopupActions};
use crate::templates::{desktop_layout, notice_banner};
use crate::view::ViewState;

pub struct MapVm<'a> {
    pub user: Option<&'a str>,
    pub can_logout: bool,
    pub view: &'a ViewState,
    pub kinds: Vec<&'a str>,
    /// Spots that pass the current filters.
    pub spots: Vec<&'a Spot>,
    /// Styled GeoJSON for the same filters.
    pub features_url: String,
}

// The map widget only draws what the feature endpoint returns.
const MAP_SCRIPT: &str = r#"
(function () {
  var el = document.getElementById('map');
  var map = L.map('map');
  L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
    attribution: '&copy; OpenStreetMap contributors'
  }).addTo(map);
  fetch(el.dataset.features)
    .then(function (res) { return res.json(); })
    .then(function (data) {
      var layer = L.geoJSON(data, {
        style: function (f) { return f.properties.style; },
        onEachFeature: function (f, l) { l.bindPopup(f.properties.popup); }
      }).addTo(map);
      if (layer.getLayers().length) { map.fitBounds(layer.getBounds()); } else { map.setView([0, 0], 2); }
    })
    .catch(function (err) { console.error('Error cargando mapa:', err); });
})();
"#;

pub fn map_page(vm: &MapVm<'_>) -> Markup {
    let actions = PopupActions {
        reserve_action: "/reservar",
        view: vm.view,
    };

    desktop_layout(
        "Mapa",
        vm.user,
        vm.can_logout,
        html! {
            link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
            main class="container" id="mapContainer" {
                (notice_banner(vm.view.notice.as_ref()))
                (filter_form(vm.kinds.iter().copied(), vm.view))

                div id="map" data-features=(vm.features_url) {}

                section class="card" {
                    h3 { "Espacios (" (vm.spots.len()) ")" }
                    @if vm.spots.is_empty() {
                        p { "Ningún espacio coincide con los filtros." }
                    } @else {
                        table {
                            thead { tr { th {} th { "Nombre" } th { "Tipo" } th { "Estado" } th {} } }
                            tbody {
                                @for spot in &vm.spots {
                                    tr {
                                        td { span class="swatch" style={ "background:" (style_for(spot).color) } {} }
                                        td { (spot.name) }
                                        td { (spot.kind) }
                                        td { (spot.aggregate_state().as_str()) }
                                        td {
                                            details {
                                                summary { "Detalles" }
                                                (spot_popup(spot, &actions))
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                form method="post" action="/reservas/limpiar" {
                    (hidden_fields(&vm.view.filter_params()))
                    button type="submit" id="btnLimpiarReservas" { "Cancelar todas mis reservas" }
                }
            }
            script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" {}
            script { (PreEscaped(MAP_SCRIPT)) }
        },
    )
}
