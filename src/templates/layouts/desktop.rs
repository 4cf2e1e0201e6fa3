use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; color: #222; }
header { display: flex; align-items: center; justify-content: space-between; padding: .75rem 1.5rem; box-shadow: 0 1px 4px #0002; }
header nav ul { display: flex; gap: 1rem; list-style: none; margin: 0; padding: 0; }
main { max-width: 960px; margin: 1.5rem auto; padding: 0 1rem; }
#map { height: 420px; margin: 1rem 0; border-radius: 6px; }
.notice { padding: .6rem 1rem; border-radius: 6px; margin-bottom: 1rem; }
.notice.ok { background: #dcfce7; color: #14532d; }
.notice.error { background: #fee2e2; color: #7f1d1d; }
.swatch { display: inline-block; width: .9rem; height: .9rem; border-radius: 50%; border: 1px solid #0003; }
table { width: 100%; border-collapse: collapse; }
td, th { text-align: left; padding: .4rem; border-bottom: 1px solid #eee; }
.card { border: 1px solid #e5e7eb; border-radius: 8px; padding: 1rem; margin-bottom: 1rem; }
"#;

/// Page shell. `user` is shown in the header; `can_logout` adds the logout control.
pub fn desktop_layout(title: &str, user: Option<&str>, can_logout: bool, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Club de Playa" }
                style { (PreEscaped(STYLE)) }
            }
            body {
              header {
                  h3 { "Club de Playa" }
                  nav {
                      ul {
                          li { a href="/" { "Mapa" } }
                          li { a href="/reservas" { "Mis reservas" } }
                      }
                  }
                  div {
                      @if let Some(email) = user {
                          span id="authMensaje" { "Sesión activa como: " strong { (email) } }
                      }
                      @if can_logout {
                          form method="post" action="/logout" style="display:inline; margin-left: 1rem;" {
                              button type="submit" id="btnCerrarSesion" { "Cerrar sesión" }
                          }
                      }
                  }
              }
                (content)
            }
        }
    }
}
