use crate::templates::{desktop_layout, notice_banner};
use crate::view::Notice;
use maud::{html, Markup};

pub fn login_page(notice: Option<&Notice>) -> Markup {
    desktop_layout(
        "Iniciar sesión",
        None,
        false,
        html! {
            main class="container narrow" id="authContainer" {
                h1 { "Iniciar sesión" }
                (notice_banner(notice))
                form method="post" action="/login" class="card" {
                    p {
                        label for="email" { "Correo " }
                        input type="email" id="email" name="email" autocomplete="email" required;
                    }
                    p {
                        label for="password" { "Contraseña " }
                        input type="password" id="password" name="password" autocomplete="current-password" required;
                    }
                    button type="submit" { "Iniciar sesión" }
                    " "
                    button type="submit" formaction="/register" { "Registrarse" }
                }
            }
        },
    )
}
