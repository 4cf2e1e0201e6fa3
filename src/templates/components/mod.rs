use maud::{html, Markup};

use crate::view::{Notice, NoticeKind};

pub mod error;
pub mod filters;
pub mod popup;

pub use error::error_page;
pub use filters::filter_form;
pub use popup::{spot_popup, PopupActions};

pub fn notice_banner(notice: Option<&Notice>) -> Markup {
    html! {
        @if let Some(n) = notice {
            @match n.kind {
                NoticeKind::Success => div class="notice ok" role="status" { "✅ " (n.text) },
                NoticeKind::Error => div class="notice error" role="alert" { "⚠️ " (n.text) },
            }
        }
    }
}

/// Hidden inputs that carry `pairs` through a form post.
pub fn hidden_fields(pairs: &[(&str, &str)]) -> Markup {
    html! {
        @for (name, value) in pairs {
            input type="hidden" name=(name) value=(value);
        }
    }
}
