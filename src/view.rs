// src/view.rs
use std::collections::HashMap;

use crate::domain::{StateFilter, TypeFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// One-shot message shown at the top of the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    fn param(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
        }
    }
}

/// Per-request view selection: filters plus an optional notice.
/// Travels in the query string, so nothing about it is kept server-side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub type_filter: TypeFilter,
    pub state_filter: StateFilter,
    pub notice: Option<Notice>,
}

impl ViewState {
    /// Build from query or form pairs. Unknown filter values fall back to "all".
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let type_filter = params
            .get("tipo")
            .map(|t| TypeFilter::parse(t))
            .unwrap_or_default();

        let state_filter = match params.get("estado").map(|s| s.parse::<StateFilter>()) {
            Some(Ok(f)) => f,
            Some(Err(e)) => {
                tracing::debug!(error = %e, "ignoring state filter");
                StateFilter::All
            }
            None => StateFilter::All,
        };

        let notice = match (params.get("error"), params.get("ok")) {
            (Some(text), _) => Some(Notice::error(text.clone())),
            (None, Some(text)) => Some(Notice::success(text.clone())),
            (None, None) => None,
        };

        Self {
            type_filter,
            state_filter,
            notice,
        }
    }

    /// Filter pairs for links and hidden form fields.
    pub fn filter_params(&self) -> [(&'static str, &str); 2] {
        [
            ("tipo", self.type_filter.as_param()),
            ("estado", self.state_filter.as_param()),
        ]
    }

    /// `path` with this view's filters and the given notice in the query string.
    pub fn href(&self, path: &str, notice: Option<&Notice>) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        query.extend_pairs(self.filter_params());
        if let Some(n) = notice {
            query.append_pair(n.param(), &n.text);
        }
        format!("{path}?{}", query.finish())
    }
}

/// `path` carrying only a notice.
pub fn with_notice(path: &str, notice: &Notice) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(notice.param(), &notice.text)
        .finish();
    format!("{path}?{query}")
}
