// src/auth/sessions.rs
use astra::Request;

use crate::auth::token::email_from_token;

pub const TOKEN_COOKIE: &str = "token";

/// Who is making a request, as far as the browser's cookie says.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
}

impl Session {
    pub fn from_request(req: &Request) -> Self {
        let token = req
            .headers()
            .get_all("Cookie")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|header| cookie_value(header, TOKEN_COOKIE))
            .filter(|t| !t.is_empty());
        Self { token }
    }

    /// Email claim of the session token, if any.
    pub fn user(&self) -> Option<String> {
        self.token.as_deref().and_then(email_from_token)
    }
}

pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        (k.trim() == name).then(|| v.trim().to_string())
    })
}

pub fn set_token_cookie(token: &str) -> String {
    format!("{TOKEN_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

pub fn clear_token_cookie() -> String {
    format!("{TOKEN_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
