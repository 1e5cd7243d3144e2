use derive_more::{Deref, Display};
use http::HeaderValue;
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

use crate::constants::CSRF_COOKIE_NAME;

#[derive(Clone, PartialEq, Eq, Deref, Display, Serialize, Deserialize, Debug)]
pub struct CsrfToken(pub String);

/// Places in the host page where the server leaves its CSRF token.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize, Debug)]
pub struct CsrfSources {
    /// `content` of `<meta name="csrf-token">`
    #[serde(default)]
    pub meta: Option<String>,
    /// value of the hidden `csrfmiddlewaretoken` input
    #[serde(default)]
    pub input: Option<String>,
    /// raw `document.cookie`
    #[serde(default)]
    pub cookie: String,
}

impl CsrfSources {
    /// First usable token: meta tag, then hidden input, then cookie.
    ///
    /// Tokens that cannot travel in a header are skipped.
    pub fn resolve(&self) -> Option<CsrfToken> {
        self.meta
            .as_deref()
            .filter(|token| is_header_safe(token))
            .or_else(|| self.input.as_deref().filter(|token| is_header_safe(token)))
            .map(ToOwned::to_owned)
            .or_else(|| {
                cookie_value(&self.cookie, CSRF_COOKIE_NAME).filter(|token| is_header_safe(token))
            })
            .map(CsrfToken)
    }
}

fn is_header_safe(token: &str) -> bool {
    !token.is_empty() && HeaderValue::from_str(token).is_ok()
}

/// Percent-decoded value of the first cookie called `name`.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| {
            cookie
                .strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .map(|value| percent_decode_str(value).decode_utf8_lossy().into_owned())
}
