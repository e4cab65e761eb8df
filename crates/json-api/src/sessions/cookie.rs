//! Session Cookie

use jiff::SignedDuration;
use salvo::http::cookie::{Cookie, SameSite, time::Duration};

/// How the session token cookie is named and flagged.
#[derive(Debug, Clone)]
pub(crate) struct SessionCookie {
    name: String,
    secure: bool,
    max_age: Duration,
}

impl SessionCookie {
    #[must_use]
    pub(crate) fn new(name: impl Into<String>, secure: bool, ttl: SignedDuration) -> Self {
        Self {
            name: name.into(),
            secure,
            max_age: Duration::seconds(ttl.as_secs()),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Cookie handing `token` to the browser.
    pub(crate) fn issue(&self, token: &str) -> Cookie<'static> {
        Cookie::build((self.name.clone(), token.to_owned()))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(self.max_age)
            .build()
    }
}
