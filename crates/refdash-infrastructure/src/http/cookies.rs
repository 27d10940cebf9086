//! Resettable cookie jar shared with the reqwest client.

use refdash_core::session::{CSRF_COOKIE, SessionCredentials};
use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use std::sync::{RwLock, RwLockReadGuard};

/// Cookie store for one backend origin.
///
/// `reqwest::cookie::Jar` cannot be emptied, so the jar is swapped out on
/// [`SessionCookieJar::clear`]. Cookies are exported and imported as
/// [`SessionCredentials`] so they survive between CLI runs.
pub struct SessionCookieJar {
    origin: Url,
    inner: RwLock<Jar>,
}

impl SessionCookieJar {
    pub fn new(origin: Url) -> Self {
        Self {
            origin,
            inner: RwLock::new(Jar::default()),
        }
    }

    fn jar(&self) -> RwLockReadGuard<'_, Jar> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cookies currently sent to the backend origin.
    pub fn snapshot(&self) -> SessionCredentials {
        self.jar()
            .cookies(&self.origin)
            .and_then(|header| header.to_str().map(SessionCredentials::from_cookie_header).ok())
            .unwrap_or_default()
    }

    /// Replaces the jar contents with `credentials`.
    pub fn restore(&self, credentials: &SessionCredentials) {
        let jar = Jar::default();
        for (name, value) in credentials.iter() {
            jar.add_cookie_str(&format!("{name}={value}; Path=/"), &self.origin);
        }
        *self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = jar;
    }

    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = Jar::default();
    }

    /// Value of the `csrftoken` cookie, echoed back as `X-CSRFToken`.
    pub fn csrf_token(&self) -> Option<String> {
        self.snapshot().get(CSRF_COOKIE).map(str::to_string)
    }
}

impl CookieStore for SessionCookieJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        self.jar().set_cookies(cookie_headers, url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.jar().cookies(url)
    }
}
