//! HTTP access to the dashboard backend.
//!
//! # Module Structure
//!
//! - `cookies`: Resettable cookie jar (`SessionCookieJar`)
//! - `client`: JSON request helper with CSRF handling (`ApiClient`)
//! - `backend`: `AccountBackend` implementation (`HttpAccountBackend`)

mod backend;
mod client;
mod cookies;

pub use backend::{
    AUTHORIZE_PATH, CONFIGURATIONS_PATH, DASHBOARD_PATH, HttpAccountBackend, LOGOUT_PATH,
    SESSION_PATH,
};
pub use client::ApiClient;
pub use cookies::SessionCookieJar;
