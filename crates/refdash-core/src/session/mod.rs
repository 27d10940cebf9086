//! Session domain module.
//!
//! This module contains the session model, the cookie credentials that ride
//! along with it, and the repository interface used to persist it.
//!
//! # Module Structure
//!
//! - `model`: `Session`, `UserSession`, `UserAccount`
//! - `credentials`: Backend cookies and CSRF constants
//! - `repository`: Repository trait for session persistence
//!
//! # Usage
//!
//! ```ignore
//! use refdash_core::session::{Session, SessionRepository, SessionCredentials};
//! ```

mod credentials;
mod model;
mod repository;

// Re-export public API
pub use credentials::{CSRF_COOKIE, CSRF_HEADER, SessionCredentials};
pub use model::{Session, UserAccount, UserSession};
pub use repository::SessionRepository;
