//! Domain layer for the refactoring bot dashboard client.
//!
//! Holds the session model and its repository interface, the route guard,
//! the table ordering helper, dashboard and configuration records, and the
//! backend interface implemented by `refdash-infrastructure`.

pub mod backend;
pub mod config;
pub mod configuration;
pub mod dashboard;
pub mod error;
pub mod notification;
pub mod routing;
pub mod session;
pub mod table;

// Re-export common error type
pub use error::{RefdashError, Result};
