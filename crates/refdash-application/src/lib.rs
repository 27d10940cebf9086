//! Application layer for refdash.
//!
//! This crate provides use case implementations that coordinate the domain
//! types of `refdash-core` with an injected backend and session repository.

pub mod auth_usecase;
pub mod configuration_service;
pub mod dashboard_service;
pub mod session;
pub mod view;

#[cfg(test)]
mod test_support;

pub use auth_usecase::{AuthUseCase, extract_code};
pub use configuration_service::{ConfigurationForm, ConfigurationService, ConfigurationState};
pub use dashboard_service::{DashboardQuery, DashboardService, DashboardState, DashboardTables};
pub use session::{Navigation, Navigator, SessionStore};
