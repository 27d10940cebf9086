pub mod http;
pub mod paths;
pub mod session_repository;
pub mod settings_service;
pub mod storage;

pub use crate::http::HttpAccountBackend;
pub use crate::paths::RefdashPaths;
pub use crate::session_repository::FileSessionRepository;
pub use crate::settings_service::SettingsService;
