//! Session store and the navigation guard built on it.
//!
//! # Module Structure
//!
//! - `store`: Persisted, observable session state (`SessionStore`)
//! - `navigator`: Route guarding and return-path memory (`Navigator`)

mod navigator;
mod store;

pub use navigator::{Navigation, Navigator};
pub use store::SessionStore;
