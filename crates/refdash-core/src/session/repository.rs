//! Session repository trait.
//!
//! Defines the interface for durable session persistence.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// Durable storage for the single session of this client.
///
/// The store holds at most one session under a fixed key. Loading from an
/// empty store yields [`Session::Anonymous`].
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads the persisted session.
    ///
    /// # Returns
    ///
    /// - `Ok(Session::Anonymous)`: Nothing persisted
    /// - `Ok(Session::Authenticated(_))`: A previously saved session
    /// - `Err(_)`: Storage could not be read or parsed
    async fn load(&self) -> Result<Session>;

    /// Persists the session, replacing any previous one.
    ///
    /// Saving `Session::Anonymous` is equivalent to [`SessionRepository::clear`].
    async fn save(&self, session: &Session) -> Result<()>;

    /// Removes the persisted session. Succeeds if nothing was stored.
    async fn clear(&self) -> Result<()>;
}
