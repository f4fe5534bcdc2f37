//! Metrics and user persistence
//!
//! One metrics record and one user record per user, both keyed by the
//! stable platform id. Writes are upserts: last write wins.

mod memory;
mod redb_store;

pub use memory::InMemoryMetricsStore;
pub use redb_store::RedbMetricsStore;

use crate::models::{DevMeterResult, UserProfile};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Failed to (de)serialize metrics: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed persistent store for metrics and user records
pub trait MetricsStore: Send + Sync {
    /// Insert or overwrite the user record keyed by `profile.id`
    fn upsert_user(&self, profile: &UserProfile) -> StoreResult<UserProfile>;

    /// User record for `user_id`, if any
    fn get_user(&self, user_id: &str) -> StoreResult<Option<UserProfile>>;

    /// Insert or overwrite the record for `user_id`, returning what was stored
    fn upsert(&self, user_id: &str, result: &DevMeterResult) -> StoreResult<DevMeterResult>;

    /// Record for `user_id`, if any
    fn get(&self, user_id: &str) -> StoreResult<Option<DevMeterResult>>;

    /// All stored records
    fn list(&self) -> StoreResult<Vec<DevMeterResult>>;

    /// Record by id, falling back to a case-insensitive login match
    fn find(&self, id_or_login: &str) -> StoreResult<Option<DevMeterResult>> {
        if let Some(found) = self.get(id_or_login)? {
            return Ok(Some(found));
        }
        Ok(self
            .list()?
            .into_iter()
            .find(|r| r.username.eq_ignore_ascii_case(id_or_login)))
    }
}

/// Stored copy of `result` keyed to `user_id`
fn keyed(user_id: &str, result: &DevMeterResult) -> DevMeterResult {
    let mut stored = result.clone();
    stored.user_github_id = user_id.to_string();
    stored
}
