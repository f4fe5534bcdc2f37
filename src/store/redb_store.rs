//! Persistent metrics store on redb
//!
//! Single-file ACID store. Metrics and user records are JSON-encoded
//! under the user id, in separate tables.

use super::{keyed, MetricsStore, StoreResult};
use crate::models::{DevMeterResult, UserProfile};
use redb::{ReadableTable, TableDefinition};
use std::path::Path;
use tracing::debug;

// redb table definitions
const METRICS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("metrics");
const USERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

type JsonTable = TableDefinition<'static, &'static str, &'static [u8]>;

pub struct RedbMetricsStore {
    db: redb::Database,
}

impl RedbMetricsStore {
    /// Create or open the store file at `path`
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let db = redb::Database::create(path).map_err(redb::Error::from)?;

        // Make sure the tables exist so reads on a fresh file succeed
        let write_txn = db.begin_write().map_err(redb::Error::from)?;
        write_txn.open_table(METRICS_TABLE).map_err(redb::Error::from)?;
        write_txn.open_table(USERS_TABLE).map_err(redb::Error::from)?;
        write_txn.commit().map_err(redb::Error::from)?;

        debug!("Opened metrics store at {}", path.display());
        Ok(Self { db })
    }

    fn put(&self, table: JsonTable, key: &str, value: &[u8]) -> StoreResult<()> {
        let write_txn = self.db.begin_write().map_err(redb::Error::from)?;
        {
            let mut table = write_txn.open_table(table).map_err(redb::Error::from)?;
            table.insert(key, value).map_err(redb::Error::from)?;
        }
        write_txn.commit().map_err(redb::Error::from)?;
        Ok(())
    }

    fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        table: JsonTable,
        key: &str,
    ) -> StoreResult<Option<T>> {
        let read_txn = self.db.begin_read().map_err(redb::Error::from)?;
        let table = read_txn.open_table(table).map_err(redb::Error::from)?;

        match table.get(key).map_err(redb::Error::from)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }
}

impl MetricsStore for RedbMetricsStore {
    fn upsert_user(&self, profile: &UserProfile) -> StoreResult<UserProfile> {
        self.put(USERS_TABLE, &profile.id, &serde_json::to_vec(profile)?)?;
        debug!("Stored user {} ({})", profile.login, profile.id);
        Ok(profile.clone())
    }

    fn get_user(&self, user_id: &str) -> StoreResult<Option<UserProfile>> {
        self.fetch(USERS_TABLE, user_id)
    }

    fn upsert(&self, user_id: &str, result: &DevMeterResult) -> StoreResult<DevMeterResult> {
        let stored = keyed(user_id, result);
        self.put(METRICS_TABLE, user_id, &serde_json::to_vec(&stored)?)?;

        debug!("Stored metrics for user {}", user_id);
        Ok(stored)
    }

    fn get(&self, user_id: &str) -> StoreResult<Option<DevMeterResult>> {
        self.fetch(METRICS_TABLE, user_id)
    }

    fn list(&self) -> StoreResult<Vec<DevMeterResult>> {
        let read_txn = self.db.begin_read().map_err(redb::Error::from)?;
        let table = read_txn
            .open_table(METRICS_TABLE)
            .map_err(redb::Error::from)?;

        let mut records = Vec::new();
        for entry in table.iter().map_err(redb::Error::from)? {
            let (_, value) = entry.map_err(redb::Error::from)?;
            records.push(serde_json::from_slice(value.value())?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::sample_result;

    #[test]
    fn test_roundtrip_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = RedbMetricsStore::open(&dir.path().join("metrics.redb")).unwrap();

        assert!(store.get("1").unwrap().is_none());

        store.upsert("1", &sample_result("1", "octocat", 12)).unwrap();
        store.upsert("1", &sample_result("1", "octocat", 67)).unwrap();
        store.upsert("2", &sample_result("2", "hubot", 30)).unwrap();

        let stored = store.get("1").unwrap().unwrap();
        assert_eq!(stored.dev_meter_score, 67);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("metrics.redb");
        {
            let store = RedbMetricsStore::open(&path).unwrap();
            store.upsert("7", &sample_result("7", "octocat", 91)).unwrap();
        }
        let store = RedbMetricsStore::open(&path).unwrap();
        let stored = store.find("octocat").unwrap().unwrap();
        assert_eq!(stored.user_github_id, "7");
        assert_eq!(stored.dev_meter_tier.as_str(), "Cracked");
    }

    #[test]
    fn test_users_table_is_separate() {
        use chrono::{TimeZone, Utc};

        let dir = tempfile::tempdir().unwrap();
        let store = RedbMetricsStore::open(&dir.path().join("metrics.redb")).unwrap();
        let mut profile = UserProfile {
            id: "7".to_string(),
            login: "octocat".to_string(),
            name: Some("Octo".to_string()),
            avatar_url: None,
            email: Some("octo@example.com".to_string()),
            created_at: Utc.with_ymd_and_hms(2011, 1, 25, 0, 0, 0).unwrap(),
        };

        store.upsert_user(&profile).unwrap();
        profile.name = Some("The Octocat".to_string());
        store.upsert_user(&profile).unwrap();

        let stored = store.get_user("7").unwrap().unwrap();
        assert_eq!(stored.name.as_deref(), Some("The Octocat"));
        assert_eq!(stored.email.as_deref(), Some("octo@example.com"));
        assert!(store.get("7").unwrap().is_none());
        assert!(store.get_user("8").unwrap().is_none());
    }
}
