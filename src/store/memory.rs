//! In-memory metrics store, for tests and embedding

use super::{keyed, MetricsStore, StoreResult};
use crate::models::{DevMeterResult, UserProfile};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    records: HashMap<String, DevMeterResult>,
    users: HashMap<String, UserProfile>,
}

#[derive(Default)]
pub struct InMemoryMetricsStore {
    tables: RwLock<Tables>,
}

impl InMemoryMetricsStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Lock poisoning means a writer panicked mid-update; there is nothing
    // sensible to recover, so these helpers panic with a clear message.

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables
            .read()
            .expect("metrics lock poisoned: a thread panicked while holding this lock")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables
            .write()
            .expect("metrics lock poisoned: a thread panicked while holding this lock")
    }

    /// Number of metrics records
    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().records.is_empty()
    }
}

impl MetricsStore for InMemoryMetricsStore {
    fn upsert_user(&self, profile: &UserProfile) -> StoreResult<UserProfile> {
        self.write().users.insert(profile.id.clone(), profile.clone());
        Ok(profile.clone())
    }

    fn get_user(&self, user_id: &str) -> StoreResult<Option<UserProfile>> {
        Ok(self.read().users.get(user_id).cloned())
    }

    fn upsert(&self, user_id: &str, result: &DevMeterResult) -> StoreResult<DevMeterResult> {
        let stored = keyed(user_id, result);
        self.write().records.insert(user_id.to_string(), stored.clone());
        Ok(stored)
    }

    fn get(&self, user_id: &str) -> StoreResult<Option<DevMeterResult>> {
        Ok(self.read().records.get(user_id).cloned())
    }

    fn list(&self) -> StoreResult<Vec<DevMeterResult>> {
        let mut records: Vec<_> = self.read().records.values().cloned().collect();
        records.sort_by(|a, b| a.user_github_id.cmp(&b.user_github_id));
        Ok(records)
    }
}
