use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use shared::domain::{Record, RecordKind};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("record id '{0}' already exists")]
    DuplicateId(String),
}

/// Process-memory collection of intake records.
///
/// Records are kept in insertion order. Every accessor hands back owned
/// copies, so callers never hold a reference into the collection. Only
/// `status` can change once a record is stored, and nothing is ever removed.
#[derive(Clone)]
pub struct SubmissionStore<T> {
    inner: Arc<RwLock<Collection<T>>>,
}

struct Collection<T> {
    records: Vec<Record<T>>,
    last_issued_ms: i64,
}

impl<T: RecordKind> Collection<T> {
    fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|record| record.id == id)
    }

    /// Millisecond ids are strictly increasing, so two submissions landing in
    /// the same millisecond still get distinct ids.
    fn next_id(&mut self, now_ms: i64) -> String {
        let mut issued = now_ms.max(self.last_issued_ms + 1);
        let mut id = format!("{}{issued}", T::ID_PREFIX);
        while self.contains(&id) {
            issued += 1;
            id = format!("{}{issued}", T::ID_PREFIX);
        }
        self.last_issued_ms = issued;
        id
    }
}

impl<T: RecordKind> Default for SubmissionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RecordKind> SubmissionStore<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Collection {
                records: Vec::new(),
                last_issued_ms: i64::MIN,
            })),
        }
    }

    /// Stores `data` as a new record stamped with the current time.
    pub async fn create(&self, data: T) -> Record<T> {
        self.create_at(data, Utc::now()).await
    }

    /// Timestamps are kept at millisecond precision, the same clock the id is
    /// minted from.
    pub async fn create_at(&self, data: T, timestamp: DateTime<Utc>) -> Record<T> {
        let timestamp = timestamp.trunc_subsecs(3);
        let mut collection = self.inner.write().await;
        let record = Record {
            id: collection.next_id(timestamp.timestamp_millis()),
            timestamp,
            data,
            status: T::INITIAL_STATUS.to_string(),
        };
        collection.records.push(record.clone());
        record
    }

    pub async fn append(&self, record: Record<T>) -> Result<(), StorageError> {
        let mut collection = self.inner.write().await;
        if collection.contains(&record.id) {
            return Err(StorageError::DuplicateId(record.id));
        }
        collection.records.push(record);
        Ok(())
    }

    /// All records, most recent first. Equal timestamps keep insertion order.
    pub async fn list_all(&self) -> Vec<Record<T>> {
        let mut records = self.inner.read().await.records.clone();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records
    }

    pub async fn find_by_id(&self, id: &str) -> Option<Record<T>> {
        self.inner
            .read()
            .await
            .records
            .iter()
            .find(|record| record.id == id)
            .cloned()
    }

    /// Overwrites the status of the matching record. Any string is accepted.
    pub async fn update_status(&self, id: &str, status: &str) -> Option<Record<T>> {
        let mut collection = self.inner.write().await;
        let record = collection
            .records
            .iter_mut()
            .find(|record| record.id == id)?;
        record.status = status.to_string();
        Some(record.clone())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
