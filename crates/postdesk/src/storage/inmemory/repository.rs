//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use postdesk_core::post::{record_key, Record, UpdateExpression, POST_ID};
use postdesk_core::storage::{RecordStore, Result, StoreError, WriteAck};

/// In-memory record store.
///
/// Mirrors DynamoDB defaults: puts overwrite, updates upsert, deleting an
/// absent key succeeds. Records are kept ordered by key, so scans are
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<RwLock<BTreeMap<String, Record>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl RecordStore for InMemoryRepository {
    async fn get_record(&self, key: &str) -> Result<Option<Record>> {
        let records = self.records.read().await;
        Ok(records.get(key).cloned())
    }

    async fn put_record(&self, record: &Record) -> Result<WriteAck> {
        let key = record_key(record)
            .map_err(|e| StoreError::InvalidData(e.to_string()))?
            .to_string();

        let mut records = self.records.write().await;
        records.insert(key, record.clone());
        Ok(WriteAck::default())
    }

    async fn update_record(&self, key: &str, update: &UpdateExpression) -> Result<WriteAck> {
        if update.assignments().any(|(field, _)| field == POST_ID) {
            return Err(StoreError::QueryFailed(format!(
                "Cannot update attribute {POST_ID}. This attribute is part of the key"
            )));
        }

        let mut records = self.records.write().await;
        let record = records.entry(key.to_string()).or_insert_with(|| {
            let mut record = Record::new();
            record.insert(POST_ID.to_string(), Value::String(key.to_string()));
            record
        });

        let mut updated = Record::new();
        for (field, value) in update.assignments() {
            record.insert(field.to_string(), value.clone());
            updated.insert(field.to_string(), value.clone());
        }

        Ok(WriteAck::default().with_attributes(updated))
    }

    async fn delete_record(&self, key: &str) -> Result<WriteAck> {
        let mut records = self.records.write().await;
        match records.remove(key) {
            Some(old) => Ok(WriteAck::default().with_attributes(old)),
            None => Ok(WriteAck::default()),
        }
    }

    async fn scan_records(&self) -> Result<Vec<Record>> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }
}
