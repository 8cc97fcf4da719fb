use async_trait::async_trait;

use crate::post::{Record, UpdateExpression};

use super::{Result, WriteAck};

/// Single-table key-value store addressed by the `postId` key.
///
/// Every method is one remote call. Implementations must be safe to share
/// across concurrent invocations.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Gets the record with the given key, `None` when absent.
    async fn get_record(&self, key: &str) -> Result<Option<Record>>;

    /// Writes a record, replacing any record with the same key.
    async fn put_record(&self, record: &Record) -> Result<WriteAck>;

    /// Applies a `SET` update to the record with the given key.
    async fn update_record(&self, key: &str, update: &UpdateExpression) -> Result<WriteAck>;

    /// Deletes the record with the given key. Deleting an absent key succeeds.
    async fn delete_record(&self, key: &str) -> Result<WriteAck>;

    /// Returns the records of a single scan page, in store order.
    async fn scan_records(&self) -> Result<Vec<Record>>;
}
