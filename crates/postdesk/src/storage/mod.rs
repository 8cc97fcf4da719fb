//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `RecordStore` trait
//! defined in `postdesk_core::storage`. The backend is selected at startup
//! through the `STORE_BACKEND` environment variable.
//!
//! - `dynamodb` (default): AWS DynamoDB using `aws-sdk-dynamodb`
//! - `memory`: process-local store, data is lost on exit

pub mod dynamodb;
pub mod inmemory;

use std::sync::Arc;

use postdesk_core::storage::RecordStore;

use crate::config::{Config, StoreBackend};

pub use dynamodb::DynamoDbRepository;
pub use inmemory::InMemoryRepository;

/// Build the store selected by the configuration.
pub async fn build_store(config: &Config) -> Arc<dyn RecordStore> {
    match config.backend {
        StoreBackend::Dynamodb => {
            let repo = DynamoDbRepository::from_config(config).await;
            tracing::info!(
                table = %repo.table_name(),
                endpoint = config.endpoint_url.as_deref().unwrap_or("default"),
                "Using DynamoDB store"
            );
            Arc::new(repo)
        }
        StoreBackend::Memory => {
            tracing::info!("Using in-memory store");
            Arc::new(InMemoryRepository::new())
        }
    }
}
