//! DynamoDB repository implementation.
//!
//! Implements `RecordStore` from `postdesk_core::storage` using DynamoDB.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::RequestId;
use aws_sdk_dynamodb::types::{AttributeValue, ConsumedCapacity, ReturnConsumedCapacity, ReturnValue};
use aws_sdk_dynamodb::Client;

use postdesk_core::post::{Record, UpdateExpression, POST_ID};
use postdesk_core::storage::{RecordStore, Result, StoreError, WriteAck};

use super::conversions::{item_to_record, record_to_item, value_to_attribute};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_scan_error,
    map_update_item_error,
};
use crate::config::Config;

/// DynamoDB-based record store.
///
/// Holds one long-lived SDK client. The client is cheap to clone and safe to
/// share across concurrent requests.
#[derive(Debug, Clone)]
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new repository from application configuration.
    ///
    /// Uses the AWS SDK default credential chain, with optional region and
    /// endpoint overrides.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(region) = &config.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        Self::new(Client::new(&sdk_config), config.table_name.clone())
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl RecordStore for DynamoDbRepository {
    async fn get_record(&self, key: &str) -> Result<Option<Record>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(POST_ID, AttributeValue::S(key.to_string()))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_record(&item)?)),
            None => Ok(None),
        }
    }

    async fn put_record(&self, record: &Record) -> Result<WriteAck> {
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_to_item(record)))
            .return_consumed_capacity(ReturnConsumedCapacity::Total)
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(write_ack(result.request_id(), result.consumed_capacity()))
    }

    async fn update_record(&self, key: &str, update: &UpdateExpression) -> Result<WriteAck> {
        let (names, values) = expression_attributes(update);

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(POST_ID, AttributeValue::S(key.to_string()))
            .update_expression(&update.expression)
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .return_values(ReturnValue::UpdatedNew)
            .return_consumed_capacity(ReturnConsumedCapacity::Total)
            .send()
            .await
            .map_err(map_update_item_error)?;

        let ack = write_ack(result.request_id(), result.consumed_capacity());
        match &result.attributes {
            Some(attributes) => Ok(ack.with_attributes(item_to_record(attributes)?)),
            None => Ok(ack),
        }
    }

    async fn delete_record(&self, key: &str) -> Result<WriteAck> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(POST_ID, AttributeValue::S(key.to_string()))
            .return_values(ReturnValue::AllOld)
            .return_consumed_capacity(ReturnConsumedCapacity::Total)
            .send()
            .await
            .map_err(map_delete_item_error)?;

        let ack = write_ack(result.request_id(), result.consumed_capacity());
        match &result.attributes {
            Some(attributes) => Ok(ack.with_attributes(item_to_record(attributes)?)),
            None => Ok(ack),
        }
    }

    async fn scan_records(&self) -> Result<Vec<Record>> {
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(map_scan_error)?;

        if result.last_evaluated_key.is_some() {
            tracing::warn!(
                table = %self.table_name,
                returned = result.count,
                "Scan result truncated, returning first page only"
            );
        }

        let items = result.items.unwrap_or_default();
        items
            .iter()
            .map(item_to_record)
            .collect::<std::result::Result<Vec<_>, StoreError>>()
    }
}

/// Placeholder maps for an update: `#keyN` to field name, `:valueN` to value.
fn expression_attributes(
    update: &UpdateExpression,
) -> (HashMap<String, String>, HashMap<String, AttributeValue>) {
    let names = update.names.iter().cloned().collect();
    let values = update
        .values
        .iter()
        .map(|(placeholder, value)| (placeholder.clone(), value_to_attribute(value)))
        .collect();
    (names, values)
}

/// Build a write acknowledgment from response metadata.
fn write_ack(request_id: Option<&str>, capacity: Option<&ConsumedCapacity>) -> WriteAck {
    WriteAck {
        request_id: request_id.map(str::to_string),
        consumed_capacity: capacity.and_then(ConsumedCapacity::capacity_units),
        attributes: None,
    }
}
