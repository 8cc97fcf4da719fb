//! Post operations.
//!
//! Each operation makes exactly one store call and turns its outcome into an
//! [`Envelope`]. Failures of any kind become a 500 envelope and are logged.

use std::sync::Arc;

use serde_json::{Map, Value};

use postdesk_core::post::{
    build_set_expression, messages, parse_record_body, record_key, record_to_attribute_json,
    Envelope, ErrorKind, Invocation, RequestError, POST_ID,
};
use postdesk_core::storage::{RecordStore, StoreError, WriteAck};

type Fields = Map<String, Value>;

/// The post operations, for logging and envelope messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    GetAll,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::Get => "get_post",
            Operation::GetAll => "get_all_posts",
            Operation::Create => "create_post",
            Operation::Update => "update_post",
            Operation::Delete => "delete_post",
        }
    }

    fn succeeded(self) -> &'static str {
        match self {
            Operation::Get => messages::GET_OK,
            Operation::GetAll => messages::GET_ALL_OK,
            Operation::Create => messages::CREATE_OK,
            Operation::Update => messages::UPDATE_OK,
            Operation::Delete => messages::DELETE_OK,
        }
    }

    fn failed(self) -> &'static str {
        match self {
            Operation::Get => messages::GET_FAILED,
            Operation::GetAll => messages::GET_ALL_FAILED,
            Operation::Create => messages::CREATE_FAILED,
            Operation::Update => messages::UPDATE_FAILED,
            Operation::Delete => messages::DELETE_FAILED,
        }
    }
}

/// The five post operations over an injected record store.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn RecordStore>,
}

impl PostService {
    /// Creates a service backed by the given store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Fetch one post by its `postId` path parameter.
    ///
    /// A missing post is not an error: `data` is an empty object.
    pub async fn get_post(&self, invocation: &Invocation) -> Envelope {
        let outcome = self.try_get_post(invocation).await;
        respond(Operation::Get, invocation, outcome)
    }

    /// Fetch every post from a single scan page.
    pub async fn get_all_posts(&self, invocation: &Invocation) -> Envelope {
        let outcome = self.try_get_all_posts().await;
        respond(Operation::GetAll, invocation, outcome)
    }

    /// Write the request body as a post, replacing any post with the same key.
    pub async fn create_post(&self, invocation: &Invocation) -> Envelope {
        let outcome = self.try_create_post(invocation).await;
        respond(Operation::Create, invocation, outcome)
    }

    /// Set every field of the request body on the post named by `postId`.
    pub async fn update_post(&self, invocation: &Invocation) -> Envelope {
        let outcome = self.try_update_post(invocation).await;
        respond(Operation::Update, invocation, outcome)
    }

    /// Delete the post named by `postId`. Deleting a missing post succeeds.
    pub async fn delete_post(&self, invocation: &Invocation) -> Envelope {
        let outcome = self.try_delete_post(invocation).await;
        respond(Operation::Delete, invocation, outcome)
    }

    /// Failure envelope for a request that could not be turned into an
    /// invocation at all.
    pub fn reject(&self, operation: Operation, error: RequestError) -> Envelope {
        failure(operation, None, error)
    }

    async fn try_get_post(&self, invocation: &Invocation) -> Result<Fields, RequestError> {
        let post_id = invocation.post_id()?;
        let record = self.store.get_record(post_id).await?;

        let mut fields = Fields::new();
        match record {
            Some(record) => {
                let raw = record_to_attribute_json(&record);
                fields.insert("data".to_string(), Value::Object(record));
                fields.insert("rawData".to_string(), raw);
            }
            None => {
                tracing::debug!(post_id, "Post not found");
                fields.insert("data".to_string(), Value::Object(Map::new()));
            }
        }
        Ok(fields)
    }

    async fn try_get_all_posts(&self) -> Result<Fields, RequestError> {
        let records = self.store.scan_records().await?;

        let raw: Vec<Value> = records.iter().map(record_to_attribute_json).collect();
        let data: Vec<Value> = records.into_iter().map(Value::Object).collect();

        tracing::debug!(count = data.len(), "Retrieved posts");

        let mut fields = Fields::new();
        fields.insert("data".to_string(), Value::Array(data));
        fields.insert("Items".to_string(), Value::Array(raw));
        Ok(fields)
    }

    async fn try_create_post(&self, invocation: &Invocation) -> Result<Fields, RequestError> {
        let record = parse_record_body(&invocation.body)?;
        let post_id = record_key(&record)?;

        let ack = self.store.put_record(&record).await?;
        tracing::info!(post_id, "Created post");

        ack_fields("createResult", &ack)
    }

    async fn try_update_post(&self, invocation: &Invocation) -> Result<Fields, RequestError> {
        let post_id = invocation.post_id()?;
        let changes = parse_record_body(&invocation.body)?;
        let update = build_set_expression(&changes)?;

        let ack = self.store.update_record(post_id, &update).await?;
        tracing::info!(post_id, fields = update.names.len(), "Updated post");

        ack_fields("updateResult", &ack)
    }

    async fn try_delete_post(&self, invocation: &Invocation) -> Result<Fields, RequestError> {
        let post_id = invocation.post_id()?;

        let ack = self.store.delete_record(post_id).await?;
        tracing::info!(post_id, "Deleted post");

        ack_fields("deleteResult", &ack)
    }
}

/// Wrap a write acknowledgment under `name`.
fn ack_fields(name: &str, ack: &WriteAck) -> Result<Fields, RequestError> {
    let ack = serde_json::to_value(ack).map_err(|e| StoreError::Serialization(e.to_string()))?;

    let mut fields = Fields::new();
    fields.insert(name.to_string(), ack);
    Ok(fields)
}

/// Turn an operation outcome into its envelope.
fn respond(
    operation: Operation,
    invocation: &Invocation,
    outcome: Result<Fields, RequestError>,
) -> Envelope {
    match outcome {
        Ok(fields) => Envelope::success(operation.succeeded(), fields),
        Err(error) => {
            let post_id = invocation.path_parameters.get(POST_ID).map(String::as_str);
            failure(operation, post_id, error)
        }
    }
}

/// Log a failed operation and build its 500 envelope.
fn failure(operation: Operation, post_id: Option<&str>, error: RequestError) -> Envelope {
    let name = operation.name();

    match error.kind() {
        ErrorKind::Validation => {
            tracing::warn!(operation = name, post_id, error = %error, "Rejected invalid request");
        }
        ErrorKind::Store => {
            tracing::error!(operation = name, post_id, error = %error, "Store request failed");
        }
    }

    Envelope::failure(operation.failed(), &error)
}
