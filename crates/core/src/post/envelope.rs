//! Uniform response envelopes.
//!
//! Every operation produces exactly one [`Envelope`]: a status code and a
//! JSON-encoded body. Success bodies carry a `message` plus operation
//! specific fields; failure bodies carry `message`, `errorMsg` and
//! `errorStack`.

use std::error::Error;

use serde_json::{Map, Value};

/// Human-readable messages for each operation outcome.
pub mod messages {
    pub const GET_OK: &str = "Successfully retrieved post.";
    pub const GET_FAILED: &str = "Failed to get post.";
    pub const GET_ALL_OK: &str = "Successfully retrieved all posts.";
    pub const GET_ALL_FAILED: &str = "Failed to retrieve posts.";
    pub const CREATE_OK: &str = "Successfully created post.";
    pub const CREATE_FAILED: &str = "Failed to create post.";
    pub const UPDATE_OK: &str = "Successfully updated post.";
    pub const UPDATE_FAILED: &str = "Failed to update post.";
    pub const DELETE_OK: &str = "Successfully deleted post.";
    pub const DELETE_FAILED: &str = "Failed to delete post.";
}

/// HTTP-style response: status code plus JSON body string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub status_code: u16,
    pub body: String,
}

impl Envelope {
    /// A 200 envelope with `message` followed by `fields`.
    pub fn success(message: &str, fields: Map<String, Value>) -> Self {
        let mut body = Map::with_capacity(fields.len() + 1);
        body.insert("message".to_string(), Value::String(message.to_string()));
        body.extend(fields);

        Self {
            status_code: 200,
            body: Value::Object(body).to_string(),
        }
    }

    /// A 500 envelope describing `error`.
    pub fn failure(message: &str, error: &(dyn Error + 'static)) -> Self {
        let mut body = Map::with_capacity(3);
        body.insert("message".to_string(), Value::String(message.to_string()));
        body.insert("errorMsg".to_string(), Value::String(error.to_string()));
        body.insert("errorStack".to_string(), Value::String(error_stack(error)));

        Self {
            status_code: 500,
            body: Value::Object(body).to_string(),
        }
    }

    /// Parse the body back into JSON.
    pub fn json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

/// Debug form of the error followed by its cause chain, one per line.
fn error_stack(error: &(dyn Error + 'static)) -> String {
    let mut stack = format!("{error:?}");
    let mut source = error.source();
    while let Some(cause) = source {
        stack.push_str("\nCaused by: ");
        stack.push_str(&cause.to_string());
        source = cause.source();
    }
    stack
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::RequestError;
    use crate::storage::StoreError;
    use serde_json::json;

    #[derive(Debug, thiserror::Error)]
    #[error("outer failure")]
    struct Outer(#[source] StoreError);

    #[test]
    fn test_success_envelope() {
        let mut fields = Map::new();
        fields.insert("data".to_string(), json!({"postId": "p1"}));

        let envelope = Envelope::success(messages::GET_OK, fields);

        assert_eq!(envelope.status_code, 200);
        assert_eq!(
            envelope.json().unwrap(),
            json!({"message": "Successfully retrieved post.", "data": {"postId": "p1"}})
        );
    }

    #[test]
    fn test_success_envelope_message_comes_first() {
        let mut fields = Map::new();
        fields.insert("data".to_string(), json!([]));

        let envelope = Envelope::success(messages::GET_ALL_OK, fields);

        assert!(envelope.body.starts_with(r#"{"message":"#));
    }

    #[test]
    fn test_failure_envelope() {
        let error = RequestError::Store(StoreError::ConnectionFailed("timeout".to_string()));
        let envelope = Envelope::failure(messages::DELETE_FAILED, &error);

        assert_eq!(envelope.status_code, 500);

        let body = envelope.json().unwrap();
        assert_eq!(body["message"], "Failed to delete post.");
        assert_eq!(body["errorMsg"], "Connection failed: timeout");
        assert!(body["errorStack"]
            .as_str()
            .unwrap()
            .contains("ConnectionFailed"));
    }

    #[test]
    fn test_failure_stack_includes_causes() {
        let error = Outer(StoreError::Throttled("slow down".to_string()));
        let envelope = Envelope::failure(messages::UPDATE_FAILED, &error);

        let body = envelope.json().unwrap();
        assert_eq!(body["errorMsg"], "outer failure");
        assert!(body["errorStack"]
            .as_str()
            .unwrap()
            .ends_with("Caused by: Throttled: slow down"));
    }
}
