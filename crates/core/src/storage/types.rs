use serde::Serialize;

use crate::post::Record;

/// Acknowledgment returned by the store for a write.
///
/// Echoed back to the caller as `createResult`, `updateResult` or
/// `deleteResult`. Fields the backend does not report are left out of the
/// JSON form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteAck {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<f64>,
    /// Attributes returned by the write (updated values, or the deleted item).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Record>,
}

impl WriteAck {
    /// Set the attributes returned by the write.
    pub fn with_attributes(mut self, attributes: Record) -> Self {
        self.attributes = Some(attributes);
        self
    }
}
