use thiserror::Error;

use crate::storage::StoreError;

/// Broad classification of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The invocation itself was unusable (missing key, malformed body, ...).
    Validation,
    /// The store rejected the call or could not be reached.
    Store,
}

/// Errors that can occur while serving a post request.
///
/// Every variant ends up in the same 500 envelope; the split only drives
/// logging.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Missing path parameter: {0}")]
    MissingPathParameter(&'static str),
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
    #[error("Request body must be a JSON object")]
    BodyNotObject,
    #[error("Record is missing the {0} key")]
    MissingKey(&'static str),
    #[error("Invalid {field} key: {reason}")]
    InvalidKey {
        field: &'static str,
        reason: &'static str,
    },
    #[error("Update body contains no fields")]
    EmptyUpdate,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RequestError {
    /// Returns whether the failure came from the input or from the store.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RequestError::Store(_) => ErrorKind::Store,
            _ => ErrorKind::Validation,
        }
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::InvalidBody(err.to_string())
    }
}
