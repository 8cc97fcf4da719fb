use std::collections::HashMap;

use super::{RequestError, POST_ID};

/// The parts of an HTTP-style invocation the handlers consume.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub path_parameters: HashMap<String, String>,
    /// Raw request body. Empty when the request carried none.
    pub body: Vec<u8>,
}

impl Invocation {
    /// Create an invocation with no path parameters and no body.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a path parameter.
    pub fn with_path_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_parameters.insert(name.into(), value.into());
        self
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// The `postId` path parameter.
    pub fn post_id(&self) -> Result<&str, RequestError> {
        self.path_parameters
            .get(POST_ID)
            .map(String::as_str)
            .ok_or(RequestError::MissingPathParameter(POST_ID))
    }
}
