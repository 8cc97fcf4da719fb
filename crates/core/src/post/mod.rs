mod envelope;
mod error;
mod expression;
mod invocation;
mod record;

pub use envelope::{messages, Envelope};
pub use error::{ErrorKind, RequestError};
pub use expression::{build_set_expression, UpdateExpression};
pub use invocation::Invocation;
pub use record::{
    parse_record_body, record_key, record_to_attribute_json, to_attribute_json, Record, POST_ID,
};
