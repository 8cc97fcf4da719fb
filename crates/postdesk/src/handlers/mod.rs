pub mod health;
pub mod posts;
pub mod response;

pub use response::EnvelopeResponse;
