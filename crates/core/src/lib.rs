//! Functional core for postdesk.
//!
//! Pure data types and functions shared by the request handlers and the store
//! backends. Nothing in this crate performs I/O.

pub mod post;
pub mod storage;
