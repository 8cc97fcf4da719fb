//! In-memory storage backend.
//!
//! This module provides an in-memory implementation of `RecordStore` that
//! keeps all records in a `BTreeMap` wrapped in `Arc<RwLock<_>>`. It follows
//! DynamoDB's default semantics and is used for local runs and tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
