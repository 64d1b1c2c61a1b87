//! msm-db - Data store abstraction for mongo-schema-manager
//!
//! This crate provides the `DataStore` trait and its MongoDB
//! implementation, plus a recording in-memory store for tests.

pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod mongo;
pub mod traits;

pub use error::{DbError, DbResult};
#[cfg(any(test, feature = "test-support"))]
pub use memory::{InMemoryStore, StoreCall};
pub use mongo::MongoBackend;
pub use traits::{DataStore, ENUMERATORS_COLLECTION, VERSION_COLLECTION};
