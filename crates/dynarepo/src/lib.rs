//! Repository-pattern data access for Amazon DynamoDB.
//!
//! This crate provides concrete implementations of the repository
//! contract defined in `dynarepo_core`. Backends are selected via
//! feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): in-memory backend for testing and development
//! - `dynamodb`: AWS DynamoDB backend using `aws-sdk-dynamodb`
//!
//! # Examples
//!
//! Build with the in-memory backend only (default):
//! ```bash
//! cargo build -p dynarepo
//! ```
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p dynarepo --features dynamodb
//! ```

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "inmemory")]
pub mod memory;

// Re-export the core contracts so depending on this crate alone is
// enough for typical use.
pub use dynarepo_core::key::{KeyValue, Record, RecordKey};
pub use dynarepo_core::page::{read_page, Page, PageRequest, PageRequestError};
pub use dynarepo_core::query::{KeyCondition, QuerySpec, SortCondition};
pub use dynarepo_core::repository::{Repository, RepositoryError, Result, ScanPermissions};
pub use dynarepo_core::schema::{
    AttributeType, BillingMode, IndexSchema, KeyAttribute, Projection, SchemaError, TableSchema,
};

#[cfg(feature = "dynamodb")]
pub use dynamodb::{DynamoConfig, DynamoRecord, DynamoRepository};

#[cfg(feature = "inmemory")]
pub use memory::MemoryRepository;
