use async_trait::async_trait;

use crate::key::{Record, RecordKey};
use crate::page::{Page, PageRequest};
use crate::query::QuerySpec;

use super::Result;

/// Repository operations over a single record type.
///
/// Every operation except the paged ones is a direct pass-through to the
/// backing store. The paged operations (`query_page`, `scan_page`)
/// emulate offset pagination by consuming the store's forward-only
/// iteration with bounded look-ahead; their total counts are estimates
/// (see [`Page`]).
#[async_trait]
pub trait Repository<R: Record>: Send + Sync {
    /// Loads a record by its primary key.
    async fn get(&self, key: &RecordKey) -> Result<Option<R>>;

    /// Stores a new record; fails if the key already exists.
    async fn create(&self, record: &R) -> Result<()>;

    /// Replaces an existing record; fails if the key does not exist.
    async fn update(&self, record: &R) -> Result<()>;

    /// Stores a record unconditionally (upsert).
    async fn save(&self, record: &R) -> Result<()>;

    /// Deletes a record by its primary key; fails if the key does not
    /// exist.
    async fn delete(&self, key: &RecordKey) -> Result<()>;

    /// Returns every record in the table. Requires the `find_all` scan
    /// permission.
    async fn find_all(&self) -> Result<Vec<R>>;

    /// Counts the records in the table. Requires the `count` scan
    /// permission.
    async fn count(&self) -> Result<u64>;

    /// Deletes every record in the table, returning how many were
    /// removed. Requires the `delete_all` scan permission.
    async fn delete_all(&self) -> Result<u64>;

    /// Returns every record matching the query, in sort-key order.
    async fn query(&self, spec: &QuerySpec) -> Result<Vec<R>>;

    /// Returns one page of the records matching the query.
    async fn query_page(&self, spec: &QuerySpec, page: &PageRequest) -> Result<Page<R>>;

    /// Returns one page of a full-table scan. Requires the `find_all`
    /// scan permission.
    async fn scan_page(&self, page: &PageRequest) -> Result<Page<R>>;
}
