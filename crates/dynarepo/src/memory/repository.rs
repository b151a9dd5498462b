//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream;
use tokio::sync::RwLock;

use dynarepo_core::key::{Record, RecordKey};
use dynarepo_core::page::{read_page, Page, PageRequest};
use dynarepo_core::query::QuerySpec;
use dynarepo_core::repository::{Repository, RepositoryError, Result, ScanPermissions};

/// In-memory storage backend.
///
/// Records live in a `BTreeMap` keyed by their primary key, so iteration
/// order is stable across calls and paged reads over unchanged data are
/// reproducible, matching the store's per-partition sort order for
/// string keys.
///
/// Queries run against the primary key only; this backend has no
/// secondary indexes.
#[derive(Debug, Clone)]
pub struct MemoryRepository<R> {
    records: Arc<RwLock<BTreeMap<RecordKey, R>>>,
    scan_permissions: ScanPermissions,
}

impl<R: Record + Clone> Default for MemoryRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record + Clone> MemoryRepository<R> {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(BTreeMap::new())),
            scan_permissions: ScanPermissions::none(),
        }
    }

    /// Sets the scan permissions for this repository.
    pub fn with_scan_permissions(mut self, permissions: ScanPermissions) -> Self {
        self.scan_permissions = permissions;
        self
    }

    fn entity(&self) -> String {
        R::schema().table_name.clone()
    }

    /// Collects the records matching a query, in key order.
    async fn matching(&self, spec: &QuerySpec) -> Result<Vec<R>> {
        if let Some(index) = spec.index() {
            return Err(RepositoryError::QueryFailed(format!(
                "Index queries are not supported by the in-memory backend (index: {index})"
            )));
        }

        let records = self.records.read().await;
        let mut matches: Vec<R> = records
            .iter()
            .filter(|(key, _)| spec.key().matches(key))
            .map(|(_, record)| record.clone())
            .collect();
        if spec.is_descending() {
            matches.reverse();
        }
        Ok(matches)
    }
}

#[async_trait]
impl<R: Record + Clone> Repository<R> for MemoryRepository<R> {
    async fn get(&self, key: &RecordKey) -> Result<Option<R>> {
        let records = self.records.read().await;
        Ok(records.get(key).cloned())
    }

    async fn create(&self, record: &R) -> Result<()> {
        let mut records = self.records.write().await;
        let key = record.key();
        if records.contains_key(&key) {
            return Err(RepositoryError::AlreadyExists {
                entity: self.entity(),
                key: key.to_string(),
            });
        }
        records.insert(key, record.clone());
        Ok(())
    }

    async fn update(&self, record: &R) -> Result<()> {
        let mut records = self.records.write().await;
        let key = record.key();
        if !records.contains_key(&key) {
            return Err(RepositoryError::NotFound {
                entity: self.entity(),
                key: key.to_string(),
            });
        }
        records.insert(key, record.clone());
        Ok(())
    }

    async fn save(&self, record: &R) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.key(), record.clone());
        Ok(())
    }

    async fn delete(&self, key: &RecordKey) -> Result<()> {
        let mut records = self.records.write().await;
        if records.remove(key).is_none() {
            return Err(RepositoryError::NotFound {
                entity: self.entity(),
                key: key.to_string(),
            });
        }
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<R>> {
        self.scan_permissions.ensure_find_all()?;

        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }

    async fn count(&self) -> Result<u64> {
        self.scan_permissions.ensure_count()?;

        let records = self.records.read().await;
        Ok(records.len() as u64)
    }

    async fn delete_all(&self) -> Result<u64> {
        self.scan_permissions.ensure_delete_all()?;

        let mut records = self.records.write().await;
        let deleted = records.len() as u64;
        records.clear();
        Ok(deleted)
    }

    async fn query(&self, spec: &QuerySpec) -> Result<Vec<R>> {
        self.matching(spec).await
    }

    async fn query_page(&self, spec: &QuerySpec, page: &PageRequest) -> Result<Page<R>> {
        let matches = self.matching(spec).await?;
        read_page(stream::iter(matches.into_iter().map(Ok)), page).await
    }

    async fn scan_page(&self, page: &PageRequest) -> Result<Page<R>> {
        self.scan_permissions.ensure_find_all()?;

        let all: Vec<R> = {
            let records = self.records.read().await;
            records.values().cloned().collect()
        };
        read_page(stream::iter(all.into_iter().map(Ok)), page).await
    }
}
