//! DynamoDB repository implementation.
//!
//! Implements the repository contract from `dynarepo_core` over the AWS
//! SDK client. Every operation except the paged ones is a single SDK
//! call; the paged operations feed a lazily-paginated item stream into
//! the core page emulator.

use std::marker::PhantomData;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::Select;
use aws_sdk_dynamodb::Client;
use futures_util::{Stream, StreamExt};

use dynarepo_core::key::{Record, RecordKey};
use dynarepo_core::page::{read_page, Page, PageRequest};
use dynarepo_core::query::QuerySpec;
use dynarepo_core::repository::{Repository, RepositoryError, Result, ScanPermissions};

use super::config::DynamoConfig;
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_scan_error,
    map_update_item_error,
};
use super::expression::render_key_condition;
use super::item::{self, Item};
use super::record::DynamoRecord;
use super::stream::{query_items, scan_items};

/// DynamoDB-based repository for one record type.
///
/// Holds a client handle and the target table name; cloning is cheap and
/// every operation is independent. Scan operations are denied until
/// explicitly enabled via [`ScanPermissions`].
#[derive(Debug, Clone)]
pub struct DynamoRepository<R> {
    client: Client,
    table_name: String,
    scan_permissions: ScanPermissions,
    _record: PhantomData<fn() -> R>,
}

impl<R: DynamoRecord> DynamoRepository<R> {
    /// Creates a repository over the table declared by the record schema.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            table_name: R::schema().table_name.clone(),
            scan_permissions: ScanPermissions::none(),
            _record: PhantomData,
        }
    }

    /// Creates a repository from environment configuration.
    ///
    /// Uses the AWS SDK default credential chain; see
    /// [`DynamoConfig::from_env`] for the recognized variables.
    pub async fn from_env() -> Self {
        let config = DynamoConfig::from_env();
        let client = config.connect().await;
        let mut repository = Self::new(client);
        if let Some(table_name) = config.table_name {
            repository.table_name = table_name;
        }
        repository
    }

    /// Redirects the repository at a different table.
    ///
    /// The record type and schema stay the same; only the table name
    /// changes. Useful when the same record layout lives in several
    /// tables (per tenant, per environment).
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    /// Sets the scan permissions for this repository.
    pub fn with_scan_permissions(mut self, permissions: ScanPermissions) -> Self {
        self.scan_permissions = permissions;
        self
    }

    /// The table this repository reads and writes.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Resolves the key attribute names a query runs against: the
    /// primary key, or the named index's keys.
    fn key_attributes(spec: &QuerySpec) -> Result<(String, Option<String>)> {
        let schema = R::schema();
        match spec.index() {
            None => Ok((
                schema.partition_key.name.clone(),
                schema.sort_key.as_ref().map(|k| k.name.clone()),
            )),
            Some(name) => {
                let index = schema.index(name).ok_or_else(|| {
                    RepositoryError::QueryFailed(format!("Unknown index: {name}"))
                })?;
                Ok((
                    index.partition_key.name.clone(),
                    index.sort_key.as_ref().map(|k| k.name.clone()),
                ))
            }
        }
    }

    fn query_stream(&self, spec: &QuerySpec) -> Result<impl Stream<Item = Result<R>>> {
        let (partition_attr, sort_attr) = Self::key_attributes(spec)?;
        let expr = render_key_condition(&partition_attr, sort_attr.as_deref(), spec.key())?;

        let items = query_items(
            self.client.clone(),
            self.table_name.clone(),
            spec.index().map(str::to_string),
            expr,
            spec.is_descending(),
        );
        Ok(items.map(|result| result.and_then(|item| R::from_item(&item))))
    }

    fn scan_stream(&self) -> impl Stream<Item = Result<R>> {
        scan_items(self.client.clone(), self.table_name.clone())
            .map(|result| result.and_then(|item| R::from_item(&item)))
    }
}

#[async_trait]
impl<R: DynamoRecord> Repository<R> for DynamoRepository<R> {
    async fn get(&self, key: &RecordKey) -> Result<Option<R>> {
        let key_item = item::primary_key(R::schema(), key)?;

        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(key_item))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, &self.table_name, key.to_string()))?;

        match result.item {
            Some(item) => Ok(Some(R::from_item(&item)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, record: &R) -> Result<()> {
        let key = record.key();
        let item = record.to_item()?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(#pk)")
            .expression_attribute_names("#pk", &R::schema().partition_key.name)
            .send()
            .await
            .map_err(|e| map_put_item_error(e, &self.table_name, key.to_string()))?;

        Ok(())
    }

    async fn update(&self, record: &R) -> Result<()> {
        let key = record.key();
        let item = record.to_item()?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_exists(#pk)")
            .expression_attribute_names("#pk", &R::schema().partition_key.name)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, &self.table_name, key.to_string()))?;

        Ok(())
    }

    async fn save(&self, record: &R) -> Result<()> {
        let key = record.key();
        let item = record.to_item()?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, &self.table_name, key.to_string()))?;

        Ok(())
    }

    async fn delete(&self, key: &RecordKey) -> Result<()> {
        let key_item = item::primary_key(R::schema(), key)?;

        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(key_item))
            .condition_expression("attribute_exists(#pk)")
            .expression_attribute_names("#pk", &R::schema().partition_key.name)
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, &self.table_name, key.to_string()))?;

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<R>> {
        self.scan_permissions.ensure_find_all()?;

        let records = self.scan_stream();
        futures_util::pin_mut!(records);

        let mut all = Vec::new();
        while let Some(record) = records.next().await {
            all.push(record?);
        }
        Ok(all)
    }

    async fn count(&self) -> Result<u64> {
        self.scan_permissions.ensure_count()?;

        let mut total: u64 = 0;
        let mut exclusive_start_key: Option<Item> = None;
        loop {
            let mut request = self
                .client
                .scan()
                .table_name(&self.table_name)
                .select(Select::Count);
            if let Some(key) = exclusive_start_key.take() {
                request = request.set_exclusive_start_key(Some(key));
            }

            let output = request.send().await.map_err(map_scan_error)?;
            total += output.count() as u64;

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => break,
            }
        }
        Ok(total)
    }

    async fn delete_all(&self) -> Result<u64> {
        self.scan_permissions.ensure_delete_all()?;

        let records = self.scan_stream();
        futures_util::pin_mut!(records);

        let mut deleted: u64 = 0;
        while let Some(record) = records.next().await {
            let key = record?.key();
            let key_item = item::primary_key(R::schema(), &key)?;

            self.client
                .delete_item()
                .table_name(&self.table_name)
                .set_key(Some(key_item))
                .send()
                .await
                .map_err(|e| map_delete_item_error(e, &self.table_name, key.to_string()))?;
            deleted += 1;
        }

        tracing::debug!(table = %self.table_name, deleted, "Deleted all records");
        Ok(deleted)
    }

    async fn query(&self, spec: &QuerySpec) -> Result<Vec<R>> {
        let records = self.query_stream(spec)?;
        futures_util::pin_mut!(records);

        let mut all = Vec::new();
        while let Some(record) = records.next().await {
            all.push(record?);
        }
        Ok(all)
    }

    async fn query_page(&self, spec: &QuerySpec, page: &PageRequest) -> Result<Page<R>> {
        tracing::debug!(
            table = %self.table_name,
            offset = page.offset(),
            page_size = page.page_size(),
            "Reading query page"
        );
        let records = self.query_stream(spec)?;
        read_page(records, page).await
    }

    async fn scan_page(&self, page: &PageRequest) -> Result<Page<R>> {
        self.scan_permissions.ensure_find_all()?;

        tracing::debug!(
            table = %self.table_name,
            offset = page.offset(),
            page_size = page.page_size(),
            "Reading scan page"
        );
        read_page(self.scan_stream(), page).await
    }
}
