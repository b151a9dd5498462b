//! Statically declared table metadata.
//!
//! A [`TableSchema`] names the table, its key attributes, and its global
//! secondary indexes. Schemas are pure data: declared once per record
//! type, consumed by backends to address keys and render expressions, and
//! by infrastructure tooling to create the table.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while declaring a table schema.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Table name must not be empty")]
    EmptyTableName,
    #[error("Table schema is missing a partition key")]
    MissingPartitionKey,
    #[error("Duplicate index name: {0}")]
    DuplicateIndex(String),
}

/// DynamoDB key attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeType {
    String,
    Number,
    Binary,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

impl KeyAttribute {
    /// Creates a key attribute definition.
    pub fn new(name: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attribute_type,
        }
    }

    /// Creates a string key attribute.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, AttributeType::String)
    }

    /// Creates a number key attribute.
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, AttributeType::Number)
    }
}

/// GSI projection type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Projection {
    All,
    KeysOnly,
}

/// A global secondary index definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSchema {
    pub name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
    pub projection: Projection,
}

impl IndexSchema {
    /// Creates an index with the given name and partition key, projecting
    /// all attributes.
    pub fn new(name: impl Into<String>, partition_key: KeyAttribute) -> Self {
        Self {
            name: name.into(),
            partition_key,
            sort_key: None,
            projection: Projection::All,
        }
    }

    /// Sets the index sort key.
    pub fn with_sort_key(mut self, sort_key: KeyAttribute) -> Self {
        self.sort_key = Some(sort_key);
        self
    }

    /// Sets the projection type.
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillingMode {
    PayPerRequest,
}

/// A table schema: the statically declared key mapping for a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
    pub indexes: Vec<IndexSchema>,
    pub billing_mode: BillingMode,
}

impl TableSchema {
    /// Starts building a schema for the named table.
    pub fn builder(table_name: impl Into<String>) -> TableSchemaBuilder {
        TableSchemaBuilder {
            table_name: table_name.into(),
            partition_key: None,
            sort_key: None,
            indexes: Vec::new(),
        }
    }

    /// Looks up a global secondary index by name.
    pub fn index(&self, name: &str) -> Option<&IndexSchema> {
        self.indexes.iter().find(|index| index.name == name)
    }
}

/// Builder for [`TableSchema`].
#[derive(Debug, Clone)]
pub struct TableSchemaBuilder {
    table_name: String,
    partition_key: Option<KeyAttribute>,
    sort_key: Option<KeyAttribute>,
    indexes: Vec<IndexSchema>,
}

impl TableSchemaBuilder {
    /// Sets the partition key attribute. Required.
    pub fn partition_key(mut self, attribute: KeyAttribute) -> Self {
        self.partition_key = Some(attribute);
        self
    }

    /// Sets the sort key attribute.
    pub fn sort_key(mut self, attribute: KeyAttribute) -> Self {
        self.sort_key = Some(attribute);
        self
    }

    /// Adds a global secondary index.
    pub fn index(mut self, index: IndexSchema) -> Self {
        self.indexes.push(index);
        self
    }

    /// Validates and builds the schema.
    pub fn build(self) -> Result<TableSchema, SchemaError> {
        if self.table_name.is_empty() {
            return Err(SchemaError::EmptyTableName);
        }
        let partition_key = self.partition_key.ok_or(SchemaError::MissingPartitionKey)?;
        for (position, index) in self.indexes.iter().enumerate() {
            if self.indexes[..position].iter().any(|i| i.name == index.name) {
                return Err(SchemaError::DuplicateIndex(index.name.clone()));
            }
        }
        Ok(TableSchema {
            table_name: self.table_name,
            partition_key,
            sort_key: self.sort_key,
            indexes: self.indexes,
            billing_mode: BillingMode::PayPerRequest,
        })
    }
}
