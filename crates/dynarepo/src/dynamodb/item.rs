//! DynamoDB item access helpers.
//!
//! Pure functions for reading typed attributes out of item maps and for
//! rendering key values into them. These are testable in isolation
//! without DynamoDB access.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use dynarepo_core::key::{KeyValue, RecordKey};
use dynarepo_core::repository::RepositoryError;
use dynarepo_core::schema::TableSchema;

/// A DynamoDB item: an attribute map.
pub type Item = HashMap<String, AttributeValue>;

/// Renders a key value into its attribute representation.
pub(crate) fn attribute_value(value: &KeyValue) -> AttributeValue {
    match value {
        KeyValue::S(s) => AttributeValue::S(s.clone()),
        KeyValue::N(n) => AttributeValue::N(n.clone()),
        KeyValue::B(bytes) => AttributeValue::B(Blob::new(bytes.clone())),
    }
}

/// Renders a record key into the item key map the SDK expects, using the
/// schema's attribute names.
///
/// The key's shape must match the schema: a composite key for a table
/// declared with a sort key, a plain key otherwise.
pub(crate) fn primary_key(schema: &TableSchema, key: &RecordKey) -> Result<Item, RepositoryError> {
    let mut item = HashMap::new();
    item.insert(
        schema.partition_key.name.clone(),
        attribute_value(key.partition()),
    );

    match (&schema.sort_key, key.sort()) {
        (Some(attribute), Some(sort)) => {
            item.insert(attribute.name.clone(), attribute_value(sort));
        }
        (Some(attribute), None) => {
            return Err(RepositoryError::InvalidData(format!(
                "Key is missing the sort attribute {} declared by table {}",
                attribute.name, schema.table_name
            )));
        }
        (None, Some(_)) => {
            return Err(RepositoryError::InvalidData(format!(
                "Key carries a sort value but table {} declares none",
                schema.table_name
            )));
        }
        (None, None) => {}
    }

    Ok(item)
}

/// Get a required string attribute.
pub fn get_string(item: &Item, key: &str) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional string attribute.
pub fn get_optional_string(item: &Item, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

/// Get a required number attribute, parsed into any numeric type.
pub fn get_number<T>(item: &Item, key: &str) -> Result<T, RepositoryError>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = item
        .get(key)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))?;
    raw.parse()
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid number {}: {}", key, e)))
}

/// Get an optional number attribute.
pub fn get_optional_number<T>(item: &Item, key: &str) -> Result<Option<T>, RepositoryError>
where
    T: FromStr,
    T::Err: Display,
{
    match item.get(key).and_then(|v| v.as_n().ok()) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| RepositoryError::InvalidData(format!("Invalid number {}: {}", key, e))),
        None => Ok(None),
    }
}

/// Get a required boolean attribute.
pub fn get_bool(item: &Item, key: &str) -> Result<bool, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynarepo_core::schema::KeyAttribute;

    fn composite_schema() -> TableSchema {
        TableSchema::builder("orders")
            .partition_key(KeyAttribute::string("PK"))
            .sort_key(KeyAttribute::string("SK"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_primary_key_uses_schema_attribute_names() {
        let schema = composite_schema();
        let key = RecordKey::hash_and_range(
            KeyValue::string("CUST#1"),
            KeyValue::string("ORDER#7"),
        );

        let item = primary_key(&schema, &key).unwrap();

        assert_eq!(item.get("PK").unwrap().as_s().unwrap(), "CUST#1");
        assert_eq!(item.get("SK").unwrap().as_s().unwrap(), "ORDER#7");
    }

    #[test]
    fn test_primary_key_rejects_missing_sort_value() {
        let schema = composite_schema();
        let key = RecordKey::hash(KeyValue::string("CUST#1"));

        assert!(primary_key(&schema, &key).is_err());
    }

    #[test]
    fn test_primary_key_rejects_unexpected_sort_value() {
        let schema = TableSchema::builder("flat")
            .partition_key(KeyAttribute::string("PK"))
            .build()
            .unwrap();
        let key =
            RecordKey::hash_and_range(KeyValue::string("a"), KeyValue::string("b"));

        assert!(primary_key(&schema, &key).is_err());
    }

    #[test]
    fn test_number_values_render_as_n() {
        let value = attribute_value(&KeyValue::number(42));
        assert_eq!(value.as_n().unwrap(), "42");
    }

    #[test]
    fn test_get_string_missing_field() {
        let item = Item::new();
        assert!(get_string(&item, "missing").is_err());
    }

    #[test]
    fn test_get_optional_string() {
        let mut item = Item::new();
        assert!(get_optional_string(&item, "missing").is_none());

        item.insert(
            "present".to_string(),
            AttributeValue::S("value".to_string()),
        );
        assert_eq!(
            get_optional_string(&item, "present"),
            Some("value".to_string())
        );
    }

    #[test]
    fn test_get_number_parses_the_target_type() {
        let mut item = Item::new();
        item.insert("total".to_string(), AttributeValue::N("1995".to_string()));

        let total: i64 = get_number(&item, "total").unwrap();
        assert_eq!(total, 1995);
    }

    #[test]
    fn test_get_number_rejects_garbage() {
        let mut item = Item::new();
        item.insert("total".to_string(), AttributeValue::N("not-a-number".to_string()));

        assert!(get_number::<i64>(&item, "total").is_err());
    }
}
