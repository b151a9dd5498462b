//! Key values and record key extraction.
//!
//! DynamoDB addresses items by a composite primary key: a partition (hash)
//! key that selects the partition, plus an optional sort (range) key that
//! orders items within it. Record types declare their key mapping
//! statically through the [`Record`] trait; there is no runtime discovery
//! of key fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::TableSchema;

/// A scalar key value.
///
/// Mirrors the three attribute types DynamoDB accepts for key attributes.
/// Numbers carry their wire representation (a decimal string).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KeyValue {
    /// A string key value.
    S(String),
    /// A number key value in wire representation.
    N(String),
    /// A binary key value.
    B(Vec<u8>),
}

impl KeyValue {
    /// Creates a string key value.
    pub fn string(value: impl Into<String>) -> Self {
        Self::S(value.into())
    }

    /// Creates a number key value.
    pub fn number(value: impl ToString) -> Self {
        Self::N(value.to_string())
    }

    /// Creates a binary key value.
    pub fn binary(value: impl Into<Vec<u8>>) -> Self {
        Self::B(value.into())
    }

    /// Compares two key values with the store's ordering semantics.
    ///
    /// Strings and binary values compare lexicographically, numbers
    /// numerically. Values of different types are unordered, as are
    /// numbers that do not parse.
    ///
    /// The derived `Ord` implementation exists only to give collections a
    /// stable iteration order; store-faithful comparison goes through
    /// this method.
    pub fn compare(&self, other: &KeyValue) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Self::S(a), Self::S(b)) => Some(a.cmp(b)),
            (Self::B(a), Self::B(b)) => Some(a.cmp(b)),
            (Self::N(a), Self::N(b)) => {
                let a: f64 = a.parse().ok()?;
                let b: f64 = b.parse().ok()?;
                a.partial_cmp(&b)
            }
            _ => None,
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::S(s) => f.write_str(s),
            Self::N(n) => f.write_str(n),
            Self::B(bytes) => {
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}

/// The composite primary key extracted from a record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    partition: KeyValue,
    sort: Option<KeyValue>,
}

impl RecordKey {
    /// Creates a key for a table with a partition key only.
    pub fn hash(partition: KeyValue) -> Self {
        Self {
            partition,
            sort: None,
        }
    }

    /// Creates a key for a table with a partition and a sort key.
    pub fn hash_and_range(partition: KeyValue, sort: KeyValue) -> Self {
        Self {
            partition,
            sort: Some(sort),
        }
    }

    /// The partition key value.
    pub fn partition(&self) -> &KeyValue {
        &self.partition
    }

    /// The sort key value, if the key is composite.
    pub fn sort(&self) -> Option<&KeyValue> {
        self.sort.as_ref()
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sort {
            Some(sort) => write!(f, "{}/{}", self.partition, sort),
            None => write!(f, "{}", self.partition),
        }
    }
}

/// A domain type stored in a table.
///
/// The table schema is declared once, statically, and the key is
/// extracted with explicit accessors.
pub trait Record: Send + Sync + Sized {
    /// The schema of the table this record type is stored under.
    ///
    /// Implementations typically build the schema in a
    /// `std::sync::LazyLock` and return a reference to it.
    fn schema() -> &'static TableSchema;

    /// Extracts the primary key for this record.
    fn key(&self) -> RecordKey;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_string_values_compare_lexicographically() {
        let a = KeyValue::string("ORDER#2024-01-01");
        let b = KeyValue::string("ORDER#2024-06-15");

        assert_eq!(a.compare(&b), Some(Ordering::Less));
        assert_eq!(b.compare(&a), Some(Ordering::Greater));
        assert_eq!(a.compare(&a), Some(Ordering::Equal));
    }

    #[test]
    fn test_number_values_compare_numerically() {
        let nine = KeyValue::number(9);
        let ten = KeyValue::number(10);

        // Lexicographically "10" < "9"; numerically 9 < 10.
        assert_eq!(nine.compare(&ten), Some(Ordering::Less));
    }

    #[test]
    fn test_mismatched_types_are_unordered() {
        let s = KeyValue::string("42");
        let n = KeyValue::number(42);

        assert_eq!(s.compare(&n), None);
        assert_eq!(n.compare(&s), None);
    }

    #[test]
    fn test_unparseable_numbers_are_unordered() {
        let bad = KeyValue::N("not-a-number".to_string());
        let one = KeyValue::number(1);

        assert_eq!(bad.compare(&one), None);
    }

    #[test]
    fn test_binary_values_compare_bytewise() {
        let a = KeyValue::binary(vec![0x00, 0x01]);
        let b = KeyValue::binary(vec![0x00, 0x02]);

        assert_eq!(a.compare(&b), Some(Ordering::Less));
    }

    #[test]
    fn test_record_key_display() {
        let hash_only = RecordKey::hash(KeyValue::string("CUST#42"));
        assert_eq!(hash_only.to_string(), "CUST#42");

        let composite = RecordKey::hash_and_range(
            KeyValue::string("CUST#42"),
            KeyValue::string("ORDER#7"),
        );
        assert_eq!(composite.to_string(), "CUST#42/ORDER#7");
    }

    #[test]
    fn test_binary_key_display_is_hex() {
        let key = KeyValue::binary(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(key.to_string(), "deadbeef");
    }
}
