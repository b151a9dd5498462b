//! Declarative query conditions.
//!
//! A query is described by explicit builder calls producing a
//! [`KeyCondition`], never derived from method names. The condition is
//! rendered into the store's expression language by the backend; the pure
//! [`KeyCondition::matches`] evaluation exists for backends that hold
//! records in memory.

use crate::key::{KeyValue, RecordKey};

/// Condition applied to the sort key of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum SortCondition {
    Eq(KeyValue),
    Lt(KeyValue),
    Le(KeyValue),
    Gt(KeyValue),
    Ge(KeyValue),
    /// Inclusive on both bounds, matching the store's BETWEEN.
    Between(KeyValue, KeyValue),
    /// Prefix match; applies to string sort keys only.
    BeginsWith(String),
}

impl SortCondition {
    /// Evaluates the condition against a sort key value.
    pub fn matches(&self, value: &KeyValue) -> bool {
        use std::cmp::Ordering::{Equal, Greater, Less};

        match self {
            Self::Eq(v) => value.compare(v) == Some(Equal),
            Self::Lt(v) => value.compare(v) == Some(Less),
            Self::Le(v) => matches!(value.compare(v), Some(Less | Equal)),
            Self::Gt(v) => value.compare(v) == Some(Greater),
            Self::Ge(v) => matches!(value.compare(v), Some(Greater | Equal)),
            Self::Between(lo, hi) => {
                matches!(value.compare(lo), Some(Greater | Equal))
                    && matches!(value.compare(hi), Some(Less | Equal))
            }
            Self::BeginsWith(prefix) => match value {
                KeyValue::S(s) => s.starts_with(prefix.as_str()),
                _ => false,
            },
        }
    }
}

/// A key condition: partition-key equality plus an optional sort-key
/// condition.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyCondition {
    partition: KeyValue,
    sort: Option<SortCondition>,
}

impl KeyCondition {
    /// Matches every item with the given partition key value.
    pub fn partition(value: KeyValue) -> Self {
        Self {
            partition: value,
            sort: None,
        }
    }

    /// Narrows to items whose sort key equals `value`.
    pub fn sort_eq(mut self, value: KeyValue) -> Self {
        self.sort = Some(SortCondition::Eq(value));
        self
    }

    /// Narrows to items whose sort key is strictly less than `value`.
    pub fn sort_lt(mut self, value: KeyValue) -> Self {
        self.sort = Some(SortCondition::Lt(value));
        self
    }

    /// Narrows to items whose sort key is at most `value`.
    pub fn sort_le(mut self, value: KeyValue) -> Self {
        self.sort = Some(SortCondition::Le(value));
        self
    }

    /// Narrows to items whose sort key is strictly greater than `value`.
    pub fn sort_gt(mut self, value: KeyValue) -> Self {
        self.sort = Some(SortCondition::Gt(value));
        self
    }

    /// Narrows to items whose sort key is at least `value`.
    pub fn sort_ge(mut self, value: KeyValue) -> Self {
        self.sort = Some(SortCondition::Ge(value));
        self
    }

    /// Narrows to items whose sort key lies between the bounds, inclusive.
    pub fn sort_between(mut self, low: KeyValue, high: KeyValue) -> Self {
        self.sort = Some(SortCondition::Between(low, high));
        self
    }

    /// Narrows to items whose string sort key starts with `prefix`.
    pub fn sort_begins_with(mut self, prefix: impl Into<String>) -> Self {
        self.sort = Some(SortCondition::BeginsWith(prefix.into()));
        self
    }

    /// The partition key value this condition selects.
    pub fn partition_value(&self) -> &KeyValue {
        &self.partition
    }

    /// The sort-key condition, if any.
    pub fn sort_condition(&self) -> Option<&SortCondition> {
        self.sort.as_ref()
    }

    /// Evaluates the condition against a record's primary key.
    ///
    /// A sort condition never matches a key without a sort component.
    pub fn matches(&self, key: &RecordKey) -> bool {
        if key.partition() != &self.partition {
            return false;
        }
        match (&self.sort, key.sort()) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(condition), Some(sort)) => condition.matches(sort),
        }
    }
}

/// A complete query description: key condition, target index, direction.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    key: KeyCondition,
    index: Option<String>,
    descending: bool,
}

impl QuerySpec {
    /// Creates a query over the table's primary key.
    pub fn new(key: KeyCondition) -> Self {
        Self {
            key,
            index: None,
            descending: false,
        }
    }

    /// Targets a global secondary index instead of the primary key.
    pub fn on_index(mut self, name: impl Into<String>) -> Self {
        self.index = Some(name.into());
        self
    }

    /// Returns results in descending sort-key order.
    pub fn descending(mut self) -> Self {
        self.descending = true;
        self
    }

    /// The key condition.
    pub fn key(&self) -> &KeyCondition {
        &self.key
    }

    /// The target index name, if not the primary key.
    pub fn index(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// Whether results are read in descending order.
    pub fn is_descending(&self) -> bool {
        self.descending
    }
}
