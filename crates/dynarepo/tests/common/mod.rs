//! Shared test fixtures: an `Order` record stored in a single-table
//! layout with one GSI for status lookups.

#![allow(dead_code)]

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dynarepo::{IndexSchema, KeyAttribute, KeyValue, Record, RecordKey, TableSchema};

pub const ORDERS_TABLE: &str = "dynarepo-orders";

pub const CUSTOMER_PREFIX: &str = "CUST#";
pub const ORDER_PREFIX: &str = "ORDER#";

static ORDERS_SCHEMA: LazyLock<TableSchema> = LazyLock::new(|| {
    TableSchema::builder(ORDERS_TABLE)
        .partition_key(KeyAttribute::string("PK"))
        .sort_key(KeyAttribute::string("SK"))
        .index(
            IndexSchema::new("GSI1", KeyAttribute::string("GSI1PK"))
                .with_sort_key(KeyAttribute::string("GSI1SK")),
        )
        .build()
        .expect("orders schema is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Open,
    Shipped,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub sku: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub customer_id: Uuid,
    pub order_id: String,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub placed_at: DateTime<Utc>,
    pub note: Option<String>,
    pub lines: Vec<OrderLine>,
}

/// Generate the partition key for an order.
///
/// Pattern: `CUST#<customer_id>`
pub fn order_pk(customer_id: Uuid) -> String {
    format!("{CUSTOMER_PREFIX}{customer_id}")
}

/// Generate the sort key for an order.
///
/// Pattern: `ORDER#<order_id>`
pub fn order_sk(order_id: &str) -> String {
    format!("{ORDER_PREFIX}{order_id}")
}

pub fn status_to_string(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Open => "open",
        OrderStatus::Shipped => "shipped",
        OrderStatus::Cancelled => "cancelled",
    }
}

pub fn parse_status(raw: &str) -> Result<OrderStatus, dynarepo::RepositoryError> {
    match raw {
        "open" => Ok(OrderStatus::Open),
        "shipped" => Ok(OrderStatus::Shipped),
        "cancelled" => Ok(OrderStatus::Cancelled),
        other => Err(dynarepo::RepositoryError::InvalidData(format!(
            "Unknown order status: {other}"
        ))),
    }
}

impl Record for Order {
    fn schema() -> &'static TableSchema {
        &ORDERS_SCHEMA
    }

    fn key(&self) -> RecordKey {
        RecordKey::hash_and_range(
            KeyValue::string(order_pk(self.customer_id)),
            KeyValue::string(order_sk(&self.order_id)),
        )
    }
}

/// The key an order would be stored under, without building the order.
pub fn order_key(customer_id: Uuid, order_id: &str) -> RecordKey {
    RecordKey::hash_and_range(
        KeyValue::string(order_pk(customer_id)),
        KeyValue::string(order_sk(order_id)),
    )
}

pub fn sample_customer() -> Uuid {
    Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap()
}

pub fn sample_order(customer_id: Uuid, order_id: &str) -> Order {
    Order {
        customer_id,
        order_id: order_id.to_string(),
        status: OrderStatus::Open,
        total_cents: 1995,
        placed_at: DateTime::parse_from_rfc3339("2024-06-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc),
        note: None,
        lines: vec![OrderLine {
            sku: "SKU-001".to_string(),
            quantity: 2,
        }],
    }
}

#[cfg(feature = "dynamodb")]
mod conversions {
    use std::str::FromStr;

    use aws_sdk_dynamodb::types::AttributeValue;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    use dynarepo::dynamodb::{get_number, get_optional_string, get_string, DynamoRecord, Item};
    use dynarepo::RepositoryError;

    use super::{order_pk, order_sk, parse_status, status_to_string, Order, OrderLine};

    impl DynamoRecord for Order {
        fn to_item(&self) -> Result<Item, RepositoryError> {
            let mut item = Item::new();

            // Keys
            item.insert(
                "PK".to_string(),
                AttributeValue::S(order_pk(self.customer_id)),
            );
            item.insert(
                "SK".to_string(),
                AttributeValue::S(order_sk(&self.order_id)),
            );
            item.insert(
                "GSI1PK".to_string(),
                AttributeValue::S(status_to_string(self.status).to_string()),
            );
            item.insert(
                "GSI1SK".to_string(),
                AttributeValue::S(self.placed_at.to_rfc3339()),
            );

            // Data
            item.insert(
                "customerId".to_string(),
                AttributeValue::S(self.customer_id.to_string()),
            );
            item.insert(
                "orderId".to_string(),
                AttributeValue::S(self.order_id.clone()),
            );
            item.insert(
                "status".to_string(),
                AttributeValue::S(status_to_string(self.status).to_string()),
            );
            item.insert(
                "totalCents".to_string(),
                AttributeValue::N(self.total_cents.to_string()),
            );
            item.insert(
                "placedAt".to_string(),
                AttributeValue::S(self.placed_at.to_rfc3339()),
            );
            if let Some(note) = &self.note {
                item.insert("note".to_string(), AttributeValue::S(note.clone()));
            }

            let lines = serde_json::to_string(&self.lines)
                .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
            item.insert("lines".to_string(), AttributeValue::S(lines));

            Ok(item)
        }

        fn from_item(item: &Item) -> Result<Self, RepositoryError> {
            let customer_id = Uuid::from_str(&get_string(item, "customerId")?)
                .map_err(|e| RepositoryError::InvalidData(format!("Invalid customerId: {e}")))?;
            let placed_at = DateTime::parse_from_rfc3339(&get_string(item, "placedAt")?)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| RepositoryError::InvalidData(format!("Invalid placedAt: {e}")))?;
            let lines: Vec<OrderLine> = serde_json::from_str(&get_string(item, "lines")?)
                .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

            Ok(Order {
                customer_id,
                order_id: get_string(item, "orderId")?,
                status: parse_status(&get_string(item, "status")?)?,
                total_cents: get_number(item, "totalCents")?,
                placed_at,
                note: get_optional_string(item, "note"),
                lines,
            })
        }
    }
}
