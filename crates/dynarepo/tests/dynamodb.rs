//! DynamoDB backend tests.
//!
//! The conversion tests are pure and always run. The live tests talk to
//! a real endpoint and are ignored by default; deploy the fixture table
//! first (`cargo xtask dynamodb deploy --force`), then:
//!
//! ```bash
//! AWS_ENDPOINT_URL=http://localhost:8000 \
//!   cargo test -p dynarepo --features dynamodb -- --ignored
//! ```

#![cfg(feature = "dynamodb")]

mod common;

use common::{order_key, sample_order, Order, OrderStatus};
use dynarepo::dynamodb::DynamoRecord;
use dynarepo::{
    DynamoRepository, KeyCondition, KeyValue, PageRequest, QuerySpec, Record, Repository,
};
use uuid::Uuid;

#[test]
fn test_order_item_round_trip() {
    let order = sample_order(common::sample_customer(), "0001");

    let item = order.to_item().unwrap();
    let parsed = Order::from_item(&item).unwrap();

    assert_eq!(order, parsed);
}

#[test]
fn test_order_item_has_correct_keys() {
    let order = sample_order(common::sample_customer(), "0001");

    let item = order.to_item().unwrap();

    assert_eq!(
        item.get("PK").unwrap().as_s().unwrap(),
        "CUST#550e8400-e29b-41d4-a716-446655440001"
    );
    assert_eq!(item.get("SK").unwrap().as_s().unwrap(), "ORDER#0001");
    assert_eq!(item.get("GSI1PK").unwrap().as_s().unwrap(), "open");
    assert!(item
        .get("GSI1SK")
        .unwrap()
        .as_s()
        .unwrap()
        .starts_with("2024-06-15T"));
}

#[test]
fn test_item_keys_match_the_record_key() {
    use dynarepo::Record;

    let order = sample_order(common::sample_customer(), "0001");
    let item = order.to_item().unwrap();
    let key = order.key();

    assert_eq!(
        item.get("PK").unwrap().as_s().unwrap(),
        &key.partition().to_string()
    );
    assert_eq!(
        item.get("SK").unwrap().as_s().unwrap(),
        &key.sort().unwrap().to_string()
    );
}

#[test]
fn test_from_item_rejects_unknown_status() {
    let mut item = sample_order(common::sample_customer(), "0001")
        .to_item()
        .unwrap();
    item.insert(
        "status".to_string(),
        aws_sdk_dynamodb::types::AttributeValue::S("pending".to_string()),
    );

    assert!(Order::from_item(&item).is_err());
}

#[tokio::test]
#[ignore = "requires a deployed fixture table and a reachable DynamoDB endpoint"]
async fn test_live_round_trip() {
    let repository: DynamoRepository<Order> = DynamoRepository::from_env().await;
    let customer = Uuid::new_v4();
    let mut order = sample_order(customer, "0001");

    repository.create(&order).await.unwrap();

    order.status = OrderStatus::Shipped;
    repository.update(&order).await.unwrap();

    let loaded = repository.get(&order.key()).await.unwrap().unwrap();
    assert_eq!(loaded.status, OrderStatus::Shipped);

    repository.delete(&order.key()).await.unwrap();
    assert_eq!(repository.get(&order.key()).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires a deployed fixture table and a reachable DynamoDB endpoint"]
async fn test_live_query_page() {
    let repository: DynamoRepository<Order> = DynamoRepository::from_env().await;
    let customer = Uuid::new_v4();
    for n in 0..5 {
        repository
            .create(&sample_order(customer, &format!("{n:04}")))
            .await
            .unwrap();
    }

    let spec = QuerySpec::new(KeyCondition::partition(KeyValue::string(
        common::order_pk(customer),
    )));
    let request = PageRequest::new(2, 2).unwrap();
    let page = repository.query_page(&spec, &request).await.unwrap();

    assert_eq!(page.len(), 2);
    assert!(page.has_next());
    assert_eq!(page.estimated_total(), 5);

    for n in 0..5 {
        repository
            .delete(&order_key(customer, &format!("{n:04}")))
            .await
            .unwrap();
    }
}
