//! Lazily paginated item streams.
//!
//! Query and Scan return at most 1 MB of items per call plus a
//! continuation token (`LastEvaluatedKey`). These streams follow the
//! token one network page at a time, so a consumer that stops early
//! (such as the page emulator's bounded look-ahead) never fetches the
//! remainder of the result set.

use aws_sdk_dynamodb::Client;
use futures_util::Stream;

use dynarepo_core::repository::RepositoryError;

use super::error::{map_query_error, map_scan_error};
use super::expression::KeyConditionExpression;
use super::item::Item;

/// Streams the items matching a key condition.
pub(crate) fn query_items(
    client: Client,
    table_name: String,
    index_name: Option<String>,
    expr: KeyConditionExpression,
    descending: bool,
) -> impl Stream<Item = Result<Item, RepositoryError>> {
    async_stream::stream! {
        let mut exclusive_start_key: Option<Item> = None;
        loop {
            let mut request = client
                .query()
                .table_name(&table_name)
                .key_condition_expression(&expr.expression)
                .set_expression_attribute_names(Some(expr.names.clone()))
                .set_expression_attribute_values(Some(expr.values.clone()))
                .scan_index_forward(!descending);
            if let Some(index) = &index_name {
                request = request.index_name(index);
            }
            if let Some(key) = exclusive_start_key.take() {
                request = request.set_exclusive_start_key(Some(key));
            }

            let output = match request.send().await {
                Ok(output) => output,
                Err(err) => {
                    yield Err(map_query_error(err));
                    return;
                }
            };

            for item in output.items.unwrap_or_default() {
                yield Ok(item);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => return,
            }
        }
    }
}

/// Streams every item in the table.
pub(crate) fn scan_items(
    client: Client,
    table_name: String,
) -> impl Stream<Item = Result<Item, RepositoryError>> {
    async_stream::stream! {
        let mut exclusive_start_key: Option<Item> = None;
        loop {
            let mut request = client.scan().table_name(&table_name);
            if let Some(key) = exclusive_start_key.take() {
                request = request.set_exclusive_start_key(Some(key));
            }

            let output = match request.send().await {
                Ok(output) => output,
                Err(err) => {
                    yield Err(map_scan_error(err));
                    return;
                }
            };

            for item in output.items.unwrap_or_default() {
                yield Ok(item);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => return,
            }
        }
    }
}
