//! Key condition expression rendering.
//!
//! Turns a declarative [`KeyCondition`] into the expression string and
//! the `#name`/`:value` bindings the Query API expects. Attribute names
//! always go through placeholders so schema-declared names can never
//! collide with reserved words.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use dynarepo_core::query::{KeyCondition, SortCondition};
use dynarepo_core::repository::RepositoryError;

use super::item;

/// A rendered key condition.
#[derive(Debug, Clone)]
pub(crate) struct KeyConditionExpression {
    pub expression: String,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

/// Renders a key condition against the given key attribute names.
pub(crate) fn render_key_condition(
    partition_attr: &str,
    sort_attr: Option<&str>,
    condition: &KeyCondition,
) -> Result<KeyConditionExpression, RepositoryError> {
    let mut names = HashMap::new();
    let mut values = HashMap::new();

    names.insert("#pk".to_string(), partition_attr.to_string());
    values.insert(
        ":pk".to_string(),
        item::attribute_value(condition.partition_value()),
    );
    let mut expression = "#pk = :pk".to_string();

    if let Some(sort) = condition.sort_condition() {
        let attr = sort_attr.ok_or_else(|| {
            RepositoryError::QueryFailed(
                "Sort condition on a key that declares no sort attribute".to_string(),
            )
        })?;
        names.insert("#sk".to_string(), attr.to_string());

        let clause = match sort {
            SortCondition::Eq(value) => {
                values.insert(":sk".to_string(), item::attribute_value(value));
                "#sk = :sk"
            }
            SortCondition::Lt(value) => {
                values.insert(":sk".to_string(), item::attribute_value(value));
                "#sk < :sk"
            }
            SortCondition::Le(value) => {
                values.insert(":sk".to_string(), item::attribute_value(value));
                "#sk <= :sk"
            }
            SortCondition::Gt(value) => {
                values.insert(":sk".to_string(), item::attribute_value(value));
                "#sk > :sk"
            }
            SortCondition::Ge(value) => {
                values.insert(":sk".to_string(), item::attribute_value(value));
                "#sk >= :sk"
            }
            SortCondition::Between(low, high) => {
                values.insert(":sk_start".to_string(), item::attribute_value(low));
                values.insert(":sk_end".to_string(), item::attribute_value(high));
                "#sk BETWEEN :sk_start AND :sk_end"
            }
            SortCondition::BeginsWith(prefix) => {
                values.insert(":sk".to_string(), AttributeValue::S(prefix.clone()));
                "begins_with(#sk, :sk)"
            }
        };

        expression.push_str(" AND ");
        expression.push_str(clause);
    }

    Ok(KeyConditionExpression {
        expression,
        names,
        values,
    })
}
