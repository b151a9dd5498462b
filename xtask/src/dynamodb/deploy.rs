//! Table deployment operations (Imperative Shell).

use std::time::Duration;

use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, GlobalSecondaryIndex, KeySchemaElement, KeyType, Projection,
    ProjectionType, ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;
use dynarepo_core::schema::{self, IndexSchema, KeyAttribute, TableSchema};

use super::client;
use super::error::{DynamodbError, Result};
use super::planning::{DeployPlan, DestroyPlan, GsiStatus, TableStatus};

/// Execute a deploy plan.
pub async fn execute_deploy_plan(client: &Client, plan: &DeployPlan) -> Result<()> {
    match plan {
        DeployPlan::CreateTable { schema } => {
            create_table(client, schema).await?;
            wait_for_table_active(client, &schema.table_name).await?;
        }
        DeployPlan::AddGsis {
            table_name,
            gsis_to_add,
        } => {
            for gsi in gsis_to_add {
                add_gsi(client, table_name, gsi).await?;
                wait_for_table_active(client, table_name).await?;
            }
        }
        DeployPlan::NoChanges { .. } => {
            // Nothing to do
        }
    }
    Ok(())
}

/// Execute a destroy plan.
pub async fn execute_destroy_plan(client: &Client, plan: &DestroyPlan) -> Result<()> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            delete_table(client, table_name).await?;
        }
        DestroyPlan::AlreadyGone { .. } => {
            // Nothing to do
        }
    }
    Ok(())
}

fn attribute_definition(attribute: &KeyAttribute) -> Result<AttributeDefinition> {
    AttributeDefinition::builder()
        .attribute_name(&attribute.name)
        .attribute_type(to_scalar_type(attribute.attribute_type))
        .build()
        .map_err(|e| DynamodbError::AwsSdk(e.to_string()))
}

fn key_schema_element(attribute: &KeyAttribute, key_type: KeyType) -> Result<KeySchemaElement> {
    KeySchemaElement::builder()
        .attribute_name(&attribute.name)
        .key_type(key_type)
        .build()
        .map_err(|e| DynamodbError::AwsSdk(e.to_string()))
}

/// Builds the SDK GSI description plus the attribute definitions its keys
/// require.
fn build_gsi(gsi: &IndexSchema) -> Result<(GlobalSecondaryIndex, Vec<AttributeDefinition>)> {
    let mut key_schema = vec![key_schema_element(&gsi.partition_key, KeyType::Hash)?];
    let mut attribute_definitions = vec![attribute_definition(&gsi.partition_key)?];

    if let Some(sk) = &gsi.sort_key {
        key_schema.push(key_schema_element(sk, KeyType::Range)?);
        attribute_definitions.push(attribute_definition(sk)?);
    }

    let index = GlobalSecondaryIndex::builder()
        .index_name(&gsi.name)
        .set_key_schema(Some(key_schema))
        .projection(
            Projection::builder()
                .projection_type(to_projection_type(gsi.projection))
                .build(),
        )
        .build()
        .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

    Ok((index, attribute_definitions))
}

async fn create_table(client: &Client, schema: &TableSchema) -> Result<()> {
    let mut key_schema = vec![key_schema_element(&schema.partition_key, KeyType::Hash)?];
    let mut attribute_definitions = vec![attribute_definition(&schema.partition_key)?];

    if let Some(sk) = &schema.sort_key {
        key_schema.push(key_schema_element(sk, KeyType::Range)?);
        attribute_definitions.push(attribute_definition(sk)?);
    }

    let mut request = client
        .create_table()
        .table_name(&schema.table_name)
        .set_key_schema(Some(key_schema))
        .billing_mode(BillingMode::PayPerRequest);

    // Add GSIs and any key attributes they introduce
    for gsi in &schema.indexes {
        let (index, gsi_attributes) = build_gsi(gsi)?;
        for attribute in gsi_attributes {
            if !attribute_definitions
                .iter()
                .any(|a| a.attribute_name() == attribute.attribute_name())
            {
                attribute_definitions.push(attribute);
            }
        }
        request = request.global_secondary_indexes(index);
    }

    request
        .set_attribute_definitions(Some(attribute_definitions))
        .send()
        .await
        .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;
    Ok(())
}

async fn add_gsi(client: &Client, table_name: &str, gsi: &IndexSchema) -> Result<()> {
    use aws_sdk_dynamodb::types::{CreateGlobalSecondaryIndexAction, GlobalSecondaryIndexUpdate};

    let (index, attribute_definitions) = build_gsi(gsi)?;

    let action = CreateGlobalSecondaryIndexAction::builder()
        .index_name(&gsi.name)
        .set_key_schema(Some(index.key_schema.clone()))
        .set_projection(index.projection.clone())
        .build()
        .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

    client
        .update_table()
        .table_name(table_name)
        .set_attribute_definitions(Some(attribute_definitions))
        .global_secondary_index_updates(
            GlobalSecondaryIndexUpdate::builder().create(action).build(),
        )
        .send()
        .await
        .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;

    Ok(())
}

async fn delete_table(client: &Client, table_name: &str) -> Result<()> {
    client
        .delete_table()
        .table_name(table_name)
        .send()
        .await
        .map_err(|e| DynamodbError::AwsSdk(e.to_string()))?;
    Ok(())
}

async fn wait_for_table_active(client: &Client, table_name: &str) -> Result<()> {
    let max_attempts = 60;
    let delay = Duration::from_secs(2);

    for _ in 0..max_attempts {
        if let Some(state) = client::get_table_state(client, table_name).await? {
            if state.status == TableStatus::Active {
                // Also check all GSIs are active
                let all_gsis_active = state.gsis.iter().all(|g| g.status == GsiStatus::Active);
                if all_gsis_active {
                    return Ok(());
                }
            }
        }
        tokio::time::sleep(delay).await;
    }

    Err(DynamodbError::TableActivationTimeout)
}

fn to_scalar_type(attribute_type: schema::AttributeType) -> ScalarAttributeType {
    match attribute_type {
        schema::AttributeType::String => ScalarAttributeType::S,
        schema::AttributeType::Number => ScalarAttributeType::N,
        schema::AttributeType::Binary => ScalarAttributeType::B,
    }
}

fn to_projection_type(projection: schema::Projection) -> ProjectionType {
    match projection {
        schema::Projection::All => ProjectionType::All,
        schema::Projection::KeysOnly => ProjectionType::KeysOnly,
    }
}
