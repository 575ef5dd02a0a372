//! Table provisioning (Imperative Shell).
//!
//! `provision` is the one-time startup phase that guarantees the session table
//! exists and is active before any request touches it. The `get`/`set`/`delete`
//! path never creates or describes tables.

use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode as SdkBillingMode, KeySchemaElement, KeyType,
    ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;

use authsession_core::schema::{
    calculate_destroy_plan, calculate_provision_plan, AttributeType, BillingMode, DestroyPlan,
    ProvisionPlan, TableSchema, TableStatus,
};
use authsession_core::storage::{RepositoryError, Result};

use super::client::get_table_state;
use super::config::ActivationPolicy;
use super::error::map_provisioning_error;

/// Proof that a table matching a schema exists and was active.
///
/// Only [`provision`] hands these out, so a repository built from one never
/// points at a missing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedTable {
    schema: TableSchema,
}

impl ProvisionedTable {
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn into_schema(self) -> TableSchema {
        self.schema
    }
}

/// Ensure the table described by `schema` exists and is active.
///
/// Creates the table when it is missing and blocks until DynamoDB reports it
/// `ACTIVE`. Two processes provisioning the same table at once is resolved by
/// DynamoDB itself: the loser's `CreateTable` fails with
/// `ResourceInUseException`, which is treated as success followed by the same
/// wait. No lock is taken here.
pub async fn provision(
    client: &Client,
    schema: &TableSchema,
    activation: &ActivationPolicy,
) -> Result<ProvisionedTable> {
    let current = get_table_state(client, &schema.table_name).await?;
    let plan = calculate_provision_plan(current.as_ref(), schema);

    tracing::debug!(table = %schema.table_name, ?plan, "Provisioning session table");

    execute_provision_plan(client, &plan, activation).await?;

    Ok(ProvisionedTable {
        schema: schema.clone(),
    })
}

/// Delete the table if it exists. Returns the plan that was applied.
pub async fn destroy(client: &Client, table_name: &str) -> Result<DestroyPlan> {
    let current = get_table_state(client, table_name).await?;
    let plan = calculate_destroy_plan(current.as_ref(), table_name);

    execute_destroy_plan(client, &plan).await?;

    Ok(plan)
}

/// Execute a provision plan.
pub async fn execute_provision_plan(
    client: &Client,
    plan: &ProvisionPlan,
    activation: &ActivationPolicy,
) -> Result<()> {
    match plan {
        ProvisionPlan::CreateTable { schema } => {
            create_table(client, schema).await?;
            wait_for_table_active(client, &schema.table_name, activation).await?;
        }
        ProvisionPlan::AwaitActive { table_name } => {
            wait_for_table_active(client, table_name, activation).await?;
        }
        ProvisionPlan::Ready { .. } => {
            // Nothing to do
        }
        ProvisionPlan::Incompatible { table_name, reason } => {
            return Err(RepositoryError::Provisioning(format!(
                "Table '{}' cannot be used: {}",
                table_name, reason
            )));
        }
    }
    Ok(())
}

/// Execute a destroy plan.
pub async fn execute_destroy_plan(client: &Client, plan: &DestroyPlan) -> Result<()> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            client
                .delete_table()
                .table_name(table_name)
                .send()
                .await
                .map_err(|e| map_provisioning_error(e, "DeleteTable"))?;
            tracing::debug!(table = %table_name, "Session table deleted");
        }
        DestroyPlan::AlreadyGone { .. } => {
            // Nothing to do
        }
    }
    Ok(())
}

async fn create_table(client: &Client, schema: &TableSchema) -> Result<()> {
    let key_schema = KeySchemaElement::builder()
        .attribute_name(&schema.partition_key.name)
        .key_type(KeyType::Hash)
        .build()
        .map_err(|e| RepositoryError::Provisioning(e.to_string()))?;

    let attribute_definition = AttributeDefinition::builder()
        .attribute_name(&schema.partition_key.name)
        .attribute_type(to_scalar_type(&schema.partition_key.attribute_type))
        .build()
        .map_err(|e| RepositoryError::Provisioning(e.to_string()))?;

    let result = client
        .create_table()
        .table_name(&schema.table_name)
        .key_schema(key_schema)
        .attribute_definitions(attribute_definition)
        .billing_mode(to_billing_mode(&schema.billing_mode))
        .send()
        .await;

    match result {
        Ok(_) => {
            tracing::debug!(table = %schema.table_name, "Session table creation started");
            Ok(())
        }
        Err(err)
            if err
                .as_service_error()
                .is_some_and(|e| e.is_resource_in_use_exception()) =>
        {
            tracing::warn!(
                table = %schema.table_name,
                "Session table is already being created elsewhere, waiting for it"
            );
            Ok(())
        }
        Err(err) => Err(map_provisioning_error(err, "CreateTable")),
    }
}

async fn wait_for_table_active(
    client: &Client,
    table_name: &str,
    activation: &ActivationPolicy,
) -> Result<()> {
    // Zero attempts still checks once.
    let attempts = activation.max_attempts.max(1);

    for attempt in 1..=attempts {
        match get_table_state(client, table_name).await? {
            Some(state) if state.status == TableStatus::Active => {
                tracing::debug!(table = %table_name, attempt, "Session table is active");
                return Ok(());
            }
            Some(state) if state.status == TableStatus::Deleting => {
                return Err(RepositoryError::Provisioning(format!(
                    "Table '{}' was deleted while waiting for it",
                    table_name
                )));
            }
            state => {
                tracing::trace!(table = %table_name, attempt, ?state, "Waiting for session table");
            }
        }

        if attempt < attempts {
            tokio::time::sleep(activation.poll_interval).await;
        }
    }

    Err(RepositoryError::Provisioning(format!(
        "Timeout waiting for table '{}' to become active after {} attempts",
        table_name, attempts
    )))
}

fn to_scalar_type(attr_type: &AttributeType) -> ScalarAttributeType {
    match attr_type {
        AttributeType::String => ScalarAttributeType::S,
        AttributeType::Number => ScalarAttributeType::N,
        AttributeType::Binary => ScalarAttributeType::B,
    }
}

fn to_billing_mode(billing_mode: &BillingMode) -> SdkBillingMode {
    match billing_mode {
        BillingMode::PayPerRequest => SdkBillingMode::PayPerRequest,
    }
}
