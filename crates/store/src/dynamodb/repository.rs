//! DynamoDB repository implementation.
//!
//! Implements `SessionRepository` from `authsession_core::storage` using
//! DynamoDB. Each operation is a single request; retries and timeouts are the
//! SDK client's concern.
//!
//! Session keys are bearer tokens in practice, so logs carry their length only.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;

use authsession_core::schema::TableSchema;
use authsession_core::storage::{Result, SessionKey, SessionRecord, SessionRepository};

use super::client::create_client;
use super::config::DynamoDbConfig;
use super::conversions::{item_to_value, key_to_item_key, record_to_item};
use super::error::map_operation_error;
use super::provision::{provision, ProvisionedTable};

/// DynamoDB-based session repository.
///
/// Owns its client and its table schema; nothing is shared with other
/// instances, so repositories bound to different tables coexist safely.
#[derive(Debug, Clone)]
pub struct DynamoDbSessionRepository {
    client: Client,
    schema: TableSchema,
}

impl DynamoDbSessionRepository {
    /// Creates a repository over an already provisioned table.
    pub fn new(client: Client, table: ProvisionedTable) -> Self {
        Self {
            client,
            schema: table.into_schema(),
        }
    }

    /// Builds a client from `config`, provisions the table and returns a
    /// ready repository.
    ///
    /// Fails without returning a repository if the table cannot be created or
    /// does not become active.
    pub async fn connect(config: &DynamoDbConfig) -> Result<Self> {
        tracing::info!(
            table = %config.table_name,
            target = %config.target_display(),
            "Connecting session repository"
        );

        let client = create_client(config).await;
        let table = provision(&client, &config.schema(), &config.activation).await?;

        Ok(Self::new(client, table))
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.schema.table_name
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }
}

#[async_trait]
impl SessionRepository for DynamoDbSessionRepository {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = SessionKey::parse(key)?;
        tracing::trace!(
            table = %self.schema.table_name,
            key_len = key.as_str().len(),
            "GetItem"
        );

        let result = self
            .client
            .get_item()
            .table_name(&self.schema.table_name)
            .set_key(Some(key_to_item_key(&self.schema, &key)))
            .projection_expression("#v")
            .expression_attribute_names("#v", &self.schema.value_attribute)
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| map_operation_error(e, "GetItem"))?;

        match result.item {
            Some(item) => Ok(Some(item_to_value(&self.schema, item)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let record = SessionRecord::new(key, value)?;
        tracing::trace!(
            table = %self.schema.table_name,
            key_len = record.key.as_str().len(),
            "PutItem"
        );

        self.client
            .put_item()
            .table_name(&self.schema.table_name)
            .set_item(Some(record_to_item(&self.schema, &record)))
            .send()
            .await
            .map_err(|e| map_operation_error(e, "PutItem"))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let key = SessionKey::parse(key)?;
        tracing::trace!(
            table = %self.schema.table_name,
            key_len = key.as_str().len(),
            "DeleteItem"
        );

        // DeleteItem without a condition succeeds whether or not the item exists.
        self.client
            .delete_item()
            .table_name(&self.schema.table_name)
            .set_key(Some(key_to_item_key(&self.schema, &key)))
            .send()
            .await
            .map_err(|e| map_operation_error(e, "DeleteItem"))?;

        Ok(())
    }
}
