//! AWS SDK client setup and table inspection (Imperative Shell).

use aws_sdk_dynamodb::types::{
    KeyType, ScalarAttributeType, TableDescription, TableStatus as SdkTableStatus,
};
use aws_sdk_dynamodb::Client;

use authsession_core::schema::{AttributeType, TableState, TableStatus};
use authsession_core::storage::{RepositoryError, Result};

use super::config::DynamoDbConfig;
use super::error::map_provisioning_error;

/// Creates a DynamoDB client with the given configuration.
///
/// Retry and timeout behaviour come from the SDK defaults; none is added per
/// call.
pub async fn create_client(config: &DynamoDbConfig) -> Client {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }
    if let Some(profile) = &config.profile {
        sdk_config_loader = sdk_config_loader.profile_name(profile);
    }

    let sdk_config = sdk_config_loader.load().await;
    Client::new(&sdk_config)
}

/// Fetches current table state, returns None if table doesn't exist.
pub async fn get_table_state(client: &Client, table_name: &str) -> Result<Option<TableState>> {
    match client.describe_table().table_name(table_name).send().await {
        Ok(response) => {
            let table = response.table().ok_or_else(|| {
                RepositoryError::Provisioning(format!(
                    "DescribeTable returned no description for '{}'",
                    table_name
                ))
            })?;
            Ok(Some(table_state(table)))
        }
        Err(err)
            if err
                .as_service_error()
                .is_some_and(|e| e.is_resource_not_found_exception()) =>
        {
            Ok(None)
        }
        Err(err) => Err(map_provisioning_error(err, "DescribeTable")),
    }
}

/// Pure function: extract the parts of a table description provisioning cares about.
pub fn table_state(table: &TableDescription) -> TableState {
    let key_named = |key_type: KeyType| {
        table
            .key_schema()
            .iter()
            .find(|element| element.key_type() == &key_type)
            .map(|element| element.attribute_name().to_string())
    };

    let partition_key = key_named(KeyType::Hash);
    let partition_key_type = partition_key.as_deref().and_then(|name| {
        table
            .attribute_definitions()
            .iter()
            .find(|definition| definition.attribute_name() == name)
            .and_then(|definition| to_attribute_type(definition.attribute_type()))
    });

    TableState {
        status: to_table_status(table.table_status()),
        partition_key,
        partition_key_type,
        sort_key: key_named(KeyType::Range),
    }
}

fn to_attribute_type(scalar: &ScalarAttributeType) -> Option<AttributeType> {
    match scalar {
        ScalarAttributeType::S => Some(AttributeType::String),
        ScalarAttributeType::N => Some(AttributeType::Number),
        ScalarAttributeType::B => Some(AttributeType::Binary),
        _ => None,
    }
}

fn to_table_status(status: Option<&SdkTableStatus>) -> TableStatus {
    match status {
        Some(SdkTableStatus::Active) => TableStatus::Active,
        Some(SdkTableStatus::Creating) => TableStatus::Creating,
        Some(SdkTableStatus::Updating) => TableStatus::Updating,
        Some(SdkTableStatus::Deleting) => TableStatus::Deleting,
        _ => TableStatus::Unavailable,
    }
}
