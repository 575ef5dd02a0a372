//! Canned DynamoDB responses for tests that run without a store.

use std::time::Duration;

use aws_sdk_dynamodb::operation::describe_table::{DescribeTableError, DescribeTableOutput};
use aws_sdk_dynamodb::types::error::ResourceNotFoundException;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, KeySchemaElement, KeyType, ScalarAttributeType, TableDescription,
    TableStatus,
};

use super::config::ActivationPolicy;

/// Polls without waiting so tests stay fast.
pub fn fast_activation(max_attempts: u32) -> ActivationPolicy {
    ActivationPolicy {
        max_attempts,
        poll_interval: Duration::from_millis(1),
    }
}

/// DescribeTable response for a session table in `status`.
pub fn described(table_name: &str, status: TableStatus) -> DescribeTableOutput {
    described_with_keys(table_name, status, &[("key", KeyType::Hash)])
}

/// DescribeTable response with an arbitrary key schema, all keys typed `S`.
pub fn described_with_keys(
    table_name: &str,
    status: TableStatus,
    keys: &[(&str, KeyType)],
) -> DescribeTableOutput {
    let mut table = TableDescription::builder()
        .table_name(table_name)
        .table_status(status);

    for (name, key_type) in keys {
        table = table
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name(*name)
                    .key_type(key_type.clone())
                    .build()
                    .unwrap(),
            )
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(*name)
                    .attribute_type(ScalarAttributeType::S)
                    .build()
                    .unwrap(),
            );
    }

    DescribeTableOutput::builder().table(table.build()).build()
}

pub fn table_not_found() -> DescribeTableError {
    DescribeTableError::ResourceNotFoundException(
        ResourceNotFoundException::builder()
            .message("Requested resource not found")
            .build(),
    )
}
