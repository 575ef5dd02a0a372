//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! session records. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use authsession_core::schema::TableSchema;
use authsession_core::storage::{RepositoryError, SessionKey, SessionRecord};

/// Build the primary key map addressing `key`.
pub fn key_to_item_key(schema: &TableSchema, key: &SessionKey) -> HashMap<String, AttributeValue> {
    HashMap::from([(
        schema.key_attribute().to_string(),
        AttributeValue::S(key.as_str().to_string()),
    )])
}

/// Convert a session record to a DynamoDB item.
pub fn record_to_item(
    schema: &TableSchema,
    record: &SessionRecord,
) -> HashMap<String, AttributeValue> {
    let mut item = key_to_item_key(schema, &record.key);
    item.insert(
        schema.value_attribute.clone(),
        AttributeValue::S(record.value.clone()),
    );
    item
}

/// Extract the stored value from a DynamoDB item, unmodified.
pub fn item_to_value(
    schema: &TableSchema,
    mut item: HashMap<String, AttributeValue>,
) -> Result<String, RepositoryError> {
    match item.remove(&schema.value_attribute) {
        Some(AttributeValue::S(value)) => Ok(value),
        Some(_) => Err(RepositoryError::InvalidData(format!(
            "Attribute '{}' is not a string",
            schema.value_attribute
        ))),
        None => Err(RepositoryError::InvalidData(format!(
            "Missing attribute '{}'",
            schema.value_attribute
        ))),
    }
}
