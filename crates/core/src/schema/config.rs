//! Table schema configuration (Functional Core - pure data).

use serde::{Deserialize, Serialize};

/// Table name used when neither configuration nor environment supplies one.
pub const DEFAULT_TABLE_NAME: &str = "session_store";

/// Shape of the table that holds session records.
///
/// Each backend instance owns its own copy, so two repositories bound to
/// different tables never interfere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub value_attribute: String,
    pub billing_mode: BillingMode,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// DynamoDB attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeType {
    String,
    Number,
    Binary,
}

impl AttributeType {
    /// DynamoDB type descriptor (`S`, `N` or `B`).
    pub fn code(&self) -> &'static str {
        match self {
            AttributeType::String => "S",
            AttributeType::Number => "N",
            AttributeType::Binary => "B",
        }
    }
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillingMode {
    PayPerRequest,
}

impl TableSchema {
    /// Returns the session store schema bound to `table_name`.
    ///
    /// One string partition key named `key` and one plain string attribute
    /// named `value`. No sort key, no indexes, no TTL attribute.
    pub fn session_store(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            partition_key: KeyAttribute {
                name: "key".to_string(),
                attribute_type: AttributeType::String,
            },
            value_attribute: "value".to_string(),
            billing_mode: BillingMode::PayPerRequest,
        }
    }

    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }

    pub fn key_attribute(&self) -> &str {
        &self.partition_key.name
    }
}

impl Default for TableSchema {
    fn default() -> Self {
        Self::session_store(DEFAULT_TABLE_NAME)
    }
}
