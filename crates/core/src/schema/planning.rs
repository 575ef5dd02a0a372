//! Pure functions for calculating provisioning plans (Functional Core).

use super::config::{AttributeType, TableSchema};

/// Represents the current state of a table as reported by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub status: TableStatus,
    /// Name of the table's hash key, if the store reported one.
    pub partition_key: Option<String>,
    /// Declared type of the hash key, if the store reported one.
    pub partition_key_type: Option<AttributeType>,
    /// Name of the table's range key, if it has one.
    pub sort_key: Option<String>,
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
    /// Archived, inaccessible-encryption-key and any status added later.
    Unavailable,
}

/// Planned steps to get a usable table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionPlan {
    /// Table doesn't exist, needs to be created and awaited.
    CreateTable { schema: TableSchema },
    /// Table exists but is not active yet.
    AwaitActive { table_name: String },
    /// Table is active with the expected key, nothing to do.
    Ready { table_name: String },
    /// Table exists but can never serve session records as-is.
    Incompatible { table_name: String, reason: String },
}

/// Plan for destroying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    /// Table exists and will be deleted.
    DeleteTable { table_name: String },
    /// Table doesn't exist, nothing to do.
    AlreadyGone { table_name: String },
}

/// Pure function: Calculate what is needed to reach a usable table.
pub fn calculate_provision_plan(
    current: Option<&TableState>,
    desired: &TableSchema,
) -> ProvisionPlan {
    let table_name = desired.table_name.clone();

    let Some(state) = current else {
        return ProvisionPlan::CreateTable {
            schema: desired.clone(),
        };
    };

    if let Some(reason) = key_mismatch(state, desired) {
        return ProvisionPlan::Incompatible { table_name, reason };
    }

    match state.status {
        TableStatus::Active => ProvisionPlan::Ready { table_name },
        TableStatus::Creating | TableStatus::Updating => ProvisionPlan::AwaitActive { table_name },
        TableStatus::Deleting => ProvisionPlan::Incompatible {
            table_name,
            reason: "table is being deleted".to_string(),
        },
        TableStatus::Unavailable => ProvisionPlan::Incompatible {
            table_name,
            reason: "table is not available".to_string(),
        },
    }
}

/// Describes why the table's key schema cannot hold session records, if it can't.
fn key_mismatch(state: &TableState, desired: &TableSchema) -> Option<String> {
    let expected = &desired.partition_key;

    if let Some(existing) = &state.partition_key {
        if existing != &expected.name {
            return Some(format!(
                "partition key is '{}', expected '{}'",
                existing, expected.name
            ));
        }
    }

    if let Some(existing) = state.partition_key_type {
        if existing != expected.attribute_type {
            return Some(format!(
                "partition key '{}' has type {}, expected {}",
                expected.name,
                existing.code(),
                expected.attribute_type.code()
            ));
        }
    }

    if let Some(sort_key) = &state.sort_key {
        return Some(format!(
            "table has sort key '{}', expected a partition key only",
            sort_key
        ));
    }

    None
}

/// Pure function: Calculate destroy plan.
pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    match current {
        Some(_) => DestroyPlan::DeleteTable {
            table_name: table_name.to_string(),
        },
        None => DestroyPlan::AlreadyGone {
            table_name: table_name.to_string(),
        },
    }
}

/// Pure function: Format a provision plan for display.
pub fn format_provision_plan(plan: &ProvisionPlan) -> Vec<String> {
    match plan {
        ProvisionPlan::CreateTable { schema } => vec![
            format!("+ Create table: {}", schema.table_name),
            format!(
                "  Partition key: {} ({})",
                schema.partition_key.name,
                schema.partition_key.attribute_type.code()
            ),
            format!("  Value attribute: {} (S)", schema.value_attribute),
            "  Billing: PAY_PER_REQUEST".to_string(),
        ],
        ProvisionPlan::AwaitActive { table_name } => {
            vec![format!("~ Wait for table '{}' to become active", table_name)]
        }
        ProvisionPlan::Ready { table_name } => {
            vec![format!("= Table '{}' is up to date", table_name)]
        }
        ProvisionPlan::Incompatible { table_name, reason } => {
            vec![format!("! Table '{}' cannot be used: {}", table_name, reason)]
        }
    }
}

/// Pure function: Format a destroy plan for display.
pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!(
                "- Delete table: {} (ALL SESSIONS WILL BE LOST)",
                table_name
            )]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{}' does not exist", table_name)]
        }
    }
}
