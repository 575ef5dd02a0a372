//! Remote table description and provisioning plans (pure data and functions).

mod config;
mod planning;

pub use config::{AttributeType, BillingMode, KeyAttribute, TableSchema, DEFAULT_TABLE_NAME};
pub use planning::{
    calculate_destroy_plan, calculate_provision_plan, format_destroy_plan, format_provision_plan,
    DestroyPlan, ProvisionPlan, TableState, TableStatus,
};
