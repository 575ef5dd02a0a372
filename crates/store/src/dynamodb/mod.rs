//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of
//! `SessionRepository` using `aws-sdk-dynamodb`, plus the provisioning
//! phase that creates the session table on first use.
//!
//! ```no_run
//! # async fn run() -> authsession_store::Result<()> {
//! use authsession_store::{DynamoDbConfig, DynamoDbSessionRepository, SessionRepository};
//!
//! let config = DynamoDbConfig::new("session_store", "us-east-1");
//! let repo = DynamoDbSessionRepository::connect(&config).await?;
//!
//! repo.set("tok-123", r#"{"sub":"u1"}"#).await?;
//! assert_eq!(repo.get("tok-123").await?.as_deref(), Some(r#"{"sub":"u1"}"#));
//! repo.delete("tok-123").await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod conversions;
mod error;
mod provision;
mod repository;

#[cfg(test)]
mod test_support;

pub use client::{create_client, get_table_state};
pub use config::{ActivationPolicy, DynamoDbConfig, TABLE_NAME_ENV};
pub use error::{classify_error_code, ErrorClass};
pub use provision::{
    destroy, execute_destroy_plan, execute_provision_plan, provision, ProvisionedTable,
};
pub use repository::DynamoDbSessionRepository;
