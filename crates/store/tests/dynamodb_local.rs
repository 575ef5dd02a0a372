//! Integration tests against DynamoDB Local.
//!
//! Run with `cargo xtask integration`, or start DynamoDB Local yourself and
//! set `AWS_ENDPOINT_URL` (plus dummy `AWS_ACCESS_KEY_ID` /
//! `AWS_SECRET_ACCESS_KEY`). Without `AWS_ENDPOINT_URL` every test returns
//! early so the suite never reaches real AWS by accident.

#![cfg(feature = "dynamodb")]

use std::time::Duration;

use authsession_core::schema::{DestroyPlan, TableSchema, TableStatus};
use authsession_store::dynamodb::{
    create_client, destroy, get_table_state, provision, ActivationPolicy,
};
use authsession_store::{
    DynamoDbConfig, DynamoDbSessionRepository, RepositoryError, SessionRepository,
};

fn local_config(table_name: &str) -> Option<DynamoDbConfig> {
    std::env::var("AWS_ENDPOINT_URL").ok()?;
    Some(
        DynamoDbConfig::from_env()
            .with_table_name(table_name)
            .with_activation(ActivationPolicy {
                max_attempts: 30,
                poll_interval: Duration::from_millis(200),
            }),
    )
}

fn unique_table(prefix: &str) -> String {
    format!("{}_{}", prefix, uuid::Uuid::new_v4().simple())
}

async fn drop_table(config: &DynamoDbConfig) {
    let client = create_client(config).await;
    destroy(&client, &config.table_name).await.unwrap();
}

#[tokio::test]
async fn test_connect_creates_missing_table() {
    let Some(config) = local_config(&unique_table("provision")) else {
        return;
    };
    let client = create_client(&config).await;
    assert!(get_table_state(&client, &config.table_name)
        .await
        .unwrap()
        .is_none());

    let repo = DynamoDbSessionRepository::connect(&config).await.unwrap();

    let state = get_table_state(&client, repo.table_name())
        .await
        .unwrap()
        .expect("table should exist after connect");
    assert_eq!(state.status, TableStatus::Active);
    assert_eq!(state.partition_key.as_deref(), Some("key"));

    drop_table(&config).await;
}

#[tokio::test]
async fn test_destroy_missing_table_is_noop() {
    let Some(config) = local_config(&unique_table("gone")) else {
        return;
    };
    let client = create_client(&config).await;

    let plan = destroy(&client, &config.table_name).await.unwrap();
    assert!(matches!(plan, DestroyPlan::AlreadyGone { .. }));
}

#[tokio::test]
async fn test_provision_is_idempotent() {
    let Some(config) = local_config(&unique_table("idempotent")) else {
        return;
    };
    let client = create_client(&config).await;
    let schema = config.schema();

    let first = provision(&client, &schema, &config.activation).await.unwrap();
    let second = provision(&client, &schema, &config.activation).await.unwrap();
    assert_eq!(first, second);

    drop_table(&config).await;
}

#[tokio::test]
async fn test_provision_rejects_table_with_other_key() {
    let Some(config) = local_config(&unique_table("mismatch")) else {
        return;
    };
    let client = create_client(&config).await;

    let mut foreign = TableSchema::session_store(&config.table_name);
    foreign.partition_key.name = "PK".to_string();
    provision(&client, &foreign, &config.activation)
        .await
        .unwrap();

    let result = DynamoDbSessionRepository::connect(&config).await;
    assert!(matches!(result, Err(RepositoryError::Provisioning(_))));

    drop_table(&config).await;
}

#[tokio::test]
async fn test_session_lifecycle_scenario() {
    let Some(config) = local_config("session_store") else {
        return;
    };
    let repo = DynamoDbSessionRepository::connect(&config).await.unwrap();
    let key = format!("tok-123-{}", uuid::Uuid::new_v4());

    repo.set(&key, r#"{"sub":"u1"}"#).await.unwrap();
    assert_eq!(
        repo.get(&key).await.unwrap().as_deref(),
        Some(r#"{"sub":"u1"}"#)
    );

    repo.delete(&key).await.unwrap();
    assert_eq!(repo.get(&key).await.unwrap(), None);
}

#[tokio::test]
async fn test_get_unknown_key_is_absent() {
    let Some(config) = local_config("session_store") else {
        return;
    };
    let repo = DynamoDbSessionRepository::connect(&config).await.unwrap();

    let value = repo.get(&uuid::Uuid::new_v4().to_string()).await.unwrap();
    assert!(value.is_none());
}

#[tokio::test]
async fn test_overwrite_last_write_wins() {
    let Some(config) = local_config("session_store") else {
        return;
    };
    let repo = DynamoDbSessionRepository::connect(&config).await.unwrap();
    let key = uuid::Uuid::new_v4().to_string();

    repo.set(&key, "v1").await.unwrap();
    repo.set(&key, "v2").await.unwrap();
    assert_eq!(repo.get(&key).await.unwrap().as_deref(), Some("v2"));

    repo.delete(&key).await.unwrap();
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let Some(config) = local_config("session_store") else {
        return;
    };
    let repo = DynamoDbSessionRepository::connect(&config).await.unwrap();
    let key = uuid::Uuid::new_v4().to_string();

    repo.set(&key, "v").await.unwrap();
    repo.delete(&key).await.unwrap();
    repo.delete(&key).await.unwrap();
    assert!(repo.get(&key).await.unwrap().is_none());

    // Deleting a key that was never set is a no-op
    repo.delete("never-set").await.unwrap();
}

#[tokio::test]
async fn test_repositories_on_different_tables_are_isolated() {
    let Some(config_a) = local_config(&unique_table("iso_a")) else {
        return;
    };
    let config_b = config_a.clone().with_table_name(unique_table("iso_b"));

    let repo_a = DynamoDbSessionRepository::connect(&config_a).await.unwrap();
    let repo_b = DynamoDbSessionRepository::connect(&config_b).await.unwrap();

    repo_a.set("shared-key", "from-a").await.unwrap();
    assert!(repo_b.get("shared-key").await.unwrap().is_none());
    assert_eq!(repo_a.table_name(), config_a.table_name);
    assert_eq!(repo_b.table_name(), config_b.table_name);

    drop_table(&config_a).await;
    drop_table(&config_b).await;
}

#[tokio::test]
async fn test_empty_key_rejected_before_request() {
    let Some(config) = local_config("session_store") else {
        return;
    };
    let repo = DynamoDbSessionRepository::connect(&config).await.unwrap();

    assert!(matches!(
        repo.set("", "v").await,
        Err(RepositoryError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_unreachable_endpoint_fails_construction() {
    if std::env::var("AWS_ENDPOINT_URL").is_err() {
        return;
    }
    let config = DynamoDbConfig::new("session_store", "us-east-1")
        .with_endpoint_url("http://127.0.0.1:9");

    let result = DynamoDbSessionRepository::connect(&config).await;
    assert!(matches!(result, Err(RepositoryError::ConnectionFailed(_))));
}
