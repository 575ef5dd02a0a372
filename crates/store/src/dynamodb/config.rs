//! Connection and table binding for the DynamoDB backend.

use std::time::Duration;

use serde::Deserialize;

use authsession_core::schema::{TableSchema, DEFAULT_TABLE_NAME};

/// Environment variable holding the session table name.
pub const TABLE_NAME_ENV: &str = "DynamoDBSessionTableName";

const DEFAULT_REGION: &str = "us-east-1";

/// How long provisioning waits for a table to become active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActivationPolicy {
    pub max_attempts: u32,
    pub poll_interval: Duration,
}

impl Default for ActivationPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            poll_interval: Duration::from_secs(2),
        }
    }
}

/// DynamoDB backend configuration.
///
/// One configuration value binds exactly one repository. The credentials
/// context (`profile`) is passed through to the AWS credential chain and
/// never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DynamoDbConfig {
    /// Session table name.
    pub table_name: String,
    /// AWS region.
    pub region: String,
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    /// Named AWS profile for credentials.
    pub profile: Option<String>,
    pub activation: ActivationPolicy,
}

impl DynamoDbConfig {
    /// Creates a configuration for an explicit table and region.
    pub fn new(table_name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            region: region.into(),
            endpoint_url: None,
            profile: None,
            activation: ActivationPolicy::default(),
        }
    }

    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DynamoDBSessionTableName`: table name (default: `session_store`)
    /// - `AWS_REGION`: region (default: `us-east-1`)
    /// - `AWS_ENDPOINT_URL`: endpoint override, e.g. `http://localhost:8000`
    /// - `AWS_PROFILE`: named credentials profile
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            table_name: var(TABLE_NAME_ENV).unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            region: var("AWS_REGION")
                .filter(|region| !region.is_empty())
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            endpoint_url: var("AWS_ENDPOINT_URL").filter(|url| !url.is_empty()),
            profile: var("AWS_PROFILE").filter(|profile| !profile.is_empty()),
            activation: ActivationPolicy::default(),
        }
    }

    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn with_activation(mut self, activation: ActivationPolicy) -> Self {
        self.activation = activation;
        self
    }

    /// Table schema bound to this configuration's table name.
    pub fn schema(&self) -> TableSchema {
        TableSchema::session_store(&self.table_name)
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

impl Default for DynamoDbConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_map(vars: &[(&str, &str)]) -> DynamoDbConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DynamoDbConfig::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = from_map(&[]);

        assert_eq!(config.table_name, "session_store");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.endpoint_url, None);
        assert_eq!(config.profile, None);
        assert_eq!(config.activation, ActivationPolicy::default());
    }

    #[test]
    fn test_values_from_environment() {
        let config = from_map(&[
            ("DynamoDBSessionTableName", "tokens"),
            ("AWS_REGION", "eu-west-1"),
            ("AWS_ENDPOINT_URL", "http://localhost:8000"),
            ("AWS_PROFILE", "dev"),
        ]);

        assert_eq!(config.table_name, "tokens");
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.profile.as_deref(), Some("dev"));
    }

    #[test]
    fn test_empty_endpoint_is_ignored() {
        let config = from_map(&[("AWS_ENDPOINT_URL", "")]);
        assert_eq!(config.endpoint_url, None);
    }

    #[test]
    fn test_empty_region_falls_back_to_default() {
        let config = from_map(&[("AWS_REGION", "")]);
        assert_eq!(config.region, "us-east-1");
    }

    #[test]
    fn test_schema_follows_table_name() {
        let config = DynamoDbConfig::new("session_store", "us-east-1");
        let schema = config.schema();

        assert_eq!(schema.table_name, "session_store");
        assert_eq!(schema.key_attribute(), "key");
        assert_eq!(schema.value_attribute, "value");
    }

    #[test]
    fn test_target_display() {
        let config = DynamoDbConfig::new("t", "us-east-1");
        assert_eq!(config.target_display(), "AWS DynamoDB (region: us-east-1)");

        let config = config.with_endpoint_url("http://localhost:8000");
        assert_eq!(
            config.target_display(),
            "Local DynamoDB (http://localhost:8000)"
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: DynamoDbConfig = serde_json::from_str(
            r#"{
                "table_name": "session_store",
                "region": "us-east-1",
                "endpoint_url": "http://localhost:8000",
                "activation": { "max_attempts": 5 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.table_name, "session_store");
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.activation.max_attempts, 5);
        assert_eq!(config.activation.poll_interval, Duration::from_secs(2));
    }
}
