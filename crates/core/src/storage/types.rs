use std::fmt;

use serde::{Deserialize, Serialize};

use super::{RepositoryError, Result};

/// Largest partition key DynamoDB accepts, in bytes.
pub const MAX_KEY_BYTES: usize = 2048;

/// A validated session key.
///
/// Keys are non-empty and at most [`MAX_KEY_BYTES`] bytes long. Every backend
/// parses incoming keys through this type before touching its store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionKey(String);

impl SessionKey {
    /// Parses a raw key, rejecting empty and oversized keys.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(RepositoryError::InvalidInput(
                "session key must not be empty".to_string(),
            ));
        }
        if raw.len() > MAX_KEY_BYTES {
            return Err(RepositoryError::InvalidInput(format!(
                "session key is {} bytes, the limit is {}",
                raw.len(),
                MAX_KEY_BYTES
            )));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SessionKey {
    type Error = RepositoryError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for SessionKey {
    type Error = RepositoryError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<SessionKey> for String {
    fn from(key: SessionKey) -> Self {
        key.0
    }
}

/// The unit of persistence: one opaque value stored under one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub key: SessionKey,
    pub value: String,
}

impl SessionRecord {
    /// Builds a record, validating the key.
    pub fn new(key: &str, value: impl Into<String>) -> Result<Self> {
        Ok(Self {
            key: SessionKey::parse(key)?,
            value: value.into(),
        })
    }
}
