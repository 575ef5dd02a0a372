//! Session repository backends.
//!
//! Every backend implements [`SessionRepository`] from `authsession_core`, so
//! the authentication layer can hold an `Arc<dyn SessionRepository>` and stay
//! unaware of the storage technology.
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): DynamoDB backend using `aws-sdk-dynamodb`
//! - `inmemory` (default): process-local backend for tests and development
//!
//! Unlike single-backend builds, both features can be enabled together; the
//! backend is chosen at construction time.

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "inmemory")]
pub mod inmemory;

pub use authsession_core::storage::{
    RepositoryError, Result, SessionKey, SessionRecord, SessionRepository,
};

#[cfg(feature = "dynamodb")]
pub use dynamodb::{DynamoDbConfig, DynamoDbSessionRepository};

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryRepository;
