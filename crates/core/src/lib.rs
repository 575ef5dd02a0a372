//! Core types for pluggable session storage.
//!
//! - [`storage`]: the `SessionRepository` contract every backend implements,
//!   key validation and the shared error type.
//! - [`schema`]: the remote table description and pure provisioning plans.
//!
//! Nothing in this crate performs I/O.

pub mod schema;
pub mod storage;
