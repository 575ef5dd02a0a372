//! The session repository contract shared by all backends.

mod error;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use traits::SessionRepository;
pub use types::{SessionKey, SessionRecord, MAX_KEY_BYTES};
