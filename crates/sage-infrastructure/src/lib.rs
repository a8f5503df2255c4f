//! Infrastructure layer: filesystem paths and read-only configuration
//! storage.
//!
//! Conversations and plans are never persisted; the only on-disk state this
//! crate touches is the user's secret and configuration files under
//! `~/.config/sage/`.

pub mod paths;
pub mod storage;

pub use paths::SagePaths;
pub use storage::{ConfigStorage, SecretStorage, StorageError};
