//! Local-first persistence core for Snapscribe.
//!
//! This crate owns user identity and chat-session storage for the Snapscribe
//! client: an auth store, a session store, and the key-value adapters they
//! persist through, plus the text-extraction collaborator contract used to
//! seed new sessions.

pub mod auth;
pub mod config;
pub mod error;
pub mod extraction;
pub mod sessions;
pub mod storage;
pub mod types;

pub use auth::AuthStore;
pub use config::{ConfigError, Latency, StoreConfig};
pub use error::StoreError;
pub use extraction::{Extraction, ExtractionError, MockExtractor, TextExtractor, suggest_title};
pub use sessions::SessionStore;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
pub use types::{ChatMessage, ChatSession, Role, SessionId, SessionPatch, User, UserId};

use std::sync::Arc;

/// The wired-up store pair backing a Snapscribe client.
pub struct Stores {
    /// User identity store.
    pub auth: Arc<AuthStore>,
    /// Chat session store.
    pub sessions: SessionStore,
}

impl Stores {
    /// Open file-backed stores under the configured data directory.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(config.data_dir())?);
        Ok(Self::with_store(store, config.latency()))
    }

    /// Wire both stores onto an injected key-value store.
    pub fn with_store(store: Arc<dyn KeyValueStore>, latency: Latency) -> Self {
        let auth = Arc::new(AuthStore::with_latency(store.clone(), latency));
        let sessions = SessionStore::with_latency(store, auth.clone(), latency);
        Self { auth, sessions }
    }
}
