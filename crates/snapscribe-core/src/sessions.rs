//! Chat session store: CRUD and message append over one persisted collection.

use crate::auth::AuthStore;
use crate::config::Latency;
use crate::error::StoreError;
use crate::storage::{KeyValueStore, get_json, set_json};
use crate::types::{ChatMessage, ChatSession, Role, SessionId, SessionPatch};
use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::sleep;
use uuid::Uuid;

/// Key holding the whole chat sessions collection.
const SESSIONS_KEY: &str = "chat_sessions";

/// Store for chat sessions and their transcripts.
///
/// Every operation reads the full collection, mutates it in memory, and
/// writes it back whole; there are no partial writes. Each read-modify-write
/// runs under the collection mutex, so concurrent callers serialize instead
/// of losing updates to a last-write-wins race.
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    auth: Arc<AuthStore>,
    sessions_lock: Mutex<()>,
    latency: Latency,
}

impl SessionStore {
    /// Create a session store with the default simulated latency.
    pub fn new(store: Arc<dyn KeyValueStore>, auth: Arc<AuthStore>) -> Self {
        Self::with_latency(store, auth, Latency::default())
    }

    /// Create a session store with an explicit latency table.
    pub fn with_latency(
        store: Arc<dyn KeyValueStore>,
        auth: Arc<AuthStore>,
        latency: Latency,
    ) -> Self {
        Self {
            store,
            auth,
            sessions_lock: Mutex::new(()),
            latency,
        }
    }

    /// List the current user's sessions, most recently updated first.
    ///
    /// Returns an empty list (not an error) when nobody is logged in.
    pub async fn list_sessions(&self) -> Result<Vec<ChatSession>, StoreError> {
        sleep(self.latency.list).await;
        let Some(user) = self.auth.current_user()? else {
            return Ok(Vec::new());
        };

        let _guard = self.sessions_lock.lock().await;
        let mut sessions: Vec<ChatSession> = self
            .load_sessions()?
            .into_iter()
            .filter(|session| session.user_id == user.id)
            .collect();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }

    /// Fetch a session by id, across all owners.
    ///
    /// There is deliberately no ownership filter: a session is fetchable by
    /// any caller that knows its id.
    pub async fn get_session(&self, id: SessionId) -> Result<Option<ChatSession>, StoreError> {
        sleep(self.latency.get).await;
        let _guard = self.sessions_lock.lock().await;
        let session = self
            .load_sessions()?
            .into_iter()
            .find(|session| session.id == id);
        Ok(session)
    }

    /// Create a session owned by the current user.
    pub async fn create_session(
        &self,
        title: &str,
        extracted_text: Option<String>,
        image_url: Option<String>,
    ) -> Result<ChatSession, StoreError> {
        sleep(self.latency.create).await;
        let user = self.auth.current_user()?.ok_or(StoreError::AuthRequired)?;

        let _guard = self.sessions_lock.lock().await;
        let now = Utc::now();
        let session = ChatSession {
            id: Uuid::new_v4(),
            title: title.to_string(),
            user_id: user.id,
            created_at: now,
            updated_at: now,
            messages: Vec::new(),
            image_url,
            extracted_text,
        };
        info!(
            "created session (session_id={}, user_id={})",
            session.id, user.id
        );

        let mut sessions = self.load_sessions()?;
        sessions.push(session.clone());
        self.save_sessions(&sessions)?;
        Ok(session)
    }

    /// Append a message to a session, bumping its `updated_at`.
    pub async fn add_message(
        &self,
        session_id: SessionId,
        content: &str,
        role: Role,
    ) -> Result<ChatMessage, StoreError> {
        sleep(self.latency.message).await;
        let _guard = self.sessions_lock.lock().await;

        let mut sessions = self.load_sessions()?;
        let session = sessions
            .iter_mut()
            .find(|session| session.id == session_id)
            .ok_or(StoreError::UnknownSession(session_id))?;

        let now = Utc::now();
        let message = ChatMessage {
            id: Uuid::new_v4(),
            content: content.to_string(),
            role,
            timestamp: now,
        };
        debug!(
            "appending message (session_id={session_id}, role={}, content_len={})",
            role.as_str(),
            content.len()
        );
        session.messages.push(message.clone());
        session.updated_at = now;

        self.save_sessions(&sessions)?;
        Ok(message)
    }

    /// Merge a partial update into a session and bump its `updated_at`.
    ///
    /// Fields left as `None` in the patch are unchanged.
    pub async fn update_session(
        &self,
        id: SessionId,
        patch: SessionPatch,
    ) -> Result<ChatSession, StoreError> {
        sleep(self.latency.update).await;
        let _guard = self.sessions_lock.lock().await;

        let mut sessions = self.load_sessions()?;
        let session = sessions
            .iter_mut()
            .find(|session| session.id == id)
            .ok_or(StoreError::UnknownSession(id))?;

        if let Some(title) = patch.title {
            session.title = title;
        }
        if let Some(image_url) = patch.image_url {
            session.image_url = Some(image_url);
        }
        if let Some(extracted_text) = patch.extracted_text {
            session.extracted_text = Some(extracted_text);
        }
        session.updated_at = Utc::now();
        let updated = session.clone();

        self.save_sessions(&sessions)?;
        Ok(updated)
    }

    /// Delete a session and its messages. Unknown ids are a silent no-op;
    /// the return value reports whether anything was removed.
    pub async fn delete_session(&self, id: SessionId) -> Result<bool, StoreError> {
        sleep(self.latency.delete).await;
        let _guard = self.sessions_lock.lock().await;

        let mut sessions = self.load_sessions()?;
        let before = sessions.len();
        sessions.retain(|session| session.id != id);
        if sessions.len() == before {
            warn!("delete ignored, session not found (session_id={id})");
            return Ok(false);
        }

        info!("deleted session (session_id={id})");
        self.save_sessions(&sessions)?;
        Ok(true)
    }

    /// Read the whole sessions collection, empty when never written.
    fn load_sessions(&self) -> Result<Vec<ChatSession>, StoreError> {
        Ok(get_json(self.store.as_ref(), SESSIONS_KEY)?.unwrap_or_default())
    }

    /// Write the whole sessions collection back.
    fn save_sessions(&self, sessions: &[ChatSession]) -> Result<(), StoreError> {
        Ok(set_json(self.store.as_ref(), SESSIONS_KEY, &sessions)?)
    }
}
