//! Auth store: the users collection and the current-user pointer.

use crate::config::Latency;
use crate::error::StoreError;
use crate::storage::{KeyValueStore, get_json, set_json};
use crate::types::User;
use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::sleep;
use uuid::Uuid;

/// Key holding the current-user pointer (a full User record).
const CURRENT_USER_KEY: &str = "auth_user";
/// Key holding the whole users collection.
const USERS_KEY: &str = "auth_users";

/// Store for user identity.
///
/// Mutations rewrite the whole users collection through the adapter; the
/// read-modify-write of each operation runs under a single mutex so
/// overlapping callers cannot drop each other's writes.
///
/// Passwords are accepted by `login` and `signup` but never stored or
/// checked. This mirrors the prototype auth model and is insecure by design.
pub struct AuthStore {
    store: Arc<dyn KeyValueStore>,
    users_lock: Mutex<()>,
    latency: Latency,
}

impl AuthStore {
    /// Create an auth store with the default simulated latency.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_latency(store, Latency::default())
    }

    /// Create an auth store with an explicit latency table.
    pub fn with_latency(store: Arc<dyn KeyValueStore>, latency: Latency) -> Self {
        Self {
            store,
            users_lock: Mutex::new(()),
            latency,
        }
    }

    /// Read the current-user pointer. Pure read, no simulated latency.
    pub fn current_user(&self) -> Result<Option<User>, StoreError> {
        Ok(get_json(self.store.as_ref(), CURRENT_USER_KEY)?)
    }

    /// Log in by exact email match.
    ///
    /// The password argument is ignored: any value succeeds for a known
    /// email. On success the current-user pointer is set to the match.
    pub async fn login(&self, email: &str, _password: &str) -> Result<User, StoreError> {
        sleep(self.latency.login).await;
        let _guard = self.users_lock.lock().await;

        let users = self.load_users()?;
        let user = users
            .into_iter()
            .find(|user| user.email == email)
            .ok_or_else(|| {
                warn!("login failed, user not found (email={email})");
                StoreError::UserNotFound(email.to_string())
            })?;

        set_json(self.store.as_ref(), CURRENT_USER_KEY, &user)?;
        info!("user logged in (user_id={}, email={email})", user.id);
        Ok(user)
    }

    /// Register a new user and set them as the current user.
    ///
    /// Fails with [`StoreError::UserExists`] if the email is already taken,
    /// leaving the users collection unchanged.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        _password: &str,
    ) -> Result<User, StoreError> {
        sleep(self.latency.signup).await;
        let _guard = self.users_lock.lock().await;

        let mut users = self.load_users()?;
        if users.iter().any(|user| user.email == email) {
            warn!("signup rejected, email taken (email={email})");
            return Err(StoreError::UserExists(email.to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        set_json(self.store.as_ref(), USERS_KEY, &users)?;
        set_json(self.store.as_ref(), CURRENT_USER_KEY, &user)?;
        info!("user signed up (user_id={}, email={email})", user.id);
        Ok(user)
    }

    /// Clear the current-user pointer. Idempotent.
    pub async fn logout(&self) -> Result<(), StoreError> {
        debug!("clearing current-user pointer");
        self.store.remove(CURRENT_USER_KEY)?;
        Ok(())
    }

    /// Read the whole users collection, empty when never written.
    fn load_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(get_json(self.store.as_ref(), USERS_KEY)?.unwrap_or_default())
    }
}
