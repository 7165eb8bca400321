// ── Durable session storage ──
//
// The signed-in session survives restarts through a small key/value
// store with five fixed keys. Backends implement `SessionStorage`;
// `MemoryStorage` lives here, a file-backed one lives in hrdash-config.

use std::collections::HashMap;
use std::sync::Mutex;

use hrdash_api::{BearerToken, UserInfo};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::debug;

use crate::error::CoreError;

/// Keys written on login and removed on logout.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "camelCase")]
pub enum SessionKey {
    UserToken,
    /// JSON of the user object returned by login.
    UserInfo,
    FullName,
    Email,
    Role,
}

/// Key/value persistence for the session.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: SessionKey) -> Result<Option<String>, CoreError>;
    fn set(&self, key: SessionKey, value: &str) -> Result<(), CoreError>;
    fn remove(&self, key: SessionKey) -> Result<(), CoreError>;

    /// Remove every session key.
    fn clear(&self) -> Result<(), CoreError> {
        for key in SessionKey::iter() {
            self.remove(key)?;
        }
        Ok(())
    }
}

// ── In-memory backend ────────────────────────────────────────────────

/// Process-local storage. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<SessionKey, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<SessionKey, String>>, CoreError> {
        self.entries.lock().map_err(|_| CoreError::Storage {
            message: "session storage lock poisoned".into(),
        })
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: SessionKey) -> Result<Option<String>, CoreError> {
        Ok(self.lock()?.get(&key).cloned())
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), CoreError> {
        self.lock()?.insert(key, value.to_owned());
        Ok(())
    }

    fn remove(&self, key: SessionKey) -> Result<(), CoreError> {
        self.lock()?.remove(&key);
        Ok(())
    }
}

// ── Session records ──────────────────────────────────────────────────

/// A session read back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub token: BearerToken,
    pub user: UserInfo,
}

/// Write all five keys for a freshly authenticated session.
pub fn persist(
    storage: &dyn SessionStorage,
    token: &BearerToken,
    user: &UserInfo,
) -> Result<(), CoreError> {
    storage.set(SessionKey::UserToken, token.expose())?;
    persist_profile(storage, user)
}

/// Rewrite the profile keys after the user edited them.
pub fn persist_profile(storage: &dyn SessionStorage, user: &UserInfo) -> Result<(), CoreError> {
    let user_json = serde_json::to_string(user).map_err(|e| CoreError::Storage {
        message: format!("cannot encode user profile: {e}"),
    })?;
    storage.set(SessionKey::UserInfo, &user_json)?;
    storage.set(SessionKey::FullName, &user.full_name)?;
    storage.set(SessionKey::Email, &user.email)?;
    storage.set(SessionKey::Role, &user.role)
}

/// Read a stored session back. `None` when no token is stored.
///
/// The profile comes from `userInfo` when it parses, otherwise from the
/// individual `fullName`/`email`/`role` keys.
pub fn restore(storage: &dyn SessionStorage) -> Result<Option<StoredSession>, CoreError> {
    let Some(token) = storage.get(SessionKey::UserToken)?.filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    let parsed = storage
        .get(SessionKey::UserInfo)?
        .and_then(|raw| serde_json::from_str::<UserInfo>(&raw).ok());
    let user = match parsed {
        Some(user) => user,
        None => {
            debug!("userInfo missing or unreadable, rebuilding from profile keys");
            UserInfo {
                full_name: storage.get(SessionKey::FullName)?.unwrap_or_default(),
                email: storage.get(SessionKey::Email)?.unwrap_or_default(),
                role: storage.get(SessionKey::Role)?.unwrap_or_default(),
                ..UserInfo::default()
            }
        }
    };

    Ok(Some(StoredSession {
        token: BearerToken::new(token),
        user,
    }))
}
