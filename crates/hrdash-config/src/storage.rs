// File-backed session storage: one small JSON object per profile.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use hrdash_core::{CoreError, SessionKey, SessionStorage};

type Entries = BTreeMap<String, String>;

/// Stores the session keys as a JSON object in a single file.
///
/// The file is re-read on every access so separate processes see each
/// other's logins. A missing file is an empty session.
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Storage for a named profile under the platform data directory.
    pub fn for_profile(profile: &str) -> Self {
        Self::new(crate::session_path(profile))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Entries, CoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(storage_error(&self.path, &e)),
        };
        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&raw).map_err(|e| storage_error(&self.path, &e))
    }

    fn write(&self, entries: &Entries) -> Result<(), CoreError> {
        if entries.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                    Err(storage_error(&self.path, &e))
                }
                _ => Ok(()),
            };
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| storage_error(parent, &e))?;
        }
        let json =
            serde_json::to_string_pretty(entries).map_err(|e| storage_error(&self.path, &e))?;
        write_private(&self.path, &json).map_err(|e| storage_error(&self.path, &e))?;
        restrict_permissions(&self.path)
    }

    fn update(&self, change: impl FnOnce(&mut Entries)) -> Result<(), CoreError> {
        let _guard = self.lock.lock().map_err(|_| CoreError::Storage {
            message: "session file lock poisoned".into(),
        })?;
        let mut entries = self.read()?;
        change(&mut entries);
        self.write(&entries)
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: SessionKey) -> Result<Option<String>, CoreError> {
        Ok(self.read()?.remove(key.as_ref()))
    }

    fn set(&self, key: SessionKey, value: &str) -> Result<(), CoreError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_owned());
        })
    }

    fn remove(&self, key: SessionKey) -> Result<(), CoreError> {
        self.update(|entries| {
            entries.remove(key.as_ref());
        })
    }

    fn clear(&self) -> Result<(), CoreError> {
        self.update(BTreeMap::clear)
    }
}

fn storage_error(path: &Path, err: &dyn std::fmt::Display) -> CoreError {
    CoreError::Storage {
        message: format!("{}: {err}", path.display()),
    }
}

/// Write `contents`, creating the file owner-only from the start.
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()
}

/// Tightens a file that already existed with looser permissions.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), CoreError> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| storage_error(path, &e))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), CoreError> {
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hrdash_core::session;
    use hrdash_core::{BearerToken, UserInfo};
    use pretty_assertions::assert_eq;

    use super::*;

    fn ada() -> UserInfo {
        UserInfo {
            full_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            role: "ADMIN".into(),
            ..UserInfo::default()
        }
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("none.json"));
        assert_eq!(storage.get(SessionKey::UserToken).unwrap(), None);
        assert_eq!(session::restore(&storage).unwrap(), None);
    }

    #[test]
    fn session_survives_a_new_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions").join("default.json");

        let storage = FileSessionStorage::new(&path);
        session::persist(&storage, &BearerToken::new("jwt-abc"), &ada()).unwrap();

        let raw: Entries = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.len(), 5);
        assert_eq!(raw["userToken"], "jwt-abc");

        let restored = session::restore(&FileSessionStorage::new(&path))
            .unwrap()
            .unwrap();
        assert_eq!(restored.token.expose(), "jwt-abc");
        assert_eq!(restored.user, ada());
    }

    #[test]
    fn clear_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.json");
        let storage = FileSessionStorage::new(&path);

        storage.set(SessionKey::Email, "ada@example.com").unwrap();
        assert!(path.exists());

        storage.clear().unwrap();
        assert!(!path.exists());
        assert_eq!(storage.get(SessionKey::Email).unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.json");
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let storage = FileSessionStorage::new(&path);
        storage.set(SessionKey::UserToken, "jwt-abc").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        let fresh = dir.path().join("fresh.json");
        FileSessionStorage::new(&fresh)
            .set(SessionKey::UserToken, "jwt-abc")
            .unwrap();
        let mode = std::fs::metadata(&fresh).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = FileSessionStorage::new(&path)
            .get(SessionKey::UserToken)
            .unwrap_err();
        assert!(matches!(err, CoreError::Storage { .. }));
    }
}
