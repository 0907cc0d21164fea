use crate::error::AuthError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

/// Fixed entries the client keeps between runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CredentialKey {
    AccessToken,
    RefreshToken,
    User,
}

impl CredentialKey {
    pub const ALL: [CredentialKey; 3] = [
        CredentialKey::AccessToken,
        CredentialKey::RefreshToken,
        CredentialKey::User,
    ];

    /// Name the entry is stored under
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessToken => "accessToken",
            Self::RefreshToken => "refreshToken",
            Self::User => "user",
        }
    }
}

impl std::fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synchronous key-value storage for credentials and the cached user profile.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: CredentialKey) -> Result<Option<String>, AuthError>;

    fn set(&self, key: CredentialKey, value: &str) -> Result<(), AuthError>;

    fn remove(&self, key: CredentialKey) -> Result<(), AuthError>;

    /// Remove every credential entry
    fn clear(&self) -> Result<(), AuthError> {
        for key in CredentialKey::ALL {
            self.remove(key)?;
        }
        Ok(())
    }
}

/// Process-local store, lost on exit
#[derive(Default)]
pub struct MemoryCredentialStore {
    entries: RwLock<BTreeMap<CredentialKey, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: CredentialKey) -> Result<Option<String>, AuthError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| AuthError::CredentialStorage("credential lock poisoned".to_string()))?;
        Ok(entries.get(&key).cloned())
    }

    fn set(&self, key: CredentialKey, value: &str) -> Result<(), AuthError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| AuthError::CredentialStorage("credential lock poisoned".to_string()))?;
        entries.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: CredentialKey) -> Result<(), AuthError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| AuthError::CredentialStorage("credential lock poisoned".to_string()))?;
        entries.remove(&key);
        Ok(())
    }
}

/// JSON file in the user's cache directory, readable by the owner only
pub struct FileCredentialStore {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new() -> Result<Self, AuthError> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| AuthError::Configuration("Could not find cache directory".to_string()))?
            .join("wander");
        Self::in_dir(&cache_dir)
    }

    pub fn in_dir(dir: &Path) -> Result<Self, AuthError> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                AuthError::CredentialStorage(format!("Failed to create cache directory: {}", e))
            })?;
        }

        Ok(Self {
            path: dir.join("credentials.json"),
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, AuthError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let json = fs::read_to_string(&self.path).map_err(|e| {
            AuthError::CredentialStorage(format!("Failed to read credentials: {}", e))
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), AuthError> {
        if entries.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path).map_err(|e| {
                    AuthError::CredentialStorage(format!("Failed to delete credentials: {}", e))
                })?;
            }
            return Ok(());
        }

        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json).map_err(|e| {
            AuthError::CredentialStorage(format!("Failed to save credentials: {}", e))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.path)
                .map_err(|e| {
                    AuthError::CredentialStorage(format!("Failed to get file permissions: {}", e))
                })?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms).map_err(|e| {
                AuthError::CredentialStorage(format!("Failed to set file permissions: {}", e))
            })?;
        }

        Ok(())
    }

    fn modify<F>(&self, update_fn: F) -> Result<(), AuthError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| AuthError::CredentialStorage("credential lock poisoned".to_string()))?;
        let mut entries = self.load()?;
        update_fn(&mut entries);
        self.save(&entries)
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: CredentialKey) -> Result<Option<String>, AuthError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| AuthError::CredentialStorage("credential lock poisoned".to_string()))?;
        Ok(self.load()?.remove(key.as_str()))
    }

    fn set(&self, key: CredentialKey, value: &str) -> Result<(), AuthError> {
        self.modify(|entries| {
            entries.insert(key.as_str().to_string(), value.to_string());
        })
    }

    fn remove(&self, key: CredentialKey) -> Result<(), AuthError> {
        self.modify(|entries| {
            entries.remove(key.as_str());
        })
    }

    fn clear(&self) -> Result<(), AuthError> {
        self.modify(|entries| {
            for key in CredentialKey::ALL {
                entries.remove(key.as_str());
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_get_clear() {
        let store = MemoryCredentialStore::new();
        store.set(CredentialKey::AccessToken, "access").unwrap();
        store.set(CredentialKey::RefreshToken, "refresh").unwrap();
        store.set(CredentialKey::User, "{}").unwrap();

        assert_eq!(
            store.get(CredentialKey::AccessToken).unwrap().as_deref(),
            Some("access")
        );

        store.clear().unwrap();
        for key in CredentialKey::ALL {
            assert!(store.get(key).unwrap().is_none());
        }
    }

    #[test]
    fn file_store_persists_between_instances() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::in_dir(dir.path()).unwrap();
        store.set(CredentialKey::RefreshToken, "refresh").unwrap();

        let reopened = FileCredentialStore::in_dir(dir.path()).unwrap();
        assert_eq!(
            reopened.get(CredentialKey::RefreshToken).unwrap().as_deref(),
            Some("refresh")
        );
        assert!(reopened.get(CredentialKey::AccessToken).unwrap().is_none());
    }

    #[test]
    fn file_store_uses_fixed_key_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::in_dir(dir.path()).unwrap();
        store.set(CredentialKey::AccessToken, "a").unwrap();
        store.set(CredentialKey::User, r#"{"nickname":"kim"}"#).unwrap();

        let raw: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw.get("accessToken").map(String::as_str), Some("a"));
        assert!(raw.contains_key("user"));
    }

    #[test]
    fn file_store_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::in_dir(dir.path()).unwrap();
        store.set(CredentialKey::AccessToken, "a").unwrap();
        assert!(store.path().exists());

        store.clear().unwrap();
        assert!(!store.path().exists());
        assert!(store.get(CredentialKey::AccessToken).unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::in_dir(dir.path()).unwrap();
        store.set(CredentialKey::AccessToken, "a").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
