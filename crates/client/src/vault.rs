//! Durable session storage.
//!
//! Two entries — the bearer token and a serialized identity snapshot —
//! written together on login, cleared together on logout. The gateway
//! reads the token entry on every request; only the session store writes.

use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

use stockdesk_auth::Identity;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("vault io failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("vault entry corrupted: {0}")]
    Corrupted(String),

    #[error("no usable application data directory")]
    NoDataDir,
}

/// Durable store for the session's token and identity snapshot.
pub trait SessionVault: Send + Sync {
    /// Currently persisted bearer token, if any.
    fn token(&self) -> Result<Option<String>, VaultError>;

    /// Currently persisted identity snapshot, if any.
    fn identity(&self) -> Result<Option<Identity>, VaultError>;

    /// Persist both entries (one logical write).
    fn store(&self, token: &str, identity: &Identity) -> Result<(), VaultError>;

    /// Remove both entries. Succeeds when nothing is stored.
    fn clear(&self) -> Result<(), VaultError>;
}

/// File-backed vault under the OS application data directory.
#[derive(Debug, Clone)]
pub struct FileVault {
    dir: PathBuf,
}

impl FileVault {
    /// Vault at `{app_data_dir}/stockdesk`.
    pub fn open() -> Result<Self, VaultError> {
        let base = dirs::data_dir()
            .or_else(|| {
                dirs::home_dir().map(|mut h| {
                    h.push(".local");
                    h.push("share");
                    h
                })
            })
            .ok_or(VaultError::NoDataDir)?;

        let mut dir = base;
        dir.push("stockdesk");
        Self::at(dir)
    }

    /// Vault rooted at an explicit directory.
    pub fn at(dir: PathBuf) -> Result<Self, VaultError> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join("token")
    }

    fn identity_path(&self) -> PathBuf {
        self.dir.join("identity.json")
    }
}

fn read_optional(path: &PathBuf) -> Result<Option<String>, VaultError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn remove_optional(path: &PathBuf) -> Result<(), VaultError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

impl SessionVault for FileVault {
    fn token(&self) -> Result<Option<String>, VaultError> {
        let token = read_optional(&self.token_path())?
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Ok(token)
    }

    fn identity(&self) -> Result<Option<Identity>, VaultError> {
        let Some(contents) = read_optional(&self.identity_path())? else {
            return Ok(None);
        };
        let identity = serde_json::from_str(&contents)
            .map_err(|e| VaultError::Corrupted(e.to_string()))?;
        Ok(Some(identity))
    }

    fn store(&self, token: &str, identity: &Identity) -> Result<(), VaultError> {
        let snapshot =
            serde_json::to_string(identity).map_err(|e| VaultError::Corrupted(e.to_string()))?;
        std::fs::write(self.token_path(), token)?;
        std::fs::write(self.identity_path(), snapshot)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), VaultError> {
        remove_optional(&self.token_path())?;
        remove_optional(&self.identity_path())?;
        Ok(())
    }
}

/// In-memory vault for tests.
#[derive(Debug, Default)]
pub struct MemoryVault {
    entries: Mutex<(Option<String>, Option<Identity>)>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionVault for MemoryVault {
    fn token(&self) -> Result<Option<String>, VaultError> {
        Ok(self
            .entries
            .lock()
            .map_err(|_| VaultError::Corrupted("vault lock poisoned".to_string()))?
            .0
            .clone())
    }

    fn identity(&self) -> Result<Option<Identity>, VaultError> {
        Ok(self
            .entries
            .lock()
            .map_err(|_| VaultError::Corrupted("vault lock poisoned".to_string()))?
            .1
            .clone())
    }

    fn store(&self, token: &str, identity: &Identity) -> Result<(), VaultError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| VaultError::Corrupted("vault lock poisoned".to_string()))?;
        *entries = (Some(token.to_string()), Some(identity.clone()));
        Ok(())
    }

    fn clear(&self) -> Result<(), VaultError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| VaultError::Corrupted("vault lock poisoned".to_string()))?;
        *entries = (None, None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use stockdesk_auth::Role;
    use stockdesk_core::UserId;

    use super::*;

    fn identity() -> Identity {
        Identity {
            id: UserId::new(4),
            username: "mvega".to_string(),
            email: "mvega@example.com".to_string(),
            role: Role::User,
            temporary_password: false,
        }
    }

    #[test]
    fn file_vault_round_trips_both_entries() {
        let dir = tempfile::tempdir().unwrap();
        let vault = FileVault::at(dir.path().join("vault")).unwrap();

        assert!(vault.token().unwrap().is_none());
        assert!(vault.identity().unwrap().is_none());

        vault.store("tok-123", &identity()).unwrap();
        assert_eq!(vault.token().unwrap().as_deref(), Some("tok-123"));
        assert_eq!(vault.identity().unwrap(), Some(identity()));
    }

    #[test]
    fn clear_removes_both_entries_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let vault = FileVault::at(dir.path().join("vault")).unwrap();

        vault.store("tok-123", &identity()).unwrap();
        vault.clear().unwrap();
        vault.clear().unwrap();

        assert!(vault.token().unwrap().is_none());
        assert!(vault.identity().unwrap().is_none());
    }

    #[test]
    fn corrupted_identity_snapshot_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let vault = FileVault::at(dir.path().to_path_buf()).unwrap();

        std::fs::write(dir.path().join("identity.json"), "{not json").unwrap();
        assert!(matches!(vault.identity(), Err(VaultError::Corrupted(_))));
    }

    #[test]
    fn empty_token_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let vault = FileVault::at(dir.path().to_path_buf()).unwrap();

        std::fs::write(dir.path().join("token"), "  \n").unwrap();
        assert!(vault.token().unwrap().is_none());
    }
}
