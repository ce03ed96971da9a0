// ── Persisted credential storage ──
//
// Two independent slots, mirroring the browser layout the dashboard was
// designed around: a short-lived token (`auth-token`, 7-day expiry, with
// secure/same-site flags) and a long-lived user snapshot (`user-data`).
// An expired token reads back as absent.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use tracing::{debug, trace};

use crate::model::Session;

pub const TOKEN_FILE: &str = "auth-token.json";
pub const USER_FILE: &str = "user-data.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt session data in {location}: {source}")]
    Corrupt {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{slot} slot is unusable after a panic while it was held")]
    Poisoned { slot: &'static str },
}

/// Cookie `SameSite` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

/// The bearer token plus its cookie attributes.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoredToken {
    #[serde(serialize_with = "expose", deserialize_with = "conceal")]
    pub token: SecretString,
    pub expires_at: DateTime<Utc>,
    pub secure: bool,
    pub same_site: SameSite,
}

impl StoredToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

impl std::fmt::Debug for StoredToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredToken")
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("secure", &self.secure)
            .field("same_site", &self.same_site)
            .finish()
    }
}

fn expose<S: Serializer>(secret: &SecretString, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(secret.expose_secret())
}

fn conceal<'de, D: Deserializer<'de>>(d: D) -> Result<SecretString, D::Error> {
    String::deserialize(d).map(SecretString::from)
}

/// Backing store for the session token and user snapshot.
pub trait SessionStorage: Send + Sync {
    /// The stored token, expired or not.
    fn load_token(&self) -> Result<Option<StoredToken>, StorageError>;
    fn save_token(&self, token: &StoredToken) -> Result<(), StorageError>;
    fn clear_token(&self) -> Result<(), StorageError>;

    fn load_user(&self) -> Result<Option<Session>, StorageError>;
    fn save_user(&self, user: &Session) -> Result<(), StorageError>;
    fn clear_user(&self) -> Result<(), StorageError>;

    /// The stored token if it has not expired yet.
    fn active_token(&self) -> Result<Option<StoredToken>, StorageError> {
        let now = Utc::now();
        Ok(self.load_token()?.filter(|t| !t.is_expired(now)))
    }

    /// Remove both slots. Attempts both even if the first fails.
    fn clear_all(&self) -> Result<(), StorageError> {
        let token = self.clear_token();
        let user = self.clear_user();
        token.and(user)
    }
}

// ── File-backed storage ──────────────────────────────────────────────

/// Stores each slot as a JSON file in one directory (mode 0600 on Unix).
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read<T: serde::de::DeserializeOwned>(&self, file: &str) -> Result<Option<T>, StorageError> {
        let path = self.dir.join(file);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        trace!(path = %path.display(), "read session file");
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                location: path.display().to_string(),
                source,
            })
    }

    fn write<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StorageError> {
        let path = self.dir.join(file);
        let io_err = |source| StorageError::Io {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let json = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Corrupt {
            location: path.display().to_string(),
            source,
        })?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut handle = options.open(&path).map_err(io_err)?;
        handle.write_all(&json).map_err(io_err)?;
        debug!(path = %path.display(), "wrote session file");
        Ok(())
    }

    fn remove(&self, file: &str) -> Result<(), StorageError> {
        let path = self.dir.join(file);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

impl SessionStorage for FileStorage {
    fn load_token(&self) -> Result<Option<StoredToken>, StorageError> {
        self.read(TOKEN_FILE)
    }

    fn save_token(&self, token: &StoredToken) -> Result<(), StorageError> {
        self.write(TOKEN_FILE, token)
    }

    fn clear_token(&self) -> Result<(), StorageError> {
        self.remove(TOKEN_FILE)
    }

    fn load_user(&self) -> Result<Option<Session>, StorageError> {
        self.read(USER_FILE)
    }

    fn save_user(&self, user: &Session) -> Result<(), StorageError> {
        self.write(USER_FILE, user)
    }

    fn clear_user(&self) -> Result<(), StorageError> {
        self.remove(USER_FILE)
    }
}

// ── In-memory storage ────────────────────────────────────────────────

/// Process-local storage. The user slot keeps raw JSON so a corrupt
/// snapshot can be simulated with [`MemoryStorage::with_raw_user`].
#[derive(Debug, Default)]
pub struct MemoryStorage {
    token: Mutex<Option<StoredToken>>,
    user: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the user slot with arbitrary text.
    pub fn with_raw_user(mut self, raw: impl Into<String>) -> Self {
        *self.user.get_mut().unwrap_or_else(PoisonError::into_inner) = Some(raw.into());
        self
    }

    /// Raw JSON currently in the user slot.
    pub fn raw_user(&self) -> Option<String> {
        self.user.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

fn slot<'a, T>(
    lock: &'a Mutex<T>,
    name: &'static str,
) -> Result<MutexGuard<'a, T>, StorageError> {
    lock.lock().map_err(|_| StorageError::Poisoned { slot: name })
}

impl SessionStorage for MemoryStorage {
    fn load_token(&self) -> Result<Option<StoredToken>, StorageError> {
        Ok(slot(&self.token, "token")?.clone())
    }

    fn save_token(&self, token: &StoredToken) -> Result<(), StorageError> {
        *slot(&self.token, "token")? = Some(token.clone());
        Ok(())
    }

    fn clear_token(&self) -> Result<(), StorageError> {
        *slot(&self.token, "token")? = None;
        Ok(())
    }

    fn load_user(&self) -> Result<Option<Session>, StorageError> {
        let raw = slot(&self.user, "user")?.clone();
        raw.map(|raw| {
            serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
                location: "memory".into(),
                source,
            })
        })
        .transpose()
    }

    fn save_user(&self, user: &Session) -> Result<(), StorageError> {
        let raw = serde_json::to_string(user).map_err(|source| StorageError::Corrupt {
            location: "memory".into(),
            source,
        })?;
        *slot(&self.user, "user")? = Some(raw);
        Ok(())
    }

    fn clear_user(&self) -> Result<(), StorageError> {
        *slot(&self.user, "user")? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::Duration;

    use super::*;

    fn token(expires_at: DateTime<Utc>) -> StoredToken {
        StoredToken {
            token: "tok".to_string().into(),
            expires_at,
            secure: true,
            same_site: SameSite::Lax,
        }
    }

    fn session() -> Session {
        Session {
            id: 1,
            email: "a@x.com".into(),
            name: "A".into(),
            avatar: None,
            email_verified_at: None,
            created_at: "2024-01-01".into(),
            updated_at: "2024-01-01".into(),
            roles: vec![],
            branch: None,
            all_permissions: vec![],
            permissions: vec![],
        }
    }

    #[test]
    fn file_storage_round_trips_both_slots() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("default"));

        storage.save_token(&token(Utc::now() + Duration::days(7))).unwrap();
        storage.save_user(&session()).unwrap();

        let loaded = storage.active_token().unwrap().unwrap();
        assert_eq!(loaded.token.expose_secret(), "tok");
        assert_eq!(storage.load_user().unwrap(), Some(session()));

        let on_disk = fs::read_to_string(dir.path().join("default").join(TOKEN_FILE)).unwrap();
        assert!(on_disk.contains("\"same_site\": \"lax\""));

        storage.clear_all().unwrap();
        assert!(storage.load_token().unwrap().is_none());
        assert!(storage.load_user().unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn file_storage_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.save_user(&session()).unwrap();

        let mode = fs::metadata(dir.path().join(USER_FILE)).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn expired_token_reads_as_absent() {
        let storage = MemoryStorage::new();
        storage.save_token(&token(Utc::now() - Duration::seconds(1))).unwrap();

        assert!(storage.load_token().unwrap().is_some());
        assert!(storage.active_token().unwrap().is_none());
    }

    #[test]
    fn corrupt_user_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(USER_FILE), "{not json").unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(matches!(storage.load_user(), Err(StorageError::Corrupt { .. })));
    }

    #[test]
    fn poisoned_memory_slot_is_an_error() {
        let storage = MemoryStorage::new();
        std::thread::scope(|scope| {
            let poisoner = scope.spawn(|| {
                let _held = storage.token.lock().unwrap();
                panic!("poison the token slot");
            });
            assert!(poisoner.join().is_err());
        });

        assert!(matches!(
            storage.load_token(),
            Err(StorageError::Poisoned { slot: "token" })
        ));
        assert!(storage.clear_all().is_err());
        assert!(storage.load_user().unwrap().is_none());
    }

    #[test]
    fn debug_output_redacts_token() {
        let rendered = format!("{:?}", token(Utc::now()));
        assert!(!rendered.contains("tok\""));
        assert!(rendered.contains("[REDACTED]"));
    }
}
