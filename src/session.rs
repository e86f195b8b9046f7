use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Guide,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guide => "guide",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The one signed-in user. At most one exists in memory and on disk at a
/// time; a new sign-in overwrites the previous record unconditionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub display_name: String,
    pub role: Role,
    pub email: String,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to encode identity: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// File-backed session state. Every mutation is written through to disk
/// synchronously; there is no separate dirty or sync step.
pub struct SessionStore {
    dir: PathBuf,
    current: Option<Identity>,
}

impl SessionStore {
    pub fn new(base: &Path) -> Self {
        Self {
            dir: base.to_path_buf(),
            current: None,
        }
    }

    pub fn identity_path(&self) -> PathBuf {
        self.dir.join("config").join("identity.json")
    }

    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    /// Reads the persisted identity, if any. A missing file means nobody is
    /// signed in; an unreadable or corrupt file is treated the same way and
    /// left in place for inspection.
    pub fn restore(&mut self) {
        let path = self.identity_path();
        self.current = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => Some(identity),
                Err(err) => {
                    log::warn!(
                        "ignoring corrupt identity file {}: {err}",
                        path.display()
                    );
                    None
                }
            },
            Err(_) => None,
        };
    }

    /// Signs the identity in and writes it through to disk. The in-memory
    /// identity is updated even when the write fails, so a read-only disk
    /// degrades to a session that lasts until the process exits.
    pub fn set_identity(&mut self, identity: Identity) -> Result<(), SessionError> {
        let path = self.identity_path();
        let json = serde_json::to_string_pretty(&identity)?;
        self.current = Some(identity);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SessionError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        // Write to a sibling temp file first so a crash mid-write never
        // leaves a truncated identity record behind.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| SessionError::Write {
            path: tmp.clone(),
            source,
        })?;
        if let Err(source) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(SessionError::Write { path, source });
        }

        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.current = None;
        let path = self.identity_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Remove { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_identity() -> Identity {
        Identity {
            id: "student@university.edu".to_string(),
            display_name: "Student User".to_string(),
            role: Role::Student,
            email: "student@university.edu".to_string(),
        }
    }

    #[test]
    fn given_saved_identity_when_restored_in_fresh_store_then_it_round_trips() {
        let dir = tempdir().unwrap();
        let identity = sample_identity();

        let mut store = SessionStore::new(dir.path());
        store.set_identity(identity.clone()).unwrap();

        let mut fresh = SessionStore::new(dir.path());
        fresh.restore();
        assert_eq!(fresh.current(), Some(&identity));
    }

    #[test]
    fn given_cleared_store_when_restored_then_no_identity_is_present() {
        let dir = tempdir().unwrap();
        let mut store = SessionStore::new(dir.path());
        store.set_identity(sample_identity()).unwrap();
        store.clear().unwrap();
        assert!(store.current().is_none());

        let mut fresh = SessionStore::new(dir.path());
        fresh.restore();
        assert!(fresh.current().is_none());
    }

    #[test]
    fn given_corrupt_identity_file_when_restored_then_it_is_treated_as_absent() {
        let dir = tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        std::fs::create_dir_all(store.identity_path().parent().unwrap()).unwrap();
        std::fs::write(store.identity_path(), "{not json").unwrap();

        let mut store = SessionStore::new(dir.path());
        store.restore();
        assert!(store.current().is_none());
        // The broken file stays on disk for inspection.
        assert!(store.identity_path().exists());
    }

    #[test]
    fn given_existing_identity_when_a_new_one_is_set_then_it_overwrites() {
        let dir = tempdir().unwrap();
        let mut store = SessionStore::new(dir.path());
        store.set_identity(sample_identity()).unwrap();

        let guide = Identity {
            id: "guide@university.edu".to_string(),
            display_name: "Guide Smith".to_string(),
            role: Role::Guide,
            email: "guide@university.edu".to_string(),
        };
        store.set_identity(guide.clone()).unwrap();
        assert_eq!(store.current(), Some(&guide));

        let mut fresh = SessionStore::new(dir.path());
        fresh.restore();
        assert_eq!(fresh.current(), Some(&guide));
    }

    #[test]
    fn clearing_an_empty_store_is_not_an_error() {
        let dir = tempdir().unwrap();
        let mut store = SessionStore::new(dir.path());
        assert!(store.clear().is_ok());
    }

    #[test]
    fn given_unwritable_config_dir_then_sign_in_survives_in_memory() {
        let dir = tempdir().unwrap();
        // A file where the config directory should be makes the write fail.
        std::fs::write(dir.path().join("config"), "not a directory").unwrap();

        let mut store = SessionStore::new(dir.path());
        assert!(store.set_identity(sample_identity()).is_err());
        assert_eq!(store.current(), Some(&sample_identity()));
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Guide).unwrap();
        assert_eq!(json, "\"guide\"");
        let back: Role = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(back, Role::Student);
    }
}
