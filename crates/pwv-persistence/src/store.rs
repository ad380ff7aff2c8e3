//! Session record storage.

use std::cell::RefCell;
use std::cmp::Reverse;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use pwv_model::SessionRecord;

use crate::error::{PersistenceError, Result};

/// File name of the JSON session store inside the data directory.
pub const SESSIONS_FILE_NAME: &str = "sessions.json";

/// Storage for the full list of session records.
///
/// Implementors only provide whole-list `load` and `save`; lookups and
/// single-record updates are layered on top.
pub trait SessionStore {
    /// Load every stored record. Unreadable storage yields an empty list.
    fn load(&self) -> Vec<SessionRecord>;

    /// Replace the stored list.
    fn save(&self, sessions: &[SessionRecord]) -> Result<()>;

    fn find_by_id(&self, session_id: &str) -> Result<SessionRecord> {
        self.load()
            .into_iter()
            .find(|record| record.session_id == *session_id)
            .ok_or_else(|| PersistenceError::SessionNotFound {
                selector: session_id.to_string(),
            })
    }

    fn append(&self, record: SessionRecord) -> Result<()> {
        let mut sessions = self.load();
        sessions.push(record);
        self.save(&sessions)
    }

    /// Apply `change` to the record with `session_id` and persist the list.
    ///
    /// `updated_at` is refreshed after the change runs.
    fn update(
        &self,
        session_id: &str,
        change: &mut dyn FnMut(&mut SessionRecord),
    ) -> Result<SessionRecord> {
        let mut sessions = self.load();
        let record = sessions
            .iter_mut()
            .find(|record| record.session_id == *session_id)
            .ok_or_else(|| PersistenceError::SessionNotFound {
                selector: session_id.to_string(),
            })?;
        change(record);
        record.touch();
        let updated = record.clone();
        self.save(&sessions)?;
        Ok(updated)
    }
}

/// Session store backed by a pretty-printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonSessionStore {
    path: PathBuf,
}

impl JsonSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/sessions.json`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(SESSIONS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for JsonSessionStore {
    fn load(&self) -> Vec<SessionRecord> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no session store yet");
                return Vec::new();
            }
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "session store unreadable, starting empty"
                );
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<SessionRecord>>(&text) {
            Ok(sessions) => {
                tracing::debug!(
                    path = %self.path.display(),
                    count = sessions.len(),
                    "loaded sessions"
                );
                sessions
            }
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "session store is corrupt, starting empty"
                );
                Vec::new()
            }
        }
    }

    fn save(&self, sessions: &[SessionRecord]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(sessions)
            .map_err(|source| PersistenceError::Serialization { source })?;
        write_atomic(&self.path, &bytes)?;
        tracing::info!(
            path = %self.path.display(),
            count = sessions.len(),
            "saved sessions"
        );
        Ok(())
    }
}

/// In-process store, for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RefCell<Vec<SessionRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sessions(sessions: Vec<SessionRecord>) -> Self {
        Self {
            sessions: RefCell::new(sessions),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Vec<SessionRecord> {
        self.sessions.borrow().clone()
    }

    fn save(&self, sessions: &[SessionRecord]) -> Result<()> {
        *self.sessions.borrow_mut() = sessions.to_vec();
        Ok(())
    }
}

/// Sort records by `updated_at`, newest first. Ties keep their stored order.
pub fn sessions_by_recency(mut sessions: Vec<SessionRecord>) -> Vec<SessionRecord> {
    sessions.sort_by_key(|record| Reverse(record.updated_at.clone()));
    sessions
}

/// Resolve a selector against the recency-sorted list.
///
/// A selector that parses as a number is a 1-based list position; anything
/// else is matched against session ids.
pub fn select_session(sessions: &[SessionRecord], selector: &str) -> Result<SessionRecord> {
    let selector = selector.trim();
    let found = match selector.parse::<usize>() {
        Ok(position) if position >= 1 => sessions.get(position - 1),
        Ok(_) => None,
        Err(_) => sessions.iter().find(|record| record.session_id == *selector),
    };
    found
        .cloned()
        .ok_or_else(|| PersistenceError::SessionNotFound {
            selector: selector.to_string(),
        })
}

/// Write `bytes` to `path` through a synced temp file and a rename.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| PersistenceError::io("create directory", parent, e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file =
        File::create(&temp_path).map_err(|e| PersistenceError::io("create", &temp_path, e))?;
    file.write_all(bytes)
        .map_err(|e| PersistenceError::io("write", &temp_path, e))?;
    file.sync_all()
        .map_err(|e| PersistenceError::io("sync", &temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|source| PersistenceError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source,
    })
}
