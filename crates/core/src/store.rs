//! Persistence port - a one-key store for the session snapshot
//!
//! The session talks to a [`SessionStore`] and never to the filesystem
//! directly. Loading never fails: a missing or unreadable record is reported
//! as "no prior session" and the caller starts a fresh game.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::snapshot::{SessionSnapshot, SnapshotError};

/// Key the snapshot is stored under
pub const STORAGE_KEY: &str = "tui-2048-game-state";

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Narrow persistence interface injected into the session
pub trait SessionStore {
    /// Previously saved session, or `None` if absent or corrupt
    fn load(&mut self) -> Option<SessionSnapshot>;

    /// Replace the saved session
    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<(), StoreError>;
}

impl<S: SessionStore + ?Sized> SessionStore for &mut S {
    fn load(&mut self) -> Option<SessionSnapshot> {
        (**self).load()
    }

    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        (**self).save(snapshot)
    }
}

/// Decode a raw record, treating anything malformed as absent
fn decode(raw: &str, origin: &str) -> Option<SessionSnapshot> {
    match SessionSnapshot::from_json(raw) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!("discarding saved session from {origin}: {e}");
            None
        }
    }
}

/// Stores the snapshot as a JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileStore {
    fn load(&mut self) -> Option<SessionSnapshot> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => decode(&raw, &self.path.display().to_string()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no saved session at {}", self.path.display());
                None
            }
            Err(e) => {
                warn!("cannot read {}: {e}", self.path.display());
                None
            }
        }
    }

    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        let json = snapshot.to_json()?;
        // Write-then-rename: the previous record survives a failed write.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-process store holding the raw JSON record
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Option<String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a raw record, as if a previous run had saved it
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
            writes: 0,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Number of successful saves
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SessionStore for MemoryStore {
    fn load(&mut self) -> Option<SessionSnapshot> {
        self.raw.as_deref().and_then(|raw| decode(raw, STORAGE_KEY))
    }

    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        self.raw = Some(snapshot.to_json()?);
        self.writes += 1;
        Ok(())
    }
}
