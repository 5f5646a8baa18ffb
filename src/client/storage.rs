//! Local persistence of the logged-in identity.
//!
//! The identity is kept in a small JSON key/value file under the key
//! `currentUser`. This is the only state that survives between runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::db::UserIdentity;
use crate::Result;

/// Key under which the identity is stored.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// File-backed store for the current user identity.
#[derive(Debug, Clone)]
pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    /// Create a store backed by the file at `path`. The file is created lazily.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, Value>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn write_entries(&self, entries: &BTreeMap<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }

    /// Load the remembered identity, if any.
    pub fn load(&self) -> Result<Option<UserIdentity>> {
        let mut entries = self.read_entries()?;
        match entries.remove(CURRENT_USER_KEY) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Remember an identity, replacing any previous one.
    pub fn save(&self, identity: &UserIdentity) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(CURRENT_USER_KEY.to_string(), serde_json::to_value(identity)?);
        self.write_entries(&entries)?;
        debug!(path = %self.path.display(), "identity saved");
        Ok(())
    }

    /// Forget the remembered identity. Other keys are kept.
    pub fn clear(&self) -> Result<()> {
        let mut entries = self.read_entries()?;
        if entries.remove(CURRENT_USER_KEY).is_some() {
            self.write_entries(&entries)?;
            debug!(path = %self.path.display(), "identity cleared");
        }
        Ok(())
    }
}
