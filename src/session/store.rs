//! On-disk persistence of the marker registry

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::config::markers_db_path;
use crate::session::error::StoreError;

/// A single JSON document holding the registry between sessions
#[derive(Debug, Clone)]
pub struct MarkerStore {
    path: PathBuf,
}

impl MarkerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store located at the standard file name inside a session scratch directory
    pub fn in_scratch_dir(scratch_dir: &Path) -> Self {
        Self::new(markers_db_path(scratch_dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted document.
    ///
    /// Returns `Ok(None)` when nothing has been persisted yet.
    pub fn load(&self) -> Result<Option<Value>, StoreError> {
        if !self.path.exists() {
            debug!("No persisted markers at {:?}", self.path);
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        let doc: Value = serde_json::from_str(&contents)?;
        if !doc.is_object() {
            return Err(StoreError::NotAnObject);
        }

        Ok(Some(doc))
    }

    /// Writes `doc` as the complete contents of the store
    pub fn save(&self, doc: &Value) -> Result<(), StoreError> {
        let write_error = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }

        let contents = serde_json::to_string(doc)?;
        std::fs::write(&self.path, contents).map_err(write_error)?;

        debug!("Persisted markers to {:?}", self.path);
        Ok(())
    }
}
