// Rust guideline compliant 2026-10-12

//! File-backed cache of discovered workflows.
//!
//! All workflows live in one JSON document:
//!
//! ```json
//! {
//!   "_meta": { "version": 1, "updated_at": "2024-01-15T10:00:00Z" },
//!   "issue_types": {
//!     "Task": { "id": "10001", "discovered_from": "PROJ-1", "discovered_at": "...",
//!               "states": { "Open": [{ "id": "11", "name": "Start", "to": "In Progress" }] } }
//!   }
//! }
//! ```
//!
//! The document is loaded lazily on first access and every write replaces
//! the whole file via a temp file and rename, so readers never observe a
//! partial file. There is no cross-process locking; concurrent writers race
//! at the rename and the last one wins.

use crate::error::{Error, Result};
use crate::graph::{WorkflowGraph, WorkflowRecord};
use crate::models::fold;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Current on-disk format version.
pub const STORE_VERSION: u32 = 1;

/// Default file name inside the config directory.
pub const DEFAULT_STORE_FILE: &str = "workflows.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreMeta {
    version: u32,
    #[serde(default, with = "crate::timestamp::option")]
    updated_at: Option<DateTime<Utc>>,
}

impl Default for StoreMeta {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(rename = "_meta", default)]
    meta: StoreMeta,
    #[serde(default)]
    issue_types: BTreeMap<String, WorkflowRecord>,
}

impl StoreDocument {
    /// Finds the stored key for `issue_type`, exact spelling first.
    fn key_for(&self, issue_type: &str) -> Option<String> {
        if self.issue_types.contains_key(issue_type) {
            return Some(issue_type.to_string());
        }
        let wanted = fold(issue_type);
        self.issue_types
            .keys()
            .find(|key| fold(key) == wanted)
            .cloned()
    }
}

/// Persistent cache of `WorkflowGraph`s keyed by issue type name.
#[derive(Debug)]
pub struct WorkflowStore {
    path: PathBuf,
    doc: OnceCell<StoreDocument>,
}

impl WorkflowStore {
    /// Creates a store backed by `path`. Nothing is read until first access.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSON cache file
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidInput(
                "Store path cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            path,
            doc: OnceCell::new(),
        })
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached workflow for `issue_type`, if any.
    ///
    /// Issue type names are matched exactly first, then case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file exists but cannot be read.
    pub fn get(&self, issue_type: &str) -> Result<Option<WorkflowGraph>> {
        let doc = self.document()?;
        Ok(doc.key_for(issue_type).and_then(|key| {
            doc.issue_types
                .get(&key)
                .map(|record| WorkflowGraph::from_record(&key, record.clone()))
        }))
    }

    /// Stores `graph` under its issue type, replacing any previous graph.
    ///
    /// The whole file is rewritten atomically and the store timestamp is
    /// updated. The in-memory copy only changes once the write succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The graph has an empty issue type
    /// - The backing file cannot be read or written
    pub fn save(&mut self, graph: &WorkflowGraph) -> Result<()> {
        if graph.issue_type.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Workflow issue type cannot be empty".to_string(),
            ));
        }

        let mut doc = self.document()?.clone();
        let key = doc
            .key_for(&graph.issue_type)
            .unwrap_or_else(|| graph.issue_type.clone());
        doc.issue_types.insert(key, graph.to_record());
        doc.meta = StoreMeta {
            version: STORE_VERSION,
            updated_at: Some(Utc::now()),
        };

        self.write(&doc)?;
        debug!(issue_type = %graph.issue_type, path = %self.path.display(), "Saved workflow");
        self.doc = OnceCell::from(doc);
        Ok(())
    }

    /// Removes the workflow for `issue_type`.
    ///
    /// # Returns
    ///
    /// True if an entry was removed. A missing entry is not an error and
    /// leaves the file untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be read or written.
    pub fn delete(&mut self, issue_type: &str) -> Result<bool> {
        let mut doc = self.document()?.clone();
        let Some(key) = doc.key_for(issue_type) else {
            return Ok(false);
        };

        doc.issue_types.remove(&key);
        doc.meta = StoreMeta {
            version: STORE_VERSION,
            updated_at: Some(Utc::now()),
        };

        self.write(&doc)?;
        debug!(issue_type = %key, "Deleted workflow");
        self.doc = OnceCell::from(doc);
        Ok(true)
    }

    /// Lists cached issue type names in sorted order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file exists but cannot be read.
    pub fn list_types(&self) -> Result<Vec<String>> {
        Ok(self.document()?.issue_types.keys().cloned().collect())
    }

    /// When the store was last written, if ever.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file exists but cannot be read.
    pub fn updated_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.document()?.meta.updated_at)
    }

    fn document(&self) -> Result<&StoreDocument> {
        if let Some(doc) = self.doc.get() {
            return Ok(doc);
        }
        let loaded = Self::read(&self.path)?;
        Ok(self.doc.get_or_init(|| loaded))
    }

    /// Reads the document from disk.
    ///
    /// A missing file is an empty store. A file that does not parse is
    /// logged and treated as empty; the cache can always be rediscovered.
    fn read(path: &Path) -> Result<StoreDocument> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(StoreDocument::default()),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str::<StoreDocument>(&content) {
            Ok(doc) => {
                if doc.meta.version > STORE_VERSION {
                    warn!(
                        path = %path.display(),
                        version = doc.meta.version,
                        "Workflow cache was written by a newer version"
                    );
                }
                Ok(doc)
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "Ignoring unreadable workflow cache"
                );
                Ok(StoreDocument::default())
            }
        }
    }

    /// Writes `doc` to a temp file next to the target, then renames it over the target.
    fn write(&self, doc: &StoreDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("json.tmp");
        let result = Self::write_temp(&temp_path, doc)
            .and_then(|()| fs::rename(&temp_path, &self.path).map_err(Error::from));

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }

    fn write_temp(temp_path: &Path, doc: &StoreDocument) -> Result<()> {
        let mut file = File::create(temp_path)?;
        serde_json::to_writer_pretty(&mut file, doc)?;
        file.write_all(b"\n")?;
        file.sync_all()?;
        Ok(())
    }
}
