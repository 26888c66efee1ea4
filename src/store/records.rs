use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::tree::TreeRecord;

/// A directory tracked by the store.
///
/// `pid` is `"0"` for basket roots; otherwise it references the parent
/// folder row, which is what lets [`crate::tree::build_forest`] link the
/// flat listing into the sidebar tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRecord {
    pub id: String,
    pub pid: String,
    pub name: String,
    pub path: String,
}

impl FolderRecord {
    /// Create a basket-root folder row for a chosen directory.
    pub fn root_for(directory: &std::path::Path) -> Self {
        Self {
            id: new_id(),
            pid: crate::tree::ROOT_PARENT_ID.to_string(),
            name: directory
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: directory.to_string_lossy().into_owned(),
        }
    }
}

impl TreeRecord for FolderRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> &str {
        &self.pid
    }
}

/// A named grouping of one or more directories.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketRecord {
    pub id: String,
    pub name: String,
}

/// A file row inside tracked directories.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub path: String,
    pub name: String,
    pub suffix: String,
    pub size: u64,
    pub modified_ns: i64,
}

/// User input for a basket about to be created.
#[derive(Clone, Debug, Default)]
pub struct BasketDraft {
    pub name: String,
    pub directories: Vec<PathBuf>,
}

/// Validation failures checked before any store call is issued.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("A basket name is required")]
    NameRequired,
    #[error("At least one directory is required")]
    DirectoriesRequired,
}

impl BasketDraft {
    /// Check the draft; the store call is skipped when this fails.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::NameRequired);
        }
        if self.directories.is_empty() {
            return Err(DraftError::DirectoriesRequired);
        }
        Ok(())
    }
}

/// Fresh identifier for a new row.
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}
