use crate::store::FileRecord;

/// Content browser listing files under the current folder.
#[derive(Clone, Debug, Default)]
pub struct ContentBrowserState {
    pub rows: Vec<FileRowView>,
    /// Directory path the rows were loaded for.
    pub current_path: Option<String>,
    /// True while the rows come from the persisted cache rather than a
    /// completed load.
    pub from_cache: bool,
    /// Whether a load is in flight.
    pub loading: bool,
}

/// Display data for a single file row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRowView {
    pub id: String,
    pub name: String,
    pub path: String,
    pub suffix: String,
    pub size: u64,
}

impl From<&FileRecord> for FileRowView {
    fn from(record: &FileRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            path: record.path.clone(),
            suffix: record.suffix.clone(),
            size: record.size,
        }
    }
}
