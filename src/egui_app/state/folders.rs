/// Sidebar tree of folders inside the selected basket.
#[derive(Clone, Debug, Default)]
pub struct FolderPanelState {
    /// Flattened render rows for the folder forest.
    pub rows: Vec<FolderRowView>,
    /// Id of the folder whose contents the browser shows.
    pub current: Option<String>,
    /// Whether a load is in flight.
    pub loading: bool,
}

/// Render-friendly folder row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderRowView {
    pub id: String,
    pub name: String,
    /// Absolute directory path backing the row.
    pub path: String,
    /// Depth in the tree, used for indentation.
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
}
