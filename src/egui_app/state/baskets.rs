use std::path::PathBuf;

/// Sidebar list of baskets plus the create dialog.
#[derive(Clone, Debug, Default)]
pub struct BasketPanelState {
    /// Render rows for existing baskets.
    pub rows: Vec<BasketRowView>,
    /// Currently selected row index.
    pub selected: Option<usize>,
    /// Create-basket dialog, when open.
    pub dialog: Option<BasketDialogState>,
}

/// Display data for a single basket row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasketRowView {
    pub id: String,
    pub name: String,
}

/// Editor state for a basket being created.
#[derive(Clone, Debug, Default)]
pub struct BasketDialogState {
    pub name: String,
    pub directories: Vec<PathBuf>,
    /// Validation message shown inline; cleared on the next edit.
    pub error: Option<String>,
}
