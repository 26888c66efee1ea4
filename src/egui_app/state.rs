//! Shared state types for the egui UI.

mod baskets;
mod browser;
mod folders;
mod selection;
mod status;
mod tasks;

pub use baskets::*;
pub use browser::*;
pub use folders::*;
pub use selection::*;
pub use status::*;
pub use tasks::*;

/// Context captured when a context menu is triggered on a row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum MenuContext {
    /// Triggered on empty space.
    #[default]
    Background,
    /// Triggered on a file row.
    File { id: String },
    /// Triggered on a folder row.
    Folder { id: String },
}

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub status: StatusBarState,
    pub baskets: BasketPanelState,
    pub folders: FolderPanelState,
    pub browser: ContentBrowserState,
    pub selection: SelectionState,
    pub tasks: TaskBoardState,
}
