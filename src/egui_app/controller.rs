//! Application controller: owns UI state and bridges the store to it.
//!
//! All mutation happens on the UI thread. Folder and file loads run on
//! worker threads and come back through an mpsc channel drained once per
//! frame; task events from collaborators arrive on a second channel. Menu
//! item actions queue [`AppCommand`]s that are applied in the same tick.

mod browser;
mod folders;
mod jobs;

use std::{
    cell::RefCell,
    collections::{BTreeSet, VecDeque},
    path::PathBuf,
    rc::Rc,
    sync::mpsc::{Receiver, Sender, channel},
};

use crate::egui_app::state::{
    BasketDialogState, BasketRowView, MenuContext, StatusTone, TaskEvent, UiState,
};
use crate::menu::MenuRegistry;
use crate::store::{BasketDraft, FolderRecord, Store, StoreError};
use crate::tree::TreeNode;

use jobs::{JobMessage, Jobs};

/// Deferred UI intent queued by a menu item action, applied on the next tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppCommand {
    OpenBasketDialog,
    RefreshBaskets,
    ClearSelection,
    RemoveFile(String),
}

/// Shared queue the menu closures push into.
pub type CommandQueue = Rc<RefCell<VecDeque<AppCommand>>>;

/// Maintains app state and runs store loads for the egui UI.
pub struct AppController {
    pub ui: UiState,
    registry: Rc<MenuRegistry<MenuContext>>,
    store: Store,
    db_path: PathBuf,
    jobs: Jobs,
    tasks_tx: Sender<TaskEvent>,
    tasks_rx: Receiver<TaskEvent>,
    commands: CommandQueue,
    /// Folder ids with expanded children in the sidebar tree.
    expanded: BTreeSet<String>,
    /// Forest built from the last completed folder load.
    forest: Vec<TreeNode<FolderRecord>>,
}

impl AppController {
    pub fn new(
        store: Store,
        db_path: PathBuf,
        registry: Rc<MenuRegistry<MenuContext>>,
    ) -> Self {
        let (tasks_tx, tasks_rx) = channel();
        Self {
            ui: UiState::default(),
            registry,
            store,
            db_path,
            jobs: Jobs::new(),
            tasks_tx,
            tasks_rx,
            commands: Rc::new(RefCell::new(VecDeque::new())),
            expanded: BTreeSet::new(),
            forest: Vec::new(),
        }
    }

    /// Populate initial UI state: baskets and the cached file listing.
    pub fn bootstrap(&mut self) {
        self.refresh_baskets();
        self.restore_cached_listing();
        if !self.ui.baskets.rows.is_empty() {
            self.select_basket(0);
        }
    }

    /// Drain worker results, task events, and queued commands.
    ///
    /// Results apply in arrival order; results stamped with a superseded
    /// generation are dropped (see the jobs module).
    pub fn tick(&mut self) {
        for message in self.jobs.drain() {
            match message {
                JobMessage::FoldersLoaded(result) => self.apply_folders_loaded(result),
                JobMessage::FilesLoaded(result) => self.apply_files_loaded(result),
            }
        }
        while let Ok(event) = self.tasks_rx.try_recv() {
            self.apply_task_event(event);
        }
        loop {
            let command = self.commands.borrow_mut().pop_front();
            let Some(command) = command else { break };
            self.apply_command(command);
        }
    }

    /// Sender handed to collaborators that emit task progress events.
    pub fn task_event_sender(&self) -> Sender<TaskEvent> {
        self.tasks_tx.clone()
    }

    /// Queue shared with the menu item closures.
    pub fn command_queue(&self) -> CommandQueue {
        self.commands.clone()
    }

    /// Registry shared with the renderer.
    pub fn menu_registry(&self) -> Rc<MenuRegistry<MenuContext>> {
        self.registry.clone()
    }

    // ----- baskets -----

    /// Reload the basket list from the store.
    pub fn refresh_baskets(&mut self) {
        match self.store.baskets() {
            Ok(baskets) => {
                self.ui.baskets.rows = baskets
                    .into_iter()
                    .map(|basket| BasketRowView {
                        id: basket.id,
                        name: basket.name,
                    })
                    .collect();
                if let Some(selected) = self.ui.baskets.selected
                    && selected >= self.ui.baskets.rows.len()
                {
                    self.ui.baskets.selected = None;
                }
            }
            Err(error) => {
                tracing::error!("Failed to list baskets: {error}");
                self.set_status(format!("Failed to list baskets: {error}"), StatusTone::Error);
            }
        }
    }

    /// Select a basket row and load its folder tree.
    pub fn select_basket(&mut self, index: usize) {
        let Some(row) = self.ui.baskets.rows.get(index) else {
            return;
        };
        let basket_id = row.id.clone();
        self.ui.baskets.selected = Some(index);
        self.ui.folders.current = None;
        self.expanded.clear();
        self.load_folders(basket_id);
    }

    /// Open the create-basket dialog.
    pub fn open_basket_dialog(&mut self) {
        self.ui.baskets.dialog = Some(BasketDialogState::default());
    }

    pub fn close_basket_dialog(&mut self) {
        self.ui.baskets.dialog = None;
    }

    /// Add a picked directory to the open dialog. `None` (picker canceled)
    /// leaves the draft untouched.
    pub fn add_draft_directory(&mut self, directory: Option<PathBuf>) {
        if let (Some(dialog), Some(directory)) = (self.ui.baskets.dialog.as_mut(), directory) {
            if !dialog.directories.contains(&directory) {
                dialog.directories.push(directory);
            }
            dialog.error = None;
        }
    }

    /// Validate the dialog draft and create the basket.
    ///
    /// Validation failures surface inline in the dialog and no store call
    /// is made. On success the dialog closes and the new basket becomes
    /// the selection.
    pub fn create_basket_from_dialog(&mut self) {
        let Some(dialog) = self.ui.baskets.dialog.as_mut() else {
            return;
        };
        let draft = BasketDraft {
            name: dialog.name.clone(),
            directories: dialog.directories.clone(),
        };
        if let Err(error) = draft.validate() {
            dialog.error = Some(error.to_string());
            return;
        }
        match self.store.create_basket(&draft) {
            Ok(basket) => {
                self.ui.baskets.dialog = None;
                self.refresh_baskets();
                if let Some(index) = self
                    .ui
                    .baskets
                    .rows
                    .iter()
                    .position(|row| row.id == basket.id)
                {
                    self.select_basket(index);
                }
                self.set_status(format!("Created basket \"{}\"", basket.name), StatusTone::Idle);
            }
            Err(StoreError::DuplicateBasket(name)) => {
                if let Some(dialog) = self.ui.baskets.dialog.as_mut() {
                    dialog.error = Some(format!("A basket named \"{name}\" already exists"));
                }
            }
            Err(error) => {
                tracing::error!("Failed to create basket: {error}");
                self.set_status(format!("Failed to create basket: {error}"), StatusTone::Error);
            }
        }
    }

    /// Delete a basket and tear down every panel that showed its data.
    ///
    /// Loads still in flight for the deleted basket are superseded so a
    /// queued result cannot repopulate the cleared panels on a later tick.
    pub fn delete_basket(&mut self, basket_id: &str) {
        if let Err(error) = self.store.delete_basket(basket_id) {
            tracing::error!("Failed to delete basket {basket_id}: {error}");
            self.set_status(format!("Failed to delete basket: {error}"), StatusTone::Error);
            return;
        }
        self.jobs.invalidate_folder_loads();
        self.jobs.invalidate_file_loads();
        self.ui.baskets.selected = None;
        self.ui.folders = Default::default();
        self.ui.browser = Default::default();
        self.ui.selection.clear();
        self.forest.clear();
        self.clear_cached_listing();
        self.refresh_baskets();
    }

    // ----- shared helpers -----

    pub(crate) fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.text = text.into();
        self.ui.status.tone = tone;
    }

    fn apply_task_event(&mut self, event: TaskEvent) {
        if event.stage == crate::egui_app::state::TaskStage::Failed {
            self.set_status(
                format!("Task \"{}\" failed", event.kind),
                StatusTone::Error,
            );
        }
        self.ui.tasks.upsert(event);
    }

    fn apply_command(&mut self, command: AppCommand) {
        match command {
            AppCommand::OpenBasketDialog => self.open_basket_dialog(),
            AppCommand::RefreshBaskets => self.refresh_baskets(),
            AppCommand::ClearSelection => self.ui.selection.clear(),
            AppCommand::RemoveFile(id) => self.remove_file(&id),
        }
    }
}
