//! Folder tree loading and sidebar row building.

use std::thread;

use super::jobs::{FolderLoadResult, JobMessage};
use super::AppController;
use crate::egui_app::state::{FolderRowView, StatusTone};
use crate::store::{FolderRecord, Store};
use crate::tree::{TreeNode, build_forest};

impl AppController {
    /// Load the folder tree for a basket on a worker thread.
    ///
    /// A newer call supersedes an older in-flight one; the stale result is
    /// dropped when it arrives.
    pub fn load_folders(&mut self, basket_id: String) {
        let generation = self.jobs.begin_folder_load();
        self.ui.folders.loading = true;
        let sender = self.jobs.sender();
        let db_path = self.db_path.clone();
        thread::spawn(move || {
            let outcome = Store::open(&db_path)
                .and_then(|store| store.folders_for_basket(&basket_id))
                .map_err(|error| error.to_string());
            // Receiver gone means the app is shutting down.
            let _ = sender.send(JobMessage::FoldersLoaded(FolderLoadResult {
                generation,
                basket_id,
                outcome,
            }));
        });
    }

    pub(super) fn apply_folders_loaded(&mut self, result: FolderLoadResult) {
        if !self.jobs.folders_current(result.generation) {
            tracing::debug!(
                basket = %result.basket_id,
                generation = result.generation,
                "Dropping stale folder load"
            );
            return;
        }
        self.ui.folders.loading = false;
        match result.outcome {
            Ok(records) => {
                let (forest, errors) = build_forest(&records);
                for error in &errors {
                    tracing::warn!("Folder tree: {error}");
                }
                if !errors.is_empty() {
                    self.set_status(
                        format!("Folder tree incomplete: {}", errors[0]),
                        StatusTone::Error,
                    );
                }
                // Roots start expanded so the tree is not a wall of chevrons.
                for root in &forest {
                    self.expanded.insert(root.record.id.clone());
                }
                self.forest = forest;
                self.rebuild_folder_rows();
            }
            Err(error) => {
                tracing::error!(basket = %result.basket_id, "Folder load failed: {error}");
                self.set_status(format!("Failed to load folders: {error}"), StatusTone::Error);
            }
        }
    }

    /// Expand or collapse one folder row.
    pub fn toggle_folder(&mut self, folder_id: &str) {
        if !self.expanded.remove(folder_id) {
            self.expanded.insert(folder_id.to_string());
        }
        self.rebuild_folder_rows();
    }

    /// Make a folder current and load its files into the browser.
    pub fn select_folder(&mut self, folder_id: &str) {
        let Some(path) = self
            .ui
            .folders
            .rows
            .iter()
            .find(|row| row.id == folder_id)
            .map(|row| row.path.clone())
        else {
            return;
        };
        self.ui.folders.current = Some(folder_id.to_string());
        self.load_files(path, true);
    }

    pub(super) fn rebuild_folder_rows(&mut self) {
        let mut rows = Vec::new();
        for node in &self.forest {
            flatten(node, 0, &self.expanded, &mut rows);
        }
        if let Some(current) = self.ui.folders.current.clone()
            && !rows.iter().any(|row| row.id == current)
        {
            self.ui.folders.current = None;
        }
        self.ui.folders.rows = rows;
    }
}

fn flatten(
    node: &TreeNode<FolderRecord>,
    depth: usize,
    expanded: &std::collections::BTreeSet<String>,
    rows: &mut Vec<FolderRowView>,
) {
    let is_expanded = expanded.contains(&node.record.id);
    rows.push(FolderRowView {
        id: node.record.id.clone(),
        name: node.record.name.clone(),
        path: node.record.path.clone(),
        depth,
        has_children: !node.children.is_empty(),
        expanded: is_expanded,
    });
    if is_expanded {
        for child in &node.children {
            flatten(child, depth + 1, expanded, rows);
        }
    }
}
