//! Content browser loading and the persisted listing cache.

use std::collections::BTreeSet;
use std::thread;

use serde::{Deserialize, Serialize};

use super::jobs::{FileLoadResult, JobMessage};
use super::AppController;
use crate::egui_app::state::{FileRowView, StatusTone};
use crate::store::{FileRecord, Store};

/// kv key under which the last completed listing is persisted.
const LISTING_CACHE_KEY: &str = "content_browser.last";

#[derive(Serialize, Deserialize)]
struct CachedListing {
    path: String,
    files: Vec<FileRecord>,
}

impl AppController {
    /// Load files under `path` on a worker thread.
    ///
    /// `deep` lists everything below the directory; `false` only its direct
    /// children. A newer call supersedes an older in-flight one.
    pub fn load_files(&mut self, path: String, deep: bool) {
        let generation = self.jobs.begin_file_load();
        self.ui.browser.loading = true;
        let sender = self.jobs.sender();
        let db_path = self.db_path.clone();
        thread::spawn(move || {
            let outcome = Store::open(&db_path)
                .and_then(|store| store.files_with_prefix(&path, deep))
                .map_err(|error| error.to_string());
            let _ = sender.send(JobMessage::FilesLoaded(FileLoadResult {
                generation,
                path,
                outcome,
            }));
        });
    }

    pub(super) fn apply_files_loaded(&mut self, result: FileLoadResult) {
        if !self.jobs.files_current(result.generation) {
            tracing::debug!(
                path = %result.path,
                generation = result.generation,
                "Dropping stale file load"
            );
            return;
        }
        self.ui.browser.loading = false;
        match result.outcome {
            Ok(files) => {
                self.show_listing(&result.path, &files, false);
                self.persist_listing(&result.path, &files);
            }
            Err(error) => {
                tracing::error!(path = %result.path, "File load failed: {error}");
                self.set_status(format!("Failed to load files: {error}"), StatusTone::Error);
            }
        }
    }

    /// Restore the last persisted listing so the browser is not empty
    /// before the first load completes.
    pub(super) fn restore_cached_listing(&mut self) {
        let cached = match self.store.kv_get(LISTING_CACHE_KEY) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!("Listing cache read failed: {error}");
                return;
            }
        };
        let Some(raw) = cached else { return };
        match serde_json::from_str::<CachedListing>(&raw) {
            Ok(listing) => self.show_listing(&listing.path, &listing.files, true),
            Err(error) => tracing::warn!("Discarding unreadable listing cache: {error}"),
        }
    }

    /// Forget the persisted listing when the rows it held were deleted.
    pub(super) fn clear_cached_listing(&mut self) {
        if let Err(error) = self.store.kv_delete(LISTING_CACHE_KEY) {
            tracing::warn!("Listing cache clear failed: {error}");
        }
    }

    /// Soft-delete one file and drop it from the current view.
    pub fn remove_file(&mut self, file_id: &str) {
        if let Err(error) = self.store.remove_file(file_id) {
            tracing::error!("Failed to remove file {file_id}: {error}");
            self.set_status(format!("Failed to remove file: {error}"), StatusTone::Error);
            return;
        }
        self.ui.browser.rows.retain(|row| row.id != file_id);
        let known: BTreeSet<String> = self
            .ui
            .browser
            .rows
            .iter()
            .map(|row| row.id.clone())
            .collect();
        self.ui.selection.retain_known(&known);
    }

    fn show_listing(&mut self, path: &str, files: &[FileRecord], from_cache: bool) {
        self.ui.browser.rows = files.iter().map(FileRowView::from).collect();
        self.ui.browser.current_path = Some(path.to_string());
        self.ui.browser.from_cache = from_cache;
        let known: BTreeSet<String> = files.iter().map(|file| file.id.clone()).collect();
        self.ui.selection.retain_known(&known);
    }

    fn persist_listing(&mut self, path: &str, files: &[FileRecord]) {
        let listing = CachedListing {
            path: path.to_string(),
            files: files.to_vec(),
        };
        let raw = match serde_json::to_string(&listing) {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!("Listing cache serialize failed: {error}");
                return;
            }
        };
        if let Err(error) = self.store.kv_put(LISTING_CACHE_KEY, &raw) {
            tracing::warn!("Listing cache write failed: {error}");
        }
    }
}
