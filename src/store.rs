//! SQLite-backed data store for baskets, folders, and file metadata.
//!
//! One database lives in the `.pannier` application directory. Folder and
//! file rows are written by the scanning collaborator (out of scope here);
//! the store owns the schema and every query the UI needs, plus a small
//! synchronous key-value table used to cache the last content-browser
//! listing across launches.

mod records;

pub use records::{BasketDraft, BasketRecord, DraftError, FileRecord, FolderRecord, new_id};

use std::path::{MAIN_SEPARATOR_STR, Path};

use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use crate::app_dirs;

/// Errors returned by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The application directory could not be resolved.
    #[error(transparent)]
    AppDir(#[from] app_dirs::AppDirError),
    /// A query or statement failed.
    #[error("Database query failed: {0}")]
    Sql(#[from] rusqlite::Error),
    /// The basket draft failed validation before any query ran.
    #[error(transparent)]
    InvalidDraft(#[from] DraftError),
    /// A basket with the same name already exists.
    #[error("A basket named \"{0}\" already exists")]
    DuplicateBasket(String),
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS basket (
    id   TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS folder (
    id   TEXT PRIMARY KEY,
    pid  TEXT NOT NULL,
    name TEXT NOT NULL,
    path TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS basket_folder (
    basket_id TEXT NOT NULL,
    folder_id TEXT NOT NULL,
    PRIMARY KEY (basket_id, folder_id)
);
CREATE TABLE IF NOT EXISTS metadata (
    id          TEXT PRIMARY KEY,
    file_path   TEXT NOT NULL,
    name        TEXT NOT NULL,
    suffix      TEXT NOT NULL,
    size        INTEGER NOT NULL,
    modified_ns INTEGER NOT NULL,
    is_del      INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_metadata_path ON metadata (file_path);
CREATE TABLE IF NOT EXISTS kv (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";

/// SQLite wrapper owning the pannier schema.
pub struct Store {
    connection: Connection,
}

impl Store {
    /// Open (or create) the database at `path` and apply the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let connection = Connection::open(path.as_ref())?;
        connection.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys=ON;
             PRAGMA busy_timeout=5000;",
        )?;
        connection.execute_batch(SCHEMA)?;
        Ok(Self { connection })
    }

    /// Open the database in the `.pannier` application directory.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(app_dirs::database_path()?)
    }

    /// List every basket, oldest first.
    pub fn baskets(&self) -> Result<Vec<BasketRecord>, StoreError> {
        let mut stmt = self
            .connection
            .prepare_cached("SELECT id, name FROM basket ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| {
            Ok(BasketRecord {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Create a basket with one root folder row per chosen directory.
    ///
    /// The draft is validated first; on failure no query runs. Directory
    /// contents are indexed later by the scanning collaborator, which adds
    /// child folder and metadata rows through [`Store::insert_folder`] and
    /// [`Store::insert_file`].
    pub fn create_basket(&mut self, draft: &BasketDraft) -> Result<BasketRecord, StoreError> {
        draft.validate()?;
        let name = draft.name.trim();
        if self.basket_name_exists(name)? {
            return Err(StoreError::DuplicateBasket(name.to_string()));
        }

        let basket = BasketRecord {
            id: new_id(),
            name: name.to_string(),
        };
        let tx = self.connection.transaction()?;
        tx.execute(
            "INSERT INTO basket (id, name) VALUES (?1, ?2)",
            params![basket.id, basket.name],
        )?;
        for directory in &draft.directories {
            let folder = FolderRecord::root_for(directory);
            let folder_id: String = match tx
                .query_row(
                    "SELECT id FROM folder WHERE path = ?1",
                    params![folder.path],
                    |row| row.get(0),
                )
                .optional()?
            {
                Some(existing) => existing,
                None => {
                    tx.execute(
                        "INSERT INTO folder (id, pid, name, path) VALUES (?1, ?2, ?3, ?4)",
                        params![folder.id, folder.pid, folder.name, folder.path],
                    )?;
                    folder.id
                }
            };
            tx.execute(
                "INSERT OR IGNORE INTO basket_folder (basket_id, folder_id) VALUES (?1, ?2)",
                params![basket.id, folder_id],
            )?;
        }
        tx.commit()?;
        Ok(basket)
    }

    /// Delete a basket, its exclusive folders, and metadata under them.
    ///
    /// Folders shared with another basket survive, as does their metadata.
    pub fn delete_basket(&mut self, basket_id: &str) -> Result<(), StoreError> {
        let tx = self.connection.transaction()?;

        // Root folders linked only to this basket.
        let exclusive_roots: Vec<(String, String)> = {
            let mut stmt = tx.prepare(
                "SELECT f.id, f.path
                   FROM basket_folder bf
                   JOIN folder f ON f.id = bf.folder_id
                  WHERE bf.basket_id = ?1
                    AND bf.folder_id NOT IN (
                        SELECT folder_id FROM basket_folder WHERE basket_id != ?1
                    )",
            )?;
            let rows = stmt.query_map(params![basket_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?;
            rows.collect::<Result<_, _>>()?
        };

        for (folder_id, folder_path) in &exclusive_roots {
            tx.execute(
                "DELETE FROM metadata
                  WHERE file_path = ?1 OR file_path LIKE ?2",
                params![folder_path, format!("{folder_path}{MAIN_SEPARATOR_STR}%")],
            )?;
            tx.execute(
                "DELETE FROM folder
                  WHERE id IN (
                      WITH RECURSIVE descendants AS (
                          SELECT id FROM folder WHERE id = ?1
                          UNION ALL
                          SELECT child.id
                            FROM folder child
                            JOIN descendants ON child.pid = descendants.id
                      )
                      SELECT id FROM descendants
                  )",
                params![folder_id],
            )?;
        }

        tx.execute(
            "DELETE FROM basket_folder WHERE basket_id = ?1",
            params![basket_id],
        )?;
        tx.execute("DELETE FROM basket WHERE id = ?1", params![basket_id])?;
        tx.commit()?;
        Ok(())
    }

    /// Flat list of every folder reachable from the basket's roots.
    ///
    /// Uses a recursive walk over `pid` links seeded by the basket's member
    /// folders, ordered by path for a stable listing. The UI links the
    /// result into a tree with [`crate::tree::build_forest`].
    pub fn folders_for_basket(&self, basket_id: &str) -> Result<Vec<FolderRecord>, StoreError> {
        let mut stmt = self.connection.prepare_cached(
            "WITH RECURSIVE descendants AS (
                 SELECT f.id, f.pid, f.name, f.path
                   FROM folder f
                   JOIN basket_folder bf ON bf.folder_id = f.id
                  WHERE bf.basket_id = ?1
                 UNION ALL
                 SELECT child.id, child.pid, child.name, child.path
                   FROM folder child
                   JOIN descendants ON child.pid = descendants.id
             )
             SELECT id, pid, name, path FROM descendants GROUP BY id ORDER BY path",
        )?;
        let rows = stmt.query_map(params![basket_id], |row| {
            Ok(FolderRecord {
                id: row.get(0)?,
                pid: row.get(1)?,
                name: row.get(2)?,
                path: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Insert a folder row (used by the scanning collaborator and tests).
    pub fn insert_folder(&mut self, folder: &FolderRecord) -> Result<(), StoreError> {
        self.connection.execute(
            "INSERT INTO folder (id, pid, name, path) VALUES (?1, ?2, ?3, ?4)",
            params![folder.id, folder.pid, folder.name, folder.path],
        )?;
        Ok(())
    }

    /// Insert a file row (used by the scanning collaborator and tests).
    pub fn insert_file(&mut self, file: &FileRecord) -> Result<(), StoreError> {
        self.connection.execute(
            "INSERT INTO metadata (id, file_path, name, suffix, size, modified_ns)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                file.id,
                file.path,
                file.name,
                file.suffix,
                file.size as i64,
                file.modified_ns
            ],
        )?;
        Ok(())
    }

    /// List live files under `path`.
    ///
    /// With `like = true` this matches everything below the directory
    /// (prefix plus path separator); with `like = false` only direct rows
    /// whose parent is exactly `path`. Soft-deleted rows are skipped.
    pub fn files_with_prefix(&self, path: &str, like: bool) -> Result<Vec<FileRecord>, StoreError> {
        let prefix = format!("{path}{MAIN_SEPARATOR_STR}");
        let pattern = if like {
            format!("{prefix}%")
        } else {
            prefix
        };
        let sql = if like {
            "SELECT id, file_path, name, suffix, size, modified_ns
               FROM metadata
              WHERE is_del = 0 AND file_path LIKE ?1
              ORDER BY file_path"
        } else {
            "SELECT id, file_path, name, suffix, size, modified_ns
               FROM metadata
              WHERE is_del = 0 AND file_path = ?1 || name
              ORDER BY file_path"
        };
        let mut stmt = self.connection.prepare_cached(sql)?;
        let rows = stmt.query_map(params![pattern], |row| {
            Ok(FileRecord {
                id: row.get(0)?,
                path: row.get(1)?,
                name: row.get(2)?,
                suffix: row.get(3)?,
                size: row.get::<_, i64>(4)? as u64,
                modified_ns: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Soft-delete a file row.
    pub fn remove_file(&mut self, file_id: &str) -> Result<(), StoreError> {
        self.connection.execute(
            "UPDATE metadata SET is_del = 1 WHERE id = ?1",
            params![file_id],
        )?;
        Ok(())
    }

    /// Read a cached string value.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .connection
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Write a cached string value, replacing any previous one.
    pub fn kv_put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.connection.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Drop a cached value, if present.
    pub fn kv_delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.connection
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn basket_name_exists(&self, name: &str) -> Result<bool, StoreError> {
        let count: i64 = self.connection.query_row(
            "SELECT COUNT(*) FROM basket WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn open_temp() -> (tempfile::TempDir, Store) {
        let dir = tempdir().unwrap();
        let store = Store::open(dir.path().join("pannier.db")).unwrap();
        (dir, store)
    }

    fn draft(name: &str, directories: &[&str]) -> BasketDraft {
        BasketDraft {
            name: name.into(),
            directories: directories.iter().map(PathBuf::from).collect(),
        }
    }

    fn file(path: &str, name: &str) -> FileRecord {
        FileRecord {
            id: new_id(),
            path: path.into(),
            name: name.into(),
            suffix: name.rsplit('.').next().unwrap_or_default().into(),
            size: 10,
            modified_ns: 0,
        }
    }

    #[test]
    fn create_basket_persists_roots_and_links() {
        let (_dir, mut store) = open_temp();
        let basket = store
            .create_basket(&draft("textures", &["/data/tex", "/data/more"]))
            .unwrap();

        let baskets = store.baskets().unwrap();
        assert_eq!(baskets, vec![basket.clone()]);

        let folders = store.folders_for_basket(&basket.id).unwrap();
        assert_eq!(folders.len(), 2);
        assert!(folders.iter().all(|f| f.pid == crate::tree::ROOT_PARENT_ID));
    }

    #[test]
    fn invalid_draft_is_rejected_before_any_insert() {
        let (_dir, mut store) = open_temp();
        let error = store.create_basket(&draft("", &["/data"])).unwrap_err();
        assert!(matches!(
            error,
            StoreError::InvalidDraft(DraftError::NameRequired)
        ));
        assert!(store.baskets().unwrap().is_empty());
    }

    #[test]
    fn duplicate_basket_name_is_rejected() {
        let (_dir, mut store) = open_temp();
        store.create_basket(&draft("textures", &["/a"])).unwrap();
        let error = store
            .create_basket(&draft("textures", &["/b"]))
            .unwrap_err();
        assert!(matches!(error, StoreError::DuplicateBasket(name) if name == "textures"));
    }

    #[test]
    fn folders_for_basket_walks_pid_links() {
        let (_dir, mut store) = open_temp();
        let basket = store.create_basket(&draft("art", &["/art"])).unwrap();
        let root = &store.folders_for_basket(&basket.id).unwrap()[0];

        let child = FolderRecord {
            id: new_id(),
            pid: root.id.clone(),
            name: "icons".into(),
            path: "/art/icons".into(),
        };
        store.insert_folder(&child).unwrap();
        let grandchild = FolderRecord {
            id: new_id(),
            pid: child.id.clone(),
            name: "small".into(),
            path: "/art/icons/small".into(),
        };
        store.insert_folder(&grandchild).unwrap();

        let folders = store.folders_for_basket(&basket.id).unwrap();
        let paths: Vec<&str> = folders.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["/art", "/art/icons", "/art/icons/small"]);
    }

    #[test]
    fn files_with_prefix_distinguishes_like_and_exact() {
        let (_dir, mut store) = open_temp();
        let sep = MAIN_SEPARATOR_STR;
        store
            .insert_file(&file(&format!("/art{sep}a.png"), "a.png"))
            .unwrap();
        store
            .insert_file(&file(&format!("/art{sep}icons{sep}b.png"), "b.png"))
            .unwrap();

        let deep = store.files_with_prefix("/art", true).unwrap();
        assert_eq!(deep.len(), 2);

        let direct = store.files_with_prefix("/art", false).unwrap();
        assert_eq!(direct.len(), 1);
        assert_eq!(direct[0].name, "a.png");
    }

    #[test]
    fn removed_files_are_hidden_from_listings() {
        let (_dir, mut store) = open_temp();
        let sep = MAIN_SEPARATOR_STR;
        let record = file(&format!("/art{sep}a.png"), "a.png");
        store.insert_file(&record).unwrap();
        store.remove_file(&record.id).unwrap();
        assert!(store.files_with_prefix("/art", true).unwrap().is_empty());
    }

    #[test]
    fn delete_basket_keeps_folders_shared_with_other_baskets() {
        let (_dir, mut store) = open_temp();
        let first = store.create_basket(&draft("one", &["/shared", "/only"])).unwrap();
        let _second = store.create_basket(&draft("two", &["/shared"])).unwrap();
        let sep = MAIN_SEPARATOR_STR;
        store
            .insert_file(&file(&format!("/only{sep}x.png"), "x.png"))
            .unwrap();
        store
            .insert_file(&file(&format!("/shared{sep}y.png"), "y.png"))
            .unwrap();

        store.delete_basket(&first.id).unwrap();

        let remaining = store.baskets().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "two");
        assert!(store.files_with_prefix("/only", true).unwrap().is_empty());
        assert_eq!(store.files_with_prefix("/shared", true).unwrap().len(), 1);
    }

    #[test]
    fn kv_round_trips_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pannier.db");
        {
            let mut store = Store::open(&path).unwrap();
            store.kv_put("content_browser.last", "{\"path\":\"/art\"}").unwrap();
            store.kv_put("content_browser.last", "{\"path\":\"/new\"}").unwrap();
        }
        let store = Store::open(&path).unwrap();
        assert_eq!(
            store.kv_get("content_browser.last").unwrap().as_deref(),
            Some("{\"path\":\"/new\"}")
        );
        assert_eq!(store.kv_get("missing").unwrap(), None);
    }

    #[test]
    fn kv_delete_drops_the_entry() {
        let (_dir, mut store) = open_temp();
        store.kv_put("content_browser.last", "{}").unwrap();
        store.kv_delete("content_browser.last").unwrap();
        assert_eq!(store.kv_get("content_browser.last").unwrap(), None);
        store.kv_delete("missing").unwrap();
    }
}
