//! Shared harness for controller integration tests.
#![allow(dead_code)] // not every test binary uses every helper

use std::{path::PathBuf, rc::Rc, time::Duration};

use tempfile::TempDir;

use pannier::egui_app::controller::AppController;
use pannier::menu::MenuRegistry;
use pannier::store::{FileRecord, FolderRecord, Store, new_id};

pub struct ControllerHarness {
    _temp: TempDir,
    pub db_path: PathBuf,
    pub controller: AppController,
}

impl ControllerHarness {
    /// Controller backed by a fresh database in a tempdir.
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("create tempdir");
        let db_path = temp.path().join("pannier.db");
        let store = Store::open(&db_path).expect("open store");
        let registry = Rc::new(MenuRegistry::new());
        let controller = AppController::new(store, db_path.clone(), registry);
        Self {
            _temp: temp,
            db_path,
            controller,
        }
    }

    /// Extra connection for seeding rows next to the controller's own.
    pub fn seed_store(&self) -> Store {
        Store::open(&self.db_path).expect("open seed store")
    }

    /// Tick until `done` holds, failing after a couple of seconds.
    pub fn wait_until(&mut self, what: &str, done: impl Fn(&AppController) -> bool) {
        for _ in 0..400 {
            self.controller.tick();
            if done(&self.controller) {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("timed out waiting for: {what}");
    }
}

/// Insert a file row under `dir` and return its id.
pub fn seed_file(store: &mut Store, dir: &str, name: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR_STR;
    let record = FileRecord {
        id: new_id(),
        path: format!("{dir}{sep}{name}"),
        name: name.to_string(),
        suffix: name.rsplit('.').next().unwrap_or_default().to_string(),
        size: 42,
        modified_ns: 0,
    };
    store.insert_file(&record).expect("insert file");
    record.id
}

/// Insert a child folder row and return its id.
pub fn seed_folder(store: &mut Store, pid: &str, name: &str, path: &str) -> String {
    let record = FolderRecord {
        id: new_id(),
        pid: pid.to_string(),
        name: name.to_string(),
        path: path.to_string(),
    };
    store.insert_folder(&record).expect("insert folder");
    record.id
}
