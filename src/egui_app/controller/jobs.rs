//! Background load plumbing and the stale-result guard.
//!
//! Loads run on spawned worker threads and report back over one mpsc
//! channel drained per frame, so results apply in arrival order, which can
//! differ from call order. Every load slot carries a generation counter:
//! starting a load bumps the slot's generation and stamps the job, and a
//! result whose stamp no longer matches is dropped instead of overwriting
//! newer state (rapid folder navigation fires exactly this pattern).

use std::sync::mpsc::{Receiver, Sender, channel};

use crate::store::{FileRecord, FolderRecord};

pub(crate) enum JobMessage {
    FoldersLoaded(FolderLoadResult),
    FilesLoaded(FileLoadResult),
}

pub(crate) struct FolderLoadResult {
    pub(crate) generation: u64,
    pub(crate) basket_id: String,
    pub(crate) outcome: Result<Vec<FolderRecord>, String>,
}

pub(crate) struct FileLoadResult {
    pub(crate) generation: u64,
    pub(crate) path: String,
    pub(crate) outcome: Result<Vec<FileRecord>, String>,
}

pub(crate) struct Jobs {
    sender: Sender<JobMessage>,
    receiver: Receiver<JobMessage>,
    folders_generation: u64,
    files_generation: u64,
}

impl Jobs {
    pub(crate) fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            folders_generation: 0,
            files_generation: 0,
        }
    }

    pub(crate) fn sender(&self) -> Sender<JobMessage> {
        self.sender.clone()
    }

    /// Pull every result that arrived since the last frame.
    pub(crate) fn drain(&self) -> Vec<JobMessage> {
        let mut messages = Vec::new();
        while let Ok(message) = self.receiver.try_recv() {
            messages.push(message);
        }
        messages
    }

    /// Start a folder load, superseding any in-flight one.
    pub(crate) fn begin_folder_load(&mut self) -> u64 {
        self.folders_generation += 1;
        self.folders_generation
    }

    pub(crate) fn folders_current(&self, generation: u64) -> bool {
        generation == self.folders_generation
    }

    /// Start a file load, superseding any in-flight one.
    pub(crate) fn begin_file_load(&mut self) -> u64 {
        self.files_generation += 1;
        self.files_generation
    }

    pub(crate) fn files_current(&self, generation: u64) -> bool {
        generation == self.files_generation
    }

    /// Supersede queued or in-flight folder results without starting a new
    /// load. Used when the state a result would apply to is being torn down.
    pub(crate) fn invalidate_folder_loads(&mut self) {
        self.folders_generation += 1;
    }

    /// Supersede queued or in-flight file results without starting a new load.
    pub(crate) fn invalidate_file_loads(&mut self) {
        self.files_generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_supersede_older_loads() {
        let mut jobs = Jobs::new();
        let first = jobs.begin_folder_load();
        let second = jobs.begin_folder_load();
        assert!(!jobs.folders_current(first));
        assert!(jobs.folders_current(second));
    }

    #[test]
    fn slots_are_independent() {
        let mut jobs = Jobs::new();
        let folders = jobs.begin_folder_load();
        let files = jobs.begin_file_load();
        assert!(jobs.folders_current(folders));
        assert!(jobs.files_current(files));
        jobs.begin_file_load();
        assert!(jobs.folders_current(folders));
        assert!(!jobs.files_current(files));
    }

    #[test]
    fn invalidation_supersedes_without_a_new_load() {
        let mut jobs = Jobs::new();
        let folders = jobs.begin_folder_load();
        let files = jobs.begin_file_load();

        jobs.invalidate_folder_loads();
        assert!(!jobs.folders_current(folders));
        assert!(jobs.files_current(files));

        jobs.invalidate_file_loads();
        assert!(!jobs.files_current(files));
    }

    #[test]
    fn drain_returns_messages_in_arrival_order() {
        let jobs = Jobs::new();
        let sender = jobs.sender();
        sender
            .send(JobMessage::FilesLoaded(FileLoadResult {
                generation: 1,
                path: "/a".into(),
                outcome: Ok(Vec::new()),
            }))
            .unwrap();
        sender
            .send(JobMessage::FilesLoaded(FileLoadResult {
                generation: 2,
                path: "/b".into(),
                outcome: Ok(Vec::new()),
            }))
            .unwrap();
        let drained = jobs.drain();
        assert_eq!(drained.len(), 2);
        match &drained[0] {
            JobMessage::FilesLoaded(result) => assert_eq!(result.path, "/a"),
            _ => panic!("unexpected message"),
        }
    }
}
