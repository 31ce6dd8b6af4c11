use std::{ffi::OsStr, path::Path};

use crate::commit_id::CommitId;

pub mod directory;
pub mod in_memory;

/// The current content of one tracked file, as it goes into a snapshot.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct StagedFile {
    /// The path as recorded in the index.
    pub path: String,
    pub contents: Vec<u8>,
}

impl StagedFile {
    /// The name this file is stored under inside a snapshot. Directories
    /// are dropped, so `a/x.txt` and `b/x.txt` share one slot.
    pub fn snapshot_name(&self) -> Option<&OsStr> {
        Path::new(&self.path).file_name()
    }
}

/// Immutable per-commit snapshots, each a flat set of files keyed by base name.
pub trait CommitStore {
    type Error;

    fn has(&self, id: &CommitId) -> Result<bool, Self::Error>;

    fn read(&self, id: &CommitId, name: &OsStr) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Stores a new snapshot. Later files with the same base name replace
    /// earlier ones within this call.
    fn write_snapshot(&mut self, id: &CommitId, files: &[StagedFile]) -> Result<(), Self::Error>;
}
