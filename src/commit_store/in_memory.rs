use std::{
    collections::BTreeMap,
    convert::Infallible,
    ffi::{OsStr, OsString},
};

use crate::commit_id::CommitId;

use super::{CommitStore, StagedFile};

#[derive(Debug, Default)]
pub struct InMemoryCommitStore {
    snapshots: BTreeMap<CommitId, BTreeMap<OsString, Vec<u8>>>,
}

impl InMemoryCommitStore {
    pub fn new() -> Self {
        Self {
            snapshots: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl CommitStore for InMemoryCommitStore {
    type Error = Infallible;

    fn has(&self, id: &CommitId) -> Result<bool, Self::Error> {
        Ok(self.snapshots.contains_key(id))
    }

    fn read(&self, id: &CommitId, name: &OsStr) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self
            .snapshots
            .get(id)
            .and_then(|files| files.get(name))
            .cloned())
    }

    fn write_snapshot(&mut self, id: &CommitId, files: &[StagedFile]) -> Result<(), Self::Error> {
        let snapshot = self.snapshots.entry(id.clone()).or_default();
        for file in files {
            if let Some(name) = file.snapshot_name() {
                snapshot.insert(name.to_os_string(), file.contents.clone());
            }
        }
        Ok(())
    }
}

#[test]
fn test_in_memory_commit_store() {
    let mut store = InMemoryCommitStore::new();
    let id = CommitId::generate();
    let files = vec![StagedFile {
        path: String::from("src/a.txt"),
        contents: b"hello, world".to_vec(),
    }];
    store.write_snapshot(&id, &files).unwrap();
    assert!(store.has(&id).unwrap());
    assert_eq!(store.len(), 1);
    assert_eq!(
        store.read(&id, OsStr::new("a.txt")).unwrap(),
        Some(b"hello, world".to_vec())
    );
    assert_eq!(store.read(&id, OsStr::new("src/a.txt")).unwrap(), None);
}
