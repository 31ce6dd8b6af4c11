use std::{
    ffi::OsStr,
    fs::{create_dir_all, File},
    io::{ErrorKind, Read, Write},
    path::PathBuf,
};

use crate::commit_id::CommitId;

use super::{CommitStore, StagedFile};

/// A persistent [`CommitStore`] stored in a directory, with one
/// subdirectory per [`CommitId`] holding a copy of every staged file
/// under its base name.
#[derive(Debug, Clone)]
pub struct DirectoryCommitStore {
    root: PathBuf,
}

impl DirectoryCommitStore {
    /// The root directory is created on the first snapshot write, so
    /// reading from a fresh repository leaves the disk untouched.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl CommitStore for DirectoryCommitStore {
    type Error = std::io::Error;

    fn has(&self, id: &CommitId) -> Result<bool, Self::Error> {
        log::info!("checking whether {} is contained in {:?}", id, self.root);
        let path = self.root.join(id);
        Ok(path.try_exists()? && path.is_dir())
    }

    fn read(&self, id: &CommitId, name: &OsStr) -> Result<Option<Vec<u8>>, Self::Error> {
        log::info!("reading {:?} of {} from {:?}", name, id, self.root);
        let path = self.root.join(id).join(name);
        match File::options().read(true).open(path) {
            Ok(mut f) => {
                let mut v = Vec::new();
                f.read_to_end(&mut v)?;
                Ok(Some(v))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn write_snapshot(&mut self, id: &CommitId, files: &[StagedFile]) -> Result<(), Self::Error> {
        let snapshot_dir = self.root.join(id);
        log::info!("creating snapshot directory {:?}", snapshot_dir);
        create_dir_all(&snapshot_dir)?;
        for file in files {
            let name = match file.snapshot_name() {
                Some(name) => name,
                None => {
                    log::warn!("{:?} has no file name, leaving it out of {}", file.path, id);
                    continue;
                }
            };
            log::debug!("copying {:?} into {:?}", file.path, snapshot_dir);
            let mut f = File::options()
                .create(true)
                .write(true)
                .truncate(true)
                .open(snapshot_dir.join(name))?;
            f.write_all(&file.contents)?;
        }
        Ok(())
    }
}

#[test]
fn test_directory_commit_store() {
    let tempdir = tempfile::tempdir().unwrap();
    let root = tempdir.path().join("commits");
    let mut store = DirectoryCommitStore::new(root.clone());
    let id = CommitId::generate();
    assert!(!store.has(&id).unwrap());

    let files = vec![
        StagedFile {
            path: String::from("dir/a.txt"),
            contents: b"hello, world".to_vec(),
        },
        StagedFile {
            path: String::from("b.txt"),
            contents: Vec::new(),
        },
    ];
    store.write_snapshot(&id, &files).unwrap();

    assert!(store.has(&id).unwrap());
    assert!(root.join(id.as_str()).join("a.txt").is_file());
    assert_eq!(
        store.read(&id, OsStr::new("a.txt")).unwrap(),
        Some(b"hello, world".to_vec())
    );
    assert_eq!(store.read(&id, OsStr::new("b.txt")).unwrap(), Some(Vec::new()));
    assert_eq!(store.read(&id, OsStr::new("c.txt")).unwrap(), None);
    assert_eq!(
        store.read(&CommitId::generate(), OsStr::new("a.txt")).unwrap(),
        None
    );
}

#[test]
fn test_same_base_name_last_wins() {
    let tempdir = tempfile::tempdir().unwrap();
    let mut store = DirectoryCommitStore::new(tempdir.path().to_path_buf());
    let id = CommitId::generate();
    let files = vec![
        StagedFile {
            path: String::from("one/x.txt"),
            contents: b"one".to_vec(),
        },
        StagedFile {
            path: String::from("two/x.txt"),
            contents: b"two".to_vec(),
        },
    ];
    store.write_snapshot(&id, &files).unwrap();
    assert_eq!(
        store.read(&id, OsStr::new("x.txt")).unwrap(),
        Some(b"two".to_vec())
    );
}
