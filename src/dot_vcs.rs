use std::{
    fs::{create_dir_all, read_to_string, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::{
    commit_store::directory::DirectoryCommitStore, history::HistoryLog, index::IndexStore,
};

/// A wrapper for the working directory and its `vcs` directory, which has a
/// number of utilities defined on it.
///
/// Nothing is created on disk until something is written, so opening a
/// fresh working directory is free.
#[derive(Debug, Clone)]
pub struct DotVcs {
    work_dir: PathBuf,
    root: PathBuf,
}

impl DotVcs {
    pub fn new(work_dir: PathBuf) -> Self {
        let root = work_dir.join("vcs");
        Self { work_dir, root }
    }

    /// The directory tracked paths are relative to.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    pub fn ensure(&self) -> Result<(), std::io::Error> {
        if !self.root.try_exists()? {
            log::info!("creating {:?}", self.root);
        }
        create_dir_all(&self.root)
    }

    /// The configured username, or `None` if none was ever set.
    pub fn username(&self) -> Result<Option<String>, std::io::Error> {
        match read_to_string(self.root.join("config.txt")) {
            Ok(name) if name.is_empty() => Ok(None),
            Ok(name) => Ok(Some(name)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub fn set_username(&self, username: &str) -> Result<(), std::io::Error> {
        self.ensure()?;
        let mut file = File::options()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.root.join("config.txt"))?;
        file.write_all(username.as_bytes())
    }

    pub fn index(&self) -> IndexStore {
        IndexStore::new(self.root.join("index.txt"))
    }

    pub fn history(&self) -> HistoryLog {
        HistoryLog::new(self.root.join("log.txt"))
    }

    pub fn commits(&self) -> DirectoryCommitStore {
        DirectoryCommitStore::new(self.root.join("commits"))
    }
}

#[test]
fn test_username_round_trip() {
    let tempdir = tempfile::tempdir().unwrap();
    let vcs = DotVcs::new(tempdir.path().to_path_buf());
    assert_eq!(vcs.username().unwrap(), None);
    assert!(!vcs.root().exists());

    vcs.set_username("ann").unwrap();
    vcs.set_username("bo").unwrap();
    assert_eq!(vcs.username().unwrap(), Some(String::from("bo")));
    assert_eq!(
        read_to_string(tempdir.path().join("vcs/config.txt")).unwrap(),
        "bo"
    );
}

#[test]
fn test_store_locations() {
    let tempdir = tempfile::tempdir().unwrap();
    let vcs = DotVcs::new(tempdir.path().to_path_buf());
    vcs.ensure().unwrap();
    vcs.index().append("a.txt").unwrap();
    assert!(tempdir.path().join("vcs/index.txt").is_file());
    assert_eq!(vcs.work_dir(), tempdir.path());
}
