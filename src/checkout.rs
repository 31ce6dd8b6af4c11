use std::{
    fs::{create_dir_all, write},
    path::Path,
};

use crate::{commit_id::CommitId, commit_store::CommitStore, error::Error};

/// What a checkout did to the working files.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Checkout {
    pub id: CommitId,
    /// Tracked paths overwritten from the snapshot.
    pub restored: Vec<String>,
    /// Tracked paths the snapshot has no copy of. These are left alone.
    pub skipped: Vec<String>,
}

/// Restores every tracked file that the snapshot of `commit_id` holds a copy of.
///
/// Only working files are written; the store is read and nothing else.
pub fn checkout<S>(
    commit_id: Option<&str>,
    tracked: &[String],
    work_dir: &Path,
    store: &S,
) -> Result<Checkout, Error>
where
    S: CommitStore,
    Error: From<S::Error>,
{
    let raw = commit_id.ok_or(Error::MissingCommitId)?;
    let id: CommitId = raw
        .parse()
        .map_err(|_| Error::CommitNotFound(String::from(raw)))?;
    if !store.has(&id)? {
        return Err(Error::CommitNotFound(String::from(raw)));
    }

    let mut restored = Vec::new();
    let mut skipped = Vec::new();
    for path in tracked {
        let contents = match Path::new(path).file_name() {
            Some(name) => store.read(&id, name)?,
            None => None,
        };
        match contents {
            Some(contents) => {
                log::debug!("restoring {:?} from {}", path, id);
                let target = work_dir.join(path);
                if let Some(parent) = target.parent() {
                    create_dir_all(parent)?;
                }
                write(target, contents)?;
                restored.push(path.clone());
            }
            None => {
                log::debug!("{} has no copy of {:?}", id, path);
                skipped.push(path.clone());
            }
        }
    }
    log::info!(
        "checked out {}: {} restored, {} skipped",
        id,
        restored.len(),
        skipped.len()
    );
    Ok(Checkout {
        id,
        restored,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use std::fs::read_to_string;

    use super::*;
    use crate::commit_store::{in_memory::InMemoryCommitStore, StagedFile};

    #[test]
    fn test_missing_commit_id() {
        let tempdir = tempfile::tempdir().unwrap();
        let store = InMemoryCommitStore::new();
        let err = checkout(None, &[], tempdir.path(), &store).unwrap_err();
        assert_eq!(err.to_string(), "Commit id was not passed.");
    }

    #[test]
    fn test_unknown_commit_changes_nothing() {
        let tempdir = tempfile::tempdir().unwrap();
        write(tempdir.path().join("a.txt"), "now").unwrap();
        let store = InMemoryCommitStore::new();
        let tracked = vec![String::from("a.txt")];
        for id in ["deadbeef", "../vcs", ""] {
            let err = checkout(Some(id), &tracked, tempdir.path(), &store).unwrap_err();
            assert_eq!(err.to_string(), "Commit does not exist.");
        }
        assert_eq!(read_to_string(tempdir.path().join("a.txt")).unwrap(), "now");
    }

    #[test]
    fn test_partial_restore() {
        let tempdir = tempfile::tempdir().unwrap();
        std::fs::create_dir(tempdir.path().join("docs")).unwrap();
        write(tempdir.path().join("docs/a.txt"), "changed").unwrap();
        write(tempdir.path().join("b.txt"), "untouched").unwrap();

        let mut store = InMemoryCommitStore::new();
        let id = CommitId::generate();
        store
            .write_snapshot(
                &id,
                &[StagedFile {
                    path: String::from("docs/a.txt"),
                    contents: b"original".to_vec(),
                }],
            )
            .unwrap();

        let tracked = vec![String::from("docs/a.txt"), String::from("b.txt")];
        let result = checkout(Some(id.as_str()), &tracked, tempdir.path(), &store).unwrap();
        assert_eq!(result.restored, vec![String::from("docs/a.txt")]);
        assert_eq!(result.skipped, vec![String::from("b.txt")]);
        assert_eq!(
            read_to_string(tempdir.path().join("docs/a.txt")).unwrap(),
            "original"
        );
        assert_eq!(
            read_to_string(tempdir.path().join("b.txt")).unwrap(),
            "untouched"
        );
    }

    #[test]
    fn test_restore_recreates_missing_directories() {
        let tempdir = tempfile::tempdir().unwrap();
        let mut store = InMemoryCommitStore::new();
        let id = CommitId::generate();
        store
            .write_snapshot(
                &id,
                &[StagedFile {
                    path: String::from("docs/a.txt"),
                    contents: b"original".to_vec(),
                }],
            )
            .unwrap();

        let tracked = vec![String::from("docs/a.txt")];
        let result = checkout(Some(id.as_str()), &tracked, tempdir.path(), &store).unwrap();
        assert_eq!(result.restored, tracked);
        assert_eq!(
            read_to_string(tempdir.path().join("docs/a.txt")).unwrap(),
            "original"
        );
    }
}
