use std::{fs::read, io::ErrorKind, path::Path};

use crate::{
    commit_id::CommitId,
    commit_store::{CommitStore, StagedFile},
    error::Error,
    history::{HistoryLog, HistoryRecord},
};

/// Reads the current content of every tracked path, relative to `work_dir`.
pub fn stage(tracked: &[String], work_dir: &Path) -> Result<Vec<StagedFile>, Error> {
    let mut staged = Vec::with_capacity(tracked.len());
    for path in tracked {
        let contents = match read(work_dir.join(path)) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(Error::FileNotFound(path.clone()))
            }
            Err(err) => return Err(err.into()),
        };
        staged.push(StagedFile {
            path: path.clone(),
            contents,
        });
    }
    Ok(staged)
}

/// Whether any staged file is missing from the snapshot of `previous` or
/// differs from it byte for byte.
pub fn differs_from<S: CommitStore>(
    staged: &[StagedFile],
    previous: &CommitId,
    store: &S,
) -> Result<bool, S::Error> {
    for file in staged {
        let name = match file.snapshot_name() {
            Some(name) => name,
            None => return Ok(true),
        };
        match store.read(previous, name)? {
            Some(contents) if contents == file.contents => continue,
            _ => {
                log::debug!("{:?} changed since {}", file.path, previous);
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Blank lines separate records in the history log, so they are dropped
/// from the message before it is recorded.
fn log_message(message: &str) -> String {
    message
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Commits the tracked files as they are now in `work_dir`.
///
/// Nothing is written when there is nothing tracked or when every tracked
/// file matches the latest commit. The snapshot is stored before the
/// history record, so the log never names an incomplete snapshot.
pub fn commit<S>(
    message: Option<&str>,
    tracked: &[String],
    work_dir: &Path,
    author: &str,
    history: &mut HistoryLog,
    store: &mut S,
) -> Result<CommitId, Error>
where
    S: CommitStore,
    Error: From<S::Error>,
{
    let message = message.ok_or(Error::MissingMessage)?;
    if tracked.is_empty() {
        return Err(Error::NothingToCommit);
    }
    let staged = stage(tracked, work_dir)?;

    if let Some(previous) = history.latest()? {
        if !differs_from(&staged, &previous, store)? {
            log::info!("working files match {}", previous);
            return Err(Error::NothingToCommit);
        }
    }

    let id = CommitId::generate();
    store.write_snapshot(&id, &staged)?;
    let record = HistoryRecord {
        id: id.clone(),
        author: String::from(author),
        message: log_message(message),
    };
    history
        .prepend(&record)
        .map_err(|err| Error::LogUpdate(id.clone(), err))?;
    log::info!("committed {} with {} files", id, staged.len());
    Ok(id)
}
