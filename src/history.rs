use std::{
    fmt::Display,
    fs::{read_to_string, write},
    io::ErrorKind,
    path::PathBuf,
};

use serde::{Deserialize, Serialize};

use crate::commit_id::CommitId;

const COMMIT_MARKER: &str = "commit ";
const AUTHOR_MARKER: &str = "Author: ";

/// One entry of the history log.
#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: CommitId,
    /// The username configured when the commit was made.
    pub author: String,
    pub message: String,
}

impl Display for HistoryRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}{}", COMMIT_MARKER, self.id)?;
        writeln!(f, "{}{}", AUTHOR_MARKER, self.author)?;
        writeln!(f, "{}", self.message)
    }
}

/// The commit history, kept newest first in `vcs/log.txt` as blocks of
/// `commit <id>`, `Author: <name>`, the message, and a blank line.
///
/// New records are written in front of the existing text, so the file
/// order is already the display order.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The log text as stored, or `None` if no log has been written yet.
    pub fn read_raw(&self) -> Result<Option<String>, std::io::Error> {
        match read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub fn list(&self) -> Result<Vec<HistoryRecord>, std::io::Error> {
        Ok(self
            .read_raw()?
            .map(|contents| parse_records(&contents))
            .unwrap_or_default())
    }

    /// The id on the first line of the log, if that line is a commit marker.
    pub fn latest(&self) -> Result<Option<CommitId>, std::io::Error> {
        let contents = match self.read_raw()? {
            Some(contents) => contents,
            None => return Ok(None),
        };
        Ok(contents
            .lines()
            .next()
            .and_then(|line| line.strip_prefix(COMMIT_MARKER))
            .and_then(|id| id.parse().ok()))
    }

    pub fn prepend(&mut self, record: &HistoryRecord) -> Result<(), std::io::Error> {
        log::info!("prepending commit {} to {:?}", record.id, self.path);
        let previous = self.read_raw()?.unwrap_or_default();
        write(&self.path, format!("{}\n{}", record, previous))
    }
}

fn parse_records(contents: &str) -> Vec<HistoryRecord> {
    let mut records = Vec::new();
    let mut lines = contents.lines().peekable();
    while let Some(line) = lines.next() {
        let id: CommitId = match line
            .strip_prefix(COMMIT_MARKER)
            .and_then(|id| id.parse().ok())
        {
            Some(id) => id,
            None => {
                log::warn!("skipping unexpected log line {:?}", line);
                continue;
            }
        };
        let author = match lines.peek().and_then(|l| l.strip_prefix(AUTHOR_MARKER)) {
            Some(author) => {
                let author = String::from(author);
                lines.next();
                author
            }
            None => String::new(),
        };
        let mut message = Vec::new();
        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }
            message.push(line);
        }
        records.push(HistoryRecord {
            id,
            author,
            message: message.join("\n"),
        });
    }
    records
}

#[cfg(test)]
fn record(id: &str, author: &str, message: &str) -> HistoryRecord {
    HistoryRecord {
        id: id.parse().unwrap(),
        author: String::from(author),
        message: String::from(message),
    }
}

#[test]
fn test_missing_log() {
    let tempdir = tempfile::tempdir().unwrap();
    let history = HistoryLog::new(tempdir.path().join("log.txt"));
    assert_eq!(history.read_raw().unwrap(), None);
    assert!(history.list().unwrap().is_empty());
    assert_eq!(history.latest().unwrap(), None);
}

#[test]
fn test_prepend_is_newest_first() {
    let tempdir = tempfile::tempdir().unwrap();
    let path = tempdir.path().join("log.txt");
    let mut history = HistoryLog::new(path.clone());
    history.prepend(&record("one", "ann", "first")).unwrap();
    history.prepend(&record("two", "bob", "second")).unwrap();
    assert_eq!(
        read_to_string(path).unwrap(),
        "commit two\nAuthor: bob\nsecond\n\ncommit one\nAuthor: ann\nfirst\n\n"
    );
    assert_eq!(
        history.list().unwrap(),
        vec![record("two", "bob", "second"), record("one", "ann", "first")]
    );
    assert_eq!(history.latest().unwrap(), Some("two".parse().unwrap()));
}

#[test]
fn test_latest_ignores_malformed_log() {
    let tempdir = tempfile::tempdir().unwrap();
    let path = tempdir.path().join("log.txt");
    write(&path, "not a commit line\n").unwrap();
    let history = HistoryLog::new(path.clone());
    assert_eq!(history.latest().unwrap(), None);

    write(&path, "").unwrap();
    assert_eq!(history.latest().unwrap(), None);
    assert_eq!(history.read_raw().unwrap(), Some(String::new()));
}

#[test]
fn test_parse_empty_author_and_message() {
    let records = parse_records("commit a\nAuthor: \n\n\ncommit b\nAuthor: x\nhello\n\n");
    assert_eq!(records, vec![record("a", "", ""), record("b", "x", "hello")]);
}
