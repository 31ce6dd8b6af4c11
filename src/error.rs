use std::convert::Infallible;

use derive_more::{Display, From};

use crate::commit_id::CommitId;

/// Everything that can stop a command. The [`Display`] text of each variant
/// is exactly what the command line prints.
#[derive(Debug, Display, From)]
pub enum Error {
    #[display(fmt = "Message was not passed.")]
    MissingMessage,
    #[display(fmt = "Commit id was not passed.")]
    MissingCommitId,
    #[display(fmt = "Can't find '{}'.", _0)]
    FileNotFound(String),
    #[display(fmt = "Commit does not exist.")]
    CommitNotFound(String),
    #[display(fmt = "Nothing to commit.")]
    NothingToCommit,
    /// The history log could not be rewritten after the snapshot of `0` was stored.
    #[display(fmt = "Log file does not exist.")]
    LogUpdate(CommitId, std::io::Error),
    #[from]
    #[display(fmt = "{}", _0)]
    IO(std::io::Error),
    #[from]
    #[display(fmt = "{}", _0)]
    Serde(serde_json::Error),
}

impl std::error::Error for Error {}

impl From<Infallible> for Error {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

#[test]
fn test_messages() {
    assert_eq!(Error::MissingMessage.to_string(), "Message was not passed.");
    assert_eq!(
        Error::FileNotFound(String::from("missing.txt")).to_string(),
        "Can't find 'missing.txt'."
    );
    assert_eq!(
        Error::CommitNotFound(String::from("nope")).to_string(),
        "Commit does not exist."
    );
    assert_eq!(Error::NothingToCommit.to_string(), "Nothing to commit.");
}
