use std::{fmt::Display, path::Component, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An identifier for a single commit.
///
/// Fresh identifiers are random v4 UUIDs, so they say nothing about the
/// content they name. Identifiers read back from the log or typed by the
/// user are accepted as long as they are a single plain path component,
/// since each one names a directory under `vcs/commits`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CommitId(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCommitId(pub String);

impl CommitId {
    pub fn generate() -> Self {
        CommitId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CommitId {
    type Err = InvalidCommitId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut components = Path::new(s).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(c)), None) if c == s => Ok(CommitId(String::from(s))),
            _ => Err(InvalidCommitId(String::from(s))),
        }
    }
}

impl AsRef<Path> for CommitId {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

#[test]
fn test_generate_is_unique() {
    let a = CommitId::generate();
    let b = CommitId::generate();
    assert_ne!(a, b);
    assert_eq!(a.as_str().parse::<CommitId>(), Ok(a));
}

#[test]
fn test_parse_rejects_paths() {
    assert!("".parse::<CommitId>().is_err());
    assert!("..".parse::<CommitId>().is_err());
    assert!(".".parse::<CommitId>().is_err());
    assert!("a/b".parse::<CommitId>().is_err());
    assert!("/abs".parse::<CommitId>().is_err());
    assert!("abc/".parse::<CommitId>().is_err());
    assert!("0f3c-plain".parse::<CommitId>().is_ok());
}
