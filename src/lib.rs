//! # Simple Version Control
//!
//! This is an implementation of a minimal local version control system.
//! Tracked files are snapshotted into immutable commits under `vcs/`,
//! recorded newest first in a history log, and restored on checkout.

/// Restoring tracked files from a commit's snapshot.
pub mod checkout;
/// Deciding whether the tracked files warrant a new commit, and making it.
pub mod commit;
/// Random identifiers naming each commit.
pub mod commit_id;
/// Per-commit snapshot storage API using the [`commit_id::CommitId`].
pub mod commit_store;
pub mod dot_vcs;
pub mod error;
/// The newest-first commit history.
pub mod history;
/// The set of tracked file paths.
pub mod index;
