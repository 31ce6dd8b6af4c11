//! End-to-end runs of the svcs binary in scratch working directories.

use std::{
    fs::{read_to_string, write},
    path::Path,
    process::Command,
};

use lib::dot_vcs::DotVcs;

fn svcs(dir: &Path, args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_svcs"))
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_help_and_unknown_command() {
    let tempdir = tempfile::tempdir().unwrap();
    let help = "These are SVCS commands:\n\
                config     Get and set a username.\n\
                add        Add a file to the index.\n\
                log        Show commit logs.\n\
                commit     Save changes.\n\
                checkout   Restore a file.\n";
    assert_eq!(svcs(tempdir.path(), &[]), help);
    assert_eq!(svcs(tempdir.path(), &["--help"]), help);
    assert_eq!(
        svcs(tempdir.path(), &["wrong"]),
        "'wrong' is not a SVCS command.\n"
    );
}

#[test]
fn test_config() {
    let tempdir = tempfile::tempdir().unwrap();
    let dir = tempdir.path();
    assert_eq!(svcs(dir, &["config"]), "Please, tell me who you are.\n");
    assert_eq!(svcs(dir, &["config", "ann"]), "The username is ann.\n");
    assert_eq!(svcs(dir, &["config"]), "The username is ann.\n");
}

#[test]
fn test_add() {
    let tempdir = tempfile::tempdir().unwrap();
    let dir = tempdir.path();
    assert_eq!(svcs(dir, &["add"]), "Add a file to the index.\n");
    assert_eq!(svcs(dir, &["add", "missing.txt"]), "Can't find 'missing.txt'.\n");
    assert_eq!(svcs(dir, &["add"]), "Add a file to the index.\n");

    write(dir.join("vcs/index.txt"), "").unwrap();
    assert_eq!(svcs(dir, &["add"]), "No tracked files.\n");

    write(dir.join("a.txt"), "x").unwrap();
    assert_eq!(svcs(dir, &["add", "a.txt"]), "The file 'a.txt' is tracked.\n");
    assert_eq!(svcs(dir, &["add"]), "Tracked files:\na.txt\n");
}

#[test]
fn test_commit_scenario() {
    let tempdir = tempfile::tempdir().unwrap();
    let dir = tempdir.path();
    assert_eq!(svcs(dir, &["log"]), "No commits yet.\n");
    std::fs::create_dir(dir.join("vcs")).unwrap();
    write(dir.join("vcs/log.txt"), "").unwrap();
    assert_eq!(svcs(dir, &["log"]), "No commits yet.\n");
    assert_eq!(svcs(dir, &["commit"]), "Message was not passed.\n");
    assert_eq!(svcs(dir, &["commit", "first"]), "Nothing to commit.\n");

    svcs(dir, &["config", "ann"]);
    write(dir.join("a.txt"), "x").unwrap();
    svcs(dir, &["add", "a.txt"]);
    assert_eq!(svcs(dir, &["commit", "first"]), "Changes are committed.\n");

    let vcs = DotVcs::new(dir.to_path_buf());
    let records = vcs.history().list().unwrap();
    assert_eq!(records.len(), 1);
    let first = records[0].id.clone();
    assert_eq!(
        svcs(dir, &["log"]),
        format!("commit {}\nAuthor: ann\nfirst\n\n", first)
    );

    write(dir.join("a.txt"), "y").unwrap();
    svcs(dir, &["config", "bob"]);
    assert_eq!(svcs(dir, &["commit", "first"]), "Changes are committed.\n");
    assert_eq!(svcs(dir, &["commit", "first"]), "Nothing to commit.\n");

    let records = vcs.history().list().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].id, first);
    assert_eq!(records[0].author, "bob");
    assert_eq!(
        svcs(dir, &["log"]),
        format!(
            "commit {}\nAuthor: bob\nfirst\n\ncommit {}\nAuthor: ann\nfirst\n\n",
            records[0].id, first
        )
    );
    assert_eq!(
        std::fs::read_dir(dir.join("vcs/commits")).unwrap().count(),
        2
    );
}

#[test]
fn test_commit_message_joins_arguments() {
    let tempdir = tempfile::tempdir().unwrap();
    let dir = tempdir.path();
    write(dir.join("a.txt"), "x").unwrap();
    svcs(dir, &["add", "a.txt"]);
    svcs(dir, &["commit", "fix", "the", "-v", "thing"]);
    let records = DotVcs::new(dir.to_path_buf()).history().list().unwrap();
    assert_eq!(records[0].message, "fix the -v thing");
    assert_eq!(records[0].author, "");
}

#[test]
fn test_checkout_round_trip() {
    let tempdir = tempfile::tempdir().unwrap();
    let dir = tempdir.path();
    write(dir.join("a.txt"), "first version").unwrap();
    svcs(dir, &["add", "a.txt"]);
    svcs(dir, &["commit", "one"]);
    let vcs = DotVcs::new(dir.to_path_buf());
    let id = vcs.history().latest().unwrap().unwrap();

    write(dir.join("a.txt"), "second version").unwrap();
    svcs(dir, &["commit", "two"]);

    assert_eq!(svcs(dir, &["checkout"]), "Commit id was not passed.\n");
    assert_eq!(
        svcs(dir, &["checkout", "no-such-commit"]),
        "Commit does not exist.\n"
    );
    assert_eq!(read_to_string(dir.join("a.txt")).unwrap(), "second version");

    assert_eq!(
        svcs(dir, &["checkout", id.as_str()]),
        format!("Switched to commit {}.\n", id)
    );
    assert_eq!(read_to_string(dir.join("a.txt")).unwrap(), "first version");
    assert_eq!(vcs.history().list().unwrap().len(), 2);
}

#[test]
fn test_log_json() {
    let tempdir = tempfile::tempdir().unwrap();
    let dir = tempdir.path();
    assert_eq!(svcs(dir, &["log", "--json"]), "[]\n");

    svcs(dir, &["config", "ann"]);
    write(dir.join("a.txt"), "x").unwrap();
    svcs(dir, &["add", "a.txt"]);
    svcs(dir, &["commit", "hello"]);
    let json: serde_json::Value =
        serde_json::from_str(&svcs(dir, &["log", "--json"])).unwrap();
    assert_eq!(json[0]["author"], "ann");
    assert_eq!(json[0]["message"], "hello");
}

#[test]
fn test_other_working_directory() {
    let tempdir = tempfile::tempdir().unwrap();
    let elsewhere = tempfile::tempdir().unwrap();
    let dir = tempdir.path().to_str().unwrap();
    assert_eq!(
        svcs(elsewhere.path(), &["-C", dir, "config", "ann"]),
        "The username is ann.\n"
    );
    assert!(tempdir.path().join("vcs/config.txt").is_file());
    assert!(!elsewhere.path().join("vcs").exists());
}
