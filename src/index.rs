use std::{
    fs::{read_to_string, File},
    io::{ErrorKind, Write},
    path::PathBuf,
};

/// The tracked file set, kept as `vcs/index.txt` with one path per line.
///
/// Paths are stored exactly as they were added. Adding the same path twice
/// records it twice.
#[derive(Debug, Clone)]
pub struct IndexStore {
    path: PathBuf,
}

impl IndexStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Whether the index file has ever been written. An index that exists
    /// but holds no paths is different from one that was never created.
    pub fn exists(&self) -> Result<bool, std::io::Error> {
        self.path.try_exists()
    }

    pub fn list(&self) -> Result<Vec<String>, std::io::Error> {
        log::debug!("listing tracked files in {:?}", self.path);
        match read_to_string(&self.path) {
            Ok(contents) => Ok(contents
                .lines()
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }

    pub fn append(&mut self, tracked: &str) -> Result<(), std::io::Error> {
        log::info!("tracking {:?} in {:?}", tracked, self.path);
        let mut file = File::options()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", tracked)
    }
}

#[test]
fn test_missing_index_is_empty() {
    let tempdir = tempfile::tempdir().unwrap();
    let index = IndexStore::new(tempdir.path().join("index.txt"));
    assert!(!index.exists().unwrap());
    assert!(index.list().unwrap().is_empty());
}

#[test]
fn test_empty_index_exists() {
    let tempdir = tempfile::tempdir().unwrap();
    let path = tempdir.path().join("index.txt");
    File::create(&path).unwrap();
    let index = IndexStore::new(path);
    assert!(index.exists().unwrap());
    assert!(index.list().unwrap().is_empty());
}

#[test]
fn test_append_keeps_order_and_duplicates() {
    let tempdir = tempfile::tempdir().unwrap();
    let path = tempdir.path().join("index.txt");
    let mut index = IndexStore::new(path.clone());
    index.append("a.txt").unwrap();
    index.append("dir/b.txt").unwrap();
    index.append("a.txt").unwrap();
    assert_eq!(index.list().unwrap(), vec!["a.txt", "dir/b.txt", "a.txt"]);
    assert_eq!(read_to_string(path).unwrap(), "a.txt\ndir/b.txt\na.txt\n");
}
