//! In-memory tag store
//!
//! Used by tests and previews. [`MemoryProvider`] stands in for a music
//! library on disk: stores opened from it write back to the shared map on
//! commit.

use super::{TagField, TagStore, TagStoreProvider};
use crate::error::TagError;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

type Fields = HashMap<TagField, String>;

/// Tag store holding its fields in memory
#[derive(Debug, Default)]
pub struct MemoryTagStore {
    path: PathBuf,
    fields: Fields,
    persisted: Fields,
    commits: usize,
    fail_commit: bool,
    library: Option<Rc<RefCell<HashMap<PathBuf, Fields>>>>,
}

impl MemoryTagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose title is already set (and persisted)
    pub fn with_title(title: &str) -> Self {
        Self::new().with_field(TagField::Title, title)
    }

    pub fn with_field(mut self, field: TagField, value: &str) -> Self {
        self.fields.insert(field, value.to_string());
        self.persisted = self.fields.clone();
        self
    }

    /// Number of successful commits
    pub fn commits(&self) -> usize {
        self.commits
    }

    /// Value as of the last commit
    pub fn persisted(&self, field: TagField) -> Option<&str> {
        self.persisted.get(&field).map(String::as_str)
    }
}

impl TagStore for MemoryTagStore {
    fn read(&self, field: TagField) -> Option<String> {
        self.fields.get(&field).filter(|v| !v.is_empty()).cloned()
    }

    fn write(&mut self, field: TagField, value: &str) {
        self.fields.insert(field, value.to_string());
    }

    fn delete(&mut self, field: TagField) {
        self.fields.remove(&field);
    }

    fn commit(&mut self) -> Result<(), TagError> {
        if self.fail_commit {
            return Err(TagError::write(&self.path, "simulated write failure"));
        }
        self.persisted = self.fields.clone();
        self.commits += 1;
        if let Some(library) = &self.library {
            library
                .borrow_mut()
                .insert(self.path.clone(), self.persisted.clone());
        }
        Ok(())
    }
}

/// Provider over a shared in-memory library keyed by path
///
/// Paths that were never added fail to open, like a corrupt or empty file.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    library: Rc<RefCell<HashMap<PathBuf, Fields>>>,
    fail_commit: Rc<RefCell<HashSet<PathBuf>>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, fields: &[(TagField, &str)]) {
        let fields = fields
            .iter()
            .map(|(f, v)| (*f, v.to_string()))
            .collect();
        self.library.borrow_mut().insert(path.into(), fields);
    }

    /// Make commits for `path` fail
    pub fn fail_commits_for(&self, path: impl Into<PathBuf>) {
        self.fail_commit.borrow_mut().insert(path.into());
    }

    /// Persisted value of a field
    pub fn get(&self, path: &Path, field: TagField) -> Option<String> {
        self.library
            .borrow()
            .get(path)
            .and_then(|fields| fields.get(&field).cloned())
    }
}

impl TagStoreProvider for MemoryProvider {
    type Store = MemoryTagStore;

    fn open(&self, path: &Path) -> Result<MemoryTagStore, TagError> {
        let fields = self
            .library
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| TagError::read(path, "no tag data"))?;

        Ok(MemoryTagStore {
            path: path.to_path_buf(),
            persisted: fields.clone(),
            fields,
            commits: 0,
            fail_commit: self.fail_commit.borrow().contains(path),
            library: Some(Rc::clone(&self.library)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_are_pending_until_commit() {
        let mut store = MemoryTagStore::with_title("古い");
        store.write(TagField::Title, "Furui");
        assert_eq!(store.read(TagField::Title).as_deref(), Some("Furui"));
        assert_eq!(store.persisted(TagField::Title), Some("古い"));

        store.commit().unwrap();
        assert_eq!(store.persisted(TagField::Title), Some("Furui"));
        assert_eq!(store.commits(), 1);
    }

    #[test]
    fn test_empty_value_reads_as_absent() {
        let store = MemoryTagStore::with_title("x").with_field(TagField::OriginalTitle, "");
        assert_eq!(store.read(TagField::OriginalTitle), None);
    }

    #[test]
    fn test_provider_round_trip() {
        let provider = MemoryProvider::new();
        let path = Path::new("/music/a.flac");
        provider.insert(path, &[(TagField::Title, "桜")]);

        let mut store = provider.open(path).unwrap();
        store.write(TagField::OriginalTitle, "桜");
        store.commit().unwrap();

        assert_eq!(provider.get(path, TagField::OriginalTitle).as_deref(), Some("桜"));
    }

    #[test]
    fn test_provider_unknown_path_is_read_error() {
        let provider = MemoryProvider::new();
        assert!(matches!(
            provider.open(Path::new("/music/missing.mp3")),
            Err(TagError::Read { .. })
        ));
    }

    #[test]
    fn test_provider_commit_failure() {
        let provider = MemoryProvider::new();
        let path = Path::new("/music/b.ogg");
        provider.insert(path, &[(TagField::Title, "b")]);
        provider.fail_commits_for(path);

        let mut store = provider.open(path).unwrap();
        assert!(matches!(store.commit(), Err(TagError::Write { .. })));
    }
}
