//! Tag store capability
//!
//! The title rewriter only sees two logical fields through a small
//! read/write/delete/commit interface. Concrete containers (ID3v2, Vorbis
//! comments, MP4 atoms, or memory for tests) live behind it.

pub mod lofty_store;
pub mod memory;

pub use lofty_store::{LoftyProvider, LoftyTagStore};
pub use memory::{MemoryProvider, MemoryTagStore};

use crate::error::TagError;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Logical tag fields used by the rewriter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagField {
    /// Current track title
    Title,
    /// Title before conversion, kept so it can be restored
    OriginalTitle,
}

impl TagField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagField::Title => "TITLE",
            TagField::OriginalTitle => "ORIGINAL_TITLE",
        }
    }
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagField {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TITLE" => Ok(TagField::Title),
            "ORIGINAL_TITLE" | "ORIG_TITLE" => Ok(TagField::OriginalTitle),
            _ => Err(TagError::UnknownField(s.to_string())),
        }
    }
}

/// Per-file tag access
///
/// Writes and deletes are buffered until [`commit`](TagStore::commit).
pub trait TagStore {
    /// Current value; empty values read as `None`
    fn read(&self, field: TagField) -> Option<String>;

    fn write(&mut self, field: TagField, value: &str);

    fn delete(&mut self, field: TagField);

    /// Persist pending changes
    fn commit(&mut self) -> Result<(), TagError>;
}

/// Opens a [`TagStore`] for a file path
pub trait TagStoreProvider {
    type Store: TagStore;

    fn open(&self, path: &Path) -> Result<Self::Store, TagError>;
}
