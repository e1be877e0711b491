//! Tag store backed by lofty
//!
//! MPEG and WAV files are handled through their ID3v2 tag so the archived
//! title can live in a `TXXX` user-text frame. Other formats use lofty's
//! generic tag of the file's primary type, with the archived title stored
//! as a custom item (Vorbis comment, APE item, or iTunes freeform atom).

use super::{TagField, TagStore, TagStoreProvider};
use crate::error::TagError;
use lofty::config::{ParseOptions, WriteOptions};
use lofty::file::{AudioFile, FileType, TaggedFileExt};
use lofty::id3::v2::Id3v2Tag;
use lofty::iff::wav::WavFile;
use lofty::mpeg::MpegFile;
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey, Tag, TagExt, TagType};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Mean string for MP4 freeform atoms
const ITUNES_MEAN: &str = "com.apple.iTunes";

enum Container {
    Id3v2(Id3v2Tag),
    Generic(Tag),
}

/// Tag store over a single audio file
pub struct LoftyTagStore {
    path: PathBuf,
    archive_key: String,
    container: Container,
}

impl LoftyTagStore {
    /// Open `path` and load its tags
    ///
    /// Fails with [`TagError::Read`] if the format is unrecognized or the
    /// file cannot be decoded.
    pub fn open(path: &Path, archive_key: &str) -> Result<Self, TagError> {
        let probe = Probe::open(path)
            .map_err(|e| TagError::read(path, e))?
            .guess_file_type()
            .map_err(|e| TagError::read(path, e))?;

        let container = match probe.file_type() {
            Some(FileType::Mpeg) => {
                let mut file = File::open(path).map_err(|e| TagError::read(path, e))?;
                let mpeg = MpegFile::read_from(&mut file, ParseOptions::new())
                    .map_err(|e| TagError::read(path, e))?;
                Container::Id3v2(mpeg.id3v2().cloned().unwrap_or_default())
            }
            Some(FileType::Wav) => {
                let mut file = File::open(path).map_err(|e| TagError::read(path, e))?;
                let wav = WavFile::read_from(&mut file, ParseOptions::new())
                    .map_err(|e| TagError::read(path, e))?;
                Container::Id3v2(wav.id3v2().cloned().unwrap_or_default())
            }
            Some(_) => {
                let tagged = probe.read().map_err(|e| TagError::read(path, e))?;
                let tag = match tagged.primary_tag() {
                    Some(tag) => tag.clone(),
                    None => Tag::new(tagged.primary_tag_type()),
                };
                Container::Generic(tag)
            }
            None => return Err(TagError::read(path, "unrecognized audio format")),
        };

        tracing::trace!(file = %path.display(), "Loaded tags");

        Ok(Self {
            path: path.to_path_buf(),
            archive_key: archive_key.to_string(),
            container,
        })
    }

    /// Item key for the archived title in a generic tag of `tag_type`
    fn archive_item_key(&self, tag_type: TagType) -> ItemKey {
        match tag_type {
            TagType::Mp4Ilst => {
                ItemKey::Unknown(format!("----:{}:{}", ITUNES_MEAN, self.archive_key))
            }
            _ => ItemKey::Unknown(self.archive_key.clone()),
        }
    }
}

impl TagStore for LoftyTagStore {
    fn read(&self, field: TagField) -> Option<String> {
        let value = match (&self.container, field) {
            (Container::Id3v2(tag), TagField::Title) => tag.title().map(|t| t.into_owned()),
            (Container::Id3v2(tag), TagField::OriginalTitle) => {
                tag.get_user_text(&self.archive_key).map(str::to_string)
            }
            (Container::Generic(tag), TagField::Title) => tag.title().map(|t| t.into_owned()),
            (Container::Generic(tag), TagField::OriginalTitle) => tag
                .get_string(&self.archive_item_key(tag.tag_type()))
                .map(str::to_string),
        };
        value.filter(|v| !v.is_empty())
    }

    fn write(&mut self, field: TagField, value: &str) {
        let key = match &self.container {
            Container::Generic(tag) => Some(self.archive_item_key(tag.tag_type())),
            Container::Id3v2(_) => None,
        };
        match (&mut self.container, field) {
            (Container::Id3v2(tag), TagField::Title) => tag.set_title(value.to_string()),
            (Container::Id3v2(tag), TagField::OriginalTitle) => {
                tag.insert_user_text(self.archive_key.clone(), value.to_string());
            }
            (Container::Generic(tag), TagField::Title) => tag.set_title(value.to_string()),
            (Container::Generic(tag), TagField::OriginalTitle) => {
                if let Some(key) = key {
                    tag.insert_text(key, value.to_string());
                }
            }
        }
    }

    fn delete(&mut self, field: TagField) {
        let key = match &self.container {
            Container::Generic(tag) => Some(self.archive_item_key(tag.tag_type())),
            Container::Id3v2(_) => None,
        };
        match (&mut self.container, field) {
            (Container::Id3v2(tag), TagField::Title) => {
                tag.remove_title();
            }
            (Container::Id3v2(tag), TagField::OriginalTitle) => {
                tag.remove_user_text(&self.archive_key);
            }
            (Container::Generic(tag), TagField::Title) => {
                tag.remove_title();
            }
            (Container::Generic(tag), TagField::OriginalTitle) => {
                if let Some(key) = key {
                    tag.remove_key(&key);
                }
            }
        }
    }

    fn commit(&mut self) -> Result<(), TagError> {
        let result = match &self.container {
            Container::Id3v2(tag) => tag.save_to_path(&self.path, WriteOptions::default()),
            Container::Generic(tag) => tag.save_to_path(&self.path, WriteOptions::default()),
        };
        result.map_err(|e| TagError::write(&self.path, e))?;

        tracing::debug!(file = %self.path.display(), "Saved tags");
        Ok(())
    }
}

/// Opens [`LoftyTagStore`]s with a fixed archive key
#[derive(Debug, Clone)]
pub struct LoftyProvider {
    archive_key: String,
}

impl LoftyProvider {
    pub fn new(archive_key: impl Into<String>) -> Self {
        Self {
            archive_key: archive_key.into(),
        }
    }
}

impl TagStoreProvider for LoftyProvider {
    type Store = LoftyTagStore;

    fn open(&self, path: &Path) -> Result<LoftyTagStore, TagError> {
        LoftyTagStore::open(path, &self.archive_key)
    }
}
