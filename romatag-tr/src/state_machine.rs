//! Per-file title rewrite decisions
//!
//! Given a [`TagStore`], decide whether its title is converted, restored or
//! skipped, and apply the change. The archived original title is what makes
//! conversion one-shot and restore possible:
//!
//! - archived title present  => file has been converted and not restored
//! - convert with archive    => `SkippedAlreadyConverted`, nothing written
//! - restore without archive => `SkippedNoOriginal`, nothing written

use crate::classifier::is_cjk;
use crate::error::TagError;
use crate::normalizer::clean;
use crate::tag_store::{TagField, TagStore};
use crate::transliterator::{KakasiSegmenter, Segmenter, Transliterator};
use tracing::debug;

/// What a run does to each file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Romanize CJK titles
    #[default]
    Convert,
    /// Put archived original titles back
    Restore,
}

/// Options shared by every file in a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteOptions {
    pub mode: Mode,
    /// Decide and report, but never write or commit
    pub dry_run: bool,
    /// Append `" [original]"` to converted titles
    pub append_original: bool,
}

/// Terminal state of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Converted { old_title: String, new_title: String },
    Restored { old_title: String, new_title: String },
    SkippedAlreadyConverted,
    SkippedNoOriginal,
    SkippedNotCjk,
}

impl Outcome {
    /// Titles to report, for outcomes that changed the title
    pub fn titles(&self) -> Option<(&str, &str)> {
        match self {
            Outcome::Converted { old_title, new_title }
            | Outcome::Restored { old_title, new_title } => {
                Some((old_title.as_str(), new_title.as_str()))
            }
            _ => None,
        }
    }
}

/// Title rewrite state machine
pub struct TitleRewriter<S = KakasiSegmenter> {
    options: RewriteOptions,
    transliterator: Transliterator<S>,
}

impl TitleRewriter<KakasiSegmenter> {
    /// Rewriter using the kakasi dictionary
    pub fn new(options: RewriteOptions) -> Self {
        Self::with_segmenter(options, KakasiSegmenter)
    }
}

impl<S: Segmenter> TitleRewriter<S> {
    pub fn with_segmenter(options: RewriteOptions, segmenter: S) -> Self {
        Self {
            options,
            transliterator: Transliterator::new(segmenter),
        }
    }

    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    /// Romanized form of `title` as it would be written
    ///
    /// When cleanup leaves nothing, `title` itself is returned, without an
    /// appended copy.
    pub fn convert_title(&self, title: &str) -> String {
        let joined = self.transliterator.transliterate(title).joined();
        let mut new_title = clean(&joined, self.options.append_original);
        if new_title.is_empty() {
            debug!(title = %title, "Romanization is empty, keeping title");
            return title.to_string();
        }
        if self.options.append_original {
            new_title.push_str(" [");
            new_title.push_str(title);
            new_title.push(']');
        }
        new_title
    }

    /// Decide and apply the rewrite for one file
    ///
    /// Only commit failures surface as errors.
    pub fn process<T: TagStore + ?Sized>(&self, store: &mut T) -> Result<Outcome, TagError> {
        let old_title = store.read(TagField::Title).unwrap_or_default();
        let archived = store.read(TagField::OriginalTitle);

        match self.options.mode {
            Mode::Restore => self.restore(store, old_title, archived),
            Mode::Convert => self.convert(store, old_title, archived),
        }
    }

    fn restore<T: TagStore + ?Sized>(
        &self,
        store: &mut T,
        old_title: String,
        archived: Option<String>,
    ) -> Result<Outcome, TagError> {
        let Some(original) = archived else {
            debug!(title = %old_title, "No archived title to restore");
            return Ok(Outcome::SkippedNoOriginal);
        };

        if !self.options.dry_run {
            store.write(TagField::Title, &original);
            store.delete(TagField::OriginalTitle);
            store.commit()?;
        }

        debug!(from = %old_title, to = %original, dry_run = self.options.dry_run, "Restored title");
        Ok(Outcome::Restored {
            old_title,
            new_title: original,
        })
    }

    fn convert<T: TagStore + ?Sized>(
        &self,
        store: &mut T,
        old_title: String,
        archived: Option<String>,
    ) -> Result<Outcome, TagError> {
        if archived.is_some() {
            debug!(title = %old_title, "Already converted");
            return Ok(Outcome::SkippedAlreadyConverted);
        }

        if !is_cjk(&old_title) {
            debug!(title = %old_title, "No CJK characters");
            return Ok(Outcome::SkippedNotCjk);
        }

        let new_title = self.convert_title(&old_title);

        if !self.options.dry_run {
            store.write(TagField::Title, &new_title);
            if store.read(TagField::OriginalTitle).is_none() {
                store.write(TagField::OriginalTitle, &old_title);
            }
            store.commit()?;
        }

        debug!(from = %old_title, to = %new_title, dry_run = self.options.dry_run, "Converted title");
        Ok(Outcome::Converted {
            old_title,
            new_title,
        })
    }
}
