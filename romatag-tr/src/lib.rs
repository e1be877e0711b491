//! romatag-tr library interface
//!
//! Title rewriting for audio libraries: CJK titles are romanized to
//! Hepburn and the original is archived in a separate tag so it can be
//! restored later.
//!
//! Pipeline per file: [`classifier`] decides whether a title has CJK text,
//! [`transliterator`] romanizes it, [`normalizer`] cleans up spacing, and
//! [`state_machine`] applies the change through a [`tag_store`]. The
//! [`runner`] walks a directory and feeds outcomes to the [`reporter`].

pub mod classifier;
pub mod error;
pub mod normalizer;
pub mod reporter;
pub mod runner;
pub mod scanner;
pub mod state_machine;
pub mod tag_store;
pub mod transliterator;

pub use crate::error::{RunError, RunResult, TagError};
pub use crate::reporter::{pad, Reporter, RunStats};
pub use crate::runner::{FailurePolicy, Runner};
pub use crate::state_machine::{Mode, Outcome, RewriteOptions, TitleRewriter};
