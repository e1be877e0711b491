//! Run driver
//!
//! Scans the directory, then for each file opens its tag store, runs the
//! rewrite state machine and reports the outcome. Files are handled one at
//! a time; each is committed before the next is opened.

use crate::error::{RunError, RunResult, TagError};
use crate::reporter::{Reporter, RunStats};
use crate::scanner::FileScanner;
use crate::state_machine::{Outcome, TitleRewriter};
use crate::tag_store::TagStoreProvider;
use crate::transliterator::Segmenter;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// What to do when a file's tags cannot be read or saved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the run at the first failing file
    #[default]
    Abort,
    /// Log, count as failed, and move on
    Continue,
}

/// Drives a full run over a directory tree
pub struct Runner<P, S> {
    scanner: FileScanner,
    provider: P,
    rewriter: TitleRewriter<S>,
    policy: FailurePolicy,
}

impl<P: TagStoreProvider, S: Segmenter> Runner<P, S> {
    pub fn new(
        scanner: FileScanner,
        provider: P,
        rewriter: TitleRewriter<S>,
        policy: FailurePolicy,
    ) -> Self {
        Self {
            scanner,
            provider,
            rewriter,
            policy,
        }
    }

    /// Process every eligible file under `root`
    ///
    /// Report lines and the summary go to `reporter`. Under
    /// [`FailurePolicy::Abort`] the first tag failure is returned and no
    /// summary is written.
    pub fn run<W: Write>(&self, root: &Path, mut reporter: Reporter<W>) -> RunResult<RunStats> {
        let options = self.rewriter.options();
        info!(
            root = %root.display(),
            mode = ?options.mode,
            dry_run = options.dry_run,
            append_original = options.append_original,
            "Starting run"
        );

        let files = self.scanner.scan(root)?;

        for path in &files {
            match self.process_file(path) {
                Ok(outcome) => reporter.record(&outcome)?,
                Err(source) => match self.policy {
                    FailurePolicy::Abort => {
                        return Err(RunError::Tag {
                            path: path.clone(),
                            source,
                        })
                    }
                    FailurePolicy::Continue => {
                        warn!(file = %path.display(), error = %source, "Skipping file");
                        reporter.record_failure();
                    }
                },
            }
        }

        let stats = reporter.finish()?;
        info!(
            files = files.len(),
            processed = stats.processed,
            skipped = stats.skipped,
            no_cjk = stats.no_cjk,
            failed = stats.failed,
            "Run complete"
        );
        Ok(stats)
    }

    fn process_file(&self, path: &Path) -> Result<Outcome, TagError> {
        let mut store = self.provider.open(path)?;
        self.rewriter.process(&mut store)
    }
}
