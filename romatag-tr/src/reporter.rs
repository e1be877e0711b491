//! Run statistics and aligned terminal report
//!
//! Report lines pad by terminal display width rather than by code points, so
//! columns stay aligned when titles mix wide CJK glyphs with Latin text.

use crate::state_machine::{Mode, Outcome};
use std::io::{self, Write};
use unicode_width::UnicodeWidthChar;

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Files converted or restored
    pub processed: usize,
    /// Files already converted (convert) or with nothing to restore (restore)
    pub skipped: usize,
    /// Files without CJK characters (convert only)
    pub no_cjk: usize,
    /// Files that could not be read or saved (only when continuing past failures)
    pub failed: usize,
}

impl RunStats {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Converted { .. } | Outcome::Restored { .. } => self.processed += 1,
            Outcome::SkippedAlreadyConverted | Outcome::SkippedNoOriginal => self.skipped += 1,
            Outcome::SkippedNotCjk => self.no_cjk += 1,
        }
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// Summary block for the given mode
    pub fn summary(&self, mode: Mode) -> String {
        let mut out = match mode {
            Mode::Restore => format!(
                "{:<6}items restored.\n{:<6}items had no original title.",
                self.processed, self.skipped
            ),
            Mode::Convert => format!(
                "{:<6}new items processed.\n{:<6}items already converted.\n{:<6}items had no CJK characters.",
                self.processed, self.skipped, self.no_cjk
            ),
        };
        if self.failed > 0 {
            out.push_str(&format!("\n{:<6}items failed.", self.failed));
        }
        out
    }
}

/// Display columns occupied by `text`; wide glyphs count 2, control and
/// zero-width characters 0
pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Left-justify `text` to `width` display columns
///
/// Text already at least `width` columns wide is returned unchanged.
pub fn pad(text: &str, width: usize) -> String {
    let text_width = display_width(text);
    if width <= text_width {
        return text.to_string();
    }
    let mut padded = String::with_capacity(text.len() + width - text_width);
    padded.push_str(text);
    padded.extend(std::iter::repeat(' ').take(width - text_width));
    padded
}

/// Writes per-file lines and the final summary
pub struct Reporter<W: Write> {
    out: W,
    mode: Mode,
    old_title_width: usize,
    new_title_width: usize,
    stats: RunStats,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, mode: Mode, old_title_width: usize, new_title_width: usize) -> Self {
        Self {
            out,
            mode,
            old_title_width,
            new_title_width,
            stats: RunStats::default(),
        }
    }

    /// Count an outcome; converted/restored files also get a report line
    pub fn record(&mut self, outcome: &Outcome) -> io::Result<()> {
        self.stats.record(outcome);
        if let Some((old_title, new_title)) = outcome.titles() {
            writeln!(
                self.out,
                "{} {}",
                pad(old_title, self.old_title_width),
                pad(new_title, self.new_title_width)
            )?;
        }
        Ok(())
    }

    pub fn record_failure(&mut self) {
        self.stats.record_failure();
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Write the summary block and return the final counters
    pub fn finish(mut self) -> io::Result<RunStats> {
        writeln!(self.out, "{}", self.stats.summary(self.mode))?;
        self.out.flush()?;
        Ok(self.stats)
    }
}
