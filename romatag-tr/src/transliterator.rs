//! Phonetic romanization of titles
//!
//! Segmentation (which spans of a title romanize to what) is delegated to a
//! [`Segmenter`]. Capitalization and joining are applied here so the
//! segmentation backend can be replaced without touching output formatting.

use crate::classifier::is_cjk_char;
use std::ops::RangeInclusive;

/// A contiguous span of the input paired with its romanization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Substring of the input title
    pub original: String,
    /// Hepburn-style rendering of `original`
    pub romanized: String,
}

impl Segment {
    pub fn new(original: impl Into<String>, romanized: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            romanized: romanized.into(),
        }
    }

    /// Segment left as-is by the segmenter (Latin text, digits, punctuation)
    pub fn passthrough(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            original: text.clone(),
            romanized: text,
        }
    }

    /// True if segmentation actually changed this span
    pub fn is_converted(&self) -> bool {
        self.original != self.romanized
    }

    /// Output form of the segment: converted segments are capitalized
    /// word by word, unchanged ones are returned verbatim
    pub fn render(&self) -> String {
        if !self.is_converted() {
            return self.romanized.clone();
        }
        self.romanized
            .split_whitespace()
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Ordered segments covering the whole input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransliterationResult {
    pub segments: Vec<Segment>,
}

impl TransliterationResult {
    /// Concatenation of the original spans; equals the input title
    pub fn original(&self) -> String {
        self.segments.iter().map(|s| s.original.as_str()).collect()
    }

    /// Rendered segments joined by a single space
    ///
    /// Separators are inserted between every pair of segments, including
    /// next to punctuation and existing whitespace; the normalizer removes
    /// the excess.
    pub fn joined(&self) -> String {
        self.segments
            .iter()
            .map(Segment::render)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Phonetic segmentation capability
pub trait Segmenter {
    /// Split `text` into ordered segments whose originals concatenate to `text`
    fn segment(&self, text: &str) -> Vec<Segment>;
}

/// Blocks handed to the dictionary along with CJK text: CJK symbols and
/// punctuation (`「」、。`) and full-width/half-width forms (`ＡＢＣ（）`),
/// which the dictionary maps to their ASCII counterparts
const DICTIONARY_SYMBOL_RANGES: [RangeInclusive<u32>; 2] = [
    0x3000..=0x303F, // CJK symbols and punctuation
    0xFF00..=0xFFEF, // half-width and full-width forms
];

/// Segmenter backed by the `kakasi` dictionary
///
/// Maximal runs of CJK text, Japanese punctuation and full-width forms are
/// romanized; everything else passes through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct KakasiSegmenter;

impl Segmenter for KakasiSegmenter {
    fn segment(&self, text: &str) -> Vec<Segment> {
        split_runs(text)
            .into_iter()
            .map(|(run, convert)| {
                if convert {
                    let romaji = kakasi::convert(run).romaji;
                    Segment::new(run, romaji)
                } else {
                    Segment::passthrough(run)
                }
            })
            .collect()
    }
}

/// Applies capitalization and joining on top of a [`Segmenter`]
#[derive(Debug, Clone, Default)]
pub struct Transliterator<S = KakasiSegmenter> {
    segmenter: S,
}

impl<S: Segmenter> Transliterator<S> {
    pub fn new(segmenter: S) -> Self {
        Self { segmenter }
    }

    pub fn transliterate(&self, text: &str) -> TransliterationResult {
        TransliterationResult {
            segments: self.segmenter.segment(text),
        }
    }
}

/// Whether `ch` is romanized by the dictionary rather than passed through
fn is_dictionary_char(ch: char) -> bool {
    let cp = ch as u32;
    is_cjk_char(ch) || DICTIONARY_SYMBOL_RANGES.iter().any(|range| range.contains(&cp))
}

/// Split into maximal runs of dictionary / passthrough characters
fn split_runs(text: &str) -> Vec<(&str, bool)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (idx, ch) in text.char_indices() {
        let convert = is_dictionary_char(ch);
        match current {
            Some(kind) if kind != convert => {
                runs.push((&text[start..idx], kind));
                start = idx;
                current = Some(convert);
            }
            None => current = Some(convert),
            _ => {}
        }
    }
    if let Some(kind) = current {
        runs.push((&text[start..], kind));
    }
    runs
}

/// Upper-case the first alphanumeric character, lower-case the rest
///
/// Leading punctuation is kept, so `"kun` becomes `"Kun`.
fn capitalize(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut seen_first = false;
    for ch in word.chars() {
        if !seen_first && ch.is_alphanumeric() {
            seen_first = true;
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_runs() {
        assert_eq!(
            split_runs("Hello 世界!"),
            vec![("Hello ", false), ("世界", true), ("!", false)]
        );
        assert_eq!(split_runs("あいう"), vec![("あいう", true)]);
        assert!(split_runs("").is_empty());
    }

    #[test]
    fn test_split_runs_keeps_japanese_punctuation_with_dictionary_text() {
        assert_eq!(split_runs("「君の名は。」"), vec![("「君の名は。」", true)]);
        assert_eq!(split_runs("さよなら、またね"), vec![("さよなら、またね", true)]);
        assert_eq!(split_runs("ＡＢＣの歌"), vec![("ＡＢＣの歌", true)]);
        assert_eq!(
            split_runs("夜に駆ける（Live）"),
            vec![("夜に駆ける（", true), ("Live", false), ("）", true)]
        );
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("kamikakushi"), "Kamikakushi");
        assert_eq!(capitalize("tOKYO"), "Tokyo");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("\"kun"), "\"Kun");
        assert_eq!(capitalize("ha."), "Ha.");
        assert_eq!(capitalize("("), "(");
    }

    #[test]
    fn test_render_converted_segment_capitalizes_each_word() {
        let seg = Segment::new("千と千尋", "sen to chihiro");
        assert!(seg.is_converted());
        assert_eq!(seg.render(), "Sen To Chihiro");
    }

    #[test]
    fn test_render_passthrough_is_verbatim() {
        let seg = Segment::passthrough("remix ver.");
        assert!(!seg.is_converted());
        assert_eq!(seg.render(), "remix ver.");
    }

    #[test]
    fn test_joined_over_inserts_spaces() {
        let result = TransliterationResult {
            segments: vec![
                Segment::passthrough("("),
                Segment::new("桜", "sakura"),
                Segment::passthrough(") "),
            ],
        };
        assert_eq!(result.joined(), "( Sakura )");
        assert_eq!(result.original(), "(桜) ");
    }

    #[test]
    fn test_kakasi_segments_partition_input() {
        let text = "Live 千と千尋の神隠し 2001";
        let result = Transliterator::new(KakasiSegmenter).transliterate(text);
        assert_eq!(result.original(), text);
        assert_eq!(result.segments.len(), 3);
        assert!(!result.segments[0].is_converted());
        assert!(result.segments[1].is_converted());
        assert!(!result.segments[2].is_converted());
    }
}
