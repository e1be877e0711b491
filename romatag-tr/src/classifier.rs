//! CJK script detection
//!
//! A character is CJK when its code point falls inside one of the
//! inclusive ranges below.

use std::ops::RangeInclusive;

/// Code-point ranges treated as CJK
pub const CJK_RANGES: [RangeInclusive<u32>; 13] = [
    0x3300..=0x33FF,   // compatibility
    0xFE30..=0xFE4F,   // compatibility forms
    0xF900..=0xFAFF,   // compatibility ideographs
    0x2F800..=0x2FA1F, // compatibility ideographs supplement
    0x3040..=0x309F,   // Hiragana
    0x30A0..=0x30FF,   // Katakana
    0x2E80..=0x2EFF,   // radicals supplement
    0x4E00..=0x9FFF,   // unified ideographs
    0x3400..=0x4DBF,   // extension A
    0x20000..=0x2A6DF, // extension B
    0x2A700..=0x2B73F, // extension C
    0x2B740..=0x2B81F, // extension D
    0x2B820..=0x2CEAF, // extension E
];

/// Whether `ch` lies in one of the CJK ranges
#[inline]
pub fn is_cjk_char(ch: char) -> bool {
    let cp = ch as u32;
    CJK_RANGES.iter().any(|range| range.contains(&cp))
}

/// Whether any character of `text` is CJK
pub fn is_cjk(text: &str) -> bool {
    text.chars().any(is_cjk_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_boundaries() {
        for range in CJK_RANGES.iter() {
            let start = char::from_u32(*range.start()).unwrap();
            let end = char::from_u32(*range.end()).unwrap();
            assert!(is_cjk_char(start), "start of {:X?}", range);
            assert!(is_cjk_char(end), "end of {:X?}", range);
        }
        // Just outside the unified ideographs and Hiragana blocks
        assert!(!is_cjk_char('\u{4DC0}'));
        assert!(!is_cjk_char('\u{A000}'));
        assert!(!is_cjk_char('\u{303F}'));
    }

    #[test]
    fn test_scripts() {
        assert!(is_cjk_char('あ'));
        assert!(is_cjk_char('カ'));
        assert!(is_cjk_char('神'));
        assert!(is_cjk_char('㍻'));
        assert!(is_cjk_char('\u{20B9F}')); // 𠮟, extension B
        assert!(!is_cjk_char('a'));
        assert!(!is_cjk_char('é'));
        assert!(!is_cjk_char('한')); // Hangul syllables are not in the table
    }

    #[test]
    fn test_string_membership() {
        assert!(is_cjk("千と千尋の神隠し"));
        assert!(is_cjk("Remix (リミックス)"));
        assert!(!is_cjk("Hello World"));
        assert!(!is_cjk("Café del Mar, 1999!"));
        assert!(!is_cjk(""));
    }
}
