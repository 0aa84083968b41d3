#![allow(dead_code)] // Not every suite uses every sample

//! Shared sample corpus for the integration suites.

/// Strings covering ASCII, CJK, combining marks, surrogate-pair emoji,
/// ZWJ sequences, and regional indicators.
pub const SAMPLES: &[&str] = &[
    "",
    "hello",
    "Hi there! It's nice to meet you! 👋",
    "héllo wörld",
    "e\u{301}xpose\u{301}",
    "日本語のテキスト",
    "👨‍👩‍👧‍👦 family",
    "🇺🇸🇯🇵",
    "mixed 漢字 and ascii",
    "line1\nline2\r\nline3",
];

/// Collect the grapheme clusters of a string.
pub fn clusters(s: &str) -> Vec<&str> {
    polytext::unicode::graphemes(s).collect()
}
