//! Grapheme cluster iteration and boundary queries.

use std::ops::Range;

use unicode_segmentation::{GraphemeCursor, UnicodeSegmentation};

/// Iterate over extended grapheme clusters in a string.
pub fn graphemes(s: &str) -> impl Iterator<Item = &str> {
    s.graphemes(true)
}

/// Iterate over grapheme clusters with their byte offsets.
pub fn grapheme_indices(s: &str) -> impl Iterator<Item = (usize, &str)> {
    s.grapheme_indices(true)
}

/// Count the grapheme clusters in a string.
#[must_use]
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Round `offset` down to the nearest scalar boundary.
pub(crate) fn floor_scalar_boundary(s: &str, offset: usize) -> usize {
    let mut off = offset.min(s.len());
    while !s.is_char_boundary(off) {
        off -= 1;
    }
    off
}

/// Whether `offset` lies on a grapheme cluster boundary of `s`.
#[must_use]
pub fn is_grapheme_boundary(s: &str, offset: usize) -> bool {
    if offset == 0 || offset == s.len() {
        return true;
    }
    if offset > s.len() || !s.is_char_boundary(offset) {
        return false;
    }
    let mut cursor = GraphemeCursor::new(offset, s.len(), true);
    matches!(cursor.is_boundary(s, 0), Ok(true))
}

/// The nearest grapheme boundary at or before `offset`.
#[must_use]
pub fn floor_grapheme_boundary(s: &str, offset: usize) -> usize {
    let off = floor_scalar_boundary(s, offset);
    if is_grapheme_boundary(s, off) {
        return off;
    }
    let mut cursor = GraphemeCursor::new(off, s.len(), true);
    cursor.prev_boundary(s, 0).ok().flatten().unwrap_or(0)
}

/// The smallest grapheme boundary strictly after `offset`, if any.
#[must_use]
pub fn next_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    if offset >= s.len() {
        return None;
    }
    let off = floor_scalar_boundary(s, offset);
    let mut cursor = GraphemeCursor::new(off, s.len(), true);
    cursor.next_boundary(s, 0).ok().flatten()
}

/// The largest grapheme boundary strictly before `offset`, if any.
#[must_use]
pub fn prev_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    if offset == 0 {
        return None;
    }
    let floored = floor_grapheme_boundary(s, offset);
    if floored < offset {
        return Some(floored);
    }
    let mut cursor = GraphemeCursor::new(floored, s.len(), true);
    cursor.prev_boundary(s, 0).ok().flatten()
}

/// The byte range of the grapheme cluster containing `offset`.
///
/// `offset` must be below `s.len()`; it is rounded down to the cluster
/// start if it falls inside one.
#[must_use]
pub fn grapheme_range_at(s: &str, offset: usize) -> Range<usize> {
    let start = floor_grapheme_boundary(s, offset);
    let end = next_grapheme_boundary(s, start).unwrap_or(s.len());
    start..end
}
