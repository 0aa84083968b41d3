//! Zero-copy slices of a text value.

use std::ffi::CStr;
use std::fmt;
use std::ops::Range;

use crate::error::{Error, Result};
use crate::index::TextIndex;
use crate::storage::EncodedStorage;
use crate::text::TextValue;
use crate::unicode;
use crate::view::{GraphemeView, ScalarView, Utf8View, Utf16View};

/// A slice of a [`TextValue`]'s content over an index range.
///
/// Construction and re-slicing are O(1) and never copy: the substring
/// holds a reference to the *entire* backing storage of the value it was
/// sliced from and keeps all of it alive, however narrow the slice. Only
/// [`to_text`](Self::to_text) (or [`TextValue::from_substring`]) releases
/// that hold, by copying exactly the viewed bytes into fresh storage.
///
/// The element type is the grapheme cluster; navigation steps one
/// user-perceived character at a time. Indices handed in from one of the
/// finer-grained views are floored to the enclosing cluster boundary.
#[derive(Clone)]
pub struct Substring {
    pub(crate) storage: EncodedStorage,
    pub(crate) start: TextIndex,
    pub(crate) end: TextIndex,
}

impl Substring {
    pub(crate) fn over(storage: EncodedStorage, start: TextIndex, end: TextIndex) -> Self {
        debug_assert!(start <= end);
        Self {
            storage,
            start,
            end,
        }
    }

    /// Position of the substring's first grapheme cluster.
    #[must_use]
    pub fn start_index(&self) -> TextIndex {
        self.start
    }

    /// Position one past the substring's last grapheme cluster.
    #[must_use]
    pub fn end_index(&self) -> TextIndex {
        self.end
    }

    /// The viewed content, borrowed without copying.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.storage
            .borrow_range(self.start.byte_offset()..self.end.byte_offset())
    }

    /// Length of the viewed range in UTF-8 bytes.
    #[must_use]
    pub fn len_bytes(&self) -> usize {
        self.end.byte_offset() - self.start.byte_offset()
    }

    /// Whether the substring covers an empty range.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// A narrower substring over `range`, O(1), sharing storage. The
    /// bounds must be scalar-aligned positions within this substring;
    /// violating that panics.
    #[must_use]
    pub fn slice(&self, range: Range<TextIndex>) -> Substring {
        match self.try_slice(range) {
            Ok(sub) => sub,
            Err(e) => panic!("substring: invalid slice range: {e}"),
        }
    }

    /// Non-panicking variant of [`slice`](Self::slice).
    pub fn try_slice(&self, range: Range<TextIndex>) -> Result<Substring> {
        if range.start > range.end || range.start < self.start || range.end > self.end {
            return Err(Error::OutOfBounds {
                offset: range.end.byte_offset(),
                len: self.len_bytes(),
            });
        }
        let base = self.storage.as_str();
        for idx in [range.start, range.end] {
            if idx.transcoded_offset() != 0 || !base.is_char_boundary(idx.byte_offset()) {
                return Err(Error::MisalignedBoundary {
                    offset: idx.byte_offset(),
                });
            }
        }
        Ok(Substring::over(self.storage.clone(), range.start, range.end))
    }

    /// The grapheme boundary after `idx`.
    #[must_use]
    pub fn index_after(&self, idx: TextIndex) -> TextIndex {
        self.grapheme_clusters().index_after(idx)
    }

    /// The grapheme boundary before `idx`.
    #[must_use]
    pub fn index_before(&self, idx: TextIndex) -> TextIndex {
        self.grapheme_clusters().index_before(idx)
    }

    /// The grapheme boundary `distance` steps from `idx`. Walking past
    /// either bound of the substring panics.
    #[must_use]
    pub fn index_offset_by(&self, idx: TextIndex, distance: isize) -> TextIndex {
        self.grapheme_clusters().index_offset_by(idx, distance)
    }

    /// Bounded stepping: `None` instead of a panic when the walk would
    /// pass `limit` or either bound of the substring.
    #[must_use]
    pub fn index_offset_by_limited(
        &self,
        idx: TextIndex,
        distance: isize,
        limit: TextIndex,
    ) -> Option<TextIndex> {
        self.grapheme_clusters()
            .index_offset_by_limited(idx, distance, limit)
    }

    /// Grapheme distance from `from` to `to`.
    #[must_use]
    pub fn distance(&self, from: TextIndex, to: TextIndex) -> isize {
        self.grapheme_clusters().distance(from, to)
    }

    /// The grapheme cluster containing `idx`, regardless of which view the
    /// index came from.
    #[must_use]
    pub fn grapheme_at(&self, idx: TextIndex) -> &str {
        assert!(
            idx >= self.start && idx < self.end,
            "substring: grapheme index out of bounds"
        );
        let window = self.as_str();
        let rel = idx.byte_offset() - self.start.byte_offset();
        &window[unicode::grapheme_range_at(window, rel)]
    }

    /// Number of grapheme clusters in the viewed range.
    #[must_use]
    pub fn grapheme_count(&self) -> usize {
        unicode::grapheme_count(self.as_str())
    }

    /// Iterate over the substring's grapheme clusters.
    pub fn graphemes(&self) -> impl Iterator<Item = &str> {
        unicode::graphemes(self.as_str())
    }

    /// Terminal display width of the viewed content.
    #[must_use]
    pub fn display_width(&self) -> usize {
        unicode::display_width(self.as_str())
    }

    /// Replace a range of the substring's own content.
    ///
    /// The substring materializes its content with the splice applied into
    /// fresh storage and rebinds to it, so the shared base storage is
    /// never mutated through a view; every other owner observes unchanged
    /// content. The bounds are recomputed to cover the new content.
    pub fn replace_subrange(&mut self, range: Range<TextIndex>, replacement: &str) {
        assert!(range.start <= range.end, "substring: range is reversed");
        assert!(
            range.start >= self.start && range.end <= self.end,
            "substring: range out of bounds"
        );
        let base = self.storage.as_str();
        for idx in [range.start, range.end] {
            assert!(
                idx.transcoded_offset() == 0 && base.is_char_boundary(idx.byte_offset()),
                "substring: splice position is not a scalar boundary"
            );
        }
        let mut edited = String::with_capacity(self.len_bytes() + replacement.len());
        edited.push_str(&base[self.start.byte_offset()..range.start.byte_offset()]);
        edited.push_str(replacement);
        edited.push_str(&base[range.end.byte_offset()..self.end.byte_offset()]);
        let len = edited.len();
        self.storage = EncodedStorage::from_string(edited);
        self.start = TextIndex::at(0);
        self.end = TextIndex::at(len);
    }

    /// Append content. Materializes a fresh owned copy of the viewed range
    /// first, so the original backing storage is never mutated through the
    /// substring.
    pub fn push_str(&mut self, content: &str) {
        self.replace_subrange(self.end..self.end, content);
    }

    /// Materialize into an owning [`TextValue`], O(n) in the viewed
    /// length. This is the only operation that releases the substring's
    /// hold on the full backing storage.
    #[must_use]
    pub fn to_text(&self) -> TextValue {
        TextValue::from_substring(self)
    }

    /// The 8-bit code unit projection of the viewed range, O(1).
    #[must_use]
    pub fn utf8(&self) -> Utf8View {
        Utf8View::over(self.storage.clone(), self.start, self.end)
    }

    /// The 16-bit code unit projection of the viewed range, O(1).
    #[must_use]
    pub fn utf16(&self) -> Utf16View {
        Utf16View::over(self.storage.clone(), self.start, self.end)
    }

    /// The Unicode scalar projection of the viewed range, O(1).
    #[must_use]
    pub fn scalars(&self) -> ScalarView {
        ScalarView::over(self.storage.clone(), self.start, self.end)
    }

    /// The grapheme cluster projection of the viewed range, O(1).
    #[must_use]
    pub fn grapheme_clusters(&self) -> GraphemeView {
        GraphemeView::over(self.storage.clone(), self.start, self.end)
    }

    /// Whether the viewed content starts with `prefix`.
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.as_str().starts_with(prefix)
    }

    /// Whether the viewed content ends with `suffix`.
    #[must_use]
    pub fn has_suffix(&self, suffix: &str) -> bool {
        self.as_str().ends_with(suffix)
    }

    /// A new owning value with the viewed content lowercased.
    #[must_use]
    pub fn lowercased(&self) -> TextValue {
        TextValue::from(self.as_str().to_lowercase())
    }

    /// A new owning value with the viewed content uppercased.
    #[must_use]
    pub fn uppercased(&self) -> TextValue {
        TextValue::from(self.as_str().to_uppercase())
    }

    /// Lend the viewed range as a temporary null-terminated buffer, valid
    /// only for the duration of the callback.
    pub fn with_c_str<R>(&self, f: impl FnOnce(&CStr) -> R) -> Result<R> {
        self.storage
            .with_c_str(self.start.byte_offset()..self.end.byte_offset(), f)
    }

    pub(crate) fn shares_storage_with(&self, text: &TextValue) -> bool {
        self.storage.ptr_eq(text.storage())
    }
}

impl fmt::Display for Substring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Substring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl PartialEq for Substring {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Substring {}

impl PartialEq<str> for Substring {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Substring {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<TextValue> for Substring {
    fn eq(&self, other: &TextValue) -> bool {
        self.as_str() == other.as_str()
    }
}

impl PartialEq<Substring> for TextValue {
    fn eq(&self, other: &Substring) -> bool {
        self.as_str() == other.as_str()
    }
}
