//! The owning text value type.

use std::ffi::CStr;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

use crate::error::Result;
use crate::index::TextIndex;
use crate::storage::{EncodedStorage, SourceEncoding};
use crate::substring::Substring;
use crate::unicode;
use crate::view::{GraphemeView, ScalarView, Utf8View, Utf16View};

/// An owning text value.
///
/// A `TextValue` always represents the entire content of the storage it
/// references. Storage is shared on clone and copied on first mutation, so
/// clones are O(1) and mutating one never changes what another observes.
///
/// Construction paths all produce well-formed content: literals are
/// validated by the compiler, and [`decode`](Self::decode) repairs
/// malformed input rather than rejecting it.
///
/// ```
/// use polytext::TextValue;
///
/// let text = TextValue::from("Hi there! It's nice to meet you! 👋");
/// let s = text.as_substring();
/// let mut bang = s.start_index();
/// while s.grapheme_at(bang) != "!" {
///     bang = s.index_after(bang);
/// }
/// let greeting = s.slice(s.start_index()..s.index_after(bang));
/// assert_eq!(greeting.grapheme_count(), 9);
/// assert_eq!(greeting.utf8().len(), 9);
/// ```
#[derive(Clone, Default)]
pub struct TextValue {
    storage: EncodedStorage,
}

impl TextValue {
    /// An empty text value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct from validated literal content. Never fails: `&str` is
    /// well-formed by construction.
    #[must_use]
    pub fn from_literal(content: &str) -> Self {
        Self {
            storage: EncodedStorage::from_string(content.to_owned()),
        }
    }

    /// Decode arbitrary bytes in a declared encoding. Malformed sequences
    /// are replaced with U+FFFD; this never fails.
    #[must_use]
    pub fn decode(bytes: &[u8], encoding: SourceEncoding) -> Self {
        Self {
            storage: EncodedStorage::decode(bytes, encoding),
        }
    }

    /// Construct from a null-terminated buffer in a declared encoding.
    #[must_use]
    pub fn from_c_str(content: &CStr, encoding: SourceEncoding) -> Self {
        Self::decode(content.to_bytes(), encoding)
    }

    /// Materialize a substring into an owning value, O(n). The result
    /// retains no reference to the substring's backing storage.
    #[must_use]
    pub fn from_substring(view: &Substring) -> Self {
        Self {
            storage: view
                .storage
                .extract_owned(view.start.byte_offset()..view.end.byte_offset()),
        }
    }

    pub(crate) fn from_storage(storage: EncodedStorage) -> Self {
        Self { storage }
    }

    /// The content as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.storage.as_str()
    }

    /// Length in UTF-8 bytes.
    #[must_use]
    pub fn len_bytes(&self) -> usize {
        self.storage.len()
    }

    /// Whether the value holds no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.len() == 0
    }

    /// Position of the first grapheme cluster.
    #[must_use]
    pub fn start_index(&self) -> TextIndex {
        TextIndex::at(0)
    }

    /// Position one past the last grapheme cluster.
    #[must_use]
    pub fn end_index(&self) -> TextIndex {
        TextIndex::at(self.storage.len())
    }

    /// A substring over the whole value, O(1), sharing storage.
    #[must_use]
    pub fn as_substring(&self) -> Substring {
        Substring::over(self.storage.clone(), self.start_index(), self.end_index())
    }

    /// A substring over `range`, O(1), sharing storage. The bounds must be
    /// valid scalar-aligned positions; violating that panics.
    #[must_use]
    pub fn slice(&self, range: Range<TextIndex>) -> Substring {
        self.as_substring().slice(range)
    }

    /// Non-panicking variant of [`slice`](Self::slice).
    pub fn try_slice(&self, range: Range<TextIndex>) -> Result<Substring> {
        self.as_substring().try_slice(range)
    }

    /// The 8-bit code unit projection, O(1).
    #[must_use]
    pub fn utf8(&self) -> Utf8View {
        Utf8View::over(self.storage.clone(), self.start_index(), self.end_index())
    }

    /// The 16-bit code unit projection, O(1).
    #[must_use]
    pub fn utf16(&self) -> Utf16View {
        Utf16View::over(self.storage.clone(), self.start_index(), self.end_index())
    }

    /// The Unicode scalar projection, O(1).
    #[must_use]
    pub fn scalars(&self) -> ScalarView {
        ScalarView::over(self.storage.clone(), self.start_index(), self.end_index())
    }

    /// The grapheme cluster projection, O(1).
    #[must_use]
    pub fn grapheme_clusters(&self) -> GraphemeView {
        GraphemeView::over(self.storage.clone(), self.start_index(), self.end_index())
    }

    /// Replace `range` with new content, in place. If the storage is
    /// shared with another owner it is copied first; other owners are
    /// never affected. The bounds must lie on scalar boundaries.
    pub fn replace_subrange(&mut self, range: Range<TextIndex>, replacement: &str) {
        assert!(range.start <= range.end, "text: range is reversed");
        let len = self.storage.len();
        for idx in [range.start, range.end] {
            assert!(idx.byte_offset() <= len, "text: splice position out of bounds");
            assert!(
                idx.transcoded_offset() == 0 && self.as_str().is_char_boundary(idx.byte_offset()),
                "text: splice position is not a scalar boundary"
            );
        }
        self.storage
            .make_mut()
            .replace_range(range.start.byte_offset()..range.end.byte_offset(), replacement);
    }

    /// Append a string, copying storage first if it is shared.
    pub fn push_str(&mut self, content: &str) {
        self.storage.make_mut().push_str(content);
    }

    /// Append another text value.
    pub fn append(&mut self, other: &TextValue) {
        self.push_str(other.as_str());
    }

    /// Reset to empty without touching other owners of the storage.
    pub fn clear(&mut self) {
        self.storage = EncodedStorage::new();
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

    /// The grapheme boundary `distance` steps from `idx`.
    #[must_use]
    pub fn index_offset_by(&self, idx: TextIndex, distance: isize) -> TextIndex {
        self.grapheme_clusters().index_offset_by(idx, distance)
    }

    /// Bounded stepping: `None` instead of a panic when the walk would
    /// pass `limit` or either end of the value.
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

    /// The grapheme cluster containing `idx`.
    #[must_use]
    pub fn grapheme_at(&self, idx: TextIndex) -> &str {
        let s = self.as_str();
        assert!(
            idx.byte_offset() < s.len(),
            "text: grapheme index out of bounds"
        );
        &s[unicode::grapheme_range_at(s, idx.byte_offset())]
    }

    /// Number of grapheme clusters.
    #[must_use]
    pub fn grapheme_count(&self) -> usize {
        unicode::grapheme_count(self.as_str())
    }

    /// Iterate over grapheme clusters.
    pub fn graphemes(&self) -> impl Iterator<Item = &str> {
        unicode::graphemes(self.as_str())
    }

    /// Terminal display width of the content.
    #[must_use]
    pub fn display_width(&self) -> usize {
        unicode::display_width(self.as_str())
    }

    /// A new value with all content lowercased.
    #[must_use]
    pub fn lowercased(&self) -> TextValue {
        TextValue::from(self.as_str().to_lowercase())
    }

    /// A new value with all content uppercased.
    #[must_use]
    pub fn uppercased(&self) -> TextValue {
        TextValue::from(self.as_str().to_uppercase())
    }

    /// Whether the content starts with `prefix`.
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.as_str().starts_with(prefix)
    }

    /// Whether the content ends with `suffix`.
    #[must_use]
    pub fn has_suffix(&self, suffix: &str) -> bool {
        self.as_str().ends_with(suffix)
    }

    /// A new owning value keeping only the grapheme clusters that satisfy
    /// the predicate.
    #[must_use]
    pub fn filter_graphemes(&self, mut predicate: impl FnMut(&str) -> bool) -> TextValue {
        let mut kept = String::with_capacity(self.len_bytes());
        for cluster in self.graphemes() {
            if predicate(cluster) {
                kept.push_str(cluster);
            }
        }
        TextValue::from(kept)
    }

    /// Lend the content as a temporary null-terminated buffer, valid only
    /// for the duration of the callback. Fails if the content contains an
    /// interior NUL.
    pub fn with_c_str<R>(&self, f: impl FnOnce(&CStr) -> R) -> Result<R> {
        self.storage.with_c_str(0..self.storage.len(), f)
    }

    pub(crate) fn storage(&self) -> &EncodedStorage {
        &self.storage
    }
}

impl From<&str> for TextValue {
    fn from(content: &str) -> Self {
        Self::from_literal(content)
    }
}

impl From<String> for TextValue {
    fn from(content: String) -> Self {
        Self {
            storage: EncodedStorage::from_string(content),
        }
    }
}

impl FromIterator<char> for TextValue {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<String>())
    }
}

impl fmt::Display for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl PartialEq for TextValue {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for TextValue {}

impl PartialEq<str> for TextValue {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for TextValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialOrd for TextValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TextValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Hash for TextValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}
