//! The 8-bit code unit projection.

use std::ops::Range;

use crate::index::TextIndex;
use crate::storage::{EncodedStorage, SourceEncoding};
use crate::view::projection::{EncodedView, Granularity, ViewCtx};

/// Stepping rule for 8-bit code units: one element per storage byte.
///
/// Every byte offset is a boundary, including offsets inside a multi-byte
/// scalar; only transcoded (UTF-16 interior) positions are not.
#[derive(Clone, Copy, Debug)]
pub struct Utf8Unit;

impl Granularity for Utf8Unit {
    type Element<'a> = u8;

    const NAME: &'static str = "utf8";

    fn is_boundary(_ctx: ViewCtx<'_>, idx: TextIndex) -> bool {
        idx.transcoded_offset() == 0
    }

    fn floor(_ctx: ViewCtx<'_>, idx: TextIndex) -> TextIndex {
        TextIndex::at(idx.byte_offset())
    }

    fn next(_ctx: ViewCtx<'_>, idx: TextIndex) -> TextIndex {
        // A transcoded position (b, 1) sits between (b, 0) and (b + 1, 0),
        // so the next byte boundary is b + 1 either way.
        TextIndex::at(idx.byte_offset() + 1)
    }

    fn prev(_ctx: ViewCtx<'_>, idx: TextIndex) -> TextIndex {
        if idx.transcoded_offset() > 0 {
            TextIndex::at(idx.byte_offset())
        } else {
            TextIndex::at(idx.byte_offset() - 1)
        }
    }

    fn get<'a>(ctx: ViewCtx<'a>, idx: TextIndex) -> u8 {
        ctx.base.as_bytes()[idx.byte_offset()]
    }

    fn count(ctx: ViewCtx<'_>) -> usize {
        ctx.end.byte_offset() - ctx.start.byte_offset()
    }
}

/// Projection of a storage range as individual UTF-8 code units.
pub type Utf8View = EncodedView<Utf8Unit>;

impl EncodedView<Utf8Unit> {
    /// Borrow the viewed bytes without copying.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage.as_str().as_bytes()[self.start.byte_offset()..self.end.byte_offset()]
    }

    /// Replace a byte range of the view with new content.
    ///
    /// The replacement is decoded as UTF-8 with the usual repair policy, so
    /// the result is always well-formed. Both the view's own bounds and the
    /// replaced range must lie on scalar boundaries; violating that is a
    /// contract violation. The view rebinds to fresh storage covering only
    /// its (edited) range, leaving every other owner of the old storage
    /// untouched.
    pub fn replace_subrange(&mut self, range: Range<TextIndex>, replacement: &[u8]) {
        assert!(range.start <= range.end, "utf8 view: range is reversed");
        assert!(
            range.start >= self.start && range.end <= self.end,
            "utf8 view: range out of bounds"
        );
        let base = self.storage.as_str();
        for idx in [self.start, self.end, range.start, range.end] {
            assert!(
                idx.transcoded_offset() == 0 && base.is_char_boundary(idx.byte_offset()),
                "utf8 view: splice position is not a scalar boundary"
            );
        }
        let decoded = EncodedStorage::decode(replacement, SourceEncoding::Utf8);
        let mut edited = String::with_capacity(
            self.end.byte_offset() - self.start.byte_offset() + decoded.len(),
        );
        edited.push_str(&base[self.start.byte_offset()..range.start.byte_offset()]);
        edited.push_str(decoded.as_str());
        edited.push_str(&base[range.end.byte_offset()..self.end.byte_offset()]);
        let len = edited.len();
        self.storage = EncodedStorage::from_string(edited);
        self.start = TextIndex::at(0);
        self.end = TextIndex::at(len);
    }
}
