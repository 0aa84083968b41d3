//! The Unicode scalar projection.

use std::ops::Range;

use crate::index::TextIndex;
use crate::storage::EncodedStorage;
use crate::view::projection::{EncodedView, Granularity, ViewCtx, floor_scalar, scalar_at};

/// Stepping rule for Unicode scalar values: one element per code point.
#[derive(Clone, Copy, Debug)]
pub struct ScalarUnit;

impl Granularity for ScalarUnit {
    type Element<'a> = char;

    const NAME: &'static str = "scalar";

    fn is_boundary(ctx: ViewCtx<'_>, idx: TextIndex) -> bool {
        idx.transcoded_offset() == 0 && ctx.base.is_char_boundary(idx.byte_offset())
    }

    fn floor(ctx: ViewCtx<'_>, idx: TextIndex) -> TextIndex {
        TextIndex::at(floor_scalar(ctx.base, idx.byte_offset()))
    }

    fn next(ctx: ViewCtx<'_>, idx: TextIndex) -> TextIndex {
        let scalar_start = floor_scalar(ctx.base, idx.byte_offset());
        TextIndex::at(scalar_start + scalar_at(ctx.base, scalar_start).len_utf8())
    }

    fn prev(ctx: ViewCtx<'_>, idx: TextIndex) -> TextIndex {
        let floored = Self::floor(ctx, idx);
        if floored < idx {
            return floored;
        }
        TextIndex::at(floor_scalar(ctx.base, floored.byte_offset() - 1))
    }

    fn get<'a>(ctx: ViewCtx<'a>, idx: TextIndex) -> char {
        scalar_at(ctx.base, floor_scalar(ctx.base, idx.byte_offset()))
    }

    fn count(ctx: ViewCtx<'_>) -> usize {
        ctx.window().chars().count()
    }
}

/// Projection of a storage range as Unicode scalar values.
pub type ScalarView = EncodedView<ScalarUnit>;

impl EncodedView<ScalarUnit> {
    /// Replace a scalar range of the view with a sequence of scalars.
    ///
    /// The range bounds must lie on scalar boundaries inside the view. The
    /// view rebinds to fresh storage covering only its (edited) range;
    /// other owners of the old storage are untouched.
    pub fn replace_subrange(
        &mut self,
        range: Range<TextIndex>,
        replacement: impl IntoIterator<Item = char>,
    ) {
        assert!(range.start <= range.end, "scalar view: range is reversed");
        assert!(
            range.start >= self.start && range.end <= self.end,
            "scalar view: range out of bounds"
        );
        let base = self.storage.as_str();
        for idx in [range.start, range.end] {
            assert!(
                idx.transcoded_offset() == 0 && base.is_char_boundary(idx.byte_offset()),
                "scalar view: splice position is not a scalar boundary"
            );
        }
        let mut edited =
            String::with_capacity(self.end.byte_offset() - self.start.byte_offset());
        edited.push_str(&base[self.start.byte_offset()..range.start.byte_offset()]);
        edited.extend(replacement);
        edited.push_str(&base[range.end.byte_offset()..self.end.byte_offset()]);
        let len = edited.len();
        self.storage = EncodedStorage::from_string(edited);
        self.start = TextIndex::at(0);
        self.end = TextIndex::at(len);
    }
}

#[cfg(test)]
mod tests {
    use crate::TextValue;

    #[test]
    fn test_scalar_stepping() {
        let text = TextValue::from("a👋é");
        let view = text.scalars();
        assert_eq!(view.len(), 3);
        let scalars: Vec<char> = view.iter().collect();
        assert_eq!(scalars, vec!['a', '👋', 'é']);
    }

    #[test]
    fn test_combining_marks_are_separate_scalars() {
        let text = TextValue::from("e\u{0301}");
        let view = text.scalars();
        assert_eq!(view.len(), 2);
        assert_eq!(view.get(view.start_index()), 'e');
    }

    #[test]
    fn test_misaligned_index_floors_to_scalar_start() {
        let text = TextValue::from("👋");
        let byte_view = text.utf8();
        let mid = byte_view.index_after(byte_view.start_index());

        let view = text.scalars();
        assert_eq!(view.get(mid), '👋');
        assert_eq!(view.index_after(mid), view.end_index());
    }

    #[test]
    fn test_replace_subrange() {
        let text = TextValue::from("aXc");
        let mut view = text.scalars();
        let from = view.index_after(view.start_index());
        let to = view.index_after(from);
        view.replace_subrange(from..to, ['👋', 'b']);
        assert_eq!(view.try_to_text().expect("aligned").as_str(), "a👋bc");
        assert_eq!(text.as_str(), "aXc");
    }
}
