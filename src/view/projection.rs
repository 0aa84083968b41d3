//! The generic encoding projection.
//!
//! All four encoding views are one type, [`EncodedView`], parameterized by
//! a [`Granularity`] that supplies the element type and the stepping rule.
//! The bounds discipline, slicing, iteration, and conversions are
//! implemented here exactly once.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Range;

use crate::index::TextIndex;
use crate::storage::EncodedStorage;
use crate::substring::Substring;
use crate::text::TextValue;

/// The window a stepping rule operates in: the full canonical buffer plus
/// the view's bounds. Grapheme segmentation is computed against the window,
/// not the whole buffer, so a cluster split by the window edge is seen as
/// its visible fragment.
#[derive(Clone, Copy)]
pub struct ViewCtx<'a> {
    pub(crate) base: &'a str,
    pub(crate) start: TextIndex,
    pub(crate) end: TextIndex,
}

impl<'a> ViewCtx<'a> {
    /// The window's content. Requires scalar-aligned bounds.
    pub(crate) fn window(&self) -> &'a str {
        &self.base[self.start.byte_offset()..self.end.byte_offset()]
    }
}

/// The scalar starting at `offset`, which must be a scalar boundary below
/// the end of `base`.
pub(crate) fn scalar_at(base: &str, offset: usize) -> char {
    debug_assert!(base.is_char_boundary(offset));
    base[offset..]
        .chars()
        .next()
        .expect("scalar position past end of storage")
}

/// Round `offset` down to the nearest scalar boundary of `base`.
pub(crate) fn floor_scalar(base: &str, offset: usize) -> usize {
    let mut off = offset.min(base.len());
    while !base.is_char_boundary(off) {
        off -= 1;
    }
    off
}

/// Stepping rule for one encoding projection.
///
/// `next` and `prev` are defined for *any* in-window index, boundary or
/// not: `next` returns the smallest boundary strictly above the input,
/// `prev` the largest boundary strictly below it. On boundary inputs this
/// is ordinary stepping; a misaligned input snaps to the nearest boundary
/// in the direction of travel, so navigation always lands on boundaries of
/// this granularity.
pub trait Granularity {
    /// Element produced by subscripting the view.
    type Element<'a>: PartialEq + fmt::Debug;

    /// Name used in panic messages.
    const NAME: &'static str;

    /// Whether `idx` is an element boundary inside `ctx`.
    fn is_boundary(ctx: ViewCtx<'_>, idx: TextIndex) -> bool;

    /// The nearest boundary at or before `idx`.
    fn floor(ctx: ViewCtx<'_>, idx: TextIndex) -> TextIndex;

    /// The smallest boundary strictly after `idx`.
    fn next(ctx: ViewCtx<'_>, idx: TextIndex) -> TextIndex;

    /// The largest boundary strictly before `idx`.
    fn prev(ctx: ViewCtx<'_>, idx: TextIndex) -> TextIndex;

    /// The element whose cluster contains `idx`.
    fn get<'a>(ctx: ViewCtx<'a>, idx: TextIndex) -> Self::Element<'a>;

    /// Number of elements between the window bounds.
    fn count(ctx: ViewCtx<'_>) -> usize {
        let mut cursor = ctx.start;
        let mut count = 0;
        while cursor < ctx.end {
            cursor = Self::next(ctx, cursor);
            count += 1;
        }
        count
    }
}

/// A bidirectional, index-addressable projection of a storage range through
/// one encoding granularity.
///
/// Construction and slicing are O(1) and share storage with the value or
/// view the projection came from; holding any view keeps the whole backing
/// buffer alive.
pub struct EncodedView<G: Granularity> {
    pub(crate) storage: EncodedStorage,
    pub(crate) start: TextIndex,
    pub(crate) end: TextIndex,
    marker: PhantomData<G>,
}

impl<G: Granularity> EncodedView<G> {
    pub(crate) fn over(storage: EncodedStorage, start: TextIndex, end: TextIndex) -> Self {
        debug_assert!(start <= end);
        Self {
            storage,
            start,
            end,
            marker: PhantomData,
        }
    }

    pub(crate) fn ctx(&self) -> ViewCtx<'_> {
        ViewCtx {
            base: self.storage.as_str(),
            start: self.start,
            end: self.end,
        }
    }

    /// Position of the first element.
    #[must_use]
    pub fn start_index(&self) -> TextIndex {
        self.start
    }

    /// Position one past the last element.
    #[must_use]
    pub fn end_index(&self) -> TextIndex {
        self.end
    }

    /// Number of elements in the view. O(1) for the UTF-8 view, O(n)
    /// otherwise.
    #[must_use]
    pub fn len(&self) -> usize {
        G::count(self.ctx())
    }

    /// Whether the view covers an empty range.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    fn contains(&self, idx: TextIndex) -> bool {
        self.start <= idx && idx <= self.end
    }

    /// Whether `idx` lies on an element boundary of this view.
    #[must_use]
    pub fn is_boundary(&self, idx: TextIndex) -> bool {
        self.contains(idx) && G::is_boundary(self.ctx(), idx)
    }

    /// The boundary after `idx`. Calling this at `end_index` is a contract
    /// violation and panics.
    #[must_use]
    pub fn index_after(&self, idx: TextIndex) -> TextIndex {
        assert!(
            idx >= self.start,
            "{} view: index below start_index",
            G::NAME
        );
        assert!(
            idx < self.end,
            "{} view: index_after at end of view",
            G::NAME
        );
        let next = G::next(self.ctx(), idx);
        debug_assert!(next <= self.end);
        next
    }

    /// The boundary before `idx`. Calling this at `start_index` is a
    /// contract violation and panics.
    #[must_use]
    pub fn index_before(&self, idx: TextIndex) -> TextIndex {
        assert!(idx <= self.end, "{} view: index above end_index", G::NAME);
        assert!(
            idx > self.start,
            "{} view: index_before at start of view",
            G::NAME
        );
        let prev = G::prev(self.ctx(), idx);
        debug_assert!(prev >= self.start);
        prev
    }

    /// The boundary `distance` steps from `idx` (negative steps walk
    /// backward). Walking past either bound panics.
    #[must_use]
    pub fn index_offset_by(&self, idx: TextIndex, distance: isize) -> TextIndex {
        assert!(self.contains(idx), "{} view: index out of bounds", G::NAME);
        let mut cursor = G::floor(self.ctx(), idx);
        if distance >= 0 {
            for _ in 0..distance.unsigned_abs() {
                cursor = self.index_after(cursor);
            }
        } else {
            for _ in 0..distance.unsigned_abs() {
                cursor = self.index_before(cursor);
            }
        }
        cursor
    }

    /// Like [`index_offset_by`](Self::index_offset_by), but returns `None`
    /// instead of panicking when the walk would pass `limit` or either
    /// bound of the view.
    #[must_use]
    pub fn index_offset_by_limited(
        &self,
        idx: TextIndex,
        distance: isize,
        limit: TextIndex,
    ) -> Option<TextIndex> {
        assert!(self.contains(idx), "{} view: index out of bounds", G::NAME);
        assert!(self.contains(limit), "{} view: limit out of bounds", G::NAME);
        let ctx = self.ctx();
        let blocked = G::floor(ctx, limit);
        let mut cursor = G::floor(ctx, idx);
        if distance >= 0 {
            for _ in 0..distance.unsigned_abs() {
                if cursor == blocked || cursor >= self.end {
                    return None;
                }
                cursor = G::next(ctx, cursor);
            }
        } else {
            for _ in 0..distance.unsigned_abs() {
                if cursor == blocked || cursor <= self.start {
                    return None;
                }
                cursor = G::prev(ctx, cursor);
            }
        }
        Some(cursor)
    }

    /// Number of elements from `from` to `to`; negative when `to` precedes
    /// `from`.
    #[must_use]
    pub fn distance(&self, from: TextIndex, to: TextIndex) -> isize {
        assert!(self.contains(from), "{} view: index out of bounds", G::NAME);
        assert!(self.contains(to), "{} view: index out of bounds", G::NAME);
        let ctx = self.ctx();
        let mut a = G::floor(ctx, from);
        let b = G::floor(ctx, to);
        let mut count: isize = 0;
        if a <= b {
            while a < b {
                a = G::next(ctx, a);
                count += 1;
            }
        } else {
            while a > b {
                a = G::prev(ctx, a);
                count -= 1;
            }
        }
        count
    }

    /// The element at `idx`. A misaligned index reads the element whose
    /// cluster contains it.
    #[must_use]
    pub fn get(&self, idx: TextIndex) -> G::Element<'_> {
        assert!(
            idx >= self.start && idx < self.end,
            "{} view: element index out of bounds",
            G::NAME
        );
        G::get(self.ctx(), idx)
    }

    /// A narrower view of the same granularity over `range`, O(1). The
    /// bounds must lie on element boundaries inside this view.
    #[must_use]
    pub fn slice(&self, range: Range<TextIndex>) -> Self {
        assert!(
            range.start <= range.end,
            "{} view: slice range is reversed",
            G::NAME
        );
        assert!(
            range.start >= self.start && range.end <= self.end,
            "{} view: slice range out of bounds",
            G::NAME
        );
        let ctx = self.ctx();
        assert!(
            G::is_boundary(ctx, range.start) && G::is_boundary(ctx, range.end),
            "{} view: slice bounds must lie on element boundaries",
            G::NAME
        );
        Self::over(self.storage.clone(), range.start, range.end)
    }

    /// Iterate over the view's elements.
    pub fn iter(&self) -> Iter<'_, G> {
        Iter {
            ctx: self.ctx(),
            cursor: self.start,
            marker: PhantomData,
        }
    }

    /// Materialize the viewed range into an owning [`TextValue`], O(n).
    ///
    /// Returns `None` when either bound does not lie on a scalar boundary
    /// of the canonical encoding (a UTF-16 view sliced inside a surrogate
    /// pair, a UTF-8 view sliced inside a multi-byte scalar); corrupt text
    /// is never produced.
    #[must_use]
    pub fn try_to_text(&self) -> Option<TextValue> {
        if !self.scalar_aligned() {
            return None;
        }
        Some(TextValue::from_storage(self.storage.extract_owned(
            self.start.byte_offset()..self.end.byte_offset(),
        )))
    }

    /// Rebind the viewed range as a [`Substring`], O(1), sharing storage.
    /// Bounds that do not lie on scalar boundaries are a contract
    /// violation.
    #[must_use]
    pub fn to_substring(&self) -> Substring {
        assert!(
            self.scalar_aligned(),
            "{} view: bounds are not scalar-aligned",
            G::NAME
        );
        Substring::over(self.storage.clone(), self.start, self.end)
    }

    fn scalar_aligned(&self) -> bool {
        let base = self.storage.as_str();
        self.start.transcoded_offset() == 0
            && self.end.transcoded_offset() == 0
            && base.is_char_boundary(self.start.byte_offset())
            && base.is_char_boundary(self.end.byte_offset())
    }
}

impl<G: Granularity> Clone for EncodedView<G> {
    fn clone(&self) -> Self {
        Self::over(self.storage.clone(), self.start, self.end)
    }
}

impl<G: Granularity> fmt::Debug for EncodedView<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}..{}]",
            G::NAME,
            self.start.byte_offset(),
            self.end.byte_offset()
        )
    }
}

impl<G: Granularity> PartialEq for EncodedView<G> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

/// Forward iterator over a view's elements.
pub struct Iter<'a, G: Granularity> {
    ctx: ViewCtx<'a>,
    cursor: TextIndex,
    marker: PhantomData<G>,
}

impl<'a, G: Granularity> Iterator for Iter<'a, G> {
    type Item = G::Element<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.ctx.end {
            return None;
        }
        let element = G::get(self.ctx, self.cursor);
        self.cursor = G::next(self.ctx, self.cursor);
        Some(element)
    }
}

impl<'a, G: Granularity> IntoIterator for &'a EncodedView<G> {
    type Item = G::Element<'a>;
    type IntoIter = Iter<'a, G>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
