//! The 16-bit code unit projection.

use crate::index::TextIndex;
use crate::view::projection::{EncodedView, Granularity, ViewCtx, floor_scalar, scalar_at};

/// Stepping rule for UTF-16 code units.
///
/// A BMP scalar contributes one unit at its scalar boundary. A
/// supplementary-plane scalar contributes two: the leading surrogate at the
/// scalar boundary and the trailing surrogate at the transcoded position
/// one unit in.
#[derive(Clone, Copy, Debug)]
pub struct Utf16Unit;

/// Whether the scalar at `offset` encodes as a surrogate pair.
fn is_supplementary(base: &str, offset: usize) -> bool {
    offset < base.len() && scalar_at(base, offset).len_utf16() == 2
}

impl Granularity for Utf16Unit {
    type Element<'a> = u16;

    const NAME: &'static str = "utf16";

    fn is_boundary(ctx: ViewCtx<'_>, idx: TextIndex) -> bool {
        let base = ctx.base;
        if !base.is_char_boundary(idx.byte_offset()) {
            return false;
        }
        match idx.transcoded_offset() {
            0 => true,
            1 => is_supplementary(base, idx.byte_offset()),
            _ => false,
        }
    }

    fn floor(ctx: ViewCtx<'_>, idx: TextIndex) -> TextIndex {
        let base = ctx.base;
        let scalar_start = floor_scalar(base, idx.byte_offset());
        if scalar_start < idx.byte_offset() {
            // Inside a multi-byte scalar: the trailing surrogate position
            // is the nearest boundary below when the scalar has one.
            if is_supplementary(base, scalar_start) {
                TextIndex::within_scalar(scalar_start, 1)
            } else {
                TextIndex::at(scalar_start)
            }
        } else if idx.transcoded_offset() >= 1 && is_supplementary(base, scalar_start) {
            TextIndex::within_scalar(scalar_start, 1)
        } else {
            TextIndex::at(scalar_start)
        }
    }

    fn next(ctx: ViewCtx<'_>, idx: TextIndex) -> TextIndex {
        let base = ctx.base;
        let floored = Self::floor(ctx, idx);
        let scalar_start = floored.byte_offset();
        if floored.transcoded_offset() == 1 {
            TextIndex::at(scalar_start + scalar_at(base, scalar_start).len_utf8())
        } else if is_supplementary(base, scalar_start) {
            TextIndex::within_scalar(scalar_start, 1)
        } else {
            TextIndex::at(scalar_start + scalar_at(base, scalar_start).len_utf8())
        }
    }

    fn prev(ctx: ViewCtx<'_>, idx: TextIndex) -> TextIndex {
        let base = ctx.base;
        let floored = Self::floor(ctx, idx);
        if floored < idx {
            return floored;
        }
        if floored.transcoded_offset() == 1 {
            return TextIndex::at(floored.byte_offset());
        }
        let prev_start = floor_scalar(base, floored.byte_offset() - 1);
        if is_supplementary(base, prev_start) {
            TextIndex::within_scalar(prev_start, 1)
        } else {
            TextIndex::at(prev_start)
        }
    }

    fn get<'a>(ctx: ViewCtx<'a>, idx: TextIndex) -> u16 {
        let floored = Self::floor(ctx, idx);
        let scalar = scalar_at(ctx.base, floored.byte_offset());
        let mut units = [0u16; 2];
        let encoded = scalar.encode_utf16(&mut units);
        encoded[usize::from(floored.transcoded_offset())]
    }

    fn count(ctx: ViewCtx<'_>) -> usize {
        if ctx.start.transcoded_offset() == 0 && ctx.end.transcoded_offset() == 0 {
            return ctx.window().encode_utf16().count();
        }
        // A bound sits inside a surrogate pair; walk.
        let mut cursor = ctx.start;
        let mut count = 0;
        while cursor < ctx.end {
            cursor = Self::next(ctx, cursor);
            count += 1;
        }
        count
    }
}

/// Projection of a storage range as UTF-16 code units.
pub type Utf16View = EncodedView<Utf16Unit>;
