//! The grapheme cluster projection.

use crate::index::TextIndex;
use crate::unicode;
use crate::view::projection::{EncodedView, Granularity, ViewCtx};

/// Stepping rule for extended grapheme clusters.
///
/// Segmentation is computed over the view's own window, so a cluster split
/// by the window edge is seen as its visible fragment. Navigation always
/// lands on cluster boundaries; an index inside a cluster belongs to the
/// cluster that starts at or before it.
#[derive(Clone, Copy, Debug)]
pub struct GraphemeUnit;

/// Window-relative byte offset of `idx`, clamped to the window.
fn rel(ctx: ViewCtx<'_>, idx: TextIndex) -> usize {
    idx.byte_offset()
        .min(ctx.end.byte_offset())
        .saturating_sub(ctx.start.byte_offset())
}

fn abs(ctx: ViewCtx<'_>, rel_offset: usize) -> TextIndex {
    TextIndex::at(ctx.start.byte_offset() + rel_offset)
}

impl Granularity for GraphemeUnit {
    type Element<'a> = &'a str;

    const NAME: &'static str = "grapheme";

    fn is_boundary(ctx: ViewCtx<'_>, idx: TextIndex) -> bool {
        idx.transcoded_offset() == 0
            && unicode::is_grapheme_boundary(ctx.window(), rel(ctx, idx))
    }

    fn floor(ctx: ViewCtx<'_>, idx: TextIndex) -> TextIndex {
        abs(
            ctx,
            unicode::floor_grapheme_boundary(ctx.window(), rel(ctx, idx)),
        )
    }

    fn next(ctx: ViewCtx<'_>, idx: TextIndex) -> TextIndex {
        let window = ctx.window();
        match unicode::next_grapheme_boundary(window, rel(ctx, idx)) {
            Some(boundary) => abs(ctx, boundary),
            None => ctx.end,
        }
    }

    fn prev(ctx: ViewCtx<'_>, idx: TextIndex) -> TextIndex {
        let window = ctx.window();
        match unicode::prev_grapheme_boundary(window, rel(ctx, idx)) {
            Some(boundary) => abs(ctx, boundary),
            None => ctx.start,
        }
    }

    fn get<'a>(ctx: ViewCtx<'a>, idx: TextIndex) -> &'a str {
        let window = ctx.window();
        let range = unicode::grapheme_range_at(window, rel(ctx, idx));
        &window[range]
    }

    fn count(ctx: ViewCtx<'_>) -> usize {
        unicode::grapheme_count(ctx.window())
    }
}

/// Projection of a storage range as grapheme clusters.
pub type GraphemeView = EncodedView<GraphemeUnit>;

#[cfg(test)]
mod tests {
    use crate::TextValue;

    #[test]
    fn test_cluster_stepping() {
        let text = TextValue::from("e\u{0301}x👨‍👩‍👧");
        let view = text.grapheme_clusters();
        assert_eq!(view.len(), 3);
        let clusters: Vec<&str> = view.iter().collect();
        assert_eq!(clusters, vec!["e\u{0301}", "x", "👨‍👩‍👧"]);
    }

    #[test]
    fn test_navigation_lands_on_cluster_boundaries() {
        let text = TextValue::from("e\u{0301}x");
        let view = text.grapheme_clusters();
        let second = view.index_after(view.start_index());
        assert_eq!(second.byte_offset(), 3);
        assert_eq!(view.index_before(second), view.start_index());
    }

    #[test]
    fn test_mid_cluster_index_floors() {
        let text = TextValue::from("e\u{0301}x");
        let scalar_view = text.scalars();
        // The combining accent's own position, inside the first cluster.
        let mid = scalar_view.index_after(scalar_view.start_index());

        let view = text.grapheme_clusters();
        assert!(!view.is_boundary(mid));
        assert_eq!(view.get(mid), "e\u{0301}");
        assert_eq!(view.index_after(mid).byte_offset(), 3);
    }

    #[test]
    fn test_window_local_segmentation() {
        // Two regional indicators form one flag; a window over the second
        // half sees a lone indicator.
        let text = TextValue::from("🇺🇸");
        let full = text.grapheme_clusters();
        assert_eq!(full.len(), 1);

        let scalars = text.scalars();
        let half = scalars.index_after(scalars.start_index());
        let tail = text.as_substring().slice(half..text.end_index());
        assert_eq!(tail.grapheme_count(), 1);
        assert_eq!(tail.as_str(), "🇸");
    }
}
