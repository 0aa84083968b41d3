//! Property-based tests for the value/substring/view invariants.
//!
//! Uses proptest to verify invariants that must hold across all valid
//! inputs.

use polytext::{SourceEncoding, TextValue};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Generate arbitrary UTF-8 strings (proptest default).
fn utf8_string() -> impl Strategy<Value = String> {
    "\\PC{0,64}"
}

/// Generate ASCII-only strings.
fn ascii_string() -> impl Strategy<Value = String> {
    "[\\x20-\\x7E]{0,64}"
}

/// Generate strings with emoji, combining marks, and CJK content.
fn tricky_string() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "😀", "👍", "❤️", "🇺🇸", "👨‍👩‍👧‍👦", "é", "e\u{301}", "中", "한", "a", " ",
        ]),
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

/// Generate arbitrary byte buffers.
fn raw_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..64)
}

// ============================================================================
// View agreement
// ============================================================================

proptest! {
    /// Each projection reports the same element count as the std sequence
    /// it mirrors.
    #[test]
    fn view_lengths_agree_with_std(s in utf8_string()) {
        let text = TextValue::from(s.as_str());
        prop_assert_eq!(text.utf8().len(), s.len());
        prop_assert_eq!(text.utf16().len(), s.encode_utf16().count());
        prop_assert_eq!(text.scalars().len(), s.chars().count());
    }

    /// Converting any full-range projection back to text reproduces the
    /// original content.
    #[test]
    fn full_range_projections_round_trip(s in tricky_string()) {
        let text = TextValue::from(s.as_str());
        let utf8 = text.utf8().try_to_text();
        let utf16 = text.utf16().try_to_text();
        let scalars = text.scalars().try_to_text();
        let graphemes = text.grapheme_clusters().try_to_text();
        for converted in [utf8, utf16, scalars, graphemes] {
            let converted = converted.expect("full-range bounds are aligned");
            prop_assert_eq!(converted.as_str(), s.as_str());
        }
    }

    /// Forward iteration over each view visits exactly the std sequence.
    #[test]
    fn view_iteration_matches_std(s in tricky_string()) {
        let text = TextValue::from(s.as_str());
        prop_assert_eq!(text.utf8().iter().collect::<Vec<_>>(), s.as_bytes());
        prop_assert_eq!(
            text.utf16().iter().collect::<Vec<_>>(),
            s.encode_utf16().collect::<Vec<_>>()
        );
        prop_assert_eq!(
            text.scalars().iter().collect::<Vec<_>>(),
            s.chars().collect::<Vec<_>>()
        );
        let grapheme_view = text.grapheme_clusters();
        let expected: Vec<&str> = polytext::unicode::graphemes(&s).collect();
        prop_assert_eq!(grapheme_view.iter().collect::<Vec<_>>(), expected);
    }
}

// ============================================================================
// Navigation
// ============================================================================

proptest! {
    /// Walking from start by the element count lands exactly on the end
    /// index, for every granularity.
    #[test]
    fn offset_by_len_reaches_end(s in tricky_string()) {
        let text = TextValue::from(s.as_str());

        let utf8 = text.utf8();
        prop_assert_eq!(utf8.index_offset_by(utf8.start_index(), utf8.len() as isize), utf8.end_index());
        let utf16 = text.utf16();
        prop_assert_eq!(utf16.index_offset_by(utf16.start_index(), utf16.len() as isize), utf16.end_index());
        let scalars = text.scalars();
        prop_assert_eq!(scalars.index_offset_by(scalars.start_index(), scalars.len() as isize), scalars.end_index());
        let graphemes = text.grapheme_clusters();
        prop_assert_eq!(graphemes.index_offset_by(graphemes.start_index(), graphemes.len() as isize), graphemes.end_index());
    }

    /// distance() is the inverse of index_offset_by().
    #[test]
    fn distance_inverts_offset(s in tricky_string(), steps in 0usize..16) {
        let text = TextValue::from(s.as_str());
        let view = text.scalars();
        let steps = steps.min(view.len()) as isize;
        let idx = view.index_offset_by(view.start_index(), steps);
        prop_assert_eq!(view.distance(view.start_index(), idx), steps);
        prop_assert_eq!(view.distance(idx, view.start_index()), -steps);
    }

    /// Backward walking retraces forward walking exactly.
    #[test]
    fn backward_walk_retraces_forward_walk(s in tricky_string()) {
        let text = TextValue::from(s.as_str());
        let view = text.grapheme_clusters();

        let mut forward = vec![view.start_index()];
        let mut idx = view.start_index();
        while idx < view.end_index() {
            idx = view.index_after(idx);
            forward.push(idx);
        }

        let mut backward = vec![view.end_index()];
        let mut idx = view.end_index();
        while idx > view.start_index() {
            idx = view.index_before(idx);
            backward.push(idx);
        }
        backward.reverse();
        prop_assert_eq!(forward, backward);
    }

    /// Bounded stepping never exceeds the limit and agrees with the
    /// panicking variant when it succeeds.
    #[test]
    fn limited_stepping_respects_limit(s in tricky_string(), steps in 0isize..20) {
        let text = TextValue::from(s.as_str());
        let view = text.grapheme_clusters();
        match view.index_offset_by_limited(view.start_index(), steps, view.end_index()) {
            Some(idx) => {
                prop_assert!(idx <= view.end_index());
                prop_assert_eq!(idx, view.index_offset_by(view.start_index(), steps));
            }
            None => prop_assert!(steps > view.len() as isize),
        }
    }
}

// ============================================================================
// Slicing and materialization
// ============================================================================

proptest! {
    /// A substring sliced at grapheme boundaries equals the concatenation
    /// of the clusters it covers, and materializes to the same content.
    #[test]
    fn slice_and_materialize_round_trip(s in tricky_string(), a in 0usize..24, b in 0usize..24) {
        let text = TextValue::from(s.as_str());
        let count = text.grapheme_count();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo = lo.min(count);
        let hi = hi.min(count);

        let from = text.index_offset_by(text.start_index(), lo as isize);
        let to = text.index_offset_by(text.start_index(), hi as isize);
        let sub = text.slice(from..to);

        let expected: String = polytext::unicode::graphemes(&s)
            .skip(lo)
            .take(hi - lo)
            .collect();
        prop_assert_eq!(sub.as_str(), expected.as_str());

        let owned = sub.to_text();
        prop_assert_eq!(owned.as_str(), sub.as_str());
    }

    /// Copy-on-write: edits to a clone never leak into the original.
    #[test]
    fn cow_isolation(s in tricky_string(), cut in 0usize..24) {
        let original = TextValue::from(s.as_str());
        let mut edited = original.clone();
        let cut = cut.min(edited.grapheme_count());
        let at = edited.index_offset_by(edited.start_index(), cut as isize);
        edited.replace_subrange(at..edited.end_index(), "<edited>");
        prop_assert_eq!(original.as_str(), s.as_str());
        prop_assert!(edited.has_suffix("<edited>"));
    }
}

// ============================================================================
// Decoding
// ============================================================================

proptest! {
    /// Decoding arbitrary bytes as UTF-8 matches the std lossy conversion
    /// and never panics.
    #[test]
    fn decode_utf8_matches_lossy(bytes in raw_bytes()) {
        let text = TextValue::decode(&bytes, SourceEncoding::Utf8);
        let lossy = String::from_utf8_lossy(&bytes);
        prop_assert_eq!(text.as_str(), lossy.as_ref());
    }

    /// Decoding arbitrary bytes never panics in any declared encoding,
    /// and always produces well-formed content.
    #[test]
    fn decode_is_total(bytes in raw_bytes()) {
        for encoding in [
            SourceEncoding::Utf8,
            SourceEncoding::Utf16Le,
            SourceEncoding::Utf16Be,
            SourceEncoding::Ascii,
            SourceEncoding::Latin1,
        ] {
            let text = TextValue::decode(&bytes, encoding);
            // Round-tripping the decoded content through UTF-8 is lossless.
            let again = TextValue::decode(text.as_str().as_bytes(), SourceEncoding::Utf8);
            prop_assert_eq!(again.as_str(), text.as_str());
        }
    }

    /// ASCII content decodes identically in every ASCII-compatible
    /// encoding.
    #[test]
    fn ascii_decodes_identically(s in ascii_string()) {
        let utf8 = TextValue::decode(s.as_bytes(), SourceEncoding::Utf8);
        let ascii = TextValue::decode(s.as_bytes(), SourceEncoding::Ascii);
        let latin1 = TextValue::decode(s.as_bytes(), SourceEncoding::Latin1);
        prop_assert_eq!(&utf8, &ascii);
        prop_assert_eq!(&ascii, &latin1);
    }
}
