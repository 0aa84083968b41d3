//! Fuzz target for view navigation.
//!
//! Stepping through every projection of arbitrary (repaired) content must
//! never panic, never escape the view bounds, and must agree between the
//! forward and backward directions.

#![no_main]

use libfuzzer_sys::fuzz_target;
use polytext::{SourceEncoding, TextValue};

fuzz_target!(|data: &[u8]| {
    let text = TextValue::decode(data, SourceEncoding::Utf8);

    macro_rules! walk {
        ($view:expr) => {{
            let view = $view;
            let mut count = 0usize;
            let mut idx = view.start_index();
            while idx < view.end_index() {
                let next = view.index_after(idx);
                assert!(next > idx && next <= view.end_index());
                assert_eq!(view.index_before(next), idx);
                idx = next;
                count += 1;
            }
            assert_eq!(count, view.len());
            assert_eq!(
                view.index_offset_by(view.start_index(), count as isize),
                view.end_index()
            );
            assert_eq!(
                view.index_offset_by_limited(view.start_index(), count as isize + 1, view.end_index()),
                None
            );
        }};
    }

    walk!(text.utf8());
    walk!(text.utf16());
    walk!(text.scalars());
    walk!(text.grapheme_clusters());
});
