//! Fuzz target for decode repair.
//!
//! Decoding arbitrary bytes must never panic in any declared encoding and
//! must always produce well-formed content.

#![no_main]

use libfuzzer_sys::fuzz_target;
use polytext::{SourceEncoding, TextValue};

fuzz_target!(|data: &[u8]| {
    for encoding in [
        SourceEncoding::Utf8,
        SourceEncoding::Utf16Le,
        SourceEncoding::Utf16Be,
        SourceEncoding::Ascii,
        SourceEncoding::Latin1,
    ] {
        let text = TextValue::decode(data, encoding);

        // The repaired content must survive a strict UTF-8 round trip.
        let bytes = text.as_str().as_bytes().to_vec();
        let again = TextValue::decode(&bytes, SourceEncoding::Utf8);
        assert_eq!(again.as_str(), text.as_str());

        // Whole-value projections must agree on the repaired content.
        assert_eq!(text.utf8().len(), text.as_str().len());
        assert_eq!(text.scalars().len(), text.as_str().chars().count());
        assert_eq!(text.utf16().len(), text.as_str().encode_utf16().count());
    }
});
