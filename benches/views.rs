//! Value, substring, and view performance benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{Criterion, criterion_group, criterion_main};
use polytext::{SourceEncoding, TextValue};
use std::hint::black_box;

fn construction(c: &mut Criterion) {
    c.bench_function("textvalue_from_short", |b| {
        b.iter(|| TextValue::from(black_box("Hello, World!")));
    });

    let long_text = "x".repeat(10_000);
    c.bench_function("textvalue_from_10k", |b| {
        b.iter(|| TextValue::from(black_box(long_text.as_str())));
    });

    c.bench_function("textvalue_clone_10k", |b| {
        let text = TextValue::from(long_text.as_str());
        b.iter(|| black_box(&text).clone());
    });
}

fn slicing(c: &mut Criterion) {
    let long_text = TextValue::from("abcdefgh".repeat(1_250));
    let from = long_text.index_offset_by(long_text.start_index(), 100);
    let to = long_text.index_offset_by(from, 200);

    // Slicing shares storage; this should not scale with input size.
    c.bench_function("substring_slice_10k", |b| {
        b.iter(|| black_box(&long_text).slice(black_box(from..to)));
    });

    let sub = long_text.slice(from..to);
    c.bench_function("substring_materialize_200", |b| {
        b.iter(|| black_box(&sub).to_text());
    });

    c.bench_function("view_projection", |b| {
        b.iter(|| black_box(&sub).utf16());
    });
}

fn iteration(c: &mut Criterion) {
    let mixed = TextValue::from("Hi there! 👋 日本語 e\u{301} 🇺🇸 ".repeat(50));

    c.bench_function("utf8_iterate", |b| {
        b.iter(|| black_box(&mixed).utf8().iter().count());
    });

    c.bench_function("utf16_iterate", |b| {
        b.iter(|| black_box(&mixed).utf16().iter().count());
    });

    c.bench_function("scalar_iterate", |b| {
        b.iter(|| black_box(&mixed).scalars().iter().count());
    });

    c.bench_function("grapheme_iterate", |b| {
        b.iter(|| black_box(&mixed).grapheme_clusters().iter().count());
    });

    c.bench_function("grapheme_count", |b| {
        b.iter(|| black_box(&mixed).grapheme_count());
    });
}

fn stepping(c: &mut Criterion) {
    let mixed = TextValue::from("Hi there! 👋 日本語 ".repeat(20));
    let view = mixed.grapheme_clusters();

    c.bench_function("grapheme_walk_forward", |b| {
        b.iter(|| {
            let mut idx = view.start_index();
            while idx < view.end_index() {
                idx = view.index_after(idx);
            }
            idx
        });
    });

    c.bench_function("utf16_distance_full", |b| {
        let utf16 = mixed.utf16();
        b.iter(|| utf16.distance(utf16.start_index(), utf16.end_index()));
    });
}

fn decoding(c: &mut Criterion) {
    let valid = "héllo wörld 👋 ".repeat(100).into_bytes();
    c.bench_function("decode_utf8_valid", |b| {
        b.iter(|| TextValue::decode(black_box(&valid), SourceEncoding::Utf8));
    });

    let mut malformed = valid.clone();
    malformed.truncate(malformed.len() - 2); // cut into the trailing emoji
    c.bench_function("decode_utf8_repair", |b| {
        b.iter(|| TextValue::decode(black_box(&malformed), SourceEncoding::Utf8));
    });

    let utf16: Vec<u8> = "héllo wörld 👋 "
        .repeat(100)
        .encode_utf16()
        .flat_map(u16::to_le_bytes)
        .collect();
    c.bench_function("decode_utf16le", |b| {
        b.iter(|| TextValue::decode(black_box(&utf16), SourceEncoding::Utf16Le));
    });
}

criterion_group!(benches, construction, slicing, iteration, stepping, decoding);
criterion_main!(benches);
