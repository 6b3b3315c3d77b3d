//! Benchmarks for the repair and extraction pipeline.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use mendml::{
    ExtractionScope, canonicalize, clean_characters, clean_entities, extract, strip_tags,
};

/// A chapter-sized document with the damage each stage repairs: control
/// characters, legacy and unknown entities, bare ampersands, and a sprinkle
/// of broken tags.
fn damaged_document() -> String {
    let verse = "<verse>In the beginning &God; created caf&eacute; & the earth\u{7}; \
                 and darkness <b>was</b~> upon the face of the deep.</verse>\n";
    let mut doc = String::from("<div><title>Genesis &copy; nobody</title>\n");
    for _ in 0..200 {
        doc.push_str(verse);
    }
    doc.push_str("</div>");
    doc
}

/// The same document with only entity and character damage, so the parse
/// succeeds without the stripping fallback.
fn parseable_document() -> String {
    damaged_document().replace("</b~>", "</b>")
}

// ============================================================================
// Individual repair stages
// ============================================================================

fn bench_clean_characters(c: &mut Criterion) {
    let doc = damaged_document();
    c.bench_function("clean_characters", |b| {
        b.iter(|| clean_characters(black_box(&doc)));
    });
}

fn bench_clean_characters_clean_input(c: &mut Criterion) {
    let doc = clean_characters(&damaged_document()).into_owned();
    c.bench_function("clean_characters_clean_input", |b| {
        b.iter(|| clean_characters(black_box(&doc)));
    });
}

fn bench_clean_entities(c: &mut Criterion) {
    let doc = damaged_document();
    c.bench_function("clean_entities", |b| {
        b.iter(|| clean_entities(black_box(&doc)));
    });
}

fn bench_strip_tags(c: &mut Criterion) {
    let doc = damaged_document();
    c.bench_function("strip_tags", |b| {
        b.iter(|| strip_tags(black_box(&doc)));
    });
}

// ============================================================================
// Composed pipeline and extraction
// ============================================================================

fn bench_canonicalize(c: &mut Criterion) {
    let doc = parseable_document();
    c.bench_function("canonicalize", |b| {
        b.iter(|| canonicalize(black_box(&doc)).unwrap());
    });
}

fn bench_canonicalize_with_fallback(c: &mut Criterion) {
    let doc = damaged_document();
    c.bench_function("canonicalize_with_fallback", |b| {
        b.iter(|| canonicalize(black_box(&doc)).unwrap());
    });
}

fn bench_extract(c: &mut Criterion) {
    let tree = canonicalize(&parseable_document()).unwrap();
    c.bench_function("extract_full", |b| {
        b.iter(|| extract(black_box(&tree), ExtractionScope::Full));
    });
    c.bench_function("extract_verses_only", |b| {
        b.iter(|| extract(black_box(&tree), ExtractionScope::VersesOnly));
    });
}

criterion_group!(
    benches,
    // Repair stages
    bench_clean_characters,
    bench_clean_characters_clean_input,
    bench_clean_entities,
    bench_strip_tags,
    // Pipeline
    bench_canonicalize,
    bench_canonicalize_with_fallback,
    // Extraction
    bench_extract,
);
criterion_main!(benches);
