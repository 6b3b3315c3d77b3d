//! End-to-end repair tests: damaged markup through the sanitizers, the
//! structural parser, and the composed pipeline.

use mendml::{
    Error, canonicalize, clean_characters, clean_entities, close_empty_tags, parse_fragment,
    plain_text, reclose_tags, strip_tags, verse_text,
};

// ============================================================================
// Each sanitizer on its headline case
// ============================================================================

#[test]
fn test_bare_ampersand_becomes_canonical() {
    assert_eq!(clean_entities("Tom & Jerry"), "Tom &amp; Jerry");
}

#[test]
fn test_entity_triage() {
    // Legacy name substituted, unknown name dropped, canonical name kept.
    assert_eq!(
        clean_entities("caf&eacute; &unknown; &amp;"),
        "caf\u{e9}  &amp;"
    );
}

#[test]
fn test_control_character_removed() {
    assert_eq!(clean_characters("A\u{7}B\tC"), "AB\tC");
}

#[test]
fn test_tags_stripped() {
    assert_eq!(strip_tags("Hello <b>world</b> end"), "Hello world end");
}

// ============================================================================
// Sanitized output satisfies the structural parser
// ============================================================================

#[test]
fn test_character_and_entity_repair_always_parses() {
    // Entity and character damage in otherwise balanced markup: after the
    // two always-on stages the parse must succeed without tag stripping.
    let cases = [
        "<verse>Tom & Jerry</verse>",
        "<p>caf&eacute; &unknown; &amp;</p>",
        "<div>\u{0}<verse>x\u{b}y</verse>\u{fffe}</div>",
        "A &lt; B &#38; C &bogus; D &",
        "<seg>&&&</seg>",
    ];
    for raw in cases {
        let repaired = clean_entities(&clean_characters(raw)).into_owned();
        parse_fragment(&repaired).unwrap_or_else(|e| panic!("{raw:?}: {e}"));
    }
}

#[test]
fn test_undeclared_entity_without_repair_is_fatal() {
    // The same damage straight into the parser fails; this is the signal
    // that makes the repair stages load-bearing.
    assert!(parse_fragment("<p>caf&eacute;</p>").is_err());
    assert!(parse_fragment("<p>Tom & Jerry</p>").is_err());
}

// ============================================================================
// The composed pipeline
// ============================================================================

#[test]
fn test_canonicalize_repairs_and_parses() {
    let tree = canonicalize("<verse>Tom & Jerry\u{7}</verse>").unwrap();
    assert_eq!(plain_text(&tree), "Tom & Jerry");
}

#[test]
fn test_canonicalize_falls_back_to_stripping() {
    // Crossed nesting is beyond entity repair; the stripped retry keeps
    // the prose.
    let tree = canonicalize("<a><b>one</a> two</b>").unwrap();
    assert_eq!(plain_text(&tree), "one two");
}

#[test]
fn test_canonicalize_unreadable_document() {
    // The sanitizer keeps numeric references verbatim, so a reference to a
    // forbidden character survives every repair stage and the second parse
    // still fails.
    assert!(matches!(canonicalize("&#00;"), Err(Error::Unreadable)));
}

// ============================================================================
// Fragment repair feeding the parser
// ============================================================================

#[test]
fn test_reclosed_fragment_parses() {
    let fixed = reclose_tags("<div><verse>In the beginning").unwrap();
    let tree = parse_fragment(&fixed).unwrap();
    assert_eq!(verse_text(&tree), "In the beginning");
}

#[test]
fn test_reclosed_poetry_fragment_parses() {
    let fixed = reclose_tags("first line</l><l>second line").unwrap();
    let tree = parse_fragment(&fixed).unwrap();
    assert_eq!(plain_text(&tree), "first linesecond line");
}

#[test]
fn test_void_elements_closed_before_parse() {
    let fixed = close_empty_tags("one<br>two<hr width=\"10\">three");
    let tree = parse_fragment(&fixed).unwrap();
    assert_eq!(plain_text(&tree), "onetwothree");
}
