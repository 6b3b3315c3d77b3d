//! Entity repair: rewrite or discard entity references XML cannot digest.
//!
//! XML predefines five entities; everything else needs a DTD. Documents in
//! the wild freely use HTML 4 names (`&nbsp;`, `&eacute;`, ...) and bare
//! ampersands, both of which are fatal to a conforming parser. The scanner
//! here keeps what XML understands, substitutes the known legacy names with
//! their Unicode characters, and neutralizes the rest.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use memchr::memchr;
use regex_lite::Regex;

/// Numeric character references are kept verbatim: `&#38;` through
/// `&#9999;` and `&#x26;` through `&#xffff;`.
static NUMERIC_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^&#(?:[0-9]{2,4}|x[0-9A-Fa-f]{2,4});").unwrap());

/// The entities XML itself defines, minus `apos` (absent from HTML 4, and
/// the source vocabulary never emits it).
const CANONICAL: [&str; 4] = [
    "quot", // quotation mark
    "amp",  // ampersand
    "lt",   // less-than sign
    "gt",   // greater-than sign
];

/// Legacy named entities and the single character each stands for.
const SUBSTITUTIONS: &[(&str, char)] = &[
    ("euro", '\u{20AC}'),   // euro
    ("lsquo", '\u{2018}'),  // left single quotation mark
    ("rsquo", '\u{2019}'),  // right single quotation mark
    // the full Latin-1 supplement block
    ("nbsp", '\u{00A0}'),   // no-break space
    ("iexcl", '\u{00A1}'),  // inverted exclamation mark
    ("cent", '\u{00A2}'),   // cent sign
    ("pound", '\u{00A3}'),  // pound sign
    ("curren", '\u{00A4}'), // currency sign
    ("yen", '\u{00A5}'),    // yen sign
    ("brvbar", '\u{00A6}'), // broken vertical bar
    ("sect", '\u{00A7}'),   // section sign
    ("uml", '\u{00A8}'),    // diaeresis
    ("copy", '\u{00A9}'),   // copyright sign
    ("ordf", '\u{00AA}'),   // feminine ordinal indicator
    ("laquo", '\u{00AB}'),  // left-pointing double angle quotation mark
    ("not", '\u{00AC}'),    // not sign
    ("shy", '\u{00AD}'),    // soft hyphen
    ("reg", '\u{00AE}'),    // registered sign
    ("macr", '\u{00AF}'),   // macron
    ("deg", '\u{00B0}'),    // degree sign
    ("plusmn", '\u{00B1}'), // plus-minus sign
    ("sup2", '\u{00B2}'),   // superscript two
    ("sup3", '\u{00B3}'),   // superscript three
    ("acute", '\u{00B4}'),  // acute accent
    ("micro", '\u{00B5}'),  // micro sign
    ("para", '\u{00B6}'),   // pilcrow sign
    ("middot", '\u{00B7}'), // middle dot
    ("cedil", '\u{00B8}'),  // cedilla
    ("sup1", '\u{00B9}'),   // superscript one
    ("ordm", '\u{00BA}'),   // masculine ordinal indicator
    ("raquo", '\u{00BB}'),  // right-pointing double angle quotation mark
    ("frac14", '\u{00BC}'), // vulgar fraction one quarter
    ("frac12", '\u{00BD}'), // vulgar fraction one half
    ("frac34", '\u{00BE}'), // vulgar fraction three quarters
    ("iquest", '\u{00BF}'), // inverted question mark
    ("Agrave", '\u{00C0}'), // latin capital letter A with grave
    ("Aacute", '\u{00C1}'), // latin capital letter A with acute
    ("Acirc", '\u{00C2}'),  // latin capital letter A with circumflex
    ("Atilde", '\u{00C3}'), // latin capital letter A with tilde
    ("Auml", '\u{00C4}'),   // latin capital letter A with diaeresis
    ("Aring", '\u{00C5}'),  // latin capital letter A with ring above
    ("AElig", '\u{00C6}'),  // latin capital letter AE
    ("Ccedil", '\u{00C7}'), // latin capital letter C with cedilla
    ("Egrave", '\u{00C8}'), // latin capital letter E with grave
    ("Eacute", '\u{00C9}'), // latin capital letter E with acute
    ("Ecirc", '\u{00CA}'),  // latin capital letter E with circumflex
    ("Euml", '\u{00CB}'),   // latin capital letter E with diaeresis
    ("Igrave", '\u{00CC}'), // latin capital letter I with grave
    ("Iacute", '\u{00CD}'), // latin capital letter I with acute
    ("Icirc", '\u{00CE}'),  // latin capital letter I with circumflex
    ("Iuml", '\u{00CF}'),   // latin capital letter I with diaeresis
    ("ETH", '\u{00D0}'),    // latin capital letter ETH
    ("Ntilde", '\u{00D1}'), // latin capital letter N with tilde
    ("Ograve", '\u{00D2}'), // latin capital letter O with grave
    ("Oacute", '\u{00D3}'), // latin capital letter O with acute
    ("Ocirc", '\u{00D4}'),  // latin capital letter O with circumflex
    ("Otilde", '\u{00D5}'), // latin capital letter O with tilde
    ("Ouml", '\u{00D6}'),   // latin capital letter O with diaeresis
    ("times", '\u{00D7}'),  // multiplication sign
    ("Oslash", '\u{00D8}'), // latin capital letter O with stroke
    ("Ugrave", '\u{00D9}'), // latin capital letter U with grave
    ("Uacute", '\u{00DA}'), // latin capital letter U with acute
    ("Ucirc", '\u{00DB}'),  // latin capital letter U with circumflex
    ("Uuml", '\u{00DC}'),   // latin capital letter U with diaeresis
    ("Yacute", '\u{00DD}'), // latin capital letter Y with acute
    ("THORN", '\u{00DE}'),  // latin capital letter THORN
    ("szlig", '\u{00DF}'),  // latin small letter sharp s
    ("agrave", '\u{00E0}'), // latin small letter a with grave
    ("aacute", '\u{00E1}'), // latin small letter a with acute
    ("acirc", '\u{00E2}'),  // latin small letter a with circumflex
    ("atilde", '\u{00E3}'), // latin small letter a with tilde
    ("auml", '\u{00E4}'),   // latin small letter a with diaeresis
    ("aring", '\u{00E5}'),  // latin small letter a with ring above
    ("aelig", '\u{00E6}'),  // latin small letter ae
    ("ccedil", '\u{00E7}'), // latin small letter c with cedilla
    ("egrave", '\u{00E8}'), // latin small letter e with grave
    ("eacute", '\u{00E9}'), // latin small letter e with acute
    ("ecirc", '\u{00EA}'),  // latin small letter e with circumflex
    ("euml", '\u{00EB}'),   // latin small letter e with diaeresis
    ("igrave", '\u{00EC}'), // latin small letter i with grave
    ("iacute", '\u{00ED}'), // latin small letter i with acute
    ("icirc", '\u{00EE}'),  // latin small letter i with circumflex
    ("iuml", '\u{00EF}'),   // latin small letter i with diaeresis
    ("eth", '\u{00F0}'),    // latin small letter eth
    ("ntilde", '\u{00F1}'), // latin small letter n with tilde
    ("ograve", '\u{00F2}'), // latin small letter o with grave
    ("oacute", '\u{00F3}'), // latin small letter o with acute
    ("ocirc", '\u{00F4}'),  // latin small letter o with circumflex
    ("otilde", '\u{00F5}'), // latin small letter o with tilde
    ("ouml", '\u{00F6}'),   // latin small letter o with diaeresis
    ("divide", '\u{00F7}'), // division sign
    ("oslash", '\u{00F8}'), // latin small letter o with stroke
    ("ugrave", '\u{00F9}'), // latin small letter u with grave
    ("uacute", '\u{00FA}'), // latin small letter u with acute
    ("ucirc", '\u{00FB}'),  // latin small letter u with circumflex
    ("uuml", '\u{00FC}'),   // latin small letter u with diaeresis
    ("yacute", '\u{00FD}'), // latin small letter y with acute
    ("thorn", '\u{00FE}'),  // latin small letter thorn
    ("yuml", '\u{00FF}'),   // latin small letter y with diaeresis
];

/// Both lookups, built once on first use and never mutated after.
struct EntityTable {
    allowed: HashSet<&'static str>,
    substitutions: HashMap<&'static str, char>,
}

static ENTITIES: LazyLock<EntityTable> = LazyLock::new(|| EntityTable {
    allowed: CANONICAL.into_iter().collect(),
    substitutions: SUBSTITUTIONS.iter().copied().collect(),
});

/// What the scanner decided about one `&` occurrence.
enum EntityToken {
    /// A numeric character reference; the offset is one past its `;`.
    Numeric(usize),
    /// A named reference; the offset is the terminating `;` itself.
    Named(usize),
    /// No `;` before a non-name character or end of input.
    Unterminated,
}

fn scan_entity(input: &str, amp: usize) -> EntityToken {
    if let Some(m) = NUMERIC_REF_RE.find(&input[amp..]) {
        return EntityToken::Numeric(amp + m.end());
    }

    for (off, c) in input[amp + 1..].char_indices() {
        if c == ';' {
            return EntityToken::Named(amp + 1 + off);
        }
        if !c.is_alphanumeric() {
            return EntityToken::Unterminated;
        }
    }
    EntityToken::Unterminated
}

/// Rewrites every entity reference into something XML accepts.
///
/// Scans left to right for `&`. Numeric references (`&#nn;` with two to four
/// decimal digits, `&#xhh;` with two to four hex digits) and the canonical
/// names `amp`, `lt`, `gt`, `quot` pass through untouched. Known legacy
/// names are replaced by the character they stand for. A terminated name
/// this table does not know is dropped entirely. An `&` that runs into a
/// non-name character or end of input before any `;` is rewritten to
/// `&amp;`, and scanning resumes with the character right after it, so
/// trailing damage is still examined.
///
/// Never fails; the output contains only well-formed entity syntax.
///
/// # Examples
///
/// ```
/// use mendml::clean_entities;
///
/// assert_eq!(clean_entities("Tom & Jerry"), "Tom &amp; Jerry");
/// assert_eq!(clean_entities("caf\u{e9} &amp; cr\u{ea}pes"), "caf\u{e9} &amp; cr\u{ea}pes");
/// ```
pub fn clean_entities(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    let Some(first) = memchr(b'&', bytes) else {
        return Cow::Borrowed(input);
    };

    let mut out = String::with_capacity(input.len() + 8);
    out.push_str(&input[..first]);

    let mut pos = first;
    while let Some(off) = memchr(b'&', &bytes[pos..]) {
        let amp = pos + off;
        out.push_str(&input[pos..amp]);

        pos = match scan_entity(input, amp) {
            EntityToken::Numeric(end) => {
                out.push_str(&input[amp..end]);
                end
            }
            EntityToken::Named(semi) => {
                let name = &input[amp + 1..semi];
                if ENTITIES.allowed.contains(name) {
                    out.push_str(&input[amp..=semi]);
                } else if let Some(&c) = ENTITIES.substitutions.get(name) {
                    out.push(c);
                }
                // anything else is dropped
                semi + 1
            }
            EntityToken::Unterminated => {
                out.push_str("&amp;");
                amp + 1
            }
        };
    }

    out.push_str(&input[pos..]);
    Cow::Owned(out)
}

/// Escapes text for embedding in markup: `<`, `>`, `&`, `"` become entity
/// references, everything else passes through.
///
/// Not idempotent by design's inverse nature: escaping twice double-escapes.
pub fn escape(input: &str) -> Cow<'_, str> {
    let Some(first) = input.find(['<', '>', '&', '"']) else {
        return Cow::Borrowed(input);
    };

    let mut out = String::with_capacity(input.len() + 8);
    out.push_str(&input[..first]);
    for c in input[first..].chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
