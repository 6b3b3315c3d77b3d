//! Tag-level salvage for markup too broken to parse.
//!
//! When entity and character repair are not enough, the only remaining move
//! is to give up on the tags themselves. `strip_tags` deletes everything
//! that looks like a tag; `close_empty_tags` and `reclose_tags` make smaller
//! repairs for the two most common structural faults in cropped HTML-ish
//! fragments.

use std::borrow::Cow;
use std::sync::LazyLock;

use memchr::memchr;
use regex_lite::{Captures, Regex};

/// HTML void elements frequently left unclosed.
static VOID_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<(img|hr|br)([^>]*)>").unwrap());

/// An opening or closing tag token: `<name` or `</name`.
static TAG_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[a-zA-Z]+").unwrap());

/// Decides where the tag starting at `lt` ends, returning the byte offset
/// one past the span to delete.
///
/// A tag runs to the next `>`. A space inside it opens a candidate span;
/// at the following space the span is inspected: with an `=` it reads as a
/// `name=value` attribute and the candidate slides forward, without one it
/// reads as prose and the tag is cut off just before the span. A tag with
/// no `>` extends to end of input.
fn tag_end(input: &str, lt: usize) -> usize {
    let mut span_start = None;

    for (off, c) in input[lt + 1..].char_indices() {
        let at = lt + 1 + off;
        match c {
            '>' => return at + 1,
            ' ' => match span_start {
                None => span_start = Some(at),
                Some(start) => {
                    if input[start..at].contains('=') {
                        span_start = Some(at);
                    } else {
                        return start;
                    }
                }
            },
            _ => {}
        }
    }
    input.len()
}

/// Deletes every tag-shaped span from the input.
///
/// A last-resort repair for documents whose tag structure itself is
/// corrupt: afterwards no `<` remains, so a structural parse sees pure
/// character data. Tag spans are deleted outright, never replaced with a
/// space. Heuristic, not grammatical: prose like `1 < 2` loses text, and
/// attribute values containing spaces can drag prose into the deleted span.
/// Callers should treat the output as best-effort salvage.
///
/// # Examples
///
/// ```
/// use mendml::strip_tags;
///
/// assert_eq!(strip_tags("Hello <b>world</b> end"), "Hello world end");
/// ```
pub fn strip_tags(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    let Some(first) = memchr(b'<', bytes) else {
        return Cow::Borrowed(input);
    };

    let mut out = String::with_capacity(input.len());
    out.push_str(&input[..first]);

    let mut pos = first;
    while let Some(off) = memchr(b'<', &bytes[pos..]) {
        let lt = pos + off;
        out.push_str(&input[pos..lt]);
        pos = tag_end(input, lt);
    }

    out.push_str(&input[pos..]);
    Cow::Owned(out)
}

/// Self-closes void elements (`<img ...>`, `<hr ...>`, `<br ...>`) left
/// open, which otherwise end a structural parse immediately.
pub fn close_empty_tags(input: &str) -> Cow<'_, str> {
    VOID_TAG_RE.replace_all(input, |caps: &Captures| {
        let body = &caps[2];
        if body.ends_with('/') {
            caps[0].to_string()
        } else {
            format!("<{}{}/>", &caps[1], body)
        }
    })
}

/// Strips one trailing `</name>` (plus trailing blanks) off the end,
/// returning the shortened slice.
fn strip_trailing_close_tag(s: &str) -> Option<&str> {
    let trimmed = s.trim_end_matches([' ', '\t', '\r', '\n']);
    let tail = trimmed.strip_suffix('>')?;
    let lt = tail.rfind('<')?;
    let name = tail[lt..].strip_prefix("</")?;
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(&s[..lt])
    } else {
        None
    }
}

/// Repairs a fragment cropped out of a larger document: drops orphaned
/// closing tags from the end, then appends closing tags for every element
/// still open.
///
/// Poetic line (`l`) and line group (`lg`) elements legitimately start
/// before a fragment, so a leading orphan `</l>` or `</lg>` triggers one
/// retry with the matching open tag prepended. Returns `None` when the
/// fragment is too broken to repair: a close tag that matches nothing, a
/// mismatched nesting order, or an open tag with no `>` at all.
pub fn reclose_tags(input: &str) -> Option<String> {
    let mut result: &str = input;
    while let Some(shorter) = strip_trailing_close_tag(result) {
        result = shorter;
    }

    let bytes = result.as_bytes();
    let mut open_tags: Vec<&str> = Vec::new();
    let mut l_found = false;
    let mut lg_found = false;

    for m in TAG_TOKEN_RE.find_iter(result) {
        let token = m.as_str();
        if let Some(name) = token.strip_prefix("</") {
            if open_tags.is_empty() {
                if name == "l" && !l_found {
                    return reclose_tags(&format!("<l>{input}"));
                }
                if name == "lg" && !lg_found {
                    return reclose_tags(&format!("<lg>{input}"));
                }
                return None;
            }
            let last = open_tags.pop()?;
            if last != name {
                return None;
            }
        } else {
            let name = &token[1..];
            let Some(gt) = result[m.end()..].find('>') else {
                return None;
            };
            let mut close = m.end() + gt;
            while bytes[close - 1].is_ascii_whitespace() {
                close -= 1;
            }
            if bytes[close - 1] != b'/' {
                if name == "l" {
                    l_found = true;
                }
                if name == "lg" {
                    lg_found = true;
                }
                open_tags.push(name);
            }
        }
    }

    let mut out = result.to_string();
    for name in open_tags.into_iter().rev() {
        out.push_str("</");
        out.push_str(name);
        out.push('>');
    }
    Some(out)
}
