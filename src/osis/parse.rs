//! Structural parsing of repaired markup into a content tree.
//!
//! This is a well-formedness parser, not a validator: any balanced element
//! structure is accepted, and unrecognized vocabulary becomes
//! [`Node::Unknown`]. What it will not accept is structural damage, which
//! is exactly the signal the repair pipeline needs: mismatched or unclosed
//! tags, bare ampersands, and entity references XML does not predefine all
//! fail the parse.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::clean::is_valid_xml_char;
use crate::error::{Error, Result};

use super::node::{Content, Node};

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

/// Appends text, merging with a preceding text leaf so that runs broken up
/// by entity references come out as a single leaf.
fn push_text(children: &mut Vec<Content>, text: &str) {
    if let Some(Content::Text(last)) = children.last_mut() {
        last.push_str(text);
    } else {
        children.push(Content::Text(text.to_string()));
    }
}

/// Resolves a general entity reference the way a conformant non-validating
/// parser does: the five predefined names and numeric character references
/// resolve to their character, anything else is fatal.
fn resolve_reference(name: &str) -> Result<char> {
    match name {
        "amp" => return Ok('&'),
        "lt" => return Ok('<'),
        "gt" => return Ok('>'),
        "quot" => return Ok('"'),
        "apos" => return Ok('\''),
        _ => {}
    }

    if let Some(digits) = name.strip_prefix('#') {
        let code = if let Some(hex) = digits.strip_prefix('x') {
            u32::from_str_radix(hex, 16).ok()
        } else {
            digits.parse::<u32>().ok()
        };
        return match code.and_then(char::from_u32).filter(|&c| is_valid_xml_char(c)) {
            Some(c) => Ok(c),
            None => Err(Error::MalformedDocument(format!(
                "invalid character reference &{name};"
            ))),
        };
    }

    Err(Error::UnknownEntity(name.to_string()))
}

/// Parses input into the ordered content appearing at the top level.
fn parse_nodes(input: &str) -> Result<Vec<Content>> {
    let mut reader = Reader::from_str(input);

    // Invariant: `current` is the open element being filled; `stack` holds
    // its ancestors. The bottom frame with the empty name collects
    // top-level content.
    let mut stack: Vec<(String, Vec<Content>)> = Vec::new();
    let mut current: (String, Vec<Content>) = (String::new(), Vec::new());

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = local_name(&e);
                stack.push(std::mem::replace(&mut current, (name, Vec::new())));
            }
            Event::End(_) => {
                let Some(parent) = stack.pop() else {
                    return Err(Error::MalformedDocument(
                        "closing tag without an open element".into(),
                    ));
                };
                let (name, children) = std::mem::replace(&mut current, parent);
                current.1.push(Content::Element(Node::from_tag(&name, children)));
            }
            Event::Empty(e) => {
                let name = local_name(&e);
                current.1.push(Content::Element(Node::from_tag(&name, Vec::new())));
            }
            Event::Text(e) => push_text(&mut current.1, &String::from_utf8_lossy(e.as_ref())),
            Event::CData(e) => push_text(&mut current.1, &String::from_utf8_lossy(e.as_ref())),
            Event::GeneralRef(e) => {
                let name = String::from_utf8_lossy(e.as_ref());
                let c = resolve_reference(&name)?;
                push_text(&mut current.1, &c.to_string());
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(Error::MalformedDocument(format!(
            "unclosed element <{}>",
            current.0
        )));
    }
    Ok(current.1)
}

/// Index of the sole element among whitespace-only text, if that is the
/// whole of the content.
fn single_element(content: &[Content]) -> Option<usize> {
    let mut found = None;
    for (idx, item) in content.iter().enumerate() {
        match item {
            Content::Element(_) => {
                if found.is_some() {
                    return None;
                }
                found = Some(idx);
            }
            Content::Text(t) => {
                if !t.trim().is_empty() {
                    return None;
                }
            }
        }
    }
    found
}

/// Parses mixed content and gathers it under a synthetic [`Node::Div`] root.
///
/// The wrapper is unconditional, so the root is always the division
/// container: loose text, multiple top-level elements, and a lone element
/// all land as its children. That keeps projection honest — a fragment
/// consisting of a single peripheral element (a title, a note) stays a
/// sibling annotation under the division instead of being promoted to the
/// root that projection starts from.
///
/// # Examples
///
/// ```
/// use mendml::{Content, Node, parse_fragment};
///
/// let tree = parse_fragment("<verse>In the beginning</verse>").unwrap();
/// assert_eq!(
///     tree,
///     Node::Div(vec![Node::Verse(vec![Content::text("In the beginning")]).into()])
/// );
/// ```
pub fn parse_fragment(input: &str) -> Result<Node> {
    Ok(Node::Div(parse_nodes(input)?))
}

/// Parses a complete document: exactly one top-level element, with nothing
/// but whitespace around it.
pub fn parse_document(input: &str) -> Result<Node> {
    let mut content = parse_nodes(input)?;
    if let Some(idx) = single_element(&content)
        && let Content::Element(el) = content.swap_remove(idx)
    {
        return Ok(el);
    }
    Err(Error::MalformedDocument(
        "expected a single document element".into(),
    ))
}
