//! Flattening a content tree into canonical plain text.

use super::node::{Content, Node};

/// How far an extraction descends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionScope {
    /// Descend into every child of every node and keep all text.
    #[default]
    Full,
    /// Follow only the container, division, verse path; text living in
    /// sibling annotations (titles, notes) is left behind.
    VersesOnly,
}

/// Flattens the tree under `root` into plain text.
///
/// Children are visited strictly in source order, so the same tree always
/// produces byte-identical output. The accumulated string is trimmed of
/// leading and trailing whitespace before it is returned.
///
/// # Examples
///
/// ```
/// use mendml::{Content, ExtractionScope, Node, extract};
///
/// let tree = Node::Div(vec![
///     Node::Title(vec![Content::text("Genesis")]).into(),
///     Node::Verse(vec![Content::text("In the ")]).into(),
///     Node::Verse(vec![Content::text("beginning")]).into(),
/// ]);
///
/// assert_eq!(extract(&tree, ExtractionScope::Full), "GenesisIn the beginning");
/// assert_eq!(extract(&tree, ExtractionScope::VersesOnly), "In the beginning");
/// ```
pub fn extract(root: &Node, scope: ExtractionScope) -> String {
    let mut buf = String::new();
    match scope {
        ExtractionScope::Full => flatten(root, &mut buf),
        ExtractionScope::VersesOnly => project_verses(root, &mut buf),
    }
    buf.trim().to_string()
}

/// Everything under `root`, in order: `extract` with [`ExtractionScope::Full`].
pub fn plain_text(root: &Node) -> String {
    extract(root, ExtractionScope::Full)
}

/// Only the verse body of `root`: `extract` with [`ExtractionScope::VersesOnly`].
pub fn verse_text(root: &Node) -> String {
    extract(root, ExtractionScope::VersesOnly)
}

/// Appends every text leaf under `node`, depth-first, in source order.
fn flatten(node: &Node, buf: &mut String) {
    for child in node.children() {
        match child {
            Content::Text(text) => buf.push_str(text),
            Content::Element(el) => flatten(el, buf),
        }
    }
}

/// The projection path: a div root is its own single division; otherwise
/// div children of the container are the divisions. Within a division only
/// verse elements are flattened; nested divs are themselves divisions
/// (books hold chapters, and the parser's synthetic fragment root holds
/// whatever division the fragment carried) and are recursed. Loose text
/// along the path is kept; any other element is skipped without recursing.
fn project_verses(root: &Node, buf: &mut String) {
    if matches!(root, Node::Div(_)) {
        flatten_division(root, buf);
        return;
    }
    for child in root.children() {
        match child {
            Content::Text(text) => buf.push_str(text),
            Content::Element(div @ Node::Div(_)) => flatten_division(div, buf),
            Content::Element(_) => {}
        }
    }
}

fn flatten_division(div: &Node, buf: &mut String) {
    for child in div.children() {
        match child {
            Content::Text(text) => buf.push_str(text),
            Content::Element(verse @ Node::Verse(_)) => flatten(verse, buf),
            Content::Element(inner @ Node::Div(_)) => flatten_division(inner, buf),
            Content::Element(_) => {}
        }
    }
}

/// Collects each matching subtree's flattened text, without re-entering a
/// match to look for nested ones.
fn gather(node: &Node, keep: fn(&Node) -> bool, parts: &mut Vec<String>) {
    for child in node.children() {
        if let Content::Element(el) = child {
            if keep(el) {
                let text = extract(el, ExtractionScope::Full);
                if !text.is_empty() {
                    parts.push(text);
                }
            } else {
                gather(el, keep, parts);
            }
        }
    }
}

/// The flattened text of every note under `root`, space separated.
pub fn note_text(root: &Node) -> String {
    let mut parts = Vec::new();
    gather(root, |n| matches!(n, Node::Note(_)), &mut parts);
    parts.join(" ")
}

/// The flattened text of every title under `root`, space separated.
pub fn heading_text(root: &Node) -> String {
    let mut parts = Vec::new();
    gather(root, |n| matches!(n, Node::Title(_)), &mut parts);
    parts.join(" ")
}
