//! Re-serialization of a content tree to markup text.

use crate::clean::escape;

use super::node::{Content, Node};

/// Serializes the tree under `node` back to markup.
///
/// Text leaves are escaped, so the output always satisfies a structural
/// parse. Elements without children, milestones included, use the
/// self-closed form. Unknown elements serialize under their recorded name
/// with whatever children they were parsed with, even though traversal
/// hides those children.
pub fn to_xml(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    // Unknown children are reached directly: serialization reproduces the
    // stored tree, not the traversal view.
    let children = match node {
        Node::Unknown { children, .. } => children.as_slice(),
        _ => node.children(),
    };
    let tag = node.tag();

    if children.is_empty() {
        out.push('<');
        out.push_str(tag);
        out.push_str("/>");
        return;
    }

    out.push('<');
    out.push_str(tag);
    out.push('>');
    for child in children {
        match child {
            Content::Text(text) => out.push_str(&escape(text)),
            Content::Element(el) => write_node(el, out),
        }
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
