//! The OSIS content model: a polymorphic element tree, a structural parser
//! that builds it from repaired markup, text extraction over it, and
//! re-serialization back to markup.

mod extract;
mod node;
mod parse;
mod write;

pub use extract::{
    ExtractionScope, extract, heading_text, note_text, plain_text, verse_text,
};
pub use node::{Content, Descendants, Node};
pub use parse::{parse_document, parse_fragment};
pub use write::to_xml;
