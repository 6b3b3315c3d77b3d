//! # mendml
//!
//! A library for repairing almost-well-formed XML and extracting canonical
//! plain text from OSIS documents.
//!
//! ## Features
//!
//! - Remove characters XML forbids ([`clean_characters`])
//! - Rewrite undeclared entities and bare ampersands ([`clean_entities`])
//! - Strip unsalvageable tags as a last resort ([`strip_tags`])
//! - Repair cropped fragments ([`reclose_tags`], [`close_empty_tags`])
//! - Parse repaired markup into a typed content tree ([`parse_fragment`])
//! - Flatten a tree to plain text, fully or verses-only ([`extract`])
//!
//! ## Quick Start
//!
//! ```
//! use mendml::{canonicalize, verse_text};
//!
//! // Broken in three ways: a control character, a bare ampersand, and an
//! // undeclared entity. Repaired, parsed, and flattened in one call.
//! let raw = "<div><verse>Tom & Jerry\u{7}</verse><verse> caf&eacute;</verse></div>";
//! let tree = canonicalize(raw).unwrap();
//! assert_eq!(verse_text(&tree), "Tom & Jerry caf\u{e9}");
//! ```
//!
//! ## Repair stages
//!
//! Each repair function is total and usable on its own:
//!
//! ```
//! use mendml::{clean_characters, clean_entities, strip_tags};
//!
//! assert_eq!(clean_characters("A\u{7}B\tC"), "AB\tC");
//! assert_eq!(clean_entities("Tom & Jerry"), "Tom &amp; Jerry");
//! assert_eq!(strip_tags("Hello <b>world</b> end"), "Hello world end");
//! ```
//!
//! [`canonicalize`] composes them: character and entity repair always run,
//! tag stripping only as a fallback when the structural parse still fails.
//!
//! ## Working with the tree
//!
//! [`Node`] is the central data type, one variant per OSIS element kind.
//! Extraction walks it in source order, either descending everywhere
//! ([`ExtractionScope::Full`]) or following only the division and verse
//! structure ([`ExtractionScope::VersesOnly`]):
//!
//! ```
//! use mendml::{Content, ExtractionScope, Node, extract};
//!
//! let tree = Node::Div(vec![
//!     Node::Note(vec![Content::text("ignored")]).into(),
//!     Node::Verse(vec![Content::text("kept")]).into(),
//! ]);
//! assert_eq!(extract(&tree, ExtractionScope::Full), "ignoredkept");
//! assert_eq!(extract(&tree, ExtractionScope::VersesOnly), "kept");
//! ```

pub mod clean;
pub mod error;
pub mod osis;
mod pipeline;

pub use clean::{
    clean_characters, clean_entities, close_empty_tags, escape, reclose_tags, strip_tags,
};
pub use error::{Error, Result};
pub use osis::{
    Content, Descendants, ExtractionScope, Node, extract, heading_text, note_text, parse_document,
    parse_fragment, plain_text, to_xml, verse_text,
};
pub use pipeline::canonicalize;
