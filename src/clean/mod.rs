//! Best-effort repair of almost-well-formed XML.
//!
//! Real-world documents arrive with undeclared entities, stray ampersands,
//! control characters, and broken tags. Each function here rewrites one class
//! of damage so that a structural parse can succeed. All of them are total:
//! they take whatever they are given and return something strictly closer to
//! well-formed markup.

mod chars;
mod entities;
mod tags;

pub use chars::clean_characters;
pub(crate) use chars::is_valid_xml_char;
pub use entities::{clean_entities, escape};
pub use tags::{close_empty_tags, reclose_tags, strip_tags};
