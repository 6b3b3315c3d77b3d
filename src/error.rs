//! Error types for mendml operations.

use thiserror::Error;

/// Errors that can occur while parsing repaired markup into a content tree.
#[derive(Error, Debug)]
pub enum Error {
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("undeclared entity reference: &{0};")]
    UnknownEntity(String),

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("document is unreadable after all repair stages")]
    Unreadable,
}

pub type Result<T> = std::result::Result<T, Error>;
