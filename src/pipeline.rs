//! The composed repair flow: sanitize, parse, fall back, give up.

use crate::clean::{clean_characters, clean_entities, strip_tags};
use crate::error::{Error, Result};
use crate::osis::{Node, parse_fragment};

/// Repairs raw text and parses it into a content tree.
///
/// Character and entity repair always run first. If the repaired text still
/// fails a structural parse, every tag is stripped and the parse is retried
/// once; tag-stripped text is pure character data, so a document only comes
/// out of this as [`Error::Unreadable`] when even that parse fails. Each
/// fallback stage runs at most once, so there is no unbounded retry chain.
///
/// # Examples
///
/// ```
/// use mendml::{canonicalize, plain_text};
///
/// let tree = canonicalize("<verse>Tom & Jerry\u{7}</verse>").unwrap();
/// assert_eq!(plain_text(&tree), "Tom & Jerry");
/// ```
pub fn canonicalize(raw: &str) -> Result<Node> {
    let filtered = clean_characters(raw);
    let sanitized = clean_entities(&filtered);

    let failure = match parse_fragment(&sanitized) {
        Ok(tree) => return Ok(tree),
        Err(err) => err,
    };
    tracing::debug!(error = %failure, "structural parse failed, stripping tags");

    // Deleting a tag span can splice its neighbors into a new entity-shaped
    // run, so entity repair gets one more pass over the stripped text.
    let stripped = strip_tags(&sanitized);
    let stripped = clean_entities(&stripped);
    match parse_fragment(&stripped) {
        Ok(tree) => Ok(tree),
        Err(err) => {
            tracing::debug!(error = %err, "parse failed after tag stripping");
            Err(Error::Unreadable)
        }
    }
}
