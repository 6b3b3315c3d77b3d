//! Removal of code points XML forbids outright.

use std::borrow::Cow;

/// Returns true when `c` is allowed to appear anywhere in an XML document.
///
/// The allowed set is `#x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] |
/// [#x10000-#x10FFFF]`. Surrogate halves are unrepresentable in `char`, so
/// only the low controls and the two noncharacters at the end of the BMP are
/// actually reachable here.
#[inline]
pub(crate) fn is_valid_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Deletes every code point that may not appear in an XML document.
///
/// Disallowed characters are dropped, not replaced, so the output never
/// gains spurious whitespace. Runs before entity repair because a control
/// character inside an entity name would otherwise confuse the scanner.
///
/// Returns the input unchanged (and unallocated) when it is already clean.
///
/// # Examples
///
/// ```
/// use mendml::clean_characters;
///
/// assert_eq!(clean_characters("A\u{7}B\tC"), "AB\tC");
/// ```
pub fn clean_characters(input: &str) -> Cow<'_, str> {
    let Some(bad) = input.find(|c| !is_valid_xml_char(c)) else {
        return Cow::Borrowed(input);
    };

    let mut out = String::with_capacity(input.len());
    out.push_str(&input[..bad]);
    out.extend(input[bad..].chars().filter(|&c| is_valid_xml_char(c)));
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_characters_passthrough() {
        assert_eq!(clean_characters(""), "");
        assert_eq!(clean_characters(" one two three four five "), " one two three four five ");
        assert_eq!(clean_characters("!\"$%^&*() -=_+"), "!\"$%^&*() -=_+");
        assert_eq!(clean_characters("{}[]:@~;'#<>?,./"), "{}[]:@~;'#<>?,./");
        assert_eq!(clean_characters("1234567890"), "1234567890");
        assert_eq!(clean_characters("\u{a0}\u{20ac}"), "\u{a0}\u{20ac}");
    }

    #[test]
    fn test_clean_characters_borrows_when_clean() {
        assert!(matches!(clean_characters("no damage here"), Cow::Borrowed(_)));
        assert!(matches!(clean_characters("A\u{0}B"), Cow::Owned(_)));
    }

    #[test]
    fn test_clean_characters_removes_controls() {
        assert_eq!(
            clean_characters("nul-\u{0}:bel-\u{7}:tab-\t:cr-\r:lf-\n:last-\u{1f}:space- :"),
            "nul-:bel-:tab-\t:cr-\r:lf-\n:last-:space- :"
        );
        assert_eq!(clean_characters("A\u{7}B\tC"), "AB\tC");
    }

    #[test]
    fn test_clean_characters_boundary_points() {
        // Last BMP characters: U+FFFD is valid, the noncharacters after it are not.
        assert_eq!(clean_characters("a\u{fffd}b"), "a\u{fffd}b");
        assert_eq!(clean_characters("a\u{fffe}b"), "ab");
        assert_eq!(clean_characters("a\u{ffff}b"), "ab");
        // Supplementary planes pass through.
        assert_eq!(clean_characters("a\u{10000}\u{10ffff}b"), "a\u{10000}\u{10ffff}b");
        // U+001F is the last disallowed control before space.
        assert_eq!(clean_characters("\u{1f}\u{20}"), "\u{20}");
    }

    #[test]
    fn test_clean_characters_idempotent() {
        let once = clean_characters("x\u{b}y\u{c}z\u{1}").into_owned();
        assert_eq!(clean_characters(&once), once);
    }
}
