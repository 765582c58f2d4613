//! Selection lines: one display string per bookmark, handed to the fuzzy
//! finder and decoded back into a key and link once the user picks one.

use crate::bookmarks::{Bookmark, Store};
use crate::error::{Error, Result};

/// Literal separator between key and link in a selection line
pub const SEPARATOR: &str = " => ";

/// Encode one bookmark as `"<key> => <link>"`
pub fn encode(bookmark: &Bookmark) -> String {
    format!("{}{}{}", bookmark.key, SEPARATOR, bookmark.link)
}

/// Encode every bookmark, in store order
pub fn encode_all(store: &Store) -> Vec<String> {
    store.bookmarks().iter().map(encode).collect()
}

/// Split a chosen line back into `(key, link)`.
///
/// The separator must occur exactly once. A link that itself contains
/// `" => "` cannot be decoded and is reported instead of being split at the
/// wrong place.
pub fn decode(line: &str) -> Result<(&str, &str)> {
    let mut parts = line.split(SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(link), None) => Ok((key, link)),
        _ => Err(Error::Decode(line.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_uses_single_spaced_arrow() {
        let line = encode(&Bookmark::new("Docs", "https://example.org"));
        assert_eq!(line, "Docs => https://example.org");
    }

    #[test]
    fn encode_all_keeps_store_order() {
        let mut store = Store::new();
        store.add("zeta", "z");
        store.add("alpha", "a");
        assert_eq!(encode_all(&store), vec!["zeta => z", "alpha => a"]);
        assert!(encode_all(&Store::new()).is_empty());
    }

    #[test]
    fn decode_inverts_encode() {
        for bookmark in [
            Bookmark::new("Docs", "https://example.org/a?b=c"),
            Bookmark::new("cmd", "ls -la | grep x"),
            Bookmark::new("arrow", "a->b and c=>d"),
        ] {
            let line = encode(&bookmark);
            assert_eq!(
                decode(&line).unwrap(),
                (bookmark.key.as_str(), bookmark.link.as_str())
            );
        }
    }

    #[test]
    fn decode_allows_empty_sides() {
        assert_eq!(decode(" => link").unwrap(), ("", "link"));
        assert_eq!(decode("key => ").unwrap(), ("key", ""));
    }

    #[test]
    fn decode_without_separator_fails() {
        for line in ["", "just text", "key=>link", "key =>link"] {
            assert!(matches!(decode(line), Err(Error::Decode(_))), "{line:?}");
        }
    }

    #[test]
    fn decode_with_repeated_separator_fails() {
        let err = decode("key => a => b").unwrap_err();
        assert!(matches!(&err, Error::Decode(line) if line == "key => a => b"));
        assert_eq!(
            err.to_string(),
            "invalid selection format: key => a => b"
        );
    }
}
