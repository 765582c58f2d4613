//! Decide what to do with a selected link.

/// Prefixes that make a link open in the browser
const URL_PREFIXES: [&str; 2] = ["http://", "https://"];

/// What to do with a selected link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    /// Hand the link to the system URL handler
    OpenUrl,
    /// Put the link text on the clipboard
    CopyToClipboard,
}

/// Classify a link. Only `http://` and `https://` prefixes (case-sensitive)
/// open a browser; everything else is copied.
pub fn resolve(link: &str) -> LinkAction {
    if URL_PREFIXES.iter().any(|prefix| link.starts_with(prefix)) {
        LinkAction::OpenUrl
    } else {
        LinkAction::CopyToClipboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_and_https_open() {
        assert_eq!(resolve("https://example.com"), LinkAction::OpenUrl);
        assert_eq!(resolve("http://x"), LinkAction::OpenUrl);
    }

    #[test]
    fn everything_else_is_copied() {
        for link in ["some text", "ftp://x", "HTTPS://example.com", " https://x", "", "http:/x"] {
            assert_eq!(resolve(link), LinkAction::CopyToClipboard, "{link:?}");
        }
    }
}
