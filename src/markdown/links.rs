//! Link destination checks.
//!
//! Destinations of links, images and autolinks go through [sanitize_destination]
//! before a node is built. A rejected destination is not an error: the inline
//! parser leaves the surrounding syntax as literal text.

use url::{ParseError, Url};

const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Returns the destination if it is safe to show as a link, `None` otherwise.
///
/// Rejected:
/// - control characters, CR/LF, Unicode format and bidi controls
/// - anything that does not parse as a URI reference
/// - protocol-relative references (`//host/...`)
/// - schemes other than `http`, `https` and `mailto`
pub fn sanitize_destination(dest: &str) -> Option<&str> {
    if dest.chars().any(is_forbidden_char) {
        log::debug!("rejected link destination with control characters");
        return None;
    }

    match Url::parse(dest) {
        Ok(url) => {
            if ALLOWED_SCHEMES.contains(&url.scheme()) {
                Some(dest)
            } else {
                log::debug!("rejected link destination scheme {:?}", url.scheme());
                None
            }
        }
        Err(ParseError::RelativeUrlWithoutBase) => {
            if dest.starts_with("//") {
                return None;
            }
            // Relative references still have to be well-formed.
            let base = Url::parse("http://relative.invalid/").ok()?;
            base.join(dest).ok().map(|_| dest)
        }
        Err(_) => None,
    }
}

/// Control characters plus the Unicode format (Cf) characters that can reorder or
/// hide text in a terminal.
fn is_forbidden_char(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{00AD}'
                | '\u{061C}'
                | '\u{180E}'
                | '\u{200B}'..='\u{200F}'
                | '\u{202A}'..='\u{202E}'
                | '\u{2060}'..='\u{2064}'
                | '\u{2066}'..='\u{206F}'
                | '\u{FEFF}'
                | '\u{FFF9}'..='\u{FFFB}'
        )
}

/// Text shown for an autolink: the destination without a `mailto:` prefix.
pub fn autolink_display(dest: &str) -> &str {
    dest.strip_prefix("mailto:")
        .or_else(|| dest.strip_prefix("MAILTO:"))
        .unwrap_or(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_web_and_mail_destinations() {
        for dest in [
            "http://example.com",
            "https://example.com/x",
            "mailto:a@b.com",
            "HTTPS://EXAMPLE.COM",
            "docs/readme.md",
            "#section",
            "../up.png",
        ] {
            assert_eq!(sanitize_destination(dest), Some(dest), "{dest}");
        }
    }

    #[test]
    fn rejects_unsafe_destinations() {
        for dest in [
            "javascript:alert(1)",
            "JaVaScRiPt:alert(1)",
            "//evil.example",
            "data:text/html,hi",
            "file:///etc/passwd",
            "http://exa\u{202E}mple.com",
            "http://example.com/\nnext",
            "http://example.com/\u{7f}",
            "http://[::1",
        ] {
            assert_eq!(sanitize_destination(dest), None, "{dest:?}");
        }
    }

    #[test]
    fn mailto_prefix_is_hidden() {
        assert_eq!(autolink_display("mailto:a@b.com"), "a@b.com");
        assert_eq!(autolink_display("https://x.y"), "https://x.y");
    }
}
