use email_address::{EmailAddress, Options};
use url::Url;

/// Bare address only; `Name <addr>` is rejected.
pub fn is_valid_email(candidate: &str) -> bool {
    EmailAddress::parse_with_options(candidate, Options::default().without_display_text()).is_ok()
}

pub fn parse_absolute_url(candidate: &str) -> Option<Url> {
    // Url::parse strips surrounding whitespace; the raw string is what gets sent.
    if candidate.trim() != candidate {
        return None;
    }

    Url::parse(candidate)
        .ok()
        .filter(|url| url.has_host() && !url.cannot_be_a_base())
}

pub fn parse_remote_url(candidate: &str) -> Option<Url> {
    parse_absolute_url(candidate).filter(|url| matches!(url.scheme(), "http" | "https"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        assert!(is_valid_email("dev@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co.uk"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for candidate in ["", "invalid-email", "@example.com", "user@", "a b@example.com"] {
            assert!(!is_valid_email(candidate), "{candidate} should be invalid");
        }
    }

    #[test]
    fn rejects_display_name_forms() {
        assert!(!is_valid_email("Bee <b@x.test>"));
        assert!(!is_valid_email("<b@x.test>"));
    }

    #[test]
    fn surrounding_whitespace_is_not_a_url() {
        assert!(parse_absolute_url("  https://x.test/hook ").is_none());
        assert!(parse_remote_url("https://x.test/a.png\n").is_none());
    }

    #[test]
    fn absolute_url_requires_scheme_and_host() {
        assert!(parse_absolute_url("https://x.test/hook").is_some());
        assert!(parse_absolute_url("not-a-url").is_none());
        assert!(parse_absolute_url("mailto:dev@example.com").is_none());
    }

    #[test]
    fn windows_style_paths_are_not_remote() {
        assert!(parse_remote_url("C:\\files\\report.pdf").is_none());
        assert!(parse_remote_url("/tmp/report.pdf").is_none());
        assert!(parse_remote_url("https://placehold.co/600x400.png").is_some());
    }
}
