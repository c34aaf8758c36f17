//! Email address lookup inside affiliation text.

use regex::Regex;
use std::sync::OnceLock;

const EMAIL_PATTERN: &str = r"[\w.-]+@[\w.-]+";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN is a valid regex"))
}

/// First `local@domain` token in `text`, where both parts are word characters,
/// dots or hyphens.
pub fn find_email(text: &str) -> Option<&str> {
    if !text.contains('@') {
        return None;
    }
    email_regex().find(text).map(|m| m.as_str())
}
