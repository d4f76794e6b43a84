use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{EMAIL_PATTERN, MESSAGE_MAX_LEN};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(EMAIL_PATTERN).expect("email pattern compiles")
});

/// `local@domain.tld` shape: no whitespace, a single `@`, and a `.` somewhere
/// after it with text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn truncate_message(text: &str) -> &str {
    match text.char_indices().nth(MESSAGE_MAX_LEN) {
        Some((ind, _)) => &text[..ind],
        None => text,
    }
}
