//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;

const MAX_EMAIL_LENGTH: usize = 254;
const MAX_LOCAL_PART_LENGTH: usize = 64;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(
            r#"^[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+(?:\.[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+)*@(?:[\p{L}\p{N}](?:[\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?\.)+\p{L}(?:[\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?$"#,
        )
        .expect("email pattern is a valid regex")
    })
}

/// Check that `email` is a syntactically valid address.
///
/// Only the syntax is checked; the domain is never resolved. Letters outside
/// ASCII are accepted in both parts, internationalized domains are checked in
/// their punycode form. The domain must carry at least one dot, so
/// `user@localhost` is rejected.
pub fn verify_email_pattern(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
        return false;
    }

    let Some((local, _domain)) = email.rsplit_once('@') else {
        return false;
    };
    if local.len() > MAX_LOCAL_PART_LENGTH {
        return false;
    }

    email_regex().is_match(email) && email.parse::<lettre::Address>().is_ok()
}

/// Escape text for interpolation into HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Strip leading `@` characters from a username mention
pub fn strip_mention(username: &str) -> &str {
    username.trim_start_matches('@')
}

/// Format an event timestamp for mail bodies
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}
