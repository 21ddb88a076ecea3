use std::sync::LazyLock;

use regex::Regex;

// Dotted local part or a quoted one, then a bracketed IPv4 or a dotted domain with a 2+ letter TLD.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email pattern is a valid regex")
});

/// Whether `email` has the usual `local@domain.tld` shape. Matching is case-insensitive.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(&email.to_lowercase())
}

#[cfg(test)]
#[path = "../../tests/unit/contact/email.rs"]
mod tests;
