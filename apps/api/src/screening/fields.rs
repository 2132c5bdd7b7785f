//! Field Extractor — contact identifiers pulled from plain text by pattern.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder for a field that does not occur in the text.
pub const NOT_FOUND: &str = "Not found";

/// Minimum digit count for a phone candidate; shorter runs are page numbers, years, zip codes.
const MIN_PHONE_DIGITS: usize = 7;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(?:\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}").unwrap()
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,3}[ .\-]?)?(?:\(\d{1,4}\)[ .\-]?)?\d[\d .\-()]*\d").unwrap()
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactFields {
    pub email: String,
    pub phone: String,
}

pub fn extract_fields(text: &str) -> ContactFields {
    ContactFields {
        email: extract_emails(text),
        phone: extract_phones(text),
    }
}

/// All email-shaped tokens in source order, joined with `"; "`.
pub fn extract_emails(text: &str) -> String {
    join_or_sentinel(EMAIL_RE.find_iter(text).map(|m| m.as_str()).collect())
}

/// All phone-shaped runs with at least seven digits, joined with `"; "`.
pub fn extract_phones(text: &str) -> String {
    let phones = PHONE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|candidate| digit_count(candidate) >= MIN_PHONE_DIGITS)
        .collect();
    join_or_sentinel(phones)
}

fn digit_count(s: &str) -> usize {
    s.chars().filter(|c| c.is_ascii_digit()).count()
}

fn join_or_sentinel(found: Vec<&str>) -> String {
    if found.is_empty() {
        NOT_FOUND.to_string()
    } else {
        found.join("; ")
    }
}
