//! Contact extraction — email, phone and postal address, first match wins.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_ADDRESS: &str = "Address not provided";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid email regex")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+?\d{1,4}?[-.\s]?\(?\d{1,3}?\)?[-.\s]?\d{1,3}[-.\s]?\d{1,4}[-.\s]?\d{1,9}")
        .expect("valid phone regex")
});

static ADDRESS_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:Address\s?line\s?1|Address|Location)[\s:]*").expect("valid label regex")
});

static DIGIT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid digit regex"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub address: String,
}

pub fn extract_contact_info(text: &str) -> ContactInfo {
    ContactInfo {
        email: extract_email(text).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        phone: extract_phone(text).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        address: extract_address(text).unwrap_or_else(|| NO_ADDRESS.to_string()),
    }
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

/// Text after an address label, up to a 5–6 digit postal code or the end of
/// the text. Label occurrences followed by neither are skipped.
pub fn extract_address(text: &str) -> Option<String> {
    let mut from = 0;
    while let Some(label) = ADDRESS_LABEL_RE.find_at(text, from) {
        let body = &text[label.end()..];
        let run_len = body
            .char_indices()
            .find(|&(_, c)| !is_address_char(c))
            .map_or(body.len(), |(i, _)| i);
        let run = &body[..run_len];

        let candidate = match postal_code_start(run) {
            Some(cut) => Some(&run[..cut]),
            None if run_len == body.len() => Some(run),
            None => None,
        };
        if let Some(address) = candidate.map(str::trim).filter(|a| !a.is_empty()) {
            return Some(address.to_string());
        }

        // Resume scanning one character past this label's start.
        from = label.start() + text[label.start()..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

fn is_address_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, ',' | '.' | '-')
}

fn postal_code_start(run: &str) -> Option<usize> {
    DIGIT_RUN_RE
        .find_iter(run)
        .find(|m| (5..=6).contains(&m.as_str().len()))
        .map(|m| m.start())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "John Doe john.doe@example.com +1 (555) 123-4567 \
                          Address: 12 Main St, Springfield 560001 Skills: Rust";

    #[test]
    fn test_extracts_all_fields() {
        let info = extract_contact_info(RESUME);
        assert_eq!(info.email, "john.doe@example.com");
        assert_eq!(info.phone, "+1 (555) 123-4567");
        assert_eq!(info.address, "12 Main St, Springfield");
    }

    #[test]
    fn test_missing_fields_use_sentinels() {
        let info = extract_contact_info("Jane Roe, software engineer");
        assert_eq!(info.email, NOT_AVAILABLE);
        assert_eq!(info.phone, NOT_AVAILABLE);
        assert_eq!(info.address, NO_ADDRESS);
    }

    #[test]
    fn test_fields_are_independent() {
        let info = extract_contact_info("reach me at jane@roe.dev");
        assert_eq!(info.email, "jane@roe.dev");
        assert_eq!(info.phone, NOT_AVAILABLE);
        assert_eq!(info.address, NO_ADDRESS);
    }

    #[test]
    fn test_first_email_wins() {
        let text = "primary: a.b@first.com secondary: c.d@second.org";
        assert_eq!(extract_email(text).as_deref(), Some("a.b@first.com"));
    }

    #[test]
    fn test_email_requires_two_letter_tld() {
        assert_eq!(extract_email("broken@host.c"), None);
    }

    #[test]
    fn test_phone_with_dots() {
        assert_eq!(
            extract_phone("Phone 555.123.4567 anytime").as_deref(),
            Some("555.123.4567")
        );
    }

    #[test]
    fn test_short_numbers_are_not_phones() {
        assert_eq!(extract_phone("Class of 2019"), None);
    }

    #[test]
    fn test_address_label_is_case_insensitive() {
        assert_eq!(
            extract_address("LOCATION: Pune, Maharashtra 411001").as_deref(),
            Some("Pune, Maharashtra")
        );
    }

    #[test]
    fn test_address_runs_to_end_of_text() {
        assert_eq!(
            extract_address("Address: 42 Elm Road, Dublin").as_deref(),
            Some("42 Elm Road, Dublin")
        );
    }

    #[test]
    fn test_address_without_terminator_is_skipped() {
        // Stops at ':' after "Email" with no postal code before it.
        let text = "Location: Berlin, Germany Email: x@y.com";
        assert_eq!(extract_address(text), None);
    }

    #[test]
    fn test_later_label_is_tried_after_a_failed_one() {
        let text = "Location: Remote (EU) Address: 7 Quay St, Galway 91000";
        assert_eq!(extract_address(text).as_deref(), Some("7 Quay St, Galway"));
    }

    #[test]
    fn test_address_line_one_label() {
        let text = "Address line 1: 5 Harbour Rd 10115";
        assert_eq!(extract_address(text).as_deref(), Some("5 Harbour Rd"));
    }

    #[test]
    fn test_seven_digit_numbers_are_not_postal_codes() {
        let text = "Address: 1234567 Long Road";
        assert_eq!(extract_address(text).as_deref(), Some("1234567 Long Road"));
    }
}
