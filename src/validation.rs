//! Field Validation
//!
//! Client-side checks run before a draft is submitted. Validation is
//! all-or-nothing per call: the returned map contains exactly the fields that
//! failed this time.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::model::{Draft, Field};

pub const FIRST_NAME_REQUIRED: &str = "First name is required";
pub const FIRST_NAME_LETTERS: &str = "First name must contain only letters";
pub const LAST_NAME_REQUIRED: &str = "Last name is required";
pub const LAST_NAME_LETTERS: &str = "Last name must contain only letters";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";

fn letters_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z]+$").expect("letters pattern compiles"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    })
}

/// Per-field validation messages. Only failing fields are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Drop the error for one field, leaving the others untouched
    pub fn clear_field(&mut self, field: Field) -> bool {
        self.errors.remove(&field).is_some()
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

/// Check a first or last name. `required` and `letters` are the messages for
/// the two failure modes; emptiness is reported first.
fn check_name(value: &str, required: &'static str, letters: &'static str) -> Option<&'static str> {
    if value.is_empty() {
        Some(required)
    } else if !letters_pattern().is_match(value) {
        Some(letters)
    } else {
        None
    }
}

pub fn check_first_name(value: &str) -> Option<&'static str> {
    check_name(value, FIRST_NAME_REQUIRED, FIRST_NAME_LETTERS)
}

pub fn check_last_name(value: &str) -> Option<&'static str> {
    check_name(value, LAST_NAME_REQUIRED, LAST_NAME_LETTERS)
}

/// Permissive email shape check: `local@domain.tld` without whitespace or a
/// second `@`. Not RFC-complete.
pub fn check_email(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        Some(EMAIL_REQUIRED)
    } else if !email_pattern().is_match(value) {
        Some(EMAIL_INVALID)
    } else {
        None
    }
}

/// Validate a single field. Business name is free text and always passes.
pub fn check_field(field: Field, value: &str) -> Option<&'static str> {
    match field {
        Field::FirstName => check_first_name(value),
        Field::LastName => check_last_name(value),
        Field::Email => check_email(value),
        Field::BusinessName => None,
    }
}

/// Validate every field of a draft
pub fn validate_draft(draft: &Draft) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in Field::ALL {
        if let Some(message) = check_field(field, draft.get(field)) {
            errors.insert(field, message);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(first: &str, last: &str, email: &str) -> Draft {
        let mut draft = Draft::blank();
        draft.set(Field::FirstName, first);
        draft.set(Field::LastName, last);
        draft.set(Field::Email, email);
        draft
    }

    #[test]
    fn test_names_reject_non_letters() {
        for bad in ["Jane2", "Mary Ann", "O'Brien", "Jean-Luc", "José", "_", "a.b"] {
            assert_eq!(check_first_name(bad), Some(FIRST_NAME_LETTERS), "{bad}");
            assert_eq!(check_last_name(bad), Some(LAST_NAME_LETTERS), "{bad}");
        }
    }

    #[test]
    fn test_names_accept_letters() {
        for good in ["Jane", "doe", "X", "McDonald"] {
            assert_eq!(check_first_name(good), None);
            assert_eq!(check_last_name(good), None);
        }
    }

    #[test]
    fn test_required_takes_precedence() {
        assert_eq!(check_first_name(""), Some(FIRST_NAME_REQUIRED));
        assert_eq!(check_last_name(""), Some(LAST_NAME_REQUIRED));
        assert_eq!(check_email(""), Some(EMAIL_REQUIRED));
    }

    #[test]
    fn test_email_shape() {
        assert_eq!(check_email("user@example.com"), None);
        assert_eq!(check_email("a@b.c.d"), None);
        assert_eq!(check_email("user@example"), Some(EMAIL_INVALID));
        assert_eq!(check_email("user example.com"), Some(EMAIL_INVALID));
        assert_eq!(check_email("user@@example.com"), Some(EMAIL_INVALID));
        assert_eq!(check_email("us er@example.com"), Some(EMAIL_INVALID));
        assert_eq!(check_email("@example.com"), Some(EMAIL_INVALID));
        assert_eq!(check_email("user@.com"), Some(EMAIL_INVALID));
    }

    #[test]
    fn test_business_name_is_free_text() {
        assert_eq!(check_field(Field::BusinessName, ""), None);
        assert_eq!(check_field(Field::BusinessName, "Acme & Sons, 42"), None);
    }

    #[test]
    fn test_valid_draft_has_no_errors() {
        let errors = validate_draft(&draft("Jane", "Doe", "jane@doe.com"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_invalid_draft_reports_each_field() {
        let errors = validate_draft(&draft("", "D0e", "jane"));
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Field::FirstName), Some(FIRST_NAME_REQUIRED));
        assert_eq!(errors.get(Field::LastName), Some(LAST_NAME_LETTERS));
        assert_eq!(errors.get(Field::Email), Some(EMAIL_INVALID));
        assert!(!errors.contains(Field::BusinessName));
    }

    #[test]
    fn test_unset_fields_count_as_empty() {
        let errors = validate_draft(&Draft::default());
        assert_eq!(errors.get(Field::Email), Some(EMAIL_REQUIRED));
    }

    #[test]
    fn test_clear_field_only_touches_one_entry() {
        let mut errors = validate_draft(&draft("", "", ""));
        assert!(errors.clear_field(Field::LastName));
        assert!(!errors.clear_field(Field::LastName));
        assert!(errors.contains(Field::FirstName));
        assert!(errors.contains(Field::Email));
    }
}
