//! Declarative field validation.
//!
//! Each field gets an ordered chain of rules. The first failing rule wins
//! for that field and the remaining rules of the chain are skipped; other
//! fields are still evaluated, so one request can report several field
//! errors at once. Outcomes are values, never panics: callers receive a
//! field-to-message map and decide how to surface it.

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::messages;

/// Ordered field-to-message map. Insertion order is preserved so the JSON
/// body lists errors in the order the fields were validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: Vec<(&'static str, &'static str)>,
}

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, message: &'static str) {
        if self.get(field).is_none() {
            self.entries.push((field, message));
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| *message)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, message) in &self.entries {
            map.serialize_entry(field, message)?;
        }
        map.end()
    }
}

/// Collects rule outcomes across fields.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    /// Starts a rule chain for one field. A missing value (`None`) fails
    /// every rule, so the first rule's message reports the absence.
    pub fn field(&mut self, name: &'static str, value: Option<&str>) -> FieldRules<'_> {
        FieldRules {
            errors: &mut self.errors,
            name,
            value: value.map(|v| v.trim().to_owned()),
            failed: false,
        }
    }

    /// Records a failure produced outside a rule chain, e.g. the async
    /// email-uniqueness lookup.
    pub fn reject(&mut self, field: &'static str, message: &'static str) {
        self.errors.add(field, message);
    }

    /// Whether every rule evaluated so far for `field` passed.
    #[must_use]
    pub fn passed(&self, field: &str) -> bool {
        self.errors.get(field).is_none()
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Rule chain for a single field, first failure wins.
pub struct FieldRules<'v> {
    errors: &'v mut ValidationErrors,
    name: &'static str,
    value: Option<String>,
    failed: bool,
}

impl FieldRules<'_> {
    fn fail(&mut self, message: &'static str) {
        self.errors.add(self.name, message);
        self.failed = true;
    }

    pub fn required(mut self, message: &'static str) -> Self {
        if !self.failed && self.value.as_deref().is_none_or(str::is_empty) {
            self.fail(message);
        }
        self
    }

    pub fn min_length(mut self, min: usize, message: &'static str) -> Self {
        if !self.failed {
            match &self.value {
                Some(v) if v.chars().count() >= min => {}
                _ => self.fail(message),
            }
        }
        self
    }

    pub fn length_between(mut self, min: usize, max: usize, message: &'static str) -> Self {
        if !self.failed {
            match &self.value {
                Some(v) if (min..=max).contains(&v.chars().count()) => {}
                _ => self.fail(message),
            }
        }
        self
    }

    pub fn satisfies(
        mut self,
        predicate: impl FnOnce(&str) -> bool,
        message: &'static str,
    ) -> Self {
        if !self.failed {
            match &self.value {
                Some(v) if predicate(v) => {}
                _ => self.fail(message),
            }
        }
        self
    }
}

pub fn check_name(validator: &mut Validator, value: Option<&str>) {
    validator
        .field("name", value)
        .required(messages::INVALID_NAME_EMPTY)
        .min_length(3, messages::INVALID_NAME_LENGTH);
}

/// Syntactic email check only; uniqueness needs a store lookup and is
/// applied by the account service after this chain passes.
pub fn check_email(validator: &mut Validator, value: Option<&str>) {
    validator
        .field("email", value)
        .satisfies(is_email, messages::INVALID_EMAIL);
}

pub fn check_password(validator: &mut Validator, value: Option<&str>) {
    validator
        .field("password", value)
        .required(messages::INVALID_PASSWORD_EMPTY)
        .min_length(8, messages::INVALID_PASSWORD_LENGTH)
        .satisfies(has_password_structure, messages::INVALID_PASSWORD_STRUCTURE);
}

pub fn check_page_date(validator: &mut Validator, value: Option<&str>) {
    validator
        .field("date", value)
        .required(messages::INVALID_PAGE_DATE_EMPTY)
        .satisfies(is_date, messages::INVALID_PAGE_DATE_NOT_DATE);
}

pub fn check_page_time(validator: &mut Validator, value: Option<&str>) {
    validator
        .field("time", value)
        .required(messages::INVALID_PAGE_TIME_EMPTY)
        .satisfies(is_time, messages::INVALID_PAGE_TIME_NOT_TIME);
}

pub fn check_page_title(validator: &mut Validator, value: Option<&str>) {
    validator
        .field("title", value)
        .required(messages::INVALID_PAGE_TITLE_EMPTY)
        .length_between(3, 400, messages::INVALID_PAGE_TITLE_LENGTH);
}

pub fn check_page_content(validator: &mut Validator, value: Option<&str>) {
    validator
        .field("content", value)
        .required(messages::INVALID_PAGE_CONTENT_EMPTY)
        .length_between(3, 10_000, messages::INVALID_PAGE_CONTENT_LENGTH);
}

/// Minimal address syntax: one `@`, non-empty local part, dotted domain
/// with non-empty labels, no whitespace.
#[must_use]
pub fn is_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

fn has_password_structure(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
}

/// Real calendar date in ISO `YYYY-MM-DD` form.
#[must_use]
pub fn is_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Strict 24-hour `HH:MM`.
#[must_use]
pub fn is_time(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let hours = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
    let minutes = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
    hours <= 23 && minutes <= 59
}
