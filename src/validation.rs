//! Field validators and the aggregator that runs them.
//!
//! Every validator is pure and total: any input maps to either `None`
//! (valid) or a customer-facing message, never a panic. The same rules run
//! on the form state machine and on the submission handler, so the server
//! never depends on the client having validated.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Utc};

/// Field name → error message, empty iff the checked fields are all valid.
pub type FieldErrors = BTreeMap<String, String>;

pub const MIN_YEAR: i32 = 1900;

pub fn validate_required(value: &str, label: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("{label} is required"));
    }
    None
}

pub fn validate_name(value: &str, label: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{label} is required"));
    }
    if trimmed.chars().count() < 2 {
        return Some(format!("{label} must be at least 2 characters"));
    }
    if trimmed.chars().count() > 50 {
        return Some(format!("{label} must be less than 50 characters"));
    }
    let allowed = |c: char| c.is_ascii_alphabetic() || c.is_whitespace() || c == '-' || c == '\'';
    if !trimmed.chars().all(allowed) {
        return Some(format!(
            "{label} can only contain letters, spaces, hyphens, and apostrophes"
        ));
    }
    None
}

pub fn validate_email(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some("Email is required".to_string());
    }
    if !is_email_shaped(value.trim()) {
        return Some("Please enter a valid email address".to_string());
    }
    None
}

/// Matches the shape `[^\s@]+@[^\s@]+\.[^\s@]+`: exactly one `@`, a dot in
/// the domain with characters on both sides, no whitespace anywhere.
fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

pub fn validate_phone(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some("Phone number is required".to_string());
    }
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if digits < 8 {
        return Some("Phone number must be at least 8 digits".to_string());
    }
    if digits > 12 {
        return Some("Phone number is too long".to_string());
    }
    None
}

/// Upper bound is next calendar year, so freshly registered models pass.
pub fn max_vehicle_year() -> i32 {
    Utc::now().year() + 1
}

pub fn validate_year(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some("Year is required".to_string());
    }
    let year: i32 = match trimmed.parse() {
        Ok(y) => y,
        Err(_) => return Some("Year must be a number".to_string()),
    };
    if year < MIN_YEAR {
        return Some(format!("Year must be {MIN_YEAR} or later"));
    }
    let max = max_vehicle_year();
    if year > max {
        return Some(format!("Year cannot be later than {max}"));
    }
    None
}

pub fn validate_license_plate(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some("License plate is required".to_string());
    }
    if trimmed.chars().count() < 2 {
        return Some("License plate must be at least 2 characters".to_string());
    }
    if trimmed.chars().count() > 10 {
        return Some("License plate is too long".to_string());
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || c == ' ' || c == '-';
    if !trimmed.chars().all(allowed) {
        return Some(
            "License plate can only contain letters, numbers, spaces, and hyphens".to_string(),
        );
    }
    None
}

/// The persisted record parses the date into a calendar day, so the date is
/// checked for parseability here rather than failing during normalization.
pub fn validate_date(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some("Date is required".to_string());
    }
    if NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_err() {
        return Some("Date must be a valid date".to_string());
    }
    None
}

/// Validator choice for one field, used by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required(&'static str),
    Name(&'static str),
    Email,
    Phone,
    Year,
    LicensePlate,
    Date,
}

impl Rule {
    pub fn check(&self, value: &str) -> Option<String> {
        match self {
            Rule::Required(label) => validate_required(value, label),
            Rule::Name(label) => validate_name(value, label),
            Rule::Email => validate_email(value),
            Rule::Phone => validate_phone(value),
            Rule::Year => validate_year(value),
            Rule::LicensePlate => validate_license_plate(value),
            Rule::Date => validate_date(value),
        }
    }
}

/// Run each field's validator and collect failures into a field → message
/// map. Reports valid iff the map comes back empty.
pub fn collect<'a>(fields: impl IntoIterator<Item = (&'static str, &'a str, Rule)>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for (name, value, rule) in fields {
        if let Some(message) = rule.check(value) {
            errors.insert(name.to_string(), message);
        }
    }
    errors
}
