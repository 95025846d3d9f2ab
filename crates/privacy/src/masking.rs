//! Redaction helpers used to derive masked field values.
//!
//! Each helper reveals at most what the dashboard shows to uncleared staff.
//! Input that does not have the expected shape is redacted completely.

use chrono::{Datelike, NaiveDate};

use crate::fields::FieldName;

pub const REDACTED: &str = "****";

/// First character, then `****`. Single-character names are fully redacted.
pub fn mask_name(value: &str) -> String {
    let mut chars = value.trim().chars();
    match (chars.next(), chars.next()) {
        (None, _) => String::new(),
        (Some(_), None) => REDACTED.to_string(),
        (Some(first), Some(_)) => format!("{}{}", first, REDACTED),
    }
}

/// Keeps the birth year (`2007-11-04` → `2007-**-**`).
pub fn mask_birth_date(value: &str) -> String {
    if value.trim().is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => format!("{:04}-**-**", date.year()),
        Err(_) => REDACTED.to_string(),
    }
}

/// Drops the day of birth and the serial suffix
/// (`20071104-1234` → `200711-****`, `071104-1234` → `0711-****`).
pub fn mask_personal_number(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }

    let Some((date_part, suffix)) = value.split_once(['-', '+']) else {
        return REDACTED.to_string();
    };
    let well_formed = matches!(date_part.len(), 6 | 8)
        && date_part.bytes().all(|b| b.is_ascii_digit())
        && !suffix.is_empty()
        && suffix.bytes().all(|b| b.is_ascii_alphanumeric());
    if !well_formed {
        return REDACTED.to_string();
    }

    format!("{}-{}", &date_part[..date_part.len() - 2], REDACTED)
}

pub fn mask_address(value: &str) -> String {
    if value.trim().is_empty() {
        String::new()
    } else {
        REDACTED.to_string()
    }
}

pub fn mask_field(field: FieldName, value: &str) -> String {
    match field {
        FieldName::FirstName | FieldName::LastName => mask_name(value),
        FieldName::BirthDate => mask_birth_date(value),
        FieldName::PersonalNumber => mask_personal_number(value),
        FieldName::Address => mask_address(value),
    }
}
