// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Normaliser — turns raw identifying fields into a canonical key.
//
// Registration and verification both go through `normalize`, so any change
// here invalidates every stored digest.

use chrono::{Datelike, NaiveDate};
use hashforge_core::error::{HashForgeError, Result};
use hashforge_core::types::{CanonicalKey, KEY_DELIMITER, PersonalRecordInput};

/// Serialised form of a normalised date of birth.
pub const DOB_FORMAT: &str = "%m-%d-%Y";

/// Accepted input layouts, all month-day-year.
const DOB_INPUT_FORMATS: &[&str] = &["%m-%d-%Y", "%m/%d/%Y"];

/// Output of the normaliser: the canonical key plus the parsed date of
/// birth needed by the eligibility evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    key: CanonicalKey,
    dob: NaiveDate,
}

impl NormalizedRecord {
    pub fn key(&self) -> &CanonicalKey {
        &self.key
    }

    pub fn dob(&self) -> NaiveDate {
        self.dob
    }
}

/// Canonicalise the five identifying fields.
///
/// Trims every field, title-cases names and address, upper-cases the middle
/// initial, and re-serialises the date of birth as zero-padded `MM-DD-YYYY`.
pub fn normalize(input: &PersonalRecordInput) -> Result<NormalizedRecord> {
    let first = required("first_name", &input.first_name)?;
    let last = required("last_name", &input.last_name)?;
    let dob_raw = required("dob", &input.dob)?;
    let address = required("address", &input.address)?;
    let middle = input.middle_initial.as_deref().map(str::trim).unwrap_or("");
    if middle.contains(KEY_DELIMITER) {
        return Err(HashForgeError::InvalidField("middle_initial"));
    }

    let dob = parse_dob(dob_raw)?;
    let key = CanonicalKey::from_normalized_parts(
        &title_case(first),
        &middle.to_uppercase(),
        &title_case(last),
        &dob.format(DOB_FORMAT).to_string(),
        &title_case(address),
    );

    Ok(NormalizedRecord { key, dob })
}

/// Parse a month-day-year date of birth, with `-` or `/` separators and
/// optional zero padding.
pub fn parse_dob(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    DOB_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .filter(|date| (1000..=9999).contains(&date.year()))
        .ok_or(HashForgeError::InvalidDateFormat)
}

/// Upper-case every letter that follows a non-letter and lower-case the
/// rest: `"o'BRIEN"` becomes `"O'Brien"`, `"12 elm st"` becomes `"12 Elm St"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_is_letter = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(HashForgeError::MissingField(field));
    }
    if trimmed.contains(KEY_DELIMITER) {
        return Err(HashForgeError::InvalidField(field));
    }
    Ok(trimmed)
}
