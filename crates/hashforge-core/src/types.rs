// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the HashForge registry.

use serde::{Deserialize, Serialize};

/// Separator placed between the normalised fields of a canonical key.
pub const KEY_DELIMITER: char = '|';

/// Placeholder used in initials when no middle initial was supplied.
pub const NO_MIDDLE_INITIAL: char = '-';

/// Raw identifying fields as supplied by a caller.
///
/// Transient: never persisted, and its `Debug` output is redacted so that
/// it can travel through `tracing` spans without leaking PII.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct PersonalRecordInput {
    pub first_name: String,
    pub middle_initial: Option<String>,
    pub last_name: String,
    /// Month-day-year text, e.g. `01-31-1990`.
    pub dob: String,
    pub address: String,
}

impl PersonalRecordInput {
    pub fn new(
        first_name: impl Into<String>,
        middle_initial: Option<&str>,
        last_name: impl Into<String>,
        dob: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            middle_initial: middle_initial.map(str::to_owned),
            last_name: last_name.into(),
            dob: dob.into(),
            address: address.into(),
        }
    }
}

impl std::fmt::Debug for PersonalRecordInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PersonalRecordInput(<redacted>)")
    }
}

/// Deterministic normalised representation of a person's identifying fields.
///
/// Built only by the normaliser; used as digest input and never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// Join already-normalised fields in the fixed order
    /// first, middle, last, dob, address.
    pub fn from_normalized_parts(
        first: &str,
        middle: &str,
        last: &str,
        dob: &str,
        address: &str,
    ) -> Self {
        let d = KEY_DELIMITER;
        Self(format!("{first}{d}{middle}{d}{last}{d}{dob}{d}{address}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Three-character display label: first letter of the first name, the
    /// middle initial (or `-`), and the first letter of the last name.
    pub fn initials(&self) -> String {
        let mut parts = self.0.split(KEY_DELIMITER);
        let mut first_char = |fallback: char| {
            parts
                .next()
                .and_then(|p| p.chars().next())
                .unwrap_or(fallback)
        };
        let first = first_char('?');
        let middle = first_char(NO_MIDDLE_INITIAL);
        let last = first_char('?');
        [first, middle, last].iter().collect()
    }
}

impl std::fmt::Debug for CanonicalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CanonicalKey(<redacted>)")
    }
}

/// Age-eligibility flag, fixed at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Eligibility {
    Eligible,
    Ineligible,
}

impl Eligibility {
    pub fn from_bool(eligible: bool) -> Self {
        if eligible {
            Self::Eligible
        } else {
            Self::Ineligible
        }
    }

    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible)
    }

    /// Text stored in the `age_verified` column.
    pub fn as_column(&self) -> &'static str {
        match self {
            Self::Eligible => "Yes",
            Self::Ineligible => "No",
        }
    }

    /// Parse the `age_verified` column. Anything other than `Yes`/`No` is
    /// treated as a corrupted row.
    pub fn from_column(value: &str) -> Option<Self> {
        match value {
            "Yes" => Some(Self::Eligible),
            "No" => Some(Self::Ineligible),
            _ => None,
        }
    }
}

/// A row about to be appended to the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    /// Argon2id PHC string (embeds its own cost parameters).
    pub digest: String,
    /// Hex-encoded per-record salt.
    pub salt: String,
    pub eligibility: Eligibility,
    pub initials: String,
}

/// A persisted registration. Contains nothing from which the original
/// input can be recovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: i64,
    pub digest: String,
    pub salt: String,
    pub eligibility: Eligibility,
    pub initials: String,
}

/// Result of a registration attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// A new row was appended.
    Registered {
        record_id: i64,
        initials: String,
        eligibility: Eligibility,
    },
    /// The person is already on file; nothing was written.
    DuplicateDetected { existing_id: i64 },
}

/// Result of a verification lookup that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// A matching registration exists with the stored eligibility.
    Found {
        record_id: i64,
        eligibility: Eligibility,
    },
    /// No registration matches. Distinct from an ineligible registration.
    NotFound,
}

impl VerificationOutcome {
    /// Label used by verification reports.
    pub fn report_label(&self) -> &'static str {
        match self {
            Self::Found { eligibility, .. } => eligibility.as_column(),
            Self::NotFound => "No (not in database)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_use_placeholder_without_middle() {
        let key =
            CanonicalKey::from_normalized_parts("Jane", "", "Public", "01-01-2000", "1 Main St");
        assert_eq!(key.initials(), "J-P");
    }

    #[test]
    fn initials_include_middle() {
        let key =
            CanonicalKey::from_normalized_parts("Jane", "Q", "Public", "01-01-2000", "1 Main St");
        assert_eq!(key.initials(), "JQP");
        assert_eq!(key.initials().chars().count(), 3);
    }

    #[test]
    fn debug_output_is_redacted() {
        let input =
            PersonalRecordInput::new("Jane", Some("Q"), "Public", "01-01-2000", "1 Main St");
        let rendered = format!("{input:?}");
        assert!(!rendered.contains("Jane"));
        assert!(!rendered.contains("Main"));

        let key =
            CanonicalKey::from_normalized_parts("Jane", "Q", "Public", "01-01-2000", "1 Main St");
        assert!(!format!("{key:?}").contains("Public"));
    }

    #[test]
    fn eligibility_column_round_trip() {
        assert_eq!(Eligibility::from_column("Yes"), Some(Eligibility::Eligible));
        assert_eq!(Eligibility::from_column("No"), Some(Eligibility::Ineligible));
        assert_eq!(Eligibility::from_column("yes"), None);
        assert_eq!(Eligibility::Eligible.as_column(), "Yes");
    }

    #[test]
    fn not_found_label_differs_from_ineligible() {
        let ineligible = VerificationOutcome::Found {
            record_id: 1,
            eligibility: Eligibility::Ineligible,
        };
        assert_eq!(ineligible.report_label(), "No");
        assert_eq!(VerificationOutcome::NotFound.report_label(), "No (not in database)");
    }
}
