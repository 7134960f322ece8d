// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for operators at the counter.
//
// Every technical error is mapped to plain English with a clear suggestion.
// None of the messages repeat the customer data that was entered.

use crate::error::HashForgeError;

/// Severity of an error from the operator's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Storage hiccup; trying the same operation again may work.
    Transient,
    /// The operator must correct the input.
    ActionRequired,
    /// Cannot be fixed by retrying (corrupted data, bad configuration).
    Permanent,
}

impl Severity {
    /// Short tag printed next to the failed operation.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Transient => "temporary problem",
            Severity::ActionRequired => "check the entry",
            Severity::Permanent => "needs an administrator",
        }
    }
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary, naming the operation that failed.
    pub message: String,
    /// What the operator should try.
    pub suggestion: String,
    /// Whether repeating the operation could succeed.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `HashForgeError` into a `HumanError` an operator can act on.
pub fn humanize_error(err: &HashForgeError) -> HumanError {
    match err {
        // -- Input --
        HashForgeError::InvalidDateFormat => HumanError {
            message: "The date of birth wasn't recognised.".into(),
            suggestion: "Enter it as month-day-year, for example 07-04-1990.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        HashForgeError::MissingField(field) => HumanError {
            message: format!("The {} is missing.", field_label(field)),
            suggestion: "Fill in every required field. Only the middle initial may be left blank."
                .into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        HashForgeError::InvalidField(field) => HumanError {
            message: format!(
                "The {} contains a character that can't be used.",
                field_label(field)
            ),
            suggestion: "Remove any `|` characters from the entry.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Digest engine --
        HashForgeError::DigestEngine(_) => HumanError {
            message: "A stored record couldn't be checked.".into(),
            suggestion: "The record may be damaged. Other records were still checked; \
                         ask an administrator to inspect the database."
                .into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        HashForgeError::SaltGeneration(_) => HumanError {
            message: "Registration couldn't start because no secure random data was available."
                .into(),
            suggestion: "If this keeps happening, the system's random number source may be \
                         misconfigured."
                .into(),
            retriable: true,
            severity: Severity::Transient,
        },

        // -- Storage --
        HashForgeError::StorageUnavailable(_) => HumanError {
            message: "The record database couldn't be reached.".into(),
            suggestion: "Nothing was saved. Check the database file is present and writable."
                .into(),
            retriable: true,
            severity: Severity::Transient,
        },

        HashForgeError::InvalidConfig(detail) => HumanError {
            message: "The configuration file has an invalid setting.".into(),
            suggestion: format!("Correct the configuration and restart. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        HashForgeError::BatchInput(_) => HumanError {
            message: "A row in the batch file couldn't be read.".into(),
            suggestion: "Check the file has the columns First Name, Middle Initial, Last Name, \
                         DOB, and Address."
                .into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        HashForgeError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "Check the path.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "HashForge doesn't have permission to use that file.".into(),
                    suggestion: "Check the file permissions.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "If this keeps happening, the disk may be full.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        HashForgeError::Serialization(_) => HumanError {
            message: "The configuration file isn't valid JSON.".into(),
            suggestion: "Fix the file or delete it to fall back to the defaults.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

fn field_label(field: &str) -> &str {
    match field {
        "first_name" => "first name",
        "middle_initial" => "middle initial",
        "last_name" => "last name",
        "dob" => "date of birth",
        "address" => "address",
        other => other,
    }
}
