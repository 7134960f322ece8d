// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch registration and verification.
//
// Rows arrive as `Result<BatchRow>` so that a reader-level failure on one
// row (bad CSV quoting, wrong column count) is reported against that row
// like any other per-row error.  One bad row never aborts the batch.

use hashforge_core::error::{HashForgeError, Result};
use hashforge_core::types::{PersonalRecordInput, RegistrationOutcome, VerificationOutcome};
use serde::Deserialize;
use tracing::{info, warn};

use crate::registry::Registry;

/// One row of batch input, keyed by the CSV header names.
#[derive(Clone, Default, Deserialize)]
pub struct BatchRow {
    #[serde(rename = "First Name", default)]
    pub first_name: Option<String>,
    #[serde(rename = "Middle Initial", default)]
    pub middle_initial: Option<String>,
    #[serde(rename = "Last Name", default)]
    pub last_name: Option<String>,
    #[serde(rename = "DOB", default)]
    pub dob: Option<String>,
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
}

impl std::fmt::Debug for BatchRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BatchRow(<redacted>)")
    }
}

impl BatchRow {
    /// Convert to a registry input.  Every column except the middle
    /// initial is required.
    pub fn into_input(self) -> Result<PersonalRecordInput> {
        fn take(field: &'static str, value: Option<String>) -> Result<String> {
            value
                .filter(|v| !v.trim().is_empty())
                .ok_or(HashForgeError::MissingField(field))
        }

        Ok(PersonalRecordInput {
            first_name: take("first_name", self.first_name)?,
            middle_initial: self.middle_initial,
            last_name: take("last_name", self.last_name)?,
            dob: take("dob", self.dob)?,
            address: take("address", self.address)?,
        })
    }
}

impl From<PersonalRecordInput> for BatchRow {
    fn from(input: PersonalRecordInput) -> Self {
        Self {
            first_name: Some(input.first_name),
            middle_initial: input.middle_initial,
            last_name: Some(input.last_name),
            dob: Some(input.dob),
            address: Some(input.address),
        }
    }
}

/// A row that could not be processed.
#[derive(Debug)]
pub struct RowFailure {
    /// 1-based position of the data row (headers excluded).
    pub row: usize,
    pub error: HashForgeError,
}

/// Totals for a batch registration.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub registered: usize,
    pub duplicates: usize,
    pub failures: Vec<RowFailure>,
}

impl BatchSummary {
    pub fn rows_processed(&self) -> usize {
        self.registered + self.duplicates + self.failures.len()
    }
}

/// Register every row, collecting per-row failures.
pub fn register_batch<I>(registry: &Registry, rows: I) -> BatchSummary
where
    I: IntoIterator<Item = Result<BatchRow>>,
{
    let mut summary = BatchSummary::default();

    for (index, row) in rows.into_iter().enumerate() {
        let row_number = index + 1;
        let outcome = row
            .and_then(BatchRow::into_input)
            .and_then(|input| registry.register(&input));

        match outcome {
            Ok(RegistrationOutcome::Registered { .. }) => summary.registered += 1,
            Ok(RegistrationOutcome::DuplicateDetected { .. }) => summary.duplicates += 1,
            Err(error) => {
                warn!(row = row_number, error = %error, "batch row rejected");
                summary.failures.push(RowFailure {
                    row: row_number,
                    error,
                });
            }
        }
    }

    info!(
        registered = summary.registered,
        duplicates = summary.duplicates,
        failed = summary.failures.len(),
        "batch registration finished"
    );
    summary
}

/// One line of a verification report.
#[derive(Debug)]
pub struct VerificationLine {
    /// 1-based position of the data row (headers excluded).
    pub row: usize,
    pub outcome: Result<VerificationOutcome>,
}

impl VerificationLine {
    /// `Yes`, `No`, `No (not in database)`, or `Error` for a row that
    /// could not be checked.
    pub fn status_label(&self) -> &'static str {
        match &self.outcome {
            Ok(outcome) => outcome.report_label(),
            Err(_) => "Error",
        }
    }
}

/// Verify every row, producing one report line per row.
pub fn verify_batch<I>(registry: &Registry, rows: I) -> Vec<VerificationLine>
where
    I: IntoIterator<Item = Result<BatchRow>>,
{
    let lines: Vec<VerificationLine> = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| VerificationLine {
            row: index + 1,
            outcome: row
                .and_then(BatchRow::into_input)
                .and_then(|input| registry.verify(&input)),
        })
        .collect();

    let failed = lines.iter().filter(|l| l.outcome.is_err()).count();
    info!(rows = lines.len(), failed, "batch verification finished");
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(first: &str, middle: &str, last: &str, dob: &str, address: &str) -> BatchRow {
        let opt = |v: &str| (!v.is_empty()).then(|| v.to_owned());
        BatchRow {
            first_name: opt(first),
            middle_initial: opt(middle),
            last_name: opt(last),
            dob: opt(dob),
            address: opt(address),
        }
    }

    #[test]
    fn missing_required_column_is_reported() {
        let result = row("Jane", "", "", "01-01-2000", "1 Main St").into_input();
        assert!(matches!(result, Err(HashForgeError::MissingField("last_name"))));
    }

    #[test]
    fn middle_initial_is_optional() {
        let input = row("Jane", "", "Public", "01-01-2000", "1 Main St")
            .into_input()
            .expect("valid row");
        assert_eq!(input.middle_initial, None);
    }

    #[test]
    fn error_label() {
        let line = VerificationLine {
            row: 1,
            outcome: Err(HashForgeError::InvalidDateFormat),
        };
        assert_eq!(line.status_label(), "Error");
    }

    #[test]
    fn debug_is_redacted() {
        let rendered = format!("{:?}", row("Jane", "Q", "Public", "01-01-2000", "1 Main St"));
        assert!(!rendered.contains("Jane"));
    }
}
