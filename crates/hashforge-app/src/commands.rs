// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Operations shared by the subcommands and the interactive menu.  Each one
// prints its own result; errors are printed in plain English via
// `report_error` and never echo what the operator typed.

use std::path::Path;

use hashforge_core::error::{HashForgeError, Result};
use hashforge_core::human_errors::humanize_error;
use hashforge_core::types::{PersonalRecordInput, RegistrationOutcome};
use hashforge_registry::{Registry, register_batch, verify_batch};

use crate::csv_input;

/// Print a failed operation the way an operator should see it.
pub fn report_error(operation: &str, err: &HashForgeError) {
    eprint!("{}", describe_failure(operation, err));
    tracing::debug!(operation, error = %err, "operation failed");
}

/// Operator-facing text for a failed operation, one line per item.
pub fn describe_failure(operation: &str, err: &HashForgeError) -> String {
    let human = humanize_error(err);
    let mut text = format!(
        "{operation} failed ({}): {}\n  {}\n",
        human.severity.label(),
        human.message,
        human.suggestion
    );
    if human.retriable {
        text.push_str("  Repeating the operation may succeed.\n");
    }
    text
}

pub fn register_one(registry: &Registry, input: &PersonalRecordInput) -> Result<()> {
    match registry.register(input)? {
        RegistrationOutcome::Registered {
            initials,
            eligibility,
            ..
        } => println!(
            "Entry added for customer: {initials} (Age Verified: {})",
            eligibility.as_column()
        ),
        RegistrationOutcome::DuplicateDetected { existing_id } => {
            println!("Customer is already registered (entry {existing_id}); nothing was added.")
        }
    }
    Ok(())
}

pub fn verify_one(registry: &Registry, input: &PersonalRecordInput) -> Result<()> {
    let outcome = registry.verify(input)?;
    println!("Age Verified: {}", outcome.report_label());
    Ok(())
}

pub fn import_csv(registry: &Registry, path: &Path) -> Result<()> {
    let rows = csv_input::read_rows(path)?;
    let summary = register_batch(registry, rows);

    for failure in &summary.failures {
        report_error(&format!("Row {}", failure.row), &failure.error);
    }
    println!(
        "Imported {} row(s): {} added, {} already registered, {} rejected.",
        summary.rows_processed(),
        summary.registered,
        summary.duplicates,
        summary.failures.len()
    );
    Ok(())
}

pub fn check_csv(registry: &Registry, path: &Path) -> Result<()> {
    let rows = csv_input::read_rows(path)?;
    let lines = verify_batch(registry, rows);

    println!("\nVerification Results:");
    for line in &lines {
        match &line.outcome {
            Ok(_) => println!("Row {}: Age Verified = {}", line.row, line.status_label()),
            Err(e) => report_error(&format!("Row {}", line.row), e),
        }
    }
    Ok(())
}

pub fn list_records(registry: &Registry) -> Result<()> {
    let records = registry.records()?;
    println!("\nDatabase Entries:");
    for r in &records {
        println!(
            "ID: {}, Hash: {}, Salt: {}, Age Verified: {}, Initials: {}",
            r.id,
            r.digest,
            r.salt,
            r.eligibility.as_column(),
            r.initials
        );
    }
    println!("{} entr{} total.", records.len(), if records.len() == 1 { "y" } else { "ies" });
    Ok(())
}
