// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// CSV batch input.
//
// Expected headers: First Name, Middle Initial (optional), Last Name, DOB,
// Address.  A row that cannot be parsed becomes a per-row error; error text
// is built from the error kind so it never repeats cell contents.

use std::path::Path;

use hashforge_core::error::{HashForgeError, Result};
use hashforge_registry::BatchRow;

/// Read every data row of `path`.  Only failing to open the file is fatal.
pub fn read_rows(path: &Path) -> Result<Vec<Result<BatchRow>>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|e| {
            HashForgeError::BatchInput(format!("cannot open CSV file: {}", describe(&e)))
        })?;

    Ok(reader
        .deserialize::<BatchRow>()
        .map(|row| row.map_err(|e| HashForgeError::BatchInput(describe(&e))))
        .collect())
}

fn describe(err: &csv::Error) -> String {
    match err.kind() {
        csv::ErrorKind::Io(io) => format!("read error: {io}"),
        csv::ErrorKind::Utf8 { .. } => "row is not valid UTF-8".into(),
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("row has {len} fields, expected {expected_len}"),
        _ => "row could not be parsed".into(),
    }
}
