// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Duplicate resolver — linear probe of every stored digest.
//
// A salted digest cannot be indexed, so each lookup re-derives the digest
// once per stored row: O(n) Argon2 derivations per registration or
// verification.  This is the throughput ceiling of the registry.

use hashforge_core::types::{CanonicalKey, StoredRecord};
use hashforge_security::DigestEngine;
use tracing::{debug, warn};

/// Outcome of probing a snapshot of the record table.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// First row whose digest the key reproduces.
    pub matched: Option<StoredRecord>,
    /// Rows actually probed before stopping.
    pub rows_scanned: usize,
    /// Rows skipped because their stored digest was malformed or claimed
    /// costs above the engine's ceilings.
    pub corrupted_rows: usize,
}

/// Probe `records` in order and return the first one `key` matches.
///
/// "No match" is only reported after every row has been tried.  A row with
/// a malformed digest is logged and skipped; it never aborts the scan.
pub fn find_match(
    engine: &DigestEngine,
    records: &[StoredRecord],
    key: &CanonicalKey,
) -> ScanResult {
    let mut result = ScanResult::default();

    for record in records {
        result.rows_scanned += 1;
        match engine.verify(key, &record.salt, &record.digest) {
            Ok(true) => {
                debug!(
                    record_id = record.id,
                    rows_scanned = result.rows_scanned,
                    "match found"
                );
                result.matched = Some(record.clone());
                return result;
            }
            Ok(false) => {}
            Err(e) => {
                warn!(record_id = record.id, error = %e, "skipping corrupted row");
                result.corrupted_rows += 1;
            }
        }
    }

    debug!(
        rows_scanned = result.rows_scanned,
        corrupted = result.corrupted_rows,
        "no match"
    );
    result
}

/// Convenience wrapper returning only the duplicate, if any.
pub fn find_duplicate(
    engine: &DigestEngine,
    records: &[StoredRecord],
    key: &CanonicalKey,
) -> Option<StoredRecord> {
    find_match(engine, records, key).matched
}
