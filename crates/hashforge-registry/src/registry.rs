// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Registry — registration and verification over one record store session.
//
// The store sits behind a `Mutex` for the lifetime of the `Registry`.
// Registration holds the lock from the duplicate scan through the append,
// so two concurrent registrations of the same person cannot both pass the
// duplicate check.  Verification holds it for the scan, which makes every
// completed append visible to every later lookup.

use std::sync::{Mutex, MutexGuard};

use chrono::{NaiveDate, Utc};
use hashforge_core::config::HashForgeConfig;
use hashforge_core::error::{HashForgeError, Result};
use hashforge_core::types::{
    NewRecord, PersonalRecordInput, RegistrationOutcome, StoredRecord, VerificationOutcome,
};
use hashforge_security::{DigestEngine, EligibilityEvaluator, normalize};
use tracing::{info, instrument};

use crate::resolver::find_match;
use crate::store::RecordStore;

/// Registration and verification front door.
///
/// `Send + Sync`: share it behind an `Arc` if several threads register.
/// Operations are serialised on the store lock, which also bounds the
/// number of in-flight Argon2 derivations to one.
pub struct Registry {
    store: Mutex<RecordStore>,
    engine: DigestEngine,
    evaluator: EligibilityEvaluator,
}

impl Registry {
    /// Open the on-disk store named by `config`.
    pub fn open(config: &HashForgeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            RecordStore::open(&config.database_path)?,
            DigestEngine::new(&config.digest)?,
            EligibilityEvaluator::new(config.eligibility),
        ))
    }

    /// In-memory store with the digest and eligibility settings of
    /// `config`.  Paths in `config` are ignored.
    pub fn in_memory(config: &HashForgeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            RecordStore::open_in_memory()?,
            DigestEngine::new(&config.digest)?,
            EligibilityEvaluator::new(config.eligibility),
        ))
    }

    pub fn new(store: RecordStore, engine: DigestEngine, evaluator: EligibilityEvaluator) -> Self {
        Self {
            store: Mutex::new(store),
            engine,
            evaluator,
        }
    }

    /// Register a person as of today's UTC date.
    pub fn register(&self, input: &PersonalRecordInput) -> Result<RegistrationOutcome> {
        self.register_at(input, Utc::now().date_naive())
    }

    /// Register a person, evaluating eligibility as of `today`.
    ///
    /// Nothing is written when the input is invalid, when the person is
    /// already registered, or when any step fails.
    #[instrument(skip_all)]
    pub fn register_at(
        &self,
        input: &PersonalRecordInput,
        today: NaiveDate,
    ) -> Result<RegistrationOutcome> {
        let normalized = normalize(input)?;
        let key = normalized.key();

        let store = self.lock_store()?;
        let scan = find_match(&self.engine, &store.scan_all()?, key);
        if let Some(existing) = scan.matched {
            info!(
                existing_id = existing.id,
                initials = %existing.initials,
                "duplicate registration"
            );
            return Ok(RegistrationOutcome::DuplicateDetected {
                existing_id: existing.id,
            });
        }

        let salt = self.engine.new_salt()?;
        let digest = self.engine.derive(key, &salt)?;
        let eligibility = self.evaluator.evaluate_at(normalized.dob(), today);
        let initials = key.initials();

        let record_id = store.append(&NewRecord {
            digest,
            salt,
            eligibility,
            initials: initials.clone(),
        })?;
        drop(store);

        info!(
            record_id,
            initials = %initials,
            age_verified = eligibility.as_column(),
            rows_scanned = scan.rows_scanned,
            "registration stored"
        );
        Ok(RegistrationOutcome::Registered {
            record_id,
            initials,
            eligibility,
        })
    }

    /// Look a person up and report the eligibility stored at registration.
    #[instrument(skip_all)]
    pub fn verify(&self, input: &PersonalRecordInput) -> Result<VerificationOutcome> {
        let normalized = normalize(input)?;

        let records = self.lock_store()?.scan_all()?;
        let scan = find_match(&self.engine, &records, normalized.key());

        let outcome = match scan.matched {
            Some(record) => VerificationOutcome::Found {
                record_id: record.id,
                eligibility: record.eligibility,
            },
            None => VerificationOutcome::NotFound,
        };
        info!(
            outcome = outcome.report_label(),
            rows_scanned = scan.rows_scanned,
            corrupted_rows = scan.corrupted_rows,
            "verification complete"
        );
        Ok(outcome)
    }

    /// Every stored row, for the "view database" listing.
    pub fn records(&self) -> Result<Vec<StoredRecord>> {
        self.lock_store()?.scan_all()
    }

    /// Number of stored rows.
    pub fn count(&self) -> Result<u64> {
        self.lock_store()?.count()
    }

    fn lock_store(&self) -> Result<MutexGuard<'_, RecordStore>> {
        self.store
            .lock()
            .map_err(|_| HashForgeError::StorageUnavailable("record store lock poisoned".into()))
    }
}
