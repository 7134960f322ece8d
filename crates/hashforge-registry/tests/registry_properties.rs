// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end registration and verification behaviour over real SQLite files.

use std::path::Path;

use chrono::NaiveDate;
use hashforge_core::config::{DigestParams, HashForgeConfig};
use hashforge_core::error::HashForgeError;
use hashforge_core::types::{
    Eligibility, PersonalRecordInput, RegistrationOutcome, VerificationOutcome,
};
use hashforge_registry::{BatchRow, Registry, register_batch, verify_batch};

fn config_at(path: &Path) -> HashForgeConfig {
    HashForgeConfig {
        database_path: path.join("entries.db"),
        digest: DigestParams::for_tests(),
        ..HashForgeConfig::default()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn person(dob: &str) -> PersonalRecordInput {
    PersonalRecordInput::new("Jane", Some("Q"), "Public", dob, "1 Main St")
}

#[test]
fn eligibility_follows_age_at_registration() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = Registry::open(&config_at(dir.path())).expect("open registry");
    let today = date(2018, 1, 2);

    let adult = registry.register_at(&person("01-01-2000"), today).unwrap();
    let minor = registry.register_at(&person("01-01-2010"), today).unwrap();

    assert!(matches!(
        adult,
        RegistrationOutcome::Registered {
            eligibility: Eligibility::Eligible,
            ..
        }
    ));
    assert!(matches!(
        minor,
        RegistrationOutcome::Registered {
            eligibility: Eligibility::Ineligible,
            ..
        }
    ));
}

#[test]
fn duplicate_leaves_row_count_unchanged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = Registry::open(&config_at(dir.path())).expect("open registry");

    registry.register(&person("01-01-2000")).unwrap();
    let before = registry.count().unwrap();

    let same_person =
        PersonalRecordInput::new("  JANE", Some(" q "), "public ", "1-1-2000", "1 main st");
    let outcome = registry.register(&same_person).unwrap();

    assert!(matches!(outcome, RegistrationOutcome::DuplicateDetected { .. }));
    assert_eq!(registry.count().unwrap(), before);
}

#[test]
fn never_registered_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = Registry::open(&config_at(dir.path())).expect("open registry");

    let outcome = registry.verify(&person("01-01-2000")).unwrap();
    assert_eq!(outcome, VerificationOutcome::NotFound);
    assert_eq!(outcome.report_label(), "No (not in database)");
}

#[test]
fn registrations_survive_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_at(dir.path());
    {
        let registry = Registry::open(&config).expect("open registry");
        registry.register_at(&person("01-01-2010"), date(2020, 1, 1)).unwrap();
    }

    let registry = Registry::open(&config).expect("reopen registry");
    let outcome = registry.verify(&person("01-01-2010")).unwrap();
    assert!(matches!(
        outcome,
        VerificationOutcome::Found {
            eligibility: Eligibility::Ineligible,
            ..
        }
    ));
    assert_eq!(outcome.report_label(), "No");
}

#[test]
fn batch_with_one_bad_date_registers_the_rest() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = Registry::open(&config_at(dir.path())).expect("open registry");

    let rows = vec![
        Ok(BatchRow::from(person("01-01-2000"))),
        Ok(BatchRow::from(PersonalRecordInput::new(
            "John", None, "Smith", "1990-07-04", "12 Elm St",
        ))),
        Ok(BatchRow::from(PersonalRecordInput::new(
            "Ana", Some("M"), "Lopez", "03-15-1985", "9 Oak Ave",
        ))),
    ];
    let summary = register_batch(&registry, rows);

    assert_eq!(summary.registered, 2);
    assert_eq!(summary.duplicates, 0);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].row, 2);
    assert!(matches!(summary.failures[0].error, HashForgeError::InvalidDateFormat));
    assert_eq!(registry.count().unwrap(), 2);
}

#[test]
fn batch_reader_errors_are_per_row() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = Registry::open(&config_at(dir.path())).expect("open registry");

    let rows = vec![
        Err(HashForgeError::BatchInput("found record with 2 fields, expected 5".into())),
        Ok(BatchRow::from(person("01-01-2000"))),
        Ok(BatchRow::from(person("01-01-2000"))),
    ];
    let summary = register_batch(&registry, rows);

    assert_eq!(summary.registered, 1);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.rows_processed(), 3);
}

#[test]
fn verification_report_labels() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = Registry::open(&config_at(dir.path())).expect("open registry");
    let today = date(2024, 6, 1);
    registry.register_at(&person("01-01-2000"), today).unwrap();
    registry.register_at(&person("01-01-2012"), today).unwrap();

    let lines = verify_batch(
        &registry,
        vec![
            Ok(BatchRow::from(person("01-01-2000"))),
            Ok(BatchRow::from(person("01-01-2012"))),
            Ok(BatchRow::from(person("01-01-1970"))),
            Ok(BatchRow::from(person("not a date"))),
        ],
    );

    let labels: Vec<&str> = lines.iter().map(|l| l.status_label()).collect();
    assert_eq!(labels, ["Yes", "No", "No (not in database)", "Error"]);
}

#[test]
fn stored_rows_contain_no_raw_pii() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = Registry::open(&config_at(dir.path())).expect("open registry");
    let input = PersonalRecordInput::new(
        "Bartholomew",
        Some("K"),
        "Featherstone",
        "08-23-1977",
        "742 Evergreen Terrace",
    );
    registry.register(&input).unwrap();

    let fragments = [
        "Bartholomew",
        "Featherstone",
        "08-23-1977",
        "Evergreen",
        "Terrace",
        "742 ",
    ];
    for record in registry.records().unwrap() {
        assert_eq!(record.initials, "BKF");
        for field in [&record.digest, &record.salt, &record.initials] {
            for fragment in fragments {
                assert!(
                    !field.to_lowercase().contains(&fragment.to_lowercase()),
                    "stored field leaks {fragment}"
                );
            }
        }
    }
}

#[test]
fn corrupted_row_is_skipped_during_lookup() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_at(dir.path());
    let registry = Registry::open(&config).expect("open registry");

    let conn = rusqlite::Connection::open(&config.database_path).expect("raw connection");
    conn.execute(
        "INSERT INTO entries (hash, salt, age_verified, initials)
         VALUES ('not-a-digest', 'abcd', 'Yes', 'XXX')",
        [],
    )
    .expect("insert corrupted row");
    drop(conn);

    registry.register(&person("01-01-2000")).unwrap();
    assert!(matches!(
        registry.verify(&person("01-01-2000")).unwrap(),
        VerificationOutcome::Found { .. }
    ));
    assert_eq!(
        registry.verify(&person("02-02-2002")).unwrap(),
        VerificationOutcome::NotFound
    );
}

#[test]
fn concurrent_registrations_of_one_person_store_one_row() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = Registry::open(&config_at(dir.path())).expect("open registry");
    let shared = &registry;

    let outcomes: Vec<RegistrationOutcome> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || shared.register(&person("01-01-2000")).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let stored = outcomes
        .iter()
        .filter(|o| matches!(o, RegistrationOutcome::Registered { .. }))
        .count();
    assert_eq!(stored, 1);
    assert_eq!(registry.count().unwrap(), 1);
}

#[test]
fn failed_append_writes_nothing_and_session_continues() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_at(dir.path());
    let registry = Registry::open(&config).expect("open registry");
    registry.register(&person("01-01-2000")).unwrap();

    // Reads keep working; only the INSERT after the duplicate scan fails.
    let conn = rusqlite::Connection::open(&config.database_path).expect("raw connection");
    conn.execute_batch(
        "CREATE TRIGGER reject_inserts BEFORE INSERT ON entries
         BEGIN SELECT RAISE(ABORT, 'entries are read-only'); END;",
    )
    .expect("create trigger");

    let result = registry.register(&person("02-02-2002"));
    assert!(matches!(result, Err(HashForgeError::StorageUnavailable(_))));
    assert_eq!(registry.count().unwrap(), 1);
    assert_eq!(
        registry.verify(&person("02-02-2002")).unwrap(),
        VerificationOutcome::NotFound
    );

    conn.execute_batch("DROP TRIGGER reject_inserts").expect("drop trigger");
    drop(conn);

    let retried = registry.register(&person("02-02-2002")).unwrap();
    assert!(matches!(retried, RegistrationOutcome::Registered { .. }));
    assert_eq!(registry.count().unwrap(), 2);
}
