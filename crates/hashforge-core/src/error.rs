// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for HashForge.
//
// Messages name the operation and the field or row involved, never the
// submitted values themselves.

use thiserror::Error;

/// Top-level error type for all HashForge operations.
///
/// A duplicate registration and an unknown person on verification are not
/// errors; see `RegistrationOutcome` and `VerificationOutcome`.
#[derive(Debug, Error)]
pub enum HashForgeError {
    // -- Input errors --
    #[error("date of birth is not a valid MM-DD-YYYY date")]
    InvalidDateFormat,

    #[error("required field `{0}` is missing or blank")]
    MissingField(&'static str),

    #[error("field `{0}` contains the reserved `|` delimiter")]
    InvalidField(&'static str),

    // -- Digest engine --
    #[error("digest engine error: {0}")]
    DigestEngine(String),

    #[error("salt generation failed: {0}")]
    SaltGeneration(String),

    // -- Storage / persistence --
    #[error("record store unavailable: {0}")]
    StorageUnavailable(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("batch input error: {0}")]
    BatchInput(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, HashForgeError>;
