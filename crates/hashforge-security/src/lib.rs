// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! hashforge-security — the one-way half of HashForge.
//!
//! Canonicalises identifying fields, derives salted Argon2id digests from
//! them, and evaluates the age threshold.  Nothing in this crate stores or
//! logs the raw input.

pub mod digest;
pub mod eligibility;
pub mod normalize;

pub use digest::DigestEngine;
pub use eligibility::EligibilityEvaluator;
pub use normalize::{NormalizedRecord, normalize};
