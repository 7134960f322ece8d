// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HashForge Registry — the SQLite record store, duplicate resolution, and
// the registration/verification flows built on `hashforge-security`.

pub mod batch;
pub mod registry;
pub mod resolver;
pub mod store;

pub use batch::{BatchRow, BatchSummary, RowFailure, VerificationLine, register_batch, verify_batch};
pub use registry::Registry;
pub use store::RecordStore;
