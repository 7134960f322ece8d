// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Eligibility evaluator — age threshold at registration time.
//
// The flag is computed once and stored.  Verification reports the stored
// value and never calls back into this module.

use chrono::{Datelike, NaiveDate, Utc};
use hashforge_core::config::{AgeRule, EligibilityPolicy};
use hashforge_core::types::Eligibility;

/// Applies an `EligibilityPolicy` to normalised dates of birth.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityEvaluator {
    policy: EligibilityPolicy,
}

impl EligibilityEvaluator {
    pub fn new(policy: EligibilityPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> EligibilityPolicy {
        self.policy
    }

    /// Evaluate against today's UTC date.
    pub fn evaluate(&self, dob: NaiveDate) -> Eligibility {
        self.evaluate_at(dob, Utc::now().date_naive())
    }

    /// Evaluate as of `today`.  A date of birth in the future is never
    /// eligible.
    pub fn evaluate_at(&self, dob: NaiveDate, today: NaiveDate) -> Eligibility {
        let age = match self.policy.age_rule {
            AgeRule::Calendar => calendar_age(dob, today),
            AgeRule::ElapsedDays365 => (today - dob).num_days().div_euclid(365),
        };
        Eligibility::from_bool(age >= i64::from(self.policy.minimum_age))
    }
}

/// Whole years between `dob` and `today`, counting the birthday itself.
/// People born on 29 February turn a year older on 1 March in common years.
pub fn calendar_age(dob: NaiveDate, today: NaiveDate) -> i64 {
    let mut years = i64::from(today.year() - dob.year());
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    years
}
