// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Registry configuration.
//
// Passed explicitly into the digest engine and record store constructors so
// tests can inject cheap digest parameters without touching the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HashForgeError, Result};

/// Smallest accepted per-record salt, in bytes.
pub const MIN_SALT_LEN: usize = 16;
/// Largest salt that still fits a PHC salt field once base64-encoded.
pub const MAX_SALT_LEN: usize = 48;

/// Persistent registry settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashForgeConfig {
    /// SQLite file holding the `entries` table.
    pub database_path: PathBuf,
    /// Argon2id cost parameters for new digests.
    pub digest: DigestParams,
    /// Age threshold applied at registration.
    pub eligibility: EligibilityPolicy,
}

impl Default for HashForgeConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("secure_database.db"),
            digest: DigestParams::default(),
            eligibility: EligibilityPolicy::default(),
        }
    }
}

impl HashForgeConfig {
    /// Read a JSON config file. Missing keys fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Write this config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.digest.validate()?;
        if self.eligibility.minimum_age == 0 {
            return Err(HashForgeError::InvalidConfig(
                "eligibility.minimum_age must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Argon2id cost parameters. Recorded inside every digest's PHC string, so
/// changing them only affects digests created afterwards.
///
/// The `max_*` fields bound the costs a stored digest may claim.  Rows above
/// them are treated as corrupted instead of being recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestParams {
    /// Memory cost in KiB (each derivation reserves this much).
    pub memory_kib: u32,
    /// Number of passes.
    pub time_cost: u32,
    /// Lanes of parallelism.
    pub parallelism: u32,
    /// Digest output length in bytes.
    pub output_len: usize,
    /// Random salt length in bytes.
    pub salt_len: usize,
    /// Largest memory cost accepted from a stored digest, in KiB.
    pub max_memory_kib: u32,
    /// Largest pass count accepted from a stored digest.
    pub max_time_cost: u32,
    /// Largest lane count accepted from a stored digest.
    pub max_parallelism: u32,
}

impl Default for DigestParams {
    fn default() -> Self {
        Self {
            memory_kib: 65536,
            time_cost: 3,
            parallelism: 4,
            output_len: 32,
            salt_len: 16,
            max_memory_kib: 262_144,
            max_time_cost: 12,
            max_parallelism: 16,
        }
    }
}

impl DigestParams {
    /// Minimal-cost parameters for unit tests and benchmarks.
    pub fn for_tests() -> Self {
        Self {
            memory_kib: 64,
            time_cost: 1,
            parallelism: 1,
            output_len: 32,
            salt_len: 16,
            max_memory_kib: 1024,
            max_time_cost: 4,
            max_parallelism: 4,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(HashForgeError::InvalidConfig(msg));
        if self.time_cost == 0 {
            return invalid("digest.time_cost must be at least 1".into());
        }
        if self.parallelism == 0 {
            return invalid("digest.parallelism must be at least 1".into());
        }
        if self.memory_kib < 8 * self.parallelism {
            return invalid(format!(
                "digest.memory_kib must be at least {} for parallelism {}",
                8 * self.parallelism,
                self.parallelism
            ));
        }
        if !(16..=64).contains(&self.output_len) {
            return invalid("digest.output_len must be between 16 and 64 bytes".into());
        }
        if !(MIN_SALT_LEN..=MAX_SALT_LEN).contains(&self.salt_len) {
            return invalid(format!(
                "digest.salt_len must be between {MIN_SALT_LEN} and {MAX_SALT_LEN} bytes"
            ));
        }
        if self.max_memory_kib < self.memory_kib
            || self.max_time_cost < self.time_cost
            || self.max_parallelism < self.parallelism
        {
            return invalid("digest ceilings must not be below the configured costs".into());
        }
        Ok(())
    }
}

/// How elapsed years are counted between birth and registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeRule {
    /// Whole calendar years; the birthday itself counts.
    Calendar,
    /// `elapsed_days / 365`, as older registries computed it. Drifts by a
    /// few days per decade around birthdays because of leap years.
    ElapsedDays365,
}

/// Age threshold applied when a person registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityPolicy {
    pub minimum_age: u32,
    pub age_rule: AgeRule,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            minimum_age: 18,
            age_rule: AgeRule::Calendar,
        }
    }
}
