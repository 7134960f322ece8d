// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Digest engine — salted Argon2id digests of canonical keys.
//
// Each digest is a PHC string (`$argon2id$v=19$m=..,t=..,p=..$salt$hash`),
// so the cost parameters travel with the row and old rows keep verifying
// after the configured costs change.  The digest input is the canonical key
// followed by the hex salt stored alongside it; the raw salt bytes also
// serve as the Argon2 salt.
//
// Stored rows are untrusted: a digest claiming costs above the configured
// ceilings is rejected before any memory is reserved for it.

use argon2::password_hash::{
    Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use hashforge_core::config::DigestParams;
use hashforge_core::error::{HashForgeError, Result};
use hashforge_core::types::CanonicalKey;
use ring::rand::{SecureRandom, SystemRandom};
use tracing::{debug, instrument};

/// Derives and verifies one-way digests of canonical keys.
///
/// Every derivation reserves `memory_kib` of memory for its duration;
/// callers that run derivations in parallel must bound how many are in
/// flight.
pub struct DigestEngine {
    argon2: Argon2<'static>,
    salt_len: usize,
    ceiling: CostCeiling,
    rng: SystemRandom,
}

/// Upper bounds on the costs a stored digest may claim.
#[derive(Debug, Clone, Copy)]
struct CostCeiling {
    memory_kib: u32,
    time_cost: u32,
    parallelism: u32,
}

impl CostCeiling {
    fn check(&self, claimed: &Params) -> Result<()> {
        if claimed.m_cost() > self.memory_kib
            || claimed.t_cost() > self.time_cost
            || claimed.p_cost() > self.parallelism
        {
            return Err(HashForgeError::DigestEngine(format!(
                "stored digest claims m={},t={},p={}, above the accepted m={},t={},p={}",
                claimed.m_cost(),
                claimed.t_cost(),
                claimed.p_cost(),
                self.memory_kib,
                self.time_cost,
                self.parallelism
            )));
        }
        Ok(())
    }
}

impl DigestEngine {
    /// Build an engine for the given cost parameters.
    pub fn new(params: &DigestParams) -> Result<Self> {
        params.validate()?;
        let argon_params = Params::new(
            params.memory_kib,
            params.time_cost,
            params.parallelism,
            Some(params.output_len),
        )
        .map_err(|e| HashForgeError::InvalidConfig(format!("argon2 parameters: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params),
            salt_len: params.salt_len,
            ceiling: CostCeiling {
                memory_kib: params.max_memory_kib,
                time_cost: params.max_time_cost,
                parallelism: params.max_parallelism,
            },
            rng: SystemRandom::new(),
        })
    }

    /// Generate a fresh hex-encoded salt from the OS random source.
    pub fn new_salt(&self) -> Result<String> {
        let mut bytes = vec![0u8; self.salt_len];
        self.rng
            .fill(&mut bytes)
            .map_err(|_| HashForgeError::SaltGeneration("system random source failed".into()))?;
        Ok(hex::encode(bytes))
    }

    /// Derive the PHC-encoded digest of `key` under `salt`.
    ///
    /// Deterministic for a given key, salt, and parameter set.
    #[instrument(skip_all, level = "debug")]
    pub fn derive(&self, key: &CanonicalKey, salt: &str) -> Result<String> {
        let salt_bytes = hex::decode(salt)
            .map_err(|e| HashForgeError::DigestEngine(format!("salt is not hex: {e}")))?;
        let phc_salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| HashForgeError::DigestEngine(format!("salt encoding: {e}")))?;

        let input = digest_input(key, salt);
        let digest = self
            .argon2
            .hash_password(input.as_bytes(), &phc_salt)
            .map_err(|e| HashForgeError::DigestEngine(format!("argon2 derivation: {e}")))?
            .to_string();

        debug!(digest_len = digest.len(), "digest derived");
        Ok(digest)
    }

    /// Check whether `key` under `salt` reproduces `stored_digest`.
    ///
    /// Recomputes with the parameters embedded in the stored PHC string; the
    /// final comparison is constant-time.  A mismatch is `Ok(false)`.  A
    /// malformed stored digest, or one whose costs exceed the ceilings, is an
    /// error and is never recomputed.
    pub fn verify(&self, key: &CanonicalKey, salt: &str, stored_digest: &str) -> Result<bool> {
        let parsed = PasswordHash::new(stored_digest)
            .map_err(|e| HashForgeError::DigestEngine(format!("malformed stored digest: {e}")))?;
        if parsed.salt.is_none() || parsed.hash.is_none() {
            return Err(HashForgeError::DigestEngine(
                "stored digest has no salt or hash segment".into(),
            ));
        }
        let claimed = Params::try_from(&parsed)
            .map_err(|e| HashForgeError::DigestEngine(format!("stored digest parameters: {e}")))?;
        self.ceiling.check(&claimed)?;

        let input = digest_input(key, salt);
        match self.argon2.verify_password(input.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(HashForgeError::DigestEngine(format!(
                "stored digest cannot be recomputed: {e}"
            ))),
        }
    }
}

fn digest_input(key: &CanonicalKey, salt: &str) -> String {
    let mut input = String::with_capacity(key.as_str().len() + salt.len());
    input.push_str(key.as_str());
    input.push_str(salt);
    input
}
