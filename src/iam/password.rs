// This file is part of the product LexHub.
// SPDX-FileCopyrightText: 2026 LexHub Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, Version};

#[derive(Debug)]
pub enum PasswordError {
    HashError(String),
}

impl std::fmt::Display for PasswordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PasswordError::HashError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PasswordError {}

fn argon2() -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default())
}

/// Hash a plaintext password with a fresh random salt. Two calls on the
/// same input produce different digests; both verify. Accepts any
/// well-formed string, including the empty string — length policy is the
/// validation layer's job, not the hasher's.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| PasswordError::HashError(err.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC digest. The comparison
/// is constant-time inside the verifier. Malformed digests verify as false
/// rather than erroring, so the login path stays uniform.
pub fn verify_password(password: &str, digest: &str) -> bool {
    let parsed = match PasswordHash::new(digest) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };
    argon2().verify_password(password.as_bytes(), &parsed).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_round_trips() {
        let digest = hash_password("secret123").expect("hash");
        assert!(verify_password("secret123", &digest));
        assert!(!verify_password("secret124", &digest));
    }

    #[test]
    fn hash_is_salted_per_call() {
        let first = hash_password("secret123").expect("hash");
        let second = hash_password("secret123").expect("hash");
        assert_ne!(first, second);
        assert!(verify_password("secret123", &first));
        assert!(verify_password("secret123", &second));
    }

    #[test]
    fn empty_password_hashes_and_verifies() {
        let digest = hash_password("").expect("hash");
        assert!(verify_password("", &digest));
        assert!(!verify_password("x", &digest));
    }

    #[test]
    fn malformed_digest_verifies_false() {
        assert!(!verify_password("secret123", "not-a-digest"));
        assert!(!verify_password("secret123", ""));
        assert!(!verify_password("secret123", "$argon2id$v=19$broken"));
    }
}
