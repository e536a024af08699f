// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argon2id password hashing in PHC string format.
//!
//! Signup stores only the PHC string; login re-derives and compares via the
//! constant-time verifier. The salt travels inside the PHC string, so no
//! separate salt column exists.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use arogya_core::ArogyaError;

/// Hash a password with Argon2id and a fresh random salt.
///
/// Returns the PHC string (`$argon2id$v=19$...`) to persist.
pub fn hash_password(password: &str) -> Result<String, ArogyaError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ArogyaError::Auth(format!("password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a password attempt against a stored PHC string.
///
/// Returns `false` for a mismatch; an error only for an unparseable stored
/// hash, which indicates a corrupted credential row rather than a bad login.
pub fn verify_password(password: &str, phc_hash: &str) -> Result<bool, ArogyaError> {
    let parsed = PasswordHash::new(phc_hash)
        .map_err(|e| ArogyaError::Auth(format!("stored hash is not a valid PHC string: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
