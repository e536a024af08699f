// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opaque login token issuance.
//!
//! Login hands out a random bearer token that the gateway stores alongside
//! the owning email; every chat route resolves the token back to an identity
//! instead of trusting a path parameter.

/// Generates a fresh opaque login token.
pub fn issue_token() -> String {
    uuid::Uuid::new_v4().to_string()
}
