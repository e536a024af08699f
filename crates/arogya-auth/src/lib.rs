// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential primitives for the Arogya REST facade: Argon2id password
//! hashing and opaque login token issuance.

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password};
pub use token::issue_token;
