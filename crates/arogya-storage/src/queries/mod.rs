// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules. All functions accept `&Database` and run through
//! the single-writer connection.

pub mod chats;
pub mod tokens;
pub mod users;
