// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! REST facade for Arogya accounts and chat history.
//!
//! Serves signup, login, and the chat transcript store over HTTP. Login
//! issues an opaque bearer token; the chat routes resolve it back to an
//! identity and scope every read and delete to that owner.

pub mod auth;
pub mod handlers;
pub mod server;

pub use server::{GatewayState, ServerConfig, build_router, start_server};
