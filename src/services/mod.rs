//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the account directory and the upstream chat client so
//! route handlers can stay focused on protocol translation.

pub mod chat_proxy;
pub mod directory;
