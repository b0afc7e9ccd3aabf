//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared page chrome while reading the session from
//! Leptos context providers.

pub mod app_header;
