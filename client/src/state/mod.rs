//! Reactive state containers provided through Leptos context.

pub mod chat;
pub mod session;
pub mod users;
