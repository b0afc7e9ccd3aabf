//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page installs the route guard for its own path, owns route-scoped
//! orchestration, and delegates shared chrome to `components`.

pub mod chat;
pub mod login;
pub mod users;
