//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the in-memory account directory and the upstream chat client.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::services::chat_proxy::ChatProxy;
use crate::services::directory::UserDirectory;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<RwLock<UserDirectory>>,
    pub chat: ChatProxy,
}

impl AppState {
    #[must_use]
    pub fn new(directory: UserDirectory, chat: ChatProxy) -> Self {
        Self { directory: Arc::new(RwLock::new(directory)), chat }
    }
}
