//! Canned in-browser backend.
//!
//! DESIGN
//! ======
//! Every operation waits a fixed latency (500 ms by default) and then answers
//! from a two-account seed list or echoes its input. Nothing is ever written
//! back: deleting or updating an account leaves `list_users` unchanged.
//!
//! TRADE-OFFS
//! ==========
//! Added accounts take their id from the wall clock in milliseconds, so two
//! adds within the same millisecond collide. The seed list is never consulted
//! for duplicates.

#[cfg(test)]
#[path = "mock_test.rs"]
mod mock_test;

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;

use super::api::{ApiClient, ApiError, ChatStream};
use super::sse::until_terminal;
use super::types::{ChatEvent, Role, User, UserDraft};
use crate::util::time;

/// Simulated round-trip time for every mock operation.
pub const MOCK_LATENCY: Duration = Duration::from_millis(500);

struct SeedAccount {
    id: i64,
    username: &'static str,
    password: &'static str,
    role: Role,
    created_time: &'static str,
}

const SEED_ACCOUNTS: [SeedAccount; 2] = [
    SeedAccount { id: 1, username: "cqk", password: "123456", role: Role::Admin, created_time: "2025-11-30 10:15:40" },
    SeedAccount { id: 2, username: "lyy", password: "123456", role: Role::User, created_time: "2025-11-30 10:16:04" },
];

/// Test double and offline backend for the shell.
#[derive(Clone, Debug)]
pub struct MockApiClient {
    latency: Duration,
    chat_script: Option<Arc<Vec<ChatEvent>>>,
}

impl Default for MockApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockApiClient {
    #[must_use]
    pub fn new() -> Self {
        Self { latency: MOCK_LATENCY, chat_script: None }
    }

    /// Override the simulated latency (zero disables the delay).
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Replay `events` for every question instead of the default echo answer.
    #[must_use]
    pub fn with_chat_script(mut self, events: Vec<ChatEvent>) -> Self {
        self.chat_script = Some(Arc::new(events));
        self
    }

    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }

    fn echo_script(question: &str) -> Vec<ChatEvent> {
        let answer = format!("(offline) You asked: {question}");
        vec![
            ChatEvent::Start { timestamp: None },
            ChatEvent::Content { content: answer.clone() },
            ChatEvent::End { complete_response: answer, timestamp: None },
        ]
    }
}

fn seed_users() -> Vec<User> {
    SEED_ACCOUNTS
        .iter()
        .map(|seed| User {
            id: seed.id,
            username: seed.username.to_owned(),
            role: seed.role,
            created_time: Some(seed.created_time.to_owned()),
        })
        .collect()
}

impl ApiClient for MockApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        time::sleep(self.latency).await;
        SEED_ACCOUNTS
            .iter()
            .find(|seed| seed.username == username && seed.password == password)
            .map(|seed| User { id: seed.id, username: seed.username.to_owned(), role: seed.role, created_time: None })
            .ok_or(ApiError::InvalidCredentials)
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        time::sleep(self.latency).await;
        Ok(seed_users())
    }

    async fn add_user(&self, draft: UserDraft) -> Result<User, ApiError> {
        time::sleep(self.latency).await;
        Ok(draft.into_user(time::now_millis()))
    }

    async fn delete_user(&self, user_id: i64) -> Result<(), ApiError> {
        time::sleep(self.latency).await;
        log::debug!("mock delete of user {user_id} (seed list unchanged)");
        Ok(())
    }

    async fn update_user(&self, user_id: i64, draft: UserDraft) -> Result<User, ApiError> {
        time::sleep(self.latency).await;
        Ok(draft.into_user(user_id))
    }

    async fn chat_stream(&self, question: &str) -> Result<ChatStream, ApiError> {
        time::sleep(self.latency).await;
        let events = match &self.chat_script {
            Some(script) => script.as_ref().clone(),
            None => Self::echo_script(question),
        };
        Ok(until_terminal(futures::stream::iter(events.into_iter().map(Ok))).boxed_local())
    }
}
