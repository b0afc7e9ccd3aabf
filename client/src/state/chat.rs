//! Transcript state for the chat page.
//!
//! DESIGN
//! ======
//! One question produces a user message plus an assistant message that is
//! filled in as stream events arrive. Only the newest assistant message is
//! ever written to, so events from a finished answer cannot leak into it.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::net::types::ChatEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
    Error,
}

/// A single transcript entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self { id: uuid::Uuid::new_v4().to_string(), role, content: content.into() }
    }
}

/// State for the chat page.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    /// An answer is streaming; new questions are blocked.
    pub loading: bool,
}

impl ChatState {
    /// Record a new question and open an empty answer for it.
    pub fn begin(&mut self, question: &str) {
        self.messages.push(ChatMessage::new(ChatRole::User, question));
        self.messages.push(ChatMessage::new(ChatRole::Assistant, String::new()));
        self.loading = true;
    }

    /// Fold one stream event into the open answer.
    pub fn apply(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::Start { .. } => {}
            ChatEvent::Content { content } => {
                if let Some(answer) = self.open_answer() {
                    answer.content.push_str(&content);
                }
            }
            ChatEvent::End { complete_response, .. } => {
                if !complete_response.is_empty() {
                    if let Some(answer) = self.open_answer() {
                        answer.content = complete_response;
                    }
                }
                self.loading = false;
            }
            ChatEvent::Error { error } => self.fail(&error),
        }
    }

    /// Close the open answer with an error entry.
    pub fn fail(&mut self, message: &str) {
        self.drop_empty_answer();
        self.messages.push(ChatMessage::new(ChatRole::Error, message));
        self.loading = false;
    }

    /// Mark the stream finished even if no `end` event arrived.
    pub fn finish(&mut self) {
        if self.loading {
            self.drop_empty_answer();
            self.loading = false;
        }
    }

    fn open_answer(&mut self) -> Option<&mut ChatMessage> {
        if !self.loading {
            return None;
        }
        self.messages.last_mut().filter(|m| m.role == ChatRole::Assistant)
    }

    fn drop_empty_answer(&mut self) {
        if self.messages.last().is_some_and(|m| m.role == ChatRole::Assistant && m.content.is_empty()) {
            self.messages.pop();
        }
    }
}
