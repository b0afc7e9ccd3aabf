//! Shared wire DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! The host server depends on this crate (with `ssr`) and serializes these
//! exact types, so the JSON shapes below are the REST contract. `ChatEvent`
//! mirrors the `data:` payloads emitted by the upstream QA service.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Authorization level of an account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Parse the lowercase wire name. Unknown names yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "admin" => Some(Self::Admin),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

/// An account as seen by the shell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Numeric account id. Clock-derived for accounts added at runtime.
    pub id: i64,
    pub username: String,
    pub role: Role,
    /// `YYYY-MM-DD HH:MM:SS` creation stamp. Absent in login responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Caller-supplied account fields for add/update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub username: String,
    #[serde(default)]
    pub role: Role,
    /// Only sent to the server; never echoed back inside a `User`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserDraft {
    /// Merge the draft with an id, dropping the password.
    #[must_use]
    pub fn into_user(self, id: i64) -> User {
        User { id, username: self.username, role: self.role, created_time: None }
    }
}

/// Body of `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Envelope returned by the login and user mutation endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `POST /api/chat/sse`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

/// One decoded event from the chat stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChatEvent {
    /// The upstream accepted the question and began answering.
    Start {
        #[serde(default)]
        timestamp: Option<f64>,
    },
    /// An incremental slice of the answer.
    Content { content: String },
    /// The answer finished; `complete_response` carries the full text.
    End {
        #[serde(default)]
        complete_response: String,
        #[serde(default)]
        timestamp: Option<f64>,
    },
    /// The upstream failed mid-stream.
    Error { error: String },
}

impl ChatEvent {
    /// Whether no further events follow this one.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::End { .. } | Self::Error { .. })
    }
}
