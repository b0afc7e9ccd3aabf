//! In-memory account directory behind the user endpoints.
//!
//! DESIGN
//! ======
//! Seeded with the two built-in accounts on startup and mutated in place by
//! the REST handlers. Nothing is persisted; a restart restores the seed.
//! Passwords are kept only as SHA-256 hex digests.

#[cfg(test)]
#[path = "directory_test.rs"]
mod directory_test;

use client::net::types::{Role, User, UserDraft};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const CREATED_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Built-in accounts: `(id, username, password, role, created_time)`.
const SEED: [(i64, &str, &str, Role, &str); 2] = [
    (1, "cqk", "123456", Role::Admin, "2025-11-30 10:15:40"),
    (2, "lyy", "123456", Role::User, "2025-11-30 10:16:04"),
];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("user {0} not found")]
    NotFound(i64),

    #[error("username {0:?} is already taken")]
    DuplicateUsername(String),

    #[error("username must not be empty")]
    EmptyUsername,

    #[error("password must not be empty")]
    MissingPassword,
}

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password_hash: String,
}

/// Hex-encoded SHA-256 of a password.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    let bytes = hasher.finalize();
    bytes.iter().map(|b| format!("{b:02x}")).collect::<String>()
}

/// Creation stamp in the `YYYY-MM-DD HH:MM:SS` shape used by the seed data.
#[must_use]
pub fn format_created_time(at: OffsetDateTime) -> String {
    at.format(CREATED_TIME_FORMAT).unwrap_or_default()
}

#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    accounts: Vec<Account>,
}

impl UserDirectory {
    /// Directory holding only the built-in accounts.
    #[must_use]
    pub fn seeded() -> Self {
        let accounts = SEED
            .iter()
            .map(|&(id, username, password, role, created)| Account {
                user: User { id, username: username.to_owned(), role, created_time: Some(created.to_owned()) },
                password_hash: hash_password(password),
            })
            .collect();
        Self { accounts }
    }

    /// Match credentials. The returned user carries no `created_time`, the
    /// same shape the login endpoint has always answered with.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::InvalidCredentials`] when no account matches.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<User, DirectoryError> {
        let digest = hash_password(password);
        self.accounts
            .iter()
            .find(|a| a.user.username == username && a.password_hash == digest)
            .map(|a| User { created_time: None, ..a.user.clone() })
            .ok_or(DirectoryError::InvalidCredentials)
    }

    #[must_use]
    pub fn list(&self) -> Vec<User> {
        self.accounts.iter().map(|a| a.user.clone()).collect()
    }

    #[must_use]
    pub fn get(&self, user_id: i64) -> Option<&User> {
        self.accounts.iter().map(|a| &a.user).find(|u| u.id == user_id)
    }

    /// Create an account stamped with `now`. The id is `now` in milliseconds,
    /// bumped past the highest existing id on collision.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::EmptyUsername`], [`DirectoryError::DuplicateUsername`],
    /// or [`DirectoryError::MissingPassword`] when the draft has no password.
    pub fn add(&mut self, draft: UserDraft, now: OffsetDateTime) -> Result<User, DirectoryError> {
        let username = self.checked_username(&draft.username, None)?;
        let password = draft.password.as_deref().filter(|p| !p.is_empty()).ok_or(DirectoryError::MissingPassword)?;
        let password_hash = hash_password(password);
        let now_ms = i64::try_from(now.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX);
        let max_id = self.accounts.iter().map(|a| a.user.id).max().unwrap_or(0);
        let id = if now_ms > max_id { now_ms } else { max_id.saturating_add(1) };

        let user = User { id, username, role: draft.role, created_time: Some(format_created_time(now)) };
        self.accounts.push(Account { user: user.clone(), password_hash });
        Ok(user)
    }

    /// Replace username and role of `user_id`; the password changes only when
    /// the draft carries a non-empty one. The creation stamp is kept.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::NotFound`], [`DirectoryError::EmptyUsername`], or
    /// [`DirectoryError::DuplicateUsername`].
    pub fn update(&mut self, user_id: i64, draft: UserDraft) -> Result<User, DirectoryError> {
        if self.get(user_id).is_none() {
            return Err(DirectoryError::NotFound(user_id));
        }
        let username = self.checked_username(&draft.username, Some(user_id))?;
        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.user.id == user_id)
            .ok_or(DirectoryError::NotFound(user_id))?;
        account.user.username = username;
        account.user.role = draft.role;
        if let Some(password) = draft.password.as_deref().filter(|p| !p.is_empty()) {
            account.password_hash = hash_password(password);
        }
        Ok(account.user.clone())
    }

    /// Remove `user_id`.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::NotFound`] when no such account exists.
    pub fn delete(&mut self, user_id: i64) -> Result<User, DirectoryError> {
        let index = self
            .accounts
            .iter()
            .position(|a| a.user.id == user_id)
            .ok_or(DirectoryError::NotFound(user_id))?;
        Ok(self.accounts.remove(index).user)
    }

    fn checked_username(&self, raw: &str, except_id: Option<i64>) -> Result<String, DirectoryError> {
        let username = raw.trim();
        if username.is_empty() {
            return Err(DirectoryError::EmptyUsername);
        }
        let taken = self
            .accounts
            .iter()
            .any(|a| a.user.username == username && Some(a.user.id) != except_id);
        if taken {
            return Err(DirectoryError::DuplicateUsername(username.to_owned()));
        }
        Ok(username.to_owned())
    }
}
