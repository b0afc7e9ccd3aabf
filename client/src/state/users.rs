//! Account list state for the user-management page.
//!
//! Results of add/update/delete are applied locally so the table reflects
//! the operation immediately, including against the mock backend, whose list
//! never changes. A later reload replaces the whole list with whatever the
//! backend returns.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use crate::net::types::User;

#[derive(Clone, Debug, Default)]
pub struct UsersState {
    pub users: Vec<User>,
    pub loading: bool,
    /// Last error message, cleared by the next successful operation.
    pub error: Option<String>,
}

impl UsersState {
    pub fn replace_all(&mut self, users: Vec<User>) {
        self.users = users;
        self.loading = false;
        self.error = None;
    }

    pub fn upsert(&mut self, user: User) {
        self.error = None;
        match self.users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => {
                // Keep the creation stamp when an update response omits it.
                let created_time = user.created_time.clone().or_else(|| existing.created_time.take());
                *existing = User { created_time, ..user };
            }
            None => self.users.push(user),
        }
    }

    pub fn remove(&mut self, user_id: i64) {
        self.error = None;
        self.users.retain(|u| u.id != user_id);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }
}
