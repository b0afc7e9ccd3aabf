//! Navigation guard shared by every routed page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page installs the same guard for its own route so redirects are
//! identical everywhere. The decision itself is a pure function of the route
//! metadata and the session user; the reactive wrapper only applies it once
//! the session has been restored from storage.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::types::User;
use crate::routes::{AppRoute, RouteMeta};
use crate::state::session::SessionStore;
use crate::util::storage::KeyValueStorage;

/// Outcome of checking a navigation target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(AppRoute),
}

/// Decide whether `user` may enter a route with `meta`.
///
/// Missing authentication wins over missing privilege: an anonymous visitor
/// to an admin route goes to the login page, not the default page.
#[must_use]
pub fn evaluate(meta: RouteMeta, user: Option<&User>) -> GuardDecision {
    if meta.requires_auth && user.is_none() {
        GuardDecision::Redirect(AppRoute::Login)
    } else if meta.requires_admin && !user.is_some_and(User::is_admin) {
        GuardDecision::Redirect(AppRoute::DEFAULT_AUTHENTICATED)
    } else {
        GuardDecision::Allow
    }
}

/// Redirect target for `route`, or `None` while the session is still loading
/// or when entry is allowed.
#[must_use]
pub fn pending_redirect<S: KeyValueStorage>(session: &SessionStore<S>, route: AppRoute) -> Option<AppRoute> {
    if !session.is_initialized() {
        return None;
    }
    match evaluate(route.meta(), session.user()) {
        GuardDecision::Allow => None,
        GuardDecision::Redirect(target) => Some(target),
    }
}

/// Whether the page for `route` may render its content.
#[must_use]
pub fn may_render<S: KeyValueStorage>(session: &SessionStore<S>, route: AppRoute) -> bool {
    session.is_initialized() && evaluate(route.meta(), session.user()) == GuardDecision::Allow
}

/// Re-check `route` whenever the session changes and navigate away if denied.
pub fn install_route_guard<S, F>(session: RwSignal<SessionStore<S>>, route: AppRoute, navigate: F)
where
    S: KeyValueStorage + Send + Sync + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let Some(target) = session.with(|s| pending_redirect(s, route)) else {
            return;
        };
        log::debug!("guard: {} -> {}", route.path(), target.path());
        navigate(target.path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
    });
}
