use super::*;
use crate::net::types::Role;
use crate::util::storage::MemoryStorage;

fn user(role: Role) -> User {
    User { id: 7, username: "someone".to_owned(), role, created_time: None }
}

fn session_with(user: Option<User>) -> SessionStore<MemoryStorage> {
    let mut session = SessionStore::new(MemoryStorage::new());
    match user {
        Some(u) => session.login(u).unwrap(),
        None => session.logout(),
    }
    session
}

// =============================================================
// evaluate
// =============================================================

#[test]
fn auth_routes_without_user_redirect_to_login() {
    for route in AppRoute::ALL.into_iter().filter(|r| r.meta().requires_auth) {
        assert_eq!(
            evaluate(route.meta(), None),
            GuardDecision::Redirect(AppRoute::Login),
            "route {}",
            route.path()
        );
    }
}

#[test]
fn admin_routes_with_regular_user_redirect_to_chat() {
    let regular = user(Role::User);
    for route in AppRoute::ALL.into_iter().filter(|r| r.meta().requires_admin) {
        assert_eq!(evaluate(route.meta(), Some(&regular)), GuardDecision::Redirect(AppRoute::Chat));
    }
}

#[test]
fn admin_user_may_enter_users_page() {
    assert_eq!(evaluate(AppRoute::Users.meta(), Some(&user(Role::Admin))), GuardDecision::Allow);
}

#[test]
fn regular_user_may_enter_chat() {
    assert_eq!(evaluate(AppRoute::Chat.meta(), Some(&user(Role::User))), GuardDecision::Allow);
}

#[test]
fn public_routes_allow_anonymous() {
    assert_eq!(evaluate(AppRoute::Login.meta(), None), GuardDecision::Allow);
    assert_eq!(evaluate(AppRoute::Root.meta(), None), GuardDecision::Allow);
}

#[test]
fn admin_only_meta_without_auth_flag_bounces_anonymous_to_chat() {
    let meta = RouteMeta { requires_auth: false, requires_admin: true };
    assert_eq!(evaluate(meta, None), GuardDecision::Redirect(AppRoute::Chat));
}

// =============================================================
// Session-aware helpers
// =============================================================

#[test]
fn no_redirect_before_session_initialized() {
    let session = SessionStore::new(MemoryStorage::new());
    assert_eq!(pending_redirect(&session, AppRoute::Users), None);
    assert!(!may_render(&session, AppRoute::Users));
}

#[test]
fn logged_out_session_redirects_chat_to_login() {
    let session = session_with(None);
    assert_eq!(pending_redirect(&session, AppRoute::Chat), Some(AppRoute::Login));
    assert!(!may_render(&session, AppRoute::Chat));
}

#[test]
fn restored_admin_session_renders_users() {
    let storage = MemoryStorage::new();
    SessionStore::new(storage.clone()).login(user(Role::Admin)).unwrap();

    let mut reloaded = SessionStore::new(storage);
    reloaded.initialize().unwrap();
    assert_eq!(pending_redirect(&reloaded, AppRoute::Users), None);
    assert!(may_render(&reloaded, AppRoute::Users));
}

#[test]
fn malformed_session_is_treated_as_logged_out() {
    let storage = MemoryStorage::new();
    storage.set(crate::state::session::SESSION_KEY, "][").unwrap();
    let mut session = SessionStore::new(storage);
    assert!(session.initialize().is_err());
    assert_eq!(pending_redirect(&session, AppRoute::Chat), Some(AppRoute::Login));
}
