//! Top bar with the signed-in identity, page links, and logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Shared by every authenticated page. The user-management link is only
//! rendered for admins; the guard still protects the route itself.

#[cfg(test)]
#[path = "app_header_test.rs"]
mod app_header_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::routes::AppRoute;
use crate::state::session::AppSession;

/// Label shown for the signed-in user, e.g. `cqk (admin)`.
pub(crate) fn identity_label(session: &AppSession) -> String {
    session
        .user()
        .map(|user| format!("{} ({})", user.username, user.role.as_str()))
        .unwrap_or_default()
}

#[component]
pub fn AppHeader(active: AppRoute) -> impl IntoView {
    let session = expect_context::<RwSignal<AppSession>>();
    let navigate = use_navigate();

    let is_admin = move || session.with(|s| s.user().is_some_and(|u| u.is_admin()));
    let identity = move || session.with(identity_label);

    let on_logout = move |_| {
        session.update(AppSession::logout);
        log::info!("signed out");
        navigate(AppRoute::Login.path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
    };

    view! {
        <header class="app-header">
            <span class="app-header__title">"AskGrid"</span>
            <nav class="app-header__nav">
                <a
                    href=AppRoute::Chat.path()
                    class="app-header__link"
                    class:app-header__link--active=move || active == AppRoute::Chat
                >
                    "Chat"
                </a>
                <Show when=is_admin>
                    <a
                        href=AppRoute::Users.path()
                        class="app-header__link"
                        class:app-header__link--active=move || active == AppRoute::Users
                    >
                        "Users"
                    </a>
                </Show>
            </nav>
            <span class="app-header__identity">{identity}</span>
            <button class="btn app-header__logout" on:click=on_logout title="Logout">
                "Logout"
            </button>
        </header>
    }
}
