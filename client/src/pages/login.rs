//! Login page: username + password against the configured backend.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::api::{ApiClient, AppApi};
use crate::routes::AppRoute;
use crate::state::session::AppSession;

pub(crate) const MISSING_FIELDS: &str = "Enter both username and password.";

/// Trim the username; the password is taken verbatim.
pub(crate) fn validate_login_input(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(MISSING_FIELDS);
    }
    Ok((username.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<AppSession>>();
    let api = expect_context::<AppApi>();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (name, secret) = match validate_login_input(&username.get(), &password.get()) {
            Ok(input) => input,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        let api = api.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api.login(&name, &secret).await {
                Ok(user) => {
                    log::info!("signed in as {} ({})", user.username, user.role.as_str());
                    session.update(|s| {
                        if let Err(e) = s.login(user) {
                            log::warn!("{e}");
                        }
                    });
                    password.set(String::new());
                    info.set(String::new());
                    busy.set(false);
                    navigate(AppRoute::DEFAULT_AUTHENTICATED.path(), NavigateOptions::default());
                }
                Err(e) => {
                    info.set(format!("Sign-in failed: {e}"));
                    busy.set(false);
                }
            }
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"AskGrid"</h1>
                <p class="login-card__subtitle">"Power-trading Q&A console"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
