//! User-management page (admins only).
//!
//! SYSTEM CONTEXT
//! ==============
//! Lists accounts from the backend and offers add, role change, and delete.
//! Each successful call is applied to `UsersState` directly, so the table
//! stays consistent with the operation even when the backend list does not
//! change.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::app_header::AppHeader;
use crate::net::api::{ApiClient, AppApi};
use crate::net::types::{Role, User, UserDraft};
use crate::routes::AppRoute;
use crate::state::session::AppSession;
use crate::state::users::UsersState;
use crate::util::guard::{install_route_guard, may_render};

pub(crate) const MISSING_USERNAME: &str = "Enter a username.";
pub(crate) const MISSING_PASSWORD: &str = "Enter a password for the new account.";

/// Build an add-user draft from raw form input. New accounts need a password;
/// an unknown role falls back to `user`.
pub(crate) fn build_draft(username: &str, password: &str, role: &str) -> Result<UserDraft, &'static str> {
    let username = username.trim();
    if username.is_empty() {
        return Err(MISSING_USERNAME);
    }
    if password.is_empty() {
        return Err(MISSING_PASSWORD);
    }
    Ok(UserDraft {
        username: username.to_owned(),
        role: Role::parse(role).unwrap_or_default(),
        password: Some(password.to_owned()),
    })
}

/// Draft that flips `user` between admin and regular user.
pub(crate) fn role_toggle_draft(user: &User) -> UserDraft {
    let role = if user.is_admin() { Role::User } else { Role::Admin };
    UserDraft { username: user.username.clone(), role, password: None }
}

/// The signed-in admin cannot delete or demote their own account.
pub(crate) fn is_self(current: Option<&User>, target_id: i64) -> bool {
    current.is_some_and(|u| u.id == target_id)
}

#[component]
pub fn UsersPage() -> impl IntoView {
    let session = expect_context::<RwSignal<AppSession>>();
    let api = StoredValue::new(expect_context::<AppApi>());
    install_route_guard(session, AppRoute::Users, use_navigate());

    let users = RwSignal::new(UsersState::default());
    let ready = move || session.with(|s| may_render(s, AppRoute::Users));

    let requested_list = RwSignal::new(false);
    Effect::new(move || {
        if requested_list.get_untracked() || !ready() {
            return;
        }
        requested_list.set(true);
        users.update(|s| s.loading = true);
        let api = api.get_value();
        leptos::task::spawn_local(async move {
            match api.list_users().await {
                Ok(list) => users.update(|s| s.replace_all(list)),
                Err(e) => {
                    log::warn!("list users: {e}");
                    users.update(|s| s.fail(format!("Could not load users: {e}")));
                }
            }
        });
    });

    let new_username = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let new_role = RwSignal::new(Role::User.as_str().to_owned());
    let busy = RwSignal::new(false);

    let on_add = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let draft = match build_draft(&new_username.get(), &new_password.get(), &new_role.get()) {
            Ok(draft) => draft,
            Err(message) => {
                users.update(|s| s.fail(message));
                return;
            }
        };
        busy.set(true);
        let api = api.get_value();
        leptos::task::spawn_local(async move {
            match api.add_user(draft).await {
                Ok(user) => {
                    log::info!("added user {} ({})", user.username, user.id);
                    users.update(|s| s.upsert(user));
                    new_username.set(String::new());
                    new_password.set(String::new());
                }
                Err(e) => users.update(|s| s.fail(format!("Add failed: {e}"))),
            }
            busy.set(false);
        });
    };

    let toggle_role = move |user: User| {
        let api = api.get_value();
        let draft = role_toggle_draft(&user);
        leptos::task::spawn_local(async move {
            match api.update_user(user.id, draft).await {
                Ok(updated) => users.update(|s| s.upsert(updated)),
                Err(e) => users.update(|s| s.fail(format!("Update failed: {e}"))),
            }
        });
    };

    let delete = move |user_id: i64| {
        let api = api.get_value();
        leptos::task::spawn_local(async move {
            match api.delete_user(user_id).await {
                Ok(()) => {
                    log::info!("deleted user {user_id}");
                    users.update(|s| s.remove(user_id));
                }
                Err(e) => users.update(|s| s.fail(format!("Delete failed: {e}"))),
            }
        });
    };

    view! {
        <Show when=ready>
            <div class="page users-page">
                <AppHeader active=AppRoute::Users />
                <form class="users-page__add" on:submit=on_add>
                    <input
                        class="users-page__input"
                        type="text"
                        placeholder="Username"
                        prop:value=move || new_username.get()
                        on:input=move |ev| new_username.set(event_target_value(&ev))
                    />
                    <input
                        class="users-page__input"
                        type="password"
                        autocomplete="new-password"
                        placeholder="Password"
                        prop:value=move || new_password.get()
                        on:input=move |ev| new_password.set(event_target_value(&ev))
                    />
                    <select
                        class="users-page__role"
                        prop:value=move || new_role.get()
                        on:change=move |ev| new_role.set(event_target_value(&ev))
                    >
                        <option value="user">"user"</option>
                        <option value="admin">"admin"</option>
                    </select>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        "Add user"
                    </button>
                </form>

                {move || users.with(|s| s.error.clone()).map(|e| view! { <p class="users-page__error">{e}</p> })}
                <Show when=move || users.with(|s| s.loading)>
                    <p class="users-page__loading">"Loading..."</p>
                </Show>

                <table class="users-table">
                    <thead>
                        <tr>
                            <th>"ID"</th>
                            <th>"Username"</th>
                            <th>"Role"</th>
                            <th>"Created"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            users
                                .with(|s| s.users.clone())
                                .into_iter()
                                .map(|user| {
                                    let own = session.with(|s| is_self(s.user(), user.id));
                                    let user_id = user.id;
                                    let toggle_label = if user.is_admin() { "Make user" } else { "Make admin" };
                                    let row_user = user.clone();
                                    view! {
                                        <tr class="users-table__row" class:users-table__row--self=own>
                                            <td>{user.id}</td>
                                            <td>{user.username}</td>
                                            <td>{user.role.as_str()}</td>
                                            <td>{user.created_time.unwrap_or_default()}</td>
                                            <td class="users-table__actions">
                                                <button
                                                    class="btn"
                                                    disabled=own
                                                    on:click=move |_| toggle_role(row_user.clone())
                                                >
                                                    {toggle_label}
                                                </button>
                                                <button
                                                    class="btn btn--danger"
                                                    disabled=own
                                                    on:click=move |_| delete(user_id)
                                                >
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </tbody>
                </table>
            </div>
        </Show>
    }
}
