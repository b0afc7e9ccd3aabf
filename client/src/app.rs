//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::net::api::AppApi;
use crate::pages::{chat::ChatPage, login::LoginPage, users::UsersPage};
use crate::routes::AppRoute;
use crate::state::session::{AppSession, SessionError};
use crate::util::storage::BrowserStorage;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session and API client contexts and sets up routing. The
/// session is restored from storage after mount, so server rendering and the
/// first client render agree on a logged-out, uninitialized session.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(AppSession::new(BrowserStorage));
    provide_context(session);
    provide_context(AppApi::default());

    Effect::new(move || {
        session.update(|s| match s.initialize() {
            Ok(Some(user)) => log::debug!("restored session for {}", user.username),
            Ok(None) => {}
            Err(SessionError::Malformed(e)) => log::warn!("discarded malformed session: {e}"),
            Err(e) => log::warn!("session restore failed: {e}"),
        });
    });

    let root_target = AppRoute::Root.redirect_target().unwrap_or(AppRoute::Login).path();

    view! {
        <Stylesheet id="leptos" href="/pkg/askgrid.css"/>
        <Title text="AskGrid"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=move || view! { <Redirect path=root_target/> }/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("chat") view=ChatPage/>
                <Route path=StaticSegment("users") view=UsersPage/>
            </Routes>
        </Router>
    }
}
