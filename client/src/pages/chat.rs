//! Chat page: ask a question, watch the answer stream in.
//!
//! SYSTEM CONTEXT
//! ==============
//! Questions go through `ApiClient::chat_stream`; each decoded event is folded
//! into `ChatState` as it arrives so the assistant message grows in place.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use futures::StreamExt;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::app_header::AppHeader;
use crate::net::api::{ApiClient, AppApi};
use crate::routes::AppRoute;
use crate::state::chat::{ChatRole, ChatState};
use crate::state::session::AppSession;
use crate::util::guard::{install_route_guard, may_render};
use crate::util::markdown::render_markdown_html;

/// Trimmed question, or `None` when there is nothing to send.
pub(crate) fn normalize_question(raw: &str) -> Option<String> {
    let question = raw.trim();
    (!question.is_empty()).then(|| question.to_owned())
}

#[component]
pub fn ChatPage() -> impl IntoView {
    let session = expect_context::<RwSignal<AppSession>>();
    let api = StoredValue::new(expect_context::<AppApi>());
    install_route_guard(session, AppRoute::Chat, use_navigate());

    let chat = RwSignal::new(ChatState::default());
    let input = RwSignal::new(String::new());
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    Effect::new(move || {
        let _ = chat.with(|c| (c.messages.len(), c.messages.last().map(|m| m.content.len()), c.loading));

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = messages_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    let do_send = move || {
        if chat.with(|c| c.loading) {
            return;
        }
        let Some(question) = normalize_question(&input.get()) else {
            return;
        };
        chat.update(|c| c.begin(&question));
        input.set(String::new());

        let api = api.get_value();
        leptos::task::spawn_local(async move {
            match api.chat_stream(&question).await {
                Ok(mut stream) => {
                    while let Some(item) = stream.next().await {
                        match item {
                            Ok(event) => {
                                let terminal = event.is_terminal();
                                chat.update(|c| c.apply(event));
                                if terminal {
                                    break;
                                }
                            }
                            Err(e) => {
                                log::warn!("chat stream: {e}");
                                chat.update(|c| c.fail(&e.to_string()));
                                break;
                            }
                        }
                    }
                    chat.update(ChatState::finish);
                }
                Err(e) => {
                    log::warn!("chat request: {e}");
                    chat.update(|c| c.fail(&format!("Request failed: {e}")));
                }
            }
        });
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    let can_send = move || !input.get().trim().is_empty() && !chat.with(|c| c.loading);
    let ready = move || session.with(|s| may_render(s, AppRoute::Chat));

    view! {
        <Show when=ready>
            <div class="page chat-page">
                <AppHeader active=AppRoute::Chat />
                <div class="chat-page__messages" node_ref=messages_ref>
                    {move || {
                        let messages = chat.with(|c| c.messages.clone());
                        if messages.is_empty() {
                            return view! {
                                <div class="chat-page__empty">"Ask a question to get started."</div>
                            }
                                .into_any();
                        }
                        messages
                            .into_iter()
                            .map(|msg| {
                                let is_assistant = msg.role == ChatRole::Assistant;
                                let is_error = msg.role == ChatRole::Error;
                                view! {
                                    <div
                                        class="chat-message"
                                        class:chat-message--assistant=is_assistant
                                        class:chat-message--error=is_error
                                    >
                                        {if is_assistant {
                                            let rendered = render_markdown_html(&msg.content);
                                            view! { <div class="chat-message__markdown" inner_html=rendered></div> }
                                                .into_any()
                                        } else {
                                            view! { <span>{msg.content}</span> }.into_any()
                                        }}
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()
                            .into_any()
                    }}
                    {move || {
                        chat.with(|c| c.loading)
                            .then(|| view! { <div class="chat-page__loading">"Thinking..."</div> })
                    }}
                </div>
                <div class="chat-page__input-row">
                    <textarea
                        class="chat-page__input"
                        rows="2"
                        placeholder="Ask about power trading..."
                        disabled=move || chat.with(|c| c.loading)
                        prop:value=move || input.get()
                        on:input=move |ev| input.set(event_target_value(&ev))
                        on:keydown=on_keydown
                    ></textarea>
                    <button
                        class="btn btn--primary chat-page__send"
                        on:click=move |_| do_send()
                        disabled=move || !can_send()
                    >
                        "Send"
                    </button>
                </div>
            </div>
        </Show>
    }
}
