//! API client capability set and its HTTP implementation.
//!
//! Pages only talk to [`ApiClient`]. Two implementations exist:
//! [`HttpApiClient`] (this module) calls the host server with `gloo-net`, and
//! [`MockApiClient`](super::mock::MockApiClient) answers from canned data after
//! a fixed delay. The `mock-api` feature picks which one backs [`AppApi`].
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: every HTTP call returns
//! [`ApiError::Unavailable`], since these endpoints only make sense in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Every operation resolves to `Result`; nothing retries. Call sites decide how
//! to surface the message.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use futures::stream::LocalBoxStream;

use super::types::{ChatEvent, User, UserDraft};

/// Prefix shared by every REST endpoint.
pub const API_BASE: &str = "/api";

/// Answer events as they arrive. Ends after a terminal event or on error.
pub type ChatStream = LocalBoxStream<'static, Result<ChatEvent, ApiError>>;

/// Errors surfaced by API operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Username/password pair did not match an account.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("request failed: {status} {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("decode failed: {0}")]
    Decode(String),

    /// HTTP is not available in this build (SSR or native).
    #[error("not available on server")]
    Unavailable,
}

/// Async operations the shell needs from a backend.
#[allow(async_fn_in_trait)]
pub trait ApiClient {
    /// Check credentials and return the matching account.
    async fn login(&self, username: &str, password: &str) -> Result<User, ApiError>;

    /// All accounts, for the admin page.
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    /// Create an account; the backend assigns the id.
    async fn add_user(&self, draft: UserDraft) -> Result<User, ApiError>;

    async fn delete_user(&self, user_id: i64) -> Result<(), ApiError>;

    /// Replace an account's fields, keeping `user_id`.
    async fn update_user(&self, user_id: i64, draft: UserDraft) -> Result<User, ApiError>;

    /// Ask a question and stream the answer.
    async fn chat_stream(&self, question: &str) -> Result<ChatStream, ApiError>;
}

/// Backend used by the running shell.
#[cfg(feature = "mock-api")]
pub type AppApi = super::mock::MockApiClient;

/// Backend used by the running shell.
#[cfg(not(feature = "mock-api"))]
pub type AppApi = HttpApiClient;

#[cfg(any(test, feature = "hydrate"))]
fn endpoint(base: &str, path: &str) -> String {
    format!("{}{path}", base.trim_end_matches('/'))
}

#[cfg(any(test, feature = "hydrate"))]
fn user_endpoint(base: &str, user_id: i64) -> String {
    endpoint(base, &format!("/users/{user_id}"))
}

/// Map a failed login response to the error shown on the login page.
#[cfg(any(test, feature = "hydrate"))]
fn login_failure(status: u16, message: Option<String>) -> ApiError {
    if status == 401 {
        ApiError::InvalidCredentials
    } else {
        ApiError::Status { status, message: message.unwrap_or_default() }
    }
}

/// REST client for the host server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpApiClient {
    base: String,
}

impl Default for HttpApiClient {
    fn default() -> Self {
        Self::new(API_BASE)
    }
}

impl HttpApiClient {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }
}

#[cfg(feature = "hydrate")]
mod http {
    use futures::StreamExt;
    use gloo_net::http::{Request, Response};
    use serde::de::DeserializeOwned;
    use wasm_bindgen::JsCast;

    use super::{ApiError, ChatStream};
    use crate::net::sse::{SseDecoder, decode_chunk, until_terminal};
    use crate::net::types::{ChatEvent, UserResponse};

    pub(super) fn network(err: impl std::fmt::Display) -> ApiError {
        ApiError::Network(err.to_string())
    }

    pub(super) async fn json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub(super) async fn status_error(resp: Response) -> ApiError {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        // Prefer the `error` field of the JSON envelope over the raw body.
        let message = serde_json::from_str::<UserResponse>(&text)
            .ok()
            .and_then(|body| body.error)
            .unwrap_or(text);
        ApiError::Status { status, message }
    }

    pub(super) async fn send(request: Request) -> Result<Response, ApiError> {
        let resp = request.send().await.map_err(network)?;
        if resp.ok() { Ok(resp) } else { Err(status_error(resp).await) }
    }

    struct ReadState {
        reader: web_sys::ReadableStreamDefaultReader,
        decoder: SseDecoder,
        queued: std::collections::VecDeque<Result<ChatEvent, ApiError>>,
        done: bool,
    }

    async fn read_chunk(reader: &web_sys::ReadableStreamDefaultReader) -> Result<Option<Vec<u8>>, ApiError> {
        let result = wasm_bindgen_futures::JsFuture::from(reader.read())
            .await
            .map_err(|e| ApiError::Network(format!("{e:?}")))?;
        let done = js_sys::Reflect::get(&result, &"done".into())
            .map(|v| v.as_bool().unwrap_or(false))
            .unwrap_or(true);
        if done {
            return Ok(None);
        }
        let value = js_sys::Reflect::get(&result, &"value".into())
            .map_err(|e| ApiError::Decode(format!("{e:?}")))?;
        Ok(Some(js_sys::Uint8Array::new(&value).to_vec()))
    }

    /// Turn a streaming response body into decoded chat events.
    pub(super) fn event_stream(resp: &Response) -> Result<ChatStream, ApiError> {
        let body = resp.body().ok_or_else(|| ApiError::Decode("empty chat response".to_owned()))?;
        let reader: web_sys::ReadableStreamDefaultReader = body.get_reader().unchecked_into();
        let state = ReadState {
            reader,
            decoder: SseDecoder::new(),
            queued: std::collections::VecDeque::new(),
            done: false,
        };

        let stream = futures::stream::unfold(state, |mut state| async move {
            loop {
                if let Some(item) = state.queued.pop_front() {
                    return Some((item, state));
                }
                if state.done {
                    return None;
                }
                match read_chunk(&state.reader).await {
                    Ok(Some(bytes)) => state.queued.extend(decode_chunk(&mut state.decoder, &bytes)),
                    Ok(None) => {
                        state.done = true;
                        let tail = state.decoder.finish();
                        state.queued.extend(tail.iter().map(|data| crate::net::sse::parse_chat_event(data)));
                    }
                    Err(e) => {
                        state.done = true;
                        state.queued.push_back(Err(e));
                    }
                }
            }
        });
        Ok(until_terminal(stream).boxed_local())
    }
}

impl ApiClient for HttpApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use super::types::{LoginRequest, UserResponse};

            let payload = LoginRequest { username: username.to_owned(), password: password.to_owned() };
            let resp = gloo_net::http::Request::post(&endpoint(&self.base, "/auth/login"))
                .json(&payload)
                .map_err(http::network)?
                .send()
                .await
                .map_err(http::network)?;
            let status = resp.status();
            let body: Option<UserResponse> = resp.json().await.ok();
            if !(200..300).contains(&status) {
                return Err(login_failure(status, body.and_then(|b| b.error)));
            }
            body.and_then(|b| b.user)
                .ok_or_else(|| ApiError::Decode("login response missing user".to_owned()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (username, password);
            Err(ApiError::Unavailable)
        }
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::get(&endpoint(&self.base, "/users"))
                .build()
                .map_err(http::network)?;
            http::json(http::send(request).await?).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ApiError::Unavailable)
        }
    }

    async fn add_user(&self, draft: UserDraft) -> Result<User, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use super::types::UserResponse;

            let request = gloo_net::http::Request::post(&endpoint(&self.base, "/users"))
                .json(&draft)
                .map_err(http::network)?;
            let body: UserResponse = http::json(http::send(request).await?).await?;
            body.user.ok_or_else(|| ApiError::Decode("add user response missing user".to_owned()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = draft;
            Err(ApiError::Unavailable)
        }
    }

    async fn delete_user(&self, user_id: i64) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::delete(&user_endpoint(&self.base, user_id))
                .build()
                .map_err(http::network)?;
            http::send(request).await?;
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = user_id;
            Err(ApiError::Unavailable)
        }
    }

    async fn update_user(&self, user_id: i64, draft: UserDraft) -> Result<User, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use super::types::UserResponse;

            let request = gloo_net::http::Request::put(&user_endpoint(&self.base, user_id))
                .json(&draft)
                .map_err(http::network)?;
            let body: UserResponse = http::json(http::send(request).await?).await?;
            body.user.ok_or_else(|| ApiError::Decode("update user response missing user".to_owned()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (user_id, draft);
            Err(ApiError::Unavailable)
        }
    }

    async fn chat_stream(&self, question: &str) -> Result<ChatStream, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use super::types::ChatRequest;

            let payload = ChatRequest { question: question.to_owned() };
            let request = gloo_net::http::Request::post(&endpoint(&self.base, "/chat/sse"))
                .header("Accept", "text/event-stream")
                .json(&payload)
                .map_err(http::network)?;
            let resp = http::send(request).await?;
            http::event_stream(&resp)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = question;
            Err(ApiError::Unavailable)
        }
    }
}
