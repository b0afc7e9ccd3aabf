//! Forwarding client for the external QA backend.
//!
//! ARCHITECTURE
//! ============
//! The shell posts `{question}` to `/api/chat/sse`; this service re-posts it
//! upstream as `{question, stream: true}` and hands back the raw response
//! body. The SSE framing is passed through untouched, so decoding happens
//! once, in the browser.

#[cfg(test)]
#[path = "chat_proxy_test.rs"]
mod chat_proxy_test;

use std::time::Duration;

use axum::body::Bytes;
use futures::Stream;
use serde::Serialize;

use crate::config::ChatUpstreamConfig;

#[derive(Debug, thiserror::Error)]
pub enum ChatProxyError {
    #[error("question must not be empty")]
    EmptyQuestion,

    /// The upstream could not be reached or the request failed mid-flight.
    #[error("upstream request failed: {0}")]
    Request(String),

    #[error("upstream responded with status {status}")]
    Upstream { status: u16, body: String },

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Body sent to the QA backend.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UpstreamChatRequest<'a> {
    pub question: &'a str,
    pub stream: bool,
}

#[derive(Clone)]
pub struct ChatProxy {
    http: reqwest::Client,
    upstream_url: String,
}

impl ChatProxy {
    /// Build the shared HTTP client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// [`ChatProxyError::HttpClientBuild`] if the client cannot be built.
    pub fn new(config: &ChatUpstreamConfig) -> Result<Self, ChatProxyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ChatProxyError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, upstream_url: config.url.clone() })
    }

    #[must_use]
    pub fn upstream_url(&self) -> &str {
        &self.upstream_url
    }

    /// Send `question` upstream and return its streaming body.
    ///
    /// # Errors
    ///
    /// [`ChatProxyError::EmptyQuestion`] for a blank question,
    /// [`ChatProxyError::Request`] when the upstream is unreachable, and
    /// [`ChatProxyError::Upstream`] for a non-2xx answer.
    pub async fn open(
        &self,
        question: &str,
    ) -> Result<impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static, ChatProxyError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ChatProxyError::EmptyQuestion);
        }

        let resp = self
            .http
            .post(&self.upstream_url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .json(&UpstreamChatRequest { question, stream: true })
            .send()
            .await
            .map_err(|e| ChatProxyError::Request(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ChatProxyError::Upstream { status: status.as_u16(), body });
        }
        Ok(resp.bytes_stream())
    }
}
