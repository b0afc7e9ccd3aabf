//! Incremental server-sent-events decoding for the chat stream.
//!
//! The browser delivers the `/api/chat/sse` body in arbitrary chunks; a chunk
//! may end mid-line or mid-character. `SseDecoder` buffers bytes until a full
//! line is available and emits one payload per blank-line-terminated event.
//! Only `data:` fields are kept; `event:`/`id:`/`retry:` and `:` comments are
//! ignored because the QA service never sends them meaningfully.

#[cfg(test)]
#[path = "sse_test.rs"]
mod sse_test;

use futures::{Stream, StreamExt, future};

use super::api::ApiError;
use super::types::ChatEvent;

/// Byte-oriented SSE line splitter and event assembler.
#[derive(Debug, Default)]
pub struct SseDecoder {
    pending: Vec<u8>,
    data_lines: Vec<String>,
}

impl SseDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return the `data` payloads of every event it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);
        let mut events = Vec::new();
        // `\n` never appears inside a multi-byte UTF-8 sequence, so every
        // drained line is complete text.
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            let line = String::from_utf8_lossy(&line);
            self.feed_line(&line, &mut events);
        }
        events
    }

    /// Flush a trailing unterminated line and any event still being built.
    pub fn finish(&mut self) -> Vec<String> {
        let mut events = Vec::new();
        if !self.pending.is_empty() {
            let line = String::from_utf8_lossy(&self.pending).into_owned();
            self.pending.clear();
            self.feed_line(line.trim_end_matches('\r'), &mut events);
        }
        self.dispatch(&mut events);
        events
    }

    fn feed_line(&mut self, line: &str, events: &mut Vec<String>) {
        if line.is_empty() {
            self.dispatch(events);
            return;
        }
        if line.starts_with(':') {
            return;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        if field == "data" {
            self.data_lines.push(value.to_owned());
        }
    }

    fn dispatch(&mut self, events: &mut Vec<String>) {
        if self.data_lines.is_empty() {
            return;
        }
        events.push(self.data_lines.join("\n"));
        self.data_lines.clear();
    }
}

/// Decode one `data` payload into a typed chat event.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the payload is not a known event object.
pub fn parse_chat_event(data: &str) -> Result<ChatEvent, ApiError> {
    serde_json::from_str(data).map_err(|e| ApiError::Decode(format!("chat event: {e}")))
}

/// Feed a chunk and decode every completed event.
pub fn decode_chunk(decoder: &mut SseDecoder, chunk: &[u8]) -> Vec<Result<ChatEvent, ApiError>> {
    decoder.push(chunk).iter().map(|data| parse_chat_event(data)).collect()
}

/// Pass events through up to and including the first terminal one, then end
/// even if the body keeps delivering.
pub fn until_terminal<S>(events: S) -> impl Stream<Item = Result<ChatEvent, ApiError>>
where
    S: Stream<Item = Result<ChatEvent, ApiError>>,
{
    events.scan(false, |finished, item| {
        if *finished {
            return future::ready(None);
        }
        *finished = matches!(&item, Ok(event) if event.is_terminal());
        future::ready(Some(item))
    })
}
