use super::*;

const STREAM: &str = concat!(
    "data: {\"type\": \"start\", \"timestamp\": 1.0}\n\n",
    "data: {\"type\": \"content\", \"content\": \"现货\"}\n\n",
    "data: {\"type\": \"content\", \"content\": \"市场\"}\n\n",
    "data: {\"type\": \"end\", \"complete_response\": \"现货市场\", \"timestamp\": 2.0}\n\n",
);

fn decode_all(chunks: &[&[u8]]) -> Vec<String> {
    let mut decoder = SseDecoder::new();
    let mut out = Vec::new();
    for chunk in chunks {
        out.extend(decoder.push(chunk));
    }
    out.extend(decoder.finish());
    out
}

// =============================================================
// Framing
// =============================================================

#[test]
fn whole_body_yields_one_payload_per_event() {
    let events = decode_all(&[STREAM.as_bytes()]);
    assert_eq!(events.len(), 4);
    assert!(events[0].contains("start"));
    assert!(events[3].contains("complete_response"));
}

#[test]
fn byte_at_a_time_matches_whole_body() {
    let bytes = STREAM.as_bytes();
    let chunks: Vec<&[u8]> = bytes.chunks(1).collect();
    assert_eq!(decode_all(&chunks), decode_all(&[bytes]));
}

#[test]
fn split_inside_multibyte_character_is_reassembled() {
    let bytes = STREAM.as_bytes();
    let cut = STREAM.find("现").unwrap() + 1;
    let events = decode_all(&[&bytes[..cut], &bytes[cut..]]);
    assert!(events[1].contains("现货"));
}

#[test]
fn crlf_line_endings_are_accepted() {
    let events = decode_all(&[b"data: a\r\n\r\ndata: b\r\n\r\n"]);
    assert_eq!(events, vec!["a".to_owned(), "b".to_owned()]);
}

#[test]
fn multiple_data_lines_join_with_newline() {
    let events = decode_all(&[b"data: one\ndata: two\n\n"]);
    assert_eq!(events, vec!["one\ntwo".to_owned()]);
}

#[test]
fn comments_and_other_fields_are_ignored() {
    let events = decode_all(&[b": keep-alive\nevent: message\nid: 7\ndata: x\n\n"]);
    assert_eq!(events, vec!["x".to_owned()]);
}

#[test]
fn data_without_space_after_colon() {
    let events = decode_all(&[b"data:x\n\n"]);
    assert_eq!(events, vec!["x".to_owned()]);
}

#[test]
fn blank_lines_without_data_emit_nothing() {
    assert!(decode_all(&[b"\n\n\n"]).is_empty());
}

#[test]
fn finish_flushes_unterminated_event() {
    let mut decoder = SseDecoder::new();
    assert!(decoder.push(b"data: tail").is_empty());
    assert_eq!(decoder.finish(), vec!["tail".to_owned()]);
    assert!(decoder.finish().is_empty());
}

// =============================================================
// Event parsing
// =============================================================

#[test]
fn decode_chunk_parses_typed_events() {
    let mut decoder = SseDecoder::new();
    let events: Vec<ChatEvent> = decode_chunk(&mut decoder, STREAM.as_bytes())
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(events[1], ChatEvent::Content { content: "现货".to_owned() });
    assert!(events[3].is_terminal());
}

#[test]
fn unknown_event_type_is_decode_error() {
    let err = parse_chat_event(r#"{"type":"mystery"}"#).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn non_json_payload_is_decode_error() {
    assert!(matches!(parse_chat_event("hello"), Err(ApiError::Decode(_))));
}

// =============================================================
// Stream termination
// =============================================================

fn content(text: &str) -> Result<ChatEvent, ApiError> {
    Ok(ChatEvent::Content { content: text.to_owned() })
}

#[tokio::test]
async fn until_terminal_stops_after_end() {
    let end = Ok(ChatEvent::End { complete_response: "ab".to_owned(), timestamp: None });
    let source = futures::stream::iter(vec![content("a"), content("b"), end.clone(), content("trailing")]);
    let events: Vec<_> = until_terminal(source).collect().await;
    assert_eq!(events, vec![content("a"), content("b"), end]);
}

#[tokio::test]
async fn until_terminal_stops_after_error_event() {
    let failed = Ok(ChatEvent::Error { error: "upstream down".to_owned() });
    let source = futures::stream::iter(vec![failed.clone(), content("trailing")]);
    let events: Vec<_> = until_terminal(source).collect().await;
    assert_eq!(events, vec![failed]);
}

#[tokio::test]
async fn until_terminal_passes_decode_errors_and_unterminated_streams() {
    let bad = Err(ApiError::Decode("chat event: junk".to_owned()));
    let source = futures::stream::iter(vec![content("a"), bad.clone(), content("b")]);
    let events: Vec<_> = until_terminal(source).collect().await;
    assert_eq!(events, vec![content("a"), bad, content("b")]);
}
