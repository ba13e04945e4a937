// Chat boundary: request shape, reply extraction and the fallback policy.

use city_core::chat::*;
use std::cell::RefCell;

struct Canned {
    reply: Result<String, u16>,
    seen: RefCell<Vec<(String, String)>>,
}

impl Canned {
    fn ok(body: &str) -> Self {
        Self {
            reply: Ok(body.to_string()),
            seen: RefCell::new(Vec::new()),
        }
    }

    fn status(code: u16) -> Self {
        Self {
            reply: Err(code),
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl ChatTransport for Canned {
    async fn post_json(&self, url: &str, body: String) -> Result<String, ChatError> {
        self.seen.borrow_mut().push((url.to_string(), body));
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(code) => Err(ChatError::Status(*code)),
        }
    }
}

struct Unreachable;

impl ChatTransport for Unreachable {
    async fn post_json(&self, _url: &str, _body: String) -> Result<String, ChatError> {
        Err(ChatError::Transport("connection refused".into()))
    }
}

fn keyed() -> ChatConfig {
    ChatConfig::default().with_api_key(Some("test-key"))
}

const HELLO: &str = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Solar "},{"text":"facades."}]}}]}"#;

#[test]
fn reply_text_is_returned_verbatim() {
    let transport = Canned::ok(HELLO);
    let reply = pollster::block_on(ask(&transport, &keyed(), "  What is green?  "));
    assert_eq!(reply, "Solar facades.");

    let seen = transport.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].0.ends_with(":generateContent?key=test-key"));
    let body: serde_json::Value = serde_json::from_str(&seen[0].1).unwrap();
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "  What is green?  ");
}

#[test]
fn transport_failure_becomes_fallback() {
    let reply = pollster::block_on(ask(&Unreachable, &keyed(), "hi"));
    assert_eq!(reply, FAILURE_FALLBACK);
}

#[test]
fn http_error_status_becomes_fallback() {
    let reply = pollster::block_on(ask(&Canned::status(500), &keyed(), "hi"));
    assert_eq!(reply, FAILURE_FALLBACK);
}

#[test]
fn malformed_body_becomes_fallback() {
    let reply = pollster::block_on(ask(&Canned::ok("<html>"), &keyed(), "hi"));
    assert_eq!(reply, FAILURE_FALLBACK);
}

#[test]
fn empty_reply_gets_its_own_fallback() {
    for body in [r#"{"candidates":[]}"#, "{}", r#"{"candidates":[{"content":{"parts":[{"text":" "}]}}]}"#] {
        let reply = pollster::block_on(ask(&Canned::ok(body), &keyed(), "hi"));
        assert_eq!(reply, EMPTY_REPLY_FALLBACK, "body {body}");
    }
}

#[test]
fn missing_key_never_reaches_the_transport() {
    let transport = Canned::ok(HELLO);
    let reply = pollster::block_on(ask(&transport, &ChatConfig::default(), "hi"));
    assert_eq!(reply, FAILURE_FALLBACK);
    assert!(transport.seen.borrow().is_empty());
}

#[test]
fn blank_api_key_counts_as_missing() {
    let config = ChatConfig::default().with_api_key(Some("   "));
    assert!(config.api_key.is_none());
    assert!(matches!(config.request_url(), Err(ChatError::MissingApiKey)));
}

#[test]
fn request_url_joins_endpoint_and_model() {
    let config = ChatConfig {
        endpoint: "https://example.test/v1/".into(),
        model: "m1".into(),
        ..keyed()
    };
    assert_eq!(
        config.request_url().unwrap(),
        "https://example.test/v1/models/m1:generateContent?key=test-key"
    );
}

#[test]
fn request_serializes_with_camel_case_fields() {
    let request = build_request(&keyed(), "hello");
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["systemInstruction"]["parts"][0]["text"], DEFAULT_SYSTEM_INSTRUCTION);
    assert!(json["systemInstruction"].get("role").is_none());
    let temp = json["generationConfig"]["temperature"].as_f64().unwrap();
    assert!((temp - 0.7).abs() < 1e-6);
}

#[test]
fn transcript_starts_with_greeting() {
    let t = ChatTranscript::new();
    assert_eq!(t.messages().len(), 1);
    assert_eq!(t.messages()[0].role, Role::Model);
    assert_eq!(t.messages()[0].text, GREETING);
    assert!(!t.is_loading());
}

#[test]
fn transcript_ignores_blank_and_overlapping_sends() {
    let mut t = ChatTranscript::new();
    assert_eq!(t.begin_send("   "), None);
    assert_eq!(t.begin_send(" towers? "), Some("towers?".to_string()));
    assert!(t.is_loading());
    assert_eq!(t.begin_send("again"), None);
    assert_eq!(t.messages().len(), 2);

    t.finish("Tall ones.".into());
    assert!(!t.is_loading());
    let roles: Vec<Role> = t.messages().iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::Model, Role::User, Role::Model]);
    assert!(t.begin_send("next").is_some());
}
