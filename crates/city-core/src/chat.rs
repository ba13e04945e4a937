//! Chat boundary: user text in, assistant text out.
//!
//! The transport is pluggable (browser fetch on web, canned replies in tests).
//! [`ask`] never fails; every error becomes a friendly fallback string.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const GREETING: &str =
    "Stellar greetings. I am Core-AI. How can I assist with your cosmic business architecture today?";
pub const FAILURE_FALLBACK: &str =
    "The EcoSphere AI is currently recalibrating. Please try again in a moment.";
pub const EMPTY_REPLY_FALLBACK: &str = "I'm sorry, I couldn't process that insight right now.";

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are an expert in sustainable urban planning and architecture for the EcoSphere project. \
Keep your answers concise, professional, and focused on green building systems, carbon neutrality, and innovative urban designs. \
Format your response as a short paragraph or bullet points.";

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct ChatConfig {
    pub endpoint: String,
    pub model: String,
    pub system_instruction: String,
    pub temperature: f32,
    pub api_key: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            api_key: None,
        }
    }
}

impl ChatConfig {
    pub fn with_api_key(mut self, key: Option<&str>) -> Self {
        self.api_key = key.map(str::trim).filter(|k| !k.is_empty()).map(String::from);
        self
    }

    pub fn request_url(&self) -> Result<String, ChatError> {
        let key = self.api_key.as_deref().ok_or(ChatError::MissingApiKey)?;
        Ok(format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint.trim_end_matches('/'),
            self.model,
            key
        ))
    }
}

// ---------------- generateContent wire format ----------------

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
    pub generation_config: GenerationConfig,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

pub fn build_request(config: &ChatConfig, prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some(Role::User),
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: config.system_instruction.clone(),
            }],
        },
        generation_config: GenerationConfig {
            temperature: config.temperature,
        },
    }
}

/// Text of the first candidate, parts concatenated. Empty if none.
pub fn extract_text(body: &str) -> Result<String, ChatError> {
    let resp: GenerateContentResponse = serde_json::from_str(body)?;
    let text = resp
        .candidates
        .into_iter()
        .find_map(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
        .unwrap_or_default();
    Ok(text)
}

/// Delivers a serialized request to the service and returns the raw body.
#[allow(async_fn_in_trait)]
pub trait ChatTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<String, ChatError>;
}

async fn try_ask<T: ChatTransport>(
    transport: &T,
    config: &ChatConfig,
    prompt: &str,
) -> Result<String, ChatError> {
    let url = config.request_url()?;
    let body = serde_json::to_string(&build_request(config, prompt))?;
    let raw = transport.post_json(&url, body).await?;
    extract_text(&raw)
}

/// Ask the assistant. Always resolves to displayable text.
pub async fn ask<T: ChatTransport>(transport: &T, config: &ChatConfig, prompt: &str) -> String {
    reply_or_fallback(try_ask(transport, config, prompt).await)
}

/// Fallback policy: errors and empty replies become fixed friendly text.
pub fn reply_or_fallback(result: Result<String, ChatError>) -> String {
    match result {
        Ok(text) if text.trim().is_empty() => EMPTY_REPLY_FALLBACK.to_string(),
        Ok(text) => text,
        Err(e) => {
            log::error!("[chat] request failed: {e}");
            FAILURE_FALLBACK.to_string()
        }
    }
}

/// Conversation shown in the widget plus its in-flight flag.
#[derive(Clone, Debug)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
    loading: bool,
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: Role::Model,
                text: GREETING.to_string(),
            }],
            loading: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Accept `input` as the next prompt. Blank input and sends while a reply
    /// is pending are ignored.
    pub fn begin_send(&mut self, input: &str) -> Option<String> {
        let prompt = input.trim();
        if prompt.is_empty() || self.loading {
            return None;
        }
        self.messages.push(ChatMessage {
            role: Role::User,
            text: prompt.to_string(),
        });
        self.loading = true;
        Some(prompt.to_string())
    }

    pub fn finish(&mut self, reply: String) {
        self.messages.push(ChatMessage {
            role: Role::Model,
            text: reply,
        });
        self.loading = false;
    }
}
