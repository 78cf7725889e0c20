//! Streaming chat-completion client for the Groq API.
//!
//! Builds one streaming completion call per incoming request and exposes the
//! result as a forward-only stream of text fragments. The stream is
//! single-pass and not restartable; a failed call is never retried.

use std::pin::Pin;

use async_stream::stream;
use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::Stream;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_stream::StreamExt;
use tracing::debug;

use crate::config::Config;
use crate::relay::prompt::{MAX_TOKENS, MODEL, SYSTEM_PROMPT, TEMPERATURE, TOP_P};

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Invalid API key format")]
    Configuration,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Failed to decode stream chunk: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A forward-only, single-pass sequence of generated text fragments.
///
/// Concatenating the fragments in arrival order reconstitutes the full model
/// answer; no fragment has independent meaning.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, RelayError>> + Send>>;

/// The seam between the endpoint layer and the upstream model API.
#[async_trait]
pub trait CompletionRelay: Send + Sync {
    /// Start one streaming completion for `query`.
    ///
    /// Errors here mean the call could not be established; errors after the
    /// stream has started surface as items of the returned stream.
    async fn stream_completion(&self, query: &str) -> Result<FragmentStream, RelayError>;
}

// ─── Wire Types ────────────────────────────────────────────────────────────

/// Chat completion request (OpenAI-compatible subset).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
    top_p: f64,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Streaming chat completion chunk (OpenAI-compatible subset).
#[derive(Debug, Deserialize)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

// ─── Client ────────────────────────────────────────────────────────────────

/// Groq chat-completion API client.
pub struct GroqClient {
    client: reqwest::Client,
    base_url: String,
}

impl GroqClient {
    /// Build a client with the API key installed as a default bearer header.
    pub fn new(config: &Config) -> Result<Self, RelayError> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", config.groq_api_key)
            .parse::<HeaderValue>()
            .map_err(|_| RelayError::Configuration)?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.groq_base_url.clone(),
        })
    }

    fn build_request<'a>(&self, query: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: query,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
            stream: true,
        }
    }
}

#[async_trait]
impl CompletionRelay for GroqClient {
    async fn stream_completion(&self, query: &str) -> Result<FragmentStream, RelayError> {
        let request = self.build_request(query);
        let url = format!("{}/chat/completions", self.base_url);

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Api { status, body });
        }

        let mut events = Box::pin(response.bytes_stream().eventsource());

        let fragments = stream! {
            while let Some(event) = events.next().await {
                let event = match event {
                    Ok(event) => event,
                    Err(e) => {
                        yield Err(RelayError::Stream(e.to_string()));
                        return;
                    }
                };

                if event.data == "[DONE]" {
                    break;
                }

                let chunk = match serde_json::from_str::<ChatCompletionChunk>(&event.data) {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        yield Err(RelayError::Decode(e));
                        return;
                    }
                };

                // Only the first choice's incremental content is relayed;
                // an empty delta emits nothing.
                if let Some(text) = chunk.choices.into_iter().next().and_then(|c| c.delta.content) {
                    if !text.is_empty() {
                        yield Ok(text);
                    }
                }
            }
            debug!("Upstream stream complete");
        };

        Ok(Box::pin(fragments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            auth_secret: Some("secret".to_string()),
            groq_api_key: "gsk-test".to_string(),
            groq_base_url: "http://127.0.0.1:9".to_string(),
        }
    }

    #[test]
    fn test_chunk_decodes_content() {
        let data = r#"{"choices":[{"delta":{"role":"assistant","content":"Here"}}]}"#;
        let chunk: ChatCompletionChunk = serde_json::from_str(data).unwrap();
        let text = chunk
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.delta.content);
        assert_eq!(text.as_deref(), Some("Here"));
    }

    #[test]
    fn test_chunk_without_choices_decodes() {
        let chunk: ChatCompletionChunk = serde_json::from_str("{}").unwrap();
        assert!(chunk.choices.is_empty());
    }

    #[test]
    fn test_request_carries_fixed_parameters() {
        let client = GroqClient::new(&test_config()).unwrap();
        let request = serde_json::to_value(client.build_request("write a loop")).unwrap();

        assert_eq!(request["model"], MODEL);
        assert_eq!(request["temperature"], 0.6);
        assert_eq!(request["max_tokens"], 1500);
        assert_eq!(request["top_p"], 0.9);
        assert_eq!(request["stream"], true);
        assert_eq!(request["messages"][0]["role"], "system");
        assert_eq!(request["messages"][1]["role"], "user");
        assert_eq!(request["messages"][1]["content"], "write a loop");
    }
}
