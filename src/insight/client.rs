//! Hosted model client
//!
//! Thin blocking client for the Together.ai chat completions endpoint. The
//! API key comes from `TOGETHER_API_KEY`; when it is absent the caller skips
//! this path entirely and falls back to the local scorer.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{SpendlogError, SpendlogResult};

/// Environment variable holding the Together.ai API key
pub const API_KEY_ENV: &str = "TOGETHER_API_KEY";

/// Chat completions endpoint
const API_URL: &str = "https://api.together.xyz/v1/chat/completions";

/// Model used for health assessments
const MODEL: &str = "meta-llama/Llama-3.3-70B-Instruct-Turbo";

/// Request timeout; a slow model reply should not hang the CLI
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Client for the hosted assessment model
pub struct InsightClient {
    api_key: String,
    api_url: String,
    http: reqwest::blocking::Client,
}

impl InsightClient {
    /// Build a client from `TOGETHER_API_KEY`, or `None` when the key is
    /// missing, empty, or the HTTP client cannot be constructed
    pub fn from_env() -> Option<Self> {
        let api_key = env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty())?;
        Self::new(api_key).ok()
    }

    /// Build a client with an explicit API key
    pub fn new(api_key: String) -> SpendlogResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SpendlogError::Insight(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            api_url: API_URL.to_string(),
            http,
        })
    }

    /// Send one system+user exchange and return the assistant's reply text
    pub fn chat(&self, system: &str, user: &str) -> SpendlogResult<String> {
        let request = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: 0.3,
            max_tokens: 1500,
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| SpendlogError::Insight(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SpendlogError::Insight(format!(
                "API returned {status}: {body}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| SpendlogError::Insight(format!("malformed response: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| SpendlogError::Insight("response contained no choices".into()))
    }
}

/// Extract the JSON payload from a model reply that may wrap it in markdown
/// code fences
pub(crate) fn extract_json_block(reply: &str) -> &str {
    let trimmed = reply.trim();

    for fence in ["```json", "```"] {
        if let Some(start) = trimmed.find(fence) {
            let after = &trimmed[start + fence.len()..];
            if let Some(end) = after.find("```") {
                return after[..end].trim();
            }
            return after.trim();
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_block_plain() {
        assert_eq!(extract_json_block("{\"score\": 80}"), "{\"score\": 80}");
        assert_eq!(extract_json_block("  {\"score\": 80}  "), "{\"score\": 80}");
    }

    #[test]
    fn test_extract_json_block_json_fence() {
        let reply = "Here is the assessment:\n```json\n{\"score\": 80}\n```\nDone.";
        assert_eq!(extract_json_block(reply), "{\"score\": 80}");
    }

    #[test]
    fn test_extract_json_block_bare_fence() {
        let reply = "```\n{\"score\": 55}\n```";
        assert_eq!(extract_json_block(reply), "{\"score\": 55}");
    }

    #[test]
    fn test_extract_json_block_unterminated_fence() {
        let reply = "```json\n{\"score\": 42}";
        assert_eq!(extract_json_block(reply), "{\"score\": 42}");
    }

    #[test]
    fn test_from_env_without_key_is_none() {
        // Guard against a key leaking in from the test environment
        if env::var(API_KEY_ENV).is_err() {
            assert!(InsightClient::from_env().is_none());
        }
    }
}
