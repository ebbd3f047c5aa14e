use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{token_cost, truncate, ChatModel, Completion, ModelSettings};

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

/// Anthropic Messages API client.
pub struct ClaudeClient {
    api_key: String,
    settings: ModelSettings,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl ClaudeResponse {
    fn into_completion(self) -> Result<Completion> {
        let text = self
            .content
            .into_iter()
            .filter_map(|b| b.text)
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            anyhow::bail!("Claude returned empty response");
        }

        let usage = self.usage.unwrap_or(Usage {
            input_tokens: 0,
            output_tokens: 0,
        });

        // Sonnet: $3/M input, $15/M output
        let cost = token_cost(
            usage.input_tokens,
            usage.output_tokens,
            Decimal::from(3),
            Decimal::from(15),
        );

        debug!(
            "Claude: {} tokens in, {} tokens out, ${cost}",
            usage.input_tokens, usage.output_tokens
        );

        Ok(Completion { text, cost })
    }
}

impl ClaudeClient {
    pub fn new(api_key: &str, settings: ModelSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Build Claude HTTP client")?;

        Ok(Self {
            api_key: api_key.to_string(),
            settings,
            client,
        })
    }
}

#[async_trait]
impl ChatModel for ClaudeClient {
    fn label(&self) -> String {
        format!("claude/{}", self.settings.model)
    }

    async fn complete(&self, system: &str, user_msg: &str) -> Result<Completion> {
        let req = ClaudeRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature.min(1.0),
            system,
            messages: vec![Message {
                role: "user",
                content: user_msg,
            }],
        };

        let resp = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&req)
            .send()
            .await
            .context("Claude API request")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Claude API {status}: {}", truncate(&body, 300));
        }

        let data: ClaudeResponse = resp.json().await.context("Parse Claude response")?;
        data.into_completion()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parses_messages_response() {
        let body = r#"{
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "content": [
                {"type": "text", "text": "{\"analysis\": "},
                {"type": "text", "text": "[]}"}
            ],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 1000000, "output_tokens": 100000}
        }"#;
        let data: ClaudeResponse = serde_json::from_str(body).unwrap();
        let completion = data.into_completion().unwrap();
        assert_eq!(completion.text, r#"{"analysis": []}"#);
        assert_eq!(completion.cost, dec!(4.5));
    }

    #[test]
    fn test_empty_content_is_an_error() {
        let data: ClaudeResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert!(data.into_completion().is_err());
    }
}
