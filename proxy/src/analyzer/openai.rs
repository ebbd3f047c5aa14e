use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{token_cost, truncate, ChatModel, Completion, ModelSettings};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI chat-completions client.
pub struct OpenAiClient {
    api_key: String,
    settings: ModelSettings,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

impl ChatResponse {
    fn into_completion(self) -> Result<Completion> {
        let text = self
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if text.trim().is_empty() {
            anyhow::bail!("OpenAI returned empty response");
        }

        let usage = self.usage.unwrap_or(Usage {
            prompt_tokens: 0,
            completion_tokens: 0,
        });

        // gpt-3.5-turbo list price: $0.50/1M input, $1.50/1M output
        let cost = token_cost(
            usage.prompt_tokens,
            usage.completion_tokens,
            Decimal::new(50, 2),
            Decimal::new(150, 2),
        );

        debug!(
            "OpenAI: {} tokens in, {} tokens out, ${cost}",
            usage.prompt_tokens, usage.completion_tokens
        );

        Ok(Completion { text, cost })
    }
}

impl OpenAiClient {
    pub fn new(api_key: &str, settings: ModelSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Build OpenAI HTTP client")?;

        Ok(Self {
            api_key: api_key.to_string(),
            settings,
            client,
        })
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    fn label(&self) -> String {
        format!("openai/{}", self.settings.model)
    }

    async fn complete(&self, system: &str, user_msg: &str) -> Result<Completion> {
        let req = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: user_msg,
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let resp = self
            .client
            .post(ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .context("OpenAI API request")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI API {status}: {}", truncate(&body, 300));
        }

        let data: ChatResponse = resp.json().await.context("Parse OpenAI response")?;
        data.into_completion()
    }
}
