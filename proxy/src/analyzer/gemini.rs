use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{token_cost, truncate, ChatModel, Completion, ModelSettings};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini generateContent client.
pub struct GeminiClient {
    api_key: String,
    settings: ModelSettings,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GeminiRequest {
    system_instruction: GeminiContent,
    contents: Vec<GeminiMessage>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiMessage {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<GeminiPart>>,
}

#[derive(Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    candidates_token_count: u32,
}

impl GeminiResponse {
    fn into_completion(self) -> Result<Completion> {
        let text = self
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .map(|parts| parts.into_iter().map(|p| p.text).collect::<Vec<_>>().join(""))
            .unwrap_or_default();

        if text.trim().is_empty() {
            anyhow::bail!("Gemini returned empty response");
        }

        let usage = self.usage_metadata.unwrap_or(UsageMetadata {
            prompt_token_count: 0,
            candidates_token_count: 0,
        });

        // Flash 2.0 Tier 1: $0.10/1M input, $0.40/1M output
        let cost = token_cost(
            usage.prompt_token_count,
            usage.candidates_token_count,
            Decimal::new(10, 2),
            Decimal::new(40, 2),
        );

        debug!(
            "Gemini: {} tokens in, {} tokens out, ${cost}",
            usage.prompt_token_count, usage.candidates_token_count
        );

        Ok(Completion { text, cost })
    }
}

impl GeminiClient {
    pub fn new(api_key: &str, settings: ModelSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Build Gemini HTTP client")?;

        Ok(Self {
            api_key: api_key.to_string(),
            settings,
            client,
        })
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    fn label(&self) -> String {
        format!("gemini/{}", self.settings.model)
    }

    async fn complete(&self, system: &str, user_msg: &str) -> Result<Completion> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.settings.model
        );

        let req = GeminiRequest {
            system_instruction: GeminiContent {
                parts: vec![GeminiPart {
                    text: system.to_string(),
                }],
            },
            contents: vec![GeminiMessage {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: user_msg.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.settings.temperature,
                max_output_tokens: self.settings.max_tokens,
                response_mime_type: "application/json",
            },
        };

        let resp = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&req)
            .send()
            .await
            .context("Gemini API request")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API {status}: {}", truncate(&body, 300));
        }

        let data: GeminiResponse = resp.json().await.context("Parse Gemini response")?;
        data.into_completion()
    }
}
