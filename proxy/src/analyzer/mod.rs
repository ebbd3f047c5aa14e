pub mod claude;
pub mod gemini;
pub mod openai;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

pub use claude::ClaudeClient;
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

use crate::config::ProxyConfig;

/// Text returned by a chat model plus its estimated USD cost.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub cost: Decimal,
}

/// A single-turn chat completion backend.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Short label for logs, e.g. `openai/gpt-3.5-turbo`.
    fn label(&self) -> String;

    async fn complete(&self, system: &str, user_msg: &str) -> Result<Completion>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Claude,
    Gemini,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenAi => write!(f, "openai"),
            Provider::Claude => write!(f, "claude"),
            Provider::Gemini => write!(f, "gemini"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown LLM provider: {0}")]
pub struct UnknownProvider(String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "gpt" => Ok(Provider::OpenAi),
            "claude" | "anthropic" => Ok(Provider::Claude),
            "gemini" | "google" => Ok(Provider::Gemini),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

/// Sampling knobs shared by every provider.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

/// Build the configured backend, or `None` when its API key is missing.
///
/// A missing key is a recoverable configuration error: the analysis service
/// answers with fallback data instead of refusing to start.
pub fn build_model(config: &ProxyConfig) -> Result<Option<Arc<dyn ChatModel>>> {
    if config.llm_api_key.trim().is_empty() {
        return Ok(None);
    }

    let default_model = match config.llm_provider {
        Provider::OpenAi => openai::DEFAULT_MODEL,
        Provider::Claude => claude::DEFAULT_MODEL,
        Provider::Gemini => gemini::DEFAULT_MODEL,
    };

    let settings = ModelSettings {
        model: config
            .llm_model
            .clone()
            .unwrap_or_else(|| default_model.to_string()),
        temperature: config.llm_temperature,
        max_tokens: config.llm_max_tokens,
        timeout_secs: config.upstream_timeout_secs,
    };

    let model: Arc<dyn ChatModel> = match config.llm_provider {
        Provider::OpenAi => Arc::new(OpenAiClient::new(&config.llm_api_key, settings)?),
        Provider::Claude => Arc::new(ClaudeClient::new(&config.llm_api_key, settings)?),
        Provider::Gemini => Arc::new(GeminiClient::new(&config.llm_api_key, settings)?),
    };
    Ok(Some(model))
}

/// Cut an upstream error body down to something loggable.
pub(crate) fn truncate(body: &str, max: usize) -> &str {
    match body.char_indices().nth(max) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

/// Cost of a call given per-million-token prices.
pub(crate) fn token_cost(
    input_tokens: u32,
    output_tokens: u32,
    input_per_million: Decimal,
    output_per_million: Decimal,
) -> Decimal {
    let million = Decimal::from(1_000_000);
    Decimal::from(input_tokens) * input_per_million / million
        + Decimal::from(output_tokens) * output_per_million / million
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_provider_parse() {
        assert_eq!("OpenAI".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert_eq!("anthropic".parse::<Provider>().unwrap(), Provider::Claude);
        assert_eq!(" gemini ".parse::<Provider>().unwrap(), Provider::Gemini);
        assert!("llama".parse::<Provider>().is_err());
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[test]
    fn test_token_cost() {
        // 1M in at $3 + 500k out at $15
        assert_eq!(token_cost(1_000_000, 500_000, dec!(3), dec!(15)), dec!(10.5));
        assert_eq!(token_cost(0, 0, dec!(3), dec!(15)), Decimal::ZERO);
    }
}
