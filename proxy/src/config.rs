use anyhow::{Context, Result};

use crate::analyzer::Provider;

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub port: u16,
    pub llm_provider: Provider,
    pub llm_api_key: String,
    pub llm_model: Option<String>,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    pub llm_repair_pass: bool,
    pub news_api_key: String,
    pub news_api_base: String,
    pub news_max_articles: u32,
    pub news_language: String,
    pub news_cache_ttl_secs: i64,
    pub news_rate_limit_max: u32,
    pub news_rate_limit_window_secs: i64,
    pub sweep_interval_secs: u64,
    pub upstream_timeout_secs: u64,
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self> {
        let llm_provider: Provider = env("LLM_PROVIDER", "openai")
            .parse()
            .context("LLM_PROVIDER must be one of openai, claude, gemini")?;

        // Each provider reads its own key variable.
        let key_var = match llm_provider {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Claude => "CLAUDE_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
        };

        Ok(Self {
            port: parse_env("PORT", "8080")?,
            llm_provider,
            llm_api_key: env(key_var, ""),
            llm_model: std::env::var("LLM_MODEL").ok().filter(|m| !m.trim().is_empty()),
            llm_temperature: parse_env("LLM_TEMPERATURE", "0.7")?,
            llm_max_tokens: parse_env("LLM_MAX_TOKENS", "2000")?,
            llm_repair_pass: env("LLM_REPAIR_PASS", "true") == "true",
            news_api_key: env("NEWS_API_KEY", ""),
            news_api_base: env("NEWS_API_BASE", "https://gnews.io/api/v4"),
            news_max_articles: parse_env("NEWS_MAX_ARTICLES", "2")?,
            news_language: env("NEWS_LANGUAGE", "en"),
            news_cache_ttl_secs: parse_env("NEWS_CACHE_TTL_SECS", "1800")?,
            news_rate_limit_max: parse_env("NEWS_RATE_LIMIT_MAX", "100")?,
            news_rate_limit_window_secs: parse_env("NEWS_RATE_LIMIT_WINDOW_SECS", "3600")?,
            sweep_interval_secs: parse_env("SWEEP_INTERVAL_SECS", "600")?,
            upstream_timeout_secs: parse_env("UPSTREAM_TIMEOUT_SECS", "60")?,
        })
    }
}

fn env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let val = env(key, default);
    val.trim()
        .parse()
        .with_context(|| format!("Invalid value for {key}: {val}"))
}
