use anyhow::{Context, Result};
use async_trait::async_trait;
use market_lens_core::NewsArticle;
use serde::Deserialize;
use tracing::debug;

use crate::analyzer::truncate;

/// A news search backend.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<NewsArticle>>;
}

/// GNews search API client (https://gnews.io/).
pub struct GNewsClient {
    api_key: String,
    base_url: String,
    max_articles: u32,
    language: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<UpstreamArticle>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpstreamArticle {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: String,
    #[serde(default)]
    source: Option<UpstreamSource>,
    #[serde(default)]
    published_at: String,
}

#[derive(Deserialize)]
struct UpstreamSource {
    #[serde(default)]
    name: String,
}

impl From<UpstreamArticle> for NewsArticle {
    fn from(a: UpstreamArticle) -> Self {
        NewsArticle {
            title: a.title,
            description: a.description.unwrap_or_default(),
            url: a.url,
            source: a
                .source
                .map(|s| s.name)
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            published_date: a.published_at,
        }
    }
}

impl GNewsClient {
    pub fn new(
        api_key: &str,
        base_url: &str,
        max_articles: u32,
        language: &str,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .context("Build news HTTP client")?;

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            max_articles,
            language: language.to_string(),
            client,
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[async_trait]
impl NewsSource for GNewsClient {
    async fn search(&self, query: &str) -> Result<Vec<NewsArticle>> {
        if !self.is_configured() {
            anyhow::bail!("NEWS_API_KEY not configured");
        }

        let max = self.max_articles.to_string();
        let resp = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("q", query),
                ("lang", self.language.as_str()),
                ("max", max.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("News API request")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("News API {status}: {}", truncate(&body, 300));
        }

        let data: SearchResponse = resp.json().await.context("Parse news response")?;
        debug!("News API returned {} articles for {query}", data.articles.len());

        Ok(data.articles.into_iter().map(NewsArticle::from).collect())
    }
}
