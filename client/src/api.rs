//! HTTP client for the Market Lens proxy.

use anyhow::{Context, Result};
use market_lens_core::{AnalyzeReply, AnalyzeRequest, NewsRequest, NewsResponse};
use tracing::debug;

pub struct ProxyClient {
    base_url: String,
    client: reqwest::Client,
}

impl ProxyClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .context("Build proxy HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST /analyze-market. The proxy answers 200 for both success and error
    /// bodies, so a non-success status here is a transport-level problem.
    pub async fn analyze(&self, company_name: &str) -> Result<AnalyzeReply> {
        let url = format!("{}/analyze-market", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&AnalyzeRequest {
                company_name: company_name.to_string(),
            })
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Proxy {status}: {}", truncate(&body, 300));
        }

        let reply: AnalyzeReply = resp.json().await.context("Parse analyze response")?;
        debug!("Analyze reply for {company_name} received");
        Ok(reply)
    }

    /// POST /fetch-news
    pub async fn fetch_news(&self, company_name: &str) -> Result<NewsResponse> {
        let url = format!("{}/fetch-news", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&NewsRequest {
                company_name: Some(company_name.to_string()),
            })
            .send()
            .await
            .with_context(|| format!("POST {url}"))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Proxy {status}: {}", truncate(&body, 300));
        }

        resp.json().await.context("Parse news response")
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
