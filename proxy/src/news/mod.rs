//! Company news lookup: cache, per-caller rate limit, upstream search.

pub mod cache;
pub mod placeholder;
pub mod source;

use std::sync::Arc;

use chrono::Utc;
use market_lens_core::NewsResponse;
use tracing::{debug, info, warn};

use crate::middleware::rate_limit::RateLimiter;
use cache::NewsCache;
use placeholder::placeholder_articles;
use source::NewsSource;

#[derive(Clone)]
pub struct NewsDesk {
    source: Arc<dyn NewsSource>,
    pub cache: NewsCache,
    pub limiter: RateLimiter,
}

impl NewsDesk {
    pub fn new(source: Arc<dyn NewsSource>, cache: NewsCache, limiter: RateLimiter) -> Self {
        Self {
            source,
            cache,
            limiter,
        }
    }

    /// Always yields a non-empty article list.
    pub async fn fetch(&self, company_name: Option<&str>, caller_ip: &str) -> NewsResponse {
        let Some(name) = company_name.map(str::trim).filter(|n| !n.is_empty()) else {
            warn!("News request from {caller_ip} without a company name");
            return NewsResponse {
                articles: placeholder_articles("", Utc::now()),
                limit_exceeded: false,
            };
        };

        let key = NewsCache::key(name);
        if let Some(articles) = self.cache.get(&key) {
            debug!("News cache hit: {key}");
            return NewsResponse {
                articles,
                limit_exceeded: false,
            };
        }

        if let Err(e) = self.limiter.check_ip_limit(caller_ip) {
            warn!("News for {name} refused: {e} ({caller_ip})");
            return NewsResponse {
                articles: placeholder_articles(name, Utc::now()),
                limit_exceeded: true,
            };
        }

        let articles = match self.source.search(name).await {
            Ok(articles) if !articles.is_empty() => {
                info!("News: {} articles for {name}", articles.len());
                articles
            }
            Ok(_) => {
                info!("News: no articles for {name}, serving placeholders");
                placeholder_articles(name, Utc::now())
            }
            Err(e) => {
                warn!("News upstream failed for {name}: {e:#}");
                placeholder_articles(name, Utc::now())
            }
        };

        self.cache.put(key, articles.clone());
        NewsResponse {
            articles,
            limit_exceeded: false,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeNewsSource;
    use super::*;

    fn desk(source: FakeNewsSource, max: u32) -> (NewsDesk, Arc<FakeNewsSource>) {
        let source = Arc::new(source);
        let dyn_source: Arc<dyn NewsSource> = source.clone();
        (
            NewsDesk::new(dyn_source, NewsCache::new(1800), RateLimiter::new(max, 3600)),
            source,
        )
    }

    #[tokio::test]
    async fn test_second_call_is_served_from_cache() {
        let (desk, source) = desk(FakeNewsSource::returning(&["a", "b"]), 100);

        let first = desk.fetch(Some("Tesla"), "1.1.1.1").await;
        let second = desk.fetch(Some("tesla"), "1.1.1.1").await;

        assert_eq!(first, second);
        assert_eq!(first.articles.len(), 2);
        assert_eq!(source.call_count(), 1);
        assert_eq!(desk.limiter.count("1.1.1.1"), 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_yields_cached_placeholders() {
        let (desk, source) = desk(FakeNewsSource::failing(), 100);

        let resp = desk.fetch(Some("Tesla"), "1.1.1.1").await;
        assert!(!resp.articles.is_empty());
        assert!(!resp.limit_exceeded);
        assert!(resp.articles[0].title.contains("Tesla"));

        let again = desk.fetch(Some("Tesla"), "1.1.1.1").await;
        assert_eq!(resp, again);
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_upstream_list_yields_placeholders() {
        let (desk, _) = desk(FakeNewsSource::returning(&[]), 100);
        let resp = desk.fetch(Some("Acme"), "1.1.1.1").await;
        assert_eq!(resp.articles.len(), 2);
    }

    #[tokio::test]
    async fn test_limit_exceeded_skips_upstream() {
        let (desk, source) = desk(FakeNewsSource::returning(&["a"]), 1);

        desk.fetch(Some("Tesla"), "9.9.9.9").await;
        let resp = desk.fetch(Some("Nike"), "9.9.9.9").await;

        assert!(resp.limit_exceeded);
        assert!(!resp.articles.is_empty());
        assert_eq!(source.call_count(), 1);

        // Cached names are still served to a limited caller
        let cached = desk.fetch(Some("Tesla"), "9.9.9.9").await;
        assert!(!cached.limit_exceeded);
    }

    #[tokio::test]
    async fn test_missing_name_returns_defaults() {
        let (desk, source) = desk(FakeNewsSource::returning(&["a"]), 100);

        for name in [None, Some(""), Some("   ")] {
            let resp = desk.fetch(name, "1.1.1.1").await;
            assert!(!resp.articles.is_empty());
            assert!(!resp.limit_exceeded);
        }
        assert_eq!(source.call_count(), 0);
        assert_eq!(desk.limiter.count("1.1.1.1"), 0);
    }
}
