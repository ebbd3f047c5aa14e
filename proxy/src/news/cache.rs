use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use market_lens_core::NewsArticle;

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub articles: Vec<NewsArticle>,
    pub timestamp: DateTime<Utc>,
}

/// Per-company article cache with a fixed TTL. Expired entries are ignored on
/// read and dropped by [`NewsCache::evict_expired`].
#[derive(Clone)]
pub struct NewsCache {
    entries: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl NewsCache {
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// `news_<lowercased company name>`
    pub fn key(company_name: &str) -> String {
        format!("news_{}", company_name.trim().to_lowercase())
    }

    pub fn get(&self, key: &str) -> Option<Vec<NewsArticle>> {
        self.get_at(key, Utc::now())
    }

    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<Vec<NewsArticle>> {
        let entry = self.entries.get(key)?;
        if now - entry.timestamp < self.ttl {
            Some(entry.articles.clone())
        } else {
            None
        }
    }

    pub fn put(&self, key: String, articles: Vec<NewsArticle>) {
        self.put_at(key, articles, Utc::now());
    }

    pub fn put_at(&self, key: String, articles: Vec<NewsArticle>, now: DateTime<Utc>) {
        self.entries.insert(
            key,
            CacheEntry {
                articles,
                timestamp: now,
            },
        );
    }

    /// Drop entries past their TTL. Returns how many were removed.
    pub fn evict_expired(&self) -> usize {
        self.evict_expired_at(Utc::now())
    }

    pub fn evict_expired_at(&self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| now - entry.timestamp < self.ttl);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
