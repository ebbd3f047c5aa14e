use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use market_lens_core::{NewsRequest, NewsResponse};
use tracing::warn;

use crate::middleware::client_ip::client_ip;
use crate::AppState;

/// POST /fetch-news
///
/// Always answers 200 with a non-empty article list.
pub async fn fetch_news(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    payload: Result<Json<NewsRequest>, JsonRejection>,
) -> (StatusCode, Json<NewsResponse>) {
    let req = payload.map(|Json(r)| r).unwrap_or_else(|rejection| {
        warn!("Unreadable news request: {}", rejection.body_text());
        NewsRequest::default()
    });

    let ip = client_ip(&headers, peer);
    let resp = state.news.fetch(req.company_name.as_deref(), &ip).await;
    (StatusCode::OK, Json(resp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    use crate::analysis::MarketAnalyst;
    use crate::test_state;

    fn peer() -> ConnectInfo<SocketAddr> {
        ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000)))
    }

    #[tokio::test]
    async fn test_repeat_request_is_cached_per_forwarded_ip() {
        let state = test_state(MarketAnalyst::new(None, false));
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("198.51.100.4"));
        let req = || -> Result<Json<NewsRequest>, JsonRejection> {
            Ok(Json(NewsRequest {
                company_name: Some("Tesla".to_string()),
            }))
        };

        let (status, Json(first)) =
            fetch_news(State(state.clone()), peer(), headers.clone(), req()).await;
        let (_, Json(second)) = fetch_news(State(state.clone()), peer(), headers, req()).await;

        assert_eq!(status, StatusCode::OK);
        assert!(!first.articles.is_empty());
        assert_eq!(first, second);
        assert_eq!(state.news.limiter.count("198.51.100.4"), 1);
        assert_eq!(state.news.limiter.count("127.0.0.1"), 0);
    }

    #[tokio::test]
    async fn test_missing_name_returns_default_articles() {
        let state = test_state(MarketAnalyst::new(None, false));
        let (status, Json(resp)) = fetch_news(
            State(state),
            peer(),
            HeaderMap::new(),
            Ok(Json(NewsRequest::default())),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(!resp.articles.is_empty());
        assert!(!resp.limit_exceeded);
    }
}
