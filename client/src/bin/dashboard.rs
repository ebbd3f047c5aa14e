//! Market Lens analytics dashboard
//!
//! Serves daily usage totals read from the client's SQLite database.
//!
//! Usage: cargo run --bin dashboard
//! Then open http://localhost:3000

use std::path::Path;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use market_lens::config::ClientConfig;
use market_lens::db::{AnalyticsStore, DailyStats, MAX_STATS_DAYS};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

const DEFAULT_DAYS: i64 = 7;

// ── Types ──

struct DashboardState {
    db_path: String,
}

type SharedState = Arc<DashboardState>;

#[derive(Deserialize)]
struct AnalyticsQuery {
    days: Option<i64>,
}

// ── Main ──

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cfg = ClientConfig::from_env()?;
    let port = cfg.dashboard_port;

    println!("══════════════════════════════════════════════");
    println!("  Market Lens Analytics Dashboard");
    println!("  http://localhost:{}", port);
    println!("  DB: {}", cfg.db_path);
    println!("══════════════════════════════════════════════");

    let state: SharedState = Arc::new(DashboardState {
        db_path: cfg.db_path,
    });

    let app = router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Dashboard running at http://localhost:{}", port);
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(serve_html))
        .route("/api/analytics", get(api_analytics))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── API Handlers ──

async fn serve_html() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// GET /api/analytics?days=N
async fn api_analytics(
    State(state): State<SharedState>,
    Query(params): Query<AnalyticsQuery>,
) -> impl IntoResponse {
    let days = params.days.unwrap_or(DEFAULT_DAYS).clamp(1, MAX_STATS_DAYS);

    match load_stats(&state.db_path, days) {
        Ok(stats) => (StatusCode::OK, Json(json!(stats))),
        Err(e) => {
            warn!("Failed to load analytics: {e:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to load analytics" })),
            )
        }
    }
}

// ── DB helpers ──

/// A missing database means nothing has been recorded yet.
fn load_stats(db_path: &str, days: i64) -> anyhow::Result<Vec<DailyStats>> {
    if !Path::new(db_path).exists() {
        return Ok(Vec::new());
    }
    AnalyticsStore::open_read_only(db_path)?.daily_stats(days)
}

// ── HTML ──

const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Market Lens Analytics</title>
<style>
* { margin: 0; padding: 0; box-sizing: border-box; }
body { background: #0a0e17; color: #c9d1d9; font-family: 'Cascadia Code', 'Fira Code', 'JetBrains Mono', monospace; font-size: 13px; }
.header { background: #161b22; border-bottom: 1px solid #30363d; padding: 16px 24px; display: flex; justify-content: space-between; align-items: center; }
.header h1 { font-size: 18px; color: #58a6ff; font-weight: 600; }
.header select { background: #0d1117; color: #c9d1d9; border: 1px solid #30363d; border-radius: 4px; padding: 6px 10px; font-family: inherit; }
.metrics { display: flex; gap: 12px; padding: 16px 24px; flex-wrap: wrap; }
.metric-card { background: #161b22; border: 1px solid #30363d; border-radius: 8px; padding: 14px 18px; flex: 1; min-width: 140px; }
.metric-card .label { font-size: 11px; color: #8b949e; text-transform: uppercase; letter-spacing: 0.5px; }
.metric-card .value { font-size: 22px; font-weight: 700; margin-top: 4px; color: #58a6ff; }
.section { padding: 0 24px 16px; }
.section-title { font-size: 12px; color: #8b949e; text-transform: uppercase; letter-spacing: 0.5px; margin-bottom: 8px; font-weight: 600; padding-top: 12px; }
.bars { background: #161b22; border: 1px solid #30363d; border-radius: 8px; padding: 12px; }
.bar-row { display: flex; align-items: center; gap: 8px; margin: 4px 0; }
.bar-row .day { width: 90px; color: #8b949e; }
.bar { height: 10px; border-radius: 2px; }
.bar.analyses { background: #2563eb; }
.bar.downloads { background: #16a34a; }
table { width: 100%; border-collapse: collapse; background: #161b22; border: 1px solid #30363d; border-radius: 8px; }
th, td { padding: 8px 12px; text-align: left; border-bottom: 1px solid #21262d; }
th { font-size: 11px; color: #8b949e; text-transform: uppercase; }
.empty { color: #8b949e; padding: 24px; text-align: center; }
</style>
</head>
<body>
<div class="header">
  <h1>Market Lens Analytics</h1>
  <select id="days" onchange="load()">
    <option value="7">Last 7 days</option>
    <option value="30">Last 30 days</option>
    <option value="90">Last 90 days</option>
  </select>
</div>
<div class="metrics">
  <div class="metric-card"><div class="label">Analyses</div><div class="value" id="m-analyses">-</div></div>
  <div class="metric-card"><div class="label">Peak Unique Companies</div><div class="value" id="m-companies">-</div></div>
  <div class="metric-card"><div class="label">PDF Downloads</div><div class="value" id="m-downloads">-</div></div>
  <div class="metric-card"><div class="label">Avg Response</div><div class="value" id="m-latency">-</div></div>
</div>
<div class="section">
  <div class="section-title">Downloads vs Analyses</div>
  <div class="bars" id="bars"></div>
</div>
<div class="section">
  <div class="section-title">Detailed Analytics</div>
  <table>
    <thead><tr><th>Date</th><th>Total Analyses</th><th>Unique Companies</th><th>Downloads</th><th>Avg. Response Time (ms)</th></tr></thead>
    <tbody id="rows"></tbody>
  </table>
</div>
<script>
async function load() {
  const days = document.getElementById('days').value;
  const res = await fetch('/api/analytics?days=' + days);
  const data = await res.json();
  const rows = document.getElementById('rows');
  const bars = document.getElementById('bars');
  if (!Array.isArray(data) || data.length === 0) {
    rows.innerHTML = '<tr><td colspan="5" class="empty">No activity recorded yet</td></tr>';
    bars.innerHTML = '<div class="empty">No activity recorded yet</div>';
    ['m-analyses', 'm-companies', 'm-downloads', 'm-latency'].forEach(id => document.getElementById(id).textContent = '0');
    return;
  }
  const total = data.reduce((s, d) => s + d.totalAnalyses, 0);
  const downloads = data.reduce((s, d) => s + d.totalDownloads, 0);
  const peak = Math.max(...data.map(d => d.uniqueCompanies));
  const weighted = data.reduce((s, d) => s + d.avgResponseTime * d.totalAnalyses, 0);
  document.getElementById('m-analyses').textContent = total;
  document.getElementById('m-companies').textContent = peak;
  document.getElementById('m-downloads').textContent = downloads;
  document.getElementById('m-latency').textContent = total ? Math.round(weighted / total) + 'ms' : '-';
  const max = Math.max(1, ...data.map(d => Math.max(d.totalAnalyses, d.totalDownloads)));
  bars.innerHTML = data.map(d =>
    '<div class="bar-row"><span class="day">' + d.date + '</span>' +
    '<div class="bar analyses" style="width:' + (d.totalAnalyses / max * 300) + 'px"></div>' +
    '<div class="bar downloads" style="width:' + (d.totalDownloads / max * 300) + 'px"></div></div>'
  ).join('');
  rows.innerHTML = data.map(d =>
    '<tr><td>' + d.date + '</td><td>' + d.totalAnalyses + '</td><td>' + d.uniqueCompanies +
    '</td><td>' + d.totalDownloads + '</td><td>' + d.avgResponseTime + 'ms</td></tr>'
  ).join('');
}
load();
setInterval(load, 30000);
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_db_is_empty() {
        let path = std::env::temp_dir().join(format!("missing-{}.db", uuid::Uuid::new_v4()));
        let stats = load_stats(path.to_str().unwrap(), 7).unwrap();
        assert!(stats.is_empty());
    }

    #[test]
    fn test_reads_recorded_activity() {
        let path = std::env::temp_dir().join(format!("lens-{}.db", uuid::Uuid::new_v4()));
        let path_str = path.to_str().unwrap();
        {
            let store = AnalyticsStore::new(path_str).unwrap();
            store.record_analysis("Tesla", 1200, "success").unwrap();
            store.record_download("Tesla").unwrap();
        }

        let stats = load_stats(path_str, 7).unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].total_analyses, 1);
        assert_eq!(stats[0].total_downloads, 1);
        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_html_served() {
        let Html(body) = serve_html().await;
        assert!(body.contains("/api/analytics"));
        let _ = router(Arc::new(DashboardState {
            db_path: "unused.db".to_string(),
        }));
    }
}
