use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OpenFlags};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRecord {
    pub id: String,
    pub timestamp: String,
    pub company_name: String,
    pub response_time_ms: i64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRecord {
    pub id: String,
    pub timestamp: String,
    pub company_name: String,
}

/// Widest window `daily_stats` will look back over.
pub const MAX_STATS_DAYS: i64 = 365;

/// One dashboard row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: String,
    pub total_analyses: i64,
    pub unique_companies: i64,
    pub total_downloads: i64,
    pub avg_response_time: i64,
}

/// SQLite store for analysis and report-download events.
pub struct AnalyticsStore {
    conn: Connection,
}

impl AnalyticsStore {
    pub fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).with_context(|| format!("Open DB: {db_path}"))?;
        Self::with_schema(conn)
    }

    /// Read-only handle for the dashboard. Fails if the file does not exist.
    pub fn open_read_only(db_path: &str) -> Result<Self> {
        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Open DB read-only: {db_path}"))?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Open in-memory DB")?;
        Self::with_schema(conn)
    }

    fn with_schema(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS analyses (
                id TEXT PRIMARY KEY,
                timestamp TEXT NOT NULL,
                company_name TEXT NOT NULL,
                response_time_ms INTEGER NOT NULL,
                status TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS downloads (
                id TEXT PRIMARY KEY,
                timestamp TEXT NOT NULL,
                company_name TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_analyses_time ON analyses(timestamp);
            CREATE INDEX IF NOT EXISTS idx_downloads_time ON downloads(timestamp);
            ",
        )
        .context("Create tables")?;

        Ok(Self { conn })
    }

    pub fn record_analysis(
        &self,
        company_name: &str,
        response_time_ms: u64,
        status: &str,
    ) -> Result<AnalyticsRecord> {
        self.record_analysis_at(company_name, response_time_ms, status, Utc::now())
    }

    pub fn record_analysis_at(
        &self,
        company_name: &str,
        response_time_ms: u64,
        status: &str,
        at: DateTime<Utc>,
    ) -> Result<AnalyticsRecord> {
        let record = AnalyticsRecord {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: at.to_rfc3339(),
            company_name: company_name.to_string(),
            response_time_ms: response_time_ms as i64,
            status: status.to_string(),
        };
        self.conn
            .execute(
                "INSERT INTO analyses (id, timestamp, company_name, response_time_ms, status)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.id,
                    record.timestamp,
                    record.company_name,
                    record.response_time_ms,
                    record.status,
                ],
            )
            .context("Insert analysis")?;
        Ok(record)
    }

    pub fn record_download(&self, company_name: &str) -> Result<DownloadRecord> {
        self.record_download_at(company_name, Utc::now())
    }

    pub fn record_download_at(&self, company_name: &str, at: DateTime<Utc>) -> Result<DownloadRecord> {
        let record = DownloadRecord {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: at.to_rfc3339(),
            company_name: company_name.to_string(),
        };
        self.conn
            .execute(
                "INSERT INTO downloads (id, timestamp, company_name) VALUES (?1, ?2, ?3)",
                params![record.id, record.timestamp, record.company_name],
            )
            .context("Insert download")?;
        Ok(record)
    }

    /// Most recent analyses, newest first.
    pub fn recent_analyses(&self, limit: usize) -> Result<Vec<AnalyticsRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, timestamp, company_name, response_time_ms, status
             FROM analyses ORDER BY timestamp DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(AnalyticsRecord {
                id: row.get(0)?,
                timestamp: row.get(1)?,
                company_name: row.get(2)?,
                response_time_ms: row.get(3)?,
                status: row.get(4)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>()
            .context("Read recent analyses")
    }

    /// Per-day totals for the last `days` days (clamped to 1..=365), oldest first.
    pub fn daily_stats(&self, days: i64) -> Result<Vec<DailyStats>> {
        let days = days.clamp(1, MAX_STATS_DAYS);
        self.daily_stats_since(Utc::now() - Duration::days(days))
    }

    pub fn daily_stats_since(&self, since: DateTime<Utc>) -> Result<Vec<DailyStats>> {
        let cutoff = since.to_rfc3339();
        let mut by_day: BTreeMap<String, DailyStats> = BTreeMap::new();

        let mut stmt = self.conn.prepare(
            "SELECT substr(timestamp, 1, 10) AS day,
                    COUNT(*),
                    COUNT(DISTINCT lower(company_name)),
                    CAST(ROUND(AVG(response_time_ms)) AS INTEGER)
             FROM analyses
             WHERE timestamp >= ?1
             GROUP BY day",
        )?;
        let rows = stmt.query_map(params![cutoff], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, Option<i64>>(3)?,
            ))
        })?;
        for row in rows {
            let (day, total, unique, avg) = row.context("Read analysis stats")?;
            let entry = by_day.entry(day.clone()).or_default();
            entry.date = day;
            entry.total_analyses = total;
            entry.unique_companies = unique;
            entry.avg_response_time = avg.unwrap_or(0);
        }

        let mut stmt = self.conn.prepare(
            "SELECT substr(timestamp, 1, 10) AS day, COUNT(*)
             FROM downloads
             WHERE timestamp >= ?1
             GROUP BY day",
        )?;
        let rows = stmt.query_map(params![cutoff], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;
        for row in rows {
            let (day, downloads) = row.context("Read download stats")?;
            let entry = by_day.entry(day.clone()).or_default();
            entry.date = day;
            entry.total_downloads = downloads;
        }

        Ok(by_day.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_daily_stats_aggregates_per_day() {
        let store = AnalyticsStore::open_in_memory().unwrap();
        store.record_analysis_at("Tesla", 1000, "success", at(1, 9)).unwrap();
        store.record_analysis_at("tesla", 3000, "success", at(1, 10)).unwrap();
        store.record_analysis_at("BYD", 2000, "success", at(1, 11)).unwrap();
        store.record_analysis_at("Apple", 500, "success", at(2, 9)).unwrap();
        store.record_download_at("Tesla", at(1, 12)).unwrap();
        store.record_download_at("Nike", at(3, 8)).unwrap();

        let stats = store.daily_stats_since(at(1, 0)).unwrap();
        assert_eq!(stats.len(), 3);

        assert_eq!(
            stats[0],
            DailyStats {
                date: "2024-05-01".to_string(),
                total_analyses: 3,
                unique_companies: 2,
                total_downloads: 1,
                avg_response_time: 2000,
            }
        );
        assert_eq!(stats[1].total_analyses, 1);
        assert_eq!(stats[1].total_downloads, 0);
        assert_eq!(stats[2].date, "2024-05-03");
        assert_eq!(stats[2].total_analyses, 0);
        assert_eq!(stats[2].total_downloads, 1);
    }

    #[test]
    fn test_cutoff_excludes_older_rows() {
        let store = AnalyticsStore::open_in_memory().unwrap();
        store.record_analysis_at("Old", 100, "success", at(1, 9)).unwrap();
        store.record_analysis_at("New", 100, "success", at(5, 9)).unwrap();

        let stats = store.daily_stats_since(at(4, 0)).unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].date, "2024-05-05");
    }

    #[test]
    fn test_recent_analyses_newest_first() {
        let store = AnalyticsStore::open_in_memory().unwrap();
        store.record_analysis_at("First", 100, "success", at(1, 9)).unwrap();
        store.record_analysis_at("Second", 200, "success", at(2, 9)).unwrap();

        let recent = store.recent_analyses(10).unwrap();
        assert_eq!(recent[0].company_name, "Second");
        assert_eq!(recent[1].response_time_ms, 100);
    }

    #[test]
    fn test_daily_stats_clamps_extreme_windows() {
        let store = AnalyticsStore::open_in_memory().unwrap();
        store.record_analysis("Tesla", 800, "success").unwrap();

        assert_eq!(store.daily_stats(i64::MAX).unwrap().len(), 1);
        assert_eq!(store.daily_stats(i64::MIN).unwrap().len(), 1);
        assert_eq!(store.daily_stats(0).unwrap()[0].total_analyses, 1);
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let json = serde_json::to_value(DailyStats::default()).unwrap();
        assert!(json.get("totalAnalyses").is_some());
        assert!(json.get("avgResponseTime").is_some());
    }
}
