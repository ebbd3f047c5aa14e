use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub proxy_url: String,
    pub db_path: String,
    pub report_dir: String,
    pub dashboard_port: u16,
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Load config from a specific .env file, or the default `.env` if None.
    pub fn from_env_file(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => {
                dotenvy::from_filename(p).with_context(|| format!("Load config file {p}"))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        Self::build_from_env()
    }

    pub fn from_env() -> Result<Self> {
        Self::from_env_file(None)
    }

    fn build_from_env() -> Result<Self> {
        Ok(Self {
            proxy_url: env("PROXY_URL", "http://localhost:8080")
                .trim_end_matches('/')
                .to_string(),
            db_path: env("DB_PATH", "market_lens.db"),
            report_dir: env("REPORT_DIR", "."),
            dashboard_port: parse_env("DASHBOARD_PORT", "3000")?,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", "90")?,
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
