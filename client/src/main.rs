use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use market_lens::api::ProxyClient;
use market_lens::config::ClientConfig;
use market_lens::db::{AnalyticsStore, MAX_STATS_DAYS};
use market_lens::render::news::render_news;
use market_lens::render::AnalysisView;
use market_lens::report::export_report;
use market_lens::session::{Session, SessionError, SessionState, ToastKind};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "marketlens", about = "Company market analysis, competitor comparison and PDF reports")]
struct Cli {
    /// Load config from a specific .env file
    #[arg(long, global = true)]
    config_file: Option<String>,

    /// Override the proxy base URL
    #[arg(long, global = true)]
    proxy_url: Option<String>,

    /// Override the analytics database path
    #[arg(long, global = true)]
    db_path: Option<String>,

    /// Override the directory PDF reports are written to
    #[arg(long, global = true)]
    report_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze one company and exit
    Analyze {
        company: String,
        /// Also fetch recent news
        #[arg(long)]
        news: bool,
        /// Also export a PDF report
        #[arg(long)]
        pdf: bool,
    },
    /// Interactive session: type company names, :news, :pdf, :reset, :quit
    Repl,
    /// Print daily usage analytics
    Stats {
        #[arg(long, default_value_t = 7)]
        days: i64,
    },
}

struct App {
    client: ProxyClient,
    store: Option<AnalyticsStore>,
    report_dir: PathBuf,
    session: Session,
}

impl App {
    /// Submit, call the proxy, settle the session and print the result.
    async fn analyze(&mut self, raw_name: &str) {
        let company_name = match self.session.submit(raw_name) {
            Ok(name) => name,
            Err(SessionError::BlankName) => {
                self.print_toast();
                return;
            }
            Err(e) => {
                println!("{e}");
                return;
            }
        };

        println!("Analyzing {company_name}...");
        let outcome = self.client.analyze(&company_name).await;
        let completion = match self.session.complete(outcome) {
            Ok(c) => c,
            Err(e) => {
                warn!("Session out of step: {e}");
                return;
            }
        };

        if completion.success {
            if let Some(store) = &self.store {
                if let Err(e) =
                    store.record_analysis(&completion.company_name, completion.elapsed_ms, "success")
                {
                    warn!("Analytics not recorded: {e:#}");
                }
            }
        }

        match self.session.state() {
            SessionState::Success(view) => println!("\n{}\n", view.render()),
            SessionState::Error { .. } => self.print_toast(),
            SessionState::Idle | SessionState::Loading { .. } => {}
        }
    }

    async fn news(&self) {
        let Some(view) = self.current_view() else {
            println!("Run an analysis first.");
            return;
        };
        match self.client.fetch_news(&view.company_name).await {
            Ok(resp) => {
                if resp.limit_exceeded {
                    println!("News rate limit reached; showing general coverage.");
                }
                println!("\n## Latest news\n{}\n", render_news(&resp.articles));
            }
            Err(e) => {
                warn!("News request failed: {e:#}");
                println!("\n## Latest news\n{}\n", render_news(&[]));
            }
        }
    }

    fn export(&self) {
        let Some(view) = self.current_view() else {
            println!("Run an analysis first.");
            return;
        };
        let today = chrono::Utc::now().date_naive();
        match export_report(&self.report_dir, &view.company_name, &view.response.analysis, today) {
            Ok(path) => {
                println!("Report saved to {}", path.display());
                if let Some(store) = &self.store {
                    if let Err(e) = store.record_download(&view.company_name) {
                        warn!("Download not recorded: {e:#}");
                    }
                }
            }
            Err(e) => println!("Failed to export report: {e:#}"),
        }
    }

    fn current_view(&self) -> Option<&AnalysisView> {
        match self.session.state() {
            SessionState::Success(view) => Some(view.as_ref()),
            _ => None,
        }
    }

    fn print_toast(&self) {
        if let Some(toast) = self.session.toast() {
            let tag = match toast.kind {
                ToastKind::Validation => "!",
                ToastKind::Error => "x",
                ToastKind::Success => "+",
            };
            println!("[{tag}] {}", toast.message);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut cfg = ClientConfig::from_env_file(cli.config_file.as_deref())?;
    if let Some(url) = cli.proxy_url {
        cfg.proxy_url = url.trim_end_matches('/').to_string();
    }
    if let Some(path) = cli.db_path {
        cfg.db_path = path;
    }
    if let Some(dir) = cli.report_dir {
        cfg.report_dir = dir;
    }

    if let Command::Stats { days } = cli.command {
        let store = AnalyticsStore::new(&cfg.db_path)?;
        print_stats(&store, days)?;
        return Ok(());
    }

    info!("Market Lens v{} -> {}", env!("CARGO_PKG_VERSION"), cfg.proxy_url);

    // Analytics are best-effort: a broken database never blocks an analysis
    let store = match AnalyticsStore::new(&cfg.db_path) {
        Ok(store) => Some(store),
        Err(e) => {
            warn!("Analytics disabled: {e:#}");
            None
        }
    };

    let mut app = App {
        client: ProxyClient::new(&cfg.proxy_url, cfg.request_timeout_secs)?,
        store,
        report_dir: PathBuf::from(&cfg.report_dir),
        session: Session::new(),
    };

    match cli.command {
        Command::Analyze { company, news, pdf } => {
            app.analyze(&company).await;
            if news {
                app.news().await;
            }
            if pdf {
                app.export();
            }
        }
        Command::Repl => run_repl(&mut app).await?,
        Command::Stats { .. } => {}
    }

    Ok(())
}

async fn run_repl(app: &mut App) -> Result<()> {
    println!("Enter a company name, or :news, :pdf, :reset, :dismiss, :quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            ":quit" | ":q" => break,
            ":news" => app.news().await,
            ":pdf" => app.export(),
            ":reset" => {
                app.session.reset();
                println!("Ready.");
            }
            ":dismiss" => app.session.dismiss_toast(),
            other => app.analyze(other).await,
        }
    }
    Ok(())
}

fn print_stats(store: &AnalyticsStore, days: i64) -> Result<()> {
    let days = days.clamp(1, MAX_STATS_DAYS);
    let stats = store.daily_stats(days)?;
    if stats.is_empty() {
        println!("No activity in the last {days} days.");
        return Ok(());
    }

    println!(
        "{:<12} {:>9} {:>10} {:>10} {:>14}",
        "Date", "Analyses", "Companies", "Downloads", "Avg resp (ms)"
    );
    for day in stats {
        println!(
            "{:<12} {:>9} {:>10} {:>10} {:>14}",
            day.date,
            day.total_analyses,
            day.unique_companies,
            day.total_downloads,
            day.avg_response_time
        );
    }
    Ok(())
}
