use std::time::Duration;
use tracing::{debug, info};

use crate::middleware::rate_limit::RateLimiter;
use crate::news::cache::NewsCache;

/// Background task that evicts expired news cache entries and elapsed
/// rate-limit windows.
pub async fn run_sweeper(cache: NewsCache, rate_limiter: RateLimiter, interval_secs: u64) {
    let interval = Duration::from_secs(interval_secs.max(1));

    info!(
        "Sweeper started (interval: {}s / {:.1}m)",
        interval_secs,
        interval_secs as f64 / 60.0
    );

    loop {
        tokio::time::sleep(interval).await;
        sweep(&cache, &rate_limiter);
    }
}

/// One eviction pass. Returns (cache entries, rate-limit windows) removed.
pub fn sweep(cache: &NewsCache, rate_limiter: &RateLimiter) -> (usize, usize) {
    let evicted = cache.evict_expired();
    let windows = rate_limiter.cleanup_stale_entries();
    if evicted + windows > 0 {
        info!("Sweep: dropped {evicted} cache entries, {windows} rate-limit windows");
    } else {
        debug!("Sweep: nothing to drop ({} cached)", cache.len());
    }
    (evicted, windows)
}
