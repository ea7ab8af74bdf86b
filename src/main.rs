use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt};

use activity_feed::adapters::in_memory::in_memory_feed_provider::InMemoryFeedProvider;
use activity_feed::core::feed::outcome::Outcome;
use activity_feed::core::ports::FeedProvider;
use activity_feed::shell::config::FeedConfig;

const CONFIG_VAR: &str = "FEED_CONFIG";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_VAR).ok())
        .with_context(|| format!("usage: feed_inspect <config.yaml> (or set {CONFIG_VAR})"))?;

    let config = FeedConfig::from_yaml_file(&path)
        .and_then(FeedConfig::with_env_overrides)
        .with_context(|| format!("loading {path}"))?;
    let provider = InMemoryFeedProvider::from_config(&config)?;

    let users = provider.known_users().await;
    tracing::info!(
        namespace = provider.namespace(),
        per_page = provider.per_page(),
        users = users.len(),
        "feed store ready"
    );

    let totals = provider.total_count(&users).await;
    let unread_counts = provider.unread_count(&users).await;
    let last_reads = provider.last_read(&users).await;
    for user_id in &users {
        let total = totals.get(user_id).and_then(Outcome::success).copied();
        let unread = unread_counts.get(user_id).and_then(Outcome::success).copied();
        let last_read = last_reads
            .get(user_id)
            .and_then(Outcome::success)
            .map(|at| at.to_rfc3339());
        tracing::info!(%user_id, ?total, ?unread, ?last_read, "feed");
    }
    Ok(())
}
