use anyhow::{Context, Result};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use latest_post_card::app::{load_latest_post, write_output};
use latest_post_card::config::Config;
use latest_post_card::contentful::ContentfulClient;
use latest_post_card::page::PostCardPage;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    init_tracing()?;

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(
        space = %config.contentful.space_id,
        environment = %config.contentful.environment_id,
        "Configuration loaded"
    );

    let client = ContentfulClient::new(&config).context("Failed to create Contentful client")?;

    // The static layout stays as-is unless the load renders into it
    let mut page = PostCardPage::default();
    let outcome = load_latest_post(&client, &config.detail_page, &mut page.targets()).await;
    match serde_json::to_string(&outcome) {
        Ok(json) => debug!(outcome = %json, "Page load finished"),
        Err(e) => debug!(?outcome, "Page load finished (outcome not serializable: {e})"),
    }

    write_output(
        config.output_path.as_deref(),
        &page.to_document().into_string(),
    )
    .await
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,latest_post_card=debug"));

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    // Logs go to stderr; stdout carries the rendered HTML
    if use_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    }

    Ok(())
}
