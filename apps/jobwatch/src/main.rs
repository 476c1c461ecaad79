mod config;
mod db;
mod errors;
mod filter;
mod models;
mod notify;
mod pipeline;
mod resume;
mod sources;
mod store;

use anyhow::Result;
use chrono::Local;
use tracing::{error, info, info_span, warn, Instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::notify::{EmailNotifier, LogNotifier, Notifier};
use crate::pipeline::{Pipeline, RunSummary};
use crate::resume::load_profile;
use crate::sources::{build_sources, FetchContext};
use crate::store::DedupStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration errors abort before logging is up
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobwatch v{}", env!("CARGO_PKG_VERSION"));

    let run_id = Uuid::new_v4();
    match run(&config).instrument(info_span!("run", %run_id)).await {
        Ok(summary) => {
            info!(
                "Run {run_id} finished: {} new of {} fetched",
                summary.inserted, summary.fetched
            );
            Ok(())
        }
        Err(e) => {
            error!(code = e.code(), "Run {run_id} aborted: {e}");
            Err(e.into())
        }
    }
}

async fn run(config: &Config) -> Result<RunSummary, AppError> {
    let profile = load_profile(&config.resume_path, &config.vocabulary)?;

    let store = DedupStore::open(&config.db_path).await?;

    let ctx = FetchContext::new(config.scraping_delay, Local::now().date_naive())?;
    let sources = build_sources(config, &profile);
    if sources.is_empty() {
        warn!("All sources are disabled; nothing will be fetched");
    }

    let notifier: Box<dyn Notifier> = match &config.mail {
        Some(mail) => Box::new(EmailNotifier::new(mail)?),
        None => {
            warn!("Email sender, password or recipient not configured; new postings will only be logged");
            Box::new(LogNotifier)
        }
    };

    let pipeline = Pipeline {
        profile: &profile,
        criteria: &config.criteria,
        store: &store,
        notifier: notifier.as_ref(),
    };
    let summary = pipeline.run(&sources, &ctx).await?;

    info!("Store holds {} postings", store.count().await?);
    store.close().await;

    Ok(summary)
}
