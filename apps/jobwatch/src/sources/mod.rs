//! Source fetchers: one adapter per job board, each mapping the board's HTML
//! into `RawPosting`s.
//!
//! HTML is parsed in plain functions that return owned records; `scraper`
//! documents never live across an `.await`.

pub mod dates;
pub mod html;
pub mod un_careers;
pub mod unjobs;
pub mod wellfound;

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, UPGRADE_INSECURE_REQUESTS};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::posting::{RawPosting, SourceName};
use crate::resume::query::search_query;
use crate::resume::ResumeProfile;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// A job board. Adapters never branch on each other; the pipeline only sees `RawPosting`s.
#[async_trait]
pub trait JobSource: Send + Sync {
    fn name(&self) -> SourceName;

    async fn fetch(&self, ctx: &FetchContext) -> Result<Vec<RawPosting>, FetchError>;
}

/// Shared HTTP client plus the per-run facts adapters need.
pub struct FetchContext {
    client: Client,
    delay: Duration,
    today: NaiveDate,
}

impl FetchContext {
    pub fn new(delay: Duration, today: NaiveDate) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            delay,
            today,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// GETs a page and returns its body. Non-2xx statuses are errors.
    pub async fn get_html(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {url}");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    /// Politeness delay between requests to the same board.
    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    /// Fetches a job page and extracts its description. Failures are logged and yield `None`.
    pub async fn fetch_description(&self, url: &str) -> Option<String> {
        self.pause().await;
        match self.get_html(url).await {
            Ok(page) => {
                let description = html::extract_description(&page);
                if description.is_none() {
                    warn!("No description found on {url}");
                }
                description
            }
            Err(e) => {
                warn!("Failed to fetch description from {url}: {e}");
                None
            }
        }
    }
}

/// The enabled adapters, with search queries built from the resume profile.
pub fn build_sources(config: &Config, profile: &ResumeProfile) -> Vec<Box<dyn JobSource>> {
    let mut sources: Vec<Box<dyn JobSource>> = Vec::new();

    for name in SourceName::ALL {
        if !config.sources.is_enabled(name) {
            info!("Source {name} disabled by configuration");
            continue;
        }
        let query = search_query(profile, name);
        let source: Box<dyn JobSource> = match name {
            SourceName::UnJobs => Box::new(unjobs::UnJobsSource::new(query.unwrap_or_default())),
            SourceName::UnCareers => Box::new(un_careers::UnCareersSource),
            SourceName::Wellfound => {
                Box::new(wellfound::WellfoundSource::new(query.unwrap_or_default()))
            }
        };
        sources.push(source);
    }

    sources
}

/// Runs every source in turn. A failing source is logged and skipped.
pub async fn fetch_all(sources: &[Box<dyn JobSource>], ctx: &FetchContext) -> Vec<RawPosting> {
    let mut all = Vec::new();

    for source in sources {
        let name = source.name();
        info!("Scraping {name}...");
        match source.fetch(ctx).await {
            Ok(postings) => {
                info!("Found {} postings on {name}", postings.len());
                all.extend(postings);
            }
            Err(e) => warn!("Skipping {name}: {e}"),
        }
    }

    info!("Total postings found from all sources: {}", all.len());
    all
}
