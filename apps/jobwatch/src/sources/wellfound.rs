//! wellfound.com job search. The listing is rendered server-side for the
//! first page only; later pages need a browser and are not fetched.

use async_trait::async_trait;
use scraper::Html;
use tracing::warn;
use url::Url;

use super::html::{absolute_url, first_href, first_text, select_with_fallback};
use super::{FetchContext, FetchError, JobSource};
use crate::models::posting::{RawPosting, SourceName};

const BASE_URL: &str = "https://wellfound.com/";
const SEARCH_URL: &str = "https://wellfound.com/jobs";

pub struct WellfoundSource {
    query: String,
}

impl WellfoundSource {
    pub fn new(query: String) -> Self {
        Self { query }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobCard {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_url: Option<String>,
}

#[async_trait]
impl JobSource for WellfoundSource {
    fn name(&self) -> SourceName {
        SourceName::Wellfound
    }

    async fn fetch(&self, ctx: &FetchContext) -> Result<Vec<RawPosting>, FetchError> {
        let search_url =
            Url::parse_with_params(SEARCH_URL, &[("q", self.query.as_str()), ("remote", "true")])?;
        let page = ctx.get_html(search_url.as_str()).await?;
        let cards = parse_job_cards(&page);
        if cards.is_empty() {
            warn!("No job cards found on Wellfound; the listing may require JavaScript");
        }

        let mut postings = Vec::with_capacity(cards.len());
        for card in cards {
            let description = match &card.job_url {
                Some(job_url) => ctx.fetch_description(job_url).await,
                None => None,
            };

            postings.push(RawPosting {
                source_id: card.job_url.clone(),
                title: card.title,
                company: card.company,
                location: card.location,
                description,
                url: card.job_url,
                ..RawPosting::new(SourceName::Wellfound)
            });
        }

        Ok(postings)
    }
}

pub fn parse_job_cards(page: &str) -> Vec<JobCard> {
    let document = Html::parse_document(page);
    let base = Url::parse(BASE_URL).ok();

    select_with_fallback(
        &document,
        r#"div[data-test="JobCard"]"#,
        r#"div[class*="styles_jobCard"]"#,
    )
    .iter()
    .map(|card| JobCard {
        title: first_text(
            card,
            r#"h2[data-test="job-card-title"], h3[data-test="job-card-title"], h2[class*="title"], h3[class*="title"]"#,
        ),
        company: first_text(
            card,
            r#"div[data-test="job-card-company-name"], a[data-test="JobCard_companyLink"]"#,
        ),
        location: first_text(
            card,
            r#"div[data-test="job-card-location"], span[class*="location"]"#,
        ),
        job_url: first_href(card, r#"a[data-test="JobCard_link"], a[href*="/jobs/"]"#)
            .and_then(|href| base.as_ref().and_then(|b| absolute_url(b, &href))),
    })
    .collect()
}
