//! careers.un.org, browsed through a fixed IT filter (job family IST, job
//! network ITECNET). Descriptions come from each job's own page.

use async_trait::async_trait;
use chrono::NaiveDate;
use scraper::Html;
use tracing::warn;
use url::Url;

use super::dates::parse_posted_date;
use super::html::{absolute_url, first_href, first_text, select_with_fallback};
use super::{FetchContext, FetchError, JobSource};
use crate::models::posting::{RawPosting, SourceName};

const BASE_URL: &str = "https://careers.un.org/";
const SEARCH_URL: &str = "https://careers.un.org/jobopening";
const IT_FILTER: &str = r#"{"jf":["IST"],"jn":["ITECNET"]}"#;
const EMPLOYER: &str = "United Nations";

pub struct UnCareersSource;

/// One row of the job openings table.
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningRow {
    pub title: Option<String>,
    pub job_url: Option<String>,
    pub location: Option<String>,
    pub date_posted: Option<NaiveDate>,
}

#[async_trait]
impl JobSource for UnCareersSource {
    fn name(&self) -> SourceName {
        SourceName::UnCareers
    }

    async fn fetch(&self, ctx: &FetchContext) -> Result<Vec<RawPosting>, FetchError> {
        let search_url = Url::parse_with_params(SEARCH_URL, &[("data", IT_FILTER)])?;
        let page = ctx.get_html(search_url.as_str()).await?;
        let rows = parse_openings(&page, ctx.today());
        if rows.is_empty() {
            warn!("No job rows found on careers.un.org; the page layout may have changed");
        }

        let mut postings = Vec::with_capacity(rows.len());
        for row in rows {
            let description = match &row.job_url {
                Some(job_url) => ctx.fetch_description(job_url).await,
                None => None,
            };

            postings.push(RawPosting {
                source_id: row.job_url.clone(),
                title: row.title,
                company: Some(EMPLOYER.to_string()),
                location: row.location,
                description,
                url: row.job_url,
                date_posted: row.date_posted,
                ..RawPosting::new(SourceName::UnCareers)
            });
        }

        Ok(postings)
    }
}

pub fn parse_openings(page: &str, today: NaiveDate) -> Vec<OpeningRow> {
    let document = Html::parse_document(page);
    let base = Url::parse(BASE_URL).ok();

    select_with_fallback(
        &document,
        "div#searchResultPanel table tbody tr.row, div#job-openings-table tbody tr",
        "div.job-listing-card, li.job-item",
    )
    .iter()
    .map(|row| OpeningRow {
        title: first_text(row, "td:nth-child(1) a, h3.job-title a"),
        job_url: first_href(row, "td:nth-child(1) a, h3.job-title a")
            .and_then(|href| base.as_ref().and_then(|b| absolute_url(b, &href))),
        location: first_text(row, "td:nth-child(3), .job-location span"),
        date_posted: first_text(row, "td:last-child, .job-posted-date")
            .and_then(|text| parse_posted_date(&text, today)),
    })
    .collect()
}
