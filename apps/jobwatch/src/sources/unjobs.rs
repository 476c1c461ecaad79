//! unjobs.org: an aggregator of UN and NGO vacancies. Listing cards carry
//! title, agency, location and date; the vacancy page links to the real
//! application site.

use std::sync::LazyLock;

use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;
use scraper::Html;
use tracing::warn;
use url::Url;

use super::dates::parse_posted_date;
use super::html::{absolute_url, element_text, first_href, first_text, select_with_fallback, selector};
use super::{FetchContext, FetchError, JobSource};
use crate::models::posting::{RawPosting, SourceName};

const BASE_URL: &str = "https://unjobs.org/";
const AGGREGATOR_DESCRIPTION: &str = "Aggregator listing - refer to external URL for full details.";

static APPLY_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)apply|more info").expect("valid apply regex"));

pub struct UnJobsSource {
    query: String,
}

impl UnJobsSource {
    pub fn new(query: String) -> Self {
        Self { query }
    }
}

/// One card from the search results page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingCard {
    pub title: Option<String>,
    pub vacancy_url: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub date_posted: Option<NaiveDate>,
}

#[async_trait]
impl JobSource for UnJobsSource {
    fn name(&self) -> SourceName {
        SourceName::UnJobs
    }

    async fn fetch(&self, ctx: &FetchContext) -> Result<Vec<RawPosting>, FetchError> {
        let search_url = Url::parse_with_params(BASE_URL, &[("q", self.query.as_str())])?;
        let page = ctx.get_html(search_url.as_str()).await?;
        let cards = parse_search_page(&page, ctx.today());
        if cards.is_empty() {
            warn!("No job cards found on unjobs.org; the page layout may have changed");
        }

        let mut postings = Vec::with_capacity(cards.len());
        for card in cards {
            let apply_url = match &card.vacancy_url {
                Some(vacancy_url) => application_url(ctx, vacancy_url).await,
                None => None,
            };

            postings.push(RawPosting {
                source_id: card.vacancy_url.clone(),
                title: card.title,
                company: card.company,
                location: card.location,
                description: Some(AGGREGATOR_DESCRIPTION.to_string()),
                url: apply_url.or(card.vacancy_url),
                date_posted: card.date_posted,
                ..RawPosting::new(SourceName::UnJobs)
            });
        }

        Ok(postings)
    }
}

async fn application_url(ctx: &FetchContext, vacancy_url: &str) -> Option<String> {
    ctx.pause().await;
    match ctx.get_html(vacancy_url).await {
        Ok(page) => {
            let link = parse_application_link(&page, vacancy_url);
            if link.is_none() {
                warn!("Could not find an apply link on {vacancy_url}");
            }
            link
        }
        Err(e) => {
            warn!("Failed to fetch unjobs.org vacancy page {vacancy_url}: {e}");
            None
        }
    }
}

pub fn parse_search_page(page: &str, today: NaiveDate) -> Vec<ListingCard> {
    let document = Html::parse_document(page);
    let base = Url::parse(BASE_URL).ok();

    select_with_fallback(&document, "div.card.mb-3", "div.job-card, div.listing-card")
        .iter()
        .map(|card| {
            let vacancy_url = first_href(card, "h5.card-title a, h4.card-title a")
                .and_then(|href| base.as_ref().and_then(|b| absolute_url(b, &href)));

            ListingCard {
                title: first_text(card, "h5.card-title a, h4.card-title a"),
                vacancy_url,
                company: first_text(card, "h6.card-subtitle, .job-agency"),
                location: first_text(card, "i.bi-geo-alt-fill + span, .job-location-text"),
                date_posted: first_text(card, "span.text-muted small, .job-posted-date")
                    .and_then(|text| parse_posted_date(&text, today)),
            }
        })
        .collect()
}

/// The external application link on a vacancy page, resolved against the page URL.
pub fn parse_application_link(page: &str, page_url: &str) -> Option<String> {
    let document = Html::parse_document(page);
    let base = Url::parse(page_url).ok()?;

    let by_text = selector("a.btn").and_then(|sel| {
        document
            .select(&sel)
            .filter(|a| APPLY_TEXT_RE.is_match(&element_text(a)))
            .find_map(|a| a.value().attr("href").map(str::to_string))
    });

    let href = by_text.or_else(|| {
        let root = document.root_element();
        first_href(&root, "a[href*='apply.'], a[href*='careers.']")
    })?;

    absolute_url(&base, href.trim())
}
