//! HTTP client for the course-evaluation portal.
//!
//! The portal is an ASP.NET WebForms application, but its search endpoint
//! accepts a plain hidden-field POST (`hfSelection` plus the three
//! `hfCategoryN` id lists) without ViewState round-tripping, so the client
//! stays a thin cookie-holding wrapper around reqwest.

use anyhow::{Context, Result, bail};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::config::Config;

/// The portal rejects searches with more than five ids in a single
/// category.
const MAX_IDS_PER_CATEGORY: usize = 5;

/// One search-form submission: the hidden-field id lists for each filter
/// category.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// `hfCategory1`: programme ids.
    pub programmes: Vec<String>,
    /// `hfCategory2`: academic-year ids.
    pub years: Vec<String>,
    /// `hfCategory3`: reading-period ids.
    pub reading_periods: Vec<String>,
}

/// Client for fetching portal pages: the search form, search results, and
/// individual report pages.
pub struct PortalClient {
    http: reqwest::Client,
    base: Url,
    language: String,
    delay: Duration,
}

impl PortalClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        let base = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid portal base URL: {}", config.base_url))?;

        Ok(Self {
            http,
            base,
            language: config.language.clone(),
            delay: Duration::from_millis(config.request_delay_ms),
        })
    }

    /// URL of a search page, e.g. `/sr/ar/4257/sv`.
    fn search_url(&self, page_id: u32) -> Result<Url> {
        self.base
            .join(&format!("sr/ar/{page_id}/{}", self.language))
            .context("Failed to build search URL")
    }

    /// URL of a report page, e.g. `/sr/rs/3284/sv`.
    fn report_url(&self, report_id: u32) -> Result<Url> {
        self.base
            .join(&format!("sr/rs/{report_id}/{}", self.language))
            .context("Failed to build report URL")
    }

    /// GET the search form page (used to map the form's field ids).
    pub async fn fetch_search_form(&self, page_id: u32) -> Result<String> {
        tokio::time::sleep(self.delay).await;

        let url = self.search_url(page_id)?;
        debug!(%url, "Fetching search form");
        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to GET search form {url}"))?;
        resp.text().await.context("Failed to read search form body")
    }

    /// POST a search-form submission and return the result page.
    pub async fn submit_search(&self, page_id: u32, query: &SearchQuery) -> Result<String> {
        if query.programmes.is_empty() || query.years.is_empty() {
            bail!("Search needs at least one programme and one year");
        }
        for (category, ids) in [
            ("programmes", &query.programmes),
            ("years", &query.years),
            ("reading periods", &query.reading_periods),
        ] {
            if ids.len() > MAX_IDS_PER_CATEGORY {
                bail!(
                    "Too many {category} in one search: {} (the portal caps each category at {MAX_IDS_PER_CATEGORY})",
                    ids.len()
                );
            }
        }

        tokio::time::sleep(self.delay).await;

        let params = [
            ("hfSelection", "1".to_owned()),
            ("hfCategory1", query.programmes.join(",")),
            ("hfCategory2", query.years.join(",")),
            ("hfCategory3", query.reading_periods.join(",")),
        ];

        let url = self.search_url(page_id)?;
        info!(%url, programmes = ?query.programmes, years = ?query.years, "Submitting search");
        let resp = self
            .http
            .post(url.clone())
            .form(&params)
            .send()
            .await
            .with_context(|| format!("Failed to POST search to {url}"))?;
        resp.text().await.context("Failed to read search result body")
    }

    /// GET a single report page by its id.
    pub async fn fetch_report(&self, report_id: u32) -> Result<String> {
        tokio::time::sleep(self.delay).await;

        let url = self.report_url(report_id)?;
        debug!(%url, "Fetching report");
        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to GET report {url}"))?;
        resp.text().await.context("Failed to read report body")
    }
}
