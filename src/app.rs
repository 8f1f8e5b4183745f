//! Stage orchestration.
//!
//! Each pipeline stage is an explicit method — nothing runs as a side
//! effect of loading the binary. The fetch stages are async (network); the
//! parse stages are synchronous walks over saved pages.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::Level;
use crate::config::Config;
use crate::extract::{extract_search_rows, run_batch};
use crate::portal::client::SearchQuery;
use crate::portal::{PortalClient, extract_field_entries};
use crate::records::SearchRow;
use crate::store::{self, DataLayout};

const LEVEL_DIRS: [(&str, fn(&Config) -> u32); 2] = [
    ("bp", |c| c.bachelor_page_id),
    ("mp", |c| c.master_page_id),
];

pub struct App {
    config: Config,
    layout: DataLayout,
}

impl App {
    pub fn new(config: Config) -> Self {
        let layout = DataLayout::new(&config.data_dir);
        Self { config, layout }
    }

    fn client(&self) -> Result<PortalClient> {
        PortalClient::new(&self.config)
    }

    /// Stage 1: fetch both search pages and write the form field maps.
    pub async fn run_map(&self) -> Result<()> {
        let client = self.client()?;

        for (level_dir, page_id) in LEVEL_DIRS {
            let page_id = page_id(&self.config);
            let document = client.fetch_search_form(page_id).await?;
            store::save_page(&self.layout.search_form_path(level_dir), &document)?;

            let entries = extract_field_entries(&document);
            info!(level = level_dir, fields = entries.len(), "Mapped search form");
            store::write_csv(&self.layout.field_map_path(level_dir), &entries)?;
        }
        Ok(())
    }

    /// Stage 2: drive the search form per programme and save the result
    /// pages under `search/<programme>/`.
    ///
    /// `programmes` and `years` are search ids from the field map. Years
    /// are chunked to the portal's five-id cap; each chunk becomes one
    /// saved batch page.
    pub async fn run_search(
        &self,
        level: Level,
        programmes: &[String],
        years: &[String],
    ) -> Result<()> {
        let client = self.client()?;
        let page_id = match level {
            Level::Bachelor => self.config.bachelor_page_id,
            Level::Master => self.config.master_page_id,
        };

        for programme in programmes {
            for (batch, year_chunk) in years.chunks(5).enumerate() {
                let query = SearchQuery {
                    programmes: vec![programme.clone()],
                    years: year_chunk.to_vec(),
                    reading_periods: self.config.reading_period_sids.clone(),
                };
                let document = client.submit_search(page_id, &query).await?;
                let path = self
                    .layout
                    .search_page_path(level.dir_name(), programme, batch);
                store::save_page(&path, &document)?;
                info!(programme = programme.as_str(), batch, "Saved search results");
            }
        }
        Ok(())
    }

    /// Stage 3: parse every saved search page into `report_map.csv`.
    ///
    /// A page that fails to parse is logged and skipped; the map is still
    /// written from the pages that did parse.
    pub fn run_parse_search(&self) -> Result<()> {
        let mut rows: Vec<SearchRow> = Vec::new();

        for (level_dir, _) in LEVEL_DIRS {
            let search_dir = self.layout.search_dir(level_dir);
            if !search_dir.is_dir() {
                continue;
            }
            for (programme, document) in store::load_search_documents(&search_dir)? {
                match extract_search_rows(&document, &programme) {
                    Ok(mut page_rows) => {
                        info!(
                            level = level_dir,
                            programme = programme.as_str(),
                            courses = page_rows.len(),
                            "Parsed search page"
                        );
                        rows.append(&mut page_rows);
                    }
                    Err(e) => {
                        warn!(
                            level = level_dir,
                            programme = programme.as_str(),
                            error = %e,
                            "Skipping unparsable search page"
                        );
                    }
                }
            }
        }

        let without_report = rows.iter().filter(|r| r.report_id.is_none()).count();
        info!(courses = rows.len(), without_report, "Writing report map");
        store::write_csv(&self.layout.report_map_path(), &rows)
    }

    /// Stage 4: download every report listed in `report_map.csv`.
    ///
    /// Already-downloaded reports are kept; individual download failures
    /// are logged and skipped.
    pub async fn run_reports(&self) -> Result<()> {
        let rows = store::read_search_rows(&self.layout.report_map_path())
            .context("Report map missing — run parse-search first")?;
        let client = self.client()?;

        let mut fetched = 0usize;
        for row in rows {
            let Some(report_id) = row.report_id else {
                continue;
            };
            let path = self.layout.report_page_path(report_id);
            if path.is_file() {
                continue;
            }
            match client.fetch_report(report_id).await {
                Ok(document) => {
                    store::save_page(&path, &document)?;
                    fetched += 1;
                }
                Err(e) => {
                    warn!(report_id, course = row.course_tag.as_str(), error = %e, "Failed to fetch report");
                }
            }
        }
        info!(fetched, "Downloaded reports");
        Ok(())
    }

    /// Stage 5: extract every saved report into `report.csv`, reporting
    /// per-report failures without aborting.
    pub fn run_parse_reports(&self) -> Result<()> {
        let documents = store::load_report_documents(&self.layout.reports_dir())
            .context("Reports directory missing — run reports first")?;
        let total = documents.len();

        let outcome = run_batch(documents, self.config.summary_order);

        for (report_id, error) in &outcome.skipped {
            warn!(report_id = report_id.as_str(), error = %error, "Report skipped");
        }
        info!(
            succeeded = total - outcome.skipped_count(),
            skipped = outcome.skipped_count(),
            records = outcome.records.len(),
            "Batch extraction finished"
        );

        store::write_csv(&self.layout.report_csv_path(), &outcome.records)
    }

    /// Full pipeline in stage order.
    pub async fn run_all(
        &self,
        level: Level,
        programmes: &[String],
        years: &[String],
    ) -> Result<()> {
        self.run_map().await?;
        self.run_search(level, programmes, years).await?;
        self.run_parse_search()?;
        self.run_reports().await?;
        self.run_parse_reports()
    }
}
