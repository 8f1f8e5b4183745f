//! Application configuration.

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::Deserialize;
use std::path::PathBuf;

use crate::extract::SummaryOrder;

/// Runtime configuration, merged from `courseval.toml` (when present) and
/// `COURSEVAL_*` environment variables, env taking precedence.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Portal origin.
    pub base_url: String,
    /// Portal language segment used in page URLs ("sv" or "en").
    pub language: String,
    /// Search page id for bachelor programmes.
    pub bachelor_page_id: u32,
    /// Search page id for master programmes.
    pub master_page_id: u32,
    /// Hidden-field ids of the four reading periods, posted as
    /// `hfCategory3` on every search.
    pub reading_period_sids: Vec<String>,
    /// Root directory for saved pages and generated tables.
    pub data_dir: PathBuf,
    /// Politeness delay between portal requests.
    pub request_delay_ms: u64,
    /// Base log level for this crate (overridable via `RUST_LOG`).
    pub log_level: String,
    /// Which way round the summary paragraph's two integers are read.
    pub summary_order: SummaryOrder,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://course-eval.portal.chalmers.se".to_owned(),
            language: "sv".to_owned(),
            bachelor_page_id: 4257,
            master_page_id: 4248,
            reading_period_sids: ["1049", "1050", "1051", "1052"]
                .map(str::to_owned)
                .to_vec(),
            data_dir: PathBuf::from("data"),
            request_delay_ms: 1500,
            log_level: "info".to_owned(),
            summary_order: SummaryOrder::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Figment::new()
            .merge(Toml::file("courseval.toml"))
            .merge(Env::prefixed("COURSEVAL_"))
            .extract()
            .context("Failed to load configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.bachelor_page_id, 4257);
        assert_eq!(config.master_page_id, 4248);
        assert_eq!(config.reading_period_sids.len(), 4);
        assert_eq!(config.summary_order, SummaryOrder::RespondentsFirst);
    }
}
