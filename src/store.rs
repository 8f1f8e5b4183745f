//! On-disk storage: saved portal pages and the generated CSV tables.
//!
//! All tables are semicolon-delimited — the statistic columns carry locale
//! decimal commas, so a comma separator would collide.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use crate::records::SearchRow;

const CSV_DELIMITER: u8 = b';';

/// Directory layout under the configured data dir:
///
/// ```text
/// data/
///   bp/map.csv                 field map (bachelor search page)
///   bp/search/<programme>/*.html   saved search-result pages
///   mp/...                     same for master programmes
///   report_map.csv             programme;course_tag;report_id
///   reports/<id>.html          saved report pages
///   report.csv                 final statistics table
/// ```
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn field_map_path(&self, level_dir: &str) -> PathBuf {
        self.root.join(level_dir).join("map.csv")
    }

    pub fn search_form_path(&self, level_dir: &str) -> PathBuf {
        self.root.join(level_dir).join("search_form.html")
    }

    pub fn search_dir(&self, level_dir: &str) -> PathBuf {
        self.root.join(level_dir).join("search")
    }

    pub fn search_page_path(&self, level_dir: &str, programme: &str, batch: usize) -> PathBuf {
        self.search_dir(level_dir)
            .join(programme)
            .join(format!("batch_{batch}.html"))
    }

    pub fn report_map_path(&self) -> PathBuf {
        self.root.join("report_map.csv")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.root.join("reports")
    }

    pub fn report_page_path(&self, report_id: u32) -> PathBuf {
        self.reports_dir().join(format!("{report_id}.html"))
    }

    pub fn report_csv_path(&self) -> PathBuf {
        self.root.join("report.csv")
    }
}

/// Write `rows` as a semicolon-delimited CSV file with a header row,
/// creating parent directories as needed.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut writer = csv::WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .from_path(path)
        .with_context(|| format!("Failed to open {} for writing", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))
}

/// Read a semicolon-delimited CSV file written by [`write_csv`].
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(CSV_DELIMITER)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.with_context(|| format!("Malformed row in {}", path.display()))?);
    }
    Ok(rows)
}

pub fn read_search_rows(path: &Path) -> Result<Vec<SearchRow>> {
    read_csv(path)
}

/// Save a fetched page, creating parent directories as needed.
pub fn save_page(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

/// Load every saved report document as `(report id, raw bytes)`.
///
/// The report id is the filename stem — the id the page was downloaded
/// under, never anything parsed out of the content. Sorted by id for a
/// deterministic batch order.
pub fn load_report_documents(dir: &Path) -> Result<Vec<(String, Vec<u8>)>> {
    let mut documents = Vec::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.extension().is_none_or(|ext| ext != "html") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let bytes =
            fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        documents.push((stem.to_owned(), bytes));
    }
    documents.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(documents)
}

/// Load every saved search-result page under a level's search dir as
/// `(programme, document text)`, one entry per page, grouped by the
/// per-programme subdirectory it was saved in.
pub fn load_search_documents(search_dir: &Path) -> Result<Vec<(String, String)>> {
    let mut documents = Vec::new();
    let entries = fs::read_dir(search_dir)
        .with_context(|| format!("Failed to read {}", search_dir.display()))?;

    let mut programme_dirs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_dir())
        .collect();
    programme_dirs.sort();

    for programme_dir in programme_dirs {
        let Some(programme) = programme_dir.file_name().and_then(|n| n.to_str()).map(str::to_owned)
        else {
            continue;
        };
        let mut pages: Vec<PathBuf> = fs::read_dir(&programme_dir)
            .with_context(|| format!("Failed to read {}", programme_dir.display()))?
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "html"))
            .collect();
        pages.sort();

        for page in pages {
            let text = fs::read_to_string(&page)
                .with_context(|| format!("Failed to read {}", page.display()))?;
            documents.push((programme.clone(), text));
        }
    }
    Ok(documents)
}
