//! Report-page extraction: the core of the pipeline.
//!
//! A report page is a semi-structured document: one `h1` with the course
//! heading, one summary paragraph with the respondent/answer counts, then a
//! sequence of category panels each holding zero or more statistics tables.
//! The markup drifts across report vintages, so extraction is deliberately
//! defensive: a near-empty shell is a valid zero-record report, narrative
//! question tables are filtered out by their header signature, and anything
//! that violates the structure once the guards pass is a typed error rather
//! than guessed-at data.

use html_scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::ExtractError;
use crate::extract::{digit_runs, normalize_ws, parse_course_heading};
use crate::records::StatisticRecord;

/// Header-row signatures of a numeric statistics table, in the portal's two
/// locales. Tables whose header row reads anything else are free-text
/// questions and carry no mean/median columns.
const STATISTIC_TABLE_SIGNATURES: [&str; 2] = ["Medelvärde Median", "Mean Median"];

/// Category labels (after index stripping) that mark the "overall
/// impression" section. Every section after it holds fine-grained free-text
/// questions outside the extraction scope, so iteration stops there.
const OVERALL_IMPRESSION_LABELS: [&str; 2] = ["Sammanfattande intryck", "Overall impression"];

/// Fewer category panels than this means the portal served a near-empty
/// shell (a course with zero respondents), which is a valid empty report.
const MIN_CATEGORY_BLOCKS: usize = 3;

/// Which way round the two integers in the summary paragraph are read.
///
/// Report vintages disagree on whether the respondent count or the answer
/// count comes first; the default matches the fixtures we have, and the
/// mapping stays configurable rather than hardcoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryOrder {
    #[default]
    RespondentsFirst,
    AnswersFirst,
}

/// Extract every per-question statistic record from a report document.
///
/// `report_id` identifies the document to the caller (filename / report
/// map); it is carried into every record verbatim and never re-parsed from
/// the document content. Returns records in document order, category-major.
pub fn extract_report(
    report_id: &str,
    document: &str,
    summary_order: SummaryOrder,
) -> Result<Vec<StatisticRecord>, ExtractError> {
    let html = Html::parse_document(document);
    let block_sel = Selector::parse("div.panel").unwrap();

    let blocks: Vec<ElementRef<'_>> = html.select(&block_sel).collect();
    if blocks.len() < MIN_CATEGORY_BLOCKS {
        debug!(
            report_id,
            blocks = blocks.len(),
            "Report is a near-empty shell, no records"
        );
        return Ok(Vec::new());
    }

    let heading_sel = Selector::parse("h1").unwrap();
    let heading_text = html
        .select(&heading_sel)
        .next()
        .map(|h| h.text().collect::<String>())
        .ok_or_else(|| ExtractError::malformed_report(report_id, "missing course heading"))?;
    let heading = parse_course_heading(&heading_text)?;

    let summary_sel = Selector::parse("p").unwrap();
    let summary_text = html
        .select(&summary_sel)
        .next()
        .map(|p| p.text().collect::<String>())
        .ok_or_else(|| ExtractError::malformed_report(report_id, "missing summary paragraph"))?;
    let counts = digit_runs(&summary_text);
    if counts.len() < 2 {
        return Err(ExtractError::malformed_report(
            report_id,
            format!("summary paragraph holds {} number(s), expected 2", counts.len()),
        ));
    }
    let (respondents_count, answers_count) = match summary_order {
        SummaryOrder::RespondentsFirst => (counts[0], counts[1]),
        SummaryOrder::AnswersFirst => (counts[1], counts[0]),
    };

    let table_sel = Selector::parse("table").unwrap();
    let mut records = Vec::new();

    for block in blocks {
        let tables: Vec<ElementRef<'_>> = block.select(&table_sel).collect();
        if tables.is_empty() {
            continue;
        }

        let category = category_label(block)
            .ok_or_else(|| ExtractError::malformed_report(report_id, "category block without a label"))?;

        for table in tables {
            let Some(header) = header_row_text(table) else {
                trace!(report_id, category = category.as_str(), "Table without header row, skipping");
                continue;
            };
            if !STATISTIC_TABLE_SIGNATURES.contains(&header.as_str()) {
                // Free-text question table, no numeric columns
                trace!(report_id, header = header.as_str(), "Non-statistic table, skipping");
                continue;
            }

            let (question, mean, median) = question_row(table).ok_or_else(|| {
                ExtractError::malformed_report(
                    report_id,
                    format!("statistics table in {category:?} lacks a complete question row"),
                )
            })?;

            records.push(StatisticRecord {
                course_tag: heading.tag.clone(),
                course_name: heading.name.clone(),
                period: heading.period.clone(),
                reading_period: heading.reading_period.clone(),
                report_id: report_id.to_owned(),
                answers_count,
                respondents_count,
                category: category.clone(),
                question,
                mean,
                median,
            });
        }

        if OVERALL_IMPRESSION_LABELS.contains(&category.as_str()) {
            debug!(report_id, "Reached overall-impression section, stopping");
            break;
        }
    }

    Ok(records)
}

/// The category label of a panel: a level-3 heading when present, otherwise
/// the panel's text wrapper, with the leading ordinal prefix stripped.
fn category_label(block: ElementRef<'_>) -> Option<String> {
    let h3_sel = Selector::parse("h3").unwrap();
    let wrapper_sel = Selector::parse("div.text-wrapper").unwrap();

    let raw = block
        .select(&h3_sel)
        .next()
        .or_else(|| block.select(&wrapper_sel).next())
        .map(|el| el.text().collect::<String>())?;
    Some(strip_index_prefix(&normalize_ws(&raw)))
}

/// Strip the leading ordinal prefix from a category label: `"3. Kursmål och
/// innehåll"` becomes `"Kursmål och innehåll"`. Keeps from the first
/// alphabetic character onward; `char::is_alphabetic` covers å/ä/ö.
fn strip_index_prefix(label: &str) -> String {
    label
        .char_indices()
        .find(|(_, c)| c.is_alphabetic())
        .map(|(i, _)| label[i..].to_owned())
        .unwrap_or_default()
}

/// The whitespace-normalized text of a table's header row: the first row
/// made up of header cells only. `None` when the table has no such row.
fn header_row_text(table: ElementRef<'_>) -> Option<String> {
    let tr_sel = Selector::parse("tr").unwrap();
    let th_sel = Selector::parse("th").unwrap();
    let td_sel = Selector::parse("td").unwrap();

    for tr in table.select(&tr_sel) {
        if tr.select(&td_sel).next().is_some() {
            continue;
        }
        if tr.select(&th_sel).next().is_some() {
            let text = normalize_ws(&tr.text().collect::<String>());
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// The question row of a statistics table: a row header cell with the
/// question text and exactly two statistic cells, mean then median.
/// `None` when the row is absent or truncated.
fn question_row(table: ElementRef<'_>) -> Option<(String, String, String)> {
    let tr_sel = Selector::parse("tr").unwrap();
    let th_sel = Selector::parse("th").unwrap();
    let td_sel = Selector::parse("td").unwrap();

    for tr in table.select(&tr_sel) {
        let Some(th) = tr.select(&th_sel).next() else {
            continue;
        };
        let mut cells = tr.select(&td_sel);
        let Some(mean) = cells.next() else {
            continue; // header row (no data cells)
        };
        let median = cells.next()?;

        let question = th.text().collect::<String>().trim().to_owned();
        let mean = mean.text().collect::<String>().trim().to_owned();
        let median = median.text().collect::<String>().trim().to_owned();
        return Some((question, mean, median));
    }
    None
}
