//! Batch extraction with per-document failure isolation.

use tracing::{debug, warn};

use crate::error::ExtractError;
use crate::extract::report::{SummaryOrder, extract_report};
use crate::records::StatisticRecord;

/// The outcome of a batch run: the aggregated records plus every document
/// that had to be skipped, with the reason.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Records in input iteration order, each document's own row order
    /// preserved.
    pub records: Vec<StatisticRecord>,
    /// `(report id, error)` for every skipped document.
    pub skipped: Vec<(String, ExtractError)>,
}

impl BatchOutcome {
    /// Number of documents that were skipped.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Run the report extractor over a collection of `(report id, raw bytes)`
/// documents.
///
/// A single bad document never aborts the batch: decode failures and
/// extraction errors are recorded against the document's id and processing
/// continues. Each parse is a pure function of its own input, so no state
/// leaks between documents.
pub fn run_batch<I>(documents: I, summary_order: SummaryOrder) -> BatchOutcome
where
    I: IntoIterator<Item = (String, Vec<u8>)>,
{
    let mut outcome = BatchOutcome::default();

    for (report_id, bytes) in documents {
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(source) => {
                warn!(report_id = report_id.as_str(), "Report is not valid UTF-8, skipping");
                outcome.skipped.push((
                    report_id.clone(),
                    ExtractError::Decode { report_id, source },
                ));
                continue;
            }
        };

        match extract_report(&report_id, &text, summary_order) {
            Ok(records) => {
                debug!(
                    report_id = report_id.as_str(),
                    records = records.len(),
                    "Extracted report"
                );
                outcome.records.extend(records);
            }
            Err(e) => {
                warn!(report_id = report_id.as_str(), error = %e, "Skipping report");
                outcome.skipped.push((report_id, e));
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_doc(tag: &str, mean: &str) -> Vec<u8> {
        let panel = |label: &str| {
            format!(
                r#"<div class="panel"><h3>{label}</h3><table>
                    <tr><th></th><th>Medelvärde</th><th>Median</th></tr>
                    <tr><th>Fråga</th><td>{mean}</td><td>4</td></tr>
                </table></div>"#
            )
        };
        format!(
            "<html><body><h1>{tag} Testkurs 2013/2014 LP1</h1><p>10 av 20</p>{}{}{}</body></html>",
            panel("1. A"),
            panel("2. B"),
            panel("3. C"),
        )
        .into_bytes()
    }

    fn malformed_doc() -> Vec<u8> {
        // Three panels (passes the guard) but a truncated statistic row
        let panel = r#"<div class="panel"><h3>1. A</h3><table>
            <tr><th></th><th>Medelvärde</th><th>Median</th></tr>
            <tr><th>Fråga</th><td>4,2</td></tr>
        </table></div>"#;
        format!(
            "<html><body><h1>XXX000 Trasig kurs 2013/2014 LP1</h1><p>1 av 2</p>{panel}{panel}{panel}</body></html>"
        )
        .into_bytes()
    }

    #[test]
    fn test_run_batch_isolates_failures() {
        let documents = vec![
            ("100".to_owned(), report_doc("AAA111", "4,0")),
            ("200".to_owned(), malformed_doc()),
            ("300".to_owned(), report_doc("BBB222", "2,5")),
        ];
        let outcome = run_batch(documents, SummaryOrder::default());

        assert_eq!(outcome.records.len(), 6);
        assert_eq!(outcome.skipped_count(), 1);
        assert_eq!(outcome.skipped[0].0, "200");

        // Input order preserved, and no cross-contamination from the
        // failed document in between
        assert_eq!(outcome.records[0].report_id, "100");
        assert_eq!(outcome.records[0].course_tag, "AAA111");
        assert_eq!(outcome.records[3].report_id, "300");
        assert_eq!(outcome.records[3].course_tag, "BBB222");
        assert_eq!(outcome.records[3].mean, "2,5");
    }

    #[test]
    fn test_run_batch_decode_failure_is_skipped() {
        let documents = vec![
            ("100".to_owned(), vec![0xff, 0xfe, 0x00]),
            ("200".to_owned(), report_doc("AAA111", "4,0")),
        ];
        let outcome = run_batch(documents, SummaryOrder::default());

        assert_eq!(outcome.records.len(), 3);
        assert_eq!(outcome.skipped_count(), 1);
        assert!(matches!(outcome.skipped[0].1, ExtractError::Decode { .. }));
    }

    #[test]
    fn test_run_batch_empty_report_is_not_skipped() {
        let documents = vec![("100".to_owned(), b"<html><body></body></html>".to_vec())];
        let outcome = run_batch(documents, SummaryOrder::default());
        assert!(outcome.records.is_empty());
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_run_batch_empty_input() {
        let outcome = run_batch(Vec::new(), SummaryOrder::default());
        assert!(outcome.records.is_empty());
        assert!(outcome.skipped.is_empty());
    }
}
