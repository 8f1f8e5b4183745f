//! Search-results page extraction.

use html_scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::error::ExtractError;
use crate::extract::{first_digit_run, parse_course_heading};
use crate::records::SearchRow;

/// Extract the course listing rows from a search-results page.
///
/// Each `tr.srtbl-row` is one course offering: the row's `th` holds the
/// course heading text (run through the heading normalizer to get the
/// course tag) and an optional `<a>` carries the report id inside its
/// `onclick` attribute, e.g. `showReport('3284|-');return false;`.
///
/// Rows without a report link are kept with `report_id: None` — absence of
/// a report is data, not an error. Row order is preserved.
pub fn extract_search_rows(
    document: &str,
    programme_tag: &str,
) -> Result<Vec<SearchRow>, ExtractError> {
    let html = Html::parse_document(document);
    let row_sel = Selector::parse("tr.srtbl-row").unwrap();
    let th_sel = Selector::parse("th").unwrap();
    let link_sel = Selector::parse("a").unwrap();

    let mut rows = Vec::new();

    for row in html.select(&row_sel) {
        let heading_text = match row.select(&th_sel).next() {
            Some(th) => th.text().collect::<String>(),
            None => {
                warn!(programme = programme_tag, "Search row without a header cell, skipping");
                continue;
            }
        };
        let heading = parse_course_heading(&heading_text)?;

        let report_id = row
            .select(&link_sel)
            .next()
            .and_then(|link| link.attr("onclick"))
            .and_then(first_digit_run);

        if report_id.is_none() {
            debug!(
                programme = programme_tag,
                course = heading.tag.as_str(),
                "Course has no published report"
            );
        }

        rows.push(SearchRow {
            programme: programme_tag.to_owned(),
            course_tag: heading.tag,
            report_id,
        });
    }

    Ok(rows)
}
