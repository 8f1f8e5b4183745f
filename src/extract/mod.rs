//! Document extraction core.
//!
//! Everything in this module is a synchronous pure function of its input
//! text (plus an identifier): no I/O, no shared state across calls. The
//! fetch/store plumbing lives in [`crate::portal`] and [`crate::store`].

pub mod batch;
pub mod heading;
pub mod report;
pub mod search;

use regex::Regex;
use std::sync::LazyLock;

pub use batch::{BatchOutcome, run_batch};
pub use heading::parse_course_heading;
pub use report::{SummaryOrder, extract_report};
pub use search::extract_search_rows;

/// Collapse all whitespace runs in `s` to single spaces and trim the ends.
pub(crate) fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The first maximal run of ASCII digits in `s`, parsed as an integer.
///
/// Used on event-handler attribute text like `showReport('3284|-');return
/// false;` — a stable string operation, no grammar needed.
pub(crate) fn first_digit_run(s: &str) -> Option<u32> {
    digit_runs(s).into_iter().next()
}

/// All maximal runs of ASCII digits in `s`, in order. Runs that overflow
/// `u32` are ignored.
pub(crate) fn digit_runs(s: &str) -> Vec<u32> {
    static DIGIT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

    DIGIT_RUN_RE
        .find_iter(s)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}
