//! Plain data types shared across the pipeline stages.

use serde::{Deserialize, Serialize};

/// A decomposed course heading such as
/// `"ATH100 Arkitektur och stadsbyggande: ... 2013/2014 LP3-LP4"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseHeading {
    /// Course code, e.g. "ATH100".
    pub tag: String,
    /// Course name with internal whitespace collapsed to single spaces.
    pub name: String,
    /// Academic year, e.g. "2013/2014".
    pub period: String,
    /// Reading period, e.g. "LP3-LP4".
    pub reading_period: String,
}

/// One row of a search-results page: a course offering and, when the course
/// has a published evaluation, its report id.
///
/// A missing report id is meaningful output (the course simply has no
/// report), never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRow {
    pub programme: String,
    pub course_tag: String,
    pub report_id: Option<u32>,
}

/// One row of the final output table: a single evaluation question with its
/// statistics, denormalized with the course/report context it came from.
///
/// `mean` and `median` stay textual: the portal emits locale decimal commas
/// and placeholder dashes for questions without data, and we do not want to
/// guess at either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticRecord {
    pub course_tag: String,
    pub course_name: String,
    pub period: String,
    pub reading_period: String,
    /// Taken from the source filename / report map, never re-parsed from
    /// document content.
    pub report_id: String,
    pub answers_count: u32,
    pub respondents_count: u32,
    pub category: String,
    pub question: String,
    pub mean: String,
    pub median: String,
}

/// A selectable option in the portal search form: visible tag/name and the
/// hidden-field id the form posts back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldEntry {
    pub tag: String,
    pub name: String,
    pub sid: String,
}
