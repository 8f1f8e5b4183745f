//! Error types for the extraction core.

/// Errors raised while decomposing a single document.
///
/// These are per-document failures: the batch runner records them against the
/// offending report id and moves on, they never abort a whole batch.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// A course heading had fewer than the four tokens needed to split it
    /// into tag / name / period / reading period.
    #[error("course heading has too few tokens to decompose: {text:?}")]
    MalformedHeading { text: String },

    /// A report passed the emptiness guard but violated a structural
    /// assumption (missing heading, short summary, truncated table row).
    #[error("report {report_id} is structurally malformed: {reason}")]
    MalformedReport { report_id: String, reason: String },

    /// Raw bytes for a report could not be decoded as UTF-8.
    #[error("report {report_id} could not be decoded as UTF-8")]
    Decode {
        report_id: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl ExtractError {
    pub(crate) fn malformed_report(report_id: &str, reason: impl Into<String>) -> Self {
        ExtractError::MalformedReport {
            report_id: report_id.to_owned(),
            reason: reason.into(),
        }
    }
}
