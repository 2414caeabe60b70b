// Error types for the synthesis engine.
//
// Only EmptyInput aborts a stitch. Data-quality conditions (malformed
// snapshots, undefined deltas, identity violations) are findings on the
// golden record, see diagnostics.rs.

use std::path::PathBuf;

use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("no snapshots supplied for {ticker}")]
    EmptyInput { ticker: String },

    #[error("snapshot fold out of order: {previous} must not precede {next}")]
    OutOfOrder { previous: String, next: String },

    #[error("invalid field path '{0}' (expected statement.section.item)")]
    InvalidFieldPath(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SynthesisError {
    pub(crate) fn out_of_order(
        previous: (&NaiveDate, &str),
        next: (&NaiveDate, &str),
    ) -> Self {
        SynthesisError::OutOfOrder {
            previous: format!("{} ({})", previous.1, previous.0),
            next: format!("{} ({})", next.1, next.0),
        }
    }
}

pub type Result<T> = std::result::Result<T, SynthesisError>;
