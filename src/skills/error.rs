use std::path::PathBuf;

use thiserror::Error;

/// Failures while turning raw CSV into a [`SourceTable`](super::SourceTable).
#[derive(Debug, Error)]
pub enum DataError {
    #[error("missing required field `{0}` in CSV header")]
    MissingColumn(&'static str),

    #[error("invalid value {value:?} for `{column}` on line {line}")]
    InvalidNumber {
        column: &'static str,
        line: u64,
        value: String,
    },

    #[error("duplicate row for ({skill}, {country}) on lines {first_line} and {line}")]
    DuplicateKey {
        skill: String,
        country: String,
        first_line: u64,
        line: u64,
    },

    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}
