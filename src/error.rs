//! Error types shared across loading, resolution and output

use std::path::PathBuf;
use thiserror::Error;

use crate::location::Granularity;

#[derive(Debug, Error)]
pub enum SlcspError {
    /// The identifier has no rows in the location table. Aborts the whole batch.
    #[error("no rate area known for {granularity} {identifier:?}")]
    LocationNotFound {
        identifier: String,
        granularity: Granularity,
    },

    #[error("failed to read {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse table: {0}")]
    Parse(#[source] csv::Error),

    #[error("failed to write results: {0}")]
    Output(#[source] csv::Error),
}

pub type Result<T> = std::result::Result<T, SlcspError>;
