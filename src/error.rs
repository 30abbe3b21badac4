//! Error types for the diagnostics toolkit

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the toolkit.
///
/// Generator implementations are opaque to the toolkit, so their failures
/// propagate unmodified; everything the toolkit itself can reject is listed
/// here.
#[derive(Debug, Error)]
pub enum ToolkitError {
    /// A point cloud had an unusable shape. Accepted shapes are (N, D) with
    /// D >= 2, or a flat 2-element slice for a single point.
    #[error("expected points with shape (N, 2) or (2,), got {0:?}")]
    InvalidPointShape(Vec<usize>),

    /// A metric name passed to a history append did not match any of the
    /// record's declared sequences.
    #[error("unknown metric `{name}` for {record} history")]
    UnknownMetric {
        name: String,
        record: &'static str,
    },

    /// The beams2d dataset export is not present.
    #[error(
        "beams2d dataset not found at `{path}`: {source}. \
         Export the train split to CSV (one flattened design per row) and retry"
    )]
    DatasetMissing {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A dataset export contained values the toolkit cannot use.
    #[error("invalid dataset content: {0}")]
    InvalidData(String),

    /// A plotters drawing operation failed.
    #[error("chart rendering failed: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
