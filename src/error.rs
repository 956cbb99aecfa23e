//! Failure kinds surfaced by the dashboard pipeline.

use thiserror::Error;

/// Pipeline [`Result`](std::result::Result) alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The pipeline error taxonomy.
///
/// Loaders and aggregators only ever return these; [`page::build`](crate::page::build)
/// decides which ones abort a request and which ones degrade the page.
#[derive(Debug, Error)]
pub enum Error {
    /// A backing file or remote endpoint is missing, unreachable or malformed.
    #[error("data unavailable: {source_name}: {reason}")]
    DataUnavailable { source_name: String, reason: String },

    /// A filter produced zero rows.
    #[error("empty dataset: {0}")]
    EmptyDataset(String),

    /// A dimension pair with identical dimensions.
    #[error("invalid dimension pair: ({0}, {1})")]
    InvalidDimensionPair(usize, usize),

    /// A cluster whose points have no two-dimensional hull.
    #[error("degenerate hull for cluster {label}: {reason}")]
    DegenerateHull { label: String, reason: flupred_hull::HullError },

    /// A chart that could not be written as JSON.
    #[error("failed to serialize chart {id}: {reason}")]
    Serialize { id: String, reason: String },
}

impl Error {
    /// Shorthand for [`Error::DataUnavailable`].
    ///
    /// ```rust
    /// use flupred::Error;
    /// let e = Error::unavailable("data/metadata.tsv", "No such file or directory");
    /// assert_eq!(e.to_string(), "data unavailable: data/metadata.tsv: No such file or directory");
    /// ```
    pub fn unavailable<S, R>(source_name: S, reason: R) -> Self
    where
        S: ToString,
        R: ToString,
    {
        Error::DataUnavailable { source_name: source_name.to_string(), reason: reason.to_string() }
    }
}
