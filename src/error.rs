use thiserror::Error;

/// Result alias for `strand`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by distance, clustering, and history primitives.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input was empty.
    #[error("empty input provided")]
    EmptyInput,

    /// Vector length mismatch.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// Requested cluster count lies outside `1..=n_items`.
    #[error("cannot create {requested} clusters from {n_items} items")]
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of items.
        n_items: usize,
    },

    /// A distance source produced a negative or non-finite value.
    #[error("invalid distance {value} between points {i} and {j}")]
    InvalidDistance {
        /// First point.
        i: usize,
        /// Second point.
        j: usize,
        /// Offending value.
        value: f64,
    },

    /// Lookup or merge against a retired or out-of-range cluster slot.
    #[error("cluster {id} is not active")]
    InvalidCluster {
        /// Cluster slot id.
        id: usize,
    },

    /// Merge bound outside `1..=max`.
    #[error("invalid merge count {requested}: must be in 1..={max}")]
    InvalidMergeCount {
        /// Requested number of merges.
        requested: usize,
        /// Largest admissible number of merges (`n - 1`).
        max: usize,
    },

    /// Fewer than two points were supplied for a run that must merge.
    #[error("need at least 2 points to merge, got {n_points}")]
    InsufficientData {
        /// Number of points supplied.
        n_points: usize,
    },

    /// The recorded history is too short to reach the requested partition.
    #[error("cannot resolve {requested} clusters: history only reaches {min_clusters}")]
    InsufficientHistory {
        /// Requested number of clusters.
        requested: usize,
        /// Smallest cluster count the history can produce.
        min_clusters: usize,
    },
}
