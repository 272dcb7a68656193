use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ClusteringError {
    /// Two operands (points, or a point and a centroid) have different coordinate counts.
    #[error("dimension mismatch: expected {expected} coordinates, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Number of clusters is negative, or larger than the number of points available.
    #[error("invalid number of clusters {num_clusters} for {num_points} points")]
    InvalidClusterCount { num_clusters: i64, num_points: usize },

    #[error("point list is empty")]
    EmptyInput,

    /// A centroid ended an iteration without any assigned point.
    #[error("cluster {index} has no assigned points")]
    EmptyCluster { index: usize },
}

pub type Result<T> = std::result::Result<T, ClusteringError>;

/// Converts a caller-provided signed cluster count into the engine's representation.
pub fn num_clusters_from_signed(num_clusters: i64, num_points: usize) -> Result<usize> {
    usize::try_from(num_clusters).map_err(|_| ClusteringError::InvalidClusterCount {
        num_clusters,
        num_points,
    })
}
