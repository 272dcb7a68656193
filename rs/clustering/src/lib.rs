pub mod distance;
pub mod error;
pub mod kmeans;
pub mod point;
pub mod test_utils;

pub use error::{ClusteringError, Result};
pub use kmeans::assignment::nearest_centroid;
pub use kmeans::kmeans::{cluster, KMeans, KMeansResult, Termination};
pub use point::{Point, PointList};

pub trait DistanceCalculator {
    fn calculate(&self, a: &[f64], b: &[f64]) -> f64;
}

/// Trait for calculating the squared distance between two vectors. An optimization for when the true
/// L2 distance is not needed.
pub trait CalculateSquared {
    fn calculate_squared(&self, a: &[f64], b: &[f64]) -> f64;
}
