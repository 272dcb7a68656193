use crate::distance::l2::distance_squared;
use crate::error::{ClusteringError, Result};
use crate::point::Point;

/// Returns the index of the centroid closest to `point`. On ties the lowest index wins.
pub fn nearest_centroid(point: &Point, centroids: &[Point]) -> Result<usize> {
    let (first, rest) = centroids.split_first().ok_or(ClusteringError::EmptyInput)?;

    let mut closest = 0;
    let mut min_distance = distance_squared(point, first)?;
    for (i, centroid) in rest.iter().enumerate() {
        let distance = distance_squared(point, centroid)?;
        // Strict comparison keeps the earlier centroid on ties
        if distance < min_distance {
            min_distance = distance;
            closest = i + 1;
        }
    }
    Ok(closest)
}

/// Labels every point with the index of its nearest centroid.
pub fn assign_all(points: &[Point], centroids: &[Point]) -> Result<Vec<usize>> {
    points
        .iter()
        .map(|point| nearest_centroid(point, centroids))
        .collect()
}

/// Sum of squared distances from each point to the centroid it is assigned to.
pub fn inertia(points: &[Point], centroids: &[Point], assignments: &[usize]) -> Result<f64> {
    let mut sum = 0.0;
    for (point, &label) in points.iter().zip(assignments.iter()) {
        let centroid = centroids.get(label).ok_or(ClusteringError::InvalidClusterCount {
            num_clusters: label as i64 + 1,
            num_points: centroids.len(),
        })?;
        sum += distance_squared(point, centroid)?;
    }
    Ok(sum)
}
