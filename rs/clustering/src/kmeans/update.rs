use std::num::NonZeroUsize;

use log::warn;

use crate::error::{ClusteringError, Result};
use crate::point::{Point, PointList};

/// Output of one update step.
#[derive(Debug, Clone, PartialEq)]
pub struct CentroidUpdate {
    pub centroids: PointList,
    // Clusters that had no member and kept their previous position
    pub empty_clusters: Vec<usize>,
}

/// The points labeled with `index`, in input order.
pub fn group_by_centroid<'a>(
    points: &'a [Point],
    assignments: &[usize],
    index: usize,
) -> Vec<&'a Point> {
    points
        .iter()
        .zip(assignments.iter())
        .filter(|(_, label)| **label == index)
        .map(|(point, _)| point)
        .collect()
}

/// Coordinate-wise mean of the members of cluster `index`.
pub fn recompute_centroid(index: usize, members: &[&Point]) -> Result<Point> {
    let (first, rest) = members
        .split_first()
        .ok_or(ClusteringError::EmptyCluster { index })?;
    let mut sum = (*first).clone();
    for point in rest {
        sum = sum.add(point)?;
    }
    let count = NonZeroUsize::new(members.len()).ok_or(ClusteringError::EmptyCluster { index })?;
    Ok(sum.div_by_n(count))
}

/// Builds a new centroid set from the current assignment. A cluster left without members
/// keeps its previous position.
pub fn update_centroids(
    points: &[Point],
    assignments: &[usize],
    previous: &[Point],
) -> Result<CentroidUpdate> {
    let mut centroids = Vec::with_capacity(previous.len());
    let mut empty_clusters = vec![];
    for (index, previous_centroid) in previous.iter().enumerate() {
        let members = group_by_centroid(points, assignments, index);
        match recompute_centroid(index, &members) {
            Ok(centroid) => centroids.push(centroid),
            Err(ClusteringError::EmptyCluster { index }) => {
                warn!("Cluster {} is empty, keeping its previous centroid", index);
                empty_clusters.push(index);
                centroids.push(previous_centroid.clone());
            }
            Err(e) => return Err(e),
        }
    }
    Ok(CentroidUpdate {
        centroids,
        empty_clusters,
    })
}
