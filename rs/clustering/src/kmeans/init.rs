use config::enums::InitStrategy;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::distance::l2::distance_squared;
use crate::error::{ClusteringError, Result};
use crate::point::{Point, PointList};

/// Picks `num_clusters` initial centroids from `points`.
/// Requires `0 < num_clusters <= points.len()`.
pub fn init_centroids(
    points: &[Point],
    num_clusters: usize,
    strategy: InitStrategy,
) -> Result<PointList> {
    if points.is_empty() {
        return Err(ClusteringError::EmptyInput);
    }
    if num_clusters == 0 || num_clusters > points.len() {
        return Err(ClusteringError::InvalidClusterCount {
            num_clusters: num_clusters as i64,
            num_points: points.len(),
        });
    }

    let indices = match strategy {
        InitStrategy::FirstK => (0..num_clusters).collect(),
        InitStrategy::Strided => strided_indices(points.len(), num_clusters),
        InitStrategy::Random { seed } => {
            let mut rng = StdRng::seed_from_u64(seed);
            rand::seq::index::sample(&mut rng, points.len(), num_clusters).into_vec()
        }
        InitStrategy::PlusPlus { seed } => plus_plus_indices(points, num_clusters, seed)?,
    };
    debug!("Initial centroids ({:?}): {:?}", strategy, indices);

    Ok(indices.into_iter().map(|i| points[i].clone()).collect())
}

fn strided_indices(num_points: usize, num_clusters: usize) -> Vec<usize> {
    (0..num_clusters)
        .map(|i| i * num_points / num_clusters)
        .collect()
}

// k-means++: every next centroid is drawn with probability proportional to its squared
// distance to the closest centroid chosen so far.
fn plus_plus_indices(points: &[Point], num_clusters: usize, seed: u64) -> Result<Vec<usize>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let first = rng.gen_range(0..points.len());
    let mut chosen = vec![first];
    let mut min_distances = points
        .iter()
        .map(|point| distance_squared(point, &points[first]))
        .collect::<Result<Vec<f64>>>()?;

    while chosen.len() < num_clusters {
        let total: f64 = min_distances.iter().sum();
        let weighted = if total > 0.0 {
            let target = rng.gen::<f64>() * total;
            let mut cumulative = 0.0;
            let mut selected = None;
            for (i, &d) in min_distances.iter().enumerate() {
                if d <= 0.0 {
                    continue;
                }
                cumulative += d;
                if target < cumulative {
                    selected = Some(i);
                    break;
                }
            }
            // Rounding can leave target just past the last bucket
            selected.or_else(|| min_distances.iter().rposition(|&d| d > 0.0))
        } else {
            None
        };

        // All remaining points coincide with a chosen centroid
        let next = match weighted {
            Some(i) => i,
            None => (0..points.len())
                .find(|i| !chosen.contains(i))
                .unwrap_or(first),
        };
        chosen.push(next);

        for (i, point) in points.iter().enumerate() {
            let d = distance_squared(point, &points[next])?;
            if d < min_distances[i] {
                min_distances[i] = d;
            }
        }
    }
    Ok(chosen)
}
