use config::enums::AssignmentMode;
use config::kmeans::KMeansConfig;
use log::{debug, info};

use crate::error::{ClusteringError, Result};
use crate::kmeans::assignment::{assign_all, inertia};
use crate::kmeans::convergence::centroids_within;
use crate::kmeans::init::init_centroids;
use crate::kmeans::update::update_centroids;
use crate::point::{common_dimension, Point, PointList};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClusterState {
    Initializing,
    Iterating,
    Converged,
    IterationLimitReached,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Termination {
    Converged,
    IterationLimitReached,
    // k = 0, nothing was clustered
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IterationStats {
    pub iteration: usize,
    // Inertia of this iteration's assignment against the centroids it was computed from
    pub inertia: f64,
    pub empty_clusters: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KMeansResult {
    pub centroids: PointList,
    pub assignments: Vec<usize>,
    /// Iterations that completed without detecting convergence.
    pub iterations: usize,
    pub termination: Termination,
    /// One entry per executed iteration, including the one that detected convergence.
    pub history: Vec<IterationStats>,
}

impl KMeansResult {
    fn skipped() -> Self {
        Self {
            centroids: vec![],
            assignments: vec![],
            iterations: 0,
            termination: Termination::Skipped,
            history: vec![],
        }
    }

    pub fn num_clusters(&self) -> usize {
        self.centroids.len()
    }
}

pub struct KMeans {
    pub config: KMeansConfig,
}

impl KMeans {
    pub fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    /// Clusters `points` into `config.num_clusters` groups.
    pub fn cluster(&self, points: &[Point]) -> Result<KMeansResult> {
        let num_clusters = self.config.num_clusters;
        if num_clusters == 0 {
            info!("Number of clusters is 0, skipping clustering");
            return Ok(KMeansResult::skipped());
        }

        let dimension = common_dimension(points)?;
        if num_clusters > points.len() {
            return Err(ClusteringError::InvalidClusterCount {
                num_clusters: num_clusters as i64,
                num_points: points.len(),
            });
        }

        info!(
            "Start clustering {} points of dimension {} into {} clusters",
            points.len(),
            dimension,
            num_clusters
        );
        let mut cluster_loop = ClusterLoop::new(points, &self.config, num_clusters, vec![]);
        cluster_loop.run()?;
        cluster_loop.finish()
    }

    /// Clusters `points` starting from caller-provided centroids. The number of clusters is
    /// `initial_centroids.len()`; `config.num_clusters` and `config.init_strategy` are ignored.
    pub fn cluster_from(
        &self,
        points: &[Point],
        initial_centroids: PointList,
    ) -> Result<KMeansResult> {
        if initial_centroids.is_empty() {
            info!("No initial centroids, skipping clustering");
            return Ok(KMeansResult::skipped());
        }

        let dimension = common_dimension(points)?;
        for centroid in initial_centroids.iter() {
            if centroid.dimension() != dimension {
                return Err(ClusteringError::DimensionMismatch {
                    expected: dimension,
                    actual: centroid.dimension(),
                });
            }
        }

        info!(
            "Start clustering {} points of dimension {} from {} given centroids",
            points.len(),
            dimension,
            initial_centroids.len()
        );
        let num_clusters = initial_centroids.len();
        let mut cluster_loop = ClusterLoop::new(points, &self.config, num_clusters, initial_centroids);
        cluster_loop.state = cluster_loop.enter_iterating();
        cluster_loop.run()?;
        cluster_loop.finish()
    }
}

/// Clusters `points` with the default configuration.
pub fn cluster(points: &[Point], num_clusters: usize, max_iteration: usize) -> Result<KMeansResult> {
    KMeans::new(KMeansConfig::new(num_clusters, max_iteration)).cluster(points)
}

// Each iteration owns its assignment and produces a fresh centroid set; nothing is updated in
// place.
struct ClusterLoop<'a> {
    points: &'a [Point],
    config: &'a KMeansConfig,
    num_clusters: usize,
    state: ClusterState,
    centroids: PointList,
    // Assignment of the last iteration that did not detect convergence
    settled: Option<Vec<usize>>,
    iteration: usize,
    history: Vec<IterationStats>,
}

impl<'a> ClusterLoop<'a> {
    fn new(
        points: &'a [Point],
        config: &'a KMeansConfig,
        num_clusters: usize,
        centroids: PointList,
    ) -> Self {
        Self {
            points,
            config,
            num_clusters,
            state: ClusterState::Initializing,
            centroids,
            settled: None,
            iteration: 0,
            history: vec![],
        }
    }

    fn enter_iterating(&self) -> ClusterState {
        if self.iteration >= self.config.max_iteration {
            ClusterState::IterationLimitReached
        } else {
            ClusterState::Iterating
        }
    }

    fn run(&mut self) -> Result<()> {
        loop {
            self.state = match self.state {
                ClusterState::Initializing => {
                    self.centroids =
                        init_centroids(self.points, self.num_clusters, self.config.init_strategy)?;
                    self.enter_iterating()
                }
                ClusterState::Iterating => self.iterate()?,
                ClusterState::Converged | ClusterState::IterationLimitReached => return Ok(()),
            };
        }
    }

    fn iterate(&mut self) -> Result<ClusterState> {
        let assignments = assign_all(self.points, &self.centroids)?;
        let current_inertia = inertia(self.points, &self.centroids, &assignments)?;
        let update = update_centroids(self.points, &assignments, &self.centroids)?;

        if let Some(last) = self.history.last() {
            debug!(
                "Iteration {} - Error: {:.2} -> {:.2} | Improvement: {:.2}",
                self.iteration,
                last.inertia,
                current_inertia,
                last.inertia - current_inertia
            );
        }
        self.history.push(IterationStats {
            iteration: self.iteration,
            inertia: current_inertia,
            empty_clusters: update.empty_clusters,
        });

        let previous = std::mem::replace(&mut self.centroids, update.centroids);
        if centroids_within(&previous, &self.centroids, self.config.tolerance) {
            info!("Converged after {} iterations", self.iteration);
            return Ok(ClusterState::Converged);
        }

        self.settled = Some(assignments);
        self.iteration += 1;
        let next = self.enter_iterating();
        if next == ClusterState::IterationLimitReached {
            info!(
                "Reached the iteration limit of {} without converging",
                self.config.max_iteration
            );
        }
        Ok(next)
    }

    fn finish(self) -> Result<KMeansResult> {
        let termination = match self.state {
            ClusterState::Converged => Termination::Converged,
            _ => Termination::IterationLimitReached,
        };
        let assignments = match (self.config.assignment_mode, self.settled) {
            (AssignmentMode::Settled, Some(settled)) => settled,
            _ => assign_all(self.points, &self.centroids)?,
        };
        Ok(KMeansResult {
            centroids: self.centroids,
            assignments,
            iterations: self.iteration,
            termination,
            history: self.history,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use config::enums::InitStrategy;

    use super::*;
    use crate::kmeans::assignment::nearest_centroid;
    use crate::test_utils::{generate_random_points, points_1d};

    fn check_result_shape(result: &KMeansResult, points: &[Point], num_clusters: usize) {
        assert_eq!(result.centroids.len(), num_clusters);
        for centroid in &result.centroids {
            assert_eq!(centroid.dimension(), points[0].dimension());
            assert!(centroid.as_slice().iter().all(|x| x.is_finite()));
        }
        assert_eq!(result.assignments.len(), points.len());
        assert!(result.assignments.iter().all(|&a| a < num_clusters));
    }

    #[test]
    fn test_two_well_separated_clusters() {
        let points = points_1d(&[0.0, 1.0, 10.0, 11.0]);
        let result = cluster(&points, 2, 100).expect("KMeans run should succeed");

        assert_eq!(result.termination, Termination::Converged);
        assert_eq!(result.centroids, points_1d(&[0.5, 10.5]));
        assert_eq!(result.assignments, vec![0, 0, 1, 1]);
        assert_eq!(result.iterations, 2);
        assert_eq!(result.history.len(), 3);
        check_result_shape(&result, &points, 2);
    }

    #[test]
    fn test_kmeans_lloyd() {
        let data = vec![
            vec![0.0, 0.0],
            vec![40.0, 40.0],
            vec![90.0, 90.0],
            vec![1.0, 1.0],
            vec![41.0, 41.0],
            vec![91.0, 91.0],
            vec![2.0, 2.0],
            vec![42.0, 42.0],
            vec![92.0, 92.0],
        ];
        let points: PointList = data.into_iter().map(Point::new).collect();

        let kmeans = KMeans::new(KMeansConfig::new(3, 100));
        let result = kmeans.cluster(&points).expect("KMeans run should succeed");

        assert_eq!(result.termination, Termination::Converged);
        check_result_shape(&result, &points, 3);
        assert_eq!(result.assignments[0], result.assignments[3]);
        assert_eq!(result.assignments[0], result.assignments[6]);
        assert_eq!(result.assignments[1], result.assignments[4]);
        assert_eq!(result.assignments[1], result.assignments[7]);
        assert_eq!(result.assignments[2], result.assignments[5]);
        assert_eq!(result.assignments[2], result.assignments[8]);
        assert_ne!(result.assignments[0], result.assignments[1]);
        assert_ne!(result.assignments[1], result.assignments[2]);

        let mut centroids: Vec<f64> = result.centroids.iter().map(|c| c[0]).collect();
        centroids.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_abs_diff_eq!(centroids[0], 1.0);
        assert_abs_diff_eq!(centroids[1], 41.0);
        assert_abs_diff_eq!(centroids[2], 91.0);
    }

    #[test]
    fn test_single_cluster() {
        let points = vec![
            Point::new(vec![1.0, 2.0]),
            Point::new(vec![3.0, 4.0]),
            Point::new(vec![5.0, 9.0]),
        ];
        let result = cluster(&points, 1, 100).unwrap();

        assert_eq!(result.termination, Termination::Converged);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.centroids, vec![Point::new(vec![3.0, 5.0])]);
        assert_eq!(result.assignments, vec![0, 0, 0]);
    }

    #[test]
    fn test_identical_points_more_clusters_than_groups() {
        let points = points_1d(&[5.0, 5.0, 5.0, 5.0]);
        let result = cluster(&points, 2, 100).unwrap();

        // Cluster 1 never receives a point and stays where it started
        assert_eq!(result.termination, Termination::Converged);
        assert_eq!(result.centroids, points_1d(&[5.0, 5.0]));
        assert_eq!(result.assignments, vec![0, 0, 0, 0]);
        assert_eq!(result.history[0].empty_clusters, vec![1]);
        check_result_shape(&result, &points, 2);
    }

    #[test]
    fn test_empty_cluster_keeps_previous_centroid() {
        let points = points_1d(&[0.0, 1.0, 2.0]);
        let kmeans = KMeans::new(KMeansConfig::default());
        let result = kmeans
            .cluster_from(&points, points_1d(&[1.0, 100.0]))
            .unwrap();

        assert_eq!(result.termination, Termination::Converged);
        assert_eq!(result.centroids, points_1d(&[1.0, 100.0]));
        assert_eq!(result.assignments, vec![0, 0, 0]);
        assert_eq!(result.history.len(), 1);
        assert_eq!(result.history[0].empty_clusters, vec![1]);
    }

    #[test]
    fn test_iteration_cap() {
        // Needs 2 iterations to settle, see test_two_well_separated_clusters
        let points = points_1d(&[0.0, 1.0, 10.0, 11.0]);
        let result = cluster(&points, 2, 1).unwrap();

        assert_eq!(result.termination, Termination::IterationLimitReached);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.history.len(), 1);
        assert_abs_diff_eq!(result.centroids[0][0], 0.0);
        assert_abs_diff_eq!(result.centroids[1][0], 22.0 / 3.0);
        check_result_shape(&result, &points, 2);
    }

    #[test]
    fn test_zero_iterations() {
        let points = points_1d(&[0.0, 1.0, 10.0, 11.0]);
        let result = cluster(&points, 2, 0).unwrap();

        assert_eq!(result.termination, Termination::IterationLimitReached);
        assert_eq!(result.iterations, 0);
        assert!(result.history.is_empty());
        // Initial centroids, with the assignment against them
        assert_eq!(result.centroids, points_1d(&[0.0, 1.0]));
        assert_eq!(result.assignments, vec![0, 1, 1, 1]);
    }

    #[test]
    fn test_settled_assignment_lags_final_centroids() {
        // With the default mode the reported assignment is the one the last centroid update was
        // computed from, so it can disagree with the returned centroids. Callers that need a
        // consistent labeling re-run nearest_centroid or use AssignmentMode::Final.
        let points = points_1d(&[0.0, 1.0, 10.0, 11.0]);
        let result = cluster(&points, 2, 1).unwrap();
        assert_eq!(result.assignments, vec![0, 1, 1, 1]);

        let relabeled: Vec<usize> = points
            .iter()
            .map(|p| nearest_centroid(p, &result.centroids).unwrap())
            .collect();
        assert_eq!(relabeled, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_final_assignment_matches_centroids() {
        let points = points_1d(&[0.0, 1.0, 10.0, 11.0]);
        let config = KMeansConfig::new(2, 1).with_assignment_mode(AssignmentMode::Final);
        let result = KMeans::new(config).cluster(&points).unwrap();

        assert_eq!(result.termination, Termination::IterationLimitReached);
        assert_eq!(result.assignments, vec![0, 0, 1, 1]);
        for (point, &label) in points.iter().zip(result.assignments.iter()) {
            assert_eq!(nearest_centroid(point, &result.centroids).unwrap(), label);
        }
    }

    #[test]
    fn test_zero_clusters() {
        let points = points_1d(&[0.0, 1.0]);
        let result = cluster(&points, 0, 100).unwrap();
        assert_eq!(result.termination, Termination::Skipped);
        assert!(result.centroids.is_empty());
        assert!(result.assignments.is_empty());
        assert_eq!(result.num_clusters(), 0);
    }

    #[test]
    fn test_invalid_input() {
        let points = points_1d(&[0.0, 1.0]);
        assert_eq!(
            cluster(&points, 3, 100),
            Err(ClusteringError::InvalidClusterCount {
                num_clusters: 3,
                num_points: 2
            })
        );

        let points = vec![Point::new(vec![0.0, 1.0]), Point::new(vec![2.0])];
        assert_eq!(
            cluster(&points, 1, 100),
            Err(ClusteringError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );

        assert_eq!(cluster(&[], 1, 100), Err(ClusteringError::EmptyInput));

        let points = points_1d(&[0.0, 1.0]);
        let kmeans = KMeans::new(KMeansConfig::default());
        assert_eq!(
            kmeans.cluster_from(&points, vec![Point::new(vec![0.0, 0.0])]),
            Err(ClusteringError::DimensionMismatch {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_deterministic() {
        let points = generate_random_points(300, 3);
        for strategy in [
            InitStrategy::FirstK,
            InitStrategy::Strided,
            InitStrategy::Random { seed: 17 },
            InitStrategy::PlusPlus { seed: 17 },
        ] {
            let kmeans = KMeans::new(KMeansConfig::new(6, 50).with_init_strategy(strategy));
            let a = kmeans.cluster(&points).unwrap();
            let b = kmeans.cluster(&points).unwrap();
            assert_eq!(a, b);
            check_result_shape(&a, &points, 6);
        }
    }

    #[test]
    fn test_inertia_non_increasing() {
        let points = generate_random_points(500, 2);
        let kmeans = KMeans::new(
            KMeansConfig::new(8, 100).with_init_strategy(InitStrategy::PlusPlus { seed: 1 }),
        );
        let result = kmeans.cluster(&points).unwrap();

        for window in result.history.windows(2) {
            let (prev, next) = (&window[0], &window[1]);
            if !next.empty_clusters.is_empty() {
                continue;
            }
            assert!(
                next.inertia <= prev.inertia + 1e-9 * prev.inertia.max(1.0),
                "inertia went up at iteration {}: {} -> {}",
                next.iteration,
                prev.inertia,
                next.inertia
            );
        }
    }

    #[test]
    fn test_tolerance_stops_early() {
        let points = generate_random_points(400, 2);
        let exact = KMeans::new(KMeansConfig::new(5, 200)).cluster(&points).unwrap();
        let loose = KMeans::new(KMeansConfig::new(5, 200).with_tolerance(1e3))
            .cluster(&points)
            .unwrap();

        // Every shift is below a tolerance this large, so the first iteration already converges
        assert_eq!(loose.termination, Termination::Converged);
        assert_eq!(loose.iterations, 0);
        assert!(exact.iterations >= loose.iterations);
    }
}
