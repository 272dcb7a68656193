use serde::{Deserialize, Serialize};

/// How the initial centroids are picked from the input points.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub enum InitStrategy {
    /// The first k points.
    #[default]
    FirstK,
    /// Points at indices `i * n / k`, spread evenly over the input.
    Strided,
    /// k distinct points sampled uniformly with a seeded generator.
    Random { seed: u64 },
    /// k-means++ seeding with a seeded generator.
    PlusPlus { seed: u64 },
}

/// Which assignment vector a finished run reports.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub enum AssignmentMode {
    /// The assignment computed before the centroids stopped moving. When the run never
    /// produced one (converged on its first iteration, or ran zero iterations), the
    /// assignment against the returned centroids is reported instead.
    #[default]
    Settled,
    /// Assignment recomputed against the returned centroids.
    Final,
}
