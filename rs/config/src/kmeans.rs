use std::io::Write;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::enums::{AssignmentMode, InitStrategy};

/// Config for a k-means run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct KMeansConfig {
    /// Number of clusters to build. 0 disables clustering entirely.
    /// Default: 2
    pub num_clusters: usize,

    /// Hard cap on the number of iterations. The run always stops here, whether or not the
    /// centroids settled.
    /// Default: 100
    pub max_iteration: usize,

    /// Default: FirstK
    pub init_strategy: InitStrategy,

    /// Centroid sets are considered equal when no coordinate moved by more than this.
    /// 0.0 means exact equality.
    /// Default: 0.0
    pub tolerance: f64,

    /// Default: Settled
    pub assignment_mode: AssignmentMode,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            num_clusters: 2,
            max_iteration: 100,
            init_strategy: InitStrategy::FirstK,
            tolerance: 0.0,
            assignment_mode: AssignmentMode::Settled,
        }
    }
}

impl KMeansConfig {
    pub fn new(num_clusters: usize, max_iteration: usize) -> Self {
        Self {
            num_clusters,
            max_iteration,
            ..Default::default()
        }
    }

    pub fn with_init_strategy(mut self, init_strategy: InitStrategy) -> Self {
        self.init_strategy = init_strategy;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_assignment_mode(mut self, assignment_mode: AssignmentMode) -> Self {
        self.assignment_mode = assignment_mode;
        self
    }

    pub fn from_yaml_file(file_path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read config file {}", file_path))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", file_path))?;
        Ok(config)
    }

    pub fn write_yaml_file(&self, file_path: &str) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        let mut file = std::fs::File::create(file_path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }
}
