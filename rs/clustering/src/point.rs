use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Index;

use crate::error::{ClusteringError, Result};

/// A fixed-dimension vector of coordinates. Used for both data points and centroids.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    coordinates: Vec<f64>,
}

pub type PointList = Vec<Point>;

impl Point {
    pub fn new(coordinates: Vec<f64>) -> Self {
        Self { coordinates }
    }

    /// The origin in `dimension` dimensions.
    pub fn zero(dimension: usize) -> Self {
        Self {
            coordinates: vec![0.0; dimension],
        }
    }

    pub fn dimension(&self) -> usize {
        self.coordinates.len()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.coordinates
    }

    pub fn check_dimension(&self, other: &Point) -> Result<()> {
        if self.dimension() != other.dimension() {
            return Err(ClusteringError::DimensionMismatch {
                expected: self.dimension(),
                actual: other.dimension(),
            });
        }
        Ok(())
    }

    /// Elementwise sum of two points of equal dimension.
    pub fn add(&self, other: &Point) -> Result<Point> {
        self.check_dimension(other)?;
        Ok(Point::new(
            self.coordinates
                .iter()
                .zip(other.coordinates.iter())
                .map(|(a, b)| a + b)
                .collect(),
        ))
    }

    /// Scales every coordinate by 1/n.
    pub fn div_by_n(&self, n: NonZeroUsize) -> Point {
        let n = n.get() as f64;
        Point::new(self.coordinates.iter().map(|x| x / n).collect())
    }
}

impl From<Vec<f64>> for Point {
    fn from(coordinates: Vec<f64>) -> Self {
        Self::new(coordinates)
    }
}

impl Index<usize> for Point {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.coordinates[index]
    }
}

// Space separated coordinates, the same layout the text reader accepts.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, x) in self.coordinates.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", x)?;
        }
        Ok(())
    }
}

/// Checks that every point shares the dimension of the first one, and returns it.
pub fn common_dimension(points: &[Point]) -> Result<usize> {
    let first = points.first().ok_or(ClusteringError::EmptyInput)?;
    for point in points.iter().skip(1) {
        first.check_dimension(point)?;
    }
    Ok(first.dimension())
}
