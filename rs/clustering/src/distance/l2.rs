use crate::error::Result;
use crate::point::Point;
use crate::{CalculateSquared, DistanceCalculator};

pub struct L2DistanceCalculator {}

impl L2DistanceCalculator {
    pub fn new() -> Self {
        Self {}
    }

    pub fn calculate_scalar(&self, a: &[f64], b: &[f64]) -> f64 {
        self.calculate_squared(a, b).sqrt()
    }
}

impl Default for L2DistanceCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl DistanceCalculator for L2DistanceCalculator {
    /// Compute L2 distance between two vectors
    fn calculate(&self, a: &[f64], b: &[f64]) -> f64 {
        self.calculate_scalar(a, b)
    }
}

impl CalculateSquared for L2DistanceCalculator {
    fn calculate_squared(&self, a: &[f64], b: &[f64]) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| (x - y) * (x - y))
            .sum::<f64>()
    }
}

/// Euclidean distance between two points of equal dimension.
pub fn distance(a: &Point, b: &Point) -> Result<f64> {
    a.check_dimension(b)?;
    Ok(L2DistanceCalculator::new().calculate(a.as_slice(), b.as_slice()))
}

/// Squared Euclidean distance. Orders pairs the same way `distance` does, so the engine
/// compares with this one only.
pub fn distance_squared(a: &Point, b: &Point) -> Result<f64> {
    a.check_dimension(b)?;
    Ok(L2DistanceCalculator::new().calculate_squared(a.as_slice(), b.as_slice()))
}
