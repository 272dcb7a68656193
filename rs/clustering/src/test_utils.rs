use rand::Rng;

use crate::point::{Point, PointList};

// Generate a random vector with a given dimension
pub fn generate_random_vector(dimension: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    let mut vector = vec![];
    for _ in 0..dimension {
        vector.push(rng.gen::<f64>());
    }
    vector
}

// Generate `num_points` random points with a given dimension
pub fn generate_random_points(num_points: usize, dimension: usize) -> PointList {
    (0..num_points)
        .map(|_| Point::new(generate_random_vector(dimension)))
        .collect()
}

// Build 1-D points from plain values
pub fn points_1d(values: &[f64]) -> PointList {
    values.iter().map(|&x| Point::new(vec![x])).collect()
}
