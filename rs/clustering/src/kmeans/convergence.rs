use crate::point::Point;

/// True iff both sets hold the same number of centroids and every coordinate is exactly equal.
pub fn centroids_equal(previous: &[Point], current: &[Point]) -> bool {
    previous.len() == current.len() && previous.iter().zip(current.iter()).all(|(a, b)| a == b)
}

/// Largest absolute coordinate change between two centroid sets. `None` if the sets can't be
/// compared (different sizes or dimensions).
pub fn max_centroid_shift(previous: &[Point], current: &[Point]) -> Option<f64> {
    if previous.len() != current.len() {
        return None;
    }
    let mut shift: f64 = 0.0;
    for (a, b) in previous.iter().zip(current.iter()) {
        if a.dimension() != b.dimension() {
            return None;
        }
        for (x, y) in a.as_slice().iter().zip(b.as_slice().iter()) {
            shift = shift.max((x - y).abs());
        }
    }
    Some(shift)
}

/// Tolerance form of `centroids_equal`. A tolerance of 0.0 is exact equality.
pub fn centroids_within(previous: &[Point], current: &[Point], tolerance: f64) -> bool {
    if tolerance == 0.0 {
        return centroids_equal(previous, current);
    }
    match max_centroid_shift(previous, current) {
        Some(shift) => shift <= tolerance,
        None => false,
    }
}
