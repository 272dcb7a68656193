pub mod text;

use clustering::{Point, PointList};

pub struct Row<'a> {
    pub id: u64,
    pub data: &'a [f64],
}

pub trait Input {
    // Return true if there are more rows to read
    fn has_next(&self) -> bool;

    // Return the next row of data
    fn next(&mut self) -> Row<'_>;

    // Reset the state of the input to the beginning
    // This is helpful when we want to do multiple passes over the same input
    fn reset(&mut self);

    // Return the number of rows in the input
    fn num_rows(&self) -> usize;
}

/// Drains `input` from its beginning into a point list. Row order is kept.
pub fn read_points(input: &mut impl Input) -> PointList {
    input.reset();
    let mut points = Vec::with_capacity(input.num_rows());
    while input.has_next() {
        let row = input.next();
        points.push(Point::new(row.data.to_vec()));
    }
    points
}
