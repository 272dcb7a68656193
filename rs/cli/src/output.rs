use std::io::Write;

use anyhow::Result;
use clustering::{KMeansResult, Point};

/// Writes a clustering result as text: the centroids, then every point with its cluster.
/// Section headers start with `#` so the output can be read back by the text reader.
pub struct ResultWriter<W: Write> {
    writer: W,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write(&mut self, points: &[Point], result: &KMeansResult) -> Result<()> {
        writeln!(self.writer, "# centroids")?;
        for (idx, centroid) in result.centroids.iter().enumerate() {
            writeln!(self.writer, "{}\t{}", idx, centroid)?;
        }

        // Points without an assignment (no clustering was done) get -1
        writeln!(self.writer, "# points")?;
        for (idx, point) in points.iter().enumerate() {
            match result.assignments.get(idx) {
                Some(cluster) => writeln!(self.writer, "{}\t{}", point, cluster)?,
                None => writeln!(self.writer, "{}\t-1", point)?,
            }
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
