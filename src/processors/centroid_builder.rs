use crate::models::{Centroid, GridCell, GridSpec};
use crate::utils::constants::{CELL_HALF_DEG, CELL_SIZE_DEG};

/// Builds the 0.5 degree cell grid over a bounding box.
///
/// Cells come out north row first and west to east within a row, which is
/// the order cell values appear in the reconstruction files.
pub struct CentroidBuilder {
    grid: GridSpec,
}

impl CentroidBuilder {
    pub fn new(grid: GridSpec) -> Self {
        Self { grid }
    }

    pub fn build_cells(&self) -> Vec<GridCell> {
        let columns = self.grid.columns as usize;
        let rows = self.grid.rows as usize;
        let dx = self.grid.lon_step();
        let dy = self.grid.lat_step();

        // Box centres shifted onto the upper-left corner of each cell
        let west = self.grid.bbox.low_left_lon - CELL_HALF_DEG;
        let south = self.grid.bbox.low_left_lat + CELL_HALF_DEG;

        let mut cells = Vec::with_capacity(columns * rows);
        for i in (0..rows).rev() {
            let lat = south + dy * i as f64;
            for j in 0..columns {
                let lon = west + dx * j as f64;
                cells.push(GridCell {
                    corners: [
                        (lon, lat),
                        (lon + CELL_SIZE_DEG, lat),
                        (lon + CELL_SIZE_DEG, lat - CELL_SIZE_DEG),
                        (lon, lat - CELL_SIZE_DEG),
                    ],
                    centroid: Centroid {
                        lon: lon + CELL_HALF_DEG,
                        lat: lat - CELL_HALF_DEG,
                    },
                });
            }
        }
        cells
    }

    pub fn build(&self) -> Vec<Centroid> {
        self.build_cells().into_iter().map(|c| c.centroid).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BoundingBox;
    use std::collections::HashSet;

    fn temp_grid() -> GridSpec {
        GridSpec::new(
            130,
            70,
            BoundingBox {
                low_left_lon: -24.75,
                low_left_lat: 35.25,
                up_right_lon: 39.75,
                up_right_lat: 69.75,
            },
        )
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_temperature_grid_centroids() {
        let centroids = CentroidBuilder::new(temp_grid()).build();
        assert_eq!(centroids.len(), 9100);

        let first = centroids[0];
        assert!(close(first.lon, -24.75) && close(first.lat, 69.75));

        let second = centroids[1];
        assert!(close(second.lon, -24.25) && close(second.lat, 69.75));

        // Start of the second row is one step south
        let next_row = centroids[130];
        assert!(close(next_row.lon, -24.75) && close(next_row.lat, 69.25));

        let last = centroids[9099];
        assert!(close(last.lon, 39.75) && close(last.lat, 35.25));
    }

    #[test]
    fn test_centroids_are_unique() {
        let centroids = CentroidBuilder::new(temp_grid()).build();
        let unique: HashSet<(i64, i64)> = centroids
            .iter()
            .map(|c| ((c.lon * 1000.0).round() as i64, (c.lat * 1000.0).round() as i64))
            .collect();
        assert_eq!(unique.len(), 9100);
    }

    #[test]
    fn test_centroids_are_deterministic() {
        let builder = CentroidBuilder::new(temp_grid());
        assert_eq!(builder.build(), builder.build());
    }

    #[test]
    fn test_cell_corners() {
        let cells = CentroidBuilder::new(temp_grid()).build_cells();
        let cell = cells[0];
        let (lon, lat) = cell.upper_left();
        assert!(close(lon, -25.0) && close(lat, 70.0));
        assert!(close(cell.corners[2].0, -24.5) && close(cell.corners[2].1, 69.5));
    }
}
