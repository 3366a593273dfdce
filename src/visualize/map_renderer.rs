use crate::error::{ProcessingError, Result};
use crate::models::{GridSpec, YearBlock};
use crate::utils::constants::DEFAULT_MAP_CELL_PIXELS;
use crate::visualize::color_table::{ColorTable, BLACK};
use image::{Rgb, RgbImage};
use std::path::Path;
use tracing::info;

/// Draws one year of a grid as colored squares with black cell borders
pub struct MapRenderer {
    cell_pixels: u32,
    draw_borders: bool,
}

impl MapRenderer {
    pub fn new() -> Self {
        Self {
            cell_pixels: DEFAULT_MAP_CELL_PIXELS,
            draw_borders: true,
        }
    }

    pub fn with_cell_pixels(mut self, cell_pixels: u32) -> Self {
        self.cell_pixels = cell_pixels.max(1);
        self
    }

    pub fn with_borders(mut self, draw_borders: bool) -> Self {
        self.draw_borders = draw_borders;
        self
    }

    pub fn render(&self, grid: &GridSpec, block: &YearBlock, table: &ColorTable) -> Result<RgbImage> {
        if block.cell_count() != grid.cell_count() {
            return Err(ProcessingError::DatasetMismatch(format!(
                "year {} has {} cells, grid has {}",
                block.label,
                block.cell_count(),
                grid.cell_count()
            )));
        }

        let px = self.cell_pixels;
        let mut image = RgbImage::new(grid.columns * px, grid.rows * px);

        for (index, cell) in block.cells().enumerate() {
            let value = cell.parse::<f64>().map_err(|_| {
                ProcessingError::InvalidFormat(format!("Invalid cell value: '{}'", cell))
            })?;
            let color = Rgb(table.color_for(value).rgb);

            let column = index as u32 % grid.columns;
            let row = index as u32 / grid.columns;
            for dy in 0..px {
                for dx in 0..px {
                    let border = self.draw_borders && px > 2 && (dx == 0 || dy == 0);
                    let pixel = if border { Rgb(BLACK.rgb) } else { color };
                    image.put_pixel(column * px + dx, row * px + dy, pixel);
                }
            }
        }

        Ok(image)
    }

    pub fn render_to_file(
        &self,
        grid: &GridSpec,
        block: &YearBlock,
        table: &ColorTable,
        path: &Path,
    ) -> Result<()> {
        let image = self.render(grid, block, table)?;
        image.save(path)?;
        info!(
            "Rendered map for year {} to {} ({}x{} px)",
            block.label,
            path.display(),
            image.width(),
            image.height()
        );
        Ok(())
    }
}

impl Default for MapRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoundingBox, DatasetCategory};
    use crate::visualize::color_table::{RED, WHITE};
    use tempfile::TempDir;

    fn grid() -> GridSpec {
        GridSpec::new(
            3,
            2,
            BoundingBox {
                low_left_lon: 0.25,
                low_left_lat: 40.25,
                up_right_lon: 1.25,
                up_right_lat: 40.75,
            },
        )
    }

    fn block() -> YearBlock {
        let row = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        YearBlock::new(
            "1500",
            vec![row(&["-99.999", "14.0", "14.0"]), row(&["14.0", "14.0", "14.0"])],
        )
    }

    #[test]
    fn test_render_layout() {
        let table = ColorTable::for_category(DatasetCategory::Temperature);
        let image = MapRenderer::new()
            .with_cell_pixels(4)
            .render(&grid(), &block(), &table)
            .unwrap();

        assert_eq!(image.dimensions(), (12, 8));
        assert_eq!(image.get_pixel(0, 0), &Rgb(BLACK.rgb));
        assert_eq!(image.get_pixel(2, 2), &Rgb(WHITE.rgb));
        assert_eq!(image.get_pixel(6, 2), &Rgb(RED.rgb));
    }

    #[test]
    fn test_cell_count_must_match_grid() {
        let table = ColorTable::for_category(DatasetCategory::Temperature);
        let short = YearBlock::new("1500", vec![vec!["1.0".to_string()]]);
        assert!(matches!(
            MapRenderer::new().render(&grid(), &short, &table),
            Err(ProcessingError::DatasetMismatch(_))
        ));
    }

    #[test]
    fn test_render_to_png() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("temp_map_1500.png");
        let table = ColorTable::for_category(DatasetCategory::Temperature);
        MapRenderer::new().render_to_file(&grid(), &block(), &table, &path)?;

        let decoded = image::open(&path)?.to_rgb8();
        assert_eq!(decoded.width(), 3 * DEFAULT_MAP_CELL_PIXELS);
        Ok(())
    }
}
