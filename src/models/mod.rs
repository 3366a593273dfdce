pub mod category;
pub mod grid;
pub mod output;
pub mod year_block;

pub use category::{DatasetCategory, GridPreset};
pub use grid::{BoundingBox, Centroid, GridCell, GridSpec, YearRange};
pub use output::OutputRow;
pub use year_block::{ParsedDataset, YearBlock};
