//! Debug map rendering. Presentation only; never touches the CSV output.

pub mod color_table;
pub mod map_renderer;

pub use color_table::{ColorStop, ColorTable, NamedColor};
pub use map_renderer::MapRenderer;
