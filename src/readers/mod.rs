pub mod grid_text_reader;
pub mod json_cache;

pub use grid_text_reader::GridTextReader;
pub use json_cache::{clear_caches, read_cache, write_cache};
