pub mod constants;
pub mod filename;
pub mod logging;
pub mod progress;

pub use constants::*;
pub use filename::{dataset_token, json_cache_path, map_image_path, result_csv_path};
pub use logging::init_logging;
pub use progress::ProgressReporter;
