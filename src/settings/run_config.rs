use crate::models::{GridSpec, YearRange};
use std::path::PathBuf;

/// Everything one conversion run needs, fully resolved
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub summer_file: PathBuf,
    pub spring_file: PathBuf,
    pub grid: GridSpec,
    pub years: Option<YearRange>,
    pub output_dir: Option<PathBuf>,
    /// Render this year's map instead of writing the CSV
    pub show_map: Option<String>,
    pub allow_misaligned: bool,
    pub write_json_cache: bool,
    pub use_mmap: bool,
    pub quiet: bool,
}

impl RunConfig {
    pub fn new(summer_file: PathBuf, spring_file: PathBuf, grid: GridSpec) -> Self {
        Self {
            summer_file,
            spring_file,
            grid,
            years: None,
            output_dir: None,
            show_map: None,
            allow_misaligned: false,
            write_json_cache: true,
            use_mmap: false,
            quiet: false,
        }
    }

    pub fn with_years(mut self, years: YearRange) -> Self {
        self.years = Some(years);
        self
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = Some(output_dir);
        self
    }

    pub fn with_show_map(mut self, year: impl Into<String>) -> Self {
        self.show_map = Some(year.into());
        self
    }

    pub fn with_allow_misaligned(mut self, allow_misaligned: bool) -> Self {
        self.allow_misaligned = allow_misaligned;
        self
    }

    pub fn with_json_cache(mut self, write_json_cache: bool) -> Self {
        self.write_json_cache = write_json_cache;
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}
