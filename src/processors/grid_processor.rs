use crate::error::{ProcessingError, Result};
use crate::models::{Centroid, DatasetCategory, ParsedDataset, YearRange};
use crate::processors::alignment::{AlignmentChecker, AlignmentReport};
use crate::processors::centroid_builder::CentroidBuilder;
use crate::processors::row_emitter::RowEmitter;
use crate::readers::{clear_caches, write_cache, GridTextReader};
use crate::settings::RunConfig;
use crate::utils::filename::{dataset_token, json_cache_path, map_image_path, result_csv_path};
use crate::utils::progress::ProgressReporter;
use crate::visualize::{ColorTable, MapRenderer};
use crate::writers::ResultCsvWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ConversionSummary {
    pub output_file: PathBuf,
    pub rows_written: usize,
    pub years: YearRange,
    pub cells_per_year: usize,
    pub json_caches: Vec<PathBuf>,
}

impl ConversionSummary {
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "FINISHED, wrote {} rows to {}\nYears: {} to {} ({} cells per year)",
            self.rows_written,
            self.output_file.display(),
            self.years.start,
            self.years.stop,
            self.cells_per_year
        );
        for cache in &self.json_caches {
            summary.push_str(&format!("\nJSON cache: {}", cache.display()));
        }
        summary
    }
}

#[derive(Debug, Clone)]
pub struct MapSummary {
    pub image_file: PathBuf,
    pub year: String,
    pub category: DatasetCategory,
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    Csv(ConversionSummary),
    Map(MapSummary),
}

/// Parsed and checked input pair, ready to be emitted or rendered
struct PreparedData {
    summer: ParsedDataset,
    spring: ParsedDataset,
    centroids: Vec<Centroid>,
    json_caches: Vec<PathBuf>,
}

/// Drives one conversion: pre-flight checks, parsing, caching, alignment,
/// centroid grid and finally the CSV (or the debug map).
pub struct GridProcessor {
    config: RunConfig,
}

impl GridProcessor {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn run(&self) -> Result<RunOutcome> {
        match self.config.show_map.clone() {
            Some(year) => self.render_map(&year).map(RunOutcome::Map),
            None => self.convert().map(RunOutcome::Csv),
        }
    }

    /// Parse both inputs and report how well they line up, writing nothing
    pub fn validate(&self) -> Result<AlignmentReport> {
        self.check_inputs()?;
        let reader = self.reader();
        let summer = reader.read_dataset(&self.config.summer_file)?;
        let spring = reader.read_dataset(&self.config.spring_file)?;
        AlignmentChecker::with_allow_misaligned(self.config.allow_misaligned).check(
            &summer,
            &spring,
            self.config.grid.cell_count(),
        )
    }

    fn convert(&self) -> Result<ConversionSummary> {
        let years = self.config.years.ok_or_else(|| {
            ProcessingError::MissingData(
                "year range (pass --year-start and --year-stop or choose a --preset)".to_string(),
            )
        })?;

        // Nothing is read while a previous result is in the way
        let output_file =
            result_csv_path(&self.config.spring_file, self.config.output_dir.as_deref())?;
        if output_file.exists() {
            return Err(ProcessingError::ResultExists { path: output_file });
        }

        self.log_banner(Some(years));
        let data = self.prepare()?;

        let emitter = RowEmitter::new(&data.centroids, &data.summer, &data.spring, years)?;
        let writer = ResultCsvWriter::new(
            &dataset_token(&self.config.summer_file)?,
            &dataset_token(&self.config.spring_file)?,
        );

        info!(
            "Writing {} rows to {}",
            emitter.row_count(),
            output_file.display()
        );
        let progress = ProgressReporter::for_years(
            years,
            &format!("Writing {}", output_file.display()),
            self.config.quiet,
        );
        let rows_written = writer.write_emitter(&emitter, &output_file, Some(&progress))?;
        progress.finish(&format!("Wrote {} rows", rows_written));

        Ok(ConversionSummary {
            output_file,
            rows_written,
            years,
            cells_per_year: data.centroids.len(),
            json_caches: data.json_caches,
        })
    }

    fn render_map(&self, year: &str) -> Result<MapSummary> {
        let category = DatasetCategory::from_path(&self.config.spring_file)?;
        self.log_banner(None);
        let data = self.prepare()?;

        let block = data
            .summer
            .get(year)
            .ok_or_else(|| ProcessingError::YearNotFound {
                dataset: "summer".to_string(),
                year: year.to_string(),
            })?;

        let image_file =
            map_image_path(&self.config.spring_file, self.config.output_dir.as_deref(), year)?;
        if let Some(parent) = image_file.parent() {
            std::fs::create_dir_all(parent)?;
        }

        info!("SHOWING MAP FOR YEAR {} FOR DEBUGGING...", year);
        MapRenderer::new().render_to_file(
            &self.config.grid,
            block,
            &ColorTable::for_category(category),
            &image_file,
        )?;

        Ok(MapSummary {
            image_file,
            year: year.to_string(),
            category,
        })
    }

    fn prepare(&self) -> Result<PreparedData> {
        self.check_inputs()?;

        let summer_cache = json_cache_path(&self.config.summer_file);
        let spring_cache = json_cache_path(&self.config.spring_file);
        let stale: Vec<&Path> = [summer_cache.as_path(), spring_cache.as_path()]
            .into_iter()
            .filter(|cache| !self.is_input(cache))
            .collect();
        if self.config.write_json_cache && stale.len() < 2 {
            return Err(ProcessingError::Config(format!(
                "JSON cache would overwrite an input file ({} / {}); rename the input or pass --no-json-cache",
                summer_cache.display(),
                spring_cache.display()
            )));
        }
        clear_caches(&stale);

        let mut json_caches = Vec::new();
        let summer = self.parse_and_cache(&self.config.summer_file, &summer_cache, &mut json_caches)?;
        let spring = self.parse_and_cache(&self.config.spring_file, &spring_cache, &mut json_caches)?;

        let report = AlignmentChecker::with_allow_misaligned(self.config.allow_misaligned).check(
            &summer,
            &spring,
            self.config.grid.cell_count(),
        )?;
        debug!("{}", report.summary());

        let centroids = CentroidBuilder::new(self.config.grid).build();
        info!("Built {} grid centroids", centroids.len());

        Ok(PreparedData {
            summer,
            spring,
            centroids,
            json_caches,
        })
    }

    fn parse_and_cache(
        &self,
        input: &Path,
        cache: &Path,
        written: &mut Vec<PathBuf>,
    ) -> Result<ParsedDataset> {
        let dataset = self.reader().read_dataset(input)?;
        if self.config.write_json_cache {
            write_cache(&dataset, cache)?;
            written.push(cache.to_path_buf());
        }
        Ok(dataset)
    }

    fn reader(&self) -> GridTextReader {
        GridTextReader::new(self.config.grid.rows as usize).with_mmap(self.config.use_mmap)
    }

    fn is_input(&self, path: &Path) -> bool {
        [&self.config.summer_file, &self.config.spring_file]
            .into_iter()
            .any(|input| input.as_path() == path || same_file(input, path))
    }

    fn check_inputs(&self) -> Result<()> {
        for input in [&self.config.summer_file, &self.config.spring_file] {
            if !input.is_file() {
                return Err(ProcessingError::InputNotFound(input.clone()));
            }
        }
        Ok(())
    }

    fn log_banner(&self, years: Option<YearRange>) {
        let grid = &self.config.grid;
        info!("Extracting summer data from {}", self.config.summer_file.display());
        info!("Extracting spring data from {}", self.config.spring_file.display());
        info!("Using {} columns and {} rows", grid.columns, grid.rows);
        if let Some(years) = years {
            info!("From year {} to {}", years.start, years.stop);
        }
        info!(
            "Using point LON: {} LAT: {} for top right",
            grid.bbox.up_right_lon, grid.bbox.up_right_lat
        );
        info!(
            "Using point LON: {} LAT: {} for down left",
            grid.bbox.low_left_lon, grid.bbox.low_left_lat
        );
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
