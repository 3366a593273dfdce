use crate::error::{ProcessingError, Result};
use crate::models::{BoundingBox, DatasetCategory, GridPreset, GridSpec, YearRange};
use crate::utils::constants::ENV_PREFIX;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use validator::Validate;

/// Partially specified grid settings from one configuration layer.
///
/// The same shape is read from a config file, from `CRU_GRID_*` environment
/// variables and from the command line; layers are merged with [`Self::or`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GridOverrides {
    pub columns: Option<u32>,
    pub rows: Option<u32>,
    pub up_right_lon: Option<f64>,
    pub up_right_lat: Option<f64>,
    pub low_left_lon: Option<f64>,
    pub low_left_lat: Option<f64>,
    pub year_start: Option<i32>,
    pub year_stop: Option<i32>,
    pub preset: Option<DatasetCategory>,
    pub output_dir: Option<PathBuf>,
}

impl GridOverrides {
    /// Read the optional config file and the environment
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ProcessingError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            debug!("Loading settings from {}", path.display());
            builder = builder.add_source(config::File::from(path));
        }
        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Field-wise merge, `self` taking precedence over `lower`
    pub fn or(self, lower: GridOverrides) -> Self {
        Self {
            columns: self.columns.or(lower.columns),
            rows: self.rows.or(lower.rows),
            up_right_lon: self.up_right_lon.or(lower.up_right_lon),
            up_right_lat: self.up_right_lat.or(lower.up_right_lat),
            low_left_lon: self.low_left_lon.or(lower.low_left_lon),
            low_left_lat: self.low_left_lat.or(lower.low_left_lat),
            year_start: self.year_start.or(lower.year_start),
            year_stop: self.year_stop.or(lower.year_stop),
            preset: self.preset.or(lower.preset),
            output_dir: self.output_dir.or(lower.output_dir),
        }
    }

    fn preset(&self) -> Option<GridPreset> {
        self.preset.map(|category| category.preset())
    }

    pub fn resolve_grid(&self) -> Result<GridSpec> {
        let preset = self.preset();
        let fallback = preset.map(|p| p.grid);

        let grid = GridSpec::new(
            required(self.columns, fallback.map(|g| g.columns), "columns")?,
            required(self.rows, fallback.map(|g| g.rows), "rows")?,
            BoundingBox {
                low_left_lon: required(
                    self.low_left_lon,
                    fallback.map(|g| g.bbox.low_left_lon),
                    "low_left_lon",
                )?,
                low_left_lat: required(
                    self.low_left_lat,
                    fallback.map(|g| g.bbox.low_left_lat),
                    "low_left_lat",
                )?,
                up_right_lon: required(
                    self.up_right_lon,
                    fallback.map(|g| g.bbox.up_right_lon),
                    "up_right_lon",
                )?,
                up_right_lat: required(
                    self.up_right_lat,
                    fallback.map(|g| g.bbox.up_right_lat),
                    "up_right_lat",
                )?,
            },
        );
        grid.validate()?;
        Ok(grid)
    }

    /// `None` when no layer mentions years at all
    pub fn resolve_years(&self) -> Result<Option<YearRange>> {
        let fallback = self.preset().map(|p| p.years);
        if self.year_start.is_none() && self.year_stop.is_none() && fallback.is_none() {
            return Ok(None);
        }

        let years = YearRange::new(
            required(self.year_start, fallback.map(|y| y.start), "year_start")?,
            required(self.year_stop, fallback.map(|y| y.stop), "year_stop")?,
        );
        years.validate()?;
        Ok(Some(years))
    }
}

fn required<T>(value: Option<T>, fallback: Option<T>, name: &str) -> Result<T> {
    value.or(fallback).ok_or_else(|| {
        ProcessingError::MissingData(format!(
            "{} (pass --{}, set it in the config file or choose a --preset)",
            name,
            name.replace('_', "-")
        ))
    })
}
