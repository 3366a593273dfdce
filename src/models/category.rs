use crate::error::{ProcessingError, Result};
use crate::models::grid::{BoundingBox, GridSpec, YearRange};
use crate::utils::constants::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Kind of reconstruction, taken from the leading token of a file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetCategory {
    #[serde(rename = "temp")]
    Temperature,
    #[serde(rename = "prec")]
    Precipitation,
}

/// Grid layout and coverage documented for a dataset family
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPreset {
    pub grid: GridSpec,
    pub years: YearRange,
}

impl DatasetCategory {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            CATEGORY_TEMP => Some(DatasetCategory::Temperature),
            CATEGORY_PREC => Some(DatasetCategory::Precipitation),
            _ => None,
        }
    }

    /// Category of a data file; unknown tokens are an error
    pub fn from_path(path: &Path) -> Result<Self> {
        let token = crate::utils::dataset_token(path)?;
        Self::from_token(&token).ok_or(ProcessingError::UnsupportedCategory(token))
    }

    pub fn token(&self) -> &'static str {
        match self {
            DatasetCategory::Temperature => CATEGORY_TEMP,
            DatasetCategory::Precipitation => CATEGORY_PREC,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DatasetCategory::Temperature => "Temperature",
            DatasetCategory::Precipitation => "Precipitation",
        }
    }

    pub fn units(&self) -> &'static str {
        match self {
            DatasetCategory::Temperature => "°C",
            DatasetCategory::Precipitation => "mm",
        }
    }

    pub fn preset(&self) -> GridPreset {
        match self {
            DatasetCategory::Temperature => GridPreset {
                grid: GridSpec::new(
                    TEMP_COLUMNS,
                    TEMP_ROWS,
                    BoundingBox {
                        low_left_lon: TEMP_LOW_LEFT_LON,
                        low_left_lat: TEMP_LOW_LEFT_LAT,
                        up_right_lon: TEMP_UP_RIGHT_LON,
                        up_right_lat: TEMP_UP_RIGHT_LAT,
                    },
                ),
                years: YearRange::new(TEMP_FIRST_YEAR, TEMP_LAST_YEAR),
            },
            DatasetCategory::Precipitation => GridPreset {
                grid: GridSpec::new(
                    PREC_COLUMNS,
                    PREC_ROWS,
                    BoundingBox {
                        low_left_lon: PREC_LOW_LEFT_LON,
                        low_left_lat: PREC_LOW_LEFT_LAT,
                        up_right_lon: PREC_UP_RIGHT_LON,
                        up_right_lat: PREC_UP_RIGHT_LAT,
                    },
                ),
                years: YearRange::new(PREC_FIRST_YEAR, PREC_LAST_YEAR),
            },
        }
    }

    pub fn all() -> [DatasetCategory; 2] {
        [DatasetCategory::Temperature, DatasetCategory::Precipitation]
    }
}

impl std::fmt::Display for DatasetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for DatasetCategory {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_token(&s.to_lowercase())
            .ok_or_else(|| ProcessingError::UnsupportedCategory(s.to_string()))
    }
}
