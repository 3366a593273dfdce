use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Geographic extent of a grid. All corners are box centres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_corners"))]
pub struct BoundingBox {
    #[validate(range(min = -180.0, max = 180.0))]
    pub low_left_lon: f64,

    #[validate(range(min = -90.0, max = 90.0))]
    pub low_left_lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub up_right_lon: f64,

    #[validate(range(min = -90.0, max = 90.0))]
    pub up_right_lat: f64,
}

fn validate_corners(bbox: &BoundingBox) -> std::result::Result<(), ValidationError> {
    if bbox.up_right_lon <= bbox.low_left_lon || bbox.up_right_lat <= bbox.low_left_lat {
        let mut err = ValidationError::new("corner_order");
        err.message = Some("upper-right corner must lie north-east of lower-left corner".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct GridSpec {
    #[validate(range(min = 2))]
    pub columns: u32,

    #[validate(range(min = 2))]
    pub rows: u32,

    #[validate(nested)]
    pub bbox: BoundingBox,
}

impl GridSpec {
    pub fn new(columns: u32, rows: u32, bbox: BoundingBox) -> Self {
        Self {
            columns,
            rows,
            bbox,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn lon_step(&self) -> f64 {
        (self.bbox.up_right_lon - self.bbox.low_left_lon) / (self.columns as f64 - 1.0)
    }

    pub fn lat_step(&self) -> f64 {
        (self.bbox.up_right_lat - self.bbox.low_left_lat) / (self.rows as f64 - 1.0)
    }
}

/// Inclusive year range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_year_order"))]
pub struct YearRange {
    pub start: i32,
    pub stop: i32,
}

fn validate_year_order(range: &YearRange) -> std::result::Result<(), ValidationError> {
    if range.start > range.stop {
        let mut err = ValidationError::new("year_order");
        err.message = Some("year start must not be after year stop".into());
        return Err(err);
    }
    Ok(())
}

impl YearRange {
    pub fn new(start: i32, stop: i32) -> Self {
        Self { start, stop }
    }

    pub fn len(&self) -> usize {
        if self.stop < self.start {
            0
        } else {
            (i64::from(self.stop) - i64::from(self.start)) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.start..=self.stop
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub lon: f64,
    pub lat: f64,
}

/// One 0.5 x 0.5 degree cell, corners clockwise from upper-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub corners: [(f64, f64); 4],
    pub centroid: Centroid,
}

impl GridCell {
    pub fn upper_left(&self) -> (f64, f64) {
        self.corners[0]
    }
}
