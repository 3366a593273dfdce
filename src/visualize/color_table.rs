//! Value to color lookup tables for the debug map.

use crate::models::DatasetCategory;
use crate::utils::constants::{MISSING_TOLERANCE, MISSING_VALUE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedColor {
    pub name: &'static str,
    pub rgb: [u8; 3],
}

pub const WHITE: NamedColor = NamedColor { name: "white", rgb: [255, 255, 255] };
pub const BLACK: NamedColor = NamedColor { name: "black", rgb: [0, 0, 0] };
pub const PURPLE: NamedColor = NamedColor { name: "purple", rgb: [128, 0, 128] };
pub const BLUE: NamedColor = NamedColor { name: "blue", rgb: [0, 0, 255] };
pub const CYAN: NamedColor = NamedColor { name: "cyan", rgb: [0, 255, 255] };
pub const TURQUOISE: NamedColor = NamedColor { name: "turquoise", rgb: [64, 224, 208] };
pub const GREEN: NamedColor = NamedColor { name: "green", rgb: [0, 128, 0] };
pub const GREEN_YELLOW: NamedColor = NamedColor { name: "greenyellow", rgb: [173, 255, 47] };
pub const YELLOW: NamedColor = NamedColor { name: "yellow", rgb: [255, 255, 0] };
pub const ORANGE: NamedColor = NamedColor { name: "orange", rgb: [255, 165, 0] };
pub const RED: NamedColor = NamedColor { name: "red", rgb: [255, 0, 0] };
pub const DARK_ORCHID: NamedColor = NamedColor { name: "darkorchid", rgb: [153, 50, 204] };
pub const ORANGE_RED: NamedColor = NamedColor { name: "orangered", rgb: [255, 69, 0] };
pub const LIGHT_SEA_GREEN: NamedColor = NamedColor { name: "lightseagreen", rgb: [32, 178, 170] };
pub const DEEP_SKY_BLUE: NamedColor = NamedColor { name: "deepskyblue", rgb: [0, 191, 255] };
pub const DODGER_BLUE: NamedColor = NamedColor { name: "dodgerblue", rgb: [30, 144, 255] };
pub const ROYAL_BLUE: NamedColor = NamedColor { name: "royalblue", rgb: [65, 105, 225] };
pub const MEDIUM_BLUE: NamedColor = NamedColor { name: "mediumblue", rgb: [0, 0, 205] };

/// Values up to and including `upper` get `color`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub upper: f64,
    pub color: NamedColor,
}

const fn stop(upper: f64, color: NamedColor) -> ColorStop {
    ColorStop { upper, color }
}

/// Temperature in °C
const TEMPERATURE_STOPS: &[ColorStop] = &[
    stop(-20.0, BLACK),
    stop(-15.0, PURPLE),
    stop(-10.0, BLUE),
    stop(-5.0, CYAN),
    stop(0.0, TURQUOISE),
    stop(2.5, GREEN),
    stop(5.0, GREEN_YELLOW),
    stop(10.0, YELLOW),
    stop(12.5, ORANGE),
    stop(15.0, RED),
    stop(20.0, DARK_ORCHID),
    stop(f64::INFINITY, PURPLE),
];

/// Seasonal precipitation in mm; nothing at or below zero is drawn
const PRECIPITATION_STOPS: &[ColorStop] = &[
    stop(0.0, WHITE),
    stop(50.0, RED),
    stop(100.0, ORANGE_RED),
    stop(150.0, ORANGE),
    stop(200.0, YELLOW),
    stop(250.0, GREEN_YELLOW),
    stop(300.0, GREEN),
    stop(350.0, LIGHT_SEA_GREEN),
    stop(400.0, TURQUOISE),
    stop(450.0, CYAN),
    stop(500.0, DEEP_SKY_BLUE),
    stop(550.0, DODGER_BLUE),
    stop(600.0, ROYAL_BLUE),
    stop(650.0, MEDIUM_BLUE),
    stop(700.0, RED),
    stop(f64::INFINITY, BLACK),
];

#[derive(Debug, Clone, Copy)]
pub struct ColorTable {
    stops: &'static [ColorStop],
    missing: NamedColor,
}

impl ColorTable {
    pub fn for_category(category: DatasetCategory) -> Self {
        let stops = match category {
            DatasetCategory::Temperature => TEMPERATURE_STOPS,
            DatasetCategory::Precipitation => PRECIPITATION_STOPS,
        };
        Self {
            stops,
            missing: WHITE,
        }
    }

    pub fn stops(&self) -> &'static [ColorStop] {
        self.stops
    }

    pub fn color_for(&self, value: f64) -> NamedColor {
        if value.is_nan() || (value - MISSING_VALUE).abs() < MISSING_TOLERANCE {
            return self.missing;
        }
        self.stops
            .iter()
            .find(|s| value <= s.upper)
            .map(|s| s.color)
            .unwrap_or(self.missing)
    }
}
