/// Dataset category tokens (leading `_`-separated token of a file name)
pub const CATEGORY_TEMP: &str = "temp";
pub const CATEGORY_PREC: &str = "prec";

/// File name suffixes
pub const RESULT_SUFFIX: &str = "_result.csv";
pub const JSON_CACHE_EXTENSION: &str = "json";
pub const SUMMER_COLUMN_SUFFIX: &str = "_su";
pub const SPRING_COLUMN_SUFFIX: &str = "_sp";

/// Grid geometry: coordinates in the source files denote the centre of a
/// 0.5 x 0.5 degree box
pub const CELL_SIZE_DEG: f64 = 0.5;
pub const CELL_HALF_DEG: f64 = 0.25;

/// Missing value sentinel used by the reconstructions
pub const MISSING_VALUE: f64 = -99.999;
pub const MISSING_TOLERANCE: f64 = 1e-6;

/// Temperature grid (summer/spring reconstructions)
pub const TEMP_COLUMNS: u32 = 130;
pub const TEMP_ROWS: u32 = 70;
pub const TEMP_LOW_LEFT_LON: f64 = -24.75;
pub const TEMP_LOW_LEFT_LAT: f64 = 35.25;
pub const TEMP_UP_RIGHT_LON: f64 = 39.75;
pub const TEMP_UP_RIGHT_LAT: f64 = 69.75;
pub const TEMP_FIRST_YEAR: i32 = 1500;
pub const TEMP_LAST_YEAR: i32 = 2002;

/// Precipitation grid
pub const PREC_COLUMNS: u32 = 140;
pub const PREC_ROWS: u32 = 82;
pub const PREC_LOW_LEFT_LON: f64 = -29.75;
pub const PREC_LOW_LEFT_LAT: f64 = 30.25;
pub const PREC_UP_RIGHT_LON: f64 = 39.75;
pub const PREC_UP_RIGHT_LAT: f64 = 70.75;
pub const PREC_FIRST_YEAR: i32 = 1500;
pub const PREC_LAST_YEAR: i32 = 2000;

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
pub const DEFAULT_MAP_CELL_PIXELS: u32 = 6;
pub const JSON_CACHE_INDENT: &[u8] = b"    ";

/// Environment prefix for configuration overrides
pub const ENV_PREFIX: &str = "CRU_GRID";
