use crate::models::DatasetCategory;
use crate::settings::GridOverrides;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cru-grid")]
#[command(about = "Convert CRU paleoclimate reconstruction grids into merged per-cell CSV datasets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Hide progress bars")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge a summer and a spring reconstruction into one CSV
    Convert {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        grid: GridArgs,

        #[arg(
            short,
            long,
            help = "Directory for the result CSV [default: the spring file's directory]"
        )]
        output_dir: Option<PathBuf>,

        #[arg(
            long,
            alias = "map",
            value_name = "YEAR",
            help = "Render the summer map of YEAR as PNG instead of writing the CSV"
        )]
        show_map: Option<String>,

        #[arg(long, help = "Warn instead of failing when the datasets do not line up")]
        allow_misaligned: bool,

        #[arg(long, help = "Do not write the intermediate JSON caches")]
        no_json_cache: bool,

        #[arg(long, help = "Memory-map input files")]
        mmap: bool,
    },

    /// Parse both files and check they can be merged, without writing anything
    Validate {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        grid: GridArgs,

        #[arg(long, help = "Report misalignment instead of failing")]
        allow_misaligned: bool,

        #[arg(long, help = "Memory-map input files")]
        mmap: bool,
    },

    /// List the built-in grid presets
    Presets,
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    #[arg(short = 'u', long, alias = "suf", help = "Summer reconstruction file")]
    pub summer_file: PathBuf,

    #[arg(short = 'p', long, alias = "spf", help = "Spring reconstruction file")]
    pub spring_file: PathBuf,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GridArgs {
    #[arg(short, long, alias = "columns-n", help = "Grid columns")]
    pub columns: Option<u32>,

    #[arg(short, long, alias = "rows-n", help = "Grid rows (text rows per year)")]
    pub rows: Option<u32>,

    #[arg(long, alias = "urlo", allow_negative_numbers = true, help = "Upper-right box centre longitude")]
    pub up_right_lon: Option<f64>,

    #[arg(long, alias = "urla", allow_negative_numbers = true, help = "Upper-right box centre latitude")]
    pub up_right_lat: Option<f64>,

    #[arg(long, alias = "lllo", allow_negative_numbers = true, help = "Lower-left box centre longitude")]
    pub low_left_lon: Option<f64>,

    #[arg(long, alias = "llla", allow_negative_numbers = true, help = "Lower-left box centre latitude")]
    pub low_left_lat: Option<f64>,

    #[arg(long, alias = "y-sta", help = "First year to write (inclusive)")]
    pub year_start: Option<i32>,

    #[arg(long, alias = "y-sto", help = "Last year to write (inclusive)")]
    pub year_stop: Option<i32>,

    #[arg(long, value_parser = parse_preset, help = "Built-in grid: 'temp' or 'prec'")]
    pub preset: Option<DatasetCategory>,

    #[arg(long, help = "Settings file (toml, yaml, json, ...)")]
    pub config: Option<PathBuf>,
}

impl GridArgs {
    pub fn to_overrides(&self) -> GridOverrides {
        GridOverrides {
            columns: self.columns,
            rows: self.rows,
            up_right_lon: self.up_right_lon,
            up_right_lat: self.up_right_lat,
            low_left_lon: self.low_left_lon,
            low_left_lat: self.low_left_lat,
            year_start: self.year_start,
            year_stop: self.year_stop,
            preset: self.preset,
            output_dir: None,
        }
    }
}

fn parse_preset(value: &str) -> std::result::Result<DatasetCategory, String> {
    value.parse::<DatasetCategory>().map_err(|e| e.to_string())
}
