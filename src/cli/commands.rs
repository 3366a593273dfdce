use crate::cli::args::{Cli, Commands, GridArgs, InputArgs};
use crate::error::Result;
use crate::models::DatasetCategory;
use crate::processors::{GridProcessor, RunOutcome};
use crate::settings::{GridOverrides, RunConfig};
use crate::utils::progress::ProgressReporter;
use tracing::debug;

pub fn run(cli: Cli) -> Result<()> {
    if cli.verbose {
        debug!("Verbose logging enabled");
    }

    match cli.command {
        Commands::Convert {
            input,
            grid,
            output_dir,
            show_map,
            allow_misaligned,
            no_json_cache,
            mmap,
        } => {
            let settings = resolve_settings(&grid)?;
            let mut config = base_config(&input, &settings)?
                .with_allow_misaligned(allow_misaligned)
                .with_json_cache(!no_json_cache)
                .with_mmap(mmap)
                .with_quiet(cli.quiet);
            config.years = settings.resolve_years()?;
            config.output_dir = output_dir.or(settings.output_dir);
            config.show_map = show_map;

            println!("Converting CRU reconstruction data...");
            println!("Summer file: {}", config.summer_file.display());
            println!("Spring file: {}", config.spring_file.display());
            println!(
                "Grid: {} columns x {} rows",
                config.grid.columns, config.grid.rows
            );

            match GridProcessor::new(config).run()? {
                RunOutcome::Csv(summary) => println!("\n{}", summary.summary()),
                RunOutcome::Map(map) => println!(
                    "\n{} map for year {} written to {}",
                    map.category.token(),
                    map.year,
                    map.image_file.display()
                ),
            }
        }

        Commands::Validate {
            input,
            grid,
            allow_misaligned,
            mmap,
        } => {
            let settings = resolve_settings(&grid)?;
            let config = base_config(&input, &settings)?
                .with_allow_misaligned(allow_misaligned)
                .with_mmap(mmap)
                .with_quiet(cli.quiet);

            println!("Validating CRU reconstruction data...");
            let progress = ProgressReporter::spinner("Parsing input files...", cli.quiet);
            let report = GridProcessor::new(config).validate()?;
            progress.finish("Validation complete");

            println!("\n{}", report.summary());
            if report.is_aligned() {
                println!("✅ Datasets can be merged");
            } else {
                println!("⚠️  Found {} alignment issues", report.issues.len());
            }
        }

        Commands::Presets => {
            for category in DatasetCategory::all() {
                let preset = category.preset();
                let bbox = preset.grid.bbox;
                println!(
                    "{} ({}, {}): {} columns x {} rows, lower-left ({}, {}), upper-right ({}, {}), years {}-{}",
                    category.token(),
                    category.display_name(),
                    category.units(),
                    preset.grid.columns,
                    preset.grid.rows,
                    bbox.low_left_lon,
                    bbox.low_left_lat,
                    bbox.up_right_lon,
                    bbox.up_right_lat,
                    preset.years.start,
                    preset.years.stop
                );
            }
        }
    }

    Ok(())
}

/// Command line first, then environment and config file
fn resolve_settings(grid: &GridArgs) -> Result<GridOverrides> {
    let lower = GridOverrides::load(grid.config.as_deref())?;
    Ok(grid.to_overrides().or(lower))
}

fn base_config(input: &InputArgs, settings: &GridOverrides) -> Result<RunConfig> {
    Ok(RunConfig::new(
        input.summer_file.clone(),
        input.spring_file.clone(),
        settings.resolve_grid()?,
    ))
}
