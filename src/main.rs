use anyhow::Context;
use clap::Parser;
use cru_grid_processor::cli::{run, Cli};
use cru_grid_processor::utils::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref()).context("failed to initialise logging")?;
    run(cli).context("cru-grid run aborted")
}
