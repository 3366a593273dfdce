use crate::error::Result;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_directives = if verbose {
        "info,cru_grid_processor=debug"
    } else {
        "warn,cru_grid_processor=info"
    };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let builder = fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(verbose);

    // A second initialisation (tests, embedding) keeps the first subscriber
    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    if let Err(e) = installed {
        debug!("Keeping the existing tracing subscriber: {}", e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_logging_to_file() -> Result<()> {
        let dir = TempDir::new()?;
        let log_path = dir.path().join("run.log");
        init_logging(true, Some(&log_path))?;
        assert!(log_path.exists());
        Ok(())
    }

    #[test]
    fn test_second_init_is_not_an_error() -> Result<()> {
        let dir = TempDir::new()?;
        init_logging(false, Some(&dir.path().join("first.log")))?;
        init_logging(false, None)?;
        Ok(())
    }
}
