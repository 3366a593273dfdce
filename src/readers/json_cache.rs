use crate::error::Result;
use crate::models::ParsedDataset;
use crate::utils::constants::JSON_CACHE_INDENT;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// Write the parsed blocks as a 4-space indented JSON object keyed by year
pub fn write_cache(dataset: &ParsedDataset, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_CACHE_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    dataset.serialize(&mut serializer)?;
    writer.flush()?;

    info!("Wrote JSON cache {} ({} years)", path.display(), dataset.len());
    Ok(())
}

pub fn read_cache(path: &Path) -> Result<ParsedDataset> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Remove stale caches from a previous run. Failures are logged and skipped.
pub fn clear_caches(paths: &[&Path]) -> usize {
    let mut removed = 0;
    for path in paths {
        if !path.exists() {
            continue;
        }
        match std::fs::remove_file(path) {
            Ok(()) => {
                removed += 1;
                info!("Previous JSON cache deleted: {}", path.display());
            }
            Err(e) => warn!("Previous JSON cache not deleted: {}: {}", path.display(), e),
        }
    }
    removed
}
