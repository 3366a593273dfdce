use crate::error::{ProcessingError, Result};
use crate::models::OutputRow;
use crate::processors::RowEmitter;
use crate::utils::constants::{SPRING_COLUMN_SUFFIX, SUMMER_COLUMN_SUFFIX};
use crate::utils::progress::ProgressReporter;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Writes the merged `yr,lon_c,lat_c,<summer>_su,<spring>_sp` table.
///
/// Rows go to a temporary file next to the destination which is only moved
/// into place once complete, and never over an existing file.
pub struct ResultCsvWriter {
    summer_column: String,
    spring_column: String,
}

impl ResultCsvWriter {
    pub fn new(summer_token: &str, spring_token: &str) -> Self {
        Self {
            summer_column: format!("{}{}", summer_token, SUMMER_COLUMN_SUFFIX),
            spring_column: format!("{}{}", spring_token, SPRING_COLUMN_SUFFIX),
        }
    }

    pub fn header(&self) -> [&str; 5] {
        ["yr", "lon_c", "lat_c", &self.summer_column, &self.spring_column]
    }

    /// Write every row of the emitter, one progress tick per year
    pub fn write_emitter(
        &self,
        emitter: &RowEmitter<'_>,
        path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<usize> {
        self.write_atomically(path, |wtr| {
            let mut written = 0;
            for year in emitter.years().years() {
                let before = written;
                for row in emitter.rows_for_year(year) {
                    wtr.serialize(row)?;
                    written += 1;
                }
                debug!("Year {}: {} rows", year, written - before);
                if let Some(p) = progress {
                    p.year_done(year);
                }
            }
            Ok(written)
        })
    }

    pub fn write_rows<'a, I>(&self, rows: I, path: &Path) -> Result<usize>
    where
        I: IntoIterator<Item = OutputRow<'a>>,
    {
        self.write_atomically(path, |wtr| {
            let mut written = 0;
            for row in rows {
                wtr.serialize(row)?;
                written += 1;
            }
            Ok(written)
        })
    }

    fn write_atomically<F>(&self, path: &Path, write_body: F) -> Result<usize>
    where
        F: FnOnce(&mut csv::Writer<&mut File>) -> Result<usize>,
    {
        if path.exists() {
            return Err(ProcessingError::ResultExists {
                path: path.to_path_buf(),
            });
        }

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        };
        std::fs::create_dir_all(&dir)?;

        let mut temp = tempfile::Builder::new()
            .prefix(".cru-grid-")
            .suffix(".csv.tmp")
            .tempfile_in(&dir)?;

        let written = {
            let mut wtr = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(temp.as_file_mut());
            wtr.write_record(self.header())?;
            let written = write_body(&mut wtr)?;
            wtr.flush()?;
            written
        };

        persist(temp, path)?;
        Ok(written)
    }
}

fn persist(temp: NamedTempFile, path: &Path) -> Result<()> {
    temp.persist_noclobber(path).map_err(|e| {
        if e.error.kind() == ErrorKind::AlreadyExists {
            ProcessingError::ResultExists {
                path: path.to_path_buf(),
            }
        } else {
            ProcessingError::Io(e.error)
        }
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn rows() -> Vec<OutputRow<'static>> {
        vec![
            OutputRow {
                yr: 1500,
                lon_c: -24.75,
                lat_c: 69.75,
                summer: "12.345",
                spring: "-99.999",
            },
            OutputRow {
                yr: 1500,
                lon_c: -24.25,
                lat_c: 35.0,
                summer: "1",
                spring: "2",
            },
        ]
    }

    #[test]
    fn test_write_rows() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("temp_result.csv");
        let writer = ResultCsvWriter::new("temp", "temp");

        assert_eq!(writer.write_rows(rows(), &path)?, 2);

        let content = std::fs::read_to_string(&path)?;
        assert_eq!(
            content,
            "yr,lon_c,lat_c,temp_su,temp_sp\n\
             1500,-24.75,69.75,12.345,-99.999\n\
             1500,-24.25,35.0,1,2\n"
        );
        Ok(())
    }

    #[test]
    fn test_refuses_to_overwrite() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("temp_result.csv");
        std::fs::write(&path, "keep me")?;

        let err = ResultCsvWriter::new("temp", "temp")
            .write_rows(rows(), &path)
            .unwrap_err();
        assert!(matches!(err, ProcessingError::ResultExists { .. }));
        assert_eq!(std::fs::read_to_string(&path)?, "keep me");
        Ok(())
    }

    #[test]
    fn test_no_temp_files_left_behind() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("out").join("prec_result.csv");
        ResultCsvWriter::new("prec", "prec").write_rows(rows(), &path)?;

        let names: Vec<_> = std::fs::read_dir(path.parent().unwrap())?
            .map(|e| e.map(|e| e.file_name().to_string_lossy().to_string()))
            .collect::<std::io::Result<_>>()?;
        assert_eq!(names, vec!["prec_result.csv".to_string()]);
        Ok(())
    }
}
