use crate::error::{ProcessingError, Result};
use crate::models::{ParsedDataset, YearBlock};
use crate::utils::constants::DEFAULT_BUFFER_SIZE;
use memmap2::Mmap;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Reader for CRU reconstruction text files.
///
/// A line with exactly two tab-separated fields opens a year; every other
/// non-blank line is a row of whitespace-separated cell values. Rows are
/// handed out to the years in file order, `rows_per_year` at a time.
pub struct GridTextReader {
    rows_per_year: usize,
    use_mmap: bool,
}

impl GridTextReader {
    pub fn new(rows_per_year: usize) -> Self {
        Self {
            rows_per_year,
            use_mmap: false,
        }
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    pub fn rows_per_year(&self) -> usize {
        self.rows_per_year
    }

    /// Read and partition a whole file into year blocks
    pub fn read_dataset(&self, path: &Path) -> Result<ParsedDataset> {
        let file = File::open(path)?;

        let dataset = if self.use_mmap && file.metadata()?.len() > 0 {
            let mmap = unsafe { Mmap::map(&file)? };
            self.parse_str(path, &decode(&mmap))?
        } else {
            let mut bytes = Vec::new();
            BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file).read_to_end(&mut bytes)?;
            self.parse_str(path, &decode(&bytes))?
        };

        info!(
            "Parsed {}: {} years, {} cells",
            path.display(),
            dataset.len(),
            dataset.total_cells()
        );
        Ok(dataset)
    }

    /// Partition already loaded text; `source` is only used in error messages
    pub fn parse_str(&self, source: &Path, content: &str) -> Result<ParsedDataset> {
        if self.rows_per_year == 0 {
            return Err(ProcessingError::Config(
                "rows per year must be greater than zero".to_string(),
            ));
        }

        let mut labels: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut line_count = 0;

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            line_count += 1;

            if line.is_empty() {
                continue;
            }

            if let Some(label) = header_label(line) {
                if label.is_empty() {
                    return Err(ProcessingError::InvalidFormat(format!(
                        "Empty year label at {}:{}",
                        source.display(),
                        index + 1
                    )));
                }
                if !seen.insert(label.to_string()) {
                    return Err(ProcessingError::DuplicateYear {
                        file: source.to_path_buf(),
                        year: label.to_string(),
                    });
                }
                labels.push(label.to_string());
            } else {
                rows.push(parse_row(source, index + 1, line)?);
            }
        }

        debug!(
            "{}: {} lines, {} year headers, {} data rows",
            source.display(),
            line_count,
            labels.len(),
            rows.len()
        );

        self.partition(source, labels, rows)
    }

    fn partition(
        &self,
        source: &Path,
        labels: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<ParsedDataset> {
        let rows_per_year = self.rows_per_year;
        let mut remaining = rows.len();
        let mut rows = rows.into_iter();
        let mut blocks = Vec::with_capacity(labels.len());

        for label in labels {
            let block_rows: Vec<Vec<String>> = rows.by_ref().take(rows_per_year).collect();
            if block_rows.len() < rows_per_year {
                return Err(ProcessingError::ShortYearBlock {
                    file: source.to_path_buf(),
                    year: label,
                    found: block_rows.len(),
                    expected: rows_per_year,
                });
            }

            remaining -= rows_per_year;
            if remaining % rows_per_year != 0 {
                return Err(ProcessingError::RowCountMismatch {
                    file: source.to_path_buf(),
                    year: label,
                    remaining,
                    rows_per_year,
                });
            }

            blocks.push(YearBlock::new(label, block_rows));
        }

        if remaining > 0 {
            return Err(ProcessingError::OrphanRows {
                file: source.to_path_buf(),
                count: remaining,
            });
        }

        Ok(ParsedDataset::new(blocks))
    }
}

/// Year label if the line is a two-field header
fn header_label(line: &str) -> Option<&str> {
    let mut fields = line.split('\t');
    let first = fields.next()?;
    fields.next()?;
    if fields.next().is_some() {
        return None;
    }
    Some(first.trim())
}

fn parse_row(source: &Path, line: usize, text: &str) -> Result<Vec<String>> {
    text.split_whitespace()
        .map(|cell| {
            cell.parse::<f64>()
                .map(|_| cell.to_string())
                .map_err(|_| ProcessingError::InvalidCell {
                    file: source.to_path_buf(),
                    line,
                    value: cell.to_string(),
                })
        })
        .collect()
}

/// UTF-8, falling back to Windows-1252 for legacy archives
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = match encoding_rs::Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) if encoding == encoding_rs::UTF_8 => &bytes[bom_len..],
        _ => bytes,
    };
    match encoding_rs::UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => text,
        None => {
            debug!("input is not valid UTF-8, decoding as Windows-1252");
            encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes).0
        }
    }
}
