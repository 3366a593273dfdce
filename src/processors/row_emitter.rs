use crate::error::{ProcessingError, Result};
use crate::models::{Centroid, OutputRow, ParsedDataset, YearRange};
use tracing::debug;

/// Pairs centroids with the flattened summer and spring values.
///
/// Every year of the range is resolved to the block carrying its label, so a
/// gap in a file's years fails instead of shifting later blocks onto the
/// wrong year. Within a year the cursor advances one centroid at a time.
pub struct RowEmitter<'a> {
    centroids: &'a [Centroid],
    summer: Vec<&'a str>,
    spring: Vec<&'a str>,
    summer_offsets: Vec<usize>,
    spring_offsets: Vec<usize>,
    years: YearRange,
}

impl<'a> RowEmitter<'a> {
    pub fn new(
        centroids: &'a [Centroid],
        summer: &'a ParsedDataset,
        spring: &'a ParsedDataset,
        years: YearRange,
    ) -> Result<Self> {
        if years.is_empty() {
            return Err(ProcessingError::Config(format!(
                "empty year range {}..={}",
                years.start, years.stop
            )));
        }

        let summer_values = summer.flatten();
        let spring_values = spring.flatten();
        let needed = centroids.len() * years.len();
        let summer_offsets =
            year_offsets("summer", summer, summer_values.len(), centroids.len(), years, needed)?;
        let spring_offsets =
            year_offsets("spring", spring, spring_values.len(), centroids.len(), years, needed)?;

        debug!(
            "Row cursors start at summer {} / spring {}",
            summer_offsets[0], spring_offsets[0]
        );
        Ok(Self {
            centroids,
            summer: summer_values,
            spring: spring_values,
            summer_offsets,
            spring_offsets,
            years,
        })
    }

    pub fn years(&self) -> YearRange {
        self.years
    }

    pub fn row_count(&self) -> usize {
        self.centroids.len() * self.years.len()
    }

    /// Rows of one year of the range, in centroid order
    pub fn rows_for_year(&self, year: i32) -> impl Iterator<Item = OutputRow<'a>> + '_ {
        let index = if self.years.years().contains(&year) {
            usize::try_from(i64::from(year) - i64::from(self.years.start)).ok()
        } else {
            None
        };
        let (summer_base, spring_base, count) = match index {
            Some(i) => (
                self.summer_offsets[i],
                self.spring_offsets[i],
                self.centroids.len(),
            ),
            None => (0, 0, 0),
        };

        self.centroids
            .iter()
            .take(count)
            .enumerate()
            .map(move |(c, centroid)| OutputRow {
                yr: year,
                lon_c: centroid.lon,
                lat_c: centroid.lat,
                summer: self.summer[summer_base + c],
                spring: self.spring[spring_base + c],
            })
    }

    pub fn rows(&self) -> impl Iterator<Item = OutputRow<'a>> + '_ {
        self.years.years().flat_map(move |year| self.rows_for_year(year))
    }
}

/// Start of each requested year's block in the flattened values.
///
/// Fails with `ValueUnderflow` when the values from the start year onward
/// cannot cover the whole range, then with `YearNotFound` for the first year
/// whose label is absent.
fn year_offsets(
    dataset: &str,
    data: &ParsedDataset,
    total: usize,
    cells: usize,
    years: YearRange,
    needed: usize,
) -> Result<Vec<usize>> {
    let start = resolve(dataset, data, years.start)?;
    let available = total - start;
    if needed > available {
        return Err(ProcessingError::ValueUnderflow {
            dataset: dataset.to_string(),
            needed,
            available,
        });
    }

    years
        .years()
        .map(|year| {
            let offset = resolve(dataset, data, year)?;
            if offset + cells > total {
                return Err(ProcessingError::ValueUnderflow {
                    dataset: dataset.to_string(),
                    needed: cells,
                    available: total - offset,
                });
            }
            Ok(offset)
        })
        .collect()
}

fn resolve(dataset: &str, data: &ParsedDataset, year: i32) -> Result<usize> {
    let label = year.to_string();
    data.cell_offset(&label)
        .ok_or_else(|| ProcessingError::YearNotFound {
            dataset: dataset.to_string(),
            year: label,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::YearBlock;
    use pretty_assertions::assert_eq;

    fn centroids(n: usize) -> Vec<Centroid> {
        (0..n)
            .map(|i| Centroid {
                lon: i as f64,
                lat: -(i as f64),
            })
            .collect()
    }

    /// One row per year, cell values "<prefix><year>-<cell>"
    fn dataset(prefix: &str, years: &[i32], cells: usize) -> ParsedDataset {
        ParsedDataset::new(
            years
                .iter()
                .map(|y| {
                    YearBlock::new(
                        y.to_string(),
                        vec![(0..cells).map(|c| format!("{}{}-{}", prefix, y, c)).collect()],
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_emits_year_times_centroid_rows() {
        let cs = centroids(3);
        let summer = dataset("su", &[1500, 1501], 3);
        let spring = dataset("sp", &[1500, 1501], 3);
        let emitter = RowEmitter::new(&cs, &summer, &spring, YearRange::new(1500, 1501)).unwrap();

        let rows: Vec<_> = emitter.rows().collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(emitter.row_count(), 6);
        assert_eq!(
            rows[4],
            OutputRow {
                yr: 1501,
                lon_c: 1.0,
                lat_c: -1.0,
                summer: "su1501-1",
                spring: "sp1501-1",
            }
        );
    }

    #[test]
    fn test_cursor_starts_at_requested_year() {
        let cs = centroids(2);
        let summer = dataset("su", &[1500, 1501, 1502], 2);
        let spring = dataset("sp", &[1500, 1501, 1502], 2);
        let emitter = RowEmitter::new(&cs, &summer, &spring, YearRange::new(1501, 1501)).unwrap();

        let values: Vec<_> = emitter.rows().map(|r| (r.yr, r.summer, r.spring)).collect();
        assert_eq!(
            values,
            vec![(1501, "su1501-0", "sp1501-0"), (1501, "su1501-1", "sp1501-1")]
        );
    }

    #[test]
    fn test_underflow_detected_before_emitting() {
        let cs = centroids(2);
        let summer = dataset("su", &[1500, 1501], 2);
        let spring = dataset("sp", &[1500, 1501], 2);
        let err = RowEmitter::new(&cs, &summer, &spring, YearRange::new(1500, 1502))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ProcessingError::ValueUnderflow { needed: 6, available: 4, .. }
        ));
    }

    #[test]
    fn test_missing_start_year() {
        let cs = centroids(2);
        let summer = dataset("su", &[1500], 2);
        let spring = dataset("sp", &[1500], 2);
        let err = RowEmitter::new(&cs, &summer, &spring, YearRange::new(1600, 1600))
            .err()
            .unwrap();
        assert!(matches!(err, ProcessingError::YearNotFound { ref year, .. } if year == "1600"));
    }

    #[test]
    fn test_gap_in_years_is_rejected() {
        let cs = centroids(2);
        let summer = dataset("su", &[1500, 1502], 2);
        let spring = dataset("sp", &[1500, 1502], 2);
        let err = RowEmitter::new(&cs, &summer, &spring, YearRange::new(1500, 1501))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ProcessingError::YearNotFound { ref dataset, ref year } if dataset == "summer" && year == "1501"
        ));
    }

    #[test]
    fn test_later_years_resolved_by_label() {
        let cs = centroids(1);
        let summer = dataset("su", &[1500, 1501, 1502], 1);
        let spring = dataset("sp", &[1500, 1501, 1502], 1);
        let emitter = RowEmitter::new(&cs, &summer, &spring, YearRange::new(1501, 1502)).unwrap();

        let values: Vec<_> = emitter.rows().map(|r| (r.yr, r.summer)).collect();
        assert_eq!(values, vec![(1501, "su1501-0"), (1502, "su1502-0")]);
    }

    #[test]
    fn test_rows_for_year_outside_range_is_empty() {
        let cs = centroids(2);
        let summer = dataset("su", &[1500], 2);
        let spring = dataset("sp", &[1500], 2);
        let emitter = RowEmitter::new(&cs, &summer, &spring, YearRange::new(1500, 1500)).unwrap();
        assert_eq!(emitter.rows_for_year(1501).count(), 0);
    }
}
