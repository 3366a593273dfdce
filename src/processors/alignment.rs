use crate::error::{ProcessingError, Result};
use crate::models::ParsedDataset;
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum AlignmentIssue {
    YearCountMismatch {
        summer: usize,
        spring: usize,
    },
    YearLabelMismatch {
        index: usize,
        summer: String,
        spring: String,
    },
    CellCountMismatch {
        year: String,
        summer: usize,
        spring: usize,
    },
    GridSizeMismatch {
        dataset: &'static str,
        year: String,
        found: usize,
        expected: usize,
    },
}

impl fmt::Display for AlignmentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentIssue::YearCountMismatch { summer, spring } => write!(
                f,
                "different number of years (summer {}, spring {})",
                summer, spring
            ),
            AlignmentIssue::YearLabelMismatch {
                index,
                summer,
                spring,
            } => write!(
                f,
                "year #{} differs (summer '{}', spring '{}')",
                index + 1,
                summer,
                spring
            ),
            AlignmentIssue::CellCountMismatch {
                year,
                summer,
                spring,
            } => write!(
                f,
                "year {} has {} summer cells but {} spring cells",
                year, summer, spring
            ),
            AlignmentIssue::GridSizeMismatch {
                dataset,
                year,
                found,
                expected,
            } => write!(
                f,
                "{} year {} has {} cells, grid has {} centroids",
                dataset, year, found, expected
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AlignmentReport {
    pub summer_years: usize,
    pub spring_years: usize,
    pub summer_cells: usize,
    pub spring_cells: usize,
    pub cells_per_year: usize,
    pub issues: Vec<AlignmentIssue>,
}

impl AlignmentReport {
    pub fn is_aligned(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Alignment Report ===\n");
        summary.push_str(&format!(
            "Summer: {} years, {} cells\n",
            self.summer_years, self.summer_cells
        ));
        summary.push_str(&format!(
            "Spring: {} years, {} cells\n",
            self.spring_years, self.spring_cells
        ));
        summary.push_str(&format!("Grid centroids per year: {}\n", self.cells_per_year));
        summary.push_str(&format!("\nIssues: {}\n", self.issues.len()));

        if !self.issues.is_empty() {
            summary.push_str("\nTop 10 Issues:\n");
            for (i, issue) in self.issues.iter().take(10).enumerate() {
                summary.push_str(&format!("  {}. {}\n", i + 1, issue));
            }
        }

        summary
    }
}

/// Checks that the summer and spring datasets can be zipped cell by cell
pub struct AlignmentChecker {
    allow_misaligned: bool,
}

impl AlignmentChecker {
    pub fn new() -> Self {
        Self {
            allow_misaligned: false,
        }
    }

    pub fn with_allow_misaligned(allow_misaligned: bool) -> Self {
        Self { allow_misaligned }
    }

    /// Fails on the first issue unless misalignment is allowed, in which case
    /// every issue is logged and returned in the report
    pub fn check(
        &self,
        summer: &ParsedDataset,
        spring: &ParsedDataset,
        cells_per_year: usize,
    ) -> Result<AlignmentReport> {
        let issues = self.collect_issues(summer, spring, cells_per_year);

        if let Some(first) = issues.first() {
            if !self.allow_misaligned {
                let more = issues.len() - 1;
                let message = if more > 0 {
                    format!("{} (and {} more issues)", first, more)
                } else {
                    first.to_string()
                };
                return Err(ProcessingError::DatasetMismatch(message));
            }
            for issue in &issues {
                warn!("Tolerating misalignment: {}", issue);
            }
        }

        Ok(AlignmentReport {
            summer_years: summer.len(),
            spring_years: spring.len(),
            summer_cells: summer.total_cells(),
            spring_cells: spring.total_cells(),
            cells_per_year,
            issues,
        })
    }

    fn collect_issues(
        &self,
        summer: &ParsedDataset,
        spring: &ParsedDataset,
        cells_per_year: usize,
    ) -> Vec<AlignmentIssue> {
        let mut issues = Vec::new();

        if summer.len() != spring.len() {
            issues.push(AlignmentIssue::YearCountMismatch {
                summer: summer.len(),
                spring: spring.len(),
            });
        }

        for (index, (su, sp)) in summer.blocks().iter().zip(spring.blocks()).enumerate() {
            if su.label != sp.label {
                issues.push(AlignmentIssue::YearLabelMismatch {
                    index,
                    summer: su.label.clone(),
                    spring: sp.label.clone(),
                });
            }
            if su.cell_count() != sp.cell_count() {
                issues.push(AlignmentIssue::CellCountMismatch {
                    year: su.label.clone(),
                    summer: su.cell_count(),
                    spring: sp.cell_count(),
                });
            }
        }

        for (dataset, data) in [("summer", summer), ("spring", spring)] {
            for block in data.blocks() {
                if block.cell_count() != cells_per_year {
                    issues.push(AlignmentIssue::GridSizeMismatch {
                        dataset,
                        year: block.label.clone(),
                        found: block.cell_count(),
                        expected: cells_per_year,
                    });
                }
            }
        }

        issues
    }
}

impl Default for AlignmentChecker {
    fn default() -> Self {
        Self::new()
    }
}
