use crate::models::YearRange;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Terminal feedback for a run. Quiet runs get a hidden bar, so callers never
/// branch on it.
pub struct ProgressReporter {
    bar: ProgressBar,
    last_year: Option<i32>,
}

impl ProgressReporter {
    /// Bar with one tick per year of `years`
    pub fn for_years(years: YearRange, message: &str, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new(years.len() as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} years ({eta})")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        bar.set_message(message.to_string());

        Self {
            bar,
            last_year: Some(years.stop),
        }
    }

    /// Spinner for steps without a known length, such as parsing
    pub fn spinner(message: &str, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        bar.set_message(message.to_string());

        Self {
            bar,
            last_year: None,
        }
    }

    /// Mark `year` as written
    pub fn year_done(&self, year: i32) {
        match self.last_year {
            Some(last) => self.bar.set_message(format!("Wrote year {} of ..{}", year, last)),
            None => self.bar.set_message(format!("Wrote year {}", year)),
        }
        self.bar.inc(1);
    }

    pub fn years_done(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish();
        }
    }
}
