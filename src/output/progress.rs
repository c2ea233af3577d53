//! Progress reporting on stderr

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;

/// Progress bar for the parse phase; a no-op when disabled
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Create a reporter. Nothing is drawn unless `enabled`.
    pub fn new(enabled: bool) -> Self {
        let bar = enabled.then(|| {
            let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
                .map(|style| style.progress_chars("#>-"))
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            bar.set_style(style);
            bar
        });

        Self { bar }
    }

    pub fn is_enabled(&self) -> bool {
        self.bar.is_some()
    }

    /// Set the bar to `done` of `total` files
    pub fn update(&self, done: usize, total: usize) {
        if let Some(bar) = &self.bar {
            bar.set_length(total as u64);
            bar.set_position(done as u64);
        }
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Create a progress callback function that updates a ProgressReporter
pub fn create_progress_callback(
    reporter: Arc<ProgressReporter>,
) -> impl Fn(usize, usize) + Send + Sync {
    move |done, total| reporter.update(done, total)
}
