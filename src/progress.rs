//! Progress reporting hooks.
//!
//! Long-running stages (GPX download, POI filtering) report through a
//! [`ProgressObserver`] so the library never writes to the console itself.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

pub trait ProgressObserver {
    /// A new task of `total` units begins. `total == 0` means unknown length.
    fn start(&mut self, label: &str, total: u64);
    fn advance(&mut self, delta: u64);
    fn finish(&mut self);
}

/// Discards all progress events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn start(&mut self, _label: &str, _total: u64) {}
    fn advance(&mut self, _delta: u64) {}
    fn finish(&mut self) {}
}

/// Terminal progress bars
#[derive(Default)]
pub struct ConsoleProgress {
    bar: Option<ProgressBar>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressObserver for ConsoleProgress {
    fn start(&mut self, label: &str, total: u64) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }

        let bar = if total == 0 {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::new(total)
        };
        let template = if total == 0 {
            "{spinner:.green} {msg} [{elapsed_precise}] {pos}"
        } else {
            "{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})"
        };
        match ProgressStyle::default_bar().template(template) {
            Ok(style) => bar.set_style(style.progress_chars("#>-")),
            Err(e) => warn!("Invalid progress template: {}", e),
        }
        bar.set_message(label.to_string());
        self.bar = Some(bar);
    }

    fn advance(&mut self, delta: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(delta);
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }
}

/// Records events, for asserting on reporting behavior in tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub started: Vec<(String, u64)>,
    pub advanced: u64,
    pub finished: usize,
}

#[cfg(test)]
impl ProgressObserver for RecordingProgress {
    fn start(&mut self, label: &str, total: u64) {
        self.started.push((label.to_string(), total));
    }

    fn advance(&mut self, delta: u64) {
        self.advanced += delta;
    }

    fn finish(&mut self) {
        self.finished += 1;
    }
}
