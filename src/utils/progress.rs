//! Indexing spinner that becomes a no-op when the `progress` feature is disabled

use std::time::Duration;

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

#[cfg(not(feature = "progress"))]
use self::noop::{ProgressBar, ProgressStyle};

/// How often the spinner message is refreshed, in discovered files
const UPDATE_EVERY: usize = 500;

/// Spinner on stderr reporting how many files the indexer has accepted.
pub struct IndexSpinner {
    bar: ProgressBar,
}

impl IndexSpinner {
    pub fn start() -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message("Discovering files...");
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    /// Report the running file count (throttled).
    pub fn update(&self, files: usize) {
        if files % UPDATE_EVERY == 0 {
            self.bar.set_message(format!("Indexed {} files", files));
        }
    }

    pub fn finish(self, files: usize) {
        self.bar.finish_with_message(format!("Indexed {} files", files));
    }
}

#[cfg(not(feature = "progress"))]
mod noop {
    use std::time::Duration;

    #[derive(Clone)]
    pub struct ProgressBar;

    impl ProgressBar {
        pub fn new_spinner() -> Self {
            ProgressBar
        }

        pub fn set_style(&self, _style: ProgressStyle) {}
        pub fn set_message(&self, _msg: impl Into<std::borrow::Cow<'static, str>>) {}
        pub fn enable_steady_tick(&self, _interval: Duration) {}
        pub fn finish_with_message(&self, _msg: impl Into<std::borrow::Cow<'static, str>>) {}
    }

    pub struct ProgressStyle;

    impl ProgressStyle {
        pub fn default_spinner() -> Self {
            ProgressStyle
        }

        pub fn template(self, _template: &str) -> Result<Self, std::convert::Infallible> {
            Ok(self)
        }
    }
}
