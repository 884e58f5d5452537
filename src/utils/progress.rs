//! Progress reporting for the write phase.
//!
//! A thin wrapper over `indicatif` with one consistent style. Bars draw to
//! stderr and can be created hidden, so callers never need to branch on
//! whether progress is shown.
//!
//! # Environment Variables
//!
//! - `POTHOS_EXTRACT_NO_PROGRESS`: set to any value to hide every bar
//!
//! # Examples
//!
//! ```rust
//! use pothos_extract::utils::progress::ProgressBar;
//!
//! let progress = ProgressBar::new(3);
//! progress.set_prefix("Writing");
//! for _ in 0..3 {
//!     progress.inc(1);
//! }
//! progress.finish_and_clear();
//! ```

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};
use tracing::debug;

const NO_PROGRESS_ENV: &str = "POTHOS_EXTRACT_NO_PROGRESS";

fn is_progress_disabled() -> bool {
    std::env::var_os(NO_PROGRESS_ENV).is_some()
}

/// A progress bar with the crate's styling.
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Creates a visible bar for `len` units of work, unless progress is
    /// disabled through the environment.
    #[must_use]
    pub fn new(len: u64) -> Self {
        if is_progress_disabled() {
            return Self::hidden();
        }

        let bar = IndicatifBar::new(len);
        if let Some(style) = default_style() {
            bar.set_style(style);
        }
        Self { inner: bar }
    }

    /// Creates a bar that draws nothing.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            inner: IndicatifBar::hidden(),
        }
    }

    /// Creates a visible bar when `show` is set, a hidden one otherwise.
    #[must_use]
    pub fn new_if(show: bool, len: u64) -> Self {
        if show { Self::new(len) } else { Self::hidden() }
    }

    /// Whether the bar draws nothing.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.inner.is_hidden()
    }

    /// Sets the label shown before the bar.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.inner.set_prefix(prefix.into());
    }

    /// Sets the message shown after the bar.
    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    /// Advances the bar by `delta` units.
    pub fn inc(&self, delta: u64) {
        self.inner.inc(delta);
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    /// Finishes the bar and removes it from the terminal.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}

fn default_style() -> Option<IndicatifStyle> {
    match IndicatifStyle::default_bar()
        .template("{prefix:.bold} [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {wide_msg}")
    {
        Ok(style) => Some(style.progress_chars("━╸━")),
        Err(e) => {
            debug!("Falling back to default progress style: {}", e);
            None
        }
    }
}
