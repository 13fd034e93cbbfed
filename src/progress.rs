//! Progress feedback for directory scans.
//!
//! Bars are drawn on stderr only. They are hidden in quiet mode (`--quiet`
//! or `PYAUDIT_QUIET`) and whenever stderr is not a terminal, so piped and
//! CI output stays clean.

use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use std::sync::Mutex;

pub const TEMPLATE_FILE_ANALYSIS: &str = "{msg} {pos}/{len} files ({percent}%) - {eta}";

/// Configuration for progress display behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressConfig {
    pub quiet_mode: bool,
}

impl ProgressConfig {
    pub fn from_env(quiet: bool) -> Self {
        let env_quiet = std::env::var("PYAUDIT_QUIET").is_ok();
        Self {
            quiet_mode: quiet || env_quiet,
        }
    }

    pub fn should_show_progress(&self) -> bool {
        if self.quiet_mode {
            return false;
        }

        use std::io::IsTerminal;
        std::io::stderr().is_terminal()
    }
}

static GLOBAL_PROGRESS: Lazy<Mutex<ProgressConfig>> =
    Lazy::new(|| Mutex::new(ProgressConfig::default()));

pub fn init_global(config: ProgressConfig) {
    if let Ok(mut global) = GLOBAL_PROGRESS.lock() {
        *global = config;
    }
}

pub fn global_config() -> ProgressConfig {
    GLOBAL_PROGRESS
        .lock()
        .map(|config| *config)
        .unwrap_or_default()
}

/// Bar counting analyzed files; hidden when progress should not be shown
pub fn file_progress_bar(len: u64, message: &str) -> ProgressBar {
    if !global_config().should_show_progress() {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(len);
    match ProgressStyle::default_bar().template(TEMPLATE_FILE_ANALYSIS) {
        Ok(style) => bar.set_style(style.progress_chars("█▓▒░  ")),
        Err(e) => log::debug!("Invalid progress template: {}", e),
    }
    bar.set_message(message.to_string());
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_mode_hides_progress() {
        let config = ProgressConfig { quiet_mode: true };
        assert!(!config.should_show_progress());
    }

    #[test]
    fn test_template_is_valid() {
        assert!(ProgressStyle::default_bar()
            .template(TEMPLATE_FILE_ANALYSIS)
            .is_ok());
    }
}
