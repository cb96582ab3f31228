//! CLI configuration via environment variables
//!
//! Every setting is optional. Command-line flags take precedence over the
//! values loaded here.

use std::env;
use std::path::PathBuf;

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Disable colored output (PCL_NO_COLOR=1 or NO_COLOR=1)
    pub no_color: bool,
    /// Custom history file path (PCL_HISTORY_FILE=/path/to/file)
    pub history_file: Option<PathBuf>,
    /// Disable history by default (PCL_NO_HISTORY=1)
    pub no_history: bool,
    /// Call depth limit (PCL_MAX_DEPTH=N)
    pub max_depth: Option<usize>,
    /// Log filter directives (PCL_LOG=pcl_runtime=debug)
    pub log_filter: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            no_color: env::var_os("PCL_NO_COLOR").is_some() || env::var_os("NO_COLOR").is_some(),
            history_file: env::var("PCL_HISTORY_FILE").ok().map(PathBuf::from),
            no_history: env::var_os("PCL_NO_HISTORY").is_some(),
            // Unparseable values fall back to the interpreter default
            max_depth: env::var("PCL_MAX_DEPTH")
                .ok()
                .and_then(|v| v.trim().parse().ok()),
            log_filter: env::var("PCL_LOG").ok().filter(|v| !v.trim().is_empty()),
        }
    }

    /// Get the history file path
    ///
    /// Returns:
    /// 1. PCL_HISTORY_FILE if set
    /// 2. ~/.pcl/history if home directory exists
    /// 3. None otherwise
    pub fn get_history_path(&self) -> Option<PathBuf> {
        if let Some(ref path) = self.history_file {
            return Some(path.clone());
        }
        dirs::home_dir().map(|home| home.join(".pcl").join("history"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
