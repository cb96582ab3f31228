pub mod repl;
pub mod run;
pub mod tokenize;

use anyhow::{Context, Result};
use pcl_runtime::ColorMode;
use std::fs;
use std::io::{self, IsTerminal};

/// Read a program from a file
pub fn read_source(path: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read source file: {}", path))
}

/// Color mode for stdout, never coloring output that is piped or redirected
pub fn stdout_color(mode: ColorMode) -> ColorMode {
    if io::stdout().is_terminal() {
        mode
    } else {
        ColorMode::Never
    }
}

/// Color mode for stderr, never coloring output that is piped or redirected
pub fn stderr_color(mode: ColorMode) -> ColorMode {
    if io::stderr().is_terminal() {
        mode
    } else {
        ColorMode::Never
    }
}
