#![allow(dead_code)]

use std::path::PathBuf;

use daybook_core::Configuration;
use tempfile::TempDir;

/// A configuration covering `month_count` months from a 1-based `month`.
pub fn range_config(year: i16, month: i8, month_count: i32) -> Configuration {
    let mut config = Configuration::new(year, 1);
    config.calendar_range.month = month - 1;
    config.calendar_range.month_count = month_count;
    config
}

/// Writes `contents` into a fresh temporary directory.
pub fn write_temp_file(name: &str, contents: &[u8]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    std::fs::write(&path, contents).expect("Failed to write temp file");
    (temp_dir, path)
}
