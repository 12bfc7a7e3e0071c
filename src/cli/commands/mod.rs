//! CLI command handlers for `kintree`.
//!
//! This module provides handlers for various CLI subcommands.
//! Each command is implemented in its own submodule.

pub mod check;
pub mod config;
pub mod export;
pub mod serve;

use kintree::config::Config;
use std::path::{Path, PathBuf};

/// Default page title, matching the served page header
pub const DEFAULT_TITLE: &str = "My Stylized Family Tree 🌳";

/// Resolve the family data file path: CLI argument wins, otherwise the
/// configured `family_file`
pub fn resolve_family_file(file: Option<&Path>, config: &Config) -> PathBuf {
    file.map_or_else(
        || PathBuf::from(&config.paths.family_file),
        Path::to_path_buf,
    )
}
