//! Shared library for `kintree`
//! Contains core functionality used by the CLI and the web host

pub mod core;
pub mod logger;

pub use crate::core::config;
pub use crate::core::get_version;
