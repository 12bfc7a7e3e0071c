//! Core module for the family registry, graph translation, and page hosting

pub mod config;
pub mod generations;
pub mod models;
pub mod server;
pub mod store;
pub mod view;

/// Returns the current version of the `kintree` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
