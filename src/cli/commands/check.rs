//! Check command handler
//!
//! Validates the family data file and reports every issue found.

use kintree::config::Config;
use kintree::core::{generations, store};
use kintree::error;
use std::path::Path;

/// Run the check command.
pub fn run(file: Option<&Path>, config: &Config) {
    let data_path = super::resolve_family_file(file, config);

    let tree = match store::load_family_file(&data_path) {
        Ok(tree) => tree,
        Err(e) => {
            error!("Failed to load family file {}: {e}", data_path.display());
            eprintln!("✗ Failed to load {}: {e}", data_path.display());
            std::process::exit(1);
        }
    };

    let mut issues = tree.validate().err().unwrap_or_default();
    if let Err(e) = generations::assign_levels(&tree.build_graph()) {
        issues.push(e);
    }

    if issues.is_empty() {
        println!(
            "✓ {}: {} people, no issues found",
            data_path.display(),
            tree.len()
        );
    } else {
        eprintln!("✗ {} issues found in {}:", issues.len(), data_path.display());
        for issue in &issues {
            eprintln!("  - {issue}");
        }
        std::process::exit(1);
    }
}
