//! Export command handler
//!
//! Renders the family tree to a static file (HTML page or Markdown
//! document) without starting the server.

use kintree::config::Config;
use kintree::core::{generations, store};
use kintree::core::view::{
    HtmlRenderer, MarkdownRenderer, PageFormat, PageRenderer, ViewContext,
};
use kintree::{error, info};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Run the export command.
///
/// # Arguments
/// * `file` - Optional path to the family data file
/// * `output` - Optional output path
/// * `format_str` - Page format (html, markdown)
/// * `title` - Optional page title
/// * `config` - Configuration containing the default file and exports directory
pub fn run(
    file: Option<&Path>,
    output: Option<&Path>,
    format_str: &str,
    title: Option<&str>,
    config: &Config,
) {
    if let Err(err) = export_page(file, output, format_str, title, config) {
        error!("Export failed: {err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn export_page(
    file: Option<&Path>,
    output: Option<&Path>,
    format_str: &str,
    title: Option<&str>,
    config: &Config,
) -> Result<(), String> {
    // Parse the format
    let format =
        PageFormat::from_str(format_str).map_err(|e| format!("✗ {e}. Use: html or markdown"))?;

    // Load the family tree
    let data_path = super::resolve_family_file(file, config);
    let tree = store::load_family_file(&data_path).map_err(|e| {
        error!("Failed to load family file {}: {e}", data_path.display());
        format!("✗ Failed to load {}: {e}", data_path.display())
    })?;

    info!("Family tree loaded: {}", data_path.display());

    // Refuse to render an inconsistent tree
    if let Err(issues) = tree.validate() {
        eprintln!("✗ The family graph cannot be rendered until the input is corrected:");
        for issue in &issues {
            eprintln!("  - {issue}");
        }
        return Err(format!(
            "✗ {} validation issues in {}",
            issues.len(),
            data_path.display()
        ));
    }

    let graph = tree.build_graph();
    let levels = generations::assign_levels(&graph).map_err(|e| format!("✗ {e}"))?;

    let title = title.unwrap_or(super::DEFAULT_TITLE);
    let ctx = ViewContext::new(&tree, &graph, &levels, title);

    // Determine output path
    let final_output_path: PathBuf = if let Some(output) = output {
        output.to_path_buf()
    } else {
        let exports_dir = PathBuf::from(&config.paths.exports_dir);
        std::fs::create_dir_all(&exports_dir).map_err(|e| {
            format!(
                "✗ Failed to create exports directory {}: {e}",
                exports_dir.display()
            )
        })?;

        let filename = data_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("family")
            .to_string();
        let output_filename = format!("{filename}_tree.{}", format.extension());
        exports_dir.join(output_filename)
    };

    // Write the page
    match format {
        PageFormat::Html => {
            let renderer = HtmlRenderer::new();
            renderer
                .generate(&ctx, &final_output_path)
                .map_err(|e| format!("✗ Failed to generate HTML page: {e}"))?;
        }
        PageFormat::Markdown => {
            let renderer = MarkdownRenderer::new();
            renderer
                .generate(&ctx, &final_output_path)
                .map_err(|e| format!("✗ Failed to generate Markdown document: {e}"))?;
        }
    }

    println!("✓ Page exported: {}", final_output_path.display());
    info!("Page exported to: {}", final_output_path.display());

    print_summary(&ctx);

    Ok(())
}

/// Print a summary of the exported tree
fn print_summary(ctx: &ViewContext) {
    println!("\n=== Summary ===");
    println!("People: {}", ctx.person_count());
    println!("Couples: {}", ctx.couple_count());
    println!("Generations: {}", ctx.generation_count());
}
