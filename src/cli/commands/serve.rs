//! Serve command handler
//!
//! Launches the local web server hosting the interactive family tree page.

use kintree::config::Config;
use kintree::core::{server, store};
use kintree::{error, info};
use std::error::Error;
use std::path::Path;

/// Run the serve command.
///
/// # Arguments
/// * `file` - Optional path to the family data file
/// * `host` - Optional bind address
/// * `port` - Optional port
/// * `title` - Optional page title
/// * `config` - Configuration containing the defaults for all of the above
pub fn run(
    file: Option<&Path>,
    host: Option<&str>,
    port: Option<u16>,
    title: Option<&str>,
    config: &Config,
) {
    if let Err(err) = serve(file, host, port, title, config) {
        error!("Serve failed: {err}");
        eprintln!("✗ {err}");
        std::process::exit(1);
    }
}

fn serve(
    file: Option<&Path>,
    host: Option<&str>,
    port: Option<u16>,
    title: Option<&str>,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let data_path = super::resolve_family_file(file, config);
    let created = !data_path.exists();

    let tree = store::load_or_create(&data_path)?;
    if created {
        println!("✓ Created new family file: {}", data_path.display());
    }
    info!("Loaded {} people from {}", tree.len(), data_path.display());

    let host = host.unwrap_or(&config.server.host);
    let port = port.unwrap_or(config.server.port);
    let title = title.unwrap_or(super::DEFAULT_TITLE).to_string();

    println!(
        "✓ Serving {} on http://{host}:{port} (press Ctrl+C to stop)",
        data_path.display()
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::run(tree, data_path, host, port, title))
}
