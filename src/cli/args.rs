//! CLI argument definitions for `kintree`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use kintree::config::ConfigOverrides;
use kintree::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `port`, `family_file`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Launch the local family tree server.
    ///
    /// Loads the family data file (creating it when missing) and serves the
    /// interactive page on the configured host and port.
    Serve {
        /// Path to the family data JSON file (defaults to config `family_file`)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Bind address (defaults to config `host`)
        #[arg(long, value_name = "HOST")]
        host: Option<String>,

        /// Port to listen on (defaults to config `port`)
        #[arg(short, long, value_name = "PORT")]
        port: Option<u16>,

        /// Page title shown in the header
        #[arg(long, value_name = "TITLE")]
        title: Option<String>,
    },
    /// Export the family tree page to a static file.
    ///
    /// Renders the tree to HTML or Markdown without starting the server.
    Export {
        /// Path to the family data JSON file (defaults to config `family_file`)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Output file path (optional; defaults to config `exports_dir`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page format: html or markdown (md)
        #[arg(short, long, value_name = "FORMAT", default_value = "html")]
        format: String,

        /// Page title shown in the header
        #[arg(long, value_name = "TITLE")]
        title: Option<String>,
    },
    /// Validate the family data file.
    ///
    /// Reports unknown references, one-sided relationships, self-links, and
    /// parent-child cycles without rendering anything.
    Check {
        /// Path to the family data JSON file (defaults to config `family_file`)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "kintree",
    about = "Kintree command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config server bind address
    #[arg(long = "config-host", value_name = "HOST")]
    pub config_host: Option<String>,

    /// Override config server port
    #[arg(long = "config-port", value_name = "PORT")]
    pub config_port: Option<u16>,

    /// Override config family data file path
    #[arg(long = "config-family-file", value_name = "PATH")]
    pub config_family_file: Option<PathBuf>,

    /// Override config family data file path (short form)
    #[arg(long = "family-file", value_name = "PATH")]
    pub family_file: Option<PathBuf>,

    /// Override config exports directory
    #[arg(long = "config-exports-dir", value_name = "DIR")]
    pub config_exports_dir: Option<PathBuf>,

    /// Override config exports directory (short form)
    #[arg(long = "exports-dir", value_name = "DIR")]
    pub exports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Transforms CLI arguments into a `ConfigOverrides` struct that can be applied to
    /// the loaded configuration. Short-form flags (e.g., `--family-file`) take precedence
    /// over long-form flags (e.g., `--config-family-file`) when both are provided.
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    ///
    /// # Examples
    /// ```ignore
    /// let args = Cli::parse();
    /// let overrides = args.to_config_overrides();
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            host: self.config_host.clone(),
            port: self.config_port,
            family_file: self
                .family_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .or_else(|| {
                    self.config_family_file
                        .as_ref()
                        .map(|p| p.to_string_lossy().to_string())
                }),
            exports_dir: self
                .exports_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .or_else(|| {
                    self.config_exports_dir
                        .as_ref()
                        .map(|p| p.to_string_lossy().to_string())
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let cli = Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            config_host: None,
            config_port: None,
            config_family_file: None,
            family_file: None,
            config_exports_dir: None,
            exports_dir: None,
            command: Command::Config { subcommand: None },
        };

        let overrides = cli.to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.host.is_none());
        assert!(overrides.port.is_none());
        assert!(overrides.family_file.is_none());
        assert!(overrides.exports_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: Some(LogLevelArg::Debug),
            config_log_file: Some(PathBuf::from("/tmp/test.log")),
            config_verbose: Some(true),
            config_host: Some("0.0.0.0".to_string()),
            config_port: Some(9000),
            config_family_file: None,
            family_file: Some(PathBuf::from("/data/family.json")),
            config_exports_dir: None,
            exports_dir: Some(PathBuf::from("/output")),
            command: Command::Config { subcommand: None },
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.host, Some("0.0.0.0".to_string()));
        assert_eq!(overrides.port, Some(9000));
        assert_eq!(overrides.family_file, Some("/data/family.json".to_string()));
        assert_eq!(overrides.exports_dir, Some("/output".to_string()));
    }

    #[test]
    fn test_short_form_wins_over_long_form() {
        let cli = Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            config_host: None,
            config_port: None,
            config_family_file: Some(PathBuf::from("/long/family.json")),
            family_file: Some(PathBuf::from("/short/family.json")),
            config_exports_dir: None,
            exports_dir: None,
            command: Command::Config { subcommand: None },
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(
            overrides.family_file,
            Some("/short/family.json".to_string())
        );
    }
}
