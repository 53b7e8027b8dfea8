//! Command line and environment configuration.

use std::env;
use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

/// Positional arguments: `<u_file> <u_variable> <v_file> <v_variable> <output_file>`.
#[derive(Parser, Debug, Clone)]
#[command(name = "calc-wind-speed")]
#[command(about = "Calculate wind speed from eastward and northward wind components")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// File containing the eastward (u) wind component
    pub u_file: PathBuf,

    /// Name of the u variable
    pub u_variable: String,

    /// File containing the northward (v) wind component
    pub v_file: PathBuf,

    /// Name of the v variable
    pub v_variable: String,

    /// Output file (overwritten if it exists)
    pub output_file: PathBuf,
}

/// Settings read from the environment.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Log level (`LOG_LEVEL`)
    pub log_level: Level,

    /// Repository used to look up the revision hash (`CALC_WSP_REPO_DIR`)
    pub repo_dir: PathBuf,

    /// Revision to stamp instead of asking git (`CALC_WSP_REVISION`)
    pub revision: Option<String>,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    ///
    /// The repository defaults to the working directory the process was
    /// launched from.
    pub fn from_env() -> std::io::Result<Self> {
        let repo_dir = match env::var("CALC_WSP_REPO_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => env::current_dir()?,
        };

        Ok(Self {
            log_level: parse_level(&env::var("LOG_LEVEL").unwrap_or_default()),
            repo_dir,
            revision: env::var("CALC_WSP_REVISION").ok().filter(|r| !r.is_empty()),
        })
    }
}

/// Map a level name to a tracing level, defaulting to INFO.
pub fn parse_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
