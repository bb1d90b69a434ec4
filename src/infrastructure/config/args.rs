use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the server binary.
#[derive(Debug, Parser)]
#[command(
    name = "portfolio-server",
    version,
    about = "Image proxy and disk cache for the portfolio site",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Bind address.
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port.
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Directory for cached proxy images.
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// Site directory to serve statically.
    #[arg(long, value_name = "PATH")]
    pub static_dir: Option<PathBuf>,
}
