use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "folio",
    version,
    about = "Portfolio content backend: picture catalogs and image preloading",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Directory served at the site root.
    #[arg(long, value_name = "PATH", global = true)]
    pub public_dir: Option<PathBuf>,

    /// Maximum number of images held by the preload cache.
    #[arg(long, global = true)]
    pub cache_capacity: Option<usize>,

    /// Merge concurrent preloads of the same image.
    #[arg(long, global = true)]
    pub single_flight: Option<bool>,

    /// Site origin for resolving relative image paths.
    #[arg(long, value_name = "URL", global = true)]
    pub origin: Option<String>,

    /// HTTP timeout in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the picture catalog as JSON.
    Pictures {
        /// Scan the directories even if `pictures.json` exists.
        #[arg(long)]
        scan: bool,

        /// Print the sample catalog instead of failing.
        #[arg(long)]
        fallback: bool,
    },

    /// Print the video catalog as JSON.
    Videos {
        /// Print the sample catalog instead of failing.
        #[arg(long)]
        fallback: bool,
    },

    /// Scan the picture directories and write `pictures.json`.
    Generate,

    /// Load images through the cache and report the results.
    Preload {
        /// Image URLs or site-relative paths. Defaults to every catalog picture.
        urls: Vec<String>,
    },
}
