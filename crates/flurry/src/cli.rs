//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "flurry")]
#[command(about = "Snow falls and piles up, revealing text in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// File holding the text to reveal, read from stdin when omitted
    pub input: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Frames per second, overriding the config file
    #[arg(long)]
    pub fps: Option<u32>,

    /// Exit as soon as the snow settles instead of waiting for a key
    #[arg(long)]
    pub no_hold: bool,

    /// Write log output to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Write the default config to this path and exit
    #[arg(long, value_name = "PATH")]
    pub write_config: Option<PathBuf>,
}
