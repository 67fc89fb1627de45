//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Marksite static site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Config file path (default: config.json)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long, global = true)]
    pub content: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Templates directory path (relative to project root)
    #[arg(short, long, global = true)]
    pub templates: Option<PathBuf>,

    /// Static assets directory path (relative to project root)
    #[arg(short, long = "static", global = true)]
    pub static_dir: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create the default project layout, keeping existing files
    Init,

    /// Deletes the output directory if there is one and rebuilds the site
    Build,

    /// Create a new blog post skeleton
    Post {
        /// Post title; the file name is derived from it
        title: String,

        /// Publication date (default: today, YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
}
