//! Command-line interface for the tannenbaum binary

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tannenbaum")]
#[command(about = "Animated particle Christmas tree with falling snow", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open a window and show the tree (drag to rotate, scroll to zoom)
    Run {
        /// Window width in logical pixels
        #[arg(long, default_value_t = 1280)]
        width: u32,

        /// Window height in logical pixels
        #[arg(long, default_value_t = 720)]
        height: u32,

        #[command(flatten)]
        scene: SceneArgs,
    },

    /// Render a still frame to a PNG file without opening a window
    Snapshot {
        /// Output PNG path
        #[arg(short, long, default_value = "tree.png")]
        out: PathBuf,

        /// Image width in pixels
        #[arg(long, default_value_t = 1024)]
        width: u32,

        /// Image height in pixels
        #[arg(long, default_value_t = 768)]
        height: u32,

        /// Frames to simulate at 60 Hz before capturing
        #[arg(long, default_value_t = 300)]
        frames: u32,

        #[command(flatten)]
        scene: SceneArgs,
    },
}

/// Scene options shared by every subcommand.
#[derive(Args, Default)]
pub struct SceneArgs {
    /// TOML file overriding scene settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Fixed random seed for a reproducible tree
    #[arg(long)]
    pub seed: Option<u64>,
}
