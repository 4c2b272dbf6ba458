//! Main entry point for the tannenbaum CLI

mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use tannenbaum::{snapshot, SceneConfig, Simulation};

use crate::cli::{Cli, Commands, SceneArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Verbosity picks the default filter; RUST_LOG still wins.
    let default_filter = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let command = cli.command.unwrap_or(Commands::Run {
        width: 1280,
        height: 720,
        scene: SceneArgs::default(),
    });

    match command {
        Commands::Run { width, height, scene } => {
            let config = load_config(&scene)?;
            Simulation::new()
                .with_config(config)
                .with_window_size(width, height)
                .run()
                .context("Window run failed")
        }
        Commands::Snapshot {
            out,
            width,
            height,
            frames,
            scene,
        } => {
            let config = load_config(&scene)?;
            let canvas = snapshot::render_snapshot(config, width, height, frames, snapshot::DEFAULT_FRAME_MS)?;
            canvas
                .save_png(&out)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!("Wrote {}", out.display());
            Ok(())
        }
    }
}

fn load_config(args: &SceneArgs) -> Result<SceneConfig> {
    let mut config = match &args.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config.validate()?;
    Ok(config)
}
