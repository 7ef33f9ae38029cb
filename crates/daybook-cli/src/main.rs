//! Daybook CLI Application
//!
//! Command-line interface for generating hyperlinked PDF planners.

mod args;
mod cli;
mod renderer;

use anyhow::Result;
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use daybook_core::ConfigurationLoader;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        config,
        template,
        no_color,
        overrides,
        command,
    } = Args::parse();

    let loader = ConfigurationLoader::new()
        .with_config_path(config)
        .with_template(template)
        .with_overrides(overrides.into());

    let renderer = TerminalRenderer::new(!no_color);

    info!("Daybook started");

    let cli = Cli::new(loader, renderer);
    match command {
        Generate(args) => cli.generate(args).await,
        Outline(args) => cli.outline(args).await,
        Config { command } => cli.handle_config_command(command).await,
    }
}
