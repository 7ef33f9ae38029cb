use std::path::PathBuf;

use clap::{Parser, Subcommand};
use daybook_core::Template;

use crate::cli::{ConfigCommands, GenerateArgs, OutlineArgs, OverrideArgs};

/// Generate printable, hyperlinked PDF planners
///
/// Daybook lays out a planner for a range of months: year, month and week
/// overviews, one page per day and optional week retrospectives, all linked
/// to each other. The configuration used is embedded in every generated
/// PDF, so a planner can be regenerated or extended from the file itself.
#[derive(Parser)]
#[command(version, about, name = "daybook")]
pub struct Args {
    /// Configuration file, JSON or a previously generated PDF. Defaults to
    /// $XDG_CONFIG_HOME/daybook/config.json when present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Template applied on top of the configuration
    /// (basic, advanced, blank, minimalistic)
    #[arg(long, global = true)]
    pub template: Option<Template>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the Daybook CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a planner PDF
    #[command(alias = "g")]
    Generate(GenerateArgs),
    /// Show the page outline of the planner
    #[command(alias = "o")]
    Outline(OutlineArgs),
    /// Manage configuration files
    #[command(alias = "c")]
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}
