//! Command argument wrappers and handlers.
//!
//! Argument structs carry the clap derives and convert into the core
//! parameter types, which stay free of framework attributes:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Loader / Pipeline
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use daybook_core::{
    config::{Handedness, Sidebar},
    derive_document_geometry, enumerate_pages,
    loader::{load_configuration_file, save_configuration},
    ConfigOverrides, ConfigurationLoader, ConfigurationSummary, DocumentOutline, DocumentRenderer,
    PdfRenderer,
};
use log::info;

use crate::renderer::TerminalRenderer;

/// Handedness of the page chrome
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HandednessArg {
    Left,
    Right,
}

impl From<HandednessArg> for Handedness {
    fn from(val: HandednessArg) -> Self {
        match val {
            HandednessArg::Left => Handedness::Left,
            HandednessArg::Right => Handedness::Right,
        }
    }
}

/// Reader sidebar margin
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SidebarArg {
    On,
    Off,
}

impl From<SidebarArg> for Sidebar {
    fn from(val: SidebarArg) -> Self {
        match val {
            SidebarArg::On => Sidebar::On,
            SidebarArg::Off => Sidebar::Off,
        }
    }
}

/// Overrides applied after the configuration and template
#[derive(Args, Debug, Default)]
pub struct OverrideArgs {
    /// Year the planner starts in
    #[arg(long, global = true)]
    pub year: Option<i16>,
    /// Month the planner starts at (1-12)
    #[arg(long, global = true)]
    pub month: Option<i8>,
    /// Number of months covered
    #[arg(long = "months", global = true)]
    pub month_count: Option<i32>,
    /// First day of the week, 0 for Sunday through 6 for Saturday
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(0..=6))]
    pub first_day: Option<u8>,
    /// Mirror the page chrome for left-handed use
    #[arg(long, global = true, value_enum)]
    pub handedness: Option<HandednessArg>,
    /// Reserve a margin for an always-visible reader sidebar
    #[arg(long, global = true, value_enum)]
    pub sidebar: Option<SidebarArg>,
}

impl From<OverrideArgs> for ConfigOverrides {
    fn from(val: OverrideArgs) -> Self {
        ConfigOverrides {
            year: val.year,
            month: val.month,
            month_count: val.month_count,
            first_day_of_week: val.first_day,
            handedness: val.handedness.map(Into::into),
            sidebar: val.sidebar.map(Into::into),
        }
    }
}

/// Generate a planner PDF
#[derive(Args)]
pub struct GenerateArgs {
    /// Output PDF file
    #[arg(short, long, default_value = "planner.pdf")]
    pub output: PathBuf,
}

/// Show the page outline
#[derive(Args)]
pub struct OutlineArgs {
    /// Leave day pages out of the listing
    #[arg(long)]
    pub no_days: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a default configuration file
    Init {
        /// Destination file. Defaults to $XDG_CONFIG_HOME/daybook/config.json
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Bring a JSON or PDF configuration up to the current schema
    Migrate {
        /// Configuration file, JSON or a generated PDF
        file: PathBuf,
        /// Destination file. Prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Summarize the effective configuration
    Show,
}

/// Executes commands against a configuration loader.
pub struct Cli {
    loader: ConfigurationLoader,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(loader: ConfigurationLoader, renderer: TerminalRenderer) -> Self {
        Self { loader, renderer }
    }

    pub async fn generate(self, args: GenerateArgs) -> Result<()> {
        let config = self
            .loader
            .load()
            .await
            .context("Failed to load configuration")?;
        let document = enumerate_pages(&config).context("Failed to enumerate pages")?;
        let geometry =
            derive_document_geometry(&document, &config).context("Failed to lay out pages")?;
        let bytes = PdfRenderer::new()
            .render(&document, &geometry, &config)
            .context("Failed to render PDF")?;

        tokio::fs::write(&args.output, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
        info!("Wrote {} bytes to {}", bytes.len(), args.output.display());

        self.renderer.render(&format!(
            "Generated **{}** pages into `{}`\n",
            document.len(),
            args.output.display()
        ))
    }

    pub async fn outline(self, args: OutlineArgs) -> Result<()> {
        let config = self
            .loader
            .load()
            .await
            .context("Failed to load configuration")?;
        let document = enumerate_pages(&config).context("Failed to enumerate pages")?;
        let outline = DocumentOutline::new(&document).with_days(!args.no_days);
        self.renderer.render(&outline.to_string())
    }

    pub async fn handle_config_command(self, command: ConfigCommands) -> Result<()> {
        match command {
            ConfigCommands::Init { output, force } => self.config_init(output, force).await,
            ConfigCommands::Migrate { file, output } => self.config_migrate(file, output).await,
            ConfigCommands::Show => self.config_show().await,
        }
    }

    async fn config_init(self, output: Option<PathBuf>, force: bool) -> Result<()> {
        let path = match output {
            Some(path) => path,
            None => ConfigurationLoader::default_config_path()
                .context("Failed to locate the configuration directory")?,
        };
        if !force && tokio::fs::try_exists(&path).await.unwrap_or(false) {
            anyhow::bail!(
                "{} already exists, pass --force to overwrite it",
                path.display()
            );
        }

        let config = self
            .loader
            .without_user_default()
            .load()
            .await
            .context("Failed to build configuration")?;
        save_configuration(&path, &config)
            .await
            .context("Failed to write configuration")?;

        self.renderer
            .render(&format!("Wrote configuration to `{}`\n", path.display()))
    }

    async fn config_migrate(self, file: PathBuf, output: Option<PathBuf>) -> Result<()> {
        let config = load_configuration_file(&file)
            .await
            .with_context(|| format!("Failed to read {}", file.display()))?;

        match output {
            Some(path) => {
                save_configuration(&path, &config)
                    .await
                    .context("Failed to write configuration")?;
                self.renderer.render(&format!(
                    "Migrated `{}` to schema {} in `{}`\n",
                    file.display(),
                    config.schema_version,
                    path.display()
                ))
            }
            None => {
                println!("{}", serde_json::to_string_pretty(&config)?);
                Ok(())
            }
        }
    }

    async fn config_show(self) -> Result<()> {
        let config = self
            .loader
            .load()
            .await
            .context("Failed to load configuration")?;
        self.renderer
            .render(&ConfigurationSummary(&config).to_string())
    }
}
