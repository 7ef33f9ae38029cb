//! Resolving the effective configuration.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::{Configuration, Template};
use crate::error::{DaybookError, FileSystemResultExt, Result};
use crate::params::ConfigOverrides;
use crate::render::read_configuration;

/// Prefix of the per-user configuration directory.
pub const APP_NAME: &str = "daybook";

/// File name of the per-user default configuration.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationSource {
    /// A file passed explicitly
    File(PathBuf),
    /// The per-user default file
    UserDefault(PathBuf),
    /// Built-in defaults for the current year and locale
    BuiltIn,
}

/// Builder resolving the configuration a run works with.
///
/// Resolution order: the explicit file if one was given, else the per-user
/// default file if it exists, else built-in defaults. The template, if any,
/// is applied next, then the overrides. The result is validated.
#[derive(Debug, Clone)]
pub struct ConfigurationLoader {
    config_path: Option<PathBuf>,
    template: Option<Template>,
    overrides: ConfigOverrides,
    use_user_default: bool,
}

impl ConfigurationLoader {
    /// Creates a loader with default settings.
    pub fn new() -> Self {
        Self {
            config_path: None,
            template: None,
            overrides: ConfigOverrides::default(),
            use_user_default: true,
        }
    }

    /// Sets an explicit configuration file, JSON or a generated PDF.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_CONFIG_HOME/daybook/config.json` or
    /// `~/.config/daybook/config.json` when present.
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.config_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    pub fn with_template(mut self, template: Option<Template>) -> Self {
        self.template = template;
        self
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Skips the per-user default file, falling back to built-in defaults.
    pub fn without_user_default(mut self) -> Self {
        self.use_user_default = false;
        self
    }

    /// Resolves the configuration.
    ///
    /// # Errors
    ///
    /// Returns `DaybookError::FileSystem` if the file cannot be read,
    /// attachment, serialization or migration errors for its contents, and
    /// `DaybookError::InvalidConfiguration` or `DaybookError::InvalidRange`
    /// if the final configuration is invalid.
    pub async fn load(self) -> Result<Configuration> {
        Ok(self.load_with_source().await?.0)
    }

    /// Like [`ConfigurationLoader::load`], also reporting where the base
    /// configuration came from.
    ///
    /// # Errors
    ///
    /// See [`ConfigurationLoader::load`].
    pub async fn load_with_source(self) -> Result<(Configuration, ConfigurationSource)> {
        let source = match self.config_path {
            Some(path) => ConfigurationSource::File(path),
            None => match self.use_user_default.then(Self::user_config_file).flatten() {
                Some(path) => ConfigurationSource::UserDefault(path),
                None => ConfigurationSource::BuiltIn,
            },
        };

        let mut config = match &source {
            ConfigurationSource::File(path) | ConfigurationSource::UserDefault(path) => {
                info!("Loading configuration from {}", path.display());
                load_configuration_file(path).await?
            }
            ConfigurationSource::BuiltIn => {
                info!("Using built-in default configuration");
                Configuration::create_default()
            }
        };

        if let Some(template) = self.template {
            debug!("Applying template {template}");
            config = template.apply(config);
        }
        if !self.overrides.is_empty() {
            debug!("Applying overrides {:?}", self.overrides);
            config = self.overrides.apply(config)?;
        }

        config.validate()?;
        config.calendar_range.months()?;
        Ok((config, source))
    }

    /// The per-user default file, if it exists.
    fn user_config_file() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix(APP_NAME).find_config_file(CONFIG_FILE_NAME)
    }

    /// Path the per-user default file lives at, creating its directory.
    ///
    /// # Errors
    ///
    /// Returns `DaybookError::XdgDirectory` if the directory cannot be
    /// determined or created.
    pub fn default_config_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix(APP_NAME)
            .place_config_file(CONFIG_FILE_NAME)
            .map_err(|e| DaybookError::XdgDirectory(e.to_string()))
    }
}

impl Default for ConfigurationLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads a configuration file, JSON or a generated PDF, and migrates it to
/// the current schema.
///
/// # Errors
///
/// Returns `DaybookError::FileSystem` if the file cannot be read, and the
/// errors of [`read_configuration`] for its contents.
pub async fn load_configuration_file(path: impl AsRef<Path>) -> Result<Configuration> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.fs_context(path)?;
    read_configuration(&bytes)
}

/// Writes `config` as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns `DaybookError::FileSystem` on write failure.
pub async fn save_configuration(path: impl AsRef<Path>, config: &Configuration) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.fs_context(parent)?;
    }
    let mut json = serde_json::to_vec_pretty(config)?;
    json.push(b'\n');
    tokio::fs::write(path, json).await.fs_context(path)
}
