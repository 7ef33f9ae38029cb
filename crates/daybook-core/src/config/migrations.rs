//! Persisted configuration versions and the migrations between them.
//!
//! Every persisted configuration carries a `schemaVersion` tag. Loading a
//! file detects the tag, deserializes the raw object into the matching
//! variant of [`PersistedConfiguration`], and walks the chain of
//! version-to-version steps until the current shape is reached:
//!
//! ```text
//! v1 ──(itineraries become directives, new sections defaulted)──▶ v2
//! ```
//!
//! Files written before the tag existed have no `schemaVersion` at all and
//! are read as `v1`. Migrating a current configuration is the identity.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    CalendarRange, Colors, Configuration, DayItinerary, ItineraryDirective, DEFAULT_FONT_FAMILY,
    DEFAULT_PAGE_SIZE,
};
use crate::error::{DaybookError, Result};

/// Name of the version tag field in persisted configurations.
pub const VERSION_FIELD: &str = "schemaVersion";

/// Known configuration schema versions, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SchemaVersion {
    /// Itineraries stored as plain strings
    #[serde(rename = "v1")]
    V1,
    /// Itinerary directives, special dates and week retrospectives
    #[serde(rename = "v2")]
    V2,
}

impl SchemaVersion {
    /// Version written by this release.
    pub const CURRENT: SchemaVersion = SchemaVersion::V2;

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVersion::V1 => "v1",
            SchemaVersion::V2 => "v2",
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVersion {
    type Err = DaybookError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "v1" => Ok(SchemaVersion::V1),
            "v2" => Ok(SchemaVersion::V2),
            _ => Err(DaybookError::UnsupportedVersion {
                version: s.to_string(),
            }),
        }
    }
}

fn default_page_size() -> [f32; 2] {
    DEFAULT_PAGE_SIZE
}

fn default_weekend_days() -> Vec<u8> {
    vec![0, 6]
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

/// Day itinerary as stored by `v1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayItineraryV1 {
    pub day_of_week: u8,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default = "enabled")]
    pub is_enabled: bool,
}

fn enabled() -> bool {
    true
}

/// Configuration as stored by `v1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationV1 {
    #[serde(flatten)]
    pub calendar_range: CalendarRange,
    pub first_day_of_week: u8,
    #[serde(default = "default_weekend_days")]
    pub weekend_days: Vec<u8>,
    #[serde(default)]
    pub is_left_handed: bool,
    #[serde(default)]
    pub always_on_sidebar: bool,
    #[serde(default = "enabled")]
    pub is_month_overview_enabled: bool,
    #[serde(default = "enabled")]
    pub is_week_overview_enabled: bool,
    #[serde(default)]
    pub habits: Vec<String>,
    #[serde(default)]
    pub month_itinerary: Vec<String>,
    #[serde(default)]
    pub todos: Vec<String>,
    pub day_itineraries: Vec<DayItineraryV1>,
    #[serde(default)]
    pub colors: Colors,
    #[serde(default = "default_page_size")]
    pub page_size: [f32; 2],
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

/// A raw persisted configuration, tagged by the version it was written with.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistedConfiguration {
    V1(ConfigurationV1),
    V2(Configuration),
}

impl PersistedConfiguration {
    /// Reads the version tag of `raw`. A missing tag means `v1`.
    ///
    /// # Errors
    ///
    /// Returns `DaybookError::UnsupportedVersion` for unknown or non-string
    /// tags and `DaybookError::InvalidConfiguration` when `raw` is not an
    /// object.
    pub fn detect_version(raw: &Value) -> Result<SchemaVersion> {
        let object = raw.as_object().ok_or_else(|| {
            DaybookError::invalid_configuration("<root>").with_reason("expected a JSON object")
        })?;
        match object.get(VERSION_FIELD) {
            None | Some(Value::Null) => Ok(SchemaVersion::V1),
            Some(Value::String(tag)) => tag.parse(),
            Some(other) => Err(DaybookError::UnsupportedVersion {
                version: other.to_string(),
            }),
        }
    }

    /// Deserializes `raw` as the shape of `version`.
    ///
    /// # Errors
    ///
    /// Returns `DaybookError::InvalidConfiguration` if `raw` does not match
    /// that shape.
    pub fn from_value(raw: Value, version: SchemaVersion) -> Result<Self> {
        let shape_error = |e: serde_json::Error| {
            DaybookError::invalid_configuration("<root>")
                .with_reason(format!("not a valid {version} configuration: {e}"))
        };
        match version {
            SchemaVersion::V1 => serde_json::from_value(raw).map(Self::V1).map_err(shape_error),
            SchemaVersion::V2 => serde_json::from_value(raw).map(Self::V2).map_err(shape_error),
        }
    }

    pub fn version(&self) -> SchemaVersion {
        match self {
            Self::V1(_) => SchemaVersion::V1,
            Self::V2(_) => SchemaVersion::V2,
        }
    }

    /// Applies a single migration step.
    fn step(self) -> Self {
        match self {
            Self::V1(config) => Self::V2(config.into()),
            current @ Self::V2(_) => current,
        }
    }

    /// Applies migration steps until the current version is reached.
    pub fn into_current(self) -> Configuration {
        let mut persisted = self;
        loop {
            match persisted {
                Self::V2(config) => return config,
                older => {
                    debug!("Migrating configuration from {}", older.version());
                    persisted = older.step();
                }
            }
        }
    }
}

impl From<ConfigurationV1> for Configuration {
    fn from(v1: ConfigurationV1) -> Self {
        Configuration {
            schema_version: SchemaVersion::V2,
            calendar_range: v1.calendar_range,
            first_day_of_week: v1.first_day_of_week,
            weekend_days: v1.weekend_days,
            is_left_handed: v1.is_left_handed,
            always_on_sidebar: v1.always_on_sidebar,
            is_month_overview_enabled: v1.is_month_overview_enabled,
            is_week_overview_enabled: v1.is_week_overview_enabled,
            is_week_retrospective_enabled: false,
            habits: v1.habits,
            month_itinerary: v1
                .month_itinerary
                .into_iter()
                .map(ItineraryDirective::Item)
                .collect(),
            todos: v1.todos,
            day_itineraries: v1
                .day_itineraries
                .into_iter()
                .map(|day| DayItinerary {
                    day_of_week: day.day_of_week,
                    items: day.items.into_iter().map(ItineraryDirective::Item).collect(),
                    is_enabled: day.is_enabled,
                })
                .collect(),
            week_retrospective_itinerary: Vec::new(),
            special_dates: BTreeMap::new(),
            colors: v1.colors,
            page_size: v1.page_size,
            font_family: v1.font_family,
        }
    }
}

/// Migrates a raw persisted configuration to the current version, detecting
/// its source version from the `schemaVersion` tag.
///
/// # Errors
///
/// Returns `DaybookError::UnsupportedVersion` if the tag is not recognized
/// and `DaybookError::InvalidConfiguration` if the object does not match its
/// declared version or violates a configuration invariant.
pub fn migrate(raw: Value) -> Result<Configuration> {
    let version = PersistedConfiguration::detect_version(&raw)?;
    migrate_from(raw, version)
}

/// Migrates a raw persisted configuration known to be of `from_version`.
///
/// # Errors
///
/// See [`migrate`].
pub fn migrate_from(raw: Value, from_version: SchemaVersion) -> Result<Configuration> {
    let persisted = PersistedConfiguration::from_value(raw, from_version)?;
    let config = persisted.into_current();
    config.validate()?;
    debug!(
        "Loaded {} configuration covering {} month(s)",
        from_version, config.calendar_range.month_count
    );
    Ok(config)
}
