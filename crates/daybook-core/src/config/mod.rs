//! The planner configuration model.
//!
//! A [`Configuration`] describes one whole planner: the calendar range, which
//! page kinds are enabled, the itinerary templates, special dates and
//! styling. It is built once (defaults, a template, command-line overrides or
//! a migrated file) and then treated as immutable input to one enumeration
//! and render pass.
//!
//! # Persisted Shape
//!
//! Configurations serialize to camelCase JSON tagged with `schemaVersion`.
//! Files written by older releases are brought up to date by
//! [`migrations::migrate`]; see that module for the version chain.
//!
//! ```rust
//! use daybook_core::config::{Configuration, Template};
//!
//! let config = Template::Advanced.apply(Configuration::new(2025, 1));
//! config.validate().unwrap();
//! assert!(config.day_itinerary(1).unwrap().items.len() > 2);
//! ```

pub mod itinerary;
pub mod locale;
pub mod migrations;
pub mod templates;

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, BTreeSet};

use jiff::civil::{Date, Weekday};
use jiff::{ToSpan, Zoned};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::calendar::{parse_special_date_key, weekday_from_index, weekend_day_set};
use crate::error::{DaybookError, Result};

pub use itinerary::{ItineraryDirective, MAX_LINES};
pub use migrations::{migrate, migrate_from, SchemaVersion};
pub use templates::Template;

/// Default page size in points (width, height).
pub const DEFAULT_PAGE_SIZE: [f32; 2] = [445.0, 592.0];

/// Default font family.
pub const DEFAULT_FONT_FAMILY: &str = "Lato";

/// The range of consecutive months a planner covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarRange {
    /// Year of the first month
    pub year: i16,
    /// Zero-based index of the first month (0 = January)
    pub month: i8,
    /// Number of consecutive months to include
    pub month_count: i32,
}

impl CalendarRange {
    /// Validates the range and returns the first day of every month in it.
    ///
    /// # Errors
    ///
    /// Returns `DaybookError::InvalidRange` when the month count is not
    /// positive, the start month is outside `0..=11`, or the range leaves
    /// the supported calendar.
    pub fn months(&self) -> Result<Vec<Date>> {
        if self.month_count <= 0 {
            return Err(DaybookError::invalid_range(format!(
                "month count must be at least 1, got {}",
                self.month_count
            )));
        }
        if !(0..=11).contains(&self.month) {
            return Err(DaybookError::invalid_range(format!(
                "start month index must be within 0..=11, got {}",
                self.month
            )));
        }
        let first = Date::new(self.year, self.month + 1, 1)
            .map_err(|e| DaybookError::invalid_range(format!("invalid start date: {e}")))?;
        (0..self.month_count)
            .map(|offset| {
                first.checked_add(offset.months()).map_err(|e| {
                    DaybookError::invalid_range(format!(
                        "month {offset} after {first} is out of range: {e}"
                    ))
                })
            })
            .collect()
    }
}

/// Palette used by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Colors {
    pub basic1: String,
    pub basic2: String,
    pub accent1: String,
    pub accent2: String,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            basic1: "#000000".to_string(),
            basic2: "#FFFFFF".to_string(),
            accent1: "#9D9D9D".to_string(),
            accent2: "#C9C9C9".to_string(),
        }
    }
}

/// Itinerary template for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayItinerary {
    /// Weekday this itinerary applies to (Sunday-zero offset)
    pub day_of_week: u8,
    /// Directives laid out on every day page of this weekday
    pub items: Vec<ItineraryDirective>,
    /// Whether day pages of this weekday render the itinerary at all
    pub is_enabled: bool,
}

impl DayItinerary {
    /// An empty itinerary for a weekday.
    pub fn empty(day_of_week: u8, is_enabled: bool) -> Self {
        Self {
            day_of_week,
            items: Vec::new(),
            is_enabled,
        }
    }
}

/// Which side of the page the binding and navigation chrome sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    Right,
}

/// Whether pages reserve room for an always-visible reader sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sidebar {
    On,
    Off,
}

/// Root planner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Schema version this value conforms to
    pub schema_version: SchemaVersion,

    /// Months covered by the planner
    #[serde(flatten)]
    pub calendar_range: CalendarRange,

    /// First day of the week (Sunday-zero offset)
    pub first_day_of_week: u8,

    /// Non-work days, styling only
    pub weekend_days: Vec<u8>,

    /// Mirror page chrome for left-handed use
    pub is_left_handed: bool,

    /// Reserve a margin for an always-visible sidebar
    pub always_on_sidebar: bool,

    pub is_month_overview_enabled: bool,
    pub is_week_overview_enabled: bool,
    pub is_week_retrospective_enabled: bool,

    /// Habit tracker rows on month overviews
    pub habits: Vec<String>,

    /// Itinerary on month overviews
    pub month_itinerary: Vec<ItineraryDirective>,

    /// Todo lines on week overviews
    pub todos: Vec<String>,

    /// One itinerary per weekday, indexed by Sunday-zero offset
    pub day_itineraries: Vec<DayItinerary>,

    /// Itinerary on week retrospective pages
    pub week_retrospective_itinerary: Vec<ItineraryDirective>,

    /// Labels keyed by `DD-MM`, recurring every year
    pub special_dates: BTreeMap<String, Vec<String>>,

    pub colors: Colors,
    pub page_size: [f32; 2],
    pub font_family: String,
}

impl Configuration {
    /// Creates the default configuration for a fixed year and first day of
    /// the week. Covers twelve months from January with all overview
    /// sections on and empty, enabled day itineraries.
    pub fn new(year: i16, first_day_of_week: u8) -> Self {
        Self {
            schema_version: SchemaVersion::CURRENT,
            calendar_range: CalendarRange {
                year,
                month: 0,
                month_count: 12,
            },
            first_day_of_week,
            weekend_days: vec![0, 6],
            is_left_handed: false,
            always_on_sidebar: false,
            is_month_overview_enabled: true,
            is_week_overview_enabled: true,
            is_week_retrospective_enabled: false,
            habits: Vec::new(),
            month_itinerary: Vec::new(),
            todos: Vec::new(),
            day_itineraries: default_day_itineraries(true),
            week_retrospective_itinerary: Vec::new(),
            special_dates: BTreeMap::new(),
            colors: Colors::default(),
            page_size: DEFAULT_PAGE_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }

    /// Creates the default configuration for the current year and the first
    /// day of the week of the process locale.
    pub fn create_default() -> Self {
        let year = Zoned::now().year();
        Self::new(year, locale::first_day_of_week_from_env())
    }

    /// First day of the week as a weekday.
    pub fn first_weekday(&self) -> Weekday {
        weekday_from_index(self.first_day_of_week)
    }

    /// Handedness of the page chrome.
    pub fn handedness(&self) -> Handedness {
        if self.is_left_handed {
            Handedness::Left
        } else {
            Handedness::Right
        }
    }

    /// Sidebar margin mode.
    pub fn sidebar(&self) -> Sidebar {
        if self.always_on_sidebar {
            Sidebar::On
        } else {
            Sidebar::Off
        }
    }

    /// Itinerary for a weekday (Sunday-zero offset).
    pub fn day_itinerary(&self, day_of_week: u8) -> Option<&DayItinerary> {
        self.day_itineraries
            .iter()
            .find(|itinerary| itinerary.day_of_week == day_of_week)
    }

    /// Whether `date` falls on a configured weekend day.
    pub fn is_weekend(&self, date: Date) -> bool {
        let index = crate::calendar::weekday_index(date.weekday());
        self.weekend_days.contains(&index)
    }

    /// Labels of the special date falling on `date`, if any.
    pub fn special_items(&self, date: Date) -> Option<&[String]> {
        self.special_dates
            .get(&crate::calendar::special_date_key(date))
            .map(Vec::as_slice)
    }

    /// Checks the invariants every configuration must uphold.
    ///
    /// # Errors
    ///
    /// Returns `DaybookError::InvalidConfiguration` naming the first
    /// offending field.
    pub fn validate(&self) -> Result<()> {
        if self.first_day_of_week > 6 {
            return Err(DaybookError::invalid_configuration("firstDayOfWeek")
                .with_reason(format!("{} is outside 0..=6", self.first_day_of_week)));
        }

        weekend_day_set(&self.weekend_days)?;

        if self.day_itineraries.len() != 7 {
            return Err(DaybookError::invalid_configuration("dayItineraries")
                .with_reason(format!(
                    "expected exactly 7 entries, got {}",
                    self.day_itineraries.len()
                )));
        }
        let mut seen = BTreeSet::new();
        for itinerary in &self.day_itineraries {
            if itinerary.day_of_week > 6 || !seen.insert(itinerary.day_of_week) {
                return Err(DaybookError::invalid_configuration("dayItineraries")
                    .with_reason(format!(
                        "dayOfWeek {} is out of range or repeated",
                        itinerary.day_of_week
                    )));
            }
        }

        let itineraries = self
            .day_itineraries
            .iter()
            .map(|itinerary| ("dayItineraries", itinerary.items.as_slice()))
            .chain([
                ("monthItinerary", self.month_itinerary.as_slice()),
                ("weekRetrospectiveItinerary", self.week_retrospective_itinerary.as_slice()),
            ]);
        for (field, directives) in itineraries {
            if let Some(count) = directives.iter().find_map(|directive| match directive {
                ItineraryDirective::Lines(count) if *count > MAX_LINES => Some(*count),
                _ => None,
            }) {
                return Err(DaybookError::invalid_configuration(field)
                    .with_reason(format!("LINES({count}) exceeds the limit of {MAX_LINES}")));
            }
        }

        if let Some(key) = self
            .special_dates
            .keys()
            .find(|key| parse_special_date_key(key).is_none())
        {
            return Err(DaybookError::invalid_configuration("specialDates")
                .with_reason(format!("'{key}' is not a valid DD-MM day")));
        }
        for (key, labels) in &self.special_dates {
            if labels.is_empty() {
                warn!("Special date {key} has no labels and will only be marked");
            }
        }

        if self.page_size.iter().any(|side| !side.is_finite() || *side <= 0.0) {
            return Err(DaybookError::invalid_configuration("pageSize")
                .with_reason("both sides must be positive"));
        }

        Ok(())
    }

    /// Last day covered by the calendar range.
    ///
    /// # Errors
    ///
    /// Returns `DaybookError::InvalidRange` if the range is malformed.
    pub fn last_day(&self) -> Result<Option<Date>> {
        Ok(self
            .calendar_range
            .months()?
            .last()
            .map(|month| month.last_of_month()))
    }
}

/// Seven empty day itineraries, ordered by weekday.
pub fn default_day_itineraries(is_enabled: bool) -> Vec<DayItinerary> {
    (0..7)
        .map(|day_of_week| DayItinerary::empty(day_of_week, is_enabled))
        .collect()
}
