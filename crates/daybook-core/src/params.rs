//! Parameter structures shared by front ends.
//!
//! These stay free of framework derives; the command line wraps them in its
//! own clap types and converts.

use crate::config::{Configuration, Handedness, Sidebar};
use crate::error::{DaybookError, Result};

/// Field overrides applied on top of a loaded configuration.
///
/// `None` leaves the loaded value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub year: Option<i16>,
    /// Calendar month the range starts at, 1-based
    pub month: Option<i8>,
    pub month_count: Option<i32>,
    /// Sunday-zero offset
    pub first_day_of_week: Option<u8>,
    pub handedness: Option<Handedness>,
    pub sidebar: Option<Sidebar>,
}

impl ConfigOverrides {
    /// Whether no field is overridden.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Returns `config` with every present override applied.
    ///
    /// # Errors
    ///
    /// Returns `DaybookError::InvalidRange` if `month` is outside `1..=12`.
    pub fn apply(&self, mut config: Configuration) -> Result<Configuration> {
        if let Some(year) = self.year {
            config.calendar_range.year = year;
        }
        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                return Err(DaybookError::invalid_range(format!(
                    "month {month} is outside 1..=12"
                )));
            }
            config.calendar_range.month = month - 1;
        }
        if let Some(month_count) = self.month_count {
            config.calendar_range.month_count = month_count;
        }
        if let Some(first_day) = self.first_day_of_week {
            config.first_day_of_week = first_day;
        }
        if let Some(handedness) = self.handedness {
            config.is_left_handed = handedness == Handedness::Left;
        }
        if let Some(sidebar) = self.sidebar {
            config.always_on_sidebar = sidebar == Sidebar::On;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_overrides_keep_configuration() {
        let config = Configuration::new(2024, 1);
        let overrides = ConfigOverrides::default();
        assert!(overrides.is_empty());
        assert_eq!(overrides.apply(config.clone()).unwrap(), config);
    }

    #[test]
    fn test_overrides_applied() {
        let overrides = ConfigOverrides {
            year: Some(2030),
            month: Some(3),
            month_count: Some(6),
            first_day_of_week: Some(0),
            handedness: Some(Handedness::Left),
            sidebar: Some(Sidebar::On),
        };
        let config = overrides.apply(Configuration::new(2024, 1)).unwrap();
        assert_eq!(config.calendar_range.year, 2030);
        assert_eq!(config.calendar_range.month, 2);
        assert_eq!(config.calendar_range.month_count, 6);
        assert_eq!(config.first_day_of_week, 0);
        assert_eq!(config.handedness(), Handedness::Left);
        assert_eq!(config.sidebar(), Sidebar::On);
    }

    #[test]
    fn test_month_out_of_range() {
        let overrides = ConfigOverrides {
            month: Some(13),
            ..Default::default()
        };
        assert!(matches!(
            overrides.apply(Configuration::new(2024, 1)),
            Err(DaybookError::InvalidRange { .. })
        ));
    }
}
