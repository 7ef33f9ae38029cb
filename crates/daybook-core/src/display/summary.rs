//! Short overview of a configuration.

use std::fmt;

use crate::calendar::{month_name, weekday_from_index, weekday_name};
use crate::config::Configuration;

/// Markdown overview of the planner a configuration describes.
pub struct ConfigurationSummary<'a>(pub &'a Configuration);

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

impl fmt::Display for ConfigurationSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.0;
        let range = &config.calendar_range;

        writeln!(f, "# Planner Configuration")?;
        writeln!(f)?;
        writeln!(f, "- Schema: {}", config.schema_version)?;

        match (range.months(), config.last_day()) {
            (Ok(months), Ok(Some(last))) if !months.is_empty() => writeln!(
                f,
                "- Range: {} {} to {} {} ({} month(s))",
                month_name(months[0].month()),
                months[0].year(),
                month_name(last.month()),
                last.year(),
                months.len()
            )?,
            (Err(err), _) | (_, Err(err)) => writeln!(f, "- Range: invalid ({err})")?,
            _ => writeln!(f, "- Range: empty")?,
        }

        writeln!(
            f,
            "- First day of week: {}",
            weekday_name(config.first_weekday())
        )?;
        let weekend: Vec<_> = config
            .weekend_days
            .iter()
            .filter(|&&day| day <= 6)
            .map(|&day| weekday_name(weekday_from_index(day)))
            .collect();
        writeln!(f, "- Weekend: {}", weekend.join(", "))?;
        writeln!(
            f,
            "- Handedness: {}",
            if config.is_left_handed { "left" } else { "right" }
        )?;
        writeln!(f, "- Sidebar: {}", on_off(config.always_on_sidebar))?;
        writeln!(f, "- Page size: {} x {} pt", config.page_size[0], config.page_size[1])?;

        writeln!(f, "\n## Sections\n")?;
        writeln!(f, "- Month overview: {}", on_off(config.is_month_overview_enabled))?;
        writeln!(f, "- Week overview: {}", on_off(config.is_week_overview_enabled))?;
        writeln!(
            f,
            "- Week retrospective: {}",
            on_off(config.is_week_retrospective_enabled)
        )?;
        let enabled_days = config
            .day_itineraries
            .iter()
            .filter(|itinerary| itinerary.is_enabled)
            .count();
        writeln!(f, "- Day itineraries enabled: {enabled_days}/7")?;

        if !config.habits.is_empty() {
            writeln!(f, "\n## Habits\n")?;
            for habit in &config.habits {
                writeln!(f, "- {habit}")?;
            }
        }

        if !config.special_dates.is_empty() {
            writeln!(f, "\n## Special Dates\n")?;
            for (day, items) in &config.special_dates {
                writeln!(f, "- {day}: {}", items.join(", "))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_default_year() {
        let mut config = Configuration::new(2025, 1);
        config
            .special_dates
            .insert("01-01".to_string(), vec!["New Year".to_string()]);
        let output = ConfigurationSummary(&config).to_string();

        assert!(output.contains("- Schema: v2"));
        assert!(output.contains("- Range: January 2025 to December 2025 (12 month(s))"));
        assert!(output.contains("- First day of week: Monday"));
        assert!(output.contains("- Weekend: Sunday, Saturday"));
        assert!(output.contains("- Week retrospective: off"));
        assert!(output.contains("- 01-01: New Year"));
    }

    #[test]
    fn test_summary_of_invalid_range() {
        let mut config = Configuration::new(2025, 1);
        config.calendar_range.month_count = 0;
        let output = ConfigurationSummary(&config).to_string();
        assert!(output.contains("- Range: invalid"));
    }
}
