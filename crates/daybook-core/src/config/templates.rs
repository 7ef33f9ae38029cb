//! Named configuration templates.
//!
//! A template is a pure transform: it takes a base configuration and returns
//! a new one with template-controlled fields replaced. Calendar range, first
//! day of week, handedness and styling always carry over from the base.
//!
//! Basic, Blank and Minimalistic reset page content (habits, todos, special
//! dates and every itinerary) to the defaults, so Basic over any base equals
//! the default content. Advanced only replaces the day and retrospective
//! itineraries and keeps the base's habits, todos, special dates, month
//! itinerary and page toggles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{default_day_itineraries, Configuration, DayItinerary, ItineraryDirective};

/// Template presets offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// The default configuration
    Basic,
    /// Hourly day schedules, a weekly planning page and a retrospective
    Advanced,
    /// Empty itineraries and no extra content
    Blank,
    /// Overviews only; day pages stay empty
    Minimalistic,
}

impl Template {
    /// All templates in presentation order.
    pub const ALL: [Template; 4] = [
        Template::Basic,
        Template::Advanced,
        Template::Blank,
        Template::Minimalistic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Basic => "basic",
            Template::Advanced => "advanced",
            Template::Blank => "blank",
            Template::Minimalistic => "minimalistic",
        }
    }

    /// Applies the template to `base`, returning the new configuration.
    pub fn apply(self, base: Configuration) -> Configuration {
        apply_template(self, base)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Template {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(Template::Basic),
            "advanced" => Ok(Template::Advanced),
            "blank" => Ok(Template::Blank),
            "minimalistic" | "minimal" => Ok(Template::Minimalistic),
            _ => Err(format!("Invalid template: {s}")),
        }
    }
}

/// Returns `base` transformed by `template`.
pub fn apply_template(template: Template, base: Configuration) -> Configuration {
    match template {
        Template::Basic => Configuration {
            special_dates: Default::default(),
            habits: Vec::new(),
            month_itinerary: Vec::new(),
            todos: Vec::new(),
            is_month_overview_enabled: true,
            is_week_overview_enabled: true,
            is_week_retrospective_enabled: false,
            day_itineraries: default_day_itineraries(true),
            week_retrospective_itinerary: Vec::new(),
            ..base
        },
        Template::Advanced => Configuration {
            day_itineraries: (0..7)
                .map(|day_of_week| DayItinerary {
                    day_of_week,
                    items: advanced_day_items(day_of_week),
                    is_enabled: true,
                })
                .collect(),
            week_retrospective_itinerary: vec![
                ItineraryDirective::item("Wins"),
                ItineraryDirective::Lines(7),
                ItineraryDirective::item("Discoveries"),
                ItineraryDirective::Lines(7),
                ItineraryDirective::item("Fails"),
                ItineraryDirective::Lines(15),
            ],
            ..base
        },
        Template::Blank => Configuration {
            special_dates: Default::default(),
            habits: Vec::new(),
            month_itinerary: Vec::new(),
            todos: Vec::new(),
            day_itineraries: default_day_itineraries(true),
            week_retrospective_itinerary: Vec::new(),
            ..base
        },
        Template::Minimalistic => Configuration {
            special_dates: Default::default(),
            habits: Vec::new(),
            is_month_overview_enabled: true,
            month_itinerary: Vec::new(),
            is_week_overview_enabled: true,
            todos: Vec::new(),
            day_itineraries: default_day_itineraries(false),
            is_week_retrospective_enabled: false,
            week_retrospective_itinerary: Vec::new(),
            ..base
        },
    }
}

/// Two-hourly slots from 08:00 to 20:00 followed by a notes block. Mondays
/// get an extra page for planning the week.
fn advanced_day_items(day_of_week: u8) -> Vec<ItineraryDirective> {
    let mut items: Vec<_> = (8..=20)
        .step_by(2)
        .flat_map(|hour| {
            [
                ItineraryDirective::item(format!("{hour:02}:00")),
                ItineraryDirective::Lines(2),
            ]
        })
        .collect();
    items.push(ItineraryDirective::Lines(20));

    if day_of_week == 1 {
        items.extend([
            ItineraryDirective::NewPage,
            ItineraryDirective::item("Monday"),
            ItineraryDirective::Lines(50),
        ]);
    }

    items
}
