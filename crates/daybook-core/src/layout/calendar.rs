//! Embedded month calendars.
//!
//! Every date rendered in a mini-calendar carries its own link, weekend and
//! special-date flags, so the renderer never recomputes calendar math.

use jiff::civil::Date;
use jiff::ToSpan;
use serde::{Deserialize, Serialize};

use crate::calendar::{
    month_short_name, week_number, week_start, weekday_min_name, weekday_order, WeekNumber,
};
use crate::config::Configuration;
use crate::document::Document;
use crate::error::Result;
use crate::links::{PageId, PageKind};

/// What part of a mini-calendar is emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HighlightMode {
    /// The anchor day
    HighlightDay,
    /// The week containing the anchor date
    HighlightWeek,
    HighlightNone,
}

impl HighlightMode {
    /// Highlight mode used by the calendar embedded in a page of `kind`.
    pub fn for_kind(kind: PageKind) -> Self {
        match kind {
            PageKind::Day => HighlightMode::HighlightDay,
            PageKind::WeekOverview | PageKind::WeekRetrospective => HighlightMode::HighlightWeek,
            PageKind::YearOverview | PageKind::MonthOverview => HighlightMode::HighlightNone,
        }
    }
}

/// One date cell of a mini-calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: Date,
    pub link: Option<PageId>,
    pub is_weekend: bool,
    /// Falls outside the calendar's month
    pub is_other_month: bool,
    pub is_highlighted: bool,
    /// Listed in the special dates, with or without labels
    pub is_special: bool,
    pub special_items: Vec<String>,
}

/// One row of a mini-calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarWeek {
    pub number: WeekNumber,
    pub link: Option<PageId>,
    pub retrospective_link: Option<PageId>,
    pub is_highlighted: bool,
    pub days: Vec<CalendarDay>,
}

/// A month calendar with navigation links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiniCalendar {
    /// First day of the month shown
    pub month: Date,
    pub title: String,
    pub highlight: HighlightMode,
    pub previous_month_link: Option<PageId>,
    pub month_link: Option<PageId>,
    pub year_link: Option<PageId>,
    pub next_month_link: Option<PageId>,
    /// Two-letter weekday labels in configured order
    pub weekdays: Vec<String>,
    /// Whether rows carry a retrospective column
    pub shows_retrospective: bool,
    pub weeks: Vec<CalendarWeek>,
}

/// Builds the calendar of the month containing `month`, emphasizing
/// `anchor` according to `highlight`.
pub fn mini_calendar(
    month: Date,
    anchor: Date,
    highlight: HighlightMode,
    document: &Document,
    config: &Configuration,
) -> Result<MiniCalendar> {
    let month = month.first_of_month();
    let first_day = config.first_weekday();
    let last = month.last_of_month();
    let anchor_week = week_number(anchor, first_day)?;

    let mut weeks = Vec::new();
    let mut start = week_start(month, first_day)?;
    while start <= last {
        let number = week_number(start, first_day)?;
        let is_current_week = highlight == HighlightMode::HighlightWeek && number == anchor_week;

        let mut days = Vec::with_capacity(7);
        let mut date = start;
        for _ in 0..7 {
            let special = config.special_items(date);
            days.push(CalendarDay {
                date,
                link: document.link(PageKind::Day, date)?,
                is_weekend: config.is_weekend(date),
                is_other_month: date.year() != month.year() || date.month() != month.month(),
                is_highlighted: is_current_week
                    || (highlight == HighlightMode::HighlightDay && date == anchor),
                is_special: special.is_some(),
                special_items: special.map(<[String]>::to_vec).unwrap_or_default(),
            });
            date = date.checked_add(1.day())?;
        }

        weeks.push(CalendarWeek {
            number,
            link: document.link(PageKind::WeekOverview, start)?,
            retrospective_link: if config.is_week_retrospective_enabled {
                document.link(PageKind::WeekRetrospective, start)?
            } else {
                None
            },
            is_highlighted: is_current_week,
            days,
        });
        start = start.checked_add(1.week())?;
    }

    Ok(MiniCalendar {
        month,
        title: month_short_name(month.month()).to_string(),
        highlight,
        previous_month_link: document
            .link(PageKind::MonthOverview, month.checked_sub(1.month())?)?,
        month_link: document.link(PageKind::MonthOverview, month)?,
        year_link: document.link(PageKind::YearOverview, month)?,
        next_month_link: document.link(PageKind::MonthOverview, month.checked_add(1.month())?)?,
        weekdays: weekday_order(first_day)
            .iter()
            .map(|&weekday| weekday_min_name(weekday).to_string())
            .collect(),
        shows_retrospective: config.is_week_retrospective_enabled,
        weeks,
    })
}
