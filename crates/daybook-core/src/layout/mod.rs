//! Per-page render parameters.
//!
//! [`derive_geometry`] turns a [`PageDescriptor`] into a [`PageGeometry`]: the
//! chrome, header, embedded calendar, background grid and kind-specific
//! content a renderer needs to draw the page. Derivation reads the
//! descriptor and configuration only; ids and links are never altered.
//!
//! ```text
//! Configuration ──▶ enumerate_pages ──▶ Document
//!                                          │
//!                                          ▼
//!            DocumentRenderer ◀── derive_document_geometry
//! ```

pub mod calendar;
pub mod chrome;
pub mod grid;
pub mod itinerary;


use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::calendar::{
    month_name, month_short_name, week_end, week_number, week_start, weekday_index,
    weekday_name,
};
use crate::config::Configuration;
use crate::document::{Document, PageDescriptor};
use crate::error::Result;
use crate::links::{PageId, PageKind};

pub use calendar::{mini_calendar, CalendarDay, CalendarWeek, HighlightMode, MiniCalendar};
pub use chrome::{Chrome, FlexDirection, Side};
pub use grid::DotGrid;
pub use itinerary::{
    layout_itinerary, ItineraryFragment, ItineraryLayout, ItineraryLine, ItinerarySpace,
    LINE_HEIGHT,
};

/// Inset of the page body from the header and the page edges, in points.
pub const BODY_INSET: f32 = 12.0;

/// Cell size of the calendar at the top of month overviews.
pub const MONTH_CALENDAR_CELL: f32 = 14.0;

/// Vertical space of one habit tracker row.
pub const HABIT_ROW_HEIGHT: f32 = 14.0;

/// Gap below the month calendar.
pub const CALENDAR_GAP: f32 = 12.0;

/// Gap above an itinerary that follows other content.
pub const ITINERARY_GAP: f32 = 8.0;

/// Height of the page body below the header.
pub fn body_height(page_size: [f32; 2], chrome: &Chrome) -> f32 {
    (page_size[1] - chrome.header_height - 2.0 * BODY_INSET).max(0.0)
}

/// Page header contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub title: String,
    /// Target of the title, usually the enclosing page
    pub title_link: Option<PageId>,
    pub number: String,
    pub subtitle: String,
    pub previous_link: Option<PageId>,
    pub next_link: Option<PageId>,
    /// Day pages of a special date
    pub is_special: bool,
    /// Special date labels shown under the date
    pub special_items: Vec<String>,
}

/// One day cell of a week overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekDayCell {
    pub date: Date,
    pub weekday: String,
    /// `DD Mon`
    pub short_date: String,
    pub link: Option<PageId>,
    pub is_weekend: bool,
    pub is_special: bool,
    pub special_items: Vec<String>,
}

/// Kind-specific body of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum PageContent {
    YearOverview {
        months: Vec<MiniCalendar>,
    },
    #[serde(rename_all = "camelCase")]
    MonthOverview {
        habits: Vec<String>,
        /// Days of the month, one habit tracker column each
        day_count: i8,
        itinerary: ItineraryLayout,
    },
    WeekOverview {
        days: Vec<WeekDayCell>,
        todos: Vec<String>,
    },
    /// `itinerary` is `None` when the weekday's itinerary is disabled
    Day {
        itinerary: Option<ItineraryLayout>,
    },
    WeekRetrospective {
        itinerary: ItineraryLayout,
    },
}

impl PageContent {
    /// Number of physical pages this content spans.
    pub fn fragment_count(&self) -> usize {
        match self {
            PageContent::Day {
                itinerary: Some(itinerary),
            }
            | PageContent::MonthOverview { itinerary, .. }
            | PageContent::WeekRetrospective { itinerary } => itinerary.fragments.len().max(1),
            _ => 1,
        }
    }
}

/// Everything a renderer needs to draw one logical page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    pub id: PageId,
    pub kind: PageKind,
    pub page_size: [f32; 2],
    pub chrome: Chrome,
    pub header: Header,
    pub calendar: Option<MiniCalendar>,
    pub grid: DotGrid,
    pub content: PageContent,
}

/// Derives the render parameters of one page.
///
/// # Errors
///
/// Returns `DaybookError::Date` if calendar arithmetic around the page date
/// overflows the supported range.
pub fn derive_geometry(
    page: &PageDescriptor,
    document: &Document,
    config: &Configuration,
) -> Result<PageGeometry> {
    let highlight = HighlightMode::for_kind(page.kind);
    let calendar = match page.kind {
        PageKind::YearOverview => None,
        PageKind::MonthOverview | PageKind::WeekOverview | PageKind::WeekRetrospective => {
            Some(mini_calendar(page.month, page.date, highlight, document, config)?)
        }
        PageKind::Day => Some(mini_calendar(page.date, page.date, highlight, document, config)?),
    };

    let chrome = Chrome::new(config.handedness(), config.sidebar());
    let body = body_height(config.page_size, &chrome);
    let content = content(page, document, config, body, calendar.as_ref())?;

    Ok(PageGeometry {
        id: page.id.clone(),
        kind: page.kind,
        page_size: config.page_size,
        chrome,
        header: header(page, config)?,
        calendar,
        grid: DotGrid::for_kind(page.kind),
        content,
    })
}

/// Derives the render parameters of every page, in document order.
///
/// # Errors
///
/// See [`derive_geometry`].
pub fn derive_document_geometry(
    document: &Document,
    config: &Configuration,
) -> Result<Vec<PageGeometry>> {
    document
        .pages()
        .iter()
        .map(|page| derive_geometry(page, document, config))
        .collect()
}

fn header(page: &PageDescriptor, config: &Configuration) -> Result<Header> {
    let links = &page.links;
    let first_day = config.first_weekday();
    let date = page.date;

    let (title, title_link, number, subtitle) = match page.kind {
        PageKind::YearOverview => (
            "Year".to_string(),
            None,
            date.year().to_string(),
            String::new(),
        ),
        PageKind::MonthOverview => (
            date.year().to_string(),
            links.parent_year.clone(),
            month_short_name(date.month()).to_string(),
            month_name(date.month()).to_string(),
        ),
        PageKind::WeekOverview => (
            month_name(page.month.month()).to_string(),
            links.parent_month.clone(),
            week_number(date, first_day)?.to_string(),
            week_span(date, config)?,
        ),
        PageKind::WeekRetrospective => (
            "Retrospective".to_string(),
            links.parent_week.clone().or_else(|| links.parent_month.clone()),
            week_number(date, first_day)?.to_string(),
            week_span(date, config)?,
        ),
        PageKind::Day => (
            format!("Week {}", week_number(date, first_day)?),
            links.parent_week.clone().or_else(|| links.parent_month.clone()),
            format!("{:02}", date.day()),
            format!("{}, {}", weekday_name(date.weekday()), month_name(date.month())),
        ),
    };

    let special = match page.kind {
        PageKind::Day => config.special_items(date),
        _ => None,
    };

    Ok(Header {
        title,
        title_link,
        number,
        subtitle,
        previous_link: links.previous.clone(),
        next_link: links.next.clone(),
        is_special: special.is_some(),
        special_items: special.map(<[String]>::to_vec).unwrap_or_default(),
    })
}

/// `DD Month - DD Month` for the week containing `date`.
fn week_span(date: Date, config: &Configuration) -> Result<String> {
    let first_day = config.first_weekday();
    let start = week_start(date, first_day)?;
    let end = week_end(date, first_day)?;
    Ok(format!(
        "{:02} {} - {:02} {}",
        start.day(),
        month_name(start.month()),
        end.day(),
        month_name(end.month())
    ))
}

/// Space left for the month itinerary below the calendar and habit tracker.
fn month_itinerary_space(
    body: f32,
    calendar: Option<&MiniCalendar>,
    habit_rows: usize,
    day_count: i8,
) -> ItinerarySpace {
    let calendar_height = calendar.map_or(0.0, |calendar| {
        MONTH_CALENDAR_CELL * (calendar.weeks.len() as f32 + 2.0) + CALENDAR_GAP
    });
    let habits_height = if day_count > 0 {
        habit_rows as f32 * HABIT_ROW_HEIGHT
    } else {
        0.0
    };
    ItinerarySpace {
        first: (body - calendar_height - habits_height - ITINERARY_GAP).max(0.0),
        rest: body,
    }
}

fn content(
    page: &PageDescriptor,
    document: &Document,
    config: &Configuration,
    body: f32,
    calendar: Option<&MiniCalendar>,
) -> Result<PageContent> {
    let content = match page.kind {
        PageKind::YearOverview => {
            let first = page.date.first_of_year();
            let months = (1..=12)
                .map(|month| {
                    let month = first.with().month(month).build()?;
                    mini_calendar(month, month, HighlightMode::HighlightNone, document, config)
                })
                .collect::<Result<_>>()?;
            PageContent::YearOverview { months }
        }
        PageKind::MonthOverview => {
            let day_count = page.date.days_in_month();
            let space = month_itinerary_space(body, calendar, config.habits.len(), day_count);
            PageContent::MonthOverview {
                habits: config.habits.clone(),
                day_count,
                itinerary: layout_itinerary(&config.month_itinerary, space),
            }
        }
        PageKind::WeekOverview => {
            let mut days = Vec::with_capacity(7);
            let mut date = week_start(page.date, config.first_weekday())?;
            for _ in 0..7 {
                let special = config.special_items(date);
                days.push(WeekDayCell {
                    date,
                    weekday: weekday_name(date.weekday()).to_string(),
                    short_date: format!("{:02} {}", date.day(), month_short_name(date.month())),
                    link: document.link(PageKind::Day, date)?,
                    is_weekend: config.is_weekend(date),
                    is_special: special.is_some(),
                    special_items: special.map(<[String]>::to_vec).unwrap_or_default(),
                });
                date = date.tomorrow()?;
            }
            PageContent::WeekOverview {
                days,
                todos: config.todos.clone(),
            }
        }
        PageKind::Day => {
            let weekday = weekday_index(page.date.weekday());
            let itinerary = config
                .day_itinerary(weekday)
                .filter(|itinerary| itinerary.is_enabled)
                .map(|itinerary| {
                    layout_itinerary(&itinerary.items, ItinerarySpace::uniform(body))
                });
            PageContent::Day { itinerary }
        }
        PageKind::WeekRetrospective => PageContent::WeekRetrospective {
            itinerary: layout_itinerary(
                &config.week_retrospective_itinerary,
                ItinerarySpace::uniform(body),
            ),
        },
    };
    Ok(content)
}
