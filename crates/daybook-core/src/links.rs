//! Canonical page identifiers.
//!
//! [`LinkResolver`] is the only place page ids are built. Every page uses its
//! id as its anchor, and every link into that page resolves to the same id
//! through the resolver, so the two can never drift apart.
//!
//! Ids are bucketed by granularity:
//!
//! | Kind                 | Bucket        | Example                  |
//! |----------------------|---------------|--------------------------|
//! | `YEAR_OVERVIEW`      | year          | `year-2024`              |
//! | `MONTH_OVERVIEW`     | year + month  | `month-2024-03`          |
//! | `WEEK_OVERVIEW`      | week year + week | `week-2024-w09`       |
//! | `WEEK_RETROSPECTIVE` | week year + week | `retrospective-2024-w09` |
//! | `DAY`                | day           | `day-2024-03-01`         |

use std::fmt;
use std::str::FromStr;

use jiff::civil::{Date, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::week_number;
use crate::error::Result;

/// The closed set of page kinds a document is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageKind {
    /// One page per year touched by the calendar range
    YearOverview,
    /// One page per month
    MonthOverview,
    /// One page per week intersecting the range
    WeekOverview,
    /// One page per day
    Day,
    /// Review page following a week
    WeekRetrospective,
}

impl PageKind {
    /// Prefix used in page ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            PageKind::YearOverview => "year",
            PageKind::MonthOverview => "month",
            PageKind::WeekOverview => "week",
            PageKind::Day => "day",
            PageKind::WeekRetrospective => "retrospective",
        }
    }

    /// Whether this kind is anchored to a whole week.
    pub fn is_weekly(&self) -> bool {
        matches!(self, PageKind::WeekOverview | PageKind::WeekRetrospective)
    }

    /// Human readable name
    pub fn label(&self) -> &'static str {
        match self {
            PageKind::YearOverview => "Year",
            PageKind::MonthOverview => "Month",
            PageKind::WeekOverview => "Week",
            PageKind::Day => "Day",
            PageKind::WeekRetrospective => "Retrospective",
        }
    }
}

impl FromStr for PageKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "year" | "year_overview" => Ok(PageKind::YearOverview),
            "month" | "month_overview" => Ok(PageKind::MonthOverview),
            "week" | "week_overview" => Ok(PageKind::WeekOverview),
            "day" => Ok(PageKind::Day),
            "retrospective" | "week_retrospective" => Ok(PageKind::WeekRetrospective),
            _ => Err(format!("Invalid page kind: {s}")),
        }
    }
}

/// Anchor identifier of a page, also used as the target of links to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps `(kind, date)` pairs to page ids for a fixed first day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkResolver {
    first_day: Weekday,
}

impl LinkResolver {
    /// Creates a resolver for weeks starting on `first_day`.
    pub fn new(first_day: Weekday) -> Self {
        Self { first_day }
    }

    /// First day of the week this resolver buckets weeks by.
    pub fn first_day(&self) -> Weekday {
        self.first_day
    }

    /// Resolves the id of the page of `kind` that contains `date`.
    ///
    /// # Errors
    ///
    /// Returns `DaybookError::Date` if locating the week of `date` overflows
    /// the supported calendar.
    pub fn resolve(&self, kind: PageKind, date: Date) -> Result<PageId> {
        let prefix = kind.id_prefix();
        let id = match kind {
            PageKind::YearOverview => format!("{prefix}-{:04}", date.year()),
            PageKind::MonthOverview => {
                format!("{prefix}-{:04}-{:02}", date.year(), date.month())
            }
            PageKind::WeekOverview | PageKind::WeekRetrospective => {
                let number = week_number(date, self.first_day)?;
                format!("{prefix}-{:04}-w{:02}", number.year, number.week)
            }
            PageKind::Day => format!(
                "{prefix}-{:04}-{:02}-{:02}",
                date.year(),
                date.month(),
                date.day()
            ),
        };
        Ok(PageId(id))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use jiff::civil::date;
    use jiff::ToSpan;

    use super::*;

    fn resolver() -> LinkResolver {
        LinkResolver::new(Weekday::Monday)
    }

    #[test]
    fn test_id_formats() {
        let r = resolver();
        let day = date(2024, 3, 1);
        assert_eq!(r.resolve(PageKind::YearOverview, day).unwrap().as_str(), "year-2024");
        assert_eq!(r.resolve(PageKind::MonthOverview, day).unwrap().as_str(), "month-2024-03");
        assert_eq!(r.resolve(PageKind::WeekOverview, day).unwrap().as_str(), "week-2024-w09");
        assert_eq!(
            r.resolve(PageKind::WeekRetrospective, day).unwrap().as_str(),
            "retrospective-2024-w09"
        );
        assert_eq!(r.resolve(PageKind::Day, day).unwrap().as_str(), "day-2024-03-01");
    }

    #[test]
    fn test_day_ids_are_injective() {
        let r = resolver();
        let start = date(2023, 1, 1);
        let ids: HashSet<_> = (0..1000)
            .map(|offset| r.resolve(PageKind::Day, start.checked_add(offset.days()).unwrap()))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_week_ids_share_bucket() {
        let r = resolver();
        // Monday 2024-12-30 through Sunday 2025-01-05 is ISO week 2025-W01
        let monday = r.resolve(PageKind::WeekOverview, date(2024, 12, 30)).unwrap();
        let sunday = r.resolve(PageKind::WeekOverview, date(2025, 1, 5)).unwrap();
        let next = r.resolve(PageKind::WeekOverview, date(2025, 1, 6)).unwrap();
        assert_eq!(monday, sunday);
        assert_eq!(monday.as_str(), "week-2025-w01");
        assert_ne!(monday, next);
    }

    #[test]
    fn test_month_and_year_buckets() {
        let r = resolver();
        assert_eq!(
            r.resolve(PageKind::MonthOverview, date(2024, 2, 1)).unwrap(),
            r.resolve(PageKind::MonthOverview, date(2024, 2, 29)).unwrap()
        );
        assert_ne!(
            r.resolve(PageKind::MonthOverview, date(2024, 2, 1)).unwrap(),
            r.resolve(PageKind::MonthOverview, date(2025, 2, 1)).unwrap()
        );
        assert_eq!(
            r.resolve(PageKind::YearOverview, date(2024, 1, 1)).unwrap(),
            r.resolve(PageKind::YearOverview, date(2024, 12, 31)).unwrap()
        );
    }

    #[test]
    fn test_kinds_never_collide() {
        let r = resolver();
        let day = date(2024, 6, 3);
        let kinds = [
            PageKind::YearOverview,
            PageKind::MonthOverview,
            PageKind::WeekOverview,
            PageKind::Day,
            PageKind::WeekRetrospective,
        ];
        let ids: HashSet<_> = kinds.iter().map(|&k| r.resolve(k, day).unwrap()).collect();
        assert_eq!(ids.len(), kinds.len());
    }

    #[test]
    fn test_page_kind_from_str() {
        assert_eq!("week".parse::<PageKind>().unwrap(), PageKind::WeekOverview);
        assert_eq!("DAY".parse::<PageKind>().unwrap(), PageKind::Day);
        assert!("quarter".parse::<PageKind>().is_err());
    }
}
