//! Date-driven page enumeration.

use std::collections::{BTreeSet, HashSet};

use jiff::civil::Date;
use jiff::ToSpan;
use log::debug;

use super::{Document, PageDescriptor, PageLinks};
use crate::calendar::{week_number, week_start, WeekNumber};
use crate::config::Configuration;
use crate::error::Result;
use crate::links::{LinkResolver, PageKind};

/// Enumerates every page of the planner described by `config`.
///
/// # Errors
///
/// Fails before producing any page:
/// - `DaybookError::InvalidConfiguration` if the configuration is invalid
/// - `DaybookError::InvalidRange` if the calendar range is malformed
pub fn enumerate_pages(config: &Configuration) -> Result<Document> {
    config.validate()?;
    let months = config.calendar_range.months()?;

    let mut enumerator = Enumerator::new(config);
    for month in months {
        enumerator.visit_month(month)?;
    }

    let document = Document::new(enumerator.pages, enumerator.resolver);
    debug!(
        "Enumerated {} pages from {} month(s)",
        document.len(),
        config.calendar_range.month_count
    );
    Ok(document)
}

struct Enumerator<'a> {
    config: &'a Configuration,
    resolver: LinkResolver,
    pages: Vec<PageDescriptor>,
    seen_years: BTreeSet<i16>,
    seen_weeks: HashSet<WeekNumber>,
}

impl<'a> Enumerator<'a> {
    fn new(config: &'a Configuration) -> Self {
        Self {
            config,
            resolver: LinkResolver::new(config.first_weekday()),
            pages: Vec::new(),
            seen_years: BTreeSet::new(),
            seen_weeks: HashSet::new(),
        }
    }

    fn visit_month(&mut self, month: Date) -> Result<()> {
        let first_day = self.config.first_weekday();

        if self.seen_years.insert(month.year()) {
            let year = month.first_of_year();
            self.push(PageKind::YearOverview, year, month)?;
        }

        if self.config.is_month_overview_enabled {
            self.push(PageKind::MonthOverview, month, month)?;
        }

        let last = month.last_of_month();
        let mut week = week_start(month, first_day)?;
        while week <= last {
            let is_new_week = self.seen_weeks.insert(week_number(week, first_day)?);

            if is_new_week && self.config.is_week_overview_enabled {
                self.push(PageKind::WeekOverview, week, month)?;
            }

            let mut day = week;
            for _ in 0..7 {
                if day >= month && day <= last {
                    self.push(PageKind::Day, day, month)?;
                }
                day = day.checked_add(1.day())?;
            }

            if is_new_week && self.config.is_week_retrospective_enabled {
                self.push(PageKind::WeekRetrospective, week, month)?;
            }

            week = week.checked_add(1.week())?;
        }

        Ok(())
    }

    fn push(&mut self, kind: PageKind, date: Date, month: Date) -> Result<()> {
        let id = self.resolver.resolve(kind, date)?;
        let links = self.links(kind, date, month)?;
        self.pages.push(PageDescriptor {
            kind,
            date,
            month,
            id,
            links,
        });
        Ok(())
    }

    /// Links to the same-kind neighbours and enclosing pages. Targets that
    /// are not enumerated get dropped when the document is assembled.
    fn links(&self, kind: PageKind, date: Date, month: Date) -> Result<PageLinks> {
        let r = &self.resolver;
        let links = match kind {
            PageKind::YearOverview => PageLinks {
                previous: Some(r.resolve(kind, date.checked_sub(1.year())?)?),
                next: Some(r.resolve(kind, date.checked_add(1.year())?)?),
                ..PageLinks::default()
            },
            PageKind::MonthOverview => PageLinks {
                previous: Some(r.resolve(kind, date.checked_sub(1.month())?)?),
                next: Some(r.resolve(kind, date.checked_add(1.month())?)?),
                parent_year: Some(r.resolve(PageKind::YearOverview, date)?),
                ..PageLinks::default()
            },
            PageKind::WeekOverview | PageKind::WeekRetrospective => PageLinks {
                previous: Some(r.resolve(kind, date.checked_sub(1.week())?)?),
                next: Some(r.resolve(kind, date.checked_add(1.week())?)?),
                parent_year: Some(r.resolve(PageKind::YearOverview, month)?),
                parent_month: Some(r.resolve(PageKind::MonthOverview, month)?),
                parent_week: (kind == PageKind::WeekRetrospective)
                    .then(|| r.resolve(PageKind::WeekOverview, date))
                    .transpose()?,
            },
            PageKind::Day => PageLinks {
                previous: Some(r.resolve(kind, date.checked_sub(1.day())?)?),
                next: Some(r.resolve(kind, date.checked_add(1.day())?)?),
                parent_year: Some(r.resolve(PageKind::YearOverview, date)?),
                parent_month: Some(r.resolve(PageKind::MonthOverview, date)?),
                parent_week: Some(r.resolve(PageKind::WeekOverview, date)?),
            },
        };
        Ok(links)
    }
}
