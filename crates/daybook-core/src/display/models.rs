//! Display implementations for page types.

use std::fmt;

use crate::calendar::{month_name, month_short_name, weekday_name};
use crate::document::PageDescriptor;
use crate::links::PageKind;

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl PageDescriptor {
    /// Short human readable title of the page.
    pub fn title(&self) -> String {
        let date = self.date;
        match self.kind {
            PageKind::YearOverview => format!("Year {}", date.year()),
            PageKind::MonthOverview => format!("{} {}", month_name(date.month()), date.year()),
            PageKind::WeekOverview | PageKind::WeekRetrospective => format!(
                "{} of {:02} {} {}",
                self.kind.label(),
                date.day(),
                month_short_name(date.month()),
                date.year()
            ),
            PageKind::Day => format!(
                "{} {:02} {}",
                weekday_name(date.weekday()),
                date.day(),
                month_short_name(date.month())
            ),
        }
    }
}

impl fmt::Display for PageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (`{}`)", self.title(), self.id)
    }
}
