//! Page tree of an enumerated document.

use std::fmt;

use crate::calendar::month_name;
use crate::document::Document;
use crate::links::PageKind;

/// Markdown outline of a document: page counts followed by every page,
/// grouped by year and month in document order.
pub struct DocumentOutline<'a> {
    document: &'a Document,
    show_days: bool,
}

impl<'a> DocumentOutline<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self {
            document,
            show_days: true,
        }
    }

    /// Whether day pages are listed. Counts always include them.
    pub fn with_days(mut self, show_days: bool) -> Self {
        self.show_days = show_days;
        self
    }

    fn count(&self, kind: PageKind) -> usize {
        self.document.pages_of(kind).count()
    }
}

impl fmt::Display for DocumentOutline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Planner Outline")?;
        writeln!(f)?;
        writeln!(f, "- Pages: {}", self.document.len())?;
        for (label, kind) in [
            ("Years", PageKind::YearOverview),
            ("Months", PageKind::MonthOverview),
            ("Weeks", PageKind::WeekOverview),
            ("Days", PageKind::Day),
            ("Retrospectives", PageKind::WeekRetrospective),
        ] {
            writeln!(f, "- {label}: {}", self.count(kind))?;
        }

        if self.document.is_empty() {
            return writeln!(f, "\nNo pages in this document.");
        }

        let mut current_month = None;
        let mut in_week = false;
        for page in self.document.pages() {
            if page.kind == PageKind::YearOverview {
                writeln!(f, "\n## {page}")?;
                continue;
            }

            if current_month != Some(page.month) {
                current_month = Some(page.month);
                in_week = false;
                if page.kind == PageKind::MonthOverview {
                    writeln!(f, "\n### {page}\n")?;
                    continue;
                }
                writeln!(
                    f,
                    "\n### {} {}\n",
                    month_name(page.month.month()),
                    page.month.year()
                )?;
            }

            match page.kind {
                PageKind::WeekOverview => {
                    in_week = true;
                    writeln!(f, "- {page}")?;
                }
                PageKind::WeekRetrospective => {
                    in_week = false;
                    writeln!(f, "- {page}")?;
                }
                PageKind::Day if self.show_days => {
                    let indent = if in_week { "  " } else { "" };
                    writeln!(f, "{indent}- {page}")?;
                }
                _ => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Configuration, document::enumerate_pages};

    fn january() -> Document {
        let mut config = Configuration::new(2024, 1);
        config.calendar_range.month_count = 1;
        config.is_week_retrospective_enabled = true;
        enumerate_pages(&config).unwrap()
    }

    #[test]
    fn test_outline_counts_and_tree() {
        let document = january();
        let output = DocumentOutline::new(&document).to_string();

        assert!(output.starts_with("# Planner Outline"));
        assert!(output.contains("- Pages: 43"));
        assert!(output.contains("- Weeks: 5"));
        assert!(output.contains("- Retrospectives: 5"));
        assert!(output.contains("## Year 2024 (`year-2024`)"));
        assert!(output.contains("### January 2024 (`month-2024-01`)"));
        assert!(output.contains("- Week of 01 Jan 2024 (`week-2024-w01`)"));
        assert!(output.contains("  - Monday 01 Jan (`day-2024-01-01`)"));
    }

    #[test]
    fn test_outline_without_days() {
        let document = january();
        let output = DocumentOutline::new(&document).with_days(false).to_string();
        assert!(output.contains("- Days: 31"));
        assert!(!output.contains("day-2024-01-01"));
    }

    #[test]
    fn test_outline_without_month_pages() {
        let mut config = Configuration::new(2024, 1);
        config.calendar_range.month_count = 1;
        config.is_month_overview_enabled = false;
        config.is_week_overview_enabled = false;
        let document = enumerate_pages(&config).unwrap();
        let output = DocumentOutline::new(&document).to_string();

        assert!(output.contains("### January 2024\n"));
        assert!(output.contains("\n- Monday 01 Jan (`day-2024-01-01`)"));
    }
}
