//! The logical page sequence of a planner.
//!
//! [`enumerate_pages`] walks the configured calendar range and produces the
//! ordered list of [`PageDescriptor`]s making up one document, with every
//! cross-page link already resolved through the [`LinkResolver`]. The
//! sequence is a pure function of the configuration: enumerating twice
//! yields identical pages and ids.
//!
//! # Page Order
//!
//! ```text
//! YEAR_OVERVIEW                 (once per year, before its first month)
//! └─ MONTH_OVERVIEW             (per month, if enabled)
//!    └─ per week intersecting the month:
//!       WEEK_OVERVIEW           (first time the week is reached, if enabled)
//!       DAY …                   (days of that week inside the month)
//!       WEEK_RETROSPECTIVE      (first time the week is reached, if enabled)
//! ```
//!
//! A week that straddles two months is attributed to the first month whose
//! iteration reaches it, which is the month holding the week's first day
//! whenever that month is part of the range.

mod enumerate;

#[cfg(test)]
mod tests;

use std::collections::HashSet;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::links::{LinkResolver, PageId, PageKind};

pub use enumerate::enumerate_pages;

/// Resolved navigation targets of a page.
///
/// A link is `None` when its target page is not part of the document, for
/// example the previous day of the first enumerated day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLinks {
    pub previous: Option<PageId>,
    pub next: Option<PageId>,
    pub parent_year: Option<PageId>,
    pub parent_month: Option<PageId>,
    pub parent_week: Option<PageId>,
}

impl PageLinks {
    /// Drops every link whose target is not in `ids`.
    fn retain_existing(&mut self, ids: &HashSet<PageId>) {
        for link in [
            &mut self.previous,
            &mut self.next,
            &mut self.parent_year,
            &mut self.parent_month,
            &mut self.parent_week,
        ] {
            if link.as_ref().is_some_and(|id| !ids.contains(id)) {
                *link = None;
            }
        }
    }

    /// All present links.
    pub fn iter(&self) -> impl Iterator<Item = &PageId> {
        [
            &self.previous,
            &self.next,
            &self.parent_year,
            &self.parent_month,
            &self.parent_week,
        ]
        .into_iter()
        .flatten()
    }
}

/// One logical page of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    pub kind: PageKind,
    /// Anchor date: the day itself, the first day of the week, month or year
    pub date: Date,
    /// First day of the month this page was enumerated under
    pub month: Date,
    pub id: PageId,
    pub links: PageLinks,
}

/// An enumerated document: the ordered pages plus the set of their ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pages: Vec<PageDescriptor>,
    ids: HashSet<PageId>,
    resolver: LinkResolver,
}

impl Document {
    /// Builds a document from raw pages, dropping links to absent pages.
    pub(crate) fn new(mut pages: Vec<PageDescriptor>, resolver: LinkResolver) -> Self {
        let ids: HashSet<PageId> = pages.iter().map(|page| page.id.clone()).collect();
        for page in &mut pages {
            page.links.retain_existing(&ids);
        }
        Self {
            pages,
            ids,
            resolver,
        }
    }

    /// Pages in document order.
    pub fn pages(&self) -> &[PageDescriptor] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Whether a page with this id is part of the document.
    pub fn contains(&self, id: &PageId) -> bool {
        self.ids.contains(id)
    }

    /// Resolver the page ids were produced with.
    pub fn resolver(&self) -> &LinkResolver {
        &self.resolver
    }

    /// Resolves the page of `kind` containing `date`, if it is part of the
    /// document.
    ///
    /// # Errors
    ///
    /// Returns `DaybookError::Date` if resolving the week of `date`
    /// overflows the supported calendar.
    pub fn link(&self, kind: PageKind, date: Date) -> Result<Option<PageId>> {
        let id = self.resolver.resolve(kind, date)?;
        Ok(self.ids.contains(&id).then_some(id))
    }

    /// Pages of one kind, in document order.
    pub fn pages_of(&self, kind: PageKind) -> impl Iterator<Item = &PageDescriptor> {
        self.pages.iter().filter(move |page| page.kind == kind)
    }

    /// Looks a page up by id.
    pub fn page(&self, id: &PageId) -> Option<&PageDescriptor> {
        self.pages.iter().find(|page| &page.id == id)
    }
}
