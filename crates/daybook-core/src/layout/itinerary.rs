//! Sequential layout of itinerary directives.

use serde::{Deserialize, Serialize};

use crate::config::ItineraryDirective;

/// Vertical space taken by one itinerary line, in points.
pub const LINE_HEIGHT: f32 = 20.0;

/// One rendered line of an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "text")]
pub enum ItineraryLine {
    /// A ruled line carrying a label
    Labeled(String),
    /// An empty ruled line
    Blank,
}

/// A run of lines laid out on one page or column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryFragment {
    pub lines: Vec<ItineraryLine>,
    /// Accumulated vertical space of `lines`
    pub height: f32,
}

impl ItineraryFragment {
    fn push(&mut self, line: ItineraryLine) {
        self.lines.push(line);
        self.height += LINE_HEIGHT;
    }
}

/// Laid out itinerary: one fragment per physical page.
///
/// Fragments break at `NEW_PAGE` and wherever the next line would overflow
/// the page. There is always at least one fragment, which is empty for an
/// empty itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryLayout {
    pub fragments: Vec<ItineraryFragment>,
}

impl ItineraryLayout {
    /// Total number of lines across fragments.
    pub fn line_count(&self) -> usize {
        self.fragments.iter().map(|f| f.lines.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.line_count() == 0
    }
}

/// Vertical space available to an itinerary, in points.
///
/// The first page may share its body with other content; continuation pages
/// get the whole body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItinerarySpace {
    pub first: f32,
    pub rest: f32,
}

impl ItinerarySpace {
    /// The same space on every page.
    pub fn uniform(height: f32) -> Self {
        Self {
            first: height,
            rest: height,
        }
    }

    fn limit(&self, fragment: usize) -> f32 {
        if fragment == 0 {
            self.first
        } else {
            self.rest
        }
    }
}

/// Walks `directives` in order, accumulating lines into fragments that fit
/// `space`.
///
/// A fragment always takes at least one line, so a page too short for a
/// single line still makes progress.
pub fn layout_itinerary(
    directives: &[ItineraryDirective],
    space: ItinerarySpace,
) -> ItineraryLayout {
    let mut fragments = vec![ItineraryFragment::default()];

    for directive in directives {
        match directive {
            ItineraryDirective::Item(text) => {
                push_line(&mut fragments, ItineraryLine::Labeled(text.clone()), space);
            }
            ItineraryDirective::Lines(count) => {
                for _ in 0..*count {
                    push_line(&mut fragments, ItineraryLine::Blank, space);
                }
            }
            ItineraryDirective::NewPage => fragments.push(ItineraryFragment::default()),
        }
    }

    ItineraryLayout { fragments }
}

fn push_line(
    fragments: &mut Vec<ItineraryFragment>,
    line: ItineraryLine,
    space: ItinerarySpace,
) {
    let index = fragments.len().saturating_sub(1);
    let overflows = fragments.last().is_some_and(|fragment| {
        !fragment.lines.is_empty() && fragment.height + LINE_HEIGHT > space.limit(index)
    });
    if overflows || fragments.is_empty() {
        fragments.push(ItineraryFragment::default());
    }
    if let Some(fragment) = fragments.last_mut() {
        fragment.push(line);
    }
}
