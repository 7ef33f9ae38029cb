//! Page chrome: binding margins and header arrangement.
//!
//! Handedness only mirrors horizontal arrangement. It never reaches date or
//! link computation.

use serde::{Deserialize, Serialize};

use crate::config::{Handedness, Sidebar};

/// Margin reserved on the binding side when the sidebar is on, in points.
pub const SIDEBAR_WIDTH: f32 = 31.0;

/// Height of the page header, in points.
pub const HEADER_HEIGHT: f32 = 55.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlexDirection {
    Row,
    RowReverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Mirrored layout parameters shared by every page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chrome {
    pub padding_left: f32,
    pub padding_right: f32,
    pub header_height: f32,
    /// Order of header blocks (title, arrows, number)
    pub header_direction: FlexDirection,
    /// Alignment of the header subtitle
    pub subtitle_align: Side,
    /// Side of the header meta block carrying the divider line
    pub divider_side: Side,
    pub previous_arrow: char,
    pub next_arrow: char,
}

impl Chrome {
    pub fn new(handedness: Handedness, sidebar: Sidebar) -> Self {
        let sidebar_width = match sidebar {
            Sidebar::On => SIDEBAR_WIDTH,
            Sidebar::Off => 0.0,
        };
        let (padding_left, padding_right, header_direction, subtitle_align) = match handedness {
            Handedness::Right => (sidebar_width, 0.0, FlexDirection::Row, Side::Right),
            Handedness::Left => (0.0, sidebar_width, FlexDirection::RowReverse, Side::Left),
        };
        Self {
            padding_left,
            padding_right,
            header_height: HEADER_HEIGHT,
            header_direction,
            subtitle_align,
            divider_side: subtitle_align,
            previous_arrow: '«',
            next_arrow: '»',
        }
    }

    /// Whether horizontal arrangement is mirrored.
    pub fn is_mirrored(&self) -> bool {
        self.header_direction == FlexDirection::RowReverse
    }

    /// Usable width of a page of `page_width`.
    pub fn content_width(&self, page_width: f32) -> f32 {
        page_width - self.padding_left - self.padding_right
    }
}
