//! Dotted background grid.

use serde::{Deserialize, Serialize};

use crate::links::PageKind;

/// A rectangle of evenly spaced dots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DotGrid {
    pub start_x: f32,
    pub start_y: f32,
    pub width: f32,
    pub height: f32,
    pub dot_distance: f32,
    pub dot_radius: f32,
}

impl Default for DotGrid {
    fn default() -> Self {
        Self {
            start_x: 19.0,
            start_y: 14.0,
            width: 414.0,
            height: 432.0,
            dot_distance: 18.0,
            dot_radius: 1.0,
        }
    }
}

impl DotGrid {
    /// Grid placement for a page kind. Week overviews cover the whole page
    /// body behind their day cells.
    pub fn for_kind(kind: PageKind) -> Self {
        match kind {
            PageKind::WeekOverview => Self {
                start_x: 6.0,
                start_y: 8.0,
                width: 432.0,
                height: 576.0,
                ..Self::default()
            },
            _ => Self::default(),
        }
    }

    /// Number of dot rows.
    pub fn rows(&self) -> u32 {
        Self::count(self.height, self.dot_distance)
    }

    /// Number of dot columns.
    pub fn columns(&self) -> u32 {
        Self::count(self.width, self.dot_distance)
    }

    fn count(extent: f32, distance: f32) -> u32 {
        if distance <= 0.0 || extent < 0.0 {
            return 0;
        }
        // floor of a small positive ratio
        (extent / distance).floor() as u32 + 1
    }

    /// Dot centers relative to the page's top-left corner.
    pub fn dots(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        (0..self.columns()).flat_map(move |column| {
            (0..self.rows()).map(move |row| {
                (
                    self.start_x + column as f32 * self.dot_distance,
                    self.start_y + row as f32 * self.dot_distance,
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_counts() {
        let grid = DotGrid::default();
        // 414 / 18 = 23, 432 / 18 = 24, plus the closing edge
        assert_eq!(grid.columns(), 24);
        assert_eq!(grid.rows(), 25);
        assert_eq!(grid.dots().count(), 24 * 25);
    }

    #[test]
    fn test_week_grid_placement() {
        let grid = DotGrid::for_kind(PageKind::WeekOverview);
        assert_eq!(grid.start_x, 6.0);
        assert_eq!(grid.rows(), 33);
        let (x, y) = grid.dots().last().unwrap();
        assert_eq!(x, 6.0 + 24.0 * 18.0);
        assert_eq!(y, 8.0 + 32.0 * 18.0);
    }

    #[test]
    fn test_degenerate_grid() {
        let grid = DotGrid {
            dot_distance: 0.0,
            ..DotGrid::default()
        };
        assert_eq!(grid.dots().count(), 0);
    }
}
