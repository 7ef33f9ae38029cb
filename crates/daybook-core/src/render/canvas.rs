//! Drawing primitives on top of lopdf content operations.
//!
//! Coordinates are given from the top-left corner of the page, the way
//! layout geometry is expressed, and flipped to PDF user space on emission.

use lopdf::content::{Content, Operation};
use lopdf::Object;

use crate::error::{PdfResultExt, Result};
use crate::links::PageId;

pub(crate) const FONT_REGULAR: &str = "F1";
pub(crate) const FONT_BOLD: &str = "F2";

/// Average Helvetica glyph advance relative to the font size.
const GLYPH_ADVANCE: f32 = 0.52;

/// A rectangle in top-left page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);

    /// Parses `#RRGGBB`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(hex.get(range)?, 16)
                .ok()
                .map(|value| f32::from(value) / 255.0)
        };
        Some(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    fn operands(self) -> Vec<Object> {
        vec![
            Object::Real(self.0),
            Object::Real(self.1),
            Object::Real(self.2),
        ]
    }
}

/// Horizontal anchor of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Right,
}

/// Encodes text for the standard fonts' WinAnsiEncoding.
pub(crate) fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '…' => 0x85,
            '•' => 0x95,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}

/// Estimated width of `text` at `size`.
pub(crate) fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * GLYPH_ADVANCE
}

/// Accumulates the content stream and link areas of one physical page.
pub(crate) struct Canvas {
    height: f32,
    operations: Vec<Operation>,
    links: Vec<(Rect, PageId)>,
}

impl Canvas {
    pub fn new(height: f32) -> Self {
        Self {
            height,
            operations: Vec::new(),
            links: Vec::new(),
        }
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    pub fn fill_color(&mut self, color: Rgb) {
        self.op("rg", color.operands());
    }

    pub fn stroke_color(&mut self, color: Rgb) {
        self.op("RG", color.operands());
    }

    /// Draws `text` with its baseline at `baseline` from the top. Returns
    /// the area covered by the run.
    pub fn text(
        &mut self,
        font: &str,
        size: f32,
        (x, baseline): (f32, f32),
        align: Align,
        text: &str,
    ) -> Rect {
        let width = text_width(text, size);
        let left = match align {
            Align::Left => x,
            Align::Right => x - width,
        };
        self.op("BT", vec![]);
        self.op(
            "Tf",
            vec![Object::Name(font.as_bytes().to_vec()), Object::Real(size)],
        );
        self.op(
            "Td",
            vec![Object::Real(left), Object::Real(self.height - baseline)],
        );
        self.op("Tj", vec![Object::string_literal(win_ansi(text))]);
        self.op("ET", vec![]);
        Rect::new(left, baseline - size, width, size * 1.25)
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), width: f32) {
        self.op("w", vec![Object::Real(width)]);
        self.op(
            "m",
            vec![Object::Real(from.0), Object::Real(self.height - from.1)],
        );
        self.op(
            "l",
            vec![Object::Real(to.0), Object::Real(self.height - to.1)],
        );
        self.op("S", vec![]);
    }

    pub fn fill_rect(&mut self, rect: Rect) {
        self.op(
            "re",
            vec![
                Object::Real(rect.x),
                Object::Real(self.height - rect.y - rect.height),
                Object::Real(rect.width),
                Object::Real(rect.height),
            ],
        );
        self.op("f", vec![]);
    }

    pub fn stroke_rect(&mut self, rect: Rect, width: f32) {
        self.op("w", vec![Object::Real(width)]);
        self.op(
            "re",
            vec![
                Object::Real(rect.x),
                Object::Real(self.height - rect.y - rect.height),
                Object::Real(rect.width),
                Object::Real(rect.height),
            ],
        );
        self.op("S", vec![]);
    }

    /// Registers a link area. Absent targets are ignored.
    pub fn link(&mut self, rect: Rect, target: Option<&PageId>) {
        if let Some(target) = target {
            self.links.push((rect, target.clone()));
        }
    }

    /// Link areas in PDF user space (`[x1, y1, x2, y2]`).
    pub fn link_areas(&self) -> impl Iterator<Item = ([f32; 4], &PageId)> + '_ {
        self.links.iter().map(|(rect, target)| {
            (
                [
                    rect.x,
                    self.height - rect.y - rect.height,
                    rect.x + rect.width,
                    self.height - rect.y,
                ],
                target,
            )
        })
    }

    /// Encodes the accumulated operations.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Content {
            operations: self.operations.clone(),
        }
        .encode()
        .pdf_context("Failed to encode page content")
    }
}
