//! PDF output.
//!
//! Each [`PageGeometry`] becomes one physical page per itinerary fragment.
//! The first physical page of every logical page is registered as a named
//! destination under the page id, and every resolved link becomes a link
//! annotation pointing at that name. The configuration the document was
//! generated from travels inside the file as an embedded `config.json`.

use log::debug;
use lopdf::{dictionary, Dictionary, Object, ObjectId, Stream};

use super::attachment::CONFIG_ATTACHMENT;
use super::canvas::{text_width, Align, Canvas, Rect, Rgb, FONT_BOLD, FONT_REGULAR};
use super::DocumentRenderer;
use crate::config::{Colors, Configuration};
use crate::document::Document;
use crate::error::{PdfResultExt, Result};
use crate::layout::{
    DotGrid, FlexDirection, Header, ItineraryFragment, ItineraryLine, MiniCalendar, PageContent,
    PageGeometry, Side, WeekDayCell, BODY_INSET, CALENDAR_GAP, HABIT_ROW_HEIGHT, ITINERARY_GAP,
    LINE_HEIGHT, MONTH_CALENDAR_CELL,
};

const PDF_VERSION: &str = "1.7";

/// Resolved palette.
#[derive(Debug, Clone, Copy)]
struct Palette {
    ink: Rgb,
    paper: Rgb,
    muted: Rgb,
    faint: Rgb,
}

impl Palette {
    fn new(colors: &Colors) -> Self {
        let parse = |hex: &str, fallback: Rgb| Rgb::from_hex(hex).unwrap_or(fallback);
        Self {
            ink: parse(&colors.basic1, Rgb::BLACK),
            paper: parse(&colors.basic2, Rgb(1.0, 1.0, 1.0)),
            muted: parse(&colors.accent1, Rgb(0.6, 0.6, 0.6)),
            faint: parse(&colors.accent2, Rgb(0.8, 0.8, 0.8)),
        }
    }
}

/// Renders documents with [`lopdf`] using the standard Helvetica faces.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    compress: bool,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self { compress: true }
    }

    /// Whether streams are Flate-compressed. On by default.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(
        &self,
        document: &Document,
        pages: &[PageGeometry],
        config: &Configuration,
    ) -> Result<Vec<u8>> {
        let palette = Palette::new(&config.colors);
        let mut pdf = lopdf::Document::with_version(PDF_VERSION);
        let pages_id = pdf.new_object_id();

        let font_regular = pdf.add_object(font(b"Helvetica"));
        let font_bold = pdf.add_object(font(b"Helvetica-Bold"));
        let resources_id = pdf.add_object(dictionary! {
            "Font" => dictionary! {
                FONT_REGULAR => font_regular,
                FONT_BOLD => font_bold,
            },
        });

        let mut kids = Vec::new();
        let mut destinations = Dictionary::new();
        for geometry in pages {
            for fragment in 0..geometry.content.fragment_count() {
                let canvas = draw_page(geometry, fragment, &palette);
                let page_id = add_page(&mut pdf, pages_id, geometry, &canvas, document)?;
                if fragment == 0 {
                    destinations.set(
                        geometry.id.as_str(),
                        Object::Array(vec![
                            Object::Reference(page_id),
                            Object::Name(b"Fit".to_vec()),
                        ]),
                    );
                }
                kids.push(Object::Reference(page_id));
            }
        }

        let count = i64::try_from(kids.len()).unwrap_or(i64::MAX);
        pdf.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => Object::Integer(count),
                "Resources" => resources_id,
            }),
        );

        let attachment = embed_json(&mut pdf, CONFIG_ATTACHMENT, serde_json::to_vec_pretty(config)?);
        let catalog_id = pdf.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
            "Dests" => destinations,
            "Names" => dictionary! {
                "EmbeddedFiles" => dictionary! {
                    "Names" => vec![Object::string_literal(CONFIG_ATTACHMENT), attachment.into()],
                },
            },
        });
        pdf.trailer.set("Root", catalog_id);

        let info_id = pdf.add_object(dictionary! {
            "Title" => Object::string_literal(format!(
                "Planner {}",
                config.calendar_range.year
            )),
            "Producer" => Object::string_literal(concat!("daybook ", env!("CARGO_PKG_VERSION"))),
        });
        pdf.trailer.set("Info", info_id);

        if self.compress {
            pdf.compress();
        }

        let mut bytes = Vec::new();
        pdf.save_to(&mut bytes)
            .map_err(lopdf::Error::from)
            .pdf_context("Failed to write PDF")?;
        debug!(
            "Rendered {} logical page(s) into {} byte(s)",
            pages.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}

fn font(base: &[u8]) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => Object::Name(base.to_vec()),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn add_page(
    pdf: &mut lopdf::Document,
    pages_id: ObjectId,
    geometry: &PageGeometry,
    canvas: &Canvas,
    document: &Document,
) -> Result<ObjectId> {
    let annotations: Vec<Object> = canvas
        .link_areas()
        .filter(|(_, target)| document.contains(target))
        .map(|(rect, target)| {
            pdf.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Link",
                "Rect" => rect.iter().map(|&v| Object::Real(v)).collect::<Vec<_>>(),
                "Border" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(0)],
                "Dest" => Object::Name(target.as_str().as_bytes().to_vec()),
            })
            .into()
        })
        .collect();

    let content_id = pdf.add_object(Stream::new(Dictionary::new(), canvas.encode()?));
    let [width, height] = geometry.page_size;
    Ok(pdf.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width),
            Object::Real(height),
        ],
        "Contents" => content_id,
        "Annots" => annotations,
    }))
}

fn embed_json(pdf: &mut lopdf::Document, name: &str, bytes: Vec<u8>) -> ObjectId {
    let size = i64::try_from(bytes.len()).unwrap_or(i64::MAX);
    let file_id = pdf.add_object(Stream::new(
        dictionary! {
            "Type" => "EmbeddedFile",
            "Params" => dictionary! { "Size" => Object::Integer(size) },
        },
        bytes,
    ));
    pdf.add_object(dictionary! {
        "Type" => "Filespec",
        "F" => Object::string_literal(name),
        "UF" => Object::string_literal(name),
        "EF" => dictionary! { "F" => file_id },
        "Desc" => Object::string_literal("Planner configuration"),
    })
}

/// Draws physical page `fragment` of a logical page.
fn draw_page(geometry: &PageGeometry, fragment: usize, palette: &Palette) -> Canvas {
    let [width, height] = geometry.page_size;
    let mut canvas = Canvas::new(height);
    let left = geometry.chrome.padding_left;
    let right = width - geometry.chrome.padding_right;
    let body_top = geometry.chrome.header_height;

    canvas.fill_color(palette.paper);
    canvas.fill_rect(Rect::new(0.0, 0.0, width, height));

    draw_grid(&mut canvas, &geometry.grid, left, body_top, palette);
    draw_header(&mut canvas, geometry, left, right, palette);

    let body = Rect::new(
        left + BODY_INSET,
        body_top + BODY_INSET,
        right - left - 2.0 * BODY_INSET,
        height - body_top - 2.0 * BODY_INSET,
    );
    match &geometry.content {
        PageContent::YearOverview { months } => draw_year(&mut canvas, months, body, palette),
        PageContent::MonthOverview {
            habits,
            day_count,
            itinerary,
        } => {
            let area = if fragment == 0 {
                let mut top = body.y;
                if let Some(calendar) = &geometry.calendar {
                    let origin = (body.x, top);
                    top += draw_calendar(&mut canvas, calendar, origin, MONTH_CALENDAR_CELL, palette)
                        + CALENDAR_GAP;
                }
                top = draw_habits(&mut canvas, habits, *day_count, Rect { y: top, ..body }, palette);
                let top = top + ITINERARY_GAP;
                Rect {
                    y: top,
                    height: (body.y + body.height - top).max(0.0),
                    ..body
                }
            } else {
                body
            };
            if let Some(fragment) = itinerary.fragments.get(fragment) {
                draw_itinerary(&mut canvas, fragment, area, palette);
            }
        }
        PageContent::WeekOverview { days, todos } => {
            draw_week(&mut canvas, days, todos, body, palette);
        }
        PageContent::Day { itinerary } => {
            let area = beside_calendar(&mut canvas, geometry, body, palette);
            if let Some(fragment) = itinerary.as_ref().and_then(|i| i.fragments.get(fragment)) {
                draw_itinerary(&mut canvas, fragment, area, palette);
            }
        }
        PageContent::WeekRetrospective { itinerary } => {
            let area = beside_calendar(&mut canvas, geometry, body, palette);
            if let Some(fragment) = itinerary.fragments.get(fragment) {
                draw_itinerary(&mut canvas, fragment, area, palette);
            }
        }
    }

    canvas
}

/// Draws the page's calendar in the top corner away from the binding and
/// returns the area left for the itinerary.
fn beside_calendar(canvas: &mut Canvas, geometry: &PageGeometry, body: Rect, palette: &Palette) -> Rect {
    const CELL: f32 = 10.0;
    let Some(calendar) = &geometry.calendar else {
        return body;
    };
    let calendar_width = calendar_columns(calendar) * CELL;
    let (x, itinerary_x) = if geometry.chrome.is_mirrored() {
        (body.x, body.x + calendar_width + 12.0)
    } else {
        (body.x + body.width - calendar_width, body.x)
    };
    draw_calendar(canvas, calendar, (x, body.y), CELL, palette);
    Rect::new(itinerary_x, body.y, body.width - calendar_width - 12.0, body.height)
}

fn draw_grid(canvas: &mut Canvas, grid: &DotGrid, left: f32, top: f32, palette: &Palette) {
    canvas.fill_color(palette.faint);
    let size = grid.dot_radius * 2.0;
    for (x, y) in grid.dots() {
        canvas.fill_rect(Rect::new(
            left + x - grid.dot_radius,
            top + y - grid.dot_radius,
            size,
            size,
        ));
    }
}

fn draw_header(canvas: &mut Canvas, geometry: &PageGeometry, left: f32, right: f32, palette: &Palette) {
    let header: &Header = &geometry.header;
    let chrome = &geometry.chrome;
    let height = chrome.header_height;
    let (title_x, title_align, number_x, number_align) = match chrome.header_direction {
        FlexDirection::Row => (left + 10.0, Align::Left, right - 10.0, Align::Right),
        FlexDirection::RowReverse => (right - 10.0, Align::Right, left + 10.0, Align::Left),
    };

    canvas.fill_color(palette.ink);
    let title = canvas.text(FONT_BOLD, 14.0, (title_x, 24.0), title_align, &header.title);
    canvas.link(title, header.title_link.as_ref());

    let number = canvas.text(FONT_BOLD, 24.0, (number_x, 38.0), number_align, &header.number);

    // Arrows sit on the inner side of the number
    let arrow_gap = number.width + 8.0;
    let (previous_x, next_x, arrow_align) = match number_align {
        Align::Right => (number_x - arrow_gap - 16.0, number_x - arrow_gap, Align::Right),
        Align::Left => (number_x + arrow_gap, number_x + arrow_gap + 16.0, Align::Left),
    };
    canvas.fill_color(palette.muted);
    let previous = canvas.text(
        FONT_REGULAR,
        14.0,
        (previous_x, 36.0),
        arrow_align,
        &chrome.previous_arrow.to_string(),
    );
    canvas.link(previous, header.previous_link.as_ref());
    let next = canvas.text(
        FONT_REGULAR,
        14.0,
        (next_x, 36.0),
        arrow_align,
        &chrome.next_arrow.to_string(),
    );
    canvas.link(next, header.next_link.as_ref());

    let (subtitle_x, subtitle_align) = match chrome.subtitle_align {
        Side::Left => (left + 10.0, Align::Left),
        Side::Right => (right - 10.0, Align::Right),
    };
    let subtitle_y = if header.is_special { 44.0 } else { 50.0 };
    canvas.text(FONT_REGULAR, 8.0, (subtitle_x, subtitle_y), subtitle_align, &header.subtitle);
    if header.is_special {
        // Unlabeled special dates still get the bullet
        let marker = if header.special_items.is_empty() {
            "•".to_string()
        } else {
            format!("• {}", header.special_items.join(" • "))
        };
        canvas.fill_color(palette.ink);
        canvas.text(FONT_BOLD, 7.0, (subtitle_x, 52.0), subtitle_align, &marker);
    }

    canvas.stroke_color(palette.ink);
    canvas.line((left, height), (right, height), 1.0);
    let divider_x = match chrome.divider_side {
        Side::Left => number.x - 6.0,
        Side::Right => number.x + number.width + 6.0,
    };
    if matches!(
        (chrome.divider_side, number_align),
        (Side::Left, Align::Right) | (Side::Right, Align::Left)
    ) {
        canvas.line((divider_x, 8.0), (divider_x, height - 8.0), 0.5);
    }
}

fn calendar_columns(calendar: &MiniCalendar) -> f32 {
    if calendar.shows_retrospective {
        9.0
    } else {
        8.0
    }
}

/// Draws a mini-calendar with its top-left corner at `origin` and returns
/// its height.
fn draw_calendar(
    canvas: &mut Canvas,
    calendar: &MiniCalendar,
    (x, y): (f32, f32),
    cell: f32,
    palette: &Palette,
) -> f32 {
    let size = cell * 0.6;
    let baseline = |row: f32| y + cell * (row + 0.75);

    canvas.fill_color(palette.ink);
    let title = canvas.text(FONT_BOLD, size * 1.2, (x, baseline(0.0)), Align::Left, &calendar.title);
    canvas.link(title, calendar.month_link.as_ref());
    let year = canvas.text(
        FONT_REGULAR,
        size,
        (x + title.width + cell * 0.5, baseline(0.0)),
        Align::Left,
        &calendar.month.year().to_string(),
    );
    canvas.link(year, calendar.year_link.as_ref());

    let right = x + calendar_columns(calendar) * cell;
    canvas.fill_color(palette.muted);
    let next = canvas.text(FONT_REGULAR, size, (right, baseline(0.0)), Align::Right, "»");
    canvas.link(next, calendar.next_month_link.as_ref());
    let previous = canvas.text(FONT_REGULAR, size, (right - cell, baseline(0.0)), Align::Right, "«");
    canvas.link(previous, calendar.previous_month_link.as_ref());

    for (column, weekday) in calendar.weekdays.iter().enumerate() {
        let column_x = x + cell * (column as f32 + 1.0);
        canvas.text(FONT_REGULAR, size, (column_x, baseline(1.0)), Align::Left, weekday);
    }

    for (row, week) in calendar.weeks.iter().enumerate() {
        let row_y = baseline(row as f32 + 2.0);
        let row_top = y + cell * (row as f32 + 2.0);

        canvas.fill_color(palette.muted);
        let number = canvas.text(FONT_REGULAR, size, (x, row_y), Align::Left, &week.number.to_string());
        canvas.link(number, week.link.as_ref());

        for (column, day) in week.days.iter().enumerate() {
            let cell_rect = Rect::new(x + cell * (column as f32 + 1.0), row_top, cell, cell);
            if day.is_highlighted {
                canvas.fill_color(palette.faint);
                canvas.fill_rect(cell_rect);
            }
            let color = if day.is_other_month { palette.muted } else { palette.ink };
            canvas.fill_color(color);
            let font = if day.is_weekend { FONT_BOLD } else { FONT_REGULAR };
            canvas.text(font, size, (cell_rect.x, row_y), Align::Left, &day.date.day().to_string());
            if day.is_special {
                canvas.fill_rect(Rect::new(cell_rect.x, row_top + cell * 0.9, cell * 0.6, 0.6));
            }
            canvas.link(cell_rect, day.link.as_ref());
        }

        if calendar.shows_retrospective {
            canvas.fill_color(palette.muted);
            let marker = canvas.text(FONT_REGULAR, size, (x + cell * 8.0, row_y), Align::Left, "R");
            canvas.link(marker, week.retrospective_link.as_ref());
        }
    }

    cell * (calendar.weeks.len() as f32 + 2.0)
}

fn draw_year(canvas: &mut Canvas, months: &[MiniCalendar], body: Rect, palette: &Palette) {
    const COLUMNS: usize = 3;
    let cell = body.width / (COLUMNS as f32 * 9.5);
    let row_height = cell * 8.5;
    for (index, calendar) in months.iter().enumerate() {
        let column = (index % COLUMNS) as f32;
        let row = (index / COLUMNS) as f32;
        draw_calendar(
            canvas,
            calendar,
            (body.x + column * cell * 9.5, body.y + row * row_height),
            cell,
            palette,
        );
    }
}

/// Draws one tracker row per habit and returns the bottom of the tracker.
fn draw_habits(canvas: &mut Canvas, habits: &[String], day_count: i8, area: Rect, palette: &Palette) -> f32 {
    const LABEL_WIDTH: f32 = 80.0;
    if habits.is_empty() || day_count <= 0 {
        return area.y;
    }
    let days = f32::from(day_count);
    let box_size = ((area.width - LABEL_WIDTH) / days).min(HABIT_ROW_HEIGHT - 4.0);

    let mut top = area.y;
    for habit in habits {
        canvas.fill_color(palette.ink);
        canvas.text(FONT_REGULAR, 8.0, (area.x, top + 8.0), Align::Left, habit);
        canvas.stroke_color(palette.muted);
        for day in 0..day_count {
            let x = area.x + LABEL_WIDTH + f32::from(day) * box_size;
            canvas.stroke_rect(Rect::new(x, top, box_size, box_size), 0.3);
        }
        top += HABIT_ROW_HEIGHT;
    }
    top
}

fn draw_week(canvas: &mut Canvas, days: &[WeekDayCell], todos: &[String], body: Rect, palette: &Palette) {
    // Seven day cells plus the todo cell in a two-column grid
    let cell_width = body.width / 2.0;
    let cell_height = body.height / 4.0;
    for (index, day) in days.iter().enumerate() {
        let cell = Rect::new(
            body.x + (index % 2) as f32 * cell_width,
            body.y + (index / 2) as f32 * cell_height,
            cell_width,
            cell_height,
        );
        canvas.stroke_color(palette.faint);
        canvas.stroke_rect(cell, 0.5);

        canvas.fill_color(if day.is_weekend { palette.muted } else { palette.ink });
        let label = canvas.text(
            FONT_BOLD,
            9.0,
            (cell.x + 4.0, cell.y + 12.0),
            Align::Left,
            &format!("{} {}", day.weekday, day.short_date),
        );
        canvas.link(label, day.link.as_ref());
        if day.is_special {
            canvas.fill_rect(Rect::new(label.x, label.y + label.height + 1.0, label.width, 0.8));
        }

        canvas.fill_color(palette.ink);
        for (line, item) in day.special_items.iter().enumerate() {
            canvas.text(
                FONT_REGULAR,
                7.0,
                (cell.x + 4.0, cell.y + 22.0 + line as f32 * 8.0),
                Align::Left,
                item,
            );
        }
    }

    let todo_cell = Rect::new(body.x + cell_width, body.y + 3.0 * cell_height, cell_width, cell_height);
    canvas.fill_color(palette.ink);
    canvas.text(FONT_BOLD, 9.0, (todo_cell.x + 4.0, todo_cell.y + 12.0), Align::Left, "To do");
    for (line, todo) in todos.iter().enumerate() {
        let top = todo_cell.y + 24.0 + line as f32 * 10.0;
        if top > todo_cell.y + todo_cell.height {
            break;
        }
        canvas.text(FONT_REGULAR, 8.0, (todo_cell.x + 4.0, top), Align::Left, &format!("[ ] {todo}"));
    }
}

/// Draws ruled itinerary lines. Layout sizes fragments to fit `area`.
fn draw_itinerary(canvas: &mut Canvas, fragment: &ItineraryFragment, area: Rect, palette: &Palette) {
    // Rounding slack between layout and drawing arithmetic
    let bottom = area.y + area.height + 0.5;
    for (index, line) in fragment.lines.iter().enumerate() {
        let rule = area.y + (index as f32 + 1.0) * LINE_HEIGHT;
        if rule > bottom {
            break;
        }
        canvas.stroke_color(palette.faint);
        canvas.line((area.x, rule), (area.x + area.width, rule), 0.5);
        if let ItineraryLine::Labeled(text) = line {
            canvas.fill_color(palette.ink);
            let size = if text_width(text, 9.0) > area.width { 7.0 } else { 9.0 };
            canvas.text(FONT_REGULAR, size, (area.x + 2.0, rule - 5.0), Align::Left, text);
        }
    }
}
