mod common;

use std::collections::{BTreeMap, HashSet};

use daybook_core::{
    calendar::week_start,
    config::Template,
    derive_document_geometry, enumerate_pages,
    layout::{layout_itinerary, ItineraryLine, ItinerarySpace, PageContent, LINE_HEIGHT},
    migrate, Configuration, ItineraryDirective, PageKind,
};
use jiff::civil::{date, Weekday};

use common::range_config;

#[test]
fn test_single_january_page_counts() {
    for year in 2020..2031 {
        let config = range_config(year, 1, 1);
        let document = enumerate_pages(&config).expect("Failed to enumerate");

        let week_rows: HashSet<_> = (1..=31)
            .map(|day| week_start(date(year, 1, day), Weekday::Monday).unwrap())
            .collect();

        assert_eq!(document.pages_of(PageKind::YearOverview).count(), 1);
        assert_eq!(document.pages_of(PageKind::MonthOverview).count(), 1);
        assert_eq!(
            document.pages_of(PageKind::WeekOverview).count(),
            week_rows.len(),
            "weeks of January {year}"
        );
        assert_eq!(document.pages_of(PageKind::Day).count(), 31);
    }
}

#[test]
fn test_blank_template_keeps_empty_day_pages() {
    let config = Template::Blank.apply(range_config(2024, 2, 1));
    assert!(config.day_itineraries.iter().all(|day| day.items.is_empty()));

    let document = enumerate_pages(&config).expect("Failed to enumerate");
    let geometry = derive_document_geometry(&document, &config).expect("Failed to derive");
    let days: Vec<_> = geometry
        .iter()
        .filter(|page| page.kind == PageKind::Day)
        .collect();

    assert_eq!(days.len(), 29);
    for day in days {
        let PageContent::Day { itinerary } = &day.content else {
            panic!("day page without day content");
        };
        assert_eq!(itinerary.as_ref().map(|i| i.line_count()), Some(0));
    }
}

#[test]
fn test_special_dates_in_every_enumerated_year() {
    let mut config = range_config(2024, 11, 26);
    config.special_dates = BTreeMap::from([("25-12".to_string(), vec!["Holiday".to_string()])]);
    let document = enumerate_pages(&config).expect("Failed to enumerate");
    let geometry = derive_document_geometry(&document, &config).expect("Failed to derive");

    let marked: Vec<_> = geometry
        .iter()
        .filter(|page| page.kind == PageKind::Day && !page.header.special_items.is_empty())
        .map(|page| page.id.to_string())
        .collect();
    assert_eq!(marked, vec!["day-2024-12-25", "day-2025-12-25", "day-2026-12-25"]);
    assert!(!document.pages().iter().any(|page| page.date == date(2027, 12, 25)));

    for page in geometry.iter().filter(|page| marked.contains(&page.id.to_string())) {
        assert_eq!(page.header.special_items, vec!["Holiday".to_string()]);
    }
}

#[test]
fn test_directive_layout_with_page_break() {
    let directives = [
        ItineraryDirective::item("08:00"),
        ItineraryDirective::Lines(2),
        ItineraryDirective::NewPage,
        ItineraryDirective::item("Monday"),
        ItineraryDirective::Lines(50),
    ];
    let layout = layout_itinerary(&directives, ItinerarySpace::uniform(100.0 * LINE_HEIGHT));

    assert_eq!(layout.fragments.len(), 2);
    assert_eq!(layout.fragments[0].lines.len(), 3);
    assert_eq!(
        layout.fragments[1].lines.first(),
        Some(&ItineraryLine::Labeled("Monday".to_string()))
    );
    assert_eq!(
        layout.fragments[1]
            .lines
            .iter()
            .filter(|line| **line == ItineraryLine::Blank)
            .count(),
        50
    );

    // On a page with room for 20 lines the planning page spills over
    let layout = layout_itinerary(&directives, ItinerarySpace::uniform(20.0 * LINE_HEIGHT));
    let lengths: Vec<_> = layout.fragments.iter().map(|f| f.lines.len()).collect();
    assert_eq!(lengths, vec![3, 20, 20, 11]);
}

#[test]
fn test_migration_is_idempotent() {
    let config = Template::Advanced.apply(Configuration::new(2025, 0));
    let raw = serde_json::to_value(&config).expect("Failed to serialize");

    let once = migrate(raw).expect("Failed to migrate");
    assert_eq!(once, config);

    let twice = migrate(serde_json::to_value(&once).expect("Failed to serialize"))
        .expect("Failed to migrate");
    assert_eq!(twice, once);
}
