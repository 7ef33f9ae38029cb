#[cfg(test)]
mod enumeration_tests {
    use std::collections::{HashMap, HashSet};

    use jiff::civil::date;

    use crate::{
        calendar::week_number,
        config::Configuration,
        document::enumerate_pages,
        error::DaybookError,
        links::PageKind,
    };

    fn january(year: i16, first_day: u8) -> Configuration {
        let mut config = Configuration::new(year, first_day);
        config.calendar_range.month_count = 1;
        config
    }

    fn count(document: &crate::document::Document, kind: PageKind) -> usize {
        document.pages_of(kind).count()
    }

    #[test]
    fn test_single_january_monday_start() {
        // January 2024 starts on a Monday: weeks 1..=5
        let document = enumerate_pages(&january(2024, 1)).unwrap();
        assert_eq!(count(&document, PageKind::YearOverview), 1);
        assert_eq!(count(&document, PageKind::MonthOverview), 1);
        assert_eq!(count(&document, PageKind::WeekOverview), 5);
        assert_eq!(count(&document, PageKind::Day), 31);
        assert_eq!(count(&document, PageKind::WeekRetrospective), 0);
    }

    #[test]
    fn test_single_february_week_count() {
        // February 2027 starts on a Monday and has exactly four weeks
        let mut config = january(2027, 1);
        config.calendar_range.month = 1;
        let document = enumerate_pages(&config).unwrap();
        assert_eq!(count(&document, PageKind::WeekOverview), 4);
        assert_eq!(count(&document, PageKind::Day), 28);
    }

    #[test]
    fn test_page_order() {
        let document = enumerate_pages(&january(2024, 1)).unwrap();
        let kinds: Vec<_> = document.pages().iter().take(10).map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PageKind::YearOverview,
                PageKind::MonthOverview,
                PageKind::WeekOverview,
                PageKind::Day,
                PageKind::Day,
                PageKind::Day,
                PageKind::Day,
                PageKind::Day,
                PageKind::Day,
                PageKind::Day,
            ]
        );
        assert_eq!(document.pages()[3].date, date(2024, 1, 1));
        assert_eq!(document.pages()[10].kind, PageKind::WeekOverview);
    }

    #[test]
    fn test_retrospective_follows_week_days() {
        let mut config = january(2024, 1);
        config.is_week_retrospective_enabled = true;
        let document = enumerate_pages(&config).unwrap();
        let pages = document.pages();
        // year, month, week, 7 days, retrospective
        assert_eq!(pages[10].kind, PageKind::WeekRetrospective);
        assert_eq!(pages[10].date, date(2024, 1, 1));
        assert_eq!(
            pages[10].links.parent_week.as_ref(),
            Some(&pages[2].id)
        );
        assert_eq!(count(&document, PageKind::WeekRetrospective), 5);
    }

    #[test]
    fn test_shared_week_emitted_once_across_year_boundary() {
        let mut config = Configuration::new(2024, 1);
        config.calendar_range.month = 6;
        config.calendar_range.month_count = 12;
        config.is_week_retrospective_enabled = true;
        let document = enumerate_pages(&config).unwrap();

        let weeks: Vec<_> = document.pages_of(PageKind::WeekOverview).collect();
        let unique: HashSet<_> = weeks.iter().map(|p| &p.id).collect();
        assert_eq!(weeks.len(), unique.len());

        // Mon 2024-12-30 .. Sun 2025-01-05 is attributed to December
        let shared = weeks
            .iter()
            .find(|p| p.date == date(2024, 12, 30))
            .unwrap();
        assert_eq!(shared.month, date(2024, 12, 1));
        assert_eq!(shared.id.as_str(), "week-2025-w01");

        let retros: HashSet<_> = document
            .pages_of(PageKind::WeekRetrospective)
            .map(|p| &p.id)
            .collect();
        assert_eq!(retros.len(), weeks.len());
    }

    #[test]
    fn test_first_month_owns_week_started_before_range() {
        // 2024-03-01 is a Friday; its week starts in February
        let mut config = january(2024, 1);
        config.calendar_range.month = 2;
        let document = enumerate_pages(&config).unwrap();
        let first_week = document.pages_of(PageKind::WeekOverview).next().unwrap();
        assert_eq!(first_week.date, date(2024, 2, 26));
        assert_eq!(first_week.month, date(2024, 3, 1));
        assert_eq!(
            first_week.links.parent_month.as_ref().map(|id| id.as_str()),
            Some("month-2024-03")
        );
        // February days are never enumerated
        assert!(document
            .pages_of(PageKind::Day)
            .all(|p| p.date.month() == 3));
    }

    #[test]
    fn test_every_day_of_range_enumerated_once() {
        let mut config = Configuration::new(2023, 0);
        config.calendar_range.month = 9;
        config.calendar_range.month_count = 6;
        let document = enumerate_pages(&config).unwrap();
        let days: Vec<_> = document.pages_of(PageKind::Day).map(|p| p.date).collect();
        // Oct 2023 .. Mar 2024 inclusive
        assert_eq!(days.len(), 31 + 30 + 31 + 31 + 29 + 31);
        assert!(days.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_year_overview_per_year() {
        let mut config = Configuration::new(2024, 1);
        config.calendar_range.month = 11;
        config.calendar_range.month_count = 14;
        let document = enumerate_pages(&config).unwrap();
        let years: Vec<_> = document
            .pages_of(PageKind::YearOverview)
            .map(|p| p.id.as_str().to_string())
            .collect();
        assert_eq!(years, vec!["year-2024", "year-2025", "year-2026"]);
        let first_year = document.pages_of(PageKind::YearOverview).next().unwrap();
        assert_eq!(
            first_year.links.next.as_ref().map(|id| id.as_str()),
            Some("year-2025")
        );
        assert_eq!(first_year.links.previous, None);
    }

    #[test]
    fn test_sections_toggle_independently() {
        let mut config = january(2024, 1);
        config.is_month_overview_enabled = false;
        config.is_week_overview_enabled = false;
        let document = enumerate_pages(&config).unwrap();
        assert_eq!(count(&document, PageKind::MonthOverview), 0);
        assert_eq!(count(&document, PageKind::WeekOverview), 0);
        assert_eq!(count(&document, PageKind::Day), 31);
        let day = document.pages_of(PageKind::Day).next().unwrap();
        assert_eq!(day.links.parent_week, None);
        assert_eq!(day.links.parent_month, None);
        assert!(day.links.parent_year.is_some());
    }

    #[test]
    fn test_disabled_itineraries_keep_day_pages() {
        let mut config = january(2024, 1);
        for itinerary in &mut config.day_itineraries {
            itinerary.is_enabled = false;
        }
        let document = enumerate_pages(&config).unwrap();
        assert_eq!(count(&document, PageKind::Day), 31);
    }

    #[test]
    fn test_enumeration_is_deterministic() {
        let mut config = Configuration::new(2025, 0);
        config.is_week_retrospective_enabled = true;
        let first = enumerate_pages(&config).unwrap();
        let second = enumerate_pages(&config).unwrap();
        assert_eq!(first.pages(), second.pages());
    }

    #[test]
    fn test_ids_unique_within_document() {
        let mut config = Configuration::new(2025, 0);
        config.is_week_retrospective_enabled = true;
        let document = enumerate_pages(&config).unwrap();
        let ids: HashSet<_> = document.pages().iter().map(|p| &p.id).collect();
        assert_eq!(ids.len(), document.len());
    }

    #[test]
    fn test_links_never_dangle() {
        let mut config = Configuration::new(2024, 6);
        config.is_week_retrospective_enabled = true;
        config.calendar_range.month = 3;
        config.calendar_range.month_count = 5;
        let document = enumerate_pages(&config).unwrap();
        for page in document.pages() {
            for link in page.links.iter() {
                assert!(document.contains(link), "{} links to missing {}", page.id, link);
            }
        }
    }

    #[test]
    fn test_day_neighbours() {
        let document = enumerate_pages(&january(2024, 1)).unwrap();
        let days: Vec<_> = document.pages_of(PageKind::Day).collect();
        assert_eq!(days[0].links.previous, None);
        assert_eq!(days[0].links.next.as_ref(), Some(&days[1].id));
        assert_eq!(days[30].links.next, None);
        assert_eq!(days[30].links.previous.as_ref(), Some(&days[29].id));
    }

    #[test]
    fn test_week_numbers_consistent_with_days() {
        for first_day in 0..7u8 {
            let mut config = Configuration::new(2026, first_day);
            config.calendar_range.month = 10;
            config.calendar_range.month_count = 4;
            let document = enumerate_pages(&config).unwrap();
            let weekday = config.first_weekday();

            let weeks: HashMap<_, _> = document
                .pages_of(PageKind::WeekOverview)
                .map(|p| (p.id.clone(), week_number(p.date, weekday).unwrap()))
                .collect();

            for day in document.pages_of(PageKind::Day) {
                let parent = day.links.parent_week.as_ref().unwrap();
                assert_eq!(
                    weeks[parent],
                    week_number(day.date, weekday).unwrap(),
                    "day {} under first day {first_day}",
                    day.date
                );
            }
        }
    }

    #[test]
    fn test_invalid_range_fails_fast() {
        let mut config = january(2024, 1);
        config.calendar_range.month_count = 0;
        assert!(matches!(
            enumerate_pages(&config),
            Err(DaybookError::InvalidRange { .. })
        ));
        config.calendar_range.month_count = -2;
        assert!(matches!(
            enumerate_pages(&config),
            Err(DaybookError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_invalid_configuration_fails_fast() {
        let mut config = january(2024, 1);
        config.day_itineraries.truncate(3);
        assert!(matches!(
            enumerate_pages(&config),
            Err(DaybookError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_handedness_does_not_change_pages() {
        let config = january(2024, 1);
        let mut mirrored = config.clone();
        mirrored.is_left_handed = true;
        mirrored.always_on_sidebar = true;
        assert_eq!(
            enumerate_pages(&config).unwrap().pages(),
            enumerate_pages(&mirrored).unwrap().pages()
        );
    }
}
