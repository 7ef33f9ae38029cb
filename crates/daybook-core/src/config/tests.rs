#[cfg(test)]
mod config_tests {
    use serde_json::json;

    use crate::{
        config::{
            migrate, migrate_from, Configuration, DayItinerary, Handedness, ItineraryDirective,
            SchemaVersion, Sidebar, Template, MAX_LINES,
        },
        error::DaybookError,
    };

    fn create_test_config() -> Configuration {
        let mut config = Configuration::new(2024, 1);
        config.habits = vec!["Water".to_string(), "Walk".to_string()];
        config.todos = vec!["Call mom".to_string()];
        config
            .special_dates
            .insert("25-12".to_string(), vec!["Holiday".to_string()]);
        config
    }

    fn v1_object() -> serde_json::Value {
        json!({
            "year": 2023,
            "month": 3,
            "monthCount": 2,
            "firstDayOfWeek": 0,
            "weekendDays": [0, 6],
            "isLeftHanded": true,
            "habits": ["Read"],
            "monthItinerary": ["Goals", "Budget"],
            "todos": [],
            "dayItineraries": (0..7).map(|day| json!({
                "dayOfWeek": day,
                "items": ["Morning", "Evening"],
                "isEnabled": day != 0,
            })).collect::<Vec<_>>(),
            "pageSize": [445, 592],
            "fontFamily": "Lato",
        })
    }

    #[test]
    fn test_default_configuration_is_valid() {
        let config = Configuration::new(2025, 0);
        config.validate().unwrap();
        assert_eq!(config.calendar_range.month_count, 12);
        assert_eq!(config.calendar_range.month, 0);
        assert_eq!(config.day_itineraries.len(), 7);
        assert!(config.is_month_overview_enabled);
        assert!(config.is_week_overview_enabled);
        assert!(!config.is_week_retrospective_enabled);
        assert_eq!(config.schema_version, SchemaVersion::CURRENT);
    }

    #[test]
    fn test_create_default_is_valid() {
        Configuration::create_default().validate().unwrap();
    }

    #[test]
    fn test_serializes_camel_case_flat_range() {
        let value = serde_json::to_value(create_test_config()).unwrap();
        assert_eq!(value["schemaVersion"], "v2");
        assert_eq!(value["year"], 2024);
        assert_eq!(value["month"], 0);
        assert_eq!(value["monthCount"], 12);
        assert_eq!(value["firstDayOfWeek"], 1);
        assert_eq!(value["specialDates"]["25-12"][0], "Holiday");
        assert_eq!(value["dayItineraries"][3]["dayOfWeek"], 3);
        assert_eq!(value["dayItineraries"][3]["isEnabled"], true);
    }

    #[test]
    fn test_validate_rejects_wrong_itinerary_count() {
        let mut config = create_test_config();
        config.day_itineraries.pop();
        let err = config.validate().unwrap_err();
        assert_eq!(err.field(), Some("dayItineraries"));
    }

    #[test]
    fn test_validate_rejects_repeated_weekday() {
        let mut config = create_test_config();
        config.day_itineraries[6] = DayItinerary::empty(2, true);
        let err = config.validate().unwrap_err();
        assert_eq!(err.field(), Some("dayItineraries"));
    }

    #[test]
    fn test_validate_rejects_bad_special_date() {
        let mut config = create_test_config();
        config
            .special_dates
            .insert("31-11".to_string(), vec!["Nope".to_string()]);
        let err = config.validate().unwrap_err();
        assert_eq!(err.field(), Some("specialDates"));
        assert!(err.to_string().contains("31-11"));
    }

    #[test]
    fn test_validate_rejects_first_day_out_of_range() {
        let mut config = create_test_config();
        config.first_day_of_week = 7;
        assert_eq!(config.validate().unwrap_err().field(), Some("firstDayOfWeek"));
    }

    #[test]
    fn test_validate_rejects_weekend_out_of_range() {
        let mut config = create_test_config();
        config.weekend_days = vec![9];
        assert_eq!(config.validate().unwrap_err().field(), Some("weekendDays"));
    }

    #[test]
    fn test_handedness_and_sidebar() {
        let mut config = create_test_config();
        assert_eq!(config.handedness(), Handedness::Right);
        assert_eq!(config.sidebar(), Sidebar::Off);
        config.is_left_handed = true;
        config.always_on_sidebar = true;
        assert_eq!(config.handedness(), Handedness::Left);
        assert_eq!(config.sidebar(), Sidebar::On);
    }

    #[test]
    fn test_day_itinerary_lookup_ignores_storage_order() {
        let mut config = create_test_config();
        config.day_itineraries.rotate_left(1);
        config.day_itineraries[0].items = vec![ItineraryDirective::item("Standup")];
        config.validate().unwrap();
        let monday = config.day_itinerary(1).unwrap();
        assert_eq!(monday.items, vec![ItineraryDirective::item("Standup")]);
    }

    #[test]
    fn test_range_months_cross_year_boundary() {
        let mut config = create_test_config();
        config.calendar_range.month = 10;
        config.calendar_range.month_count = 4;
        let months = config.calendar_range.months().unwrap();
        let labels: Vec<_> = months.iter().map(|m| (m.year(), m.month())).collect();
        assert_eq!(labels, vec![(2024, 11), (2024, 12), (2025, 1), (2025, 2)]);
    }

    #[test]
    fn test_range_rejects_non_positive_count() {
        let mut config = create_test_config();
        config.calendar_range.month_count = 0;
        assert!(matches!(
            config.calendar_range.months(),
            Err(DaybookError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_range_rejects_bad_start_month() {
        let mut config = create_test_config();
        config.calendar_range.month = 12;
        assert!(matches!(
            config.calendar_range.months(),
            Err(DaybookError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_migrate_current_is_identity() {
        let config = Template::Advanced.apply(create_test_config());
        let raw = serde_json::to_value(&config).unwrap();
        assert_eq!(migrate(raw).unwrap(), config);
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let once = migrate(v1_object()).unwrap();
        let twice = migrate(serde_json::to_value(&once).unwrap()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_migrate_v1_converts_itineraries() {
        let config = migrate(v1_object()).unwrap();
        assert_eq!(config.schema_version, SchemaVersion::V2);
        assert_eq!(config.calendar_range.year, 2023);
        assert_eq!(config.calendar_range.month_count, 2);
        assert!(config.is_left_handed);
        assert_eq!(
            config.month_itinerary,
            vec![ItineraryDirective::item("Goals"), ItineraryDirective::item("Budget")]
        );
        let sunday = config.day_itinerary(0).unwrap();
        assert!(!sunday.is_enabled);
        assert_eq!(
            sunday.items,
            vec![ItineraryDirective::item("Morning"), ItineraryDirective::item("Evening")]
        );
        assert!(config.special_dates.is_empty());
        assert!(config.week_retrospective_itinerary.is_empty());
        assert!(!config.is_week_retrospective_enabled);
    }

    #[test]
    fn test_migrate_explicit_v1_tag() {
        let mut raw = v1_object();
        raw["schemaVersion"] = json!("v1");
        let config = migrate(raw).unwrap();
        assert_eq!(config.calendar_range.year, 2023);
    }

    #[test]
    fn test_migrate_from_named_version() {
        let config = migrate_from(v1_object(), SchemaVersion::V1).unwrap();
        assert_eq!(config.habits, vec!["Read".to_string()]);
    }

    #[test]
    fn test_migrate_rejects_unknown_version() {
        let mut raw = v1_object();
        raw["schemaVersion"] = json!("v9");
        match migrate(raw) {
            Err(DaybookError::UnsupportedVersion { version }) => assert_eq!(version, "v9"),
            other => panic!("expected UnsupportedVersion, got {other:?}"),
        }
    }

    #[test]
    fn test_migrate_rejects_numeric_version() {
        let mut raw = v1_object();
        raw["schemaVersion"] = json!(2);
        assert!(matches!(
            migrate(raw),
            Err(DaybookError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_migrate_validates_result() {
        let mut raw = serde_json::to_value(create_test_config()).unwrap();
        raw["specialDates"] = json!({"99-99": ["Bad"]});
        let err = migrate(raw).unwrap_err();
        assert_eq!(err.field(), Some("specialDates"));
    }

    #[test]
    fn test_migrate_rejects_non_object() {
        let err = migrate(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, DaybookError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_blank_template_clears_content() {
        let config = Template::Blank.apply(Template::Advanced.apply(create_test_config()));
        assert!(config.special_dates.is_empty());
        assert!(config.habits.is_empty());
        assert!(config.todos.is_empty());
        assert!(config.week_retrospective_itinerary.is_empty());
        assert!(config
            .day_itineraries
            .iter()
            .all(|day| day.items.is_empty() && day.is_enabled));
    }

    #[test]
    fn test_minimalistic_template_disables_days() {
        let mut base = create_test_config();
        base.is_week_retrospective_enabled = true;
        base.is_month_overview_enabled = false;
        let config = Template::Minimalistic.apply(base);
        assert!(config.is_month_overview_enabled);
        assert!(config.is_week_overview_enabled);
        assert!(!config.is_week_retrospective_enabled);
        assert!(config.day_itineraries.iter().all(|day| !day.is_enabled));
    }

    #[test]
    fn test_templates_keep_range_and_styling() {
        let mut base = create_test_config();
        base.calendar_range.month = 5;
        base.is_left_handed = true;
        for template in Template::ALL {
            let config = template.apply(base.clone());
            assert_eq!(config.calendar_range, base.calendar_range);
            assert_eq!(config.first_day_of_week, base.first_day_of_week);
            assert!(config.is_left_handed);
            config.validate().unwrap();
        }
    }

    #[test]
    fn test_advanced_template_retrospective() {
        let config = Template::Advanced.apply(create_test_config());
        assert_eq!(
            config.week_retrospective_itinerary[0],
            ItineraryDirective::item("Wins")
        );
        assert_eq!(config.week_retrospective_itinerary.len(), 6);
    }

    #[test]
    fn test_basic_template_restores_default_content() {
        let mut base = Template::Advanced.apply(create_test_config());
        base.month_itinerary = vec![ItineraryDirective::item("Budget")];
        base.is_week_retrospective_enabled = true;

        let config = Template::Basic.apply(base.clone());
        let defaults = Configuration::new(2024, 1);
        assert_eq!(config.habits, defaults.habits);
        assert_eq!(config.todos, defaults.todos);
        assert_eq!(config.special_dates, defaults.special_dates);
        assert_eq!(config.month_itinerary, defaults.month_itinerary);
        assert_eq!(config.day_itineraries, defaults.day_itineraries);
        assert_eq!(
            config.week_retrospective_itinerary,
            defaults.week_retrospective_itinerary
        );
        assert!(!config.is_week_retrospective_enabled);
        assert_eq!(config.calendar_range, base.calendar_range);
    }

    #[test]
    fn test_advanced_template_keeps_base_content() {
        let base = create_test_config();
        let config = Template::Advanced.apply(base.clone());
        assert_eq!(config.habits, base.habits);
        assert_eq!(config.todos, base.todos);
        assert_eq!(config.special_dates, base.special_dates);
    }

    #[test]
    fn test_validate_rejects_oversized_line_runs() {
        let mut config = create_test_config();
        config.day_itineraries[3].items = vec![ItineraryDirective::Lines(MAX_LINES + 1)];
        match config.validate() {
            Err(DaybookError::InvalidConfiguration { field, .. }) => {
                assert_eq!(field, "dayItineraries")
            }
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }

        let mut config = create_test_config();
        config.week_retrospective_itinerary = vec![ItineraryDirective::Lines(u32::MAX)];
        match config.validate() {
            Err(DaybookError::InvalidConfiguration { field, .. }) => {
                assert_eq!(field, "weekRetrospectiveItinerary")
            }
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }

        let mut config = create_test_config();
        config.month_itinerary = vec![ItineraryDirective::Lines(MAX_LINES)];
        config.validate().unwrap();
    }

    #[test]
    fn test_migrate_rejects_huge_line_count() {
        let mut raw = serde_json::to_value(create_test_config()).unwrap();
        raw["dayItineraries"][1]["items"] = json!([{ "type": "LINES", "value": 4294967295u64 }]);
        assert!(matches!(
            migrate(raw),
            Err(DaybookError::InvalidConfiguration { .. })
        ));
    }
}
