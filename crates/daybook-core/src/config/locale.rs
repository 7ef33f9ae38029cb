//! Locale-derived defaults.

use std::env;

/// Territories whose calendars start the week on Sunday.
const SUNDAY_FIRST: &[&str] = &[
    "AG", "AS", "BD", "BR", "BS", "BT", "BW", "BZ", "CA", "CN", "CO", "DM", "DO", "ET", "GT",
    "GU", "HK", "HN", "ID", "IL", "IN", "JM", "JP", "KE", "KH", "KR", "LA", "MH", "MM", "MO",
    "MT", "MX", "MZ", "NI", "NP", "PA", "PE", "PH", "PK", "PR", "PT", "PY", "SA", "SG", "SV",
    "TH", "TT", "TW", "UM", "US", "VE", "VI", "WS", "YE", "ZA", "ZW",
];

/// Territories whose calendars start the week on Saturday.
const SATURDAY_FIRST: &[&str] = &["AE", "AF", "BH", "DJ", "DZ", "EG", "IQ", "IR", "JO", "KW", "LY", "OM", "QA", "SD", "SY"];

/// First day of the week (Sunday-zero offset) for a POSIX locale string such
/// as `en_US.UTF-8` or `de_DE@euro`. Locales without a territory default to
/// Monday.
pub fn first_day_of_week_for_locale(locale: &str) -> u8 {
    let territory = locale
        .split(['.', '@'])
        .next()
        .and_then(|tag| tag.split(['_', '-']).nth(1))
        .map(str::to_ascii_uppercase);

    match territory.as_deref() {
        Some(code) if SUNDAY_FIRST.contains(&code) => 0,
        Some(code) if SATURDAY_FIRST.contains(&code) => 6,
        _ => 1,
    }
}

/// First day of the week from `LC_ALL`, `LC_TIME` or `LANG`, whichever is set
/// first.
pub fn first_day_of_week_from_env() -> u8 {
    ["LC_ALL", "LC_TIME", "LANG"]
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.is_empty())
        .map_or(1, |locale| first_day_of_week_for_locale(&locale))
}
