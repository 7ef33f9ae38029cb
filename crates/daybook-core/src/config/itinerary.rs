//! Itinerary directives used to lay out day, month and retrospective pages.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Largest blank-line run a single `LINES` directive may request.
pub const MAX_LINES: u32 = 1000;

/// One instruction of an itinerary.
///
/// Persisted as `{"type": "ITEM" | "LINES" | "NEW_PAGE", "value": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDirective", into = "RawDirective")]
pub enum ItineraryDirective {
    /// A single labeled line
    Item(String),
    /// The given number of blank ruled lines
    Lines(u32),
    /// Moves the following directives to a new page fragment
    NewPage,
}

impl ItineraryDirective {
    /// Shorthand for an [`ItineraryDirective::Item`].
    pub fn item(text: impl Into<String>) -> Self {
        Self::Item(text.into())
    }

    /// Persisted type tag.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Item(_) => ITEM_TAG,
            Self::Lines(_) => LINES_TAG,
            Self::NewPage => NEW_PAGE_TAG,
        }
    }
}

impl fmt::Display for ItineraryDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(text) => write!(f, "ITEM({text})"),
            Self::Lines(count) => write!(f, "LINES({count})"),
            Self::NewPage => f.write_str("NEW_PAGE"),
        }
    }
}

const ITEM_TAG: &str = "ITEM";
const LINES_TAG: &str = "LINES";
const NEW_PAGE_TAG: &str = "NEW_PAGE";

/// Wire shape of a directive.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawDirective {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    value: Value,
}

impl TryFrom<RawDirective> for ItineraryDirective {
    type Error = String;

    fn try_from(raw: RawDirective) -> Result<Self, Self::Error> {
        match raw.kind.as_str() {
            ITEM_TAG => match raw.value {
                Value::String(text) => Ok(Self::Item(text)),
                Value::Number(number) => Ok(Self::Item(number.to_string())),
                other => Err(format!("ITEM expects a text value, got {other}")),
            },
            LINES_TAG => {
                let count = match &raw.value {
                    Value::Number(number) => number.as_u64(),
                    // the form UI stores numeric inputs as strings
                    Value::String(text) => text.trim().parse::<u64>().ok(),
                    _ => None,
                };
                count
                    .and_then(|count| u32::try_from(count).ok())
                    .map(Self::Lines)
                    .ok_or_else(|| format!("LINES expects a line count, got {}", raw.value))
            }
            NEW_PAGE_TAG => Ok(Self::NewPage),
            other => Err(format!("unknown itinerary directive type '{other}'")),
        }
    }
}

impl From<ItineraryDirective> for RawDirective {
    fn from(directive: ItineraryDirective) -> Self {
        let kind = directive.type_tag().to_string();
        let value = match directive {
            ItineraryDirective::Item(text) => Value::String(text),
            ItineraryDirective::Lines(count) => Value::from(count),
            ItineraryDirective::NewPage => Value::String(String::new()),
        };
        Self { kind, value }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serializes_tagged_shape() {
        let directives = vec![
            ItineraryDirective::item("08:00"),
            ItineraryDirective::Lines(2),
            ItineraryDirective::NewPage,
        ];
        let value = serde_json::to_value(&directives).unwrap();
        assert_eq!(
            value,
            json!([
                {"type": "ITEM", "value": "08:00"},
                {"type": "LINES", "value": 2},
                {"type": "NEW_PAGE", "value": ""},
            ])
        );
    }

    #[test]
    fn test_accepts_string_line_counts() {
        let directive: ItineraryDirective =
            serde_json::from_value(json!({"type": "LINES", "value": "7"})).unwrap();
        assert_eq!(directive, ItineraryDirective::Lines(7));
    }

    #[test]
    fn test_new_page_value_is_optional() {
        let directive: ItineraryDirective =
            serde_json::from_value(json!({"type": "NEW_PAGE"})).unwrap();
        assert_eq!(directive, ItineraryDirective::NewPage);
    }

    #[test]
    fn test_rejects_unknown_type() {
        let result: Result<ItineraryDirective, _> =
            serde_json::from_value(json!({"type": "CHECKBOX", "value": "x"}));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("CHECKBOX"));
    }

    #[test]
    fn test_rejects_negative_line_count() {
        let result: Result<ItineraryDirective, _> =
            serde_json::from_value(json!({"type": "LINES", "value": -3}));
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ItineraryDirective::item("Monday").to_string(), "ITEM(Monday)");
        assert_eq!(ItineraryDirective::Lines(50).to_string(), "LINES(50)");
    }
}
