//! Calendar day marking.
//!
//! Turns a selected day or day range into the per-day highlighting a calendar
//! view needs. Keys are `YYYY-MM-DD` strings of the local date.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Day-string to annotation mapping, ordered by day.
pub type MarkedDates = BTreeMap<String, MarkedDate>;

/// Colors used when marking days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerPalette {
    /// Single days and range endpoints
    pub accent_color: String,
    /// Days strictly inside a range
    pub interior_color: String,
    pub text_color: String,
}

impl Default for MarkerPalette {
    fn default() -> Self {
        MarkerPalette {
            accent_color: "#FFB800".to_string(),
            interior_color: "#FFE08A".to_string(),
            text_color: "white".to_string(),
        }
    }
}

/// Annotation for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkedDate {
    pub highlighted: bool,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    pub is_range_start: bool,
    pub is_range_end: bool,
}

/// What the user has selected on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Day(NaiveDate),
    Range { start: NaiveDate, end: NaiveDate },
}

pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Compute the marked days for a selection.
///
/// A reversed range is marked as if its ends were swapped.
pub fn mark(selection: &Selection, palette: &MarkerPalette) -> MarkedDates {
    match *selection {
        Selection::Day(day) => {
            let mut marked = MarkedDates::new();
            marked.insert(
                day_key(day),
                MarkedDate {
                    highlighted: true,
                    color: palette.accent_color.clone(),
                    text_color: Some(palette.text_color.clone()),
                    is_range_start: false,
                    is_range_end: false,
                },
            );
            marked
        }
        Selection::Range { start, end } => {
            let (start, end) = if end < start { (end, start) } else { (start, end) };
            mark_range(start, end, palette)
        }
    }
}

fn mark_range(start: NaiveDate, end: NaiveDate, palette: &MarkerPalette) -> MarkedDates {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| {
            let is_range_start = day == start;
            let is_range_end = day == end;
            let color = if is_range_start || is_range_end {
                &palette.accent_color
            } else {
                &palette.interior_color
            };

            (
                day_key(day),
                MarkedDate {
                    highlighted: true,
                    color: color.clone(),
                    text_color: Some(palette.text_color.clone()),
                    is_range_start,
                    is_range_end,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_day_is_one_accent_entry() {
        let palette = MarkerPalette::default();
        let marked = mark(&Selection::Day(date(2024, 3, 5)), &palette);

        assert_eq!(marked.len(), 1);
        let entry = &marked["2024-03-05"];
        assert!(entry.highlighted);
        assert_eq!(entry.color, palette.accent_color);
        assert!(!entry.is_range_start && !entry.is_range_end);
    }

    #[test]
    fn one_day_range_is_both_start_and_end() {
        let d = date(2024, 1, 5);
        let marked = mark(&Selection::Range { start: d, end: d }, &MarkerPalette::default());

        assert_eq!(marked.len(), 1);
        let entry = &marked["2024-01-05"];
        assert!(entry.is_range_start);
        assert!(entry.is_range_end);
    }

    #[test]
    fn three_day_range_has_lighter_interior() {
        let palette = MarkerPalette::default();
        let marked = mark(
            &Selection::Range {
                start: date(2024, 1, 1),
                end: date(2024, 1, 3),
            },
            &palette,
        );

        let keys: Vec<&str> = marked.keys().map(String::as_str).collect();
        assert_eq!(keys, ["2024-01-01", "2024-01-02", "2024-01-03"]);

        assert!(marked["2024-01-01"].is_range_start);
        assert!(!marked["2024-01-01"].is_range_end);
        assert!(marked["2024-01-03"].is_range_end);

        let middle = &marked["2024-01-02"];
        assert!(middle.highlighted);
        assert!(!middle.is_range_start && !middle.is_range_end);
        assert_eq!(middle.color, palette.interior_color);
        assert_eq!(marked["2024-01-01"].color, palette.accent_color);
    }

    #[test]
    fn range_spans_month_and_leap_day() {
        let marked = mark(
            &Selection::Range {
                start: date(2024, 2, 27),
                end: date(2024, 3, 2),
            },
            &MarkerPalette::default(),
        );
        assert_eq!(marked.len(), 5);
        assert!(marked.contains_key("2024-02-29"));
    }

    #[test]
    fn reversed_range_is_swapped() {
        let marked = mark(
            &Selection::Range {
                start: date(2024, 1, 10),
                end: date(2024, 1, 8),
            },
            &MarkerPalette::default(),
        );
        assert_eq!(marked.len(), 3);
        assert!(marked["2024-01-08"].is_range_start);
        assert!(marked["2024-01-10"].is_range_end);
    }

    #[test]
    fn serializes_with_widget_keys() {
        let marked = mark(&Selection::Day(date(2024, 3, 5)), &MarkerPalette::default());
        let json = serde_json::to_value(&marked).unwrap();
        let entry = &json["2024-03-05"];
        assert_eq!(entry["highlighted"], true);
        assert_eq!(entry["color"], "#FFB800");
        assert_eq!(entry["textColor"], "white");
        assert_eq!(entry["isRangeStart"], false);
        assert_eq!(entry["isRangeEnd"], false);
    }
}
