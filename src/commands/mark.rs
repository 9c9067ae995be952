//! Calendar views: range selection by taps, and a single marked day.

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use eventcal_core::config::EventCalConfig;
use eventcal_core::marker::{MarkedDates, MarkerPalette, Selection, mark};
use eventcal_core::selection::{AfterCompletePolicy, RangeSelector};

use crate::input::parse_date;
use crate::render::{months_between, render_marked_list, render_month};

/// Feed each date as a tap, then show the resulting marked range.
pub fn run(dates: &[String], json: bool, config: &EventCalConfig) -> Result<()> {
    let taps = dates
        .iter()
        .map(|d| parse_date(d))
        .collect::<Result<Vec<_>>>()?;

    let selector = select(&taps, config.selection.after_complete);
    let marked = selector.marked_dates(&config.marker);

    if json {
        let out = serde_json::to_string_pretty(&marked).context("Failed to encode marked dates")?;
        println!("{}", out);
        return Ok(());
    }

    if let Some((start, end)) = selector.bounds() {
        print_months(start, end, &marked, &config.marker);
    }
    println!("{}", render_marked_list(&marked));
    Ok(())
}

/// Month view with one day marked (today by default).
pub fn show(date: Option<String>, json: bool, config: &EventCalConfig) -> Result<()> {
    let day = match date {
        Some(d) => parse_date(&d)?,
        None => Local::now().date_naive(),
    };
    let marked = mark(&Selection::Day(day), &config.marker);

    if json {
        let out = serde_json::to_string_pretty(&marked).context("Failed to encode marked dates")?;
        println!("{}", out);
        return Ok(());
    }

    print!("{}", render_month(day.year(), day.month(), &marked, &config.marker));
    Ok(())
}

/// Run a sequence of taps through a fresh selector.
pub fn select(taps: &[NaiveDate], policy: AfterCompletePolicy) -> RangeSelector {
    let mut selector = RangeSelector::new(policy);
    for day in taps {
        selector.tap(*day);
    }
    selector
}

pub fn print_months(start: NaiveDate, end: NaiveDate, marked: &MarkedDates, palette: &MarkerPalette) {
    for (year, month) in months_between(start, end) {
        println!("{}", render_month(year, month, marked, palette));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventcal_core::selection::SelectionState;

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn third_tap_starts_a_new_range_by_default() {
        let selector = select(&[jan(5), jan(10), jan(2)], AfterCompletePolicy::Reset);
        assert_eq!(selector.state(), SelectionState::Single(jan(2)));
        assert_eq!(selector.marked_dates(&MarkerPalette::default()).len(), 1);
    }

    #[test]
    fn third_tap_extends_under_extend_policy() {
        let selector = select(&[jan(5), jan(10), jan(2)], AfterCompletePolicy::Extend);
        assert_eq!(selector.bounds(), Some((jan(2), jan(10))));
        assert_eq!(selector.marked_dates(&MarkerPalette::default()).len(), 9);
    }

    #[test]
    fn run_rejects_unparseable_dates() {
        let dates = vec!["2024-01-05".to_string(), "soon".to_string()];
        assert!(run(&dates, true, &EventCalConfig::default()).is_err());
    }
}
