//! Terminal rendering for events and marked calendar months.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use eventcal_core::marker::{MarkedDate, MarkedDates, MarkerPalette, day_key};
use eventcal_core::{Event, RepeatCadence};
use owo_colors::{OwoColorize, Style};

/// e.g. "Mar 5, 2024, 09:00 AM"
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// An upcoming event as shown on the home list.
pub fn render_event(event: &Event) -> String {
    let mut lines = vec![
        event.name.bold().to_string(),
        format!("  From: {}", format_datetime(&event.start)),
        format!("  To:   {}", format_datetime(&event.end)),
    ];
    if event.repeat != RepeatCadence::None {
        lines.push(format!("  Repeats: {}", event.repeat).dimmed().to_string());
    }
    lines.push(format!("  id: {}", event.id).dimmed().to_string());
    lines.join("\n")
}

/// A past event as shown in the history.
pub fn render_past_event(event: &Event) -> String {
    [
        event.name.bold().to_string(),
        format!("  From: {}", format_datetime(&event.start)),
        format!("  To:   {}", format_datetime(&event.end)),
        format!("  Repeat: {}", event.repeat).blue().to_string(),
    ]
    .join("\n")
}

/// One-line label used in pickers.
pub fn event_label(event: &Event) -> String {
    format!("{} ({})", event.name, format_datetime(&event.start))
}

/// Every (year, month) from `start` to `end` inclusive.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> Vec<(i32, u32)> {
    let (start, end) = if end < start { (end, start) } else { (start, end) };
    let mut months = Vec::new();
    let (mut year, mut month) = (start.year(), start.month());

    while (year, month) <= (end.year(), end.month()) {
        months.push((year, month));
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    months
}

/// A Sunday-first month grid with marked days colored.
pub fn render_month(year: i32, month: u32, marked: &MarkedDates, palette: &MarkerPalette) -> String {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return String::new();
    };

    let mut out = String::new();
    let title = format!("{:^20}", first.format("%B %Y").to_string());
    out.push_str(&title.bold().to_string());
    out.push('\n');
    out.push_str("Su Mo Tu We Th Fr Sa\n");

    let lead = first.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<String> = vec!["  ".to_string(); lead];

    for day in first.iter_days().take_while(|d| d.month() == month) {
        let label = format!("{:>2}", day.day());
        let cell = match marked.get(&day_key(day)) {
            Some(mark) => label.style(mark_style(mark, palette)).to_string(),
            None => label,
        };
        cells.push(cell);
    }

    let rows: Vec<String> = cells.chunks(7).map(|week| week.join(" ")).collect();
    out.push_str(&rows.join("\n"));
    out.push('\n');
    out
}

/// One line per marked day: date and its role in the range.
pub fn render_marked_list(marked: &MarkedDates) -> String {
    marked
        .iter()
        .map(|(day, mark)| format!("{}  {}", day, role_label(mark)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn role_label(mark: &MarkedDate) -> &'static str {
    match (mark.is_range_start, mark.is_range_end) {
        (true, true) => "start/end",
        (true, false) => "start",
        (false, true) => "end",
        (false, false) if mark.highlighted => "selected",
        (false, false) => "",
    }
}

fn mark_style(mark: &MarkedDate, palette: &MarkerPalette) -> Style {
    let mut style = Style::new().bold();

    if mark.highlighted {
        if let Some((r, g, b)) = parse_hex(&mark.color) {
            style = style.on_truecolor(r, g, b);
        } else {
            style = style.reversed();
        }
    }

    let text_color = mark.text_color.as_deref().unwrap_or(&palette.text_color);
    match (parse_hex(text_color), text_color) {
        (Some((r, g, b)), _) => style.truecolor(r, g, b),
        (None, "white") => style.white(),
        (None, "black") => style.black(),
        _ => style,
    }
}

/// Parse "#RRGGBB" (or "RRGGBB").
fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventcal_core::marker::{Selection, mark};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_datetime_like_the_event_list() {
        let dt = date(2024, 3, 5).and_hms_opt(21, 7, 0).unwrap();
        assert_eq!(format_datetime(&dt), "Mar 5, 2024, 09:07 PM");
    }

    #[test]
    fn repeats_line_only_for_recurring_events() {
        let mut event = Event {
            id: "x".to_string(),
            name: "Gym".to_string(),
            start: date(2024, 3, 5).and_hms_opt(7, 0, 0).unwrap(),
            end: date(2024, 3, 5).and_hms_opt(8, 0, 0).unwrap(),
            repeat: RepeatCadence::None,
        };
        assert!(!render_event(&event).contains("Repeats"));

        event.repeat = RepeatCadence::BiWeekly;
        assert!(render_event(&event).contains("Repeats: Bi-weekly"));
        assert!(render_past_event(&event).contains("Repeat: Bi-weekly"));
    }

    #[test]
    fn months_between_crosses_year_boundary() {
        assert_eq!(
            months_between(date(2023, 11, 20), date(2024, 2, 1)),
            vec![(2023, 11), (2023, 12), (2024, 1), (2024, 2)]
        );
        assert_eq!(months_between(date(2024, 5, 1), date(2024, 5, 31)), vec![(2024, 5)]);
    }

    #[test]
    fn month_grid_starts_on_sunday() {
        // March 1, 2024 was a Friday
        let grid = render_month(2024, 3, &MarkedDates::new(), &MarkerPalette::default());
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines[1], "Su Mo Tu We Th Fr Sa");
        assert_eq!(lines[2], "                1  2");
        assert_eq!(lines.last().copied(), Some("31"));
    }

    #[test]
    fn marked_days_are_styled() {
        let palette = MarkerPalette::default();
        let marked = mark(&Selection::Day(date(2024, 3, 5)), &palette);
        let plain = render_month(2024, 3, &MarkedDates::new(), &palette);
        let styled = render_month(2024, 3, &marked, &palette);
        assert_ne!(plain, styled);
        assert!(styled.contains("\u{1b}["));
    }

    #[test]
    fn marked_list_names_roles() {
        let marked = mark(
            &Selection::Range {
                start: date(2024, 1, 1),
                end: date(2024, 1, 3),
            },
            &MarkerPalette::default(),
        );
        assert_eq!(
            render_marked_list(&marked),
            "2024-01-01  start\n2024-01-02  selected\n2024-01-03  end"
        );
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex("#FFB800"), Some((255, 184, 0)));
        assert_eq!(parse_hex("white"), None);
    }
}
