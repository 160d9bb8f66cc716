use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::models::event::{CalendarEvent, events_for_date};

/// Titles shown per day cell before collapsing into "+N more".
pub const MAX_TITLES_PER_CELL: usize = 2;

#[derive(Debug, Clone)]
pub struct EventChip {
    pub id: String,
    pub title: String,
    pub color: &'static str,
}

#[derive(Debug, Clone)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub chips: Vec<EventChip>,
    pub overflow: usize,
}

impl DayCell {
    pub fn day_number(&self) -> u32 {
        self.date.day()
    }

    pub fn iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone)]
pub struct MonthGrid {
    /// First day of the displayed month.
    pub month: NaiveDate,
    pub weeks: Vec<Vec<DayCell>>,
}

impl MonthGrid {
    pub fn title(&self) -> String {
        self.month.format("%B %Y").to_string()
    }

    pub fn month_param(&self) -> String {
        month_param(self.month)
    }

    pub fn prev_param(&self) -> String {
        month_param(self.month - Months::new(1))
    }

    pub fn next_param(&self) -> String {
        month_param(self.month + Months::new(1))
    }
}

/// What a click on a day cell does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayClick {
    /// Only move the selection.
    Select(NaiveDate),
    /// Select the day and open its single event.
    OpenEvent { date: NaiveDate, event_id: String },
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// `YYYY-MM` for query strings.
pub fn month_param(month: NaiveDate) -> String {
    month.format("%Y-%m").to_string()
}

/// Parse a `YYYY-MM` query parameter into the first day of that month.
pub fn parse_month(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d").ok()
}

/// Week-aligned span covering `month`: from the Sunday on or before the 1st
/// to the Saturday on or after the last day.
pub fn month_span(month: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = first_of_month(month);
    let last = first + Months::new(1) - Duration::days(1);
    let start = first - Duration::days(first.weekday().num_days_from_sunday() as i64);
    let end = last + Duration::days(6 - last.weekday().num_days_from_sunday() as i64);
    (start, end)
}

pub fn build_month_grid(
    month: NaiveDate,
    events: &[CalendarEvent],
    selected: Option<NaiveDate>,
    today: NaiveDate,
) -> MonthGrid {
    let month = first_of_month(month);
    let (start, end) = month_span(month);

    let mut weeks = Vec::new();
    let mut week = Vec::with_capacity(7);
    let mut d = start;
    while d <= end {
        let on_day = events_for_date(events, d);
        let chips = on_day
            .iter()
            .take(MAX_TITLES_PER_CELL)
            .map(|e| EventChip {
                id: e.id.clone(),
                title: e.title.clone(),
                color: e.color,
            })
            .collect();
        week.push(DayCell {
            date: d,
            in_month: d.month() == month.month() && d.year() == month.year(),
            is_today: d == today,
            is_selected: selected == Some(d),
            chips,
            overflow: on_day.len().saturating_sub(MAX_TITLES_PER_CELL),
        });
        if week.len() == 7 {
            weeks.push(std::mem::take(&mut week));
        }
        d += Duration::days(1);
    }

    MonthGrid { month, weeks }
}

/// A single-event day opens that event; empty and multi-event days only
/// move the selection.
pub fn day_click(events: &[CalendarEvent], date: NaiveDate) -> DayClick {
    match events_for_date(events, date).as_slice() {
        [only] => DayClick::OpenEvent { date, event_id: only.id.clone() },
        _ => DayClick::Select(date),
    }
}
