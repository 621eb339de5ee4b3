use chrono::{DateTime, Datelike, Duration, NaiveDateTime, NaiveTime, TimeZone};
use serde::Serialize;

use crate::models::{DayHours, OpeningHours};

/// Today's hours in a shape the string table can render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HoursSummary {
    ClosedToday,
    OpenToday { open: String, close: String },
}

impl HoursSummary {
    /// Key of the template in the localized string table
    pub fn template_key(&self) -> &'static str {
        match self {
            HoursSummary::ClosedToday => "placeCard.closedToday",
            HoursSummary::OpenToday { .. } => "placeCard.openToday",
        }
    }

    /// Values substituted into the template
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        match self {
            HoursSummary::ClosedToday => Vec::new(),
            HoursSummary::OpenToday { open, close } => vec![("open", open.as_str()), ("close", close.as_str())],
        }
    }
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
}

/// Both ends of a day's schedule, parsed. Anything less counts as closed.
fn parse_window(hours: &DayHours) -> Option<(NaiveTime, NaiveTime)> {
    let open = parse_time(hours.open.as_deref()?)?;
    let close = parse_time(hours.close.as_deref()?)?;
    Some((open, close))
}

/// Whether `now` falls in the window that starts on `day_start`'s date.
///
/// A window whose close is not after its open runs past midnight and ends
/// on the following day.
fn window_contains(hours: &DayHours, day_start: NaiveDateTime, now: NaiveDateTime) -> bool {
    let Some((open, close)) = parse_window(hours) else {
        return false;
    };

    let date = day_start.date();
    let open_at = date.and_time(open);
    let mut close_at = date.and_time(close);
    if close <= open {
        close_at += Duration::days(1);
    }

    now >= open_at && now < close_at
}

/// Decide whether a venue is open at the given local wall-clock time
///
/// No schedule, a half-filled day or an unparseable time all read as closed.
/// Yesterday's hours still apply after midnight when they span it.
pub fn is_open_now(hours: Option<&OpeningHours>, now: NaiveDateTime) -> bool {
    let Some(hours) = hours else {
        return false;
    };

    let today = now.weekday();
    if let Some(day) = hours.for_weekday(today) {
        if window_contains(day, now, now) {
            return true;
        }
    }

    let yesterday = now - Duration::days(1);
    match hours.for_weekday(today.pred()) {
        Some(day) => window_contains(day, yesterday, now),
        None => false,
    }
}

/// Same as [`is_open_now`], reading the wall clock of the instant's timezone
pub fn is_open_at<Tz: TimeZone>(hours: Option<&OpeningHours>, now: &DateTime<Tz>) -> bool {
    is_open_now(hours, now.naive_local())
}

/// Summarize today's hours for display
///
/// Only a day whose open and close both parse is reported as open, so the
/// summary never disagrees with [`is_open_now`] about a malformed schedule.
pub fn todays_hours_summary(hours: Option<&OpeningHours>, now: NaiveDateTime) -> HoursSummary {
    let Some(day) = hours.and_then(|h| h.for_weekday(now.weekday())) else {
        return HoursSummary::ClosedToday;
    };

    match (parse_window(day), day.open.as_deref(), day.close.as_deref()) {
        (Some(_), Some(open), Some(close)) => HoursSummary::OpenToday {
            open: open.trim().to_string(),
            close: close.trim().to_string(),
        },
        _ => HoursSummary::ClosedToday,
    }
}
