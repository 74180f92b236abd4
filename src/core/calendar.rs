//! Calendar view - one all-day event per booking, colored by status.
//!
//! The calendar only reads bookings. It never reschedules or edits them; the
//! detail panel links to the booking editor instead.

use crate::{
    core::{
        booking::BookingStatus,
        views::{StatusBadge, format_event_date, payment_badge, status_badge},
    },
    entities::BookingModel,
    errors::{Error, Result},
};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Neutral gray; Draft and any unrecognized status.
pub const COLOR_DRAFT: &str = "#6b7280";
/// Blue
pub const COLOR_CONFIRMED: &str = "#3b82f6";
/// Orange
pub const COLOR_ONGOING: &str = "#f97316";
/// Green
pub const COLOR_COMPLETED: &str = "#22c55e";
/// Red
pub const COLOR_CANCELLED: &str = "#ef4444";

/// Palette entry for a status.
#[must_use]
pub const fn color_for(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Draft => COLOR_DRAFT,
        BookingStatus::Confirmed => COLOR_CONFIRMED,
        BookingStatus::Ongoing => COLOR_ONGOING,
        BookingStatus::Completed => COLOR_COMPLETED,
        BookingStatus::Cancelled => COLOR_CANCELLED,
    }
}

/// Palette entry for a stored status label; unknown labels get the neutral color.
#[must_use]
pub fn status_color(label: &str) -> &'static str {
    BookingStatus::parse(label).map_or(COLOR_DRAFT, color_for)
}

/// A booking projected onto the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub booking_id: String,
    pub title: String,
    pub date: NaiveDate,
    pub all_day: bool,
    pub color: &'static str,
}

impl CalendarEvent {
    /// Projects one booking.
    #[must_use]
    pub fn from_booking(booking: &BookingModel) -> Self {
        Self {
            booking_id: booking.id.clone(),
            title: format!("{} - {}", booking.client_name, booking.event_type),
            date: booking.event_date,
            all_day: true,
            color: status_color(&booking.status),
        }
    }
}

/// Projects every booking, keeping the input order.
#[must_use]
pub fn events(bookings: &[BookingModel]) -> Vec<CalendarEvent> {
    bookings.iter().map(CalendarEvent::from_booking).collect()
}

/// Groups events by date.
#[must_use]
pub fn events_by_date(events: &[CalendarEvent]) -> BTreeMap<NaiveDate, Vec<CalendarEvent>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<CalendarEvent>> = BTreeMap::new();
    for event in events {
        buckets.entry(event.date).or_default().push(event.clone());
    }
    buckets
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// False for leading/trailing days from neighbouring months
    pub in_month: bool,
    pub events: Vec<CalendarEvent>,
}

/// A month laid out in Monday-first weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<CalendarDay>>,
}

impl MonthGrid {
    /// Number of events that fall inside the month.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.weeks
            .iter()
            .flatten()
            .filter(|day| day.in_month)
            .map(|day| day.events.len())
            .sum()
    }
}

/// Buckets events into a month grid.
///
/// # Errors
/// Returns an error for an invalid year/month.
pub fn month_grid(year: i32, month: u32, events: &[CalendarEvent]) -> Result<MonthGrid> {
    let invalid = || Error::Config {
        message: format!("Invalid month {year}-{month:02}"),
    };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;

    let buckets = events_by_date(events);
    let mut cursor = first - Duration::days(i64::from(first.weekday().num_days_from_monday()));
    let mut weeks = Vec::new();

    while cursor < next_first {
        let mut week = Vec::with_capacity(7);
        for _ in 0..7 {
            week.push(CalendarDay {
                date: cursor,
                in_month: cursor.month() == month && cursor.year() == year,
                events: buckets.get(&cursor).cloned().unwrap_or_default(),
            });
            cursor += Duration::days(1);
        }
        weeks.push(week);
    }

    Ok(MonthGrid { year, month, weeks })
}

/// Read-only panel shown when an event is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDetail {
    pub booking_id: String,
    pub client_name: String,
    pub event_type: String,
    pub location: String,
    pub event_date: String,
    pub status: StatusBadge,
    pub payment_status: StatusBadge,
    /// Where to open the full editor
    pub editor_link: String,
}

/// Link to the full editor for a booking.
#[must_use]
pub fn editor_link(editor_base_url: &str, booking_id: &str) -> String {
    let base = editor_base_url.trim_end_matches('/');
    if base.is_empty() {
        format!("/booking edit booking:{booking_id}")
    } else {
        format!("{base}/admin/bookings/{booking_id}")
    }
}

/// Looks up the detail panel for an event.
///
/// # Errors
/// Returns [`Error::BookingNotFound`] when no booking has that id.
pub fn event_detail(
    bookings: &[BookingModel],
    booking_id: &str,
    editor_base_url: &str,
) -> Result<EventDetail> {
    let booking = bookings
        .iter()
        .find(|b| b.id == booking_id)
        .ok_or_else(|| Error::BookingNotFound {
            id: booking_id.to_string(),
        })?;

    Ok(EventDetail {
        booking_id: booking.id.clone(),
        client_name: booking.client_name.clone(),
        event_type: booking.event_type.clone(),
        location: booking.location.clone(),
        event_date: format_event_date(booking.event_date),
        status: status_badge(&booking.status),
        payment_status: payment_badge(&booking.payment_status),
        editor_link: editor_link(editor_base_url, &booking.id),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::fallback;
    use crate::test_utils::sample_booking_model;

    #[test]
    fn test_palette_per_status() {
        let expected = [
            ("Draft", COLOR_DRAFT),
            ("Confirmed", COLOR_CONFIRMED),
            ("Ongoing", COLOR_ONGOING),
            ("Completed", COLOR_COMPLETED),
            ("Cancelled", COLOR_CANCELLED),
        ];
        for (label, color) in expected {
            let booking = sample_booking_model("b", label);
            assert_eq!(CalendarEvent::from_booking(&booking).color, color, "{label}");
        }
    }

    #[test]
    fn test_unknown_status_falls_back_to_gray() {
        assert_eq!(status_color("Postponed"), COLOR_DRAFT);
        assert_eq!(status_color(""), COLOR_DRAFT);
    }

    #[test]
    fn test_event_is_all_day_on_event_date() {
        let booking = sample_booking_model("b1", "Draft");
        let event = CalendarEvent::from_booking(&booking);
        assert!(event.all_day);
        assert_eq!(event.date, booking.event_date);
        assert_eq!(event.title, format!("{} - {}", booking.client_name, booking.event_type));
    }

    #[test]
    fn test_month_grid_for_december_2024() {
        let bookings = fallback::bookings();
        let grid = month_grid(2024, 12, &events(&bookings)).unwrap();

        // 1 Dec 2024 is a Sunday, so the grid starts on Monday 25 Nov.
        assert_eq!(grid.weeks[0][0].date, NaiveDate::from_ymd_opt(2024, 11, 25).unwrap());
        assert!(!grid.weeks[0][0].in_month);
        assert_eq!(grid.weeks.len(), 6);
        assert!(grid.weeks.iter().all(|week| week.len() == 7));
        assert_eq!(grid.event_count(), 2);

        let wedding_day = grid
            .weeks
            .iter()
            .flatten()
            .find(|day| day.date == NaiveDate::from_ymd_opt(2024, 12, 14).unwrap())
            .unwrap();
        assert_eq!(wedding_day.events[0].color, COLOR_CONFIRMED);
    }

    #[test]
    fn test_month_grid_rejects_bad_month() {
        assert!(month_grid(2024, 13, &[]).is_err());
    }

    #[test]
    fn test_event_detail_lookup() {
        let bookings = fallback::bookings();
        let detail = event_detail(&bookings, fallback::BOOKING_WEDDING, "https://admin.example/").unwrap();
        assert_eq!(detail.client_name, "Sari Wulandari");
        assert_eq!(detail.event_date, "14 Dec 2024");
        assert_eq!(detail.status.label, "Confirmed");
        assert_eq!(detail.payment_status.label, "Down Payment");
        assert_eq!(
            detail.editor_link,
            format!("https://admin.example/admin/bookings/{}", fallback::BOOKING_WEDDING)
        );

        assert!(matches!(
            event_detail(&bookings, "missing", ""),
            Err(Error::BookingNotFound { .. })
        ));
    }
}
