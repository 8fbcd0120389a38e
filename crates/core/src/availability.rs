//! # Availability Projector
//!
//! Weekly [`TimeSlot`] templates describe when a court can be booked on a
//! given weekday. This module projects those templates onto concrete
//! calendar days and derives the grouped and statistical views served by
//! the time slot endpoints.
//!
//! Dates are plain calendar days; no timezone conversion happens here.
//! Weekdays are indexed 0 = Sunday … 6 = Saturday.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};

use crate::{
    errors::{CourtbookError, CourtbookResult},
    models::{
        booking::Booking,
        time_slot::{CourtStats, DayStats, TimeSlot, UpcomingSlot},
    },
};

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const DEFAULT_UPCOMING_DAYS: u32 = 7;
pub const MAX_UPCOMING_DAYS: u32 = 30;

/// Weekday index of `date`, 0 = Sunday.
pub fn weekday_index(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

/// English day name for a weekday index; out-of-range indexes map to `"Unknown"`.
pub fn day_name(day_of_week: i16) -> &'static str {
    usize::try_from(day_of_week)
        .ok()
        .and_then(|index| DAY_NAMES.get(index))
        .copied()
        .unwrap_or("Unknown")
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> CourtbookResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        CourtbookError::Validation(format!(
            "Invalid date '{}', expected YYYY-MM-DD",
            value
        ))
    })
}

pub fn upcoming_days(days: Option<u32>) -> CourtbookResult<u32> {
    let days = days.unwrap_or(DEFAULT_UPCOMING_DAYS);
    if (1..=MAX_UPCOMING_DAYS).contains(&days) {
        Ok(days)
    } else {
        Err(CourtbookError::Validation(format!(
            "Number of days must be between 1 and {}, got {}",
            MAX_UPCOMING_DAYS, days
        )))
    }
}

fn is_booked(slot: &TimeSlot, date: NaiveDate, bookings: &[Booking]) -> bool {
    bookings
        .iter()
        .any(|booking| booking.court_id == slot.court_id
            && booking.blocks(date, slot.start_time, slot.end_time))
}

/// Templates that can still be booked on `date`.
///
/// Keeps templates for the date's weekday that are marked available and
/// drops any overlapped by a confirmed booking on that exact date.
pub fn available_on(date: NaiveDate, templates: &[TimeSlot], bookings: &[Booking]) -> Vec<TimeSlot> {
    let day = weekday_index(date);
    templates
        .iter()
        .filter(|slot| slot.day_of_week == day && slot.is_available)
        .filter(|slot| !is_booked(slot, date, bookings))
        .cloned()
        .collect()
}

/// Partitions templates by weekday. All seven days are present as keys.
pub fn group_by_day(templates: Vec<TimeSlot>) -> BTreeMap<i16, Vec<TimeSlot>> {
    let mut grouped: BTreeMap<i16, Vec<TimeSlot>> = (0..7).map(|day| (day, Vec::new())).collect();
    for slot in templates {
        grouped.entry(slot.day_of_week).or_default().push(slot);
    }
    for slots in grouped.values_mut() {
        slots.sort_by_key(|slot| (slot.start_time, slot.end_time));
    }
    grouped
}

/// Per-day template counts for every weekday that has templates.
pub fn court_stats(templates: &[TimeSlot]) -> CourtStats {
    let mut by_day: BTreeMap<i16, DayStats> = BTreeMap::new();
    for slot in templates {
        let stats = by_day.entry(slot.day_of_week).or_insert_with(|| DayStats {
            day_of_week: slot.day_of_week,
            day_name: day_name(slot.day_of_week).to_string(),
            total: 0,
            available: 0,
            blocked: 0,
        });
        stats.total += 1;
        if slot.is_available {
            stats.available += 1;
        } else {
            stats.blocked += 1;
        }
    }

    let available = templates.iter().filter(|slot| slot.is_available).count();
    CourtStats {
        total: templates.len(),
        available,
        blocked: templates.len() - available,
        by_day: by_day.into_values().collect(),
    }
}

/// Projects available templates onto the `num_days` calendar days starting at `from`.
pub fn upcoming(
    templates: &[TimeSlot],
    bookings: &[Booking],
    from: NaiveDate,
    num_days: u32,
) -> Vec<UpcomingSlot> {
    let mut sorted: Vec<&TimeSlot> = templates.iter().filter(|slot| slot.is_available).collect();
    sorted.sort_by_key(|slot| (slot.start_time, slot.end_time));

    let mut upcoming = Vec::new();
    for offset in 0..num_days {
        let Some(date) = from.checked_add_days(Days::new(u64::from(offset))) else {
            break;
        };
        let day = weekday_index(date);
        for slot in sorted.iter().filter(|slot| slot.day_of_week == day) {
            upcoming.push(UpcomingSlot {
                date,
                day_name: day_name(day).to_string(),
                is_booked: is_booked(slot, date, bookings),
                slot: (*slot).clone(),
            });
        }
    }
    upcoming
}
