// SPDX-FileCopyrightText: 2026 The recurring authors
//
// SPDX-License-Identifier: Apache-2.0

//! Per-period candidate generation.
//!
//! A period is rooted at the anchor advanced by N intervals of the
//! frequency. Coarse frequencies enumerate calendar days; DAILY and finer
//! expand the time-of-day grid. All candidates carry the root's wall-clock
//! fields and zone; DST gaps resolve by jiff's compatible policy.

use jiff::civil::{Date, DateTime, Time, Weekday, date, time};
use jiff::{Span, Zoned};

use crate::rule::{Frequency, RecurringRule};

/// The root of period `periods` (zero-based), or `None` once the advance
/// leaves the representable range.
pub(crate) fn period_start(
    anchor: &Zoned,
    frequency: Frequency,
    interval: i64,
    periods: i64,
) -> Option<Zoned> {
    let n = interval.checked_mul(periods)?;
    let tz = anchor.time_zone().clone();
    let wall = wall_time(anchor);
    match frequency {
        // Snapping to day 1 before the add avoids the double increment
        // when the anchor day is missing from a shorter month.
        Frequency::Yearly => {
            let first = anchor.date().first_of_month();
            let d = first.checked_add(Span::new().try_years(n).ok()?).ok()?;
            DateTime::from_parts(d, wall).to_zoned(tz).ok()
        }
        Frequency::Monthly => {
            let first = anchor.date().first_of_month();
            let d = first.checked_add(Span::new().try_months(n).ok()?).ok()?;
            DateTime::from_parts(d, wall).to_zoned(tz).ok()
        }
        Frequency::Weekly => {
            let days = n.checked_mul(7)?;
            let d = anchor.date().checked_add(Span::new().try_days(days).ok()?).ok()?;
            DateTime::from_parts(d, wall).to_zoned(tz).ok()
        }
        Frequency::Daily => {
            let d = anchor.date().checked_add(Span::new().try_days(n).ok()?).ok()?;
            DateTime::from_parts(d, wall).to_zoned(tz).ok()
        }
        // Sub-daily periods advance by absolute duration, not wall clock.
        Frequency::Hourly => anchor.checked_add(Span::new().try_hours(n).ok()?).ok(),
        Frequency::Minutely => anchor.checked_add(Span::new().try_minutes(n).ok()?).ok(),
        Frequency::Secondly => anchor.checked_add(Span::new().try_seconds(n).ok()?).ok(),
    }
}

/// The ordered candidate set for the period rooted at `root`.
pub(crate) fn candidates(rule: &RecurringRule, root: &Zoned) -> Vec<Zoned> {
    match rule.frequency {
        Frequency::Yearly => year_days(root),
        Frequency::Monthly => month_days(root),
        Frequency::Weekly => week_days(root, rule.week_start),
        Frequency::Daily | Frequency::Hourly | Frequency::Minutely | Frequency::Secondly => {
            times_of_day(rule, root)
        }
    }
}

/// Every day of the root's year, in calendar order, at the root's time.
fn year_days(root: &Zoned) -> Vec<Zoned> {
    let wall = wall_time(root);
    let mut out = Vec::with_capacity(366);
    for month in 1..=12 {
        let first = date(root.year(), month, 1);
        for day in 1..=first.days_in_month() {
            push_candidate(&mut out, date(root.year(), month, day), wall, root);
        }
    }
    out
}

/// Every day of the root's month at the root's time.
fn month_days(root: &Zoned) -> Vec<Zoned> {
    let wall = wall_time(root);
    let first = root.date().first_of_month();
    let mut out = Vec::with_capacity(31);
    for day in 1..=first.days_in_month() {
        push_candidate(&mut out, date(root.year(), root.month(), day), wall, root);
    }
    out
}

/// Seven consecutive days starting at the most recent `week_start` at or
/// before the root.
fn week_days(root: &Zoned, week_start: Weekday) -> Vec<Zoned> {
    let wall = wall_time(root);
    let mut day = root.date();
    while day.weekday() != week_start {
        match day.yesterday() {
            Ok(prev) => day = prev,
            Err(_) => return Vec::new(),
        }
    }
    let mut out = Vec::with_capacity(7);
    for _ in 0..7 {
        push_candidate(&mut out, day, wall, root);
        match day.tomorrow() {
            Ok(next) => day = next,
            Err(_) => break,
        }
    }
    out
}

/// The time-of-day grid for one day-or-finer period.
///
/// BYHOUR expands only at DAILY; BYMINUTE at DAILY through MINUTELY;
/// BYSECOND at every sub-daily frequency. A list that does not expand here
/// still limits during filtering. The grid is emitted in list order,
/// hour-major.
fn times_of_day(rule: &RecurringRule, root: &Zoned) -> Vec<Zoned> {
    let own_hour = [i16::from(root.hour())];
    let own_minute = [i16::from(root.minute())];
    let own_second = [i16::from(root.second())];

    let hours: &[i16] = if !rule.by_hour.is_empty() && rule.frequency >= Frequency::Daily {
        &rule.by_hour
    } else {
        &own_hour
    };
    let minutes: &[i16] = if !rule.by_minute.is_empty() && rule.frequency >= Frequency::Minutely {
        &rule.by_minute
    } else {
        &own_minute
    };
    let seconds: &[i16] = if !rule.by_second.is_empty() {
        &rule.by_second
    } else {
        &own_second
    };

    let mut out = Vec::with_capacity(hours.len() * minutes.len() * seconds.len());
    for &hour in hours {
        for &minute in minutes {
            for &second in seconds {
                // Ranges were validated at parse time; a leap second
                // clamps to :59 in civil form.
                let wall = time(hour as i8, minute as i8, second.min(59) as i8, 0);
                push_candidate(&mut out, root.date(), wall, root);
            }
        }
    }
    out
}

fn wall_time(root: &Zoned) -> Time {
    time(root.hour(), root.minute(), root.second(), 0)
}

fn push_candidate(out: &mut Vec<Zoned>, day: Date, wall: Time, root: &Zoned) {
    if let Ok(zoned) = DateTime::from_parts(day, wall).to_zoned(root.time_zone().clone()) {
        out.push(zoned);
    }
}
