// SPDX-FileCopyrightText: 2026 The recurring authors
//
// SPDX-License-Identifier: Apache-2.0

//! The per-period filter pipeline.
//!
//! Phase 1 applies every engaged BY-filter (AND across filters, OR within a
//! list) plus the implicit anchor filters. Phase 2 selects by BYSETPOS over
//! the phase-1 survivors. Phase 3 drops exceptions, enforces the anchor
//! floor, and applies the caller's before/after windows.

use jiff::Zoned;

use crate::rule::{Frequency, RecurringRule, WeekdayNum};

/// What one period contributed, plus whether a `before` cut-off was seen.
pub(crate) struct PeriodOutcome {
    /// Candidates that passed every phase, in period order.
    pub(crate) survivors: Vec<Zoned>,
    /// A candidate at or past the `before` bound was observed; since
    /// periods advance monotonically, no later period can contribute.
    pub(crate) cut_off: bool,
}

/// Run the full pipeline over one period's candidate set.
pub(crate) fn filter_period(
    rule: &RecurringRule,
    anchor: &Zoned,
    candidates: Vec<Zoned>,
    before: Option<&Zoned>,
    after: Option<&Zoned>,
) -> PeriodOutcome {
    let total = candidates.len() as i64;
    let selected: Vec<Zoned> = candidates
        .into_iter()
        .enumerate()
        .filter(|(index, candidate)| {
            passes_by_filters(rule, anchor, candidate, *index as i64, total)
        })
        .map(|(_, candidate)| candidate)
        .collect();

    let selected_total = selected.len() as i64;
    let mut survivors = Vec::new();
    let mut cut_off = false;
    for (index, candidate) in selected.into_iter().enumerate() {
        let mut keep = rule.by_set_pos.is_empty()
            || set_pos_matches(&rule.by_set_pos, index as i64, selected_total);
        if rule
            .exceptions
            .iter()
            .any(|ex| ex.timestamp() == candidate.timestamp())
        {
            keep = false;
        }
        if let Some(before) = before {
            if candidate.timestamp() >= before.timestamp() {
                keep = false;
                cut_off = true;
            }
        }
        if let Some(after) = after {
            if candidate.timestamp() <= after.timestamp() {
                keep = false;
            }
        }
        if keep && candidate.timestamp() >= anchor.timestamp() {
            survivors.push(candidate);
        }
    }
    PeriodOutcome { survivors, cut_off }
}

/// Phase 1: every engaged filter must match. A candidate with no engaged
/// filter at all does not survive.
fn passes_by_filters(
    rule: &RecurringRule,
    anchor: &Zoned,
    candidate: &Zoned,
    index: i64,
    total: i64,
) -> bool {
    let mut engaged = false;

    if !rule.by_year_day.is_empty() {
        engaged = true;
        let day_of_year = i64::from(candidate.date().day_of_year());
        if !rule
            .by_year_day
            .iter()
            .any(|&v| value_or_end_matches(day_of_year, v, index, total))
        {
            return false;
        }
    }
    if !rule.by_month_day.is_empty() {
        engaged = true;
        let day = i64::from(candidate.day());
        if !rule
            .by_month_day
            .iter()
            .any(|&v| value_or_end_matches(day, v, index, total))
        {
            return false;
        }
    }
    if !rule.by_month.is_empty() {
        engaged = true;
        let month = i64::from(candidate.month());
        if !rule
            .by_month
            .iter()
            .any(|&v| value_or_end_matches(month, v, index, total))
        {
            return false;
        }
    }
    if !rule.by_week_no.is_empty() {
        engaged = true;
        let week = i64::from(candidate.date().iso_week_date().week());
        if !rule
            .by_week_no
            .iter()
            .any(|&v| value_or_end_matches(week, v, index, total))
        {
            return false;
        }
    }
    if !rule.by_day.is_empty() {
        engaged = true;
        if !by_day_matches(&rule.by_day, candidate, index, total) {
            return false;
        }
    }

    // Time-of-day lists take no negative or positional values.
    if !rule.by_hour.is_empty() {
        engaged = true;
        if !rule.by_hour.contains(&i16::from(candidate.hour())) {
            return false;
        }
    }
    if !rule.by_minute.is_empty() {
        engaged = true;
        if !rule.by_minute.contains(&i16::from(candidate.minute())) {
            return false;
        }
    }
    if !rule.by_second.is_empty() {
        engaged = true;
        if !rule.by_second.contains(&i16::from(candidate.second())) {
            return false;
        }
    }

    // Implicit filters: a field the frequency spans but no BY-part
    // constrains must match the anchor (RFC 5545 §3.3.10's table, and the
    // only thing keeping a bare YEARLY from emitting every day of a year).
    match rule.frequency {
        Frequency::Weekly if rule.by_day.is_empty() => {
            engaged = true;
            if candidate.weekday() != anchor.weekday() {
                return false;
            }
        }
        Frequency::Daily if rule.by_hour.is_empty() => {
            engaged = true;
            if candidate.hour() != anchor.hour() {
                return false;
            }
        }
        Frequency::Hourly if rule.by_minute.is_empty() => {
            engaged = true;
            if candidate.minute() != anchor.minute() {
                return false;
            }
        }
        Frequency::Minutely if rule.by_second.is_empty() => {
            engaged = true;
            if candidate.second() != anchor.second() {
                return false;
            }
        }
        Frequency::Monthly
            if rule.by_year_day.is_empty()
                && rule.by_month_day.is_empty()
                && rule.by_day.is_empty() =>
        {
            engaged = true;
            if candidate.day() != anchor.day() {
                return false;
            }
        }
        Frequency::Yearly
            if rule.by_year_day.is_empty()
                && rule.by_month_day.is_empty()
                && rule.by_day.is_empty() =>
        {
            engaged = true;
            if candidate.day() != anchor.day() {
                return false;
            }
            if rule.by_month.is_empty()
                && rule.by_week_no.is_empty()
                && candidate.month() != anchor.month()
            {
                return false;
            }
        }
        _ => {}
    }

    engaged
}

/// Positive values match the candidate's field; negative values count from
/// the end of the period's candidate list.
fn value_or_end_matches(actual: i64, value: i16, index: i64, total: i64) -> bool {
    let value = i64::from(value);
    if value > 0 {
        actual == value
    } else if value < 0 {
        total - index + value == 0
    } else {
        false
    }
}

fn by_day_matches(entries: &[WeekdayNum], candidate: &Zoned, index: i64, total: i64) -> bool {
    entries.iter().any(|entry| {
        if entry.weekday != candidate.weekday() {
            return false;
        }
        match i64::from(entry.offset) {
            0 => true,
            offset if offset > 0 => index / 7 + 1 == offset,
            offset => (total - index - 1) / 7 + offset + 1 == 0,
        }
    })
}

fn set_pos_matches(positions: &[i16], index: i64, total: i64) -> bool {
    positions.iter().any(|&v| {
        let v = i64::from(v);
        if v > 0 {
            index == v - 1
        } else if v < 0 {
            total - index + v == 0
        } else {
            false
        }
    })
}
