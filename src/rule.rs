// SPDX-FileCopyrightText: 2026 The recurring authors
//
// SPDX-License-Identifier: Apache-2.0

//! The in-memory recurrence rule: model, bounds validation, and the
//! canonical textual rendering.

use std::fmt::{self, Display};

use jiff::Zoned;
use jiff::civil::Weekday;

use crate::error::RuleError;
use crate::iter::OccurrenceIter;
use crate::keyword::{
    KW_DTSTART, KW_EXDATE, KW_RRULE, KW_RRULE_BYDAY, KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE,
    KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY, KW_RRULE_BYSECOND, KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO,
    KW_RRULE_BYYEARDAY, KW_RRULE_COUNT, KW_RRULE_FREQ, KW_RRULE_FREQ_DAILY, KW_RRULE_FREQ_HOURLY,
    KW_RRULE_FREQ_MINUTELY, KW_RRULE_FREQ_MONTHLY, KW_RRULE_FREQ_SECONDLY, KW_RRULE_FREQ_WEEKLY,
    KW_RRULE_FREQ_YEARLY, KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::value::datetime::{format_date_time, format_date_time_group};
use crate::value::recur::weekday_code;

/// Recurrence frequency, ordered from finest to coarsest.
///
/// The ordering decides whether a BY-part expands candidates within a
/// period or merely filters them (RFC 5545 §3.3.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[expect(missing_docs)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Secondly => write!(f, "{KW_RRULE_FREQ_SECONDLY}"),
            Frequency::Minutely => write!(f, "{KW_RRULE_FREQ_MINUTELY}"),
            Frequency::Hourly => write!(f, "{KW_RRULE_FREQ_HOURLY}"),
            Frequency::Daily => write!(f, "{KW_RRULE_FREQ_DAILY}"),
            Frequency::Weekly => write!(f, "{KW_RRULE_FREQ_WEEKLY}"),
            Frequency::Monthly => write!(f, "{KW_RRULE_FREQ_MONTHLY}"),
            Frequency::Yearly => write!(f, "{KW_RRULE_FREQ_YEARLY}"),
        }
    }
}

/// A BYDAY entry: a weekday with a positional offset.
///
/// Offset 0 selects every occurrence of the weekday within the period;
/// positive N the N-th occurrence; negative N the N-th from the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayNum {
    /// Day of the week.
    pub weekday: Weekday,
    /// Positional offset within the enclosing period.
    pub offset: i16,
}

impl Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.offset != 0 {
            write!(f, "{}", self.offset)?;
        }
        write!(f, "{}", weekday_code(self.weekday))
    }
}

/// A parsed recurrence rule.
///
/// Constructed by [`crate::parse()`], optionally adjusted by the caller
/// (calendar stores often keep DTSTART separately from the rule text), and
/// consumed through [`RecurringRule::iter`]. Equality is field-by-field
/// with order-sensitive lists; timestamps compare by instant.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringRule {
    /// Anchor of the series; its zone is the rendering zone for every
    /// occurrence. `None` until the caller supplies one for rule text
    /// without a DTSTART line.
    pub dt_start: Option<Zoned>,
    /// Required frequency.
    pub frequency: Frequency,
    /// Absolute upper bound; occurrences strictly after it end the series.
    pub until: Option<Zoned>,
    /// Occurrence cap; 0 means unbounded by count.
    pub count: u32,
    /// Period stride, at least 1.
    pub interval: u32,
    /// Seconds, 0-60.
    pub by_second: Vec<i16>,
    /// Minutes, 0-59.
    pub by_minute: Vec<i16>,
    /// Hours, 0-23.
    pub by_hour: Vec<i16>,
    /// Weekday selectors with offsets in -53..=53.
    pub by_day: Vec<WeekdayNum>,
    /// Month days, +-1..=31.
    pub by_month_day: Vec<i16>,
    /// Year days, +-1..=366.
    pub by_year_day: Vec<i16>,
    /// ISO week numbers, +-1..=53.
    pub by_week_no: Vec<i16>,
    /// Months, 1-12.
    pub by_month: Vec<i16>,
    /// Positional selection over a period's surviving set, +-1..=366.
    pub by_set_pos: Vec<i16>,
    /// First day of the work week; shifts WEEKLY period boundaries.
    pub week_start: Weekday,
    /// Instants excluded from the series by exact (cross-zone) equality.
    pub exceptions: Vec<Zoned>,
}

impl RecurringRule {
    /// A rule with the given frequency and every other field at its
    /// default: no anchor, no bounds, interval 1, work week starting
    /// Monday.
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        RecurringRule {
            dt_start: None,
            frequency,
            until: None,
            count: 0,
            interval: 1,
            by_second: Vec::new(),
            by_minute: Vec::new(),
            by_hour: Vec::new(),
            by_day: Vec::new(),
            by_month_day: Vec::new(),
            by_year_day: Vec::new(),
            by_week_no: Vec::new(),
            by_month: Vec::new(),
            by_set_pos: Vec::new(),
            week_start: Weekday::Monday,
            exceptions: Vec::new(),
        }
    }

    /// Check every BY-part and the interval against its RFC 5545 range.
    ///
    /// # Errors
    /// [`RuleError::Bounds`] naming the first offending part.
    pub fn validate(&self) -> Result<(), RuleError> {
        check_range(KW_RRULE_BYSECOND, "0 <= value <= 60", &self.by_second, 0, 60, true)?;
        check_range(KW_RRULE_BYMINUTE, "0 <= value <= 59", &self.by_minute, 0, 59, true)?;
        check_range(KW_RRULE_BYHOUR, "0 <= value <= 23", &self.by_hour, 0, 23, true)?;
        let offsets: Vec<i16> = self.by_day.iter().map(|wd| wd.offset).collect();
        check_range(KW_RRULE_BYDAY, "-53 <= value <= 53", &offsets, -53, 53, true)?;
        check_range(KW_RRULE_BYMONTHDAY, "-31 <= value <= 31, value != 0", &self.by_month_day, -31, 31, false)?;
        check_range(KW_RRULE_BYYEARDAY, "-366 <= value <= 366, value != 0", &self.by_year_day, -366, 366, false)?;
        check_range(KW_RRULE_BYWEEKNO, "-53 <= value <= 53, value != 0", &self.by_week_no, -53, 53, false)?;
        check_range(KW_RRULE_BYMONTH, "1 <= value <= 12", &self.by_month, 1, 12, false)?;
        check_range(KW_RRULE_BYSETPOS, "-366 <= value <= 366, value != 0", &self.by_set_pos, -366, 366, false)?;
        if self.interval < 1 {
            return Err(RuleError::Bounds {
                part: KW_RRULE_INTERVAL,
                bounds: "1 <= value",
            });
        }
        Ok(())
    }

    /// Render the rule back to its textual form.
    ///
    /// Lines appear in DTSTART, EXDATE, RRULE order; RRULE parts in a fixed
    /// order with defaults omitted. Re-parsing the result yields an equal
    /// rule.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut lines = Vec::with_capacity(3);
        if let Some(dt_start) = &self.dt_start {
            let group = format_date_time_group(std::slice::from_ref(dt_start));
            lines.push(format!("{KW_DTSTART}{group}"));
        }
        if !self.exceptions.is_empty() {
            let group = format_date_time_group(&self.exceptions);
            lines.push(format!("{KW_EXDATE}{group}"));
        }
        lines.push(self.recur_string());
        lines.join("\n")
    }

    /// The RRULE line alone.
    fn recur_string(&self) -> String {
        let mut out = format!("{KW_RRULE}:{KW_RRULE_FREQ}={}", self.frequency);
        if self.interval != 1 {
            out.push_str(&format!(";{KW_RRULE_INTERVAL}={}", self.interval));
        }
        if let Some(until) = &self.until {
            out.push_str(&format!(";{KW_RRULE_UNTIL}={}", format_date_time(until)));
        }
        push_int_list(&mut out, KW_RRULE_BYSECOND, &self.by_second);
        push_int_list(&mut out, KW_RRULE_BYMINUTE, &self.by_minute);
        push_int_list(&mut out, KW_RRULE_BYHOUR, &self.by_hour);
        push_int_list(&mut out, KW_RRULE_BYMONTH, &self.by_month);
        push_int_list(&mut out, KW_RRULE_BYWEEKNO, &self.by_week_no);
        if self.count > 0 {
            out.push_str(&format!(";{KW_RRULE_COUNT}={}", self.count));
        }
        if self.week_start != Weekday::Monday {
            out.push_str(&format!(";{KW_RRULE_WKST}={}", weekday_code(self.week_start)));
        }
        if !self.by_day.is_empty() {
            let days = self
                .by_day
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            out.push_str(&format!(";{KW_RRULE_BYDAY}={days}"));
        }
        push_int_list(&mut out, KW_RRULE_BYMONTHDAY, &self.by_month_day);
        push_int_list(&mut out, KW_RRULE_BYYEARDAY, &self.by_year_day);
        push_int_list(&mut out, KW_RRULE_BYSETPOS, &self.by_set_pos);
        out
    }

    /// A lazy iterator over the rule's occurrences.
    ///
    /// The rule is borrowed immutably; any number of independent iterators
    /// may run over the same rule and will yield identical sequences.
    #[must_use]
    pub fn iter(&self) -> OccurrenceIter<'_> {
        OccurrenceIter::new(self)
    }
}

impl Display for RecurringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.serialize())
    }
}

fn check_range(
    part: &'static str,
    bounds: &'static str,
    values: &[i16],
    min: i16,
    max: i16,
    allow_zero: bool,
) -> Result<(), RuleError> {
    for &value in values {
        if value < min || value > max || (value == 0 && !allow_zero) {
            return Err(RuleError::Bounds { part, bounds });
        }
    }
    Ok(())
}

fn push_int_list(out: &mut String, key: &str, values: &[i16]) {
    if values.is_empty() {
        return;
    }
    let joined = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&format!(";{key}={joined}"));
}
