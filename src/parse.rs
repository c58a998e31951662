// SPDX-FileCopyrightText: 2026 The recurring authors
//
// SPDX-License-Identifier: Apache-2.0

//! Parsing of the newline-delimited DTSTART / EXDATE / RRULE block.
//!
//! The line and `KEY=VALUE` structure is scanned linearly so that errors
//! can name the exact offending fragment; the value grammars themselves
//! live in [`crate::value`].

use jiff::tz::TimeZone;
use jiff::Zoned;

use crate::error::RuleError;
use crate::keyword::{
    KW_DTSTART, KW_EXDATE, KW_RRULE, KW_RRULE_BYDAY, KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE,
    KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY, KW_RRULE_BYSECOND, KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO,
    KW_RRULE_BYYEARDAY, KW_RRULE_COUNT, KW_RRULE_FREQ, KW_RRULE_FREQ_DAILY, KW_RRULE_FREQ_HOURLY,
    KW_RRULE_FREQ_MINUTELY, KW_RRULE_FREQ_MONTHLY, KW_RRULE_FREQ_SECONDLY, KW_RRULE_FREQ_WEEKLY,
    KW_RRULE_FREQ_YEARLY, KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST, KW_TZID,
};
use crate::rule::{Frequency, RecurringRule};
use crate::value::datetime::{parse_date_time, resolve_zone};
use crate::value::recur::{parse_by_day, parse_int_list, weekday_from_code};

/// Parse a newline-delimited block of DTSTART, EXDATE, and RRULE lines
/// into a validated rule.
///
/// A block without a DTSTART line parses into an anchorless rule; assign
/// [`RecurringRule::dt_start`] before iterating. Empty lines and a
/// trailing `\r` per line are tolerated; anything else unrecognized is an
/// error.
///
/// # Errors
/// Any [`RuleError`]: malformed values, unknown keys or zones, a missing
/// or invalid FREQ, or BY-part values outside their RFC 5545 ranges.
pub fn parse(input: &str) -> Result<RecurringRule, RuleError> {
    let mut rule = RecurringRule::new(Frequency::Yearly);
    let mut have_freq = false;

    for raw in input.split('\n') {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix(KW_RRULE) {
            if let Some(body) = rest.strip_prefix(':') {
                parse_recur_parts(&mut rule, &mut have_freq, body)?;
                continue;
            }
        }
        if let Some(rest) = line.strip_prefix(KW_DTSTART) {
            let mut times = parse_date_time_group(rest)?;
            if times.is_empty() {
                return Err(RuleError::BadFormat(line.to_string()));
            }
            rule.dt_start = Some(times.remove(0));
            continue;
        }
        if let Some(rest) = line.strip_prefix(KW_EXDATE) {
            rule.exceptions.extend(parse_date_time_group(rest)?);
            continue;
        }
        return Err(RuleError::UnknownKey(line_prefix(line).to_string()));
    }

    if !have_freq {
        return Err(RuleError::BadFormat(KW_RRULE_FREQ.to_string()));
    }
    rule.validate()?;
    Ok(rule)
}

/// The property name of an unrecognized line, for the error message.
fn line_prefix(line: &str) -> &str {
    line.split([';', ':']).next().unwrap_or(line)
}

/// Parse the remainder of a DTSTART/EXDATE line: an optional `;TZID=<zone>`
/// parameter, a `:`, and a comma-separated timestamp list sharing the zone.
fn parse_date_time_group(rest: &str) -> Result<Vec<Zoned>, RuleError> {
    let (zone, values) = if let Some(values) = rest.strip_prefix(':') {
        (TimeZone::UTC, values)
    } else if let Some(params) = rest.strip_prefix(';') {
        let Some((params, values)) = params.split_once(':') else {
            return Err(RuleError::BadFormat(rest.to_string()));
        };
        let mut zone = TimeZone::UTC;
        for param in params.split(';') {
            let Some((name, value)) = param.split_once('=') else {
                return Err(RuleError::BadFormat(param.to_string()));
            };
            if name == KW_TZID {
                zone = resolve_zone(value)?;
            } else {
                return Err(RuleError::UnknownKey(name.to_string()));
            }
        }
        (zone, values)
    } else {
        return Err(RuleError::BadFormat(rest.to_string()));
    };

    values
        .split(',')
        .map(|item| parse_date_time(item)?.to_zoned(&zone))
        .collect()
}

/// Fold one `;`-separated RRULE body into the rule.
fn parse_recur_parts(
    rule: &mut RecurringRule,
    have_freq: &mut bool,
    body: &str,
) -> Result<(), RuleError> {
    for part in body.split(';') {
        if part.is_empty() {
            continue;
        }
        let Some((key, value)) = part.split_once('=') else {
            return Err(RuleError::BadFormat(part.to_string()));
        };
        match key {
            KW_RRULE_FREQ => {
                rule.frequency = frequency_from_name(value)?;
                *have_freq = true;
            }
            KW_RRULE_UNTIL => {
                // UNTIL without a Z suffix is read in the anchor's zone;
                // lines are processed in input order.
                let zone = rule
                    .dt_start
                    .as_ref()
                    .map_or(TimeZone::UTC, |t| t.time_zone().clone());
                rule.until = Some(parse_date_time(value)?.to_zoned(&zone)?);
            }
            KW_RRULE_COUNT => rule.count = parse_unsigned(value)?,
            KW_RRULE_INTERVAL => rule.interval = parse_unsigned(value)?,
            KW_RRULE_BYSECOND => rule.by_second = parse_int_list(value)?,
            KW_RRULE_BYMINUTE => rule.by_minute = parse_int_list(value)?,
            KW_RRULE_BYHOUR => rule.by_hour = parse_int_list(value)?,
            KW_RRULE_BYDAY => rule.by_day = parse_by_day(value)?,
            KW_RRULE_BYMONTHDAY => rule.by_month_day = parse_int_list(value)?,
            KW_RRULE_BYYEARDAY => rule.by_year_day = parse_int_list(value)?,
            KW_RRULE_BYWEEKNO => rule.by_week_no = parse_int_list(value)?,
            KW_RRULE_BYMONTH => rule.by_month = parse_int_list(value)?,
            KW_RRULE_BYSETPOS => rule.by_set_pos = parse_int_list(value)?,
            KW_RRULE_WKST => {
                rule.week_start = weekday_from_code(value)
                    .ok_or_else(|| RuleError::BadFormat(value.to_string()))?;
            }
            _ => return Err(RuleError::UnknownKey(key.to_string())),
        }
    }
    Ok(())
}

fn frequency_from_name(value: &str) -> Result<Frequency, RuleError> {
    match value {
        KW_RRULE_FREQ_SECONDLY => Ok(Frequency::Secondly),
        KW_RRULE_FREQ_MINUTELY => Ok(Frequency::Minutely),
        KW_RRULE_FREQ_HOURLY => Ok(Frequency::Hourly),
        KW_RRULE_FREQ_DAILY => Ok(Frequency::Daily),
        KW_RRULE_FREQ_WEEKLY => Ok(Frequency::Weekly),
        KW_RRULE_FREQ_MONTHLY => Ok(Frequency::Monthly),
        KW_RRULE_FREQ_YEARLY => Ok(Frequency::Yearly),
        _ => Err(RuleError::BadFrequency(value.to_string())),
    }
}

fn parse_unsigned(value: &str) -> Result<u32, RuleError> {
    lexical::parse::<u32, _>(value).map_err(|_| RuleError::BadNumber(value.to_string()))
}
