// SPDX-FileCopyrightText: 2026 The recurring authors
//
// SPDX-License-Identifier: Apache-2.0

//! Basic-format date-time values as used by DTSTART, EXDATE, and UNTIL.
//!
//! The textual form is `YYYYMMDD`, optionally followed by `Thhmmss` and a
//! trailing `Z` marking UTC. A bare date resolves to midnight UTC; a
//! date-time without `Z` takes a caller-supplied default zone.

use chumsky::Parser;
use chumsky::extra::ParserExtra;
use chumsky::input::{Input, Stream};
use chumsky::label::LabelError;
use chumsky::prelude::*;

use jiff::Zoned;
use jiff::civil::{self, DateTime};
use jiff::tz::TimeZone;

use crate::error::RuleError;
use crate::keyword::KW_TZID;
use crate::value::{ValueExpected, digit, two_digits};

/// Date component of a basic-format timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueDate {
    /// Year component.
    pub year: i16,
    /// Month component, 1-12.
    pub month: i8,
    /// Day component, 1-31, valid for the month.
    pub day: i8,
}

impl ValueDate {
    /// Convert to `jiff::civil::Date`. Fields were validated at parse time.
    #[must_use]
    pub fn civil_date(self) -> civil::Date {
        civil::date(self.year, self.month, self.day)
    }
}

/// Time component of a basic-format timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueTime {
    /// Hour component, 0-23.
    pub hour: i8,
    /// Minute component, 0-59.
    pub minute: i8,
    /// Second component, 0-60 (60 for a leap second).
    pub second: i8,
    /// Whether a trailing `Z` marked the time as UTC.
    pub utc: bool,
}

impl ValueTime {
    /// Convert to `jiff::civil::Time`. A leap second clamps to `:59`.
    #[must_use]
    pub fn civil_time(self) -> civil::Time {
        civil::time(self.hour, self.minute, self.second.min(59), 0)
    }
}

/// A basic-format timestamp: a date with an optional time-of-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueDateTime {
    /// Date component.
    pub date: ValueDate,
    /// Time component; absent for the bare `YYYYMMDD` form.
    pub time: Option<ValueTime>,
}

impl ValueDateTime {
    /// Resolve to an instant.
    ///
    /// A bare date is midnight UTC. A time with `Z` is UTC; otherwise
    /// `default` applies. Ambiguous or missing wall-clock times near DST
    /// transitions resolve by jiff's compatible policy.
    pub fn to_zoned(self, default: &TimeZone) -> Result<Zoned, RuleError> {
        let (time, tz) = match self.time {
            None => (civil::time(0, 0, 0, 0), TimeZone::UTC),
            Some(t) if t.utc => (t.civil_time(), TimeZone::UTC),
            Some(t) => (t.civil_time(), default.clone()),
        };
        DateTime::from_parts(self.date.civil_date(), time)
            .to_zoned(tz)
            .map_err(|_| {
                RuleError::BadFormat(format!(
                    "{:04}{:02}{:02}",
                    self.date.year, self.date.month, self.date.day
                ))
            })
    }
}

/// Format Definition:
///
/// ```txt
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-28, 01-29, 01-30, 01-31
///                                    ;based on month/year
/// ```
pub fn value_date<'src, I, E>() -> impl Parser<'src, I, ValueDate, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let year = two_digits()
        .then(two_digits())
        .map(|(a, b)| 100 * a + b);

    year.then(two_digits())
        .then(two_digits())
        .try_map(|((year, month), day), span| {
            let month = month as i8;
            let day = day as i8;
            if civil::Date::new(year, month, day).is_err() {
                return Err(E::Error::expected_found([ValueExpected::Date], None, span));
            }
            Ok(ValueDate { year, month, day })
        })
}

/// Format Definition:
///
/// ```txt
/// time         = time-hour time-minute time-second [time-utc]
///
/// time-hour    = 2DIGIT        ;00-23
/// time-minute  = 2DIGIT        ;00-59
/// time-second  = 2DIGIT        ;00-60
/// time-utc     = "Z"
/// ```
pub fn value_time<'src, I, E>() -> impl Parser<'src, I, ValueTime, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    two_digits()
        .then(two_digits())
        .then(two_digits())
        .then(just('Z').or_not())
        .try_map(|(((hour, minute), second), utc), span| {
            if hour > 23 || minute > 59 || second > 60 {
                return Err(E::Error::expected_found([ValueExpected::Time], None, span));
            }
            Ok(ValueTime {
                hour: hour as i8,
                minute: minute as i8,
                second: second as i8,
                utc: utc.is_some(),
            })
        })
}

/// Format Definition:
///
/// ```txt
/// datetime = YYYYMMDD ( "T" hhmmss ( "Z" )? )?
/// ```
pub fn value_date_time<'src, I, E>() -> impl Parser<'src, I, ValueDateTime, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    value_date()
        .then(just('T').ignore_then(value_time()).or_not())
        .map(|(date, time)| ValueDateTime { date, time })
}

/// Parse one basic-format timestamp, anchored to the full fragment.
pub(crate) fn parse_date_time(src: &str) -> Result<ValueDateTime, RuleError> {
    let stream = Stream::from_iter(src.chars());
    let parsed: Result<ValueDateTime, Vec<Rich<'_, char>>> =
        value_date_time::<'_, _, extra::Err<_>>()
            .then_ignore(end())
            .parse(stream)
            .into_result();
    parsed.map_err(|_| RuleError::BadFormat(src.to_string()))
}

/// Look up a TZID in the platform time zone database.
pub(crate) fn resolve_zone(name: &str) -> Result<TimeZone, RuleError> {
    TimeZone::get(name).map_err(|_| RuleError::UnknownZone(name.to_string()))
}

/// Render a timestamp as `YYYYMMDDThhmmss`, with a trailing `Z` when the
/// zone is UTC.
#[must_use]
pub(crate) fn format_date_time(t: &Zoned) -> String {
    let suffix = if *t.time_zone() == TimeZone::UTC { "Z" } else { "" };
    format!(
        "{:04}{:02}{:02}T{:02}{:02}{:02}{suffix}",
        t.year(),
        t.month(),
        t.day(),
        t.hour(),
        t.minute(),
        t.second(),
    )
}

/// Render a non-empty list of timestamps in the zone of the first one.
///
/// UTC uses the `:` form; a named zone uses `;TZID=<zone>:`. A zone that is
/// neither UTC nor IANA-named falls back to the UTC form.
#[must_use]
pub(crate) fn format_date_time_group(times: &[Zoned]) -> String {
    let Some(first) = times.first() else {
        return String::new();
    };
    let tz = first.time_zone();
    match tz.iana_name() {
        Some(name) if *tz != TimeZone::UTC => {
            let joined = times
                .iter()
                .map(|t| format_date_time(&t.with_time_zone(tz.clone())))
                .collect::<Vec<_>>()
                .join(",");
            format!(";{KW_TZID}={name}:{joined}")
        }
        _ => {
            let joined = times
                .iter()
                .map(|t| format_date_time(&t.with_time_zone(TimeZone::UTC)))
                .collect::<Vec<_>>()
                .join(",");
            format!(":{joined}")
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn parses_date_time() {
        #[rustfmt::skip]
        let success_cases = [
            ("19980118T230000",  (1998,  1, 18), Some((23,  0,  0, false))),
            ("19980119T070000Z", (1998,  1, 19), Some(( 7,  0,  0, true))),
            ("19970630T235960Z", (1997,  6, 30), Some((23, 59, 60, true))),
            ("19970714",         (1997,  7, 14), None),
            ("20000229T120000",  (2000,  2, 29), Some((12,  0,  0, false))),
        ];
        for (src, (y, m, d), time) in success_cases {
            let parsed = parse_date_time(src).unwrap();
            assert_eq!(parsed.date, ValueDate { year: y, month: m, day: d }, "Failed for {src}");
            let expected_time = time.map(|(hour, minute, second, utc)| ValueTime {
                hour,
                minute,
                second,
                utc,
            });
            assert_eq!(parsed.time, expected_time, "Failed for {src}");
        }

        let fail_cases = [
            "1997071",          // too short
            "19970714 133000",  // missing 'T'
            "19970714T2500",    // truncated time
            "19970714T250000",  // invalid hour
            "19970714T126000",  // invalid minute
            "19970714T123461",  // invalid second
            "19970230T120000",  // invalid calendar date
            "abcdefgh",         // non-digit content
            "19970714T133000ZZ",
        ];
        for src in fail_cases {
            assert!(parse_date_time(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn resolves_zone_per_utc_marker() {
        let ny = TimeZone::get("America/New_York").unwrap();

        let local = parse_date_time("19980119T070000").unwrap();
        let zoned = local.to_zoned(&ny).unwrap();
        assert_eq!(zoned.datetime(), date(1998, 1, 19).at(7, 0, 0, 0));
        assert_eq!(zoned.time_zone(), &ny);

        let utc = parse_date_time("19980119T070000Z").unwrap();
        let zoned = utc.to_zoned(&ny).unwrap();
        assert_eq!(zoned.time_zone(), &TimeZone::UTC);

        // A bare date ignores the default zone.
        let date_only = parse_date_time("19970714").unwrap();
        let zoned = date_only.to_zoned(&ny).unwrap();
        assert_eq!(zoned.datetime(), date(1997, 7, 14).at(0, 0, 0, 0));
        assert_eq!(zoned.time_zone(), &TimeZone::UTC);
    }

    #[test]
    fn formats_date_time_with_utc_marker() {
        let utc = date(1998, 1, 19)
            .at(7, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap();
        assert_eq!(format_date_time(&utc), "19980119T070000Z");

        let ny = TimeZone::get("America/New_York").unwrap();
        let local = date(1998, 1, 19).at(7, 0, 0, 0).to_zoned(ny).unwrap();
        assert_eq!(format_date_time(&local), "19980119T070000");
    }

    #[test]
    fn formats_groups_in_first_zone() {
        let ny = TimeZone::get("America/New_York").unwrap();
        let first = date(2018, 3, 16).at(15, 0, 0, 0).to_zoned(ny.clone()).unwrap();
        // Same instant as 2018-03-23 15:00 New York, expressed in UTC.
        let second = date(2018, 3, 23)
            .at(15, 0, 0, 0)
            .to_zoned(ny)
            .unwrap()
            .with_time_zone(TimeZone::UTC);

        assert_eq!(
            format_date_time_group(&[first.clone(), second.clone()]),
            ";TZID=America/New_York:20180316T150000,20180323T150000"
        );
        assert_eq!(
            format_date_time_group(&[second.clone(), first]),
            ":20180323T190000Z,20180316T190000Z"
        );
        assert_eq!(format_date_time_group(&[]), "");
    }
}
