// SPDX-FileCopyrightText: 2026 The recurring authors
//
// SPDX-License-Identifier: Apache-2.0

//! Value grammars specific to RRULE parts: weekday codes, BYDAY tokens,
//! and the signed integer lists shared by the numeric BY-parts.

use chumsky::Parser;
use chumsky::extra::ParserExtra;
use chumsky::input::{Input, Stream};
use chumsky::prelude::*;

use jiff::civil::Weekday;

use crate::error::RuleError;
use crate::keyword::{
    KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE,
};
use crate::rule::WeekdayNum;
use crate::value::digit;

/// The two-letter code for a weekday.
#[must_use]
pub(crate) fn weekday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sunday => KW_DAY_SU,
        Weekday::Monday => KW_DAY_MO,
        Weekday::Tuesday => KW_DAY_TU,
        Weekday::Wednesday => KW_DAY_WE,
        Weekday::Thursday => KW_DAY_TH,
        Weekday::Friday => KW_DAY_FR,
        Weekday::Saturday => KW_DAY_SA,
    }
}

/// The weekday named by a two-letter code, if any.
#[must_use]
pub(crate) fn weekday_from_code(code: &str) -> Option<Weekday> {
    match code {
        KW_DAY_SU => Some(Weekday::Sunday),
        KW_DAY_MO => Some(Weekday::Monday),
        KW_DAY_TU => Some(Weekday::Tuesday),
        KW_DAY_WE => Some(Weekday::Wednesday),
        KW_DAY_TH => Some(Weekday::Thursday),
        KW_DAY_FR => Some(Weekday::Friday),
        KW_DAY_SA => Some(Weekday::Saturday),
        _ => None,
    }
}

/// ```txt
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
pub fn weekday<'src, I, E>() -> impl Parser<'src, I, Weekday, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    choice((
        just(KW_DAY_SU).to(Weekday::Sunday),
        just(KW_DAY_MO).to(Weekday::Monday),
        just(KW_DAY_TU).to(Weekday::Tuesday),
        just(KW_DAY_WE).to(Weekday::Wednesday),
        just(KW_DAY_TH).to(Weekday::Thursday),
        just(KW_DAY_FR).to(Weekday::Friday),
        just(KW_DAY_SA).to(Weekday::Saturday),
    ))
}

/// ```txt
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// ordwk       = 1*2DIGIT
/// ```
///
/// A leading `+` is folded into the bare offset; it is dropped when the
/// rule is rendered back to text.
pub fn weekdaynum<'src, I, E>() -> impl Parser<'src, I, WeekdayNum, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    let ordwk = digit().then(digit().or_not()).map(|(a, b)| match b {
        Some(b) => a * 10 + b,
        None => a,
    });

    is_positive()
        .then(ordwk)
        .map(|(positive, n)| if positive { n } else { -n })
        .or_not()
        .then(weekday())
        .map(|(offset, weekday)| WeekdayNum {
            weekday,
            offset: offset.unwrap_or(0),
        })
}

/// ```txt
/// bywdaylist  = ( weekdaynum *("," weekdaynum) )
/// ```
pub fn weekdaynum_list<'src, I, E>() -> impl Parser<'src, I, Vec<WeekdayNum>, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    weekdaynum().separated_by(just(',')).at_least(1).collect()
}

fn is_positive<'src, I, E>() -> impl Parser<'src, I, bool, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|c| !matches!(c, Some('-')))
}

/// Parse a BYDAY value, anchored to the full fragment.
pub(crate) fn parse_by_day(src: &str) -> Result<Vec<WeekdayNum>, RuleError> {
    let stream = Stream::from_iter(src.chars());
    let parsed: Result<Vec<WeekdayNum>, Vec<Rich<'_, char>>> =
        weekdaynum_list::<'_, _, extra::Err<_>>()
            .then_ignore(end())
            .parse(stream)
            .into_result();
    parsed.map_err(|_| RuleError::BadFormat(src.to_string()))
}

/// Parse a comma-separated list of signed integers, preserving order.
///
/// The error names the item that failed, not the whole list.
pub(crate) fn parse_int_list(src: &str) -> Result<Vec<i16>, RuleError> {
    src.split(',')
        .map(|item| {
            let digits = item.strip_prefix('+').unwrap_or(item);
            lexical::parse::<i16, _>(digits).map_err(|_| RuleError::BadNumber(item.to_string()))
        })
        .collect()
}
