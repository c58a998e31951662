// SPDX-FileCopyrightText: 2026 The recurring authors
//
// SPDX-License-Identifier: Apache-2.0

//! Duration values, reduced to an exact number of seconds.

use chumsky::Parser;
use chumsky::extra::ParserExtra;
use chumsky::input::{Input, Stream};
use chumsky::label::LabelError;
use chumsky::prelude::*;

use jiff::SignedDuration;

use crate::error::RuleError;
use crate::value::ValueExpected;

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * 60;
const SECS_PER_DAY: i64 = 24 * 60 * 60;
const SECS_PER_WEEK: i64 = 7 * 24 * 60 * 60;

/// Format Definition:
///
/// ```txt
/// dur-value = (["-"]) "P" [1*DIGIT "W"] [1*DIGIT "D"]
///             ["T" [1*DIGIT "H"] [1*DIGIT "M"] [1*DIGIT "S"]]
/// ```
///
/// At least one component must be present after the `P`. The result is the
/// signed total in seconds, weeks counting as 604 800 seconds.
pub fn value_duration<'src, I, E>() -> impl Parser<'src, I, i64, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let int = select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(10)
        .collect::<String>()
        .try_map_with(|s, e| {
            lexical::parse::<i64, _>(&s)
                .map_err(|_| E::Error::expected_found([ValueExpected::Number], None, e.span()))
        });

    let week = int.then_ignore(just('W'));
    let day = int.then_ignore(just('D'));
    let hour = int.then_ignore(just('H'));
    let minute = int.then_ignore(just('M'));
    let second = int.then_ignore(just('S'));

    let time = just('T').ignore_then(hour.or_not().then(minute.or_not()).then(second.or_not()));

    let sign = just('-').or_not().map(|sign| sign.is_none());

    sign.then_ignore(just('P'))
        .then(week.or_not())
        .then(day.or_not())
        .then(time.or_not())
        .try_map(|(((positive, week), day), time), span| {
            let ((hour, minute), second) = time.unwrap_or(((None, None), None));
            if week.is_none()
                && day.is_none()
                && hour.is_none()
                && minute.is_none()
                && second.is_none()
            {
                return Err(E::Error::expected_found(
                    [ValueExpected::Duration],
                    None,
                    span,
                ));
            }
            let total = week.unwrap_or(0) * SECS_PER_WEEK
                + day.unwrap_or(0) * SECS_PER_DAY
                + hour.unwrap_or(0) * SECS_PER_HOUR
                + minute.unwrap_or(0) * SECS_PER_MINUTE
                + second.unwrap_or(0);
            Ok(if positive { total } else { -total })
        })
}

/// Parse a duration fragment such as `P15DT5H0M20S` or `-P1W`.
///
/// # Errors
/// [`RuleError::BadFormat`] carrying the fragment when it does not match
/// the duration grammar.
pub fn parse_duration(src: &str) -> Result<SignedDuration, RuleError> {
    let stream = Stream::from_iter(src.chars());
    let parsed: Result<i64, Vec<Rich<'_, char>>> = value_duration::<'_, _, extra::Err<_>>()
        .then_ignore(end())
        .parse(stream)
        .into_result();
    parsed
        .map(SignedDuration::from_secs)
        .map_err(|_| RuleError::BadFormat(src.to_string()))
}
