// SPDX-FileCopyrightText: 2026 The recurring authors
//
// SPDX-License-Identifier: Apache-2.0

//! Parsers for the value grammars used by DTSTART, EXDATE, and RRULE.

use std::borrow::Cow;

use chumsky::Parser;
use chumsky::error::RichPattern;
use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::prelude::*;

pub mod datetime;
pub mod duration;
pub mod recur;

pub use self::datetime::{ValueDate, ValueDateTime, ValueTime};

/// Failure reasons when a specific value type was expected but not found.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueExpected {
    /// A calendar date was expected
    Date,
    /// A wall-clock time was expected
    Time,
    /// An integer value was expected
    Number,
    /// A duration with at least one component was expected
    Duration,
}

impl From<ValueExpected> for RichPattern<'_, char> {
    fn from(expected: ValueExpected) -> Self {
        match expected {
            ValueExpected::Date => Self::Label(Cow::Borrowed("invalid date")),
            ValueExpected::Time => Self::Label(Cow::Borrowed("invalid time")),
            ValueExpected::Number => Self::Label(Cow::Borrowed("integer out of range")),
            ValueExpected::Duration => Self::Label(Cow::Borrowed("empty duration")),
        }
    }
}

/// Parse a single decimal digit.
pub(crate) fn digit<'src, I, E>() -> impl Parser<'src, I, i16, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    select! { c @ '0'..='9' => i16::from(c as u8 - b'0') }
}

/// Parse a two-digit field, `00`-`99`.
pub(crate) fn two_digits<'src, I, E>() -> impl Parser<'src, I, i16, E> + Copy
where
    I: Input<'src, Token = char, Span = SimpleSpan> + chumsky::input::ValueInput<'src>,
    E: ParserExtra<'src, I>,
{
    digit().then(digit()).map(|(a, b)| 10 * a + b)
}
