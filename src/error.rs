// SPDX-FileCopyrightText: 2026 The recurring authors
//
// SPDX-License-Identifier: Apache-2.0

//! Error type shared by the parser and the value codecs.

/// Errors produced while parsing rule text or timestamp/duration values.
///
/// All errors are returned by value; iteration over a parsed rule never
/// fails (exhaustion and the hard limit are signalled through the iterator
/// itself).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// A timestamp, duration, or grouped value did not match its grammar.
    /// Carries the offending fragment.
    #[error("invalid format: {0}")]
    BadFormat(String),

    /// A TZID named a zone the platform time zone database does not know.
    #[error("unknown time zone: {0}")]
    UnknownZone(String),

    /// An unrecognized RRULE key, line prefix, or property parameter.
    #[error("unknown key: {0}")]
    UnknownKey(String),

    /// A FREQ value outside the seven RFC 5545 frequencies.
    #[error("{0} is not a valid FREQ")]
    BadFrequency(String),

    /// A rule part value outside its RFC 5545 range.
    #[error("{part} rule fail: {bounds}")]
    Bounds {
        /// The rule part whose value is out of range.
        part: &'static str,
        /// The permitted range, rendered for the message.
        bounds: &'static str,
    },

    /// A field that must be an integer failed to parse as one.
    #[error("invalid integer: {0}")]
    BadNumber(String),
}
