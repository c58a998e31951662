// SPDX-FileCopyrightText: 2026 The recurring authors
//
// SPDX-License-Identifier: Apache-2.0

//! Parse and expand iCalendar recurrence rules (RFC 5545 §3.3.10, §3.8.5).
//!
//! Rule text is a newline-separated block of up to three lines (DTSTART,
//! EXDATE, RRULE) and parses into a [`RecurringRule`]. Occurrences come
//! from a lazy [`OccurrenceIter`], which applies every BY-part, BYSETPOS,
//! exception dates, COUNT/UNTIL, and any caller-supplied window:
//!
//! ```
//! use recurring::parse;
//!
//! let rule = parse(
//!     "DTSTART;TZID=America/New_York:19970902T090000\n\
//!      RRULE:FREQ=WEEKLY;COUNT=4;BYDAY=TU,TH",
//! )?;
//!
//! for occurrence in rule.iter() {
//!     println!("{occurrence}");
//! }
//! # Ok::<(), recurring::RuleError>(())
//! ```
//!
//! Some rules recur forever; bound them with
//! [`limit`](OccurrenceIter::limit), [`before`](OccurrenceIter::before), or
//! the iterator's hard limit. Calendar stores often keep DTSTART apart from
//! the rule text; a block without one parses fine, and the anchor can be
//! assigned to [`RecurringRule::dt_start`] before iterating.
//!
//! Time zone and DST handling is delegated to [`jiff`]; occurrences are
//! rendered in the anchor's zone with wall-clock fields preserved across
//! period advances.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::pedantic
)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::similar_names,
    clippy::single_match_else
)]

pub mod error;
pub mod keyword;
mod iter;
mod parse;
mod rule;
pub mod value;

pub use crate::error::RuleError;
pub use crate::iter::{DEFAULT_HARD_LIMIT, OccurrenceIter};
pub use crate::parse::parse;
pub use crate::rule::{Frequency, RecurringRule, WeekdayNum};
pub use crate::value::duration::parse_duration;
pub use crate::value::{ValueDate, ValueDateTime, ValueTime};
