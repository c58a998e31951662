// SPDX-FileCopyrightText: 2026 The recurring authors
//
// SPDX-License-Identifier: Apache-2.0

//! Lazy expansion of a rule into its occurrence sequence.
//!
//! The iterator advances period by period: it asks the candidate generator
//! for one period's set, runs the filter pipeline, buffers the survivors,
//! and pops them in order. COUNT, UNTIL, the caller's windows, and the
//! hard limit all terminate the walk.

use std::collections::VecDeque;

use jiff::Zoned;

use crate::rule::RecurringRule;

pub(crate) mod candidates;
pub(crate) mod filter;

use self::candidates::{candidates, period_start};
use self::filter::filter_period;

/// Ceiling on period-advance loop iterations. Some rules never produce a
/// survivor (BYMONTHDAY=30 with BYMONTH=2); this keeps such walks bounded.
pub const DEFAULT_HARD_LIMIT: u32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    Producing,
    /// A `before` cut-off was seen; the buffer drains but no new periods
    /// are scanned.
    ShortCircuited,
    Exhausted,
}

/// A lazy iterator over a rule's occurrences.
///
/// Holds a shared borrow of the rule plus its own buffer and counters, so
/// any number of iterators can run over one rule independently. Configure
/// with the fluent helpers before iterating:
///
/// ```
/// use recurring::parse;
///
/// let rule = parse("DTSTART:20180902T090000Z\nRRULE:FREQ=DAILY").unwrap();
/// let first_two: Vec<_> = rule.iter().limit(2).collect();
/// assert_eq!(first_two.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct OccurrenceIter<'r> {
    rule: &'r RecurringRule,
    state: State,
    /// Periods consumed so far; period N is the anchor advanced by
    /// N * interval frequency units.
    period: i64,
    buffer: VecDeque<Zoned>,
    return_counter: u32,
    user_limit: Option<u32>,
    before: Option<Zoned>,
    after: Option<Zoned>,
    hard_limit: u32,
    periods_scanned: u32,
    hard_limit_reached: bool,
}

impl<'r> OccurrenceIter<'r> {
    pub(crate) fn new(rule: &'r RecurringRule) -> Self {
        OccurrenceIter {
            rule,
            state: State::Fresh,
            period: 0,
            buffer: VecDeque::new(),
            return_counter: 0,
            user_limit: None,
            before: None,
            after: None,
            hard_limit: DEFAULT_HARD_LIMIT,
            periods_scanned: 0,
            hard_limit_reached: false,
        }
    }

    /// Yield at most `n` occurrences.
    #[must_use]
    pub fn limit(mut self, n: u32) -> Self {
        self.user_limit = Some(n);
        self
    }

    /// Yield only occurrences strictly before `t`. Once a candidate at or
    /// past `t` is seen, no further periods are scanned.
    #[must_use]
    pub fn before(mut self, t: Zoned) -> Self {
        self.before = Some(t);
        self
    }

    /// Yield only occurrences strictly after `t`.
    #[must_use]
    pub fn after(mut self, t: Zoned) -> Self {
        self.after = Some(t);
        self
    }

    /// Yield only occurrences strictly between `a` and `b`.
    #[must_use]
    pub fn between(self, a: Zoned, b: Zoned) -> Self {
        self.after(a).before(b)
    }

    /// Replace the default bound on period-advance loop iterations.
    #[must_use]
    pub fn hard_limit(mut self, n: u32) -> Self {
        self.hard_limit = n;
        self
    }

    /// How many occurrences this iterator has yielded.
    #[must_use]
    pub fn return_counter(&self) -> u32 {
        self.return_counter
    }

    /// Whether iteration stopped because the period scan hit the hard
    /// limit rather than a rule-defined bound.
    #[must_use]
    pub fn is_hard_limit_reached(&self) -> bool {
        self.hard_limit_reached
    }
}

impl Iterator for OccurrenceIter<'_> {
    type Item = Zoned;

    fn next(&mut self) -> Option<Zoned> {
        if self.state == State::Exhausted {
            return None;
        }
        if self.rule.count > 0 && self.return_counter >= self.rule.count {
            self.state = State::Exhausted;
            return None;
        }
        let Some(anchor) = self.rule.dt_start.as_ref() else {
            self.state = State::Exhausted;
            return None;
        };
        if self.state == State::Fresh {
            self.state = State::Producing;
        }

        while self.buffer.is_empty() && self.state == State::Producing {
            if self.periods_scanned >= self.hard_limit {
                tracing::warn!(
                    hard_limit = self.hard_limit,
                    "recurrence expansion hit the period hard limit"
                );
                self.hard_limit_reached = true;
                self.state = State::Exhausted;
                return None;
            }
            let interval = i64::from(self.rule.interval);
            let Some(root) = period_start(anchor, self.rule.frequency, interval, self.period)
            else {
                self.state = State::Exhausted;
                return None;
            };
            let outcome = filter_period(
                self.rule,
                anchor,
                candidates(self.rule, &root),
                self.before.as_ref(),
                self.after.as_ref(),
            );
            self.buffer.extend(outcome.survivors);
            if outcome.cut_off {
                self.state = State::ShortCircuited;
            }
            self.period += 1;
            self.periods_scanned += 1;
        }

        match self.buffer.pop_front() {
            Some(occurrence) => {
                if let Some(until) = &self.rule.until {
                    if occurrence.timestamp() > until.timestamp() {
                        self.state = State::Exhausted;
                        return None;
                    }
                }
                if let Some(limit) = self.user_limit {
                    if self.return_counter >= limit {
                        self.state = State::Exhausted;
                        return None;
                    }
                }
                self.return_counter += 1;
                Some(occurrence)
            }
            // Only reachable once short-circuited: the buffer has drained
            // and no further period can contribute.
            None => {
                self.state = State::Exhausted;
                None
            }
        }
    }
}
