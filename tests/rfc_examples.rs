// SPDX-FileCopyrightText: 2026 The recurring authors
//
// SPDX-License-Identifier: Apache-2.0

//! Expansion tests for the RFC 5545 §3.8.5.3 example corpus (including the
//! errata fix for the HOURLY example), all anchored in America/New_York.

use jiff::civil::date;
use jiff::tz::TimeZone;
use jiff::{ToSpan, Zoned};
use recurring::parse;

fn new_york() -> TimeZone {
    TimeZone::get("America/New_York").unwrap()
}

fn at(year: i16, month: i8, day: i8, hour: i8, minute: i8, second: i8) -> Zoned {
    date(year, month, day)
        .at(hour, minute, second, 0)
        .to_zoned(new_york())
        .unwrap()
}

/// Nine-o'clock occurrences, the common case in the RFC examples.
fn at9(days: &[(i16, i8, i8)]) -> Vec<Zoned> {
    days.iter().map(|&(y, m, d)| at(y, m, d, 9, 0, 0)).collect()
}

/// Parse, check the render round-trip, and return the rule.
fn must_parse(src: &str) -> recurring::RecurringRule {
    let rule = parse(src).unwrap_or_else(|e| panic!("failed to parse {src}: {e}"));
    let rendered = rule.serialize();
    let reparsed =
        parse(&rendered).unwrap_or_else(|e| panic!("failed to re-parse {rendered}: {e}"));
    assert_eq!(rule, reparsed, "render round-trip changed the rule:\n{src}\n{rendered}");
    rule
}

/// The rule must yield exactly `expected` and then stop.
fn assert_expands_to(src: &str, expected: &[Zoned]) {
    let got: Vec<Zoned> = must_parse(src).iter().take(expected.len() + 1).collect();
    assert_eq!(got, expected, "expansion mismatch for {src}");
}

/// The (possibly unbounded) rule must begin with `expected`.
fn assert_starts_with(src: &str, expected: &[Zoned]) {
    let got: Vec<Zoned> = must_parse(src).iter().take(expected.len()).collect();
    assert_eq!(got, expected, "expansion prefix mismatch for {src}");
}

#[test]
fn daily_for_ten_occurrences() {
    assert_expands_to(
        "DTSTART;TZID=America/New_York:19970902T090000\nRRULE:FREQ=DAILY;COUNT=10",
        &at9(&[
            (1997, 9, 2), (1997, 9, 3), (1997, 9, 4), (1997, 9, 5), (1997, 9, 6),
            (1997, 9, 7), (1997, 9, 8), (1997, 9, 9), (1997, 9, 10), (1997, 9, 11),
        ]),
    );
}

#[test]
fn daily_until_december_24() {
    // September 2 through December 23, across the October DST fall-back.
    let mut expected = Vec::new();
    let mut day = at(1997, 9, 2, 9, 0, 0);
    for _ in 0..(28 + 31 + 30 + 23 + 1) {
        expected.push(day.clone());
        day = day.checked_add(1.day()).unwrap();
    }
    assert_eq!(*expected.last().unwrap(), at(1997, 12, 23, 9, 0, 0));

    assert_expands_to(
        "DTSTART;TZID=America/New_York:19970902T090000\nRRULE:FREQ=DAILY;UNTIL=19971224T000000Z",
        &expected,
    );
}

#[test]
fn every_other_day_forever() {
    assert_starts_with(
        "DTSTART;TZID=America/New_York:19970902T090000\nRRULE:FREQ=DAILY;INTERVAL=2",
        &at9(&[
            (1997, 9, 2), (1997, 9, 4), (1997, 9, 6),
            (1997, 9, 8), (1997, 9, 10), (1997, 9, 12),
        ]),
    );
}

#[test]
fn every_ten_days_five_occurrences() {
    assert_expands_to(
        "DTSTART;TZID=America/New_York:19970902T090000\nRRULE:FREQ=DAILY;INTERVAL=10;COUNT=5",
        &at9(&[
            (1997, 9, 2), (1997, 9, 12), (1997, 9, 22), (1997, 10, 2), (1997, 10, 12),
        ]),
    );
}

#[test]
fn every_day_in_january_for_three_years() {
    let mut expected = Vec::new();
    for year in [1998, 1999, 2000] {
        for day in 1..=31 {
            expected.push(at(year, 1, day, 9, 0, 0));
        }
    }

    // The YEARLY form with a full BYDAY list and the DAILY form with
    // BYMONTH alone describe the same set.
    let sources = [
        "DTSTART;TZID=America/New_York:19980101T090000\n\
         RRULE:FREQ=YEARLY;UNTIL=20000131T140000Z;BYMONTH=1;BYDAY=SU,MO,TU,WE,TH,FR,SA",
        "DTSTART;TZID=America/New_York:19980101T090000\n\
         RRULE:FREQ=DAILY;UNTIL=20000131T140000Z;BYMONTH=1",
    ];
    for src in sources {
        assert_expands_to(src, &expected);
    }
}

#[test]
fn weekly_for_ten_occurrences() {
    assert_expands_to(
        "DTSTART;TZID=America/New_York:19970902T090000\nRRULE:FREQ=WEEKLY;COUNT=10",
        &at9(&[
            (1997, 9, 2), (1997, 9, 9), (1997, 9, 16), (1997, 9, 23), (1997, 9, 30),
            (1997, 10, 7), (1997, 10, 14), (1997, 10, 21), (1997, 10, 28), (1997, 11, 4),
        ]),
    );
}

#[test]
fn weekly_tuesday_thursday_for_five_weeks() {
    let expected = at9(&[
        (1997, 9, 2), (1997, 9, 4), (1997, 9, 9), (1997, 9, 11), (1997, 9, 16),
        (1997, 9, 18), (1997, 9, 23), (1997, 9, 25), (1997, 9, 30), (1997, 10, 2),
    ]);
    let sources = [
        "DTSTART;TZID=America/New_York:19970902T090000\n\
         RRULE:FREQ=WEEKLY;UNTIL=19971007T000000Z;WKST=SU;BYDAY=TU,TH",
        "DTSTART;TZID=America/New_York:19970902T090000\n\
         RRULE:FREQ=WEEKLY;COUNT=10;WKST=SU;BYDAY=TU,TH",
    ];
    for src in sources {
        assert_expands_to(src, &expected);
    }
}

#[test]
fn every_other_week_monday_wednesday_friday_until() {
    assert_expands_to(
        "DTSTART;TZID=America/New_York:19970901T090000\n\
         RRULE:FREQ=WEEKLY;INTERVAL=2;UNTIL=19971224T000000Z;WKST=SU;BYDAY=MO,WE,FR",
        &at9(&[
            (1997, 9, 1), (1997, 9, 3), (1997, 9, 5), (1997, 9, 15), (1997, 9, 17),
            (1997, 9, 19), (1997, 9, 29), (1997, 10, 1), (1997, 10, 3), (1997, 10, 13),
            (1997, 10, 15), (1997, 10, 17), (1997, 10, 27), (1997, 10, 29), (1997, 10, 31),
            (1997, 11, 10), (1997, 11, 12), (1997, 11, 14), (1997, 11, 24), (1997, 11, 26),
            (1997, 11, 28), (1997, 12, 8), (1997, 12, 10), (1997, 12, 12), (1997, 12, 22),
        ]),
    );
}

#[test]
fn monthly_first_friday_until() {
    assert_expands_to(
        "DTSTART;TZID=America/New_York:19970905T090000\n\
         RRULE:FREQ=MONTHLY;UNTIL=19971224T000000Z;BYDAY=1FR",
        &at9(&[(1997, 9, 5), (1997, 10, 3), (1997, 11, 7), (1997, 12, 5)]),
    );
}

#[test]
fn monthly_third_to_last_day() {
    assert_starts_with(
        "DTSTART;TZID=America/New_York:19970928T090000\nRRULE:FREQ=MONTHLY;BYMONTHDAY=-3",
        &at9(&[
            (1997, 9, 28), (1997, 10, 29), (1997, 11, 28),
            (1997, 12, 29), (1998, 1, 29), (1998, 2, 26),
        ]),
    );
}

#[test]
fn set_pos_third_weekday_of_month() {
    assert_expands_to(
        "DTSTART;TZID=America/New_York:19970904T090000\n\
         RRULE:FREQ=MONTHLY;COUNT=3;BYDAY=TU,WE,TH;BYSETPOS=3",
        &at9(&[(1997, 9, 4), (1997, 10, 7), (1997, 11, 6)]),
    );
}

#[test]
fn set_pos_second_to_last_weekday_of_month() {
    assert_starts_with(
        "DTSTART;TZID=America/New_York:19970929T090000\n\
         RRULE:FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-2",
        &at9(&[
            (1997, 9, 29), (1997, 10, 30), (1997, 11, 27), (1997, 12, 30),
            (1998, 1, 29), (1998, 2, 26), (1998, 3, 30),
        ]),
    );
}

#[test]
fn yearly_by_year_day_every_third_year() {
    assert_expands_to(
        "DTSTART;TZID=America/New_York:19970101T090000\n\
         RRULE:FREQ=YEARLY;INTERVAL=3;COUNT=10;BYYEARDAY=1,100,200",
        &at9(&[
            (1997, 1, 1), (1997, 4, 10), (1997, 7, 19),
            (2000, 1, 1), (2000, 4, 9), (2000, 7, 18),
            (2003, 1, 1), (2003, 4, 10), (2003, 7, 19),
            (2006, 1, 1),
        ]),
    );
}

#[test]
fn first_and_last_sunday_every_other_month() {
    assert_expands_to(
        "DTSTART;TZID=America/New_York:19970907T090000\n\
         RRULE:FREQ=MONTHLY;INTERVAL=2;COUNT=10;BYDAY=1SU,-1SU",
        &at9(&[
            (1997, 9, 7), (1997, 9, 28), (1997, 11, 2), (1997, 11, 30), (1998, 1, 4),
            (1998, 1, 25), (1998, 3, 1), (1998, 3, 29), (1998, 5, 3), (1998, 5, 31),
        ]),
    );
}

#[test]
fn monthly_second_to_last_monday() {
    assert_expands_to(
        "DTSTART;TZID=America/New_York:19970922T090000\nRRULE:FREQ=MONTHLY;COUNT=6;BYDAY=-2MO",
        &at9(&[
            (1997, 9, 22), (1997, 10, 20), (1997, 11, 17),
            (1997, 12, 22), (1998, 1, 19), (1998, 2, 16),
        ]),
    );
}

#[test]
fn first_and_last_day_of_month() {
    assert_expands_to(
        "DTSTART;TZID=America/New_York:19970930T090000\n\
         RRULE:FREQ=MONTHLY;COUNT=10;BYMONTHDAY=1,-1",
        &at9(&[
            (1997, 9, 30), (1997, 10, 1), (1997, 10, 31), (1997, 11, 1), (1997, 11, 30),
            (1997, 12, 1), (1997, 12, 31), (1998, 1, 1), (1998, 1, 31), (1998, 2, 1),
        ]),
    );
}

#[test]
fn every_eighteen_months_mid_month_days() {
    assert_expands_to(
        "DTSTART;TZID=America/New_York:19970910T090000\n\
         RRULE:FREQ=MONTHLY;INTERVAL=18;COUNT=10;BYMONTHDAY=10,11,12,13,14,15",
        &at9(&[
            (1997, 9, 10), (1997, 9, 11), (1997, 9, 12), (1997, 9, 13), (1997, 9, 14),
            (1997, 9, 15), (1999, 3, 10), (1999, 3, 11), (1999, 3, 12), (1999, 3, 13),
        ]),
    );
}

#[test]
fn yearly_in_june_and_july() {
    // No BYDAY/BYMONTHDAY/BYYEARDAY: the day comes from DTSTART.
    assert_expands_to(
        "DTSTART;TZID=America/New_York:19970610T090000\nRRULE:FREQ=YEARLY;COUNT=10;BYMONTH=6,7",
        &at9(&[
            (1997, 6, 10), (1997, 7, 10), (1998, 6, 10), (1998, 7, 10), (1999, 6, 10),
            (1999, 7, 10), (2000, 6, 10), (2000, 7, 10), (2001, 6, 10), (2001, 7, 10),
        ]),
    );
}

#[test]
fn yearly_twentieth_monday() {
    assert_starts_with(
        "DTSTART;TZID=America/New_York:19970519T090000\nRRULE:FREQ=YEARLY;BYDAY=20MO",
        &at9(&[(1997, 5, 19), (1998, 5, 18), (1999, 5, 17)]),
    );
}

#[test]
fn monthly_on_the_2nd_and_15th() {
    assert_expands_to(
        "DTSTART;TZID=America/New_York:19970902T090000\n\
         RRULE:FREQ=MONTHLY;COUNT=10;BYMONTHDAY=2,15",
        &at9(&[
            (1997, 9, 2), (1997, 9, 15), (1997, 10, 2), (1997, 10, 15), (1997, 11, 2),
            (1997, 11, 15), (1997, 12, 2), (1997, 12, 15), (1998, 1, 2), (1998, 1, 15),
        ]),
    );
}

#[test]
fn every_tuesday_every_other_month() {
    assert_starts_with(
        "DTSTART;TZID=America/New_York:19970902T090000\nRRULE:FREQ=MONTHLY;INTERVAL=2;BYDAY=TU",
        &at9(&[
            (1997, 9, 2), (1997, 9, 9), (1997, 9, 16), (1997, 9, 23), (1997, 9, 30),
            (1997, 11, 4), (1997, 11, 11), (1997, 11, 18), (1997, 11, 25),
            (1998, 1, 6), (1998, 1, 13), (1998, 1, 20), (1998, 1, 27),
            (1998, 3, 3), (1998, 3, 10), (1998, 3, 17), (1998, 3, 24), (1998, 3, 31),
        ]),
    );
}

#[test]
fn every_other_year_in_first_quarter() {
    assert_expands_to(
        "DTSTART;TZID=America/New_York:19970310T090000\n\
         RRULE:FREQ=YEARLY;INTERVAL=2;COUNT=10;BYMONTH=1,2,3",
        &at9(&[
            (1997, 3, 10), (1999, 1, 10), (1999, 2, 10), (1999, 3, 10), (2001, 1, 10),
            (2001, 2, 10), (2001, 3, 10), (2003, 1, 10), (2003, 2, 10), (2003, 3, 10),
        ]),
    );
}

#[test]
fn every_thursday_in_march() {
    assert_starts_with(
        "DTSTART;TZID=America/New_York:19970313T090000\nRRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=TH",
        &at9(&[
            (1997, 3, 13), (1997, 3, 20), (1997, 3, 27),
            (1998, 3, 5), (1998, 3, 12), (1998, 3, 19), (1998, 3, 26),
            (1999, 3, 4), (1999, 3, 11), (1999, 3, 18), (1999, 3, 25),
        ]),
    );
}

#[test]
fn thursdays_in_summer_months() {
    let mut expected = Vec::new();
    for (year, first_june_thursday) in [(1997, 5), (1998, 4), (1999, 3)] {
        let mut day = at(year, 6, first_june_thursday, 9, 0, 0);
        while day.month() <= 8 {
            expected.push(day.clone());
            day = day.checked_add(7.days()).unwrap();
        }
    }
    assert_eq!(expected.len(), 39);

    assert_starts_with(
        "DTSTART;TZID=America/New_York:19970605T090000\nRRULE:FREQ=YEARLY;BYDAY=TH;BYMONTH=6,7,8",
        &expected,
    );
}

#[test]
fn friday_the_thirteenth_with_exdate() {
    assert_starts_with(
        "DTSTART;TZID=America/New_York:19970902T090000\n\
         EXDATE;TZID=America/New_York:19970902T090000\n\
         RRULE:FREQ=MONTHLY;BYDAY=FR;BYMONTHDAY=13",
        &at9(&[
            (1998, 2, 13), (1998, 3, 13), (1998, 11, 13), (1999, 8, 13), (2000, 10, 13),
        ]),
    );
}

#[test]
fn first_saturday_after_first_sunday() {
    assert_starts_with(
        "DTSTART;TZID=America/New_York:19970913T090000\n\
         RRULE:FREQ=MONTHLY;BYDAY=SA;BYMONTHDAY=7,8,9,10,11,12,13",
        &at9(&[
            (1997, 9, 13), (1997, 10, 11), (1997, 11, 8), (1997, 12, 13), (1998, 1, 10),
            (1998, 2, 7), (1998, 3, 7), (1998, 4, 11), (1998, 5, 9), (1998, 6, 13),
        ]),
    );
}

#[test]
fn us_presidential_election_day() {
    assert_starts_with(
        "DTSTART;TZID=America/New_York:19961105T090000\n\
         RRULE:FREQ=YEARLY;INTERVAL=4;BYMONTH=11;BYDAY=TU;BYMONTHDAY=2,3,4,5,6,7,8",
        &at9(&[(1996, 11, 5), (2000, 11, 7), (2004, 11, 2)]),
    );
}

#[test]
fn monday_of_iso_week_twenty() {
    assert_starts_with(
        "DTSTART;TZID=America/New_York:19970512T090000\nRRULE:FREQ=YEARLY;BYWEEKNO=20;BYDAY=MO",
        &at9(&[(1997, 5, 12), (1998, 5, 11), (1999, 5, 17)]),
    );
}

#[test]
fn skips_invalid_calendar_dates() {
    assert_expands_to(
        "DTSTART;TZID=America/New_York:20070115T090000\n\
         RRULE:FREQ=MONTHLY;BYMONTHDAY=15,30;COUNT=5",
        &at9(&[
            (2007, 1, 15), (2007, 1, 30), (2007, 2, 15), (2007, 3, 15), (2007, 3, 30),
        ]),
    );
}

#[test]
fn week_start_changes_the_selection() {
    // Identical rules except for WKST select different Sundays, because the
    // week boundary decides which week the anchor shares with them.
    assert_expands_to(
        "DTSTART;TZID=America/New_York:19970805T090000\n\
         RRULE:FREQ=WEEKLY;INTERVAL=2;COUNT=4;BYDAY=TU,SU;WKST=MO",
        &at9(&[(1997, 8, 5), (1997, 8, 10), (1997, 8, 19), (1997, 8, 24)]),
    );
    assert_expands_to(
        "DTSTART;TZID=America/New_York:19970805T090000\n\
         RRULE:FREQ=WEEKLY;INTERVAL=2;COUNT=4;BYDAY=TU,SU;WKST=SU",
        &at9(&[(1997, 8, 5), (1997, 8, 17), (1997, 8, 19), (1997, 8, 31)]),
    );
}

#[test]
fn every_three_hours_until_evening() {
    // RFC errata value: 21:00Z, not the original 17:00Z.
    assert_expands_to(
        "DTSTART;TZID=America/New_York:19970902T090000\n\
         RRULE:FREQ=HOURLY;INTERVAL=3;UNTIL=19970902T210000Z",
        &[at(1997, 9, 2, 9, 0, 0), at(1997, 9, 2, 12, 0, 0), at(1997, 9, 2, 15, 0, 0)],
    );
}

#[test]
fn every_fifteen_minutes_six_times() {
    assert_expands_to(
        "DTSTART;TZID=America/New_York:19970902T090000\nRRULE:FREQ=MINUTELY;INTERVAL=15;COUNT=6",
        &[
            at(1997, 9, 2, 9, 0, 0),
            at(1997, 9, 2, 9, 15, 0),
            at(1997, 9, 2, 9, 30, 0),
            at(1997, 9, 2, 9, 45, 0),
            at(1997, 9, 2, 10, 0, 0),
            at(1997, 9, 2, 10, 15, 0),
        ],
    );
}

#[test]
fn every_ninety_minutes_four_times() {
    assert_expands_to(
        "DTSTART;TZID=America/New_York:19970902T090000\nRRULE:FREQ=MINUTELY;INTERVAL=90;COUNT=4",
        &[
            at(1997, 9, 2, 9, 0, 0),
            at(1997, 9, 2, 10, 30, 0),
            at(1997, 9, 2, 12, 0, 0),
            at(1997, 9, 2, 13, 30, 0),
        ],
    );
}

#[test]
fn every_twenty_minutes_of_the_working_day() {
    let mut expected = Vec::new();
    for hour in 9..17 {
        for minute in [0, 20, 40] {
            expected.push(at(1997, 9, 2, hour, minute, 0));
        }
    }
    expected.push(at(1997, 9, 3, 9, 0, 0));
    expected.push(at(1997, 9, 3, 9, 20, 0));
    expected.push(at(1997, 9, 3, 9, 40, 0));

    // DAILY with an expanded time grid and MINUTELY limited by BYHOUR
    // describe the same set.
    let sources = [
        "DTSTART;TZID=America/New_York:19970902T090000\n\
         RRULE:FREQ=DAILY;BYHOUR=9,10,11,12,13,14,15,16;BYMINUTE=0,20,40",
        "DTSTART;TZID=America/New_York:19970902T090000\n\
         RRULE:FREQ=MINUTELY;INTERVAL=20;BYHOUR=9,10,11,12,13,14,15,16",
    ];
    for src in sources {
        assert_starts_with(src, &expected);
    }
}

#[test]
fn hourly_second_grid() {
    let mut expected = Vec::new();
    for hour in [9, 10] {
        for minute in [0, 20, 40] {
            for second in [10, 20, 30] {
                expected.push(at(1997, 9, 2, hour, minute, second));
            }
        }
    }

    assert_starts_with(
        "DTSTART;TZID=America/New_York:19970902T090000\n\
         RRULE:FREQ=HOURLY;BYMINUTE=0,20,40;BYSECOND=10,20,30",
        &expected,
    );
}
