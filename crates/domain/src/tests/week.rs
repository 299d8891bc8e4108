// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;

use crate::{DomainError, WeekContext, resolve_week, resolve_week_in};

use super::utc;

#[test]
fn test_resolve_week_second_week() {
    let created: DateTime<Utc> = utc("2024-09-01T00:00:00Z");
    let week: WeekContext = resolve_week(created, utc("2024-09-10T00:00:00Z")).unwrap();

    assert_eq!(week.week_number(), 2);
    assert_eq!(week.season_year(), 2024);
    assert_eq!(week.starts_at(), utc("2024-09-08T00:00:00Z"));
    assert_eq!(week.ends_at(), utc("2024-09-15T00:00:00Z"));
    assert_eq!(week.date_range_label(), "Sep 8, 2024 - Sep 14, 2024");
}

#[test]
fn test_resolve_week_first_week_label() {
    let created: DateTime<Utc> = utc("2024-09-01T00:00:00Z");
    let week: WeekContext = resolve_week(created, utc("2024-09-03T09:30:00Z")).unwrap();

    assert_eq!(week.week_number(), 1);
    assert_eq!(week.date_range_label(), "Sep 1, 2024 - Sep 7, 2024");
}

#[test]
fn test_week_number_is_monotone_and_steps_by_one() {
    let created: DateTime<Utc> = utc("2024-09-01T15:45:00Z");
    let mut previous: u32 = 0;

    // Sample every six hours over twenty weeks.
    for step in 0..(20 * 28) {
        let now: DateTime<Utc> = created + TimeDelta::hours(step * 6);
        let week: WeekContext = resolve_week(created, now).unwrap();
        assert!(week.week_number() >= previous);
        assert!(week.week_number() - previous <= 1);
        assert!(week.contains(now));
        previous = week.week_number();
    }
    assert_eq!(previous, 20);
}

#[test]
fn test_week_boundaries_are_anchored_to_creation_not_calendar() {
    let created: DateTime<Utc> = utc("2024-09-04T18:00:00Z");
    let week: WeekContext = resolve_week(created, utc("2024-09-12T00:00:00Z")).unwrap();

    assert_eq!(week.week_number(), 2);
    assert_eq!(week.starts_at(), utc("2024-09-11T18:00:00Z"));
}

#[test]
fn test_season_year_is_year_of_week_start() {
    let created: DateTime<Utc> = utc("2024-12-29T00:00:00Z");
    let straddling: WeekContext = resolve_week(created, utc("2025-01-02T00:00:00Z")).unwrap();
    let next: WeekContext = resolve_week(created, utc("2025-01-06T00:00:00Z")).unwrap();

    assert_eq!(straddling.week_number(), 1);
    assert_eq!(straddling.season_year(), 2024);
    assert_eq!(next.week_number(), 2);
    assert_eq!(next.season_year(), 2025);
}

#[test]
fn test_resolve_week_is_pure() {
    let created: DateTime<Utc> = utc("2024-09-01T00:00:00Z");
    let now: DateTime<Utc> = utc("2024-10-01T00:00:00Z");
    assert_eq!(
        resolve_week(created, now).unwrap(),
        resolve_week(created, now).unwrap()
    );
}

#[test]
fn test_resolve_week_rejects_time_before_creation() {
    let created: DateTime<Utc> = utc("2024-09-01T00:00:00Z");
    let result: Result<WeekContext, DomainError> =
        resolve_week(created, utc("2024-08-31T23:59:59Z"));
    assert!(matches!(result, Err(DomainError::LeagueNotStarted { .. })));
}

#[test]
fn test_timezone_changes_label_only() {
    let created: DateTime<Utc> = utc("2024-09-01T02:00:00Z");
    let now: DateTime<Utc> = utc("2024-09-02T00:00:00Z");
    let in_utc: WeekContext = resolve_week(created, now).unwrap();
    let in_new_york: WeekContext = resolve_week_in(created, now, &Tz::America__New_York).unwrap();

    assert_eq!(in_utc.week_number(), in_new_york.week_number());
    assert_eq!(in_utc.starts_at(), in_new_york.starts_at());
    assert_eq!(in_utc.date_range_label(), "Sep 1, 2024 - Sep 8, 2024");
    assert_eq!(in_new_york.date_range_label(), "Aug 31, 2024 - Sep 7, 2024");
}
