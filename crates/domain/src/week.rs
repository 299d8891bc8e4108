// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Week resolution.
//!
//! Weeks are seven-day windows anchored to the league's creation instant,
//! not to the calendar. Week 1 starts at creation; each later week starts
//! exactly seven days after the previous one.

use chrono::{DateTime, Datelike, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Length of one scoring week, in days.
pub const DAYS_PER_WEEK: i64 = 7;

/// The scoring window containing a given instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekContext {
    week_number: u32,
    season_year: i32,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    date_range_label: String,
}

impl WeekContext {
    /// Returns the 1-based week number.
    #[must_use]
    pub const fn week_number(&self) -> u32 {
        self.week_number
    }

    /// Returns the season year (UTC year of the week start).
    #[must_use]
    pub const fn season_year(&self) -> i32 {
        self.season_year
    }

    /// Returns the inclusive start of the window.
    #[must_use]
    pub const fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    /// Returns the exclusive end of the window.
    #[must_use]
    pub const fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    /// Returns the human-readable date range, e.g. `Sep 1, 2024 - Sep 7, 2024`.
    #[must_use]
    pub fn date_range_label(&self) -> &str {
        &self.date_range_label
    }

    /// Returns whether `instant` falls inside this window.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.starts_at && instant < self.ends_at
    }
}

/// Resolves the week containing `now`, labelled in UTC.
///
/// # Arguments
///
/// * `league_created_at` - The league's creation instant
/// * `now` - The evaluation instant
///
/// # Errors
///
/// Returns `LeagueNotStarted` if `now` precedes `league_created_at`, or
/// `DateArithmeticOverflow` if the window cannot be represented.
pub fn resolve_week(
    league_created_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<WeekContext, DomainError> {
    resolve_week_in(league_created_at, now, &Tz::UTC)
}

/// Resolves the week containing `now`, labelling dates in `tz`.
///
/// Week boundaries and numbering never depend on `tz`; only the label does.
///
/// # Errors
///
/// Returns `LeagueNotStarted` if `now` precedes `league_created_at`, or
/// `DateArithmeticOverflow` if the window cannot be represented.
pub fn resolve_week_in(
    league_created_at: DateTime<Utc>,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<WeekContext, DomainError> {
    if now < league_created_at {
        return Err(DomainError::LeagueNotStarted {
            created_at: league_created_at,
            now,
        });
    }

    let week_length: TimeDelta =
        TimeDelta::try_days(DAYS_PER_WEEK).ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: String::from("computing week length"),
        })?;

    let elapsed: TimeDelta = now.signed_duration_since(league_created_at);
    let week_length_seconds: i64 = week_length.num_seconds();
    let week_index: i64 = elapsed.num_seconds() / week_length_seconds;

    let week_number: u32 = week_index
        .checked_add(1)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("converting week index {week_index} to a week number"),
        })?;

    let offset: TimeDelta = week_length_seconds
        .checked_mul(week_index)
        .and_then(TimeDelta::try_seconds)
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("computing offset of week {week_number}"),
        })?;

    let starts_at: DateTime<Utc> = league_created_at
        .checked_add_signed(offset)
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("computing start of week {week_number}"),
        })?;

    let ends_at: DateTime<Utc> = starts_at.checked_add_signed(week_length).ok_or_else(|| {
        DomainError::DateArithmeticOverflow {
            operation: format!("computing end of week {week_number}"),
        }
    })?;

    let date_range_label: String = format_date_range(starts_at, ends_at, tz)?;

    Ok(WeekContext {
        week_number,
        season_year: starts_at.year(),
        starts_at,
        ends_at,
        date_range_label,
    })
}

/// Renders `[starts_at, ends_at)` as `Mon D, YYYY - Mon D, YYYY`.
///
/// The second date is the last day inside the window.
fn format_date_range(
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    tz: &Tz,
) -> Result<String, DomainError> {
    let last_instant: DateTime<Utc> = ends_at
        .checked_sub_signed(TimeDelta::nanoseconds(1))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: String::from("computing last instant of week"),
        })?;

    let first_day = tz.from_utc_datetime(&starts_at.naive_utc());
    let last_day = tz.from_utc_datetime(&last_instant.naive_utc());

    Ok(format!(
        "{} - {}",
        first_day.format("%b %-d, %Y"),
        last_day.format("%b %-d, %Y")
    ))
}
