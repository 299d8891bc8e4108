// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

mod validation;
mod week;

use chrono::{DateTime, TimeDelta, Utc};

use crate::{
    BetType, Event, EventId, MoneylineOdds, Pick, PickSelection, Selection, SpreadMarket, TeamId,
    TotalMarket,
};

pub(crate) fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

pub(crate) fn test_now() -> DateTime<Utc> {
    utc("2024-09-08T12:00:00Z")
}

/// An event starting `hours` after `test_now()` (negative for past events).
pub(crate) fn create_test_event(event_id: &str, hours: i64) -> Event {
    Event::new(
        EventId::new(event_id),
        TeamId::new("DALLAS_COWBOYS_NFL"),
        TeamId::new("NEW_YORK_GIANTS_NFL"),
        MoneylineOdds {
            home: -150,
            away: 130,
        },
        test_now() + TimeDelta::hours(hours),
    )
    .with_spread(SpreadMarket {
        home_line: -3.5,
        home_odds: -110,
        away_odds: -105,
    })
    .with_total(TotalMarket {
        points: 47.5,
        over_odds: -115,
        under_odds: -105,
    })
}

pub(crate) fn home_moneyline(event: &Event) -> PickSelection {
    PickSelection::from_event(
        event,
        BetType::Moneyline,
        Selection::Team(event.home_team_id().clone()),
    )
    .unwrap()
}

pub(crate) fn away_moneyline(event: &Event) -> PickSelection {
    PickSelection::from_event(
        event,
        BetType::Moneyline,
        Selection::Team(event.away_team_id().clone()),
    )
    .unwrap()
}

pub(crate) fn create_test_pick(pick_id: i64, event: &Event) -> Pick {
    Pick::new(pick_id, 1, home_moneyline(event))
}
