// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

use betbuddies_audit::{Actor, Cause};
use betbuddies_domain::{
    BetType, CardScope, Event, EventId, MemberId, MoneylineOdds, Pick, PickSelection, Selection,
    TeamId, TotalMarket,
};
use chrono::{DateTime, TimeDelta, Utc};

pub fn test_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-09-08T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

pub fn create_test_actor() -> Actor {
    Actor::member(&MemberId::new("member-1"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Card submission"))
}

pub fn create_test_scope() -> CardScope {
    CardScope::new(MemberId::new("member-1"), 1, 2, 2024)
}

pub fn create_test_event(event_id: &str, hours: i64) -> Event {
    Event::new(
        EventId::new(event_id),
        TeamId::new("KANSAS_CITY_CHIEFS_NFL"),
        TeamId::new("BUFFALO_BILLS_NFL"),
        MoneylineOdds {
            home: -125,
            away: 105,
        },
        test_now() + TimeDelta::hours(hours),
    )
    .with_total(TotalMarket {
        points: 51.5,
        over_odds: -110,
        under_odds: -110,
    })
}

pub fn home_pick(event: &Event) -> PickSelection {
    PickSelection::from_event(
        event,
        BetType::Moneyline,
        Selection::Team(event.home_team_id().clone()),
    )
    .unwrap()
}

pub fn away_pick(event: &Event) -> PickSelection {
    PickSelection::from_event(
        event,
        BetType::Moneyline,
        Selection::Team(event.away_team_id().clone()),
    )
    .unwrap()
}

pub fn stored_pick(pick_id: i64, event: &Event) -> Pick {
    Pick::new(pick_id, 10, home_pick(event))
}
