// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use betbuddies_audit::Cause;
use betbuddies_domain::{CardRules, EventCatalog, MemberId, MoneylineOdds, SpreadMarket, TotalMarket};
use betbuddies_persistence::Persistence;
use chrono::{DateTime, TimeDelta, Utc};

use crate::{
    CreateLeagueRequest, EventInput, IngestEventsRequest, LeagueResponse, PickInput,
    create_league, ingest_events,
};

/// Sunday, 2024-09-08 12:00 UTC: halfway through week 2 of the test league.
pub fn test_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-09-08T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

pub fn league_start() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-09-01T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn create_test_league(persistence: &mut Persistence) -> i64 {
    let response: LeagueResponse = create_league(
        persistence,
        &CreateLeagueRequest {
            name: String::from("Office Pool"),
        },
        league_start(),
    )
    .unwrap();
    response.league_id
}

pub fn create_test_member() -> MemberId {
    MemberId::new("member-7")
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-42"), String::from("Card submission"))
}

pub fn default_rules() -> CardRules {
    CardRules::default()
}

/// An event starting `hours` after `test_now()`.
pub fn event_input(event_id: &str, hours: i64) -> EventInput {
    EventInput {
        event_id: event_id.to_string(),
        home_team_id: String::from("DETROIT_LIONS_NFL"),
        away_team_id: String::from("CHICAGO_BEARS_NFL"),
        starts_at: test_now() + TimeDelta::hours(hours),
        moneyline: MoneylineOdds {
            home: -200,
            away: 170,
        },
        spread: Some(SpreadMarket {
            home_line: -4.5,
            home_odds: -110,
            away_odds: -110,
        }),
        total: Some(TotalMarket {
            points: 44.5,
            over_odds: -105,
            under_odds: -115,
        }),
    }
}

/// Ingests two early games (1h, 2h) and four late games (24h..27h).
pub fn seed_events(persistence: &mut Persistence) {
    let request: IngestEventsRequest = IngestEventsRequest {
        events: vec![
            event_input("early-1", 1),
            event_input("early-2", 2),
            event_input("late-1", 24),
            event_input("late-2", 25),
            event_input("late-3", 26),
            event_input("late-4", 27),
        ],
    };
    ingest_events(persistence, &request).unwrap();
}

pub fn catalog_at(persistence: &mut Persistence, now: DateTime<Utc>) -> EventCatalog {
    persistence.load_catalog(now).unwrap()
}

pub fn home_pick(event_id: &str) -> PickInput {
    PickInput {
        event_id: event_id.to_string(),
        bet_type: String::from("moneyline"),
        selection: String::from("DETROIT_LIONS_NFL"),
    }
}

pub fn over_pick(event_id: &str) -> PickInput {
    PickInput {
        event_id: event_id.to_string(),
        bet_type: String::from("total"),
        selection: String::from("over"),
    }
}
