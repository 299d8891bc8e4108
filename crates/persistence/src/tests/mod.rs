// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

mod audit_tests;

use betbuddies::{SubmissionPlan, SubmissionRequest, prepare_submission};
use betbuddies_audit::{Actor, Cause};
use betbuddies_domain::{
    BetType, CardRules, CardScope, Event, EventCatalog, EventId, League, MemberId, MoneylineOdds,
    Pick, PickSelection, Reconciliation, Selection, SpreadMarket, TeamId, TotalMarket, reconcile,
};
use chrono::{DateTime, TimeDelta, Utc};

use crate::Persistence;

pub fn test_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-09-08T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn create_test_league(persistence: &mut Persistence) -> League {
    let league: League = League::new("Sunday Sharps", test_now() - TimeDelta::days(8));
    persistence.create_league(&league).unwrap()
}

pub fn create_test_scope(league_id: i64) -> CardScope {
    CardScope::new(MemberId::new("member-1"), league_id, 2, 2024)
}

pub fn create_test_actor() -> Actor {
    Actor::member(&MemberId::new("member-1"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Card submission"))
}

/// Creates an event starting `hours` after `test_now()`, with all markets.
pub fn create_test_event(event_id: &str, hours: i64) -> Event {
    Event::new(
        EventId::new(event_id),
        TeamId::new("PHILADELPHIA_EAGLES_NFL"),
        TeamId::new("GREEN_BAY_PACKERS_NFL"),
        MoneylineOdds {
            home: -140,
            away: 120,
        },
        test_now() + TimeDelta::hours(hours),
    )
    .with_spread(SpreadMarket {
        home_line: -2.5,
        home_odds: -110,
        away_odds: -110,
    })
    .with_total(TotalMarket {
        points: 48.5,
        over_odds: -108,
        under_odds: -112,
    })
}

pub fn home_moneyline(event: &Event) -> PickSelection {
    PickSelection::from_event(
        event,
        BetType::Moneyline,
        Selection::Team(event.home_team_id().clone()),
    )
    .unwrap()
}

pub fn over_total(event: &Event) -> PickSelection {
    PickSelection::from_event(event, BetType::Total, Selection::Over).unwrap()
}

/// Reads the card for `scope` at `now` and plans a submission of `picks`,
/// the way a client would from its latest snapshot.
pub fn plan_submission(
    persistence: &mut Persistence,
    scope: &CardScope,
    picks: Vec<PickSelection>,
    now: DateTime<Utc>,
) -> SubmissionPlan {
    let catalog: EventCatalog = persistence.load_catalog(now).unwrap();
    let card_id: Option<i64> = persistence
        .find_card(scope)
        .unwrap()
        .map(|card| card.card_id());
    let stored: Vec<Pick> = match card_id {
        Some(id) => persistence.list_picks_for_card(id).unwrap(),
        None => Vec::new(),
    };
    let reconciliation: Reconciliation = reconcile(stored, &catalog.upcoming_ids());

    prepare_submission(
        SubmissionRequest {
            scope: scope.clone(),
            existing_card_id: card_id,
            locked_picks: reconciliation.locked().to_vec(),
            picks,
        },
        &catalog,
        &CardRules::default(),
        create_test_actor(),
        create_test_cause(),
        now,
    )
    .unwrap()
}
