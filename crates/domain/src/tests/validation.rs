// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BetType, CardRules, DomainError, Event, EventCatalog, EventId, MoneylineOdds, PickSelection,
    Selection, TeamId, validate_betting_window, validate_event, validate_identifier,
    validate_league_name, validate_pick_count, validate_selections_match_markets,
    validate_submission,
};

use super::{create_test_event, home_moneyline, test_now};

#[test]
fn test_validate_league_name() {
    assert!(validate_league_name("Sunday Crew").is_ok());
    assert!(matches!(
        validate_league_name("   "),
        Err(DomainError::InvalidLeagueName(_))
    ));
    assert!(validate_league_name(&"x".repeat(64)).is_ok());
    assert!(validate_league_name(&"x".repeat(65)).is_err());
}

#[test]
fn test_validate_identifier_rejects_blank() {
    assert!(validate_identifier("member", "user-1").is_ok());
    assert_eq!(
        validate_identifier("member", ""),
        Err(DomainError::InvalidIdentifier {
            kind: "member",
            value: String::new(),
        })
    );
}

#[test]
fn test_validate_event_rejects_same_participants() {
    let event: Event = Event::new(
        EventId::new("evt-1"),
        TeamId::new("DALLAS_COWBOYS_NFL"),
        TeamId::new("DALLAS_COWBOYS_NFL"),
        MoneylineOdds {
            home: -110,
            away: -110,
        },
        test_now(),
    );
    assert!(matches!(
        validate_event(&event),
        Err(DomainError::InvalidEvent { .. })
    ));
    assert!(validate_event(&create_test_event("evt-2", 1)).is_ok());
}

#[test]
fn test_validate_pick_count_bounds() {
    let rules: CardRules = CardRules::default();
    assert_eq!(validate_pick_count(0, 0, &rules), Err(DomainError::EmptyCard));
    assert!(validate_pick_count(0, 1, &rules).is_ok());
    assert!(validate_pick_count(3, 2, &rules).is_ok());
    assert_eq!(
        validate_pick_count(4, 2, &rules),
        Err(DomainError::PickLimitExceeded {
            max_picks: 5,
            requested: 6,
        })
    );
}

#[test]
fn test_validate_betting_window_closed_when_no_events() {
    let catalog: EventCatalog = EventCatalog::upcoming(vec![create_test_event("old", -2)], test_now());
    assert_eq!(
        validate_betting_window(&catalog),
        Err(DomainError::BettingWindowClosed)
    );
}

#[test]
fn test_validate_submission_rejects_started_event() {
    let started: Event = create_test_event("started", -1);
    let open: Event = create_test_event("open", 1);
    let picks: Vec<PickSelection> = vec![home_moneyline(&open), home_moneyline(&started)];
    let catalog: EventCatalog = EventCatalog::upcoming(vec![started, open], test_now());

    assert_eq!(
        validate_submission(&picks, 0, &catalog, &CardRules::default()),
        Err(DomainError::EventAlreadyStarted {
            event_id: String::from("started"),
        })
    );
}

#[test]
fn test_validate_submission_checks_capacity_before_window() {
    let catalog: EventCatalog = EventCatalog::upcoming(Vec::new(), test_now());
    assert_eq!(
        validate_submission(&[], 0, &catalog, &CardRules::default()),
        Err(DomainError::EmptyCard)
    );
    assert_eq!(
        validate_submission(&[], 2, &catalog, &CardRules::default()),
        Err(DomainError::BettingWindowClosed)
    );
}

#[test]
fn test_validate_submission_accepts_catalog_picks() {
    let event: Event = create_test_event("open", 1);
    let spread: PickSelection = PickSelection::from_event(
        &event,
        BetType::Spread,
        Selection::Team(event.away_team_id().clone()),
    )
    .unwrap();
    let total: PickSelection =
        PickSelection::from_event(&event, BetType::Total, Selection::Under).unwrap();
    let picks: Vec<PickSelection> = vec![home_moneyline(&event), spread, total];
    let catalog: EventCatalog = EventCatalog::upcoming(vec![event], test_now());

    assert_eq!(
        validate_submission(&picks, 0, &catalog, &CardRules::default()),
        Ok(())
    );
}

#[test]
fn test_validate_submission_keeps_frozen_price_after_line_move() {
    let event: Event = create_test_event("open", 1);
    let frozen: PickSelection = PickSelection::restore(
        event.event_id().clone(),
        BetType::Total,
        Selection::Over,
        event.home_team_id().clone(),
        event.away_team_id().clone(),
        -120,
        None,
        Some(44.0),
    );
    let catalog: EventCatalog = EventCatalog::upcoming(vec![event], test_now());

    assert_eq!(validate_selections_match_markets([&frozen], &catalog), Ok(()));
}

#[test]
fn test_validate_submission_rejects_team_on_total() {
    let event: Event = create_test_event("open", 1);
    let forged: PickSelection = PickSelection::restore(
        event.event_id().clone(),
        BetType::Total,
        Selection::Team(TeamId::new("NOT_A_SIDE")),
        event.home_team_id().clone(),
        event.away_team_id().clone(),
        99_999,
        None,
        None,
    );
    let catalog: EventCatalog = EventCatalog::upcoming(vec![event], test_now());

    assert_eq!(
        validate_submission(&[forged], 0, &catalog, &CardRules::default()),
        Err(DomainError::InvalidSelection {
            bet_type: BetType::Total,
            selection: String::from("NOT_A_SIDE"),
        })
    );
}

#[test]
fn test_validate_submission_rejects_team_outside_event() {
    let event: Event = create_test_event("open", 1);
    let forged: PickSelection = PickSelection::restore(
        event.event_id().clone(),
        BetType::Moneyline,
        Selection::Team(TeamId::new("GREEN_BAY_PACKERS_NFL")),
        event.home_team_id().clone(),
        event.away_team_id().clone(),
        -150,
        None,
        None,
    );
    let catalog: EventCatalog = EventCatalog::upcoming(vec![event], test_now());

    assert!(matches!(
        validate_submission(&[forged], 0, &catalog, &CardRules::default()),
        Err(DomainError::InvalidSelection { .. })
    ));
}

#[test]
fn test_validate_submission_rejects_mismatched_participants() {
    let event: Event = create_test_event("open", 1);
    let forged: PickSelection = PickSelection::restore(
        event.event_id().clone(),
        BetType::Moneyline,
        Selection::Team(event.home_team_id().clone()),
        TeamId::new("X"),
        TeamId::new("Y"),
        -150,
        None,
        None,
    );
    let catalog: EventCatalog = EventCatalog::upcoming(vec![event], test_now());

    assert!(matches!(
        validate_selections_match_markets([&forged], &catalog),
        Err(DomainError::InvalidSelection { .. })
    ));
}

#[test]
fn test_validate_submission_rejects_spread_without_value() {
    let event: Event = create_test_event("open", 1);
    let forged: PickSelection = PickSelection::restore(
        event.event_id().clone(),
        BetType::Spread,
        Selection::Team(event.home_team_id().clone()),
        event.home_team_id().clone(),
        event.away_team_id().clone(),
        -110,
        None,
        None,
    );
    let catalog: EventCatalog = EventCatalog::upcoming(vec![event], test_now());

    assert!(matches!(
        validate_selections_match_markets([&forged], &catalog),
        Err(DomainError::InvalidSelection { .. })
    ));
}

#[test]
fn test_validate_submission_rejects_missing_market() {
    let event: Event = Event::new(
        EventId::new("moneyline-only"),
        TeamId::new("DALLAS_COWBOYS_NFL"),
        TeamId::new("NEW_YORK_GIANTS_NFL"),
        MoneylineOdds {
            home: -150,
            away: 130,
        },
        test_now() + chrono::TimeDelta::hours(1),
    );
    let forged: PickSelection = PickSelection::restore(
        event.event_id().clone(),
        BetType::Total,
        Selection::Over,
        event.home_team_id().clone(),
        event.away_team_id().clone(),
        -110,
        None,
        Some(47.5),
    );
    let catalog: EventCatalog = EventCatalog::upcoming(vec![event], test_now());

    assert_eq!(
        validate_selections_match_markets([&forged], &catalog),
        Err(DomainError::MarketUnavailable {
            event_id: String::from("moneyline-only"),
            bet_type: BetType::Total,
        })
    );
}
