// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::catalog::EventCatalog;
use crate::error::DomainError;
use crate::event::Event;
use crate::pick::PickSelection;
use crate::types::CardRules;

/// Maximum length of a league display name, in characters.
pub const MAX_LEAGUE_NAME_LEN: usize = 64;

/// Validates a league display name.
///
/// # Arguments
///
/// * `name` - The proposed name
///
/// # Errors
///
/// Returns `InvalidLeagueName` if the name is blank after trimming or longer
/// than `MAX_LEAGUE_NAME_LEN` characters.
pub fn validate_league_name(name: &str) -> Result<(), DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidLeagueName(String::from(
            "League name cannot be empty",
        )));
    }

    let len: usize = trimmed.chars().count();
    if len > MAX_LEAGUE_NAME_LEN {
        return Err(DomainError::InvalidLeagueName(format!(
            "League name must be at most {MAX_LEAGUE_NAME_LEN} characters, got {len}"
        )));
    }
    Ok(())
}

/// Validates that an identifier is not blank.
///
/// # Arguments
///
/// * `kind` - The identifier kind, used in the error
/// * `value` - The identifier value
///
/// # Errors
///
/// Returns `InvalidIdentifier` if the value is blank.
pub fn validate_identifier(kind: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidIdentifier {
            kind,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Validates an event received from the feed.
///
/// # Errors
///
/// Returns an error if:
/// - Any identifier is blank
/// - Home and away participants are the same
/// - A spread or total line is not a finite number
pub fn validate_event(event: &Event) -> Result<(), DomainError> {
    validate_identifier("event", event.event_id().as_str())?;
    validate_identifier("team", event.home_team_id().as_str())?;
    validate_identifier("team", event.away_team_id().as_str())?;

    if event.home_team_id() == event.away_team_id() {
        return Err(DomainError::InvalidEvent {
            event_id: event.event_id().to_string(),
            reason: String::from("home and away participants must differ"),
        });
    }

    if event
        .spread()
        .is_some_and(|spread| !spread.home_line.is_finite())
    {
        return Err(DomainError::InvalidEvent {
            event_id: event.event_id().to_string(),
            reason: String::from("spread line must be a finite number"),
        });
    }

    if event
        .total()
        .is_some_and(|total| !total.points.is_finite())
    {
        return Err(DomainError::InvalidEvent {
            event_id: event.event_id().to_string(),
            reason: String::from("total points must be a finite number"),
        });
    }

    Ok(())
}

/// Validates the pick count of a card about to be submitted.
///
/// # Arguments
///
/// * `buffer_count` - Picks being submitted
/// * `locked_count` - Locked picks already on the card
/// * `rules` - The card rules in force
///
/// # Errors
///
/// Returns `EmptyCard` if the card would hold no picks, or
/// `PickLimitExceeded` if it would hold more than the ceiling.
pub fn validate_pick_count(
    buffer_count: usize,
    locked_count: usize,
    rules: &CardRules,
) -> Result<(), DomainError> {
    let total: usize = buffer_count.saturating_add(locked_count);
    if total == 0 {
        return Err(DomainError::EmptyCard);
    }
    if total > rules.max_picks() {
        return Err(DomainError::PickLimitExceeded {
            max_picks: rules.max_picks(),
            requested: total,
        });
    }
    Ok(())
}

/// Validates that the betting window is still open.
///
/// # Errors
///
/// Returns `BettingWindowClosed` if no events remain upcoming.
pub const fn validate_betting_window(catalog: &EventCatalog) -> Result<(), DomainError> {
    if catalog.is_empty() {
        return Err(DomainError::BettingWindowClosed);
    }
    Ok(())
}

/// Validates that every candidate pick references an open event.
///
/// # Errors
///
/// Returns `EventAlreadyStarted` for the first pick whose event is not in
/// the catalog.
pub fn validate_selections_open<'a, I>(picks: I, catalog: &EventCatalog) -> Result<(), DomainError>
where
    I: IntoIterator<Item = &'a PickSelection>,
{
    for pick in picks {
        if !catalog.is_open(pick.event_id()) {
            return Err(DomainError::EventAlreadyStarted {
                event_id: pick.event_id().to_string(),
            });
        }
    }
    Ok(())
}

/// Validates that every candidate pick fits the market of its event.
///
/// Each pick is rebuilt from its catalog event. The rebuilt pick must agree
/// with the submitted one on the event, both participants, the side and which
/// of spread or total value is present. The frozen line and values are kept
/// as submitted, so a price move since selection is not a rejection.
///
/// # Errors
///
/// Returns `EventAlreadyStarted` if a pick's event is not in the catalog,
/// `MarketUnavailable` if the event offers no such market, or
/// `InvalidSelection` if the pick does not match the event.
pub fn validate_selections_match_markets<'a, I>(
    picks: I,
    catalog: &EventCatalog,
) -> Result<(), DomainError>
where
    I: IntoIterator<Item = &'a PickSelection>,
{
    for pick in picks {
        let event: &Event = catalog.get(pick.event_id()).ok_or_else(|| {
            DomainError::EventAlreadyStarted {
                event_id: pick.event_id().to_string(),
            }
        })?;

        let expected: PickSelection =
            PickSelection::from_event(event, pick.bet_type(), pick.selection().clone())?;

        let matches: bool = expected.event_id() == pick.event_id()
            && expected.home_team_id() == pick.home_team_id()
            && expected.away_team_id() == pick.away_team_id()
            && expected.selection() == pick.selection()
            && expected.spread_value().is_some() == pick.spread_value().is_some()
            && expected.total_value().is_some() == pick.total_value().is_some()
            && pick.spread_value().is_none_or(f64::is_finite)
            && pick.total_value().is_none_or(f64::is_finite);

        if !matches {
            return Err(DomainError::InvalidSelection {
                bet_type: pick.bet_type(),
                selection: pick.selection().as_str().to_string(),
            });
        }
    }
    Ok(())
}

/// Runs every pre-write check for a card submission, in order.
///
/// 1. Capacity (`EmptyCard`, `PickLimitExceeded`)
/// 2. Window (`BettingWindowClosed`)
/// 3. Each candidate pick is on an open event (`EventAlreadyStarted`)
/// 4. Each candidate pick fits its event's market (`MarketUnavailable`,
///    `InvalidSelection`)
///
/// # Errors
///
/// Returns the first rule violation found.
pub fn validate_submission(
    picks: &[PickSelection],
    locked_count: usize,
    catalog: &EventCatalog,
    rules: &CardRules,
) -> Result<(), DomainError> {
    validate_pick_count(picks.len(), locked_count, rules)?;
    validate_betting_window(catalog)?;
    validate_selections_open(picks, catalog)?;
    validate_selections_match_markets(picks, catalog)
}
