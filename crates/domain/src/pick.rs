// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::event::Event;
use crate::types::{BetType, EventId, Selection, TeamId};

/// The key under which a card holds at most one pick.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PickKey {
    /// The event the pick is on.
    pub event_id: EventId,
    /// The bet type of the pick.
    pub bet_type: BetType,
}

impl PickKey {
    /// Creates a new pick key.
    #[must_use]
    pub const fn new(event_id: EventId, bet_type: BetType) -> Self {
        Self { event_id, bet_type }
    }
}

impl std::fmt::Display for PickKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.event_id, self.bet_type)
    }
}

/// A candidate pick with its prices frozen at selection time.
///
/// The odds and spread or total value are copied from the event when the
/// selection is made and never re-read from the catalog afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickSelection {
    event_id: EventId,
    bet_type: BetType,
    selection: Selection,
    home_team_id: TeamId,
    away_team_id: TeamId,
    line: i32,
    spread_value: Option<f64>,
    total_value: Option<f64>,
}

impl PickSelection {
    /// Builds a candidate pick from an event and a choice.
    ///
    /// # Arguments
    ///
    /// * `event` - The event being picked
    /// * `bet_type` - The wager kind
    /// * `selection` - The side being backed
    ///
    /// # Returns
    ///
    /// A pick carrying the event's current price for the chosen side.
    ///
    /// # Errors
    ///
    /// Returns `MarketUnavailable` if the event does not offer the market,
    /// or `InvalidSelection` if the side does not fit the bet type or event.
    pub fn from_event(
        event: &Event,
        bet_type: BetType,
        selection: Selection,
    ) -> Result<Self, DomainError> {
        let invalid = |selection: &Selection| DomainError::InvalidSelection {
            bet_type,
            selection: selection.as_str().to_string(),
        };

        let (line, spread_value, total_value): (i32, Option<f64>, Option<f64>) =
            match (bet_type, &selection) {
                (BetType::Moneyline, Selection::Team(team_id)) => {
                    let odds = event.moneyline();
                    if team_id == event.home_team_id() {
                        (odds.home, None, None)
                    } else if team_id == event.away_team_id() {
                        (odds.away, None, None)
                    } else {
                        return Err(invalid(&selection));
                    }
                }
                (BetType::Spread, Selection::Team(team_id)) => {
                    let market = event.spread().ok_or_else(|| DomainError::MarketUnavailable {
                        event_id: event.event_id().to_string(),
                        bet_type,
                    })?;
                    if team_id == event.home_team_id() {
                        (market.home_odds, Some(market.home_line), None)
                    } else if team_id == event.away_team_id() {
                        (market.away_odds, Some(market.away_line()), None)
                    } else {
                        return Err(invalid(&selection));
                    }
                }
                (BetType::Total, Selection::Over | Selection::Under) => {
                    let market = event.total().ok_or_else(|| DomainError::MarketUnavailable {
                        event_id: event.event_id().to_string(),
                        bet_type,
                    })?;
                    let odds: i32 = if selection == Selection::Over {
                        market.over_odds
                    } else {
                        market.under_odds
                    };
                    (odds, None, Some(market.points))
                }
                _ => return Err(invalid(&selection)),
            };

        Ok(Self {
            event_id: event.event_id().clone(),
            bet_type,
            selection,
            home_team_id: event.home_team_id().clone(),
            away_team_id: event.away_team_id().clone(),
            line,
            spread_value,
            total_value,
        })
    }

    /// Rehydrates a pick from stored fields without consulting an event.
    ///
    /// Used when loading picks back from storage, where the frozen values are
    /// authoritative.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn restore(
        event_id: EventId,
        bet_type: BetType,
        selection: Selection,
        home_team_id: TeamId,
        away_team_id: TeamId,
        line: i32,
        spread_value: Option<f64>,
        total_value: Option<f64>,
    ) -> Self {
        Self {
            event_id,
            bet_type,
            selection,
            home_team_id,
            away_team_id,
            line,
            spread_value,
            total_value,
        }
    }

    /// Returns the buffer key of this pick.
    #[must_use]
    pub fn key(&self) -> PickKey {
        PickKey::new(self.event_id.clone(), self.bet_type)
    }

    /// Returns the event identifier.
    #[must_use]
    pub const fn event_id(&self) -> &EventId {
        &self.event_id
    }

    /// Returns the bet type.
    #[must_use]
    pub const fn bet_type(&self) -> BetType {
        self.bet_type
    }

    /// Returns the selected side.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns the home participant copied at selection time.
    #[must_use]
    pub const fn home_team_id(&self) -> &TeamId {
        &self.home_team_id
    }

    /// Returns the away participant copied at selection time.
    #[must_use]
    pub const fn away_team_id(&self) -> &TeamId {
        &self.away_team_id
    }

    /// Returns the locked-in price.
    #[must_use]
    pub const fn line(&self) -> i32 {
        self.line
    }

    /// Returns the spread value for spread picks.
    #[must_use]
    pub const fn spread_value(&self) -> Option<f64> {
        self.spread_value
    }

    /// Returns the total value for total picks.
    #[must_use]
    pub const fn total_value(&self) -> Option<f64> {
        self.total_value
    }
}

/// A pick as stored on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    pick_id: i64,
    card_id: i64,
    selection: PickSelection,
}

impl Pick {
    /// Creates a stored pick.
    #[must_use]
    pub const fn new(pick_id: i64, card_id: i64, selection: PickSelection) -> Self {
        Self {
            pick_id,
            card_id,
            selection,
        }
    }

    /// Returns the pick ID.
    #[must_use]
    pub const fn pick_id(&self) -> i64 {
        self.pick_id
    }

    /// Returns the owning card ID.
    #[must_use]
    pub const fn card_id(&self) -> i64 {
        self.card_id
    }

    /// Returns the frozen selection.
    #[must_use]
    pub const fn selection(&self) -> &PickSelection {
        &self.selection
    }

    /// Returns the event identifier.
    #[must_use]
    pub const fn event_id(&self) -> &EventId {
        self.selection.event_id()
    }

    /// Returns the buffer key of this pick.
    #[must_use]
    pub fn key(&self) -> PickKey {
        self.selection.key()
    }
}
