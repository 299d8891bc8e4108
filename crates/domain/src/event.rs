// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sporting events and the markets they offer.
//!
//! Events come from an external feed. They are append-only: re-ingesting an
//! event id replaces its prices and start time but never removes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EventId, TeamId};

/// Moneyline prices for both sides, in American odds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneylineOdds {
    /// Price for the home side.
    pub home: i32,
    /// Price for the away side.
    pub away: i32,
}

/// A point-spread market.
///
/// The away line is always the negation of the home line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadMarket {
    /// The home side's line, e.g. `-3.5`.
    pub home_line: f64,
    /// Price for the home side.
    pub home_odds: i32,
    /// Price for the away side.
    pub away_odds: i32,
}

impl SpreadMarket {
    /// Returns the away side's line.
    #[must_use]
    pub fn away_line(&self) -> f64 {
        -self.home_line
    }
}

/// A total-points market.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalMarket {
    /// The combined-score line, e.g. `47.5`.
    pub points: f64,
    /// Price for the over.
    pub over_odds: i32,
    /// Price for the under.
    pub under_odds: i32,
}

/// A scheduled sporting event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    event_id: EventId,
    home_team_id: TeamId,
    away_team_id: TeamId,
    moneyline: MoneylineOdds,
    spread: Option<SpreadMarket>,
    total: Option<TotalMarket>,
    starts_at: DateTime<Utc>,
}

impl Event {
    /// Creates an event offering only a moneyline market.
    ///
    /// # Arguments
    ///
    /// * `event_id` - The external event identifier
    /// * `home_team_id` - The home participant
    /// * `away_team_id` - The away participant
    /// * `moneyline` - Moneyline prices
    /// * `starts_at` - Scheduled start instant
    #[must_use]
    pub const fn new(
        event_id: EventId,
        home_team_id: TeamId,
        away_team_id: TeamId,
        moneyline: MoneylineOdds,
        starts_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id,
            home_team_id,
            away_team_id,
            moneyline,
            spread: None,
            total: None,
            starts_at,
        }
    }

    /// Attaches a spread market.
    #[must_use]
    pub const fn with_spread(mut self, spread: SpreadMarket) -> Self {
        self.spread = Some(spread);
        self
    }

    /// Attaches a total-points market.
    #[must_use]
    pub const fn with_total(mut self, total: TotalMarket) -> Self {
        self.total = Some(total);
        self
    }

    /// Returns the event identifier.
    #[must_use]
    pub const fn event_id(&self) -> &EventId {
        &self.event_id
    }

    /// Returns the home participant.
    #[must_use]
    pub const fn home_team_id(&self) -> &TeamId {
        &self.home_team_id
    }

    /// Returns the away participant.
    #[must_use]
    pub const fn away_team_id(&self) -> &TeamId {
        &self.away_team_id
    }

    /// Returns the moneyline prices.
    #[must_use]
    pub const fn moneyline(&self) -> MoneylineOdds {
        self.moneyline
    }

    /// Returns the spread market, if offered.
    #[must_use]
    pub const fn spread(&self) -> Option<SpreadMarket> {
        self.spread
    }

    /// Returns the total-points market, if offered.
    #[must_use]
    pub const fn total(&self) -> Option<TotalMarket> {
        self.total
    }

    /// Returns the scheduled start instant.
    #[must_use]
    pub const fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    /// Returns whether the event is still open at `now`.
    ///
    /// An event is upcoming only while its start is strictly in the future.
    #[must_use]
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.starts_at > now
    }

    /// Returns whether `team_id` is one of the two participants.
    #[must_use]
    pub fn has_participant(&self, team_id: &TeamId) -> bool {
        &self.home_team_id == team_id || &self.away_team_id == team_id
    }
}
