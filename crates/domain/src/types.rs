// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The default ceiling on picks per card.
pub const MAX_PICKS: usize = 5;

/// Identifies a league member.
///
/// The value is supplied by the authentication layer and is treated as opaque.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Creates a new member identifier.
    ///
    /// # Arguments
    ///
    /// * `value` - The identifier supplied by the caller
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a sporting event in the external catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates a new event identifier.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a participant (team) in an event, e.g. `DALLAS_COWBOYS_NFL`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    /// Creates a new team identifier.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A betting league.
///
/// The creation instant anchors week numbering for the lifetime of the league.
/// Leagues are immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the league has not been persisted yet.
    league_id: Option<i64>,
    /// The display name.
    name: String,
    /// The instant the league was created.
    created_at: DateTime<Utc>,
}

impl League {
    /// Creates a new league without a persisted ID.
    ///
    /// # Arguments
    ///
    /// * `name` - The display name
    /// * `created_at` - The creation instant
    #[must_use]
    pub fn new(name: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            league_id: None,
            name: name.trim().to_string(),
            created_at,
        }
    }

    /// Creates a league with an existing persisted ID.
    #[must_use]
    pub fn with_id(league_id: i64, name: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            league_id: Some(league_id),
            name: name.trim().to_string(),
            created_at,
        }
    }

    /// Returns the league ID if persisted.
    #[must_use]
    pub const fn league_id(&self) -> Option<i64> {
        self.league_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the creation instant.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// The kinds of wager a pick can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetType {
    /// Straight winner.
    Moneyline,
    /// Margin-adjusted winner.
    Spread,
    /// Combined score over or under a line.
    #[serde(alias = "over_under")]
    Total,
}

impl BetType {
    /// Converts this bet type to its storage tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Moneyline => "moneyline",
            Self::Spread => "spread",
            Self::Total => "total",
        }
    }
}

impl FromStr for BetType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "moneyline" => Ok(Self::Moneyline),
            "spread" => Ok(Self::Spread),
            "total" | "over_under" => Ok(Self::Total),
            _ => Err(DomainError::InvalidBetType(s.to_string())),
        }
    }
}

impl std::fmt::Display for BetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The side a pick backs.
///
/// Moneyline and spread picks back a team; total picks back over or under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// A participant in the event.
    Team(TeamId),
    /// Combined score above the line.
    Over,
    /// Combined score below the line.
    Under,
}

impl Selection {
    /// Parses a stored selection value in the context of its bet type.
    ///
    /// # Arguments
    ///
    /// * `bet_type` - The bet type the selection belongs to
    /// * `value` - The stored value (team id, `over`, or `under`)
    ///
    /// # Errors
    ///
    /// Returns `InvalidSelection` if a total pick is neither over nor under,
    /// or if a team pick is empty.
    pub fn parse(bet_type: BetType, value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        match bet_type {
            BetType::Total => match trimmed.to_ascii_lowercase().as_str() {
                "over" => Ok(Self::Over),
                "under" => Ok(Self::Under),
                _ => Err(DomainError::InvalidSelection {
                    bet_type,
                    selection: value.to_string(),
                }),
            },
            BetType::Moneyline | BetType::Spread => {
                if trimmed.is_empty() {
                    return Err(DomainError::InvalidSelection {
                        bet_type,
                        selection: value.to_string(),
                    });
                }
                Ok(Self::Team(TeamId::new(trimmed)))
            }
        }
    }

    /// Returns the storage value of this selection.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Team(team_id) => team_id.as_str(),
            Self::Over => "over",
            Self::Under => "under",
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The natural key of a card: one per member, league, week and season.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardScope {
    /// The owning member.
    pub member_id: MemberId,
    /// The owning league.
    pub league_id: i64,
    /// The week number within the league.
    pub week_number: u32,
    /// The season year.
    pub season_year: i32,
}

impl CardScope {
    /// Creates a new card scope.
    #[must_use]
    pub const fn new(
        member_id: MemberId,
        league_id: i64,
        week_number: u32,
        season_year: i32,
    ) -> Self {
        Self {
            member_id,
            league_id,
            week_number,
            season_year,
        }
    }
}

/// A member's weekly card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// The canonical numeric identifier assigned by the database.
    card_id: i64,
    /// The natural key of the card.
    scope: CardScope,
}

impl Card {
    /// Creates a card from its persisted parts.
    #[must_use]
    pub const fn new(card_id: i64, scope: CardScope) -> Self {
        Self { card_id, scope }
    }

    /// Returns the card ID.
    #[must_use]
    pub const fn card_id(&self) -> i64 {
        self.card_id
    }

    /// Returns the card's natural key.
    #[must_use]
    pub const fn scope(&self) -> &CardScope {
        &self.scope
    }
}

/// Rules governing card contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRules {
    /// The maximum number of picks on one card.
    max_picks: usize,
}

impl CardRules {
    /// Creates card rules with a custom pick ceiling.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPickLimit` if `max_picks` is zero.
    pub const fn new(max_picks: usize) -> Result<Self, DomainError> {
        if max_picks == 0 {
            return Err(DomainError::InvalidPickLimit(max_picks));
        }
        Ok(Self { max_picks })
    }

    /// Returns the pick ceiling.
    #[must_use]
    pub const fn max_picks(&self) -> usize {
        self.max_picks
    }
}

impl Default for CardRules {
    fn default() -> Self {
        Self {
            max_picks: MAX_PICKS,
        }
    }
}
