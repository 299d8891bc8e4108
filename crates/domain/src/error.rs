// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Utc};

use crate::types::BetType;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// League name is empty or too long.
    InvalidLeagueName(String),
    /// An identifier (member, event, team) is empty or malformed.
    InvalidIdentifier {
        /// The kind of identifier (e.g., "member", "event").
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
    /// Bet type tag is not recognized.
    InvalidBetType(String),
    /// The selection is not valid for the bet type or the event.
    InvalidSelection {
        /// The bet type being selected.
        bet_type: BetType,
        /// The rejected selection value.
        selection: String,
    },
    /// The event does not offer a market for the bet type.
    MarketUnavailable {
        /// The event identifier.
        event_id: String,
        /// The requested bet type.
        bet_type: BetType,
    },
    /// The event definition is inconsistent.
    InvalidEvent {
        /// The event identifier.
        event_id: String,
        /// Description of the problem.
        reason: String,
    },
    /// Adding a pick would exceed the per-card ceiling.
    PickLimitExceeded {
        /// The configured ceiling.
        max_picks: usize,
        /// The total number of picks that was requested.
        requested: usize,
    },
    /// A card must contain at least one pick.
    EmptyCard,
    /// No events remain upcoming for the active week.
    BettingWindowClosed,
    /// The event for a candidate pick has already started.
    EventAlreadyStarted {
        /// The event identifier.
        event_id: String,
    },
    /// The evaluation instant precedes the league's creation.
    LeagueNotStarted {
        /// The league creation instant.
        created_at: DateTime<Utc>,
        /// The evaluation instant.
        now: DateTime<Utc>,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// The configured pick ceiling is not usable.
    InvalidPickLimit(usize),
    /// The timezone name is not a known IANA zone.
    InvalidTimezone(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLeagueName(msg) => write!(f, "Invalid league name: {msg}"),
            Self::InvalidIdentifier { kind, value } => {
                write!(f, "Invalid {kind} identifier: '{value}'")
            }
            Self::InvalidBetType(value) => write!(f, "Invalid bet type: '{value}'"),
            Self::InvalidSelection {
                bet_type,
                selection,
            } => {
                write!(
                    f,
                    "Selection '{selection}' is not valid for a {bet_type} pick"
                )
            }
            Self::MarketUnavailable { event_id, bet_type } => {
                write!(f, "Event {event_id} does not offer a {bet_type} market")
            }
            Self::InvalidEvent { event_id, reason } => {
                write!(f, "Invalid event {event_id}: {reason}")
            }
            Self::PickLimitExceeded {
                max_picks,
                requested,
            } => {
                write!(
                    f,
                    "A card may hold at most {max_picks} picks, but {requested} were requested"
                )
            }
            Self::EmptyCard => write!(f, "Please select at least one pick"),
            Self::BettingWindowClosed => {
                write!(f, "The betting window for this week has closed")
            }
            Self::EventAlreadyStarted { event_id } => {
                write!(f, "Event {event_id} has already started")
            }
            Self::LeagueNotStarted { created_at, now } => {
                write!(
                    f,
                    "Evaluation time {now} is before the league was created at {created_at}"
                )
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::InvalidPickLimit(value) => {
                write!(f, "Invalid pick limit: {value}. Must be at least 1")
            }
            Self::InvalidTimezone(name) => write!(f, "Invalid timezone: '{name}'"),
        }
    }
}

impl std::error::Error for DomainError {}
