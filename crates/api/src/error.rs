// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! Lower-layer errors are translated explicitly so callers see one stable
//! taxonomy: bad input, rule violations, the closed betting window, the
//! duplicate-card conflict, missing resources and internal failures.

use betbuddies::CoreError;
use betbuddies_domain::DomainError;
use betbuddies_persistence::PersistenceError;
use thiserror::Error;

/// API-level errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// No events remain upcoming for the week.
    #[error("The betting window for this week has closed")]
    BettingWindowClosed,
    /// A card already exists for this member and week.
    ///
    /// The caller should reload the card and resubmit as an update.
    #[error("Card already exists, reload and retry: {message}")]
    DuplicateCardConflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred. Nothing was applied.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

fn invalid_input(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

fn rule_violation(rule: &str, message: String) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: rule.to_string(),
        message,
    }
}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidLeagueName(_) => invalid_input("name", message),
        DomainError::InvalidIdentifier { kind, .. } => invalid_input(kind, message),
        DomainError::InvalidBetType(_) => invalid_input("bet_type", message),
        DomainError::InvalidSelection { .. } => invalid_input("selection", message),
        DomainError::InvalidEvent { .. } => invalid_input("event", message),
        DomainError::InvalidPickLimit(_) => invalid_input("max_picks", message),
        DomainError::InvalidTimezone(_) => invalid_input("timezone", message),
        DomainError::MarketUnavailable { .. } => rule_violation("market_available", message),
        DomainError::PickLimitExceeded { .. } => rule_violation("max_picks", message),
        DomainError::EmptyCard => rule_violation("non_empty_card", message),
        DomainError::EventAlreadyStarted { .. } => rule_violation("event_not_started", message),
        DomainError::LeagueNotStarted { .. } => rule_violation("league_started", message),
        DomainError::BettingWindowClosed => ApiError::BettingWindowClosed,
        DomainError::DateArithmeticOverflow { .. } => ApiError::Internal { message },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::LeagueNotFound(league_id) => ApiError::ResourceNotFound {
            resource_type: String::from("League"),
            message: format!("League {league_id} does not exist"),
        },
        PersistenceError::CardNotFound(card_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Card"),
            message: format!("Card {card_id} does not exist for this member and week"),
        },
        PersistenceError::AuditEventNotFound(activity_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Activity"),
            message: format!("Activity record {activity_id} does not exist"),
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message,
        },
        PersistenceError::DuplicateCard { .. } => ApiError::DuplicateCardConflict {
            message: err.to_string(),
        },
        PersistenceError::SubmissionRejected(domain_err) => translate_domain_error(domain_err),
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}
