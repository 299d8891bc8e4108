// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// What a committed submission wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionOutcome {
    /// The card the picks were written to.
    pub card_id: i64,
    /// Whether the card row was created by this submission.
    pub created: bool,
    /// Editable picks removed before the insert.
    pub deleted: usize,
    /// Picks inserted.
    pub inserted: usize,
    /// Locked picks left untouched.
    pub locked: usize,
    /// The activity record written alongside.
    pub audit_event_id: i64,
}

/// Formats an instant for a `TEXT` timestamp column.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a `TEXT` timestamp column.
///
/// # Errors
///
/// Returns `ReconstructionError` if the value is not RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| PersistenceError::ReconstructionError(format!("timestamp '{value}': {e}")))
}

/// Parses a unix-millisecond timestamp column.
///
/// # Errors
///
/// Returns `ReconstructionError` if the value is out of range.
pub fn instant_from_millis(millis: i64) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("timestamp {millis}ms out of range"))
    })
}
