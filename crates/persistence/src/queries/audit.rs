// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! League activity queries.
//!
//! Every successful card submission writes one audit event. These queries
//! read them back for the league's recent-activity feed.

use betbuddies_audit::{Action, Actor, AuditEvent, AuditScope, Cause, StateSnapshot};
use diesel::prelude::*;
use diesel::SqliteConnection;
use num_traits::ToPrimitive;

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData, parse_timestamp};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventRow {
    event_id: i64,
    league_id: i64,
    week_number: i32,
    season_year: i32,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
    created_at: String,
}

impl AuditEventRow {
    fn into_audit_event(self) -> Result<AuditEvent, PersistenceError> {
        let actor_data: ActorData = serde_json::from_str(&self.actor_json)?;
        let cause_data: CauseData = serde_json::from_str(&self.cause_json)?;
        let action_data: ActionData = serde_json::from_str(&self.action_json)?;
        let before_data: StateSnapshotData = serde_json::from_str(&self.before_snapshot_json)?;
        let after_data: StateSnapshotData = serde_json::from_str(&self.after_snapshot_json)?;

        let week_number: u32 = self.week_number.to_u32().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "audit event {}: negative week number {}",
                self.event_id, self.week_number
            ))
        })?;

        let event: AuditEvent = AuditEvent::new(
            AuditScope {
                league_id: self.league_id,
                week_number,
                season_year: self.season_year,
            },
            Actor::new(actor_data.id, actor_data.actor_type),
            Cause::new(cause_data.id, cause_data.description),
            Action::new(action_data.name, action_data.details),
            StateSnapshot::new(before_data.data),
            StateSnapshot::new(after_data.data),
            parse_timestamp(&self.created_at)?,
        );

        Ok(event.with_event_id(self.event_id))
    }
}

/// Retrieves a single audit event by ID.
///
/// # Errors
///
/// Returns `AuditEventNotFound` if no audit event has this ID, or an error if the
/// stored JSON cannot be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventRow::as_select())
        .first::<AuditEventRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_audit_event: {e}")))?
        .ok_or(PersistenceError::AuditEventNotFound(event_id))?;

    row.into_audit_event()
}

/// Retrieves the most recent activity for a league, newest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `league_id` - The league
/// * `limit` - Maximum number of events to return
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be deserialized.
pub fn get_recent_activity(
    conn: &mut SqliteConnection,
    league_id: i64,
    limit: usize,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let limit: i64 = limit.to_i64().unwrap_or(i64::MAX);

    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::league_id.eq(league_id))
        .order(audit_events::event_id.desc())
        .limit(limit)
        .select(AuditEventRow::as_select())
        .load::<AuditEventRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("get_recent_activity: {e}")))?;

    rows.into_iter()
        .map(AuditEventRow::into_audit_event)
        .collect()
}
