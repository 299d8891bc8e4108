// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The card submission transaction.
//!
//! A submission replaces the editable part of a card and leaves every locked
//! pick untouched. Lock state is recomputed here, inside the transaction,
//! from the stored picks and the live event catalog. The plan's own view of
//! what is locked is only ever widened by that check, never narrowed: a pick
//! that locked after the client last read the card is still protected.
//!
//! All writes (card row, pick delete, pick inserts, activity record) commit
//! together or not at all.

use std::collections::BTreeSet;

use betbuddies::{CardTarget, SubmissionPlan};
use betbuddies_domain::{
    CardScope, DomainError, EventCatalog, EventId, Pick, PickSelection, reconcile, validate_submission,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::SqliteConnection;
use tracing::{debug, info, warn};

use crate::backend::PersistenceBackend;
use crate::data_models::{SubmissionOutcome, format_timestamp};
use crate::diesel_schema::{cards, picks};
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::queries::cards::{get_card_in_scope, list_picks_for_card, week_column};
use crate::queries::events::load_catalog;

/// Executes a submission plan atomically.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `plan` - The validated plan from the core crate
/// * `now` - The evaluation instant
///
/// # Errors
///
/// Returns an error if:
/// - The target card does not exist in the plan's scope (`CardNotFound`)
/// - A card already exists for a create target (`DuplicateCard`)
/// - Re-validation against the live catalog fails (`SubmissionRejected`)
/// - Any database write fails
///
/// Nothing is written when an error is returned.
pub fn submit_card(
    conn: &mut SqliteConnection,
    plan: &SubmissionPlan,
    now: DateTime<Utc>,
) -> Result<SubmissionOutcome, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let catalog: EventCatalog = load_catalog(conn, now)?;

        let (card_id, created): (i64, bool) = match &plan.target {
            CardTarget::Existing(card_id) => {
                get_card_in_scope(conn, *card_id, &plan.scope)?;
                (*card_id, false)
            }
            CardTarget::Create(scope) => (insert_card(conn, scope, now)?, true),
        };

        let stored: Vec<Pick> = list_picks_for_card(conn, card_id)?;
        let mut protected: BTreeSet<EventId> =
            reconcile(stored.clone(), &catalog.upcoming_ids()).locked_event_ids();
        protected.extend(plan.protected_event_ids.iter().cloned());

        let locked_count: usize = stored
            .iter()
            .filter(|pick| protected.contains(pick.event_id()))
            .count();
        if locked_count != plan.locked_count {
            debug!(
                card_id,
                planned = plan.locked_count,
                locked_count,
                "Locked pick count changed since the plan was built"
            );
        }

        validate_submission(&plan.picks, locked_count, &catalog, &plan.rules)
            .map_err(PersistenceError::SubmissionRejected)?;
        reject_protected(&plan.picks, &protected)?;

        let protected_ids: Vec<String> = protected.iter().map(ToString::to_string).collect();
        let deleted: usize = diesel::delete(
            picks::table
                .filter(picks::card_id.eq(card_id))
                .filter(picks::event_id.ne_all(protected_ids)),
        )
        .execute(conn)?;

        let timestamp: String = format_timestamp(now);
        for pick in &plan.picks {
            insert_pick(conn, card_id, pick, &timestamp)?;
        }

        diesel::update(cards::table.filter(cards::card_id.eq(card_id)))
            .set(cards::updated_at.eq(&timestamp))
            .execute(conn)?;

        let audit_event_id: i64 = persist_audit_event(conn, &plan.audit_event)?;

        info!(
            card_id,
            created,
            deleted,
            inserted = plan.picks.len(),
            locked = locked_count,
            member_id = %plan.scope.member_id,
            league_id = plan.scope.league_id,
            week_number = plan.scope.week_number,
            "Submitted card"
        );

        Ok(SubmissionOutcome {
            card_id,
            created,
            deleted,
            inserted: plan.picks.len(),
            locked: locked_count,
            audit_event_id,
        })
    })
}

/// Inserts the card row for a first submission.
///
/// The unique index on the card scope turns a concurrent first submission
/// into `DuplicateCard`.
fn insert_card(
    conn: &mut SqliteConnection,
    scope: &CardScope,
    now: DateTime<Utc>,
) -> Result<i64, PersistenceError> {
    let timestamp: String = format_timestamp(now);
    let result: QueryResult<usize> = diesel::insert_into(cards::table)
        .values((
            cards::member_id.eq(scope.member_id.as_str()),
            cards::league_id.eq(scope.league_id),
            cards::week_number.eq(week_column(scope.week_number)?),
            cards::season_year.eq(scope.season_year),
            cards::created_at.eq(&timestamp),
            cards::updated_at.eq(&timestamp),
        ))
        .execute(conn);

    match result {
        Ok(_) => conn.get_last_insert_rowid(),
        Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            warn!(
                member_id = %scope.member_id,
                league_id = scope.league_id,
                week_number = scope.week_number,
                season_year = scope.season_year,
                "Card already exists; rejecting duplicate first submission"
            );
            Err(PersistenceError::DuplicateCard {
                member_id: scope.member_id.to_string(),
                league_id: scope.league_id,
                week_number: scope.week_number,
                season_year: scope.season_year,
            })
        }
        Err(e) => Err(e.into()),
    }
}

fn reject_protected(
    candidates: &[PickSelection],
    protected: &BTreeSet<EventId>,
) -> Result<(), PersistenceError> {
    match candidates
        .iter()
        .find(|pick| protected.contains(pick.event_id()))
    {
        Some(pick) => Err(PersistenceError::SubmissionRejected(
            DomainError::EventAlreadyStarted {
                event_id: pick.event_id().to_string(),
            },
        )),
        None => Ok(()),
    }
}

fn insert_pick(
    conn: &mut SqliteConnection,
    card_id: i64,
    pick: &PickSelection,
    created_at: &str,
) -> Result<(), PersistenceError> {
    diesel::insert_into(picks::table)
        .values((
            picks::card_id.eq(card_id),
            picks::event_id.eq(pick.event_id().as_str()),
            picks::bet_type.eq(pick.bet_type().as_str()),
            picks::selection.eq(pick.selection().as_str()),
            picks::home_team_id.eq(pick.home_team_id().as_str()),
            picks::away_team_id.eq(pick.away_team_id().as_str()),
            picks::line.eq(pick.line()),
            picks::spread_value.eq(pick.spread_value()),
            picks::total_value.eq(pick.total_value()),
            picks::created_at.eq(created_at),
        ))
        .execute(conn)?;
    Ok(())
}
