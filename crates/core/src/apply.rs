// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use betbuddies_audit::{
    Action, Actor, AuditEvent, AuditScope, Cause, SUBMIT_CARD_ACTION, StateSnapshot,
};
use betbuddies_domain::{
    CardRules, DomainError, EventCatalog, EventId, SelectOutcome, SelectionBuffer, ToggleOutcome,
    validate_submission,
};
use chrono::{DateTime, Utc};

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{
    BufferOutcome, CardTarget, EditSession, SubmissionPlan, SubmissionRequest, TransitionResult,
};

/// Applies a command to an edit session, producing a new session.
///
/// # Arguments
///
/// * `session` - The current session (immutable)
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new session and what changed
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if a select or toggle would add a pick beyond the card's
/// ceiling. The input session is never modified.
pub fn apply(session: &EditSession, command: Command) -> Result<TransitionResult, CoreError> {
    let mut buffer: SelectionBuffer = session.buffer.clone();

    let outcome: BufferOutcome = match command {
        Command::SelectPick { pick } => {
            let result: SelectOutcome =
                buffer.select(pick, session.locked_count, &session.rules)?;
            BufferOutcome::Selected(result)
        }
        Command::TogglePick { pick } => {
            let result: ToggleOutcome =
                buffer.toggle(pick, session.locked_count, &session.rules)?;
            BufferOutcome::Toggled(result)
        }
        Command::RemovePick { key } => BufferOutcome::Removed(buffer.remove(&key).is_some()),
    };

    Ok(TransitionResult {
        new_session: EditSession {
            buffer,
            locked_count: session.locked_count,
            rules: session.rules,
        },
        outcome,
    })
}

/// Validates a submission and turns it into a storage-ready plan.
///
/// Checks run in order: capacity, open window, each pick on an open event,
/// no pick on an event the caller already saw locked.
///
/// # Arguments
///
/// * `request` - What the caller read and wants to write
/// * `catalog` - The live catalog, evaluated at submission time
/// * `rules` - The card rules in force
/// * `actor` - The member submitting
/// * `cause` - The request that triggered the submission
/// * `now` - The submission instant, recorded on the audit event
///
/// # Errors
///
/// Returns an error if:
/// - The card would be empty or exceed the pick ceiling
/// - No events remain upcoming
/// - A pick references an event that has started
pub fn prepare_submission(
    request: SubmissionRequest,
    catalog: &EventCatalog,
    rules: &CardRules,
    actor: Actor,
    cause: Cause,
    now: DateTime<Utc>,
) -> Result<SubmissionPlan, CoreError> {
    let locked_count: usize = request.locked_picks.len();
    validate_submission(&request.picks, locked_count, catalog, rules)?;

    let protected_event_ids: BTreeSet<EventId> = request
        .locked_picks
        .iter()
        .map(|pick| pick.event_id().clone())
        .collect();

    if let Some(pick) = request
        .picks
        .iter()
        .find(|pick| protected_event_ids.contains(pick.event_id()))
    {
        return Err(CoreError::DomainViolation(
            DomainError::EventAlreadyStarted {
                event_id: pick.event_id().to_string(),
            },
        ));
    }

    let target: CardTarget = request
        .existing_card_id
        .map_or_else(|| CardTarget::Create(request.scope.clone()), CardTarget::Existing);

    let before: StateSnapshot = StateSnapshot::new(format!(
        "card={},locked={locked_count}",
        request
            .existing_card_id
            .map_or_else(|| String::from("new"), |id| id.to_string())
    ));
    let after: StateSnapshot = StateSnapshot::new(format!(
        "locked={locked_count},submitted={}",
        request.picks.len()
    ));

    let action: Action = Action::new(
        String::from(SUBMIT_CARD_ACTION),
        Some(format!(
            "Submitted {} picks for week {} ({})",
            request.picks.len() + locked_count,
            request.scope.week_number,
            request.scope.season_year
        )),
    );

    let audit_event: AuditEvent = AuditEvent::new(
        AuditScope {
            league_id: request.scope.league_id,
            week_number: request.scope.week_number,
            season_year: request.scope.season_year,
        },
        actor,
        cause,
        action,
        before,
        after,
        now,
    );

    Ok(SubmissionPlan {
        target,
        scope: request.scope,
        protected_event_ids,
        locked_count,
        picks: request.picks,
        rules: *rules,
        audit_event,
    })
}
