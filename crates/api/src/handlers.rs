// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations.
//!
//! Every operation takes the evaluation instant `now` from its caller, so
//! the same request gives the same answer in tests and in production.

use std::str::FromStr;

use betbuddies::{
    BufferOutcome, Command, EditSession, SubmissionPlan, SubmissionRequest, TransitionResult,
    apply, prepare_submission,
};
use betbuddies_audit::{Actor, AuditEvent, Cause};
use betbuddies_domain::{
    BetType, CardRules, CardScope, CardStatus, DomainError, Event, EventCatalog, EventId, League, MemberId,
    Pick, PickDisplay, PickKey, PickSelection, Reconciliation, SelectOutcome,
    Selection, TeamId, ToggleOutcome, WeekContext, format_pick as format_pick_display,
    format_team_name, reconcile, resolve_week_in, team_abbreviation, validate_event,
    validate_identifier, validate_league_name,
};
use betbuddies_persistence::{Persistence, SubmissionOutcome};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::request_response::{
    ActivityEntry, ActivityResponse, BufferPickRequest, BufferResponse, CreateLeagueRequest,
    EventInfo, EventInput, IngestEventsRequest, IngestEventsResponse, LeagueResponse, PickInfo,
    PickInput, ReconciledStateResponse, RemovePickRequest, SubmitCardRequest, SubmitCardResponse,
    UpcomingEventsResponse, WeekContextResponse,
};

/// Default number of entries in an activity feed.
pub const DEFAULT_ACTIVITY_LIMIT: usize = 20;

/// Largest activity feed a caller may request.
pub const MAX_ACTIVITY_LIMIT: usize = 100;

/// Parses an IANA timezone name.
///
/// # Errors
///
/// Returns `InvalidInput` if the name is not a known timezone.
pub fn parse_timezone(name: &str) -> Result<Tz, ApiError> {
    Tz::from_str(name.trim())
        .map_err(|_| DomainError::InvalidTimezone(name.to_string()).into())
}

/// Validates a member id taken from the request context.
///
/// # Errors
///
/// Returns `InvalidInput` if the id is blank.
pub fn parse_member_id(value: &str) -> Result<MemberId, ApiError> {
    validate_identifier("member", value)?;
    Ok(MemberId::new(value))
}

fn league_response(league: &League) -> Result<LeagueResponse, ApiError> {
    let league_id: i64 = league.league_id().ok_or_else(|| ApiError::Internal {
        message: String::from("League has no persisted identifier"),
    })?;
    Ok(LeagueResponse {
        league_id,
        name: league.name().to_string(),
        created_at: league.created_at(),
    })
}

fn week_response(league_id: i64, week: &WeekContext) -> WeekContextResponse {
    WeekContextResponse {
        league_id,
        week_number: week.week_number(),
        season_year: week.season_year(),
        date_range: week.date_range_label().to_string(),
        starts_at: week.starts_at(),
        ends_at: week.ends_at(),
    }
}

fn event_info(event: &Event) -> EventInfo {
    EventInfo {
        event_id: event.event_id().to_string(),
        home_team_id: event.home_team_id().to_string(),
        away_team_id: event.away_team_id().to_string(),
        home_team_name: format_team_name(event.home_team_id().as_str()),
        away_team_name: format_team_name(event.away_team_id().as_str()),
        home_abbreviation: team_abbreviation(event.home_team_id().as_str()),
        away_abbreviation: team_abbreviation(event.away_team_id().as_str()),
        starts_at: event.starts_at(),
        moneyline: event.moneyline(),
        spread: event.spread(),
        total: event.total(),
    }
}

fn pick_info(pick: &Pick, locked: bool) -> PickInfo {
    let selection: &PickSelection = pick.selection();
    PickInfo {
        pick_id: pick.pick_id(),
        event_id: selection.event_id().to_string(),
        bet_type: selection.bet_type().as_str().to_string(),
        selection: selection.selection().as_str().to_string(),
        line: selection.line(),
        spread_value: selection.spread_value(),
        total_value: selection.total_value(),
        locked,
        display: format_pick_display(selection),
    }
}

fn load_week(
    persistence: &mut Persistence,
    league_id: i64,
    now: DateTime<Utc>,
    tz: Tz,
) -> Result<WeekContext, ApiError> {
    let league: League = persistence.get_league(league_id)?;
    Ok(resolve_week_in(league.created_at(), now, &tz)?)
}

/// Creates a league. Week 1 starts at `now`.
///
/// # Errors
///
/// Returns `InvalidInput` if the name is blank or too long.
pub fn create_league(
    persistence: &mut Persistence,
    request: &CreateLeagueRequest,
    now: DateTime<Utc>,
) -> Result<LeagueResponse, ApiError> {
    validate_league_name(&request.name)?;

    let league: League = persistence.create_league(&League::new(&request.name, now))?;
    league_response(&league)
}

/// Retrieves a league.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the league does not exist.
pub fn get_league(persistence: &mut Persistence, league_id: i64) -> Result<LeagueResponse, ApiError> {
    let league: League = persistence.get_league(league_id)?;
    league_response(&league)
}

/// Resolves a league's active scoring week.
///
/// # Arguments
///
/// * `persistence` - The persistence adapter
/// * `league_id` - The league
/// * `now` - The evaluation instant
/// * `tz` - Timezone for the date-range label
///
/// # Errors
///
/// Returns an error if the league does not exist or was created after `now`.
pub fn get_week_context(
    persistence: &mut Persistence,
    league_id: i64,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<WeekContextResponse, ApiError> {
    let week: WeekContext = load_week(persistence, league_id, now, *tz)?;
    Ok(week_response(league_id, &week))
}

/// Loads a member's card for the active week and reconciles it against the
/// live catalog.
///
/// # Errors
///
/// Returns an error if the league does not exist, the week cannot be
/// resolved, or a read fails.
pub fn get_reconciled_state(
    persistence: &mut Persistence,
    member_id: &MemberId,
    league_id: i64,
    rules: &CardRules,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<ReconciledStateResponse, ApiError> {
    let week: WeekContext = load_week(persistence, league_id, now, *tz)?;
    let catalog: EventCatalog = persistence.load_catalog(now)?;
    let scope: CardScope = CardScope::new(
        member_id.clone(),
        league_id,
        week.week_number(),
        week.season_year(),
    );

    let card_id: Option<i64> = persistence.find_card(&scope)?.map(|card| card.card_id());
    let stored: Vec<Pick> = match card_id {
        Some(id) => persistence.list_picks_for_card(id)?,
        None => Vec::new(),
    };
    let stored_count: usize = stored.len();
    let reconciliation: Reconciliation = reconcile(stored, &catalog.upcoming_ids());
    let status: CardStatus = CardStatus::evaluate(stored_count, catalog.len());

    debug!(
        %member_id,
        league_id,
        week_number = week.week_number(),
        locked = reconciliation.locked_count(),
        editable = reconciliation.editable().len(),
        %status,
        "Reconciled card"
    );

    Ok(ReconciledStateResponse {
        league_id,
        member_id: member_id.to_string(),
        card_id,
        week: week_response(league_id, &week),
        status,
        can_make_picks: status.can_make_picks(),
        locked_picks: reconciliation
            .locked()
            .iter()
            .map(|pick| pick_info(pick, true))
            .collect(),
        editable_picks: reconciliation
            .editable()
            .iter()
            .map(|pick| pick_info(pick, false))
            .collect(),
        editable_event_ids: reconciliation
            .editable_event_ids()
            .iter()
            .map(ToString::to_string)
            .collect(),
        buffer: reconciliation.seed_buffer(),
        locked_count: reconciliation.locked_count(),
        max_picks: rules.max_picks(),
        upcoming_events: catalog.events().iter().map(event_info).collect(),
    })
}

/// Turns a member's pick choice into a pick with prices frozen from the
/// catalog.
fn resolve_pick(input: &PickInput, catalog: &EventCatalog) -> Result<PickSelection, ApiError> {
    validate_identifier("event", &input.event_id)?;
    let bet_type: BetType = BetType::from_str(&input.bet_type)?;
    let selection: Selection = Selection::parse(bet_type, &input.selection)?;
    let event_id: EventId = EventId::new(&input.event_id);

    let event: &Event = catalog.get(&event_id).ok_or_else(|| {
        DomainError::EventAlreadyStarted {
            event_id: event_id.to_string(),
        }
    })?;
    Ok(PickSelection::from_event(event, bet_type, selection)?)
}

fn buffer_response(result: TransitionResult) -> BufferResponse {
    let outcome: &str = match result.outcome {
        BufferOutcome::Selected(SelectOutcome::Added)
        | BufferOutcome::Toggled(ToggleOutcome::Added) => "added",
        BufferOutcome::Selected(SelectOutcome::Replaced)
        | BufferOutcome::Toggled(ToggleOutcome::Replaced) => "replaced",
        BufferOutcome::Selected(SelectOutcome::Unchanged) => "unchanged",
        BufferOutcome::Toggled(ToggleOutcome::Removed) | BufferOutcome::Removed(true) => {
            "removed"
        }
        BufferOutcome::Removed(false) => "absent",
    };
    let session: EditSession = result.new_session;

    BufferResponse {
        count: session.buffer.count(),
        remaining_capacity: session.remaining_capacity(),
        buffer: session.buffer,
        outcome: outcome.to_string(),
    }
}

/// Places a pick in a buffer.
///
/// The pick must reference an open event; its prices are copied from the
/// catalog and frozen.
///
/// # Errors
///
/// Returns an error if the pick is malformed, its event is not open, or the
/// card is full.
pub fn select_pick(
    catalog: &EventCatalog,
    request: BufferPickRequest,
    rules: &CardRules,
) -> Result<BufferResponse, ApiError> {
    let pick: PickSelection = resolve_pick(&request.pick, catalog)?;
    let session: EditSession =
        EditSession::from_buffer(request.buffer, request.locked_count, *rules);

    let result: TransitionResult = apply(&session, Command::SelectPick { pick })?;
    Ok(buffer_response(result))
}

/// Places a pick in a buffer, or removes it if the identical pick is held.
///
/// # Errors
///
/// Returns an error under the same conditions as `select_pick`.
pub fn toggle_pick(
    catalog: &EventCatalog,
    request: BufferPickRequest,
    rules: &CardRules,
) -> Result<BufferResponse, ApiError> {
    let pick: PickSelection = resolve_pick(&request.pick, catalog)?;
    let session: EditSession =
        EditSession::from_buffer(request.buffer, request.locked_count, *rules);

    let result: TransitionResult = apply(&session, Command::TogglePick { pick })?;
    Ok(buffer_response(result))
}

/// Removes a pick from a buffer. Removing an absent key is not an error.
///
/// # Errors
///
/// Returns `InvalidInput` if the bet type is unknown.
pub fn remove_pick(request: RemovePickRequest, rules: &CardRules) -> Result<BufferResponse, ApiError> {
    let key: PickKey = PickKey::new(
        EventId::new(&request.event_id),
        BetType::from_str(&request.bet_type)?,
    );
    let session: EditSession =
        EditSession::from_buffer(request.buffer, request.locked_count, *rules);

    let result: TransitionResult = apply(&session, Command::RemovePick { key })?;
    Ok(buffer_response(result))
}

/// Submits a member's card for the active week.
///
/// The card's locked picks are read and protected; the editable picks are
/// replaced by the buffer. Everything is written in one transaction.
///
/// # Arguments
///
/// * `persistence` - The persistence adapter
/// * `member_id` - The authenticated member
/// * `league_id` - The league
/// * `request` - The buffer to submit
/// * `rules` - The card rules in force
/// * `cause` - Why the submission happened, for the activity feed
/// * `now` - The evaluation instant
/// * `tz` - Timezone for week resolution labels
///
/// # Errors
///
/// Returns an error if:
/// - The card would be empty or over the pick ceiling
/// - No events remain upcoming (`BettingWindowClosed`)
/// - A pick is on an event that has started
/// - A pick does not match its event's market (`InvalidInput`)
/// - A concurrent first submission already created the card
///   (`DuplicateCardConflict`)
/// - A database operation fails
#[allow(clippy::too_many_arguments)]
pub fn submit_card(
    persistence: &mut Persistence,
    member_id: &MemberId,
    league_id: i64,
    request: SubmitCardRequest,
    rules: &CardRules,
    cause: Cause,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Result<SubmitCardResponse, ApiError> {
    let week: WeekContext = load_week(persistence, league_id, now, *tz)?;
    let catalog: EventCatalog = persistence.load_catalog(now)?;
    let scope: CardScope = CardScope::new(
        member_id.clone(),
        league_id,
        week.week_number(),
        week.season_year(),
    );

    let existing_card_id: Option<i64> = persistence.find_card(&scope)?.map(|card| card.card_id());
    let stored: Vec<Pick> = match existing_card_id {
        Some(id) => persistence.list_picks_for_card(id)?,
        None => Vec::new(),
    };
    let reconciliation: Reconciliation = reconcile(stored, &catalog.upcoming_ids());

    let submission: SubmissionRequest = SubmissionRequest {
        scope,
        existing_card_id,
        locked_picks: reconciliation.locked().to_vec(),
        picks: request.buffer.into(),
    };

    let plan: SubmissionPlan = prepare_submission(
        submission,
        &catalog,
        rules,
        Actor::member(member_id),
        cause,
        now,
    )
    .inspect_err(|e| warn!(%member_id, league_id, error = %e, "Card submission rejected"))?;

    let outcome: SubmissionOutcome = persistence
        .submit_card(&plan, now)
        .inspect_err(|e| warn!(%member_id, league_id, error = %e, "Card submission failed"))?;

    info!(
        card_id = outcome.card_id,
        %member_id,
        league_id,
        week_number = week.week_number(),
        inserted = outcome.inserted,
        locked = outcome.locked,
        "Card submitted"
    );

    Ok(SubmitCardResponse {
        card_id: outcome.card_id,
        created: outcome.created,
        league_id,
        week_number: week.week_number(),
        season_year: week.season_year(),
        locked_picks: outcome.locked,
        submitted_picks: outcome.inserted,
        activity_id: outcome.audit_event_id,
        message: format!(
            "Card saved with {} picks for week {}",
            outcome.locked + outcome.inserted,
            week.week_number()
        ),
    })
}

fn event_from_input(input: &EventInput) -> Result<Event, ApiError> {
    let mut event: Event = Event::new(
        EventId::new(&input.event_id),
        TeamId::new(&input.home_team_id),
        TeamId::new(&input.away_team_id),
        input.moneyline,
        input.starts_at,
    );
    if let Some(spread) = input.spread {
        event = event.with_spread(spread);
    }
    if let Some(total) = input.total {
        event = event.with_total(total);
    }

    validate_event(&event)?;
    Ok(event)
}

/// Inserts or replaces a batch of feed events.
///
/// # Errors
///
/// Returns `InvalidInput` if any event is malformed; nothing is written in
/// that case.
pub fn ingest_events(
    persistence: &mut Persistence,
    request: &IngestEventsRequest,
) -> Result<IngestEventsResponse, ApiError> {
    let events: Vec<Event> = request
        .events
        .iter()
        .map(event_from_input)
        .collect::<Result<Vec<Event>, ApiError>>()?;

    let ingested: usize = persistence.upsert_events(&events)?;
    info!(ingested, "Ingested feed events");

    Ok(IngestEventsResponse {
        ingested,
        message: format!("Ingested {ingested} events"),
    })
}

/// Lists events starting after `now`, soonest first.
///
/// # Errors
///
/// Returns an error if the read fails.
pub fn list_upcoming_events(
    persistence: &mut Persistence,
    now: DateTime<Utc>,
) -> Result<UpcomingEventsResponse, ApiError> {
    let catalog: EventCatalog = persistence.load_catalog(now)?;
    Ok(UpcomingEventsResponse {
        evaluated_at: catalog.evaluated_at(),
        events: catalog.events().iter().map(event_info).collect(),
    })
}

/// Reads the newest activity for a league.
///
/// `limit` defaults to `DEFAULT_ACTIVITY_LIMIT` and is capped at
/// `MAX_ACTIVITY_LIMIT`.
///
/// # Errors
///
/// Returns an error if the league does not exist or the read fails.
pub fn get_recent_activity(
    persistence: &mut Persistence,
    league_id: i64,
    limit: Option<usize>,
) -> Result<ActivityResponse, ApiError> {
    persistence.get_league(league_id)?;

    let limit: usize = limit
        .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
        .min(MAX_ACTIVITY_LIMIT);
    let events: Vec<AuditEvent> = persistence.get_recent_activity(league_id, limit)?;

    Ok(ActivityResponse {
        league_id,
        entries: events
            .into_iter()
            .map(|event| ActivityEntry {
                activity_id: event.event_id.unwrap_or_default(),
                actor_id: event.actor.id,
                action: event.action.name,
                details: event.action.details,
                week_number: event.scope.week_number,
                season_year: event.scope.season_year,
                created_at: event.created_at,
            })
            .collect(),
    })
}

/// Produces the display strings for a pick.
#[must_use]
pub fn format_pick(pick: &PickSelection) -> PickDisplay {
    format_pick_display(pick)
}
