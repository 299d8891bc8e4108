// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use betbuddies_domain::{
    CardStatus, MoneylineOdds, PickDisplay, SelectionBuffer, SpreadMarket, TotalMarket,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// API request to create a league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLeagueRequest {
    /// The league display name.
    pub name: String,
}

/// A league as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueResponse {
    /// The canonical numeric identifier.
    pub league_id: i64,
    /// The league display name.
    pub name: String,
    /// When the league was created. Week 1 starts here.
    pub created_at: DateTime<Utc>,
}

/// The active scoring week of a league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekContextResponse {
    /// The league.
    pub league_id: i64,
    /// The 1-based week number.
    pub week_number: u32,
    /// The season year.
    pub season_year: i32,
    /// Human-readable range, e.g. `Sep 1, 2024 - Sep 7, 2024`.
    pub date_range: String,
    /// Inclusive start of the week.
    pub starts_at: DateTime<Utc>,
    /// Exclusive end of the week.
    pub ends_at: DateTime<Utc>,
}

/// An event as supplied by the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInput {
    /// The feed's event identifier.
    pub event_id: String,
    /// The home participant.
    pub home_team_id: String,
    /// The away participant.
    pub away_team_id: String,
    /// Scheduled start.
    pub starts_at: DateTime<Utc>,
    /// Moneyline prices.
    pub moneyline: MoneylineOdds,
    /// Point-spread market, if offered.
    #[serde(default)]
    pub spread: Option<SpreadMarket>,
    /// Over/under market, if offered.
    #[serde(default)]
    pub total: Option<TotalMarket>,
}

/// API request to ingest a batch of feed events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestEventsRequest {
    /// The events to insert or replace.
    pub events: Vec<EventInput>,
}

/// API response for an event ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestEventsResponse {
    /// Number of events written.
    pub ingested: usize,
    /// A success message.
    pub message: String,
}

/// An upcoming event as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInfo {
    /// The event identifier.
    pub event_id: String,
    /// The home participant id.
    pub home_team_id: String,
    /// The away participant id.
    pub away_team_id: String,
    /// Readable home team name.
    pub home_team_name: String,
    /// Readable away team name.
    pub away_team_name: String,
    /// Home team abbreviation.
    pub home_abbreviation: String,
    /// Away team abbreviation.
    pub away_abbreviation: String,
    /// Scheduled start.
    pub starts_at: DateTime<Utc>,
    /// Moneyline prices.
    pub moneyline: MoneylineOdds,
    /// Point-spread market, if offered.
    pub spread: Option<SpreadMarket>,
    /// Over/under market, if offered.
    pub total: Option<TotalMarket>,
}

/// API response listing upcoming events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingEventsResponse {
    /// The instant the catalog was evaluated at.
    pub evaluated_at: DateTime<Utc>,
    /// Events starting after `evaluated_at`, soonest first.
    pub events: Vec<EventInfo>,
}

/// A stored pick as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickInfo {
    /// The pick identifier.
    pub pick_id: i64,
    /// The event the pick is on.
    pub event_id: String,
    /// `moneyline`, `spread` or `total`.
    pub bet_type: String,
    /// Team id, `over` or `under`.
    pub selection: String,
    /// American odds frozen at selection time.
    pub line: i32,
    /// Spread frozen at selection time.
    pub spread_value: Option<f64>,
    /// Total frozen at selection time.
    pub total_value: Option<f64>,
    /// Whether the event has started.
    pub locked: bool,
    /// Display strings.
    pub display: PickDisplay,
}

/// A member's card for the active week, reconciled against the live catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledStateResponse {
    /// The league.
    pub league_id: i64,
    /// The member.
    pub member_id: String,
    /// The card, if one has been submitted this week.
    pub card_id: Option<i64>,
    /// The active week.
    pub week: WeekContextResponse,
    /// The card status.
    pub status: CardStatus,
    /// Whether the member may still add or change picks.
    pub can_make_picks: bool,
    /// Picks whose event has started.
    pub locked_picks: Vec<PickInfo>,
    /// Picks whose event is still upcoming.
    pub editable_picks: Vec<PickInfo>,
    /// Event ids of the editable picks.
    pub editable_event_ids: Vec<String>,
    /// An edit-mode buffer seeded with the editable picks.
    pub buffer: SelectionBuffer,
    /// Number of locked picks. Buffer transitions need this.
    pub locked_count: usize,
    /// The card pick ceiling.
    pub max_picks: usize,
    /// Open events, soonest first.
    pub upcoming_events: Vec<EventInfo>,
}

/// A pick choice made by the member.
///
/// Prices are read from the live catalog when the pick is placed in the
/// buffer, and frozen there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickInput {
    /// The event.
    pub event_id: String,
    /// `moneyline`, `spread` or `total`.
    pub bet_type: String,
    /// Team id, `over` or `under`.
    pub selection: String,
}

/// API request to select or toggle a pick in a buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferPickRequest {
    /// The client's current buffer.
    #[serde(default)]
    pub buffer: SelectionBuffer,
    /// Locked picks already on the card.
    #[serde(default)]
    pub locked_count: usize,
    /// The pick to place.
    pub pick: PickInput,
}

/// API request to remove a pick from a buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemovePickRequest {
    /// The client's current buffer.
    #[serde(default)]
    pub buffer: SelectionBuffer,
    /// Locked picks already on the card.
    #[serde(default)]
    pub locked_count: usize,
    /// The event of the pick to remove.
    pub event_id: String,
    /// The bet type of the pick to remove.
    pub bet_type: String,
}

/// API response for a buffer transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BufferResponse {
    /// The new buffer.
    pub buffer: SelectionBuffer,
    /// What happened: `added`, `replaced`, `unchanged`, `removed` or `absent`.
    pub outcome: String,
    /// Picks in the buffer.
    pub count: usize,
    /// Picks that may still be added.
    pub remaining_capacity: usize,
}

/// API request to submit a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitCardRequest {
    /// The editable picks the card should hold after submission.
    pub buffer: SelectionBuffer,
}

/// API response for a successful card submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitCardResponse {
    /// The card identifier.
    pub card_id: i64,
    /// Whether this submission created the card.
    pub created: bool,
    /// The league.
    pub league_id: i64,
    /// The week number.
    pub week_number: u32,
    /// The season year.
    pub season_year: i32,
    /// Locked picks left untouched.
    pub locked_picks: usize,
    /// Editable picks written.
    pub submitted_picks: usize,
    /// The activity record written with the card.
    pub activity_id: i64,
    /// A success message.
    pub message: String,
}

/// One entry of a league's activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// The activity record id.
    pub activity_id: i64,
    /// Who acted.
    pub actor_id: String,
    /// What they did.
    pub action: String,
    /// Details of the action.
    pub details: Option<String>,
    /// The week the action belongs to.
    pub week_number: u32,
    /// The season year.
    pub season_year: i32,
    /// When it happened.
    pub created_at: DateTime<Utc>,
}

/// API response for a league's recent activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityResponse {
    /// The league.
    pub league_id: i64,
    /// Entries, newest first.
    pub entries: Vec<ActivityEntry>,
}
